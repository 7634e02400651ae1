use crate::models::Category;

/// 分类关键词表 (有序)
///
/// 名称可能同时包含多个分类的关键词，按声明顺序取第一个命中的分类。
/// 保持为有序切片而不是 HashMap，顺序就是优先级。
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Beverages,
        &[
            "cola", "soda", "juice", "water", "tea", "coffee", "drink", "lemonade", "beer",
            "wine", "kombucha", "smoothie",
        ],
    ),
    (
        Category::Snacks,
        &[
            "chips", "nuts", "bar", "cookie", "cracker", "crisps", "chocolate", "candy",
            "popcorn", "pretzel", "biscuit",
        ],
    ),
    (
        Category::PersonalCare,
        &[
            "shampoo", "soap", "cream", "lotion", "toothpaste", "toothbrush", "deodorant",
            "conditioner", "razor", "sunscreen",
        ],
    ),
    (
        Category::Dairy,
        &["milk", "cheese", "yogurt", "yoghurt", "butter", "kefir"],
    ),
    (
        Category::Cleaning,
        &[
            "detergent", "cleaner", "bleach", "dish", "sponge", "wipes", "laundry",
            "disinfectant",
        ],
    ),
    (
        Category::Food,
        &[
            "bread", "rice", "pasta", "cereal", "flour", "beans", "sauce", "soup", "oats",
            "egg", "fruit", "vegetable",
        ],
    ),
    (
        Category::Frozen,
        &["frozen", "pizza", "ice", "popsicle"],
    ),
    (
        Category::Meat,
        &[
            "chicken", "beef", "pork", "meat", "sausage", "bacon", "turkey", "ham", "fish",
        ],
    ),
    (
        Category::Packaging,
        &["bag", "bottle", "container", "wrap", "box", "straw", "cup", "foil"],
    ),
];

/// 按名称关键词推断分类，无命中时返回 `Category::General`
pub fn classify(product_name: &str) -> Category {
    let name = product_name.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_categories() {
        assert_eq!(classify("Sparkling Water"), Category::Beverages);
        assert_eq!(classify("Salted Potato Chips"), Category::Snacks);
        assert_eq!(classify("Bamboo Toothbrush"), Category::PersonalCare);
        assert_eq!(classify("Organic Milk"), Category::Dairy);
        assert_eq!(classify("Laundry Detergent"), Category::Cleaning);
        assert_eq!(classify("Brown Bread"), Category::Food);
        assert_eq!(classify("Frozen Peas"), Category::Frozen);
        assert_eq!(classify("Chicken Breast"), Category::Meat);
        assert_eq!(classify("Reusable Shopping Bag"), Category::Packaging);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("ORGANIC MILK"), Category::Dairy);
        assert_eq!(classify("oRgAnIc MiLk"), Category::Dairy);
    }

    #[test]
    fn test_fallback_category() {
        assert_eq!(classify("Xyzzy"), Category::General);
        assert_eq!(classify(""), Category::General);
    }

    #[test]
    fn test_first_declared_category_wins() {
        // cookie (snacks) 与 butter (dairy) 同时命中，snacks 声明在前
        for _ in 0..5 {
            assert_eq!(classify("Cookie Butter"), Category::Snacks);
            assert_eq!(classify("Cheese Crackers"), Category::Snacks);
        }
        // "chocolate" 含子串 "cola"
        assert_eq!(classify("Chocolate Milk"), Category::Beverages);
        // juice (beverages) 与 bottle (packaging)
        assert_eq!(classify("Juice Bottle"), Category::Beverages);
    }

    #[test]
    fn test_table_has_no_fallback_entry() {
        assert!(CATEGORY_KEYWORDS.iter().all(|(c, _)| *c != Category::General));
    }
}
