use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 商品分类 (由名称关键词推断，不落库)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Beverages,
    Snacks,
    PersonalCare,
    Dairy,
    Cleaning,
    Food,
    Frozen,
    Meat,
    Packaging,
    /// 无关键词命中时的兜底分类
    General,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Beverages,
        Category::Snacks,
        Category::PersonalCare,
        Category::Dairy,
        Category::Cleaning,
        Category::Food,
        Category::Frozen,
        Category::Meat,
        Category::Packaging,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Beverages => "beverages",
            Category::Snacks => "snacks",
            Category::PersonalCare => "personal_care",
            Category::Dairy => "dairy",
            Category::Cleaning => "cleaning",
            Category::Food => "food",
            Category::Frozen => "frozen",
            Category::Meat => "meat",
            Category::Packaging => "packaging",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == label)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}
