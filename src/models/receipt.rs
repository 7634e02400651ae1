use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// OCR 小票明细行 (外部文字识别服务产出，单次请求内有效)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OcrLineItem {
    #[serde(default, deserialize_with = "lenient_description")]
    pub description: String,
    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

impl OcrLineItem {
    pub fn new(description: impl Into<String>, quantity: u32) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.max(1),
        }
    }
}

fn default_quantity() -> u32 {
    1
}

/// 缺失、null 或非字符串的描述按空串处理
fn lenient_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// 数量必须是正整数 (或可解析为正整数的字符串)，否则为 1
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_quantity(&value).unwrap_or(1))
}

fn parse_quantity(value: &Value) -> Option<u32> {
    let qty = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(qty).ok().filter(|q| *q > 0)
}

/// 解析请求中的 items 字段
///
/// 非数组 (缺失/null/其他类型) 视为空列表；数组中出现非对象元素则为 InvalidInput。
pub fn parse_line_items(value: &Value) -> CoreResult<Vec<OcrLineItem>> {
    let Value::Array(elements) = value else {
        return Ok(Vec::new());
    };

    elements
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            if !element.is_object() {
                return Err(CoreError::InvalidInput(format!(
                    "line item {} is not an object",
                    idx
                )));
            }
            serde_json::from_value(element.clone()).map_err(|e| {
                CoreError::InvalidInput(format!("line item {}: {}", idx, e))
            })
        })
        .collect()
}

/// 匹配后的明细行
///
/// 匹配成功时 points_earned == unit_points * quantity，否则为 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedLineItem {
    pub description: String,
    pub quantity: u32,
    pub matched_product_name: Option<String>,
    pub unit_points: Option<i64>,
    pub points_earned: i64,
}

impl MatchedLineItem {
    pub fn unmatched(item: &OcrLineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            matched_product_name: None,
            unit_points: None,
            points_earned: 0,
        }
    }

    pub fn matched(item: &OcrLineItem, product_name: &str, unit_points: i64) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            matched_product_name: Some(product_name.to_string()),
            unit_points: Some(unit_points),
            points_earned: unit_points.saturating_mul(i64::from(item.quantity)),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched_product_name.is_some()
    }
}

/// 小票匹配结果 `{ items, totalPoints }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptMatchResult {
    pub items: Vec<MatchedLineItem>,
    pub total_points: i64,
}

impl ReceiptMatchResult {
    pub fn matched_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_matched()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_defaults() {
        let items = parse_line_items(&json!([
            {"description": "Oat Milk"},
            {"description": "Oat Milk", "quantity": 0},
            {"description": "Oat Milk", "quantity": -3},
            {"description": "Oat Milk", "quantity": 1.5},
            {"description": "Oat Milk", "quantity": "abc"},
            {"description": "Oat Milk", "quantity": null},
            {"description": "Oat Milk", "quantity": "4"},
            {"description": "Oat Milk", "quantity": 3},
        ]))
        .unwrap();

        let quantities: Vec<u32> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![1, 1, 1, 1, 1, 1, 4, 3]);
    }

    #[test]
    fn test_missing_description_is_empty() {
        let items = parse_line_items(&json!([{"quantity": 2}, {"description": null}, {"description": 42}])).unwrap();
        assert!(items.iter().all(|i| i.description.is_empty()));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_non_array_items_is_empty_list() {
        assert!(parse_line_items(&Value::Null).unwrap().is_empty());
        assert!(parse_line_items(&json!({"description": "x"})).unwrap().is_empty());
        assert!(parse_line_items(&json!("items")).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_element_is_invalid() {
        let err = parse_line_items(&json!([{"description": "Milk"}, 7])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_matched_points_arithmetic() {
        let item = OcrLineItem::new("Organic Milk 1L", 2);
        let matched = MatchedLineItem::matched(&item, "Organic Milk", 5);
        assert_eq!(matched.points_earned, 10);
        assert_eq!(matched.unit_points, Some(5));

        let unmatched = MatchedLineItem::unmatched(&item);
        assert_eq!(unmatched.points_earned, 0);
        assert!(unmatched.unit_points.is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let item = OcrLineItem::new("Brown Bread", 1);
        let result = ReceiptMatchResult {
            items: vec![MatchedLineItem::matched(&item, "Brown Bread", 2)],
            total_points: 2,
        };
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["totalPoints"], 2);
        assert_eq!(v["items"][0]["matchedProductName"], "Brown Bread");
        assert_eq!(v["items"][0]["pointsEarned"], 2);
        assert_eq!(v["items"][0]["unitPoints"], 2);
    }
}
