use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 目录商品 (products)
///
/// 由外部存储持有，核心只读。分类不落库，按名称即时推断。
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub points_value: i64,       // 积分值，同时作为可持续评分
    pub carbon_emissions: f64,   // 碳排放
    pub plastic_usage: f64,      // 塑料用量
}

impl CatalogProduct {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        points_value: i64,
        carbon_emissions: f64,
        plastic_usage: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points_value,
            carbon_emissions,
            plastic_usage,
        }
    }
}
