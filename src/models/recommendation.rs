use crate::models::{CatalogProduct, Category};
use serde::{Deserialize, Serialize};

/// 带可持续评分的商品 (Product & {sustainabilityScore})
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: CatalogProduct,
    pub sustainability_score: i64,
}

/// 替代品相对原商品的改善量
///
/// 碳排放/塑料差值可以为负，仅作展示；score_improvement 恒为正。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub carbon_reduction: f64,
    pub plastic_reduction: f64,
    pub score_improvement: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub product: CatalogProduct,
    pub sustainability_score: i64,
    pub improvement: Improvement,
}

/// 替代品推荐结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub original: ScoredProduct,
    pub alternatives: Vec<Alternative>,
    pub category: Category,
    /// 截断前满足条件的替代品总数
    pub total_alternatives: usize,
}

/// 对比结果中的单项 (1 起始名次)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    #[serde(flatten)]
    pub product: CatalogProduct,
    pub sustainability_score: i64,
    pub rank: usize,
    pub is_recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub comparison: Vec<RankedProduct>,
    pub most_sustainable: RankedProduct,
    pub total_compared: usize,
}
