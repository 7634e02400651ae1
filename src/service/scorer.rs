use crate::models::{CatalogProduct, ScoredProduct};

/// 可持续评分 = 积分值 (越高越好)，负值按 0 处理
///
/// 积分值已由离线数据准备按碳排放/塑料用量计算好，这里不再重新加权。
pub fn sustainability_score(product: &CatalogProduct) -> i64 {
    product.points_value.max(0)
}

pub fn scored(product: &CatalogProduct) -> ScoredProduct {
    ScoredProduct {
        product: product.clone(),
        sustainability_score: sustainability_score(product),
    }
}
