pub mod handlers;

pub use handlers::*;

use crate::service::{ReceiptMatcher, RecommendationService};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 构建路由：小票匹配与推荐各自持有服务状态，合并后对外
pub fn router(
    receipt_matcher: Arc<ReceiptMatcher>,
    recommendation: Arc<RecommendationService>,
) -> Router {
    let receipt_routes = Router::new()
        .route("/api/receipts/match", post(match_receipt))
        .with_state(receipt_matcher);

    let recommendation_routes = Router::new()
        .route("/api/products/top", get(top_sustainable))
        .route("/api/products/compare", post(compare_products))
        .route("/api/products/:id/alternatives", get(find_alternatives))
        .with_state(recommendation);

    Router::new()
        .route("/health", get(health_check))
        .merge(receipt_routes)
        .merge(recommendation_routes)
        .layer(ServiceBuilder::new())
}
