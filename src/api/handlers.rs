use crate::error::CoreError;
use crate::models::{parse_line_items, Alternative, Category, RankedProduct, ScoredProduct};
use crate::service::{ReceiptMatcher, RecommendationService};
use axum::{
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoreError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let response = ErrorResponse {
            success: false,
            message: self.to_string(),
        };
        (status, Json(response)).into_response()
    }
}

/// 请求体解析失败统一转为 InvalidInput，保持 {success, message} 响应格式
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, CoreError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        CoreError::InvalidInput(rejection.body_text())
    })
}

/// 请求体: OCR 明细 (结构宽松，见 parse_line_items)
#[derive(Debug, Deserialize)]
pub struct ReceiptMatchRequest {
    #[serde(default)]
    pub items: Value,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub limit: Option<usize>,
    pub category: Option<String>,
}

/// 请求体: 待对比商品ID列表
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub product_ids: Vec<String>,
}

/// 替代品响应体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativesResponse {
    pub success: bool,
    pub original: ScoredProduct,
    pub alternatives: Vec<Alternative>,
    pub category: Category,
    pub total_alternatives: usize,
}

/// 对比响应体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub success: bool,
    pub comparison: Vec<RankedProduct>,
    pub most_sustainable: RankedProduct,
    pub total_compared: usize,
}

#[derive(Debug, Serialize)]
pub struct TopProductsResponse {
    pub success: bool,
    pub products: Vec<ScoredProduct>,
    pub count: usize,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 小票明细匹配与积分
pub async fn match_receipt(
    State(matcher): State<Arc<ReceiptMatcher>>,
    payload: Result<Json<ReceiptMatchRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };
    let items = match parse_line_items(&req.items) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Rejected receipt payload: {}", e);
            return e.into_response();
        }
    };

    match matcher.match_receipt(&items).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// 同类更可持续的替代品
pub async fn find_alternatives(
    State(service): State<Arc<RecommendationService>>,
    Path(product_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Response {
    match service.alternatives(&product_id, query.limit).await {
        Ok(result) => {
            let response = AlternativesResponse {
                success: true,
                original: result.original,
                alternatives: result.alternatives,
                category: result.category,
                total_alternatives: result.total_alternatives,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 多商品可持续对比
pub async fn compare_products(
    State(service): State<Arc<RecommendationService>>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };
    match service.compare(&req.product_ids).await {
        Ok(result) => {
            let response = CompareResponse {
                success: true,
                comparison: result.comparison,
                most_sustainable: result.most_sustainable,
                total_compared: result.total_compared,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// 可持续评分排行 (可按分类)
pub async fn top_sustainable(
    State(service): State<Arc<RecommendationService>>,
    Query(query): Query<TopQuery>,
) -> Response {
    let category = match query.category.as_deref().map(str::parse::<Category>) {
        None => None,
        Some(Ok(category)) => Some(category),
        Some(Err(e)) => return CoreError::InvalidInput(e).into_response(),
    };

    match service.top_sustainable(category, query.limit).await {
        Ok(products) => {
            let response = TopProductsResponse {
                success: true,
                count: products.len(),
                products,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
