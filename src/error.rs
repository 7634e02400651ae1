use thiserror::Error;

/// 目录存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// 核心错误分类
///
/// 无匹配与无替代品不是错误，分别表示为 `matchedProductName: null` 和 `alternatives: []`。
#[derive(Debug, Error)]
pub enum CoreError {
    /// 目录中不存在该商品 (404)
    #[error("product {0} not found")]
    NotFound(String),

    /// 参数数量不足或小票明细结构无法恢复 (400)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 目录读取失败，本次请求整体失败，不返回部分结果 (500)
    #[error("catalog store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

pub type CoreResult<T> = Result<T, CoreError>;
