pub mod category;
pub mod product;
pub mod receipt;
pub mod recommendation;

pub use category::Category;
pub use product::CatalogProduct;
pub use receipt::{parse_line_items, MatchedLineItem, OcrLineItem, ReceiptMatchResult};
pub use recommendation::{
    Alternative, ComparisonResult, Improvement, RankedProduct, RecommendationResult,
    ScoredProduct,
};
