pub mod classifier;
pub mod fuzzy;
pub mod matcher;
pub mod normalizer;
pub mod recommender;
pub mod scorer;

pub use classifier::classify;
pub use fuzzy::{Candidate, FuzzyHit, FuzzyMatcher};
pub use matcher::{match_receipt_items, ReceiptMatcher};
pub use normalizer::normalize;
pub use recommender::{
    compare, find_alternatives, rank_all_by_score, rank_category_by_score,
    RecommendationService,
};
pub use scorer::sustainability_score;
