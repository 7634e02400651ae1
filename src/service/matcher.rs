use crate::db::CatalogStore;
use crate::error::CoreResult;
use crate::models::{CatalogProduct, MatchedLineItem, OcrLineItem, ReceiptMatchResult};
use crate::service::fuzzy::{build_candidates, Candidate, FuzzyMatcher};
use crate::service::normalizer::normalize;
use crate::service::scorer::sustainability_score;
use rayon::prelude::*;
use std::sync::Arc;

/// 小票匹配
///
/// 每行独立：归一化描述 -> 在全量目录上模糊检索 -> 取最优命中计分；
/// 无命中记为 null / 0 分。明细之间并行处理，结果保持输入顺序。
pub fn match_receipt_items(
    items: &[OcrLineItem],
    catalog: &[CatalogProduct],
    matcher: &FuzzyMatcher,
) -> ReceiptMatchResult {
    if items.is_empty() {
        return ReceiptMatchResult::default();
    }

    // 目录只归一化一次，全部明细共用
    let candidates: Vec<Candidate<&CatalogProduct>> =
        build_candidates(catalog.iter().map(|p| (p.name.as_str(), p)));

    let matched: Vec<MatchedLineItem> = items
        .par_iter()
        .map(|item| match_line_item(item, &candidates, matcher))
        .collect();

    // 极端积分值封顶在 i64::MAX，不溢出
    let total_points = matched
        .iter()
        .fold(0i64, |acc, m| acc.saturating_add(m.points_earned));

    ReceiptMatchResult {
        items: matched,
        total_points,
    }
}

fn match_line_item(
    item: &OcrLineItem,
    candidates: &[Candidate<&CatalogProduct>],
    matcher: &FuzzyMatcher,
) -> MatchedLineItem {
    let query = normalize(&item.description);

    match matcher.best(&query, candidates) {
        Some(hit) => {
            let product = *hit.payload;
            tracing::debug!(
                "'{}' -> '{}' (score {:.3})",
                item.description, product.name, hit.score
            );
            MatchedLineItem::matched(item, &product.name, sustainability_score(product))
        }
        None => {
            tracing::debug!("'{}' -> no match", item.description);
            MatchedLineItem::unmatched(item)
        }
    }
}

/// 小票匹配服务：每次请求读取一次目录快照，整张小票都在同一快照上匹配
pub struct ReceiptMatcher {
    store: Arc<dyn CatalogStore>,
    matcher: FuzzyMatcher,
}

impl ReceiptMatcher {
    pub fn new(store: Arc<dyn CatalogStore>, matcher: FuzzyMatcher) -> Self {
        Self { store, matcher }
    }

    /// 目录读取失败时整体报错，不返回部分结果
    pub async fn match_receipt(&self, items: &[OcrLineItem]) -> CoreResult<ReceiptMatchResult> {
        if items.is_empty() {
            tracing::info!("Receipt has no line items, skipping catalog read");
            return Ok(ReceiptMatchResult::default());
        }

        let catalog = self.store.list_all_products().await.map_err(|e| {
            tracing::error!("Catalog read failed while matching receipt: {}", e);
            e
        })?;

        let result = match_receipt_items(items, &catalog, &self.matcher);

        tracing::info!(
            "Receipt matched: {} items, {} matched, {} unmatched, total points {} (catalog size {})",
            result.items.len(),
            result.matched_count(),
            result.items.len() - result.matched_count(),
            result.total_points,
            catalog.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogProduct> {
        vec![
            CatalogProduct::new("p1", "Organic Milk", 5, 1.2, 0.4),
            CatalogProduct::new("p2", "Brown Bread", 2, 0.8, 0.1),
        ]
    }

    #[test]
    fn test_points_arithmetic() {
        let items = vec![
            OcrLineItem::new("Organic Milk 1L", 2),
            OcrLineItem::new("Brown Bread Loaf", 1),
            OcrLineItem::new("Random Unknown", 1),
        ];
        let result = match_receipt_items(&items, &catalog(), &FuzzyMatcher::default());

        assert_eq!(result.total_points, 12);
        assert_eq!(result.items[0].matched_product_name.as_deref(), Some("Organic Milk"));
        assert_eq!(result.items[0].points_earned, 10);
        assert_eq!(result.items[1].matched_product_name.as_deref(), Some("Brown Bread"));
        assert_eq!(result.items[1].points_earned, 2);
        assert_eq!(result.items[2].matched_product_name, None);
        assert_eq!(result.items[2].points_earned, 0);
    }

    #[test]
    fn test_no_match_contributes_nothing() {
        let items = vec![OcrLineItem::new("Xyzzy Unknown Product", 1)];
        let result = match_receipt_items(&items, &catalog(), &FuzzyMatcher::default());

        assert_eq!(result.items.len(), 1);
        assert!(result.items[0].matched_product_name.is_none());
        assert!(result.items[0].unit_points.is_none());
        assert_eq!(result.items[0].points_earned, 0);
        assert_eq!(result.total_points, 0);
    }

    #[test]
    fn test_pack_size_noise_is_ignored() {
        let catalog = vec![CatalogProduct::new("m", "Milk", 3, 0.0, 0.0)];
        let items = vec![OcrLineItem::new("Milk 6X250ML", 1)];
        let result = match_receipt_items(&items, &catalog, &FuzzyMatcher::new(0.0, 0));
        assert_eq!(result.items[0].matched_product_name.as_deref(), Some("Milk"));
    }

    #[test]
    fn test_empty_description_is_unmatched() {
        let items = vec![OcrLineItem::new("", 3), OcrLineItem::new("!!!", 1)];
        let result = match_receipt_items(&items, &catalog(), &FuzzyMatcher::default());
        assert!(result.items.iter().all(|i| !i.is_matched()));
        assert_eq!(result.total_points, 0);
    }

    #[test]
    fn test_huge_points_saturate() {
        let catalog = vec![CatalogProduct::new("m", "Milk", i64::MAX / 2, 0.0, 0.0)];
        let items = vec![OcrLineItem::new("Milk", 3), OcrLineItem::new("Milk", 1)];
        let result = match_receipt_items(&items, &catalog, &FuzzyMatcher::default());

        assert_eq!(result.items[0].points_earned, i64::MAX);
        assert_eq!(result.items[1].points_earned, i64::MAX / 2);
        assert_eq!(result.total_points, i64::MAX);
    }

    #[test]
    fn test_empty_items() {
        let result = match_receipt_items(&[], &catalog(), &FuzzyMatcher::default());
        assert!(result.items.is_empty());
        assert_eq!(result.total_points, 0);
    }

    #[test]
    fn test_empty_catalog_matches_nothing() {
        let items = vec![OcrLineItem::new("Organic Milk", 1)];
        let result = match_receipt_items(&items, &[], &FuzzyMatcher::default());
        assert!(!result.items[0].is_matched());
    }

    #[test]
    fn test_preserves_input_order_and_description() {
        let items: Vec<OcrLineItem> = (0..50)
            .map(|i| {
                if i % 2 == 0 {
                    OcrLineItem::new(format!("organic milk #{}", i), 1)
                } else {
                    OcrLineItem::new(format!("brown bread #{}", i), 1)
                }
            })
            .collect();
        let result = match_receipt_items(&items, &catalog(), &FuzzyMatcher::default());

        for (input, output) in items.iter().zip(&result.items) {
            assert_eq!(input.description, output.description);
        }
        assert_eq!(result.items[0].matched_product_name.as_deref(), Some("Organic Milk"));
        assert_eq!(result.items[1].matched_product_name.as_deref(), Some("Brown Bread"));
        assert_eq!(result.total_points, 25 * 5 + 25 * 2);
    }
}
