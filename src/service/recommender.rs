use crate::db::CatalogStore;
use crate::error::{CoreError, CoreResult};
use crate::models::{
    Alternative, CatalogProduct, Category, ComparisonResult, Improvement, RankedProduct,
    RecommendationResult, ScoredProduct,
};
use crate::service::classifier::classify;
use crate::service::scorer::{scored, sustainability_score};
use indexmap::IndexSet;
use std::sync::Arc;

pub const DEFAULT_ALTERNATIVES_LIMIT: usize = 3;

/// 按评分降序排序，评分相同保持目录顺序 (sort_by 是稳定排序)
fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> i64) {
    items.sort_by(|a, b| score(b).cmp(&score(a)));
}

/// 查找同类且评分严格更高的替代品
///
/// 只在内存中过滤/排序，不依赖存储端查询能力。
pub fn find_alternatives(
    target_id: &str,
    catalog: &[CatalogProduct],
    limit: usize,
) -> CoreResult<RecommendationResult> {
    let target = catalog
        .iter()
        .find(|p| p.id == target_id)
        .ok_or_else(|| CoreError::NotFound(target_id.to_string()))?;

    let original_score = sustainability_score(target);
    let category = classify(&target.name);

    let mut alternatives: Vec<Alternative> = catalog
        .iter()
        .filter(|c| c.id != target.id)
        .filter(|c| sustainability_score(c) > original_score)
        .filter(|c| classify(&c.name) == category)
        .map(|c| {
            let score = sustainability_score(c);
            Alternative {
                product: c.clone(),
                sustainability_score: score,
                improvement: Improvement {
                    carbon_reduction: target.carbon_emissions - c.carbon_emissions,
                    plastic_reduction: target.plastic_usage - c.plastic_usage,
                    score_improvement: score - original_score,
                },
            }
        })
        .collect();

    sort_by_score_desc(&mut alternatives, |a| a.sustainability_score);

    let total_alternatives = alternatives.len();
    alternatives.truncate(limit);

    Ok(RecommendationResult {
        original: scored(target),
        alternatives,
        category,
        total_alternatives,
    })
}

/// 全目录按评分排名，取前 limit 个
pub fn rank_all_by_score(catalog: &[CatalogProduct], limit: usize) -> Vec<ScoredProduct> {
    let mut ranked: Vec<ScoredProduct> = catalog.iter().map(scored).collect();
    sort_by_score_desc(&mut ranked, |p| p.sustainability_score);
    ranked.truncate(limit);
    ranked
}

/// 指定分类内按评分排名
pub fn rank_category_by_score(
    catalog: &[CatalogProduct],
    category: Category,
    limit: usize,
) -> Vec<ScoredProduct> {
    let mut ranked: Vec<ScoredProduct> = catalog
        .iter()
        .filter(|p| classify(&p.name) == category)
        .map(scored)
        .collect();
    sort_by_score_desc(&mut ranked, |p| p.sustainability_score);
    ranked.truncate(limit);
    ranked
}

/// 保序去重，不足 2 个为 InvalidInput
fn distinct_ids(ids: &[String]) -> CoreResult<IndexSet<&str>> {
    let unique: IndexSet<&str> = ids.iter().map(String::as_str).collect();
    if unique.len() < 2 {
        return Err(CoreError::InvalidInput(format!(
            "at least 2 distinct product ids are required, got {}",
            unique.len()
        )));
    }
    Ok(unique)
}

/// 对比若干商品：去重后不足 2 个为 InvalidInput，任一不存在为 NotFound
///
/// 结果按评分降序 (同分按目录顺序)，名次从 1 开始，仅第一名 is_recommended。
pub fn compare(catalog: &[CatalogProduct], ids: &[String]) -> CoreResult<ComparisonResult> {
    let unique = distinct_ids(ids)?;

    if let Some(missing) = unique
        .iter()
        .find(|id| !catalog.iter().any(|p| p.id == **id))
    {
        return Err(CoreError::NotFound(missing.to_string()));
    }

    // 按目录顺序收集，保证同分时顺序确定
    let mut selected: Vec<ScoredProduct> = catalog
        .iter()
        .filter(|p| unique.contains(p.id.as_str()))
        .map(scored)
        .collect();
    sort_by_score_desc(&mut selected, |p| p.sustainability_score);

    let comparison: Vec<RankedProduct> = selected
        .into_iter()
        .enumerate()
        .map(|(idx, p)| RankedProduct {
            product: p.product,
            sustainability_score: p.sustainability_score,
            rank: idx + 1,
            is_recommended: idx == 0,
        })
        .collect();

    let most_sustainable = comparison.first().cloned().ok_or_else(|| {
        CoreError::InvalidInput("no products to compare".to_string())
    })?;
    let total_compared = comparison.len();

    Ok(ComparisonResult {
        comparison,
        most_sustainable,
        total_compared,
    })
}

/// 推荐服务：每次请求读取一次目录，目标商品从同一快照中解析
pub struct RecommendationService {
    store: Arc<dyn CatalogStore>,
    default_limit: usize,
    top_limit: usize,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn CatalogStore>, default_limit: usize, top_limit: usize) -> Self {
        Self {
            store,
            default_limit,
            top_limit,
        }
    }

    async fn snapshot(&self) -> CoreResult<Vec<CatalogProduct>> {
        self.store.list_all_products().await.map_err(|e| {
            tracing::error!("Catalog read failed: {}", e);
            CoreError::from(e)
        })
    }

    pub async fn alternatives(
        &self,
        target_id: &str,
        limit: Option<usize>,
    ) -> CoreResult<RecommendationResult> {
        let catalog = self.snapshot().await?;
        let limit = limit.unwrap_or(self.default_limit);

        let result = find_alternatives(target_id, &catalog, limit)?;
        tracing::info!(
            "Alternatives for {} ({}): {} qualifying, returning {}",
            target_id,
            result.category,
            result.total_alternatives,
            result.alternatives.len()
        );
        Ok(result)
    }

    pub async fn top_sustainable(
        &self,
        category: Option<Category>,
        limit: Option<usize>,
    ) -> CoreResult<Vec<ScoredProduct>> {
        let catalog = self.snapshot().await?;
        let limit = limit.unwrap_or(self.top_limit);

        let ranked = match category {
            Some(category) => rank_category_by_score(&catalog, category, limit),
            None => rank_all_by_score(&catalog, limit),
        };
        tracing::info!(
            "Top sustainable (category {:?}): returning {}",
            category.map(|c| c.as_str()),
            ranked.len()
        );
        Ok(ranked)
    }

    pub async fn compare(&self, ids: &[String]) -> CoreResult<ComparisonResult> {
        // 参数数量不足时无需读取目录
        distinct_ids(ids)?;

        let catalog = self.snapshot().await?;
        let result = compare(&catalog, ids)?;
        tracing::info!(
            "Compared {} products, most sustainable: {}",
            result.total_compared,
            result.most_sustainable.product.id
        );
        Ok(result)
    }
}
