//! 模糊匹配
//!
//! 距离定义为：查询串与候选键任意子串之间的最小编辑距离 (半全局对齐)，
//! 因此不要求候选键以查询串开头，匹配位置不参与评分。
//! 归一化距离 = 距离 / 查询串长度，<= threshold 即命中；得分 = 1 - 归一化距离。

use crate::service::normalizer::normalize;

/// 候选项：键已归一化，order 为其在原目录中的位置 (用于并列排序)
#[derive(Debug, Clone)]
pub struct Candidate<T> {
    pub key: String,
    pub payload: T,
    pub order: usize,
}

impl<T> Candidate<T> {
    /// 以原始文本构建候选项，键在此归一化
    pub fn new(raw_key: &str, payload: T, order: usize) -> Self {
        Self {
            key: normalize(raw_key),
            payload,
            order,
        }
    }
}

/// 从 (原始键, 载荷) 序列构建候选集，order 取序列位置
pub fn build_candidates<T, I, S>(entries: I) -> Vec<Candidate<T>>
where
    I: IntoIterator<Item = (S, T)>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(order, (key, payload))| Candidate::new(key.as_ref(), payload, order))
        .collect()
}

/// 检索命中
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit<'a, T> {
    pub payload: &'a T,
    pub score: f64,
    pub distance: usize,
    pub order: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: f64,
    max_results: usize,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(0.4, 0)
    }
}

impl FuzzyMatcher {
    /// threshold 会被限制在 [0, 1]；max_results 为 0 表示不截断
    pub fn new(threshold: f64, max_results: usize) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            threshold,
            max_results,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 检索候选集，按得分降序返回；得分相同按目录顺序。
    ///
    /// `query` 必须已归一化。空结果表示没有候选在阈值以内，不是错误。
    pub fn search<'a, T>(&self, query: &str, candidates: &'a [Candidate<T>]) -> Vec<FuzzyHit<'a, T>> {
        let query: Vec<u8> = query.bytes().collect();
        if query.is_empty() {
            return Vec::new();
        }

        // 超过该距离即不可能命中，可提前剪枝 (加 epsilon 抵消 0.7 * 90 之类的浮点误差)
        let max_distance = (self.threshold * query.len() as f64 + 1e-9).floor() as usize;

        let mut hits: Vec<FuzzyHit<'a, T>> = candidates
            .iter()
            .filter(|c| !c.key.is_empty())
            .filter_map(|c| {
                let distance = substring_distance(&query, c.key.as_bytes(), max_distance)?;
                Some(FuzzyHit {
                    payload: &c.payload,
                    score: 1.0 - distance as f64 / query.len() as f64,
                    distance,
                    order: c.order,
                })
            })
            .collect();

        // 同一查询下得分与距离单调对应，按整数距离排序避免浮点比较
        hits.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.order.cmp(&b.order)));

        if self.max_results > 0 {
            hits.truncate(self.max_results);
        }
        hits
    }

    /// 取最优命中
    pub fn best<'a, T>(&self, query: &str, candidates: &'a [Candidate<T>]) -> Option<FuzzyHit<'a, T>> {
        self.search(query, candidates).into_iter().next()
    }
}

/// 查询串与 text 任意子串之间的最小编辑距离；超过 max_distance 时返回 None
///
/// 首行全 0 (起点任意)，取末行最小值 (终点任意)。
fn substring_distance(query: &[u8], text: &[u8], max_distance: usize) -> Option<usize> {
    // 查询串比键长的部分至少需要同等数量的插入
    if query.len() > text.len() + max_distance {
        return None;
    }

    let mut prev = vec![0usize; text.len() + 1];
    let mut curr = vec![0usize; text.len() + 1];

    for (i, &qc) in query.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, &tc) in text.iter().enumerate() {
            let cost = usize::from(qc != tc);
            curr[j + 1] = (prev[j] + cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
            row_min = row_min.min(curr[j + 1]);
        }

        // 行最小值单调不减，已超阈值则后续不可能回落
        if row_min > max_distance {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev.into_iter().min().filter(|d| *d <= max_distance)
}
