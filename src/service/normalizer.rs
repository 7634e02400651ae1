//! 商品描述文本归一化
//!
//! 顺序固定：转大写 -> 合并空白 -> 去掉规格倍数 (6X250ML) -> 去掉非 [A-Z0-9 ] 字符 -> 去首尾空格。
//!
//! 删除片段后可能留下连续空格或拼出新的规格片段 ("1X-2" -> "1X2")，
//! 因此重复执行直到结果不再变化，保证 normalize(normalize(s)) == normalize(s)。

use regex::Regex;
use std::sync::LazyLock;

/// 规格倍数片段 `<数字>X<数字><可选字母>`，可出现在词中任意位置 ("6X250ML"、"2X1L"、"12X330")
static PACK_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+X[0-9]+[A-Z]*").expect("valid pack-size pattern"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z0-9 ]").expect("valid character-class pattern"));

/// 归一化商品描述，用于模糊比较。纯函数，空串输入返回空串。
pub fn normalize(text: &str) -> String {
    let mut current = text.to_uppercase();
    loop {
        let next = normalize_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let without_packs = PACK_SIZE_RE.replace_all(&collapsed, "");
    let cleaned = DISALLOWED_RE.replace_all(&without_packs, "");

    WHITESPACE_RE.replace_all(&cleaned, " ").trim().to_string()
}
