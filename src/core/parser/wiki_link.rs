//! Wiki 链接解析模块
//!
//! 从 Markdown 中提取 `[[目标]]` / `[[目标|别名]]` 格式的链接，并将目标规范化为笔记标识
//!
//! ## 链接格式
//!
//! ```markdown
//! [[目标]]            # 链接到笔记 "目标"
//! [[目标.md]]         # 同上，.md 后缀会被去掉
//! [[目标|显示文本]]   # 只有 | 之前的部分是链接目标
//! ```
//!
//! 链接不能跨行，未闭合的 `[[` 会被忽略。

use regex::Regex;
use std::sync::LazyLock;

/// Markdown 笔记文件后缀
pub const MARKDOWN_SUFFIX: &str = ".md";

// 链接内部不允许出现方括号或换行
static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]\n]+)\]\]").expect("wikilink pattern is valid"));

/// 规范化笔记名称
///
/// 去掉结尾的 `.md`（区分大小写），不做任何其它处理：不去空白，不转小写。
/// 连续的 `.md` 后缀会全部去掉，保证函数幂等。
///
/// # Arguments
///
/// * `name` - 文件名或链接目标
///
/// # Returns
///
/// 笔记标识
pub fn normalize_note_name(name: &str) -> &str {
    name.trim_end_matches(MARKDOWN_SUFFIX)
}

/// 提取内容中的所有 wiki 链接目标
///
/// 按出现顺序返回，不去重。每个目标都经过 [`normalize_note_name`] 处理。
///
/// # Arguments
///
/// * `content` - Markdown 内容
///
/// # Returns
///
/// 笔记标识列表
pub fn extract_wiki_links(content: &str) -> Vec<String> {
    WIKI_LINK
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|inner| normalize_note_name(link_target(inner.as_str())))
        .filter(|target| !target.is_empty())
        .map(str::to_string)
        .collect()
}

/// 格式化为 wiki 链接
pub fn format_wiki_link(note: &str) -> String {
    format!("[[{}]]", note)
}

/// 取出别名分隔符之前的部分
fn link_target(inner: &str) -> &str {
    inner.split_once('|').map_or(inner, |(target, _alias)| target)
}
