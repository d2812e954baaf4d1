//! Frontmatter 感知的标签插入模块
//!
//! 检查笔记是否带有索引标签，没有则在正确的位置插入一行标签
//!
//! ## 插入位置
//!
//! ```markdown
//! ---
//! title: 索引
//! ---
//! #index          <- 有 frontmatter 时插在结束分隔符之后
//! 正文
//! ```
//!
//! 没有 frontmatter（或只有开头的 `---` 没有结束分隔符）时，标签作为第一行插入。

/// 默认的索引标签
pub const INDEX_TAG: &str = "#index";

/// frontmatter 分隔符
const DELIMITER: &str = "---";

/// 标签处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// 内容已包含标签，无需修改
    Unchanged,
    /// 插入标签后的新内容
    Tagged(String),
}

/// 检查内容是否包含标签
///
/// 在整个内容中做子串查找，不区分词边界，也不限于 frontmatter 的 tags 字段。
/// 因此 `#indexing` 也算作包含 `#index`。
pub fn has_tag(content: &str, tag: &str) -> bool {
    content.contains(tag)
}

/// 查找 frontmatter 结束分隔符所在的行
///
/// 第一行必须是 `---`，之后第一个 `---` 行即为结束标记。
///
/// # Arguments
///
/// * `content` - Markdown 内容
///
/// # Returns
///
/// 结束分隔符的行号（从 0 开始），不存在 frontmatter 时返回 None
pub fn frontmatter_end(content: &str) -> Option<usize> {
    let mut lines = content.lines();
    if !lines.next().is_some_and(is_delimiter) {
        return None;
    }
    lines.position(is_delimiter).map(|pos| pos + 1)
}

/// 确保内容带有标签
///
/// 只插入一行，不删除也不重排已有内容。插入的行沿用文件第一行的换行符。
///
/// # Arguments
///
/// * `content` - 原始内容
/// * `tag` - 要确保存在的标签，例如 [`INDEX_TAG`]
///
/// # Returns
///
/// [`TagOutcome::Unchanged`] 或带新内容的 [`TagOutcome::Tagged`]
pub fn ensure_tag(content: &str, tag: &str) -> TagOutcome {
    if has_tag(content, tag) {
        return TagOutcome::Unchanged;
    }

    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let eol = line_ending(lines.first().copied());
    let mut tagged = String::with_capacity(content.len() + tag.len() + eol.len() * 2);

    match frontmatter_end(content) {
        Some(end) => {
            lines[..=end].iter().for_each(|line| tagged.push_str(line));
            // 结束分隔符位于文件末尾且没有换行
            if !tagged.ends_with('\n') {
                tagged.push_str(eol);
            }
            tagged.push_str(tag);
            tagged.push_str(eol);
            lines[end + 1..].iter().for_each(|line| tagged.push_str(line));
        }
        None => {
            tagged.push_str(tag);
            tagged.push_str(eol);
            tagged.push_str(content);
        }
    }

    TagOutcome::Tagged(tagged)
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn line_ending(first_line: Option<&str>) -> &'static str {
    match first_line {
        Some(line) if line.ends_with("\r\n") => "\r\n",
        _ => "\n",
    }
}
