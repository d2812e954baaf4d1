//! Markdown 解析
//!
//! - [`wiki_link`] - 链接提取与笔记名规范化
//! - [`frontmatter`] - frontmatter 感知的标签插入
//!
//! 这里的函数只处理字符串，不访问文件系统，也不写日志。

pub mod frontmatter;
pub mod wiki_link;

pub use frontmatter::{ensure_tag, frontmatter_end, has_tag, TagOutcome, INDEX_TAG};
pub use wiki_link::{extract_wiki_links, format_wiki_link, normalize_note_name};
