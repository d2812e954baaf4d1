pub mod config;
pub mod indexer;
pub mod parser;

// 重新导出 config 模块中的公共 API
pub use config::Config;

// 重新导出 parser 模块中的公共 API
pub use parser::{
    frontmatter::{ensure_tag, frontmatter_end, has_tag, TagOutcome, INDEX_TAG},
    wiki_link::{extract_wiki_links, format_wiki_link, normalize_note_name},
};

// 重新导出 indexer 模块中的公共 API
pub use indexer::{Indexer, RunSummary, UNINDEXED_FILE};
