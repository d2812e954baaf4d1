//! 配置模块
//!
//! 从 JSON 文件加载笔记库路径、排除规则和索引标签
//!
//! ## 配置格式
//!
//! ```json
//! {
//!   "zettelkasten_folder_path": "/home/me/notes",
//!   "exclude": [".git/**/*", ".obsidian/**/*", "drafts/*"],
//!   "index_tag": "#index"
//! }
//! ```
//!
//! 只有 `zettelkasten_folder_path` 是必填项。

use crate::core::parser::INDEX_TAG;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 用户配置目录下的应用子目录
const APP_DIR: &str = "zettel-indexer";

/// 运行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 笔记库根目录
    pub zettelkasten_folder_path: PathBuf,

    /// 排除的 glob 模式列表
    ///
    /// 包含 `/` 的模式匹配相对根目录的路径，否则只匹配文件名
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// 索引文件必须带有的标签
    #[serde(default = "default_index_tag")]
    pub index_tag: String,
}

fn default_exclude() -> Vec<String> {
    vec![
        ".git/**/*".to_string(),
        ".obsidian/**/*".to_string(),
        ".trash/**/*".to_string(),
    ]
}

fn default_index_tag() -> String {
    INDEX_TAG.to_string()
}

impl Config {
    /// 使用默认排除规则和标签创建配置
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            zettelkasten_folder_path: root.into(),
            exclude: default_exclude(),
            index_tag: default_index_tag(),
        }
    }

    /// 从文件加载配置
    ///
    /// 文件不存在、JSON 格式错误、缺少或为空的 `zettelkasten_folder_path` 都会返回错误。
    ///
    /// # Arguments
    ///
    /// * `path` - 配置文件路径
    ///
    /// # Returns
    ///
    /// 加载的配置
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {:?}", path);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {:?}", path))?;

        if config.zettelkasten_folder_path.as_os_str().is_empty() {
            anyhow::bail!("'zettelkasten_folder_path' is empty in {:?}", path);
        }
        if config.index_tag.is_empty() {
            anyhow::bail!("'index_tag' is empty in {:?}", path);
        }

        Ok(config)
    }

    /// 确定配置文件位置
    ///
    /// 优先使用命令行指定的路径，其次是当前目录下的 `config.json`，
    /// 最后是用户配置目录下的 `zettel-indexer/config.json`。
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
            .unwrap_or(local)
    }

    /// 笔记库根目录
    pub fn root(&self) -> &Path {
        &self.zettelkasten_folder_path
    }

    /// 检查根目录存在且是目录
    pub fn validate_root(&self) -> Result<()> {
        let root = self.root();
        if !root.exists() {
            anyhow::bail!("Zettelkasten path does not exist: {:?}", root);
        }
        if !root.is_dir() {
            anyhow::bail!("Zettelkasten path is not a directory: {:?}", root);
        }
        Ok(())
    }

    /// 检查路径是否被排除
    ///
    /// # Arguments
    ///
    /// * `relative` - 相对根目录的路径
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy().replace('\\', "/");
        let file_name = relative
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.exclude.iter().any(|pattern| {
            if pattern.contains('/') {
                matches_pattern(pattern, &path_str)
            } else {
                matches_pattern(pattern, &file_name)
            }
        })
    }
}

/// 简单的 glob 模式匹配
///
/// 支持 * 匹配任意字符（包括路径分隔符），**/ 视为 *
fn matches_pattern(pattern: &str, text: &str) -> bool {
    let pattern = pattern.replace("**/", "*");

    if pattern.contains('*') || pattern.contains('?') {
        regex::Regex::new(&glob_to_regex(&pattern))
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    } else {
        pattern == text
    }
}

/// 将 glob 模式转换为整串匹配的正则表达式
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');

    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\' => {
                regex.push('\\');
                regex.push(c);
            }
            c => regex.push(c),
        }
    }

    regex.push('$');
    regex
}
