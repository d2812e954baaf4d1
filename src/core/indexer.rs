//! 索引模块
//!
//! 找出没有被任何索引文件链接的笔记，并确保索引文件都带有索引标签
//!
//! ## 流程
//!
//! 1. 收集笔记：遍历根目录下的 Markdown 文件，得到全部笔记标识
//! 2. 提取链接：读取所有文件名以 `index.md` 结尾的文件，收集其中的 wiki 链接
//! 3. 写入 `unindexed.md`：全部笔记减去被链接的笔记、索引文件本身和 `unindexed`
//! 4. 标记索引文件：缺少标签的索引文件写回插入标签后的内容
//!
//! 单个文件读写失败只记录错误，不会中断整个流程。

use crate::core::config::Config;
use crate::core::parser::{
    ensure_tag, extract_wiki_links, format_wiki_link, normalize_note_name, TagOutcome,
};
use crate::storage::{FsNoteStore, NoteStore};
use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// 输出文件名
pub const UNINDEXED_FILE: &str = "unindexed.md";

/// 索引文件名后缀（不区分大小写）
const INDEX_SUFFIX: &str = "index.md";

/// 索引器
///
/// 通过 [`NoteStore`] 访问笔记库，执行一次完整的批处理
pub struct Indexer<S: NoteStore = FsNoteStore> {
    /// 存储后端
    store: S,
    /// 运行配置
    config: Config,
}

impl Indexer<FsNoteStore> {
    /// 创建基于本地文件系统的索引器
    pub fn new(config: Config) -> Self {
        Self::with_store(FsNoteStore::new(), config)
    }
}

impl<S: NoteStore> Indexer<S> {
    /// 创建使用指定存储的索引器
    ///
    /// # Arguments
    ///
    /// * `store` - 存储后端
    /// * `config` - 运行配置
    pub fn with_store(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// 获取当前配置
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 执行完整的索引流程
    ///
    /// 只有列出文件失败才会返回错误，单个文件的问题记录在 [`RunSummary::errors`] 中。
    ///
    /// # Returns
    ///
    /// 运行汇总
    pub fn run(&self) -> Result<RunSummary> {
        let root = self.config.root();
        let mut summary = RunSummary::default();

        let files = self.store.list_files(root, &|relative: &Path| {
            let selected = is_markdown(relative) || is_index_file(relative);
            selected && !self.config.is_excluded(relative)
        })?;

        if files.is_empty() {
            info!("No .md files found in {:?}, nothing to do", root);
            return Ok(summary);
        }
        info!("Found {} .md file(s) in {:?}", files.len(), root);

        info!("Phase 1: collecting notes and index files");
        let (notes, index_files) = self.collect_notes(&files);
        summary.notes_scanned = notes.len();
        summary.index_files = index_files.len();
        info!(
            "Found {} unique note(s) and {} index file(s)",
            notes.len(),
            index_files.len()
        );

        info!("Phase 2: extracting links from index files");
        let (linked, index_contents) = self.extract_links(&index_files, &mut summary);
        summary.links_found = linked.len();
        info!("Found {} unique note(s) linked from index files", linked.len());

        info!("Phase 3: writing {}", UNINDEXED_FILE);
        let index_notes: HashSet<&str> = index_files
            .iter()
            .filter_map(|path| note_id(path))
            .collect();
        let unindexed = unindexed_notes(notes.keys().map(String::as_str), &linked, &index_notes);
        self.write_unindexed(&unindexed, &mut summary);
        summary.unindexed = unindexed;

        info!("Phase 4: tagging index files with '{}'", self.config.index_tag);
        self.tag_index_files(&index_contents, &mut summary);

        info!(
            "Finished: {} unindexed note(s), {} tag(s) added, {} error(s)",
            summary.unindexed.len(),
            summary.tags_added,
            summary.errors.len()
        );
        Ok(summary)
    }

    /// 收集笔记标识和索引文件
    ///
    /// 不同目录下的同名笔记只保留第一个，并输出警告。
    fn collect_notes(&self, files: &[PathBuf]) -> (BTreeMap<String, PathBuf>, Vec<PathBuf>) {
        let mut notes: BTreeMap<String, PathBuf> = BTreeMap::new();
        let mut index_files = Vec::new();

        for path in files {
            let Some(id) = note_id(path) else {
                warn!("Skipping {}: file name is not valid UTF-8", self.display_path(path));
                continue;
            };

            if let Some(first) = notes.get(id) {
                warn!(
                    "Duplicate note name '{}': {} and {}. Using the first one.",
                    id,
                    self.display_path(first),
                    self.display_path(path)
                );
            } else {
                notes.insert(id.to_string(), path.clone());
            }

            if is_index_file(path) {
                index_files.push(path.clone());
            }
        }

        debug!("Notes: {:?}", notes.keys().collect::<Vec<_>>());
        (notes, index_files)
    }

    /// 读取索引文件并提取链接
    ///
    /// 返回链接集合，以及读取成功的索引文件内容（供标记阶段复用）
    fn extract_links(
        &self,
        index_files: &[PathBuf],
        summary: &mut RunSummary,
    ) -> (HashSet<String>, Vec<(PathBuf, String)>) {
        let mut linked = HashSet::new();
        let mut contents = Vec::with_capacity(index_files.len());

        for path in index_files {
            match self.store.read_to_string(path) {
                Ok(content) => {
                    let links = extract_wiki_links(&content);
                    debug!("Links found in {}: {:?}", self.display_path(path), links);
                    linked.extend(links);
                    contents.push((path.clone(), content));
                }
                Err(e) => {
                    error!("Error reading index file {}: {:#}", self.display_path(path), e);
                    summary.record_error(self.display_path(path), &e);
                }
            }
        }

        (linked, contents)
    }

    /// 覆盖写入 `unindexed.md`
    fn write_unindexed(&self, unindexed: &[String], summary: &mut RunSummary) {
        let path = self.config.root().join(UNINDEXED_FILE);

        match self.store.write(&path, &render_unindexed(unindexed)) {
            Ok(()) => info!("Wrote {} note(s) to {}", unindexed.len(), UNINDEXED_FILE),
            Err(e) => {
                error!("Error writing {}: {:#}", UNINDEXED_FILE, e);
                summary.record_error(UNINDEXED_FILE.to_string(), &e);
            }
        }
    }

    /// 为缺少标签的索引文件插入标签并写回
    fn tag_index_files(&self, index_contents: &[(PathBuf, String)], summary: &mut RunSummary) {
        let tag = self.config.index_tag.as_str();

        for (path, content) in index_contents {
            let shown = self.display_path(path);
            match ensure_tag(content, tag) {
                TagOutcome::Unchanged => debug!("{} already contains {}", shown, tag),
                TagOutcome::Tagged(new_content) => match self.store.write(path, &new_content) {
                    Ok(()) => {
                        info!("Tagged {} with {}", shown, tag);
                        summary.tags_added += 1;
                    }
                    Err(e) => {
                        error!("Error tagging {}: {:#}", shown, e);
                        summary.record_error(shown, &e);
                    }
                },
            }
        }
    }

    /// 相对根目录的显示路径
    fn display_path(&self, path: &Path) -> String {
        pathdiff::diff_paths(path, self.config.root())
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// 从文件路径得到笔记标识
pub fn note_id(path: &Path) -> Option<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(normalize_note_name)
}

/// 是否为 Markdown 文件（`.md` 扩展名，区分大小写）
///
/// 索引文件另由 [`is_index_file`] 按不区分大小写的 `index.md` 后缀选中
pub fn is_markdown(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("md")
}

/// 是否为索引文件（文件名以 `index.md` 结尾，不区分大小写）
pub fn is_index_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(INDEX_SUFFIX))
        .unwrap_or(false)
}

/// 计算未被索引的笔记
///
/// 全部笔记减去被链接的笔记、索引文件本身以及输出文件 `unindexed`
///
/// # Arguments
///
/// * `notes` - 全部笔记标识
/// * `linked` - 索引文件中链接到的笔记标识
/// * `index_notes` - 索引文件自身的标识
///
/// # Returns
///
/// 排序后的笔记标识
pub fn unindexed_notes<'a>(
    notes: impl IntoIterator<Item = &'a str>,
    linked: &HashSet<String>,
    index_notes: &HashSet<&str>,
) -> Vec<String> {
    let output_note = normalize_note_name(UNINDEXED_FILE);

    notes
        .into_iter()
        .filter(|id| *id != output_note)
        .filter(|id| !linked.contains(*id))
        .filter(|id| !index_notes.contains(id))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// 将笔记列表渲染为 `unindexed.md` 的内容，每行一个 wiki 链接
pub fn render_unindexed(notes: &[String]) -> String {
    notes
        .iter()
        .map(|note| format_wiki_link(note) + "\n")
        .collect()
}

/// 运行汇总
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    /// 扫描到的笔记数（去重后）
    pub notes_scanned: usize,
    /// 索引文件数
    pub index_files: usize,
    /// 索引文件中链接到的不同笔记数
    pub links_found: usize,
    /// 未被索引的笔记
    pub unindexed: Vec<String>,
    /// 新增标签的索引文件数
    pub tags_added: usize,
    /// 错误列表 (文件, 错误信息)
    pub errors: Vec<(String, String)>,
}

impl RunSummary {
    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record_error(&mut self, file: String, error: &anyhow::Error) {
        self.errors.push((file, format!("{:#}", error)));
    }
}
