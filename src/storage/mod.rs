//! 存储层模块
//!
//! 索引流程访问文件系统的唯一入口
//!
//! - [`NoteStore`] - 列出文件、读取文本、写入文本的抽象 trait
//! - [`FsNoteStore`] - 基于本地文件系统的实现

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 笔记存储抽象 trait
///
/// 解析逻辑不直接接触文件系统，索引器通过该 trait 完成所有 I/O
pub trait NoteStore {
    /// 列出根目录下的文件
    ///
    /// # Arguments
    ///
    /// * `root` - 根目录
    /// * `filter` - 过滤条件，参数为相对根目录的路径
    ///
    /// # Returns
    ///
    /// 通过过滤的文件完整路径，按路径排序
    fn list_files(&self, root: &Path, filter: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>>;

    /// 以 UTF-8 读取文件
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// 写入文件，覆盖已有内容
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// 本地文件系统存储
#[derive(Debug, Clone, Copy, Default)]
pub struct FsNoteStore;

impl FsNoteStore {
    pub fn new() -> Self {
        Self
    }
}

impl NoteStore for FsNoteStore {
    fn list_files(&self, root: &Path, filter: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {:?}", root);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", root, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if filter(relative) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
    }
}
