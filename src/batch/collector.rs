//! # 项目文件收集器
//!
//! 根据输入路径与 glob 模式收集待汇总的项目文件列表。
//!
//! ## 功能
//! - 单文件输入原样返回
//! - 目录输入按模式匹配，缺省 `*.json`
//! - 可选递归子目录
//!
//! ## 依赖关系
//! - 被 `commands/rollup.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 编译模式

use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::error::{QiangsuanError, Result};

/// 文件收集器
pub struct FileCollector {
    input: PathBuf,

    /// 编译后的匹配模式
    patterns: Vec<Pattern>,

    recursive: bool,
}

impl FileCollector {
    /// 创建收集器，缺省匹配 `*.json`
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec![Pattern::new("*.json").unwrap()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔多模式），非法模式报错
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        let mut patterns = Vec::new();
        for part in pattern.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let compiled = Pattern::new(part).map_err(|e| {
                QiangsuanError::InvalidArgument(format!("Invalid pattern '{}': {}", part, e))
            })?;
            patterns.push(compiled);
        }
        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        Ok(self)
    }

    /// 设置是否递归子目录
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 输入是否为单文件
    pub fn is_single_file(&self) -> bool {
        self.input.is_file()
    }

    /// 输入是否为目录
    pub fn is_directory(&self) -> bool {
        self.input.is_dir()
    }

    /// 收集全部匹配文件（字典序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.is_single_file() {
            return vec![self.input.clone()];
        }
        if !self.is_directory() {
            return Vec::new();
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.matches(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 文件名是否匹配任一模式
    fn matches(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => self.patterns.iter().any(|p| p.matches(name)),
            None => false,
        }
    }
}
