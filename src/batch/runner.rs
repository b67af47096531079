//! # 批量执行器
//!
//! 并行处理一批项目文件，收集成败统计。
//!
//! ## 功能
//! - 基于 rayon 线程池的并行迭代，结果保持输入顺序
//! - 进度条反馈
//! - 失败与跳过明细收集
//!
//! ## 依赖关系
//! - 被 `commands/rollup.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 并行计算

use std::path::PathBuf;

use rayon::prelude::*;

use crate::utils::progress;

/// 单个文件的处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功（附摘要信息）
    Success(String),
    /// 跳过（附原因）
    Skipped(String),
    /// 处理失败（文件路径, 错误信息）
    Failed(String, String),
}

/// 批量处理统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,

    /// 成功摘要（输入顺序）
    pub summaries: Vec<String>,

    /// 跳过明细
    pub skips: Vec<String>,

    /// 失败明细（文件路径, 错误信息）
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 并入一个处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(summary) => {
                self.success += 1;
                self.summaries.push(summary);
            }
            ProcessResult::Skipped(reason) => {
                self.skipped += 1;
                self.skips.push(reason);
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建执行器；0 表示按 CPU 核数
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> BatchResult
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Rolling up");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .unwrap();

        // par_iter + collect 保持文件顺序
        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch = BatchResult::default();
        for result in results {
            batch.merge(result);
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_counts() {
        let mut batch = BatchResult::default();
        batch.merge(ProcessResult::Success("甲工程: 120000.00".to_string()));
        batch.merge(ProcessResult::Skipped("catalog file".to_string()));
        batch.merge(ProcessResult::Failed("bad.json".to_string(), "parse".to_string()));

        assert_eq!(batch.success, 1);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.total(), 3);
        assert_eq!(batch.summaries.len(), 1);
        assert_eq!(batch.skips, vec!["catalog file".to_string()]);
        assert_eq!(batch.failures[0].0, "bad.json");
    }
}
