// src/downloader/mod.rs

mod stream;

pub use stream::{StreamDownloader, StreamOutcome};

use crate::{constants, models::FailureKind, symbols, ui, utils};
use colored::*;
use log::info;
use std::collections::BTreeMap;

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DownloadStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// 记录一次交互会话中每次尝试的结果
#[derive(Default)]
pub struct SessionReport {
    stats: DownloadStats,
    succeeded: Vec<String>,
    failed: Vec<(String, FailureKind)>,
}

impl SessionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, filename: &str) {
        self.stats.total += 1;
        self.stats.success += 1;
        self.succeeded.push(filename.to_string());
    }

    pub fn record_failure(&mut self, page_url: &str, kind: FailureKind) {
        log::error!("页面 '{}' 下载失败，类别: {:?}", page_url, kind);
        self.stats.total += 1;
        self.stats.failed += 1;
        self.failed.push((page_url.to_string(), kind));
    }

    pub fn get_stats(&self) -> DownloadStats {
        self.stats.clone()
    }

    /// 本次会话中成功保存的文件名，按下载顺序排列
    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    pub fn print_report(&self) {
        let stats = self.get_stats();
        info!(
            "会话报告: Total={}, Success={}, Failed={}",
            stats.total, stats.success, stats.failed
        );
        if stats.total == 0 {
            return;
        }

        if !self.succeeded.is_empty() {
            ui::print_sub_header("下载成功");
            for filename in self.succeeded() {
                println!(
                    "  {} {}",
                    *symbols::OK,
                    utils::truncate_text(filename, constants::UI_WIDTH - 8)
                );
            }
        }

        if !self.failed.is_empty() {
            ui::print_sub_header("失败详情");
            let mut grouped: BTreeMap<FailureKind, Vec<&String>> = BTreeMap::new();
            for (page_url, kind) in &self.failed {
                grouped.entry(*kind).or_default().push(page_url);
            }
            for (kind, pages) in grouped {
                let (symbol, color_fn, msg) = kind.get_display_info();
                println!("  {} {}", symbol, color_fn(format!("原因: {}", msg).into()));
                for page in pages {
                    println!("    - {}", utils::truncate_text(page, constants::UI_WIDTH - 6));
                }
            }
        }

        ui::print_sub_header("会话总结");
        if stats.failed == 0 {
            println!("{} 所有 {} 个视频均已下载成功。", *symbols::OK, stats.total);
        } else {
            println!(
                "{} | {} | 总计: {}",
                format!("成功: {}", stats.success).green(),
                format!("失败: {}", stats.failed).red(),
                stats.total
            );
        }
    }
}
