// src/logging.rs

use crate::{cli::LogLevel, constants};
use log::LevelFilter;
use std::{env, fs::File, path::PathBuf};

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// `~/.v56-dl/v56-dl.log`，取不到主目录时放到临时目录
fn log_file_path() -> PathBuf {
    let dir = dirs::home_dir()
        .map(|home| home.join(constants::CONFIG_DIR_NAME))
        .unwrap_or_else(|| env::temp_dir().join(clap::crate_name!()));
    dir.join(constants::LOG_FILE_NAME)
}

fn fallback_log_file_path() -> PathBuf {
    env::temp_dir().join(format!(
        "{}-{}",
        clap::crate_name!(),
        constants::LOG_FALLBACK_FILE_NAME
    ))
}

/// 依次尝试主日志文件与备用日志文件，都失败时返回 None
fn open_log_file() -> Option<(File, PathBuf)> {
    let primary = log_file_path();
    if let Some(dir) = primary.parent()
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("警告: 无法创建日志目录 {:?}: {}", dir, e);
    }

    [primary, fallback_log_file_path()]
        .into_iter()
        .find_map(|path| match fern::log_file(&path) {
            Ok(file) => Some((file, path)),
            Err(e) => {
                eprintln!("警告: 无法打开日志文件 {:?}: {}", path, e);
                None
            }
        })
}

fn build_dispatch(level: LevelFilter) -> fern::Dispatch {
    constants::NOISY_LOG_TARGETS.iter().fold(
        fern::Dispatch::new()
            .level(level)
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] [{:<5}] [{}:{}] - {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    record.line().unwrap_or(0),
                    message
                ))
            }),
        |dispatch, target| dispatch.level_for(*target, level.min(LevelFilter::Warn)),
    )
}

/// 初始化文件日志。控制台输出不经过日志系统。
pub fn setup_logging(level: LogLevel) {
    let filter = LevelFilter::from(level);
    if filter == LevelFilter::Off {
        return;
    }

    let Some((file, path)) = open_log_file() else {
        eprintln!("错误: 无法创建日志文件，本次运行不记录日志。");
        return;
    };

    match build_dispatch(filter).chain(file).apply() {
        Ok(()) => log::info!("日志写入 {:?}，级别 {}", path, filter),
        Err(e) => eprintln!("警告: 日志系统初始化失败: {}", e),
    }
}
