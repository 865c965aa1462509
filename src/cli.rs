// src/cli.rs

use crate::{
    constants,
    models::{QualityChoice, QualityTier},
};
use clap::{Parser, ValueEnum, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// 命令行中的清晰度选项
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum QualityArg {
    /// 依次尝试 1080p、720p、540p
    Auto,
    #[value(name = "540p")]
    P540,
    #[value(name = "720p")]
    P720,
    #[value(name = "1080p")]
    P1080,
}

impl From<QualityArg> for QualityChoice {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Auto => QualityChoice::Auto,
            QualityArg::P540 => QualityChoice::Fixed(QualityTier::Sd540),
            QualityArg::P720 => QualityChoice::Fixed(QualityTier::Hd720),
            QualityArg::P1080 => QualityChoice::Fixed(QualityTier::Hd1080),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 启动交互式会话，逐一输入视频页面链接 (未指定 --url 时的默认模式)
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub interactive: bool,
    /// 下载单个视频页面中的视频
    #[arg(long, value_name = "URL", help_heading = "Mode", conflicts_with = "interactive")]
    pub url: Option<String>,

    // --- 下载选项 (Options) ---
    /// [单链接模式] 选择视频清晰度
    #[arg(short = 'q', long, value_enum, default_value_t = QualityArg::Auto, help_heading = "Options")]
    pub quality: QualityArg,
    /// 设置文件保存目录
    #[arg(short, long, value_name = "DIR", default_value_os_t = PathBuf::from(constants::DEFAULT_SAVE_DIR), help_heading = "Options")]
    pub output: PathBuf,
    /// 使用固定文件名 video.mp4，而不是 "标题_清晰度.mp4"
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub fixed_name: bool,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        self.interactive || self.url.is_none()
    }
}
