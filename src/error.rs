// src/error.rs

use crate::models::FailureKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("无效的视频页面链接 '{url}'，链接必须以 '{expected_prefix}' 开头")]
    InvalidPageUrl {
        url: String,
        expected_prefix: String,
    },
    #[error("未能在页面 '{url}' 中找到视频ID (vid)")]
    VideoIdNotFound { url: String },
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("无法解析来自 '{url}' 的API响应: {source}")]
    ApiParseFailed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("响应中缺少字段 '{0}'")]
    MissingField(String),
    #[error("服务器返回的文件大小为0，可能下载失败: {url}")]
    EmptyContent { url: String },
    #[error("下载不完整 (预期: {expected} 字节, 实际: {actual} 字节)")]
    Incomplete { expected: u64, actual: u64 },
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("用户中断")]
    UserInterrupt,
    #[error("{0}")] // 只打印内部信息，不加任何前缀
    UserInputError(String),
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 将错误归入固定的失败类别，供调度逻辑分支判断
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::InvalidPageUrl { .. } | AppError::Url(_) | AppError::UserInputError(_) => {
                FailureKind::Validation
            }
            AppError::VideoIdNotFound { .. } => FailureKind::Extraction,
            AppError::Network(_) | AppError::ApiParseFailed { .. } | AppError::Incomplete { .. } => {
                FailureKind::Transport
            }
            AppError::MissingField(_) => FailureKind::MissingField,
            AppError::EmptyContent { .. } => FailureKind::EmptyContent,
            AppError::Io(_) => FailureKind::Storage,
            AppError::Json(_) | AppError::UserInterrupt | AppError::Other(_) => {
                FailureKind::Unexpected
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
