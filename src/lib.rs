// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod models;
pub mod symbols;
pub mod ui;
pub mod utils;
pub mod workflows;

use crate::{cli::Cli, client::SiteClient, config::AppConfig, error::AppResult};
use log::debug;
use std::sync::Arc;

/// 核心的执行上下文，包含一次运行所需的配置与工具
#[derive(Clone)]
pub struct DownloadJobContext {
    pub config: Arc<AppConfig>,
    pub http_client: Arc<SiteClient>,
    pub args: Arc<Cli>,
}

impl DownloadJobContext {
    pub fn new(config: Arc<AppConfig>, args: Arc<Cli>) -> AppResult<Self> {
        let http_client = Arc::new(SiteClient::new(config.clone())?);
        Ok(Self {
            config,
            http_client,
            args,
        })
    }
}

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    let config = Arc::new(AppConfig::new(&args)?);
    debug!("加载的应用配置: {:?}", config);

    let context = DownloadJobContext::new(config, args.clone())?;

    if args.is_interactive() {
        workflows::run_interactive(context).await
    } else {
        workflows::run_single(context).await
    }
}
