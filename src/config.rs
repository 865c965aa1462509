// src/config.rs

pub mod file;

use self::file::load_or_create_external_config;
use crate::{cli::Cli, constants, error::AppResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub site_base_url: Option<String>,
    pub site_origin: Option<String>,
    pub video_info_api: Option<String>,
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalConfig {
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ExternalConfig {
    pub(crate) fn default_app_config() -> Self {
        Self {
            network: NetworkConfig {
                site_base_url: Some(constants::site::BASE_URL.into()),
                site_origin: Some(constants::site::ORIGIN.into()),
                video_info_api: Some(constants::site::VIDEO_INFO_API.into()),
                user_agent: Some(constants::USER_AGENT.into()),
                connect_timeout_secs: Some(constants::CONNECT_TIMEOUT_SECS),
                timeout_secs: Some(constants::DOWNLOAD_TIMEOUT_SECS),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 视频页面链接必须以此开头，同时作为 CDN 请求的 Referer
    pub site_base_url: String,
    pub site_origin: String,
    pub video_info_api: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// 读超时，约束最终下载请求（也作用于其他请求）
    pub download_timeout: Duration,
    pub chunk_size: usize,
    /// 目标站点证书不受信任，所有请求都关闭证书校验。不对用户开放。
    pub accept_invalid_certs: bool,
    pub output_dir: PathBuf,
    pub fixed_filename: bool,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let external_config = load_or_create_external_config().unwrap_or_else(|e| {
            warn!("加载配置文件失败，使用内置默认配置: {}", e);
            ExternalConfig::default_app_config()
        });
        Ok(Self::from_external(external_config, args))
    }

    fn from_external(external_config: ExternalConfig, args: &Cli) -> Self {
        let network = external_config.network;
        Self {
            site_base_url: network
                .site_base_url
                .unwrap_or_else(|| constants::site::BASE_URL.into()),
            site_origin: network
                .site_origin
                .unwrap_or_else(|| constants::site::ORIGIN.into()),
            video_info_api: network
                .video_info_api
                .unwrap_or_else(|| constants::site::VIDEO_INFO_API.into()),
            user_agent: network
                .user_agent
                .unwrap_or_else(|| constants::USER_AGENT.into()),
            connect_timeout: Duration::from_secs(
                network.connect_timeout_secs.unwrap_or(constants::CONNECT_TIMEOUT_SECS),
            ),
            download_timeout: Duration::from_secs(
                network.timeout_secs.unwrap_or(constants::DOWNLOAD_TIMEOUT_SECS),
            ),
            chunk_size: constants::DOWNLOAD_CHUNK_SIZE,
            accept_invalid_certs: true,
            output_dir: args.output.clone(),
            fixed_filename: args.fixed_name,
        }
    }

    /// CDN 与页面请求使用的 Referer，保证以 `/` 结尾
    pub fn site_referer(&self) -> String {
        if self.site_base_url.ends_with('/') {
            self.site_base_url.clone()
        } else {
            format!("{}/", self.site_base_url)
        }
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_base_url: constants::site::BASE_URL.to_string(),
            site_origin: constants::site::ORIGIN.to_string(),
            video_info_api: constants::site::VIDEO_INFO_API.to_string(),
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            download_timeout: Duration::from_secs(15),
            chunk_size: constants::DOWNLOAD_CHUNK_SIZE,
            accept_invalid_certs: true,
            output_dir: PathBuf::from(constants::DEFAULT_SAVE_DIR),
            fixed_filename: false,
        }
    }
}
