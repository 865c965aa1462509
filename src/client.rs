// src/client.rs

use crate::{config::AppConfig, constants, error::*};
use log::debug;
use reqwest::{
    RequestBuilder, Response,
    header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, REFERER},
};
use serde_json::Value;
use std::sync::Arc;

/// 所有阶段共用的 HTTP 客户端。证书校验与超时在构建时一次性配置，
/// 不修改任何进程级状态。
#[derive(Clone)]
pub struct SiteClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl SiteClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.download_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 普通 GET 请求，User-Agent 已由客户端统一设置
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    /// 访问调度接口与 CDN 时使用的浏览器请求头，Referer 用于防盗链
    pub fn cdn_get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(ACCEPT, constants::ACCEPT_ANY)
            .header(ACCEPT_ENCODING, constants::ACCEPT_ENCODING_IDENTITY)
            .header(ACCEPT_LANGUAGE, constants::ACCEPT_LANGUAGE)
            .header(REFERER, self.config.site_referer())
    }

    /// 发送请求，非 2xx 状态视为网络失败
    pub async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let res = request.send().await?;
        debug!("GET {} -> {}", res.url(), res.status());
        Ok(res.error_for_status()?)
    }

    pub async fn fetch_text(&self, request: RequestBuilder) -> AppResult<String> {
        Ok(self.send(request).await?.text().await?)
    }

    /// 发送请求并把响应体解析为通用 JSON 文档
    pub async fn fetch_json(&self, request: RequestBuilder) -> AppResult<Value> {
        let res = self.send(request).await?;
        let url = res.url().to_string();
        let body = res.text().await?;
        serde_json::from_str(&body).map_err(|source| AppError::ApiParseFailed { url, source })
    }
}
