// src/extractor/page.rs

use crate::{
    client::SiteClient,
    error::{AppError, AppResult},
};
use log::{debug, info};
use regex::Regex;
use reqwest::header::REFERER;
use std::sync::LazyLock;
use url::Url;

/// 匹配 `vid: "123"`、`vid:123`、`vid='123'`、`"vid":"123"` 等写法
static VID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bvid["']?\s*[:=]\s*["']?(\d+)"#).unwrap());

/// 在发起任何网络请求之前校验页面链接：协议、主机与端口必须与站点一致，
/// 路径必须位于站点根路径之下。无法解析的链接返回 `AppError::Url`。
pub fn validate_page_url(page_url: &str, site_base_url: &str) -> AppResult<()> {
    let base = Url::parse(site_base_url)?;
    let page = Url::parse(page_url.trim())?;

    let same_site = page.scheme() == base.scheme()
        && page.host_str() == base.host_str()
        && page.port_or_known_default() == base.port_or_known_default()
        && page.path().starts_with(base.path());
    if same_site {
        Ok(())
    } else {
        Err(AppError::InvalidPageUrl {
            url: page_url.to_string(),
            expected_prefix: site_base_url.to_string(),
        })
    }
}

pub fn extract_video_id(html: &str) -> Option<String> {
    VID_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub struct PageFetcher<'a> {
    http_client: &'a SiteClient,
}

impl<'a> PageFetcher<'a> {
    pub fn new(http_client: &'a SiteClient) -> Self {
        Self { http_client }
    }

    /// 获取视频页面并从中提取数字视频ID
    pub async fn fetch_video_id(&self, page_url: &str) -> AppResult<String> {
        let page_url = page_url.trim();
        validate_page_url(page_url, &self.http_client.config().site_base_url)?;

        info!("获取视频页面: {}", page_url);
        let request = self
            .http_client
            .get(page_url)
            .header(REFERER, self.http_client.config().site_referer());
        let html = self.http_client.fetch_text(request).await?;
        debug!("页面长度: {} 字节", html.len());

        let vid = extract_video_id(&html).ok_or_else(|| AppError::VideoIdNotFound {
            url: page_url.to_string(),
        })?;
        info!("从页面中提取到视频ID: {}", vid);
        Ok(vid)
    }
}
