// src/extractor/metadata.rs

use crate::{
    client::SiteClient,
    constants::api,
    error::AppResult,
    models::{QualityTier, VideoMetadata, compose_video_id},
    utils,
};
use log::{debug, info};
use reqwest::header::{ORIGIN, REFERER};

/// 调用视频信息接口，获取标题、时长与候选播放地址
pub struct MetadataResolver<'a> {
    http_client: &'a SiteClient,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(http_client: &'a SiteClient) -> Self {
        Self { http_client }
    }

    /// 只负责请求与 JSON 解析，返回通用文档
    pub async fn fetch_document(
        &self,
        base_id: &str,
        quality: QualityTier,
        page_url: &str,
    ) -> AppResult<serde_json::Value> {
        let config = self.http_client.config();
        let vid = compose_video_id(base_id, quality.suffix());
        let uid = utils::session_uid();
        let timestamp = utils::timestamp_millis();
        info!("请求视频信息: vid={} ({})", vid, quality);

        let request = self
            .http_client
            .get(&config.video_info_api)
            .query(&[
                (api::params::VID, vid.as_str()),
                (api::params::UID, uid.as_str()),
                (api::params::VER, api::VERSION),
                (api::params::SSL, api::SSL),
                (api::params::REFERER, page_url),
                (api::params::TIMESTAMP, timestamp.as_str()),
            ])
            .header(REFERER, page_url)
            .header(ORIGIN, config.site_origin.as_str());

        let document = self.http_client.fetch_json(request).await?;
        debug!("视频信息响应: {}", document);
        Ok(document)
    }

    pub async fn resolve(
        &self,
        base_id: &str,
        quality: QualityTier,
        page_url: &str,
    ) -> AppResult<VideoMetadata> {
        let document = self.fetch_document(base_id, quality, page_url).await?;
        VideoMetadata::from_document(&document)
    }
}
