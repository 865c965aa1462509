// src/extractor/address.rs

use crate::{
    client::SiteClient,
    constants::api::fields,
    error::{AppError, AppResult},
    models::api::DispatchResponse,
};
use log::{debug, info};

/// 访问中间地址，取得真实的 CDN 视频地址
pub struct AddressResolver<'a> {
    http_client: &'a SiteClient,
}

impl<'a> AddressResolver<'a> {
    pub fn new(http_client: &'a SiteClient) -> Self {
        Self { http_client }
    }

    pub async fn resolve(&self, intermediate_url: &str) -> AppResult<String> {
        info!("解析中间地址: {}", intermediate_url);
        let request = self.http_client.cdn_get(intermediate_url);
        let document = self.http_client.fetch_json(request).await?;
        debug!("调度接口响应: {}", document);

        let dispatch: DispatchResponse = serde_json::from_value(document).map_err(|source| {
            AppError::ApiParseFailed {
                url: intermediate_url.to_string(),
                source,
            }
        })?;

        let url = dispatch
            .first_url()
            .ok_or_else(|| AppError::MissingField(fields::SERVERS.to_string()))?;
        info!("获取到真实视频地址: {}", url);
        Ok(url.to_string())
    }
}
