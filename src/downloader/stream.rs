// src/downloader/stream.rs

use crate::{client::SiteClient, constants, error::*, ui, utils};
use futures::StreamExt;
use log::{debug, error, info, warn};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, RANGE};
use std::{
    fs::{self, File},
    io::Write as IoWrite,
    path::{Path, PathBuf},
};

/// 流式下载的结果
#[derive(Debug, Clone)]
pub struct StreamOutcome {
    pub path: PathBuf,
    pub bytes: u64,
    pub content_type: Option<String>,
}

/// 把最终的 CDN 地址流式写入本地文件
pub struct StreamDownloader<'a> {
    http_client: &'a SiteClient,
}

impl<'a> StreamDownloader<'a> {
    pub fn new(http_client: &'a SiteClient) -> Self {
        Self { http_client }
    }

    /// 下载失败时已写入的部分文件保留在磁盘上。
    pub async fn download(&self, media_url: &str, save_path: &Path) -> AppResult<StreamOutcome> {
        info!("开始下载: {} -> {:?}", media_url, save_path);
        let request = self
            .http_client
            .cdn_get(media_url)
            .header(RANGE, constants::RANGE_FROM_START);
        let res = self.http_client.send(request).await?;

        let total_size = declared_length(res.headers());
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        ui::info(&format!("文件大小: {}", utils::format_megabytes(total_size)));
        ui::info(&format!(
            "Content-Type: {}",
            content_type.as_deref().unwrap_or("unknown")
        ));

        // 长度为 0 时不创建文件，避免把空响应当作视频保存
        if total_size == 0 {
            warn!("服务器声明的文件大小为0: {}", media_url);
            return Err(AppError::EmptyContent {
                url: media_url.to_string(),
            });
        }

        if let Some(parent) = save_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(save_path)?;
        let chunk_size = self.http_client.config().chunk_size.max(1);
        let pbar = ui::new_bytes_progress_bar(total_size, "下载");

        let mut downloaded: u64 = 0;
        let mut stream = res.bytes_stream();
        let copy_result: AppResult<()> = async {
            while let Some(chunk_result) = stream.next().await {
                let chunk = chunk_result?;
                for piece in chunk.chunks(chunk_size) {
                    file.write_all(piece)?;
                    downloaded += piece.len() as u64;
                    pbar.set_position(downloaded);
                }
            }
            file.flush()?;
            Ok(())
        }
        .await;

        if let Err(e) = copy_result {
            pbar.abandon();
            error!("下载中断，已写入 {} 字节: {}", downloaded, e);
            return Err(e);
        }
        pbar.finish();

        if downloaded < total_size {
            return Err(AppError::Incomplete {
                expected: total_size,
                actual: downloaded,
            });
        }
        debug!("下载完成，共写入 {} 字节", downloaded);

        Ok(StreamOutcome {
            path: save_path.to_path_buf(),
            bytes: downloaded,
            content_type,
        })
    }
}

/// 读取 `Content-Length`，缺失或无法解析时视为 0
fn declared_length(headers: &HeaderMap) -> u64 {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
