// src/workflows.rs

use crate::{
    DownloadJobContext, constants,
    downloader::{SessionReport, StreamDownloader},
    error::{AppError, AppResult},
    extractor::{AddressResolver, MetadataResolver, PageFetcher, validate_page_url},
    models::{DownloadReport, FailureKind, QualityChoice, QualityTier, VideoMetadata},
    symbols, ui, utils,
};
use anyhow::anyhow;
use colored::*;
use log::{debug, info, warn};
use std::io;

/// 按顺序尝试每个清晰度，遇到第一个成功的即停止。
/// 只有网络失败与字段缺失会降级到下一档，其他失败立即返回。
pub async fn resolve_with_fallback(
    resolver: &MetadataResolver<'_>,
    base_id: &str,
    page_url: &str,
    ladder: &[QualityTier],
) -> AppResult<(QualityTier, VideoMetadata)> {
    let mut last_error = None;
    for (i, &quality) in ladder.iter().enumerate() {
        match resolver.resolve(base_id, quality, page_url).await {
            Ok(metadata) => {
                info!("使用清晰度 {} 获取视频信息成功", quality);
                return Ok((quality, metadata));
            }
            Err(e) if e.kind().allows_fallback() => {
                warn!("获取 {} 视频信息失败: {}", quality, e);
                if i + 1 < ladder.len() {
                    ui::warn(&format!("{} 视频信息获取失败，尝试较低清晰度...", quality));
                }
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    Err(last_error.unwrap_or_else(|| AppError::Other(anyhow!("没有可尝试的清晰度"))))
}

/// 页面 -> 视频信息 -> 中间地址 -> CDN 地址 -> 本地文件
pub struct VideoPipeline {
    context: DownloadJobContext,
}

impl VideoPipeline {
    pub fn new(context: DownloadJobContext) -> Self {
        Self { context }
    }

    pub async fn run(&self, page_url: &str, choice: QualityChoice) -> AppResult<DownloadReport> {
        let config = self.context.config.as_ref();
        let client = self.context.http_client.as_ref();
        let page_url = page_url.trim();
        validate_page_url(page_url, &config.site_base_url)?;
        debug!("清晰度选择: {:?}", choice);

        let base_id = PageFetcher::new(client).fetch_video_id(page_url).await?;
        ui::info(&format!("视频ID: {}", base_id));

        let (quality, metadata) = resolve_with_fallback(
            &MetadataResolver::new(client),
            &base_id,
            page_url,
            &choice.candidates(),
        )
        .await?;
        print_metadata(&metadata, quality);

        let intermediate = metadata.intermediate_address()?;
        ui::info(&format!("获取到初始视频地址: {}", intermediate));

        let media_url = AddressResolver::new(client).resolve(intermediate).await?;
        ui::info(&format!("开始下载真实地址: {}", media_url));

        let filename = if config.fixed_filename {
            constants::DEFAULT_FILENAME.to_string()
        } else {
            utils::build_output_filename(&metadata.title, quality)
        };
        let save_path = config.output_dir.join(&filename);

        let outcome = StreamDownloader::new(client)
            .download(&media_url, &save_path)
            .await?;

        Ok(DownloadReport {
            path: outcome.path,
            bytes: outcome.bytes,
            content_type: outcome.content_type,
            quality,
            title: metadata.title,
        })
    }
}

fn print_metadata(metadata: &VideoMetadata, quality: QualityTier) {
    let title = if metadata.title.is_empty() { "(无标题)" } else { metadata.title.as_str() };
    ui::info(&format!("视频标题: {}", title.bold()));
    if let Some(secs) = metadata.duration_secs {
        ui::info(&format!("视频时长: {}", utils::format_duration(secs)));
    }
    ui::info(&format!("视频清晰度: {}", quality.label().green()));
}

fn print_success(report: &DownloadReport) {
    let path = std::path::absolute(&report.path).unwrap_or_else(|_| report.path.clone());
    println!(
        "\n{} {}",
        *symbols::OK,
        format!("视频下载成功！({}, {})", report.quality, utils::format_megabytes(report.bytes)).green()
    );
    println!("{} 视频保存在: {}", *symbols::ARROW, path.display());
}

/// 根据失败类别给出不同的提示
fn print_failure(error: &AppError) {
    let kind = error.kind();
    let (symbol, color_fn, summary) = kind.get_display_info();
    eprintln!("\n{} {}", symbol, color_fn(format!("{}: {}", summary, error).into()));
    print_hint(kind);
}

fn print_hint(kind: FailureKind) {
    match kind {
        FailureKind::Extraction => {
            eprintln!("{} 请确认链接是否为视频播放页面。", *symbols::INFO);
        }
        FailureKind::EmptyContent | FailureKind::MissingField => {
            eprintln!("{} 视频可能已下架或需要其他清晰度，请稍后重试。", *symbols::INFO);
        }
        _ => {}
    }
}

fn prompt_quality_choice() -> io::Result<QualityChoice> {
    let options: Vec<String> = QualityTier::MENU_ORDER
        .iter()
        .map(|q| q.label().to_string())
        .collect();
    loop {
        let input = ui::selection_menu(
            &options,
            "请选择视频清晰度",
            "输入数字选择清晰度，直接按回车自动选择最高清晰度",
        )?;
        match QualityChoice::from_menu_input(&input) {
            Some(choice) => return Ok(choice),
            None => ui::error(&format!("无效的选择 '{}'。", input)),
        }
    }
}

/// 运行单链接模式（处理 --url）
pub(crate) async fn run_single(context: DownloadJobContext) -> AppResult<()> {
    let page_url = context
        .args
        .url
        .clone()
        .ok_or_else(|| AppError::UserInputError("未提供视频页面链接。".to_string()))?;
    let choice = QualityChoice::from(context.args.quality);

    ui::print_header("56视频下载");
    ui::info(&format!("清晰度: {}", choice));
    // 错误信息由 main 统一输出，这里只补充提示
    let report = VideoPipeline::new(context)
        .run(&page_url, choice)
        .await
        .inspect_err(|e| {
            log::error!("任务 '{}' 失败: {}", page_url, e);
            print_hint(e.kind());
        })?;
    print_success(&report);
    Ok(())
}

/// 运行交互模式
pub(crate) async fn run_interactive(context: DownloadJobContext) -> AppResult<()> {
    ui::print_header("交互模式");
    ui::plain(&format!(
        "在此模式下，你可以逐一输入视频页面链接进行下载。按 {} 可随时退出。",
        *symbols::CTRL_C
    ));

    let site_base_url = context.config.site_base_url.clone();
    let pipeline = VideoPipeline::new(context);
    let mut session = SessionReport::new();

    loop {
        let input = match ui::prompt("请输入视频页面链接 (直接回车退出)", None) {
            Ok(input) => input,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(_) => return Err(AppError::UserInterrupt),
        };
        if input.is_empty() {
            break;
        }

        if let Err(e) = validate_page_url(&input, &site_base_url) {
            print_failure(&e);
            continue;
        }

        let choice = match prompt_quality_choice() {
            Ok(choice) => choice,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(_) => return Err(AppError::UserInterrupt),
        };

        match pipeline.run(&input, choice).await {
            Ok(report) => {
                let filename = report
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                session.record_success(&filename);
                print_success(&report);
            }
            Err(e) => {
                log::error!("交互模式任务 '{}' 失败: {}", input, e);
                session.record_failure(&input, e.kind());
                print_failure(&e);
            }
        }

        if !ui::confirm("是否继续下载其他视频?", true) {
            break;
        }
    }

    session.print_report();
    println!("\n{} 退出交互模式。", *symbols::INFO);
    Ok(())
}
