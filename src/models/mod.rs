// src/models/mod.rs

pub mod api;

use crate::{
    constants::api::fields,
    error::{AppError, AppResult},
    symbols,
};
use colored::{ColoredString, Colorize};
use serde_json::Value;
use std::{fmt, path::PathBuf};

// 1. 清晰度档位，通过视频ID后缀选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    Sd540,
    Hd720,
    Hd1080,
}

impl QualityTier {
    /// 自动模式下的尝试顺序：从高到低
    pub const FALLBACK_LADDER: [QualityTier; 3] =
        [QualityTier::Hd1080, QualityTier::Hd720, QualityTier::Sd540];

    /// 交互菜单中的显示顺序，编号从 1 开始
    pub const MENU_ORDER: [QualityTier; 3] =
        [QualityTier::Sd540, QualityTier::Hd720, QualityTier::Hd1080];

    pub fn suffix(&self) -> &'static str {
        match self {
            QualityTier::Sd540 => "",
            QualityTier::Hd720 => "_1",
            QualityTier::Hd1080 => "_21",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Sd540 => "540P",
            QualityTier::Hd720 => "720P",
            QualityTier::Hd1080 => "1080P",
        }
    }

    /// 未识别的后缀（包括空串）一律视为 540P
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "_1" => QualityTier::Hd720,
            "_21" => QualityTier::Hd1080,
            _ => QualityTier::Sd540,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn label_for_suffix(suffix: &str) -> &'static str {
    QualityTier::from_suffix(suffix).label()
}

/// API 使用的视频ID：基础ID与清晰度后缀直接拼接
pub fn compose_video_id(base_id: &str, suffix: &str) -> String {
    format!("{}{}", base_id, suffix)
}

// 2. 用户的清晰度选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityChoice {
    #[default]
    Auto,
    Fixed(QualityTier),
}

impl QualityChoice {
    /// 按顺序尝试的候选档位列表
    pub fn candidates(&self) -> Vec<QualityTier> {
        match self {
            QualityChoice::Auto => QualityTier::FALLBACK_LADDER.to_vec(),
            QualityChoice::Fixed(tier) => vec![*tier],
        }
    }

    /// 解析交互菜单输入：空输入为自动，`1`/`2`/`3` 对应 540P/720P/1080P
    pub fn from_menu_input(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Some(QualityChoice::Auto);
        }
        input
            .parse::<usize>()
            .ok()
            .filter(|&idx| idx > 0 && idx <= QualityTier::MENU_ORDER.len())
            .map(|idx| QualityChoice::Fixed(QualityTier::MENU_ORDER[idx - 1]))
    }
}

impl fmt::Display for QualityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityChoice::Auto => f.write_str("自动 (1080P > 720P > 540P)"),
            QualityChoice::Fixed(tier) => write!(f, "{}", tier),
        }
    }
}

// 3. 失败类别
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    Validation,
    Extraction,
    Transport,
    MissingField,
    EmptyContent,
    Storage,
    Unexpected,
}

impl FailureKind {
    pub fn get_display_info(
        &self,
    ) -> (
        &'static ColoredString,
        fn(ColoredString) -> ColoredString,
        &'static str,
    ) {
        match self {
            FailureKind::Validation => (&symbols::WARN, |s| s.yellow(), "输入无效"),
            FailureKind::Extraction => (&symbols::ERROR, |s| s.red(), "页面中未找到视频ID"),
            FailureKind::Transport => (&symbols::ERROR, |s| s.red(), "网络请求失败"),
            FailureKind::MissingField => (&symbols::ERROR, |s| s.red(), "响应中缺少视频地址"),
            FailureKind::EmptyContent => (&symbols::WARN, |s| s.yellow(), "服务器返回空文件"),
            FailureKind::Storage => (&symbols::ERROR, |s| s.red(), "本地文件读写错误"),
            FailureKind::Unexpected => (&symbols::ERROR, |s| s.red(), "发生未预期的程序错误"),
        }
    }

    /// 元数据阶段遇到这些失败时，可以降级尝试下一个清晰度
    pub fn allows_fallback(&self) -> bool {
        matches!(self, FailureKind::Transport | FailureKind::MissingField)
    }
}

impl From<&AppError> for FailureKind {
    fn from(error: &AppError) -> Self {
        error.kind()
    }
}

// 4. 元数据接口的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub title: String,
    pub duration_secs: Option<f64>,
    pub play_urls: Vec<String>,
}

impl VideoMetadata {
    /// 从元数据接口返回的通用 JSON 文档中定位 `data.tvName`、
    /// `data.totalDuration` 与 `data.mp4PlayUrl`。
    pub fn from_document(document: &Value) -> AppResult<Self> {
        let data = document
            .get(fields::DATA)
            .filter(|d| d.is_object())
            .ok_or_else(|| AppError::MissingField(fields::DATA.to_string()))?;

        let title = data
            .get(fields::TITLE)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        // totalDuration 有时是数字，有时是字符串
        let duration_secs = data.get(fields::DURATION).and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        });

        let play_urls: Vec<String> = data
            .get(fields::PLAY_URLS)
            .and_then(Value::as_array)
            .map(|urls| {
                urls.iter()
                    .filter_map(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if play_urls.is_empty() {
            return Err(AppError::MissingField(format!(
                "{}.{}",
                fields::DATA,
                fields::PLAY_URLS
            )));
        }

        Ok(Self {
            title,
            duration_secs,
            play_urls,
        })
    }

    /// 中间地址：第一个候选播放地址
    pub fn intermediate_address(&self) -> AppResult<&str> {
        self.play_urls
            .first()
            .map(String::as_str)
            .ok_or_else(|| AppError::MissingField(format!("{}.{}", fields::DATA, fields::PLAY_URLS)))
    }
}

// 5. 单次下载成功后的结果
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub bytes: u64,
    pub content_type: Option<String>,
    pub quality: QualityTier,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compose_video_id_is_concatenation() {
        assert_eq!(compose_video_id("568221730", "_21"), "568221730_21");
        assert_eq!(compose_video_id("568221730", ""), "568221730");
        assert_eq!(compose_video_id("", "_1"), "_1");
        for tier in QualityTier::MENU_ORDER {
            let id = compose_video_id("42", tier.suffix());
            assert_eq!(id, format!("42{}", tier.suffix()));
        }
    }

    #[test]
    fn test_label_for_suffix() {
        assert_eq!(label_for_suffix(""), "540P");
        assert_eq!(label_for_suffix("_1"), "720P");
        assert_eq!(label_for_suffix("_21"), "1080P");
        // 未识别的后缀回退到 540P
        assert_eq!(label_for_suffix("_2"), "540P");
        assert_eq!(label_for_suffix("hd"), "540P");
    }

    #[test]
    fn test_suffix_round_trips_through_lookup() {
        for tier in QualityTier::MENU_ORDER {
            assert_eq!(QualityTier::from_suffix(tier.suffix()), tier);
        }
    }

    #[test]
    fn test_quality_choice_candidates() {
        assert_eq!(
            QualityChoice::Auto.candidates(),
            vec![QualityTier::Hd1080, QualityTier::Hd720, QualityTier::Sd540]
        );
        assert_eq!(
            QualityChoice::Fixed(QualityTier::Hd720).candidates(),
            vec![QualityTier::Hd720]
        );
    }

    #[test]
    fn test_quality_choice_from_menu_input() {
        assert_eq!(QualityChoice::from_menu_input(""), Some(QualityChoice::Auto));
        assert_eq!(QualityChoice::from_menu_input("  "), Some(QualityChoice::Auto));
        assert_eq!(
            QualityChoice::from_menu_input("1"),
            Some(QualityChoice::Fixed(QualityTier::Sd540))
        );
        assert_eq!(
            QualityChoice::from_menu_input("2"),
            Some(QualityChoice::Fixed(QualityTier::Hd720))
        );
        assert_eq!(
            QualityChoice::from_menu_input(" 3 "),
            Some(QualityChoice::Fixed(QualityTier::Hd1080))
        );
        assert_eq!(QualityChoice::from_menu_input("0"), None);
        assert_eq!(QualityChoice::from_menu_input("4"), None);
        assert_eq!(QualityChoice::from_menu_input("abc"), None);
    }

    #[test]
    fn test_metadata_from_document() {
        let doc = json!({
            "status": 200,
            "data": {
                "tvName": " 四川发现'白色石油' ",
                "totalDuration": 46.2,
                "mp4PlayUrl": ["https://data.vod.itc.cn/ip?k=abc", "https://data.vod.itc.cn/ip?k=def"]
            }
        });
        let meta = VideoMetadata::from_document(&doc).unwrap();
        assert_eq!(meta.title, "四川发现'白色石油'");
        assert_eq!(meta.duration_secs, Some(46.2));
        assert_eq!(meta.intermediate_address().unwrap(), "https://data.vod.itc.cn/ip?k=abc");
    }

    #[test]
    fn test_metadata_duration_as_string_and_missing_title() {
        let doc = json!({ "data": { "totalDuration": "120", "mp4PlayUrl": ["u"] } });
        let meta = VideoMetadata::from_document(&doc).unwrap();
        assert_eq!(meta.title, "");
        assert_eq!(meta.duration_secs, Some(120.0));
    }

    #[test]
    fn test_metadata_missing_play_urls_is_missing_field() {
        let empty = json!({ "data": { "tvName": "t", "mp4PlayUrl": [] } });
        let err = VideoMetadata::from_document(&empty).unwrap_err();
        assert_eq!(err.kind(), FailureKind::MissingField);

        let blank = json!({ "data": { "mp4PlayUrl": [""] } });
        assert!(matches!(
            VideoMetadata::from_document(&blank),
            Err(AppError::MissingField(_))
        ));

        let no_data = json!({ "status": 404 });
        assert!(matches!(
            VideoMetadata::from_document(&no_data),
            Err(AppError::MissingField(ref f)) if f == "data"
        ));
    }

    #[test]
    fn test_fallback_eligible_kinds() {
        assert!(FailureKind::Transport.allows_fallback());
        assert!(FailureKind::MissingField.allows_fallback());
        assert!(!FailureKind::Validation.allows_fallback());
        assert!(!FailureKind::Extraction.allows_fallback());
        assert!(!FailureKind::EmptyContent.allows_fallback());
    }
}
