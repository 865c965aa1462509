// src/utils.rs

use crate::{constants, models::QualityTier};
use chrono::Utc;

/// 文件名中不允许出现的字符
const FORBIDDEN_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// 把标题中的每个非法字符逐个替换为 `_`，不合并、不删减。
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if FORBIDDEN_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    if sanitized.is_empty() {
        return constants::DEFAULT_TITLE.to_string();
    }
    safe_truncate_utf8(&sanitized, constants::MAX_FILENAME_BYTES).to_string()
}

/// 生成 `{标题}_{清晰度}.mp4` 形式的输出文件名
pub fn build_output_filename(title: &str, quality: QualityTier) -> String {
    format!(
        "{}_{}.{}",
        sanitize_filename(title),
        quality.label(),
        constants::VIDEO_EXTENSION
    )
}

fn safe_truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes { return s; }
    let mut i = max_bytes;
    while i > 0 && !s.is_char_boundary(i) { i -= 1; }
    &s[..i]
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

/// 毫秒级时间戳，用作防缓存参数 `t`
pub fn timestamp_millis() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// 由当前时间派生的 `uid` 参数。服务端并不把它当作身份凭证，只要求存在。
pub fn session_uid() -> String {
    let now = Utc::now();
    format!(
        "{}{:07}",
        now.timestamp_millis(),
        now.timestamp_subsec_nanos() % 10_000_000
    )
}

pub fn format_duration(total_secs: f64) -> String {
    let total = total_secs.max(0.0).round() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / 1024.0 / 1024.0)
}
