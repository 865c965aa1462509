// src/models/api.rs

use serde::Deserialize;

// --- 调度接口 (中间地址) 响应结构体 ---
// 格式: {"servers":[{"url":"真实视频地址"}], ...}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DispatchResponse {
    #[serde(default)]
    pub servers: Option<Vec<ServerEntry>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerEntry {
    #[serde(default)]
    pub url: Option<String>,
}

impl DispatchResponse {
    /// 只取第一个服务器，不做负载均衡
    pub fn first_url(&self) -> Option<&str> {
        self.servers
            .as_deref()
            .and_then(<[ServerEntry]>::first)
            .and_then(|s| s.url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
