// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const MAX_FILENAME_BYTES: usize = 200;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_NAME: &str = concat!(clap::crate_name!(), ".log");
pub const LOG_FALLBACK_FILE_NAME: &str = "fallback.log";
/// 日志中只保留这些依赖库的警告及以上级别
pub const NOISY_LOG_TARGETS: [&str; 3] = ["hyper_util", "rustls", "reqwest::connect"];
pub const DEFAULT_SAVE_DIR: &str = ".";
pub const DEFAULT_FILENAME: &str = "video.mp4";
pub const DEFAULT_TITLE: &str = "video";
pub const VIDEO_EXTENSION: &str = "mp4";

/// 每次写入磁盘的块大小 (8 KiB)
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/18.1.1 Safari/605.1.15";
pub const ACCEPT_ANY: &str = "*/*";
pub const ACCEPT_ENCODING_IDENTITY: &str = "identity;q=1, *;q=0";
pub const ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9";
pub const RANGE_FROM_START: &str = "bytes=0-";

pub mod site {
    pub const BASE_URL: &str = "https://www.56.com/";
    pub const ORIGIN: &str = "https://www.56.com";
    pub const VIDEO_INFO_API: &str = "https://my.tv.sohu.com/play/videonew.do";
}

pub mod api {
    pub const VERSION: &str = "1";
    pub const SSL: &str = "1";

    pub mod params {
        pub const VID: &str = "vid";
        pub const UID: &str = "uid";
        pub const VER: &str = "ver";
        pub const SSL: &str = "ssl";
        pub const REFERER: &str = "referer";
        pub const TIMESTAMP: &str = "t";
    }

    pub mod fields {
        pub const DATA: &str = "data";
        pub const TITLE: &str = "tvName";
        pub const DURATION: &str = "totalDuration";
        pub const PLAY_URLS: &str = "mp4PlayUrl";
        pub const SERVERS: &str = "servers";
    }
}
