// tests/stream_downloader_test.rs

use mockito::Server;
use std::{fs, sync::Arc};
use tempfile::tempdir;
use v56_dl::{
    client::SiteClient,
    config::AppConfig,
    downloader::StreamDownloader,
    error::{AppError, AppResult},
    extractor::AddressResolver,
    models::FailureKind,
};

fn test_client(server_url: &str) -> SiteClient {
    let config = AppConfig {
        site_base_url: format!("{}/", server_url),
        ..AppConfig::default()
    };
    SiteClient::new(Arc::new(config)).expect("创建 HTTP 客户端失败")
}

#[tokio::test]
async fn test_address_resolver_returns_first_server() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let server_url = server.url();

    let dispatch = server
        .mock("GET", "/ip")
        .match_query(mockito::Matcher::Any)
        .match_header("accept-encoding", "identity;q=1, *;q=0")
        .match_header("referer", format!("{}/", server_url).as_str())
        .with_status(200)
        .with_body(r#"{"servers":[{"url":"https://a.vod/1.mp4"},{"url":"https://b.vod/2.mp4"}]}"#)
        .create_async()
        .await;

    let client = test_client(&server_url);
    let url = AddressResolver::new(&client)
        .resolve(&format!("{}/ip?k=abc", server_url))
        .await?;

    dispatch.assert_async().await;
    assert_eq!(url, "https://a.vod/1.mp4");
    Ok(())
}

#[tokio::test]
async fn test_address_resolver_empty_servers_is_missing_field() {
    let mut server = Server::new_async().await;
    let server_url = server.url();

    let _dispatch = server
        .mock("GET", "/ip")
        .with_status(200)
        .with_body(r#"{"servers":[]}"#)
        .create_async()
        .await;

    let client = test_client(&server_url);
    let result = AddressResolver::new(&client)
        .resolve(&format!("{}/ip", server_url))
        .await;

    match result {
        Err(AppError::MissingField(field)) => assert_eq!(field, "servers"),
        other => panic!("期望 MissingField 错误，实际: {:?}", other),
    }
}

#[tokio::test]
async fn test_address_resolver_missing_servers_key() {
    let mut server = Server::new_async().await;
    let server_url = server.url();

    let _dispatch = server
        .mock("GET", "/ip")
        .with_status(200)
        .with_body(r#"{"allot":"data.vod.itc.cn"}"#)
        .create_async()
        .await;

    let client = test_client(&server_url);
    let err = AddressResolver::new(&client)
        .resolve(&format!("{}/ip", server_url))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::MissingField);
}

#[tokio::test]
async fn test_address_resolver_null_url_is_missing_field() {
    let mut server = Server::new_async().await;
    let server_url = server.url();

    let _dispatch = server
        .mock("GET", "/ip")
        .with_status(200)
        .with_body(r#"{"servers":[{"url":null},{"url":"https://b.vod/2.mp4"}]}"#)
        .create_async()
        .await;

    let client = test_client(&server_url);
    let result = AddressResolver::new(&client)
        .resolve(&format!("{}/ip", server_url))
        .await;

    match result {
        Err(AppError::MissingField(field)) => assert_eq!(field, "servers"),
        other => panic!("期望 MissingField 错误，实际: {:?}", other),
    }
}

#[tokio::test]
async fn test_zero_content_length_fails_without_creating_file() {
    let mut server = Server::new_async().await;
    let server_url = server.url();
    let out_dir = tempdir().unwrap();
    let save_path = out_dir.path().join("empty_540P.mp4");

    let media = server
        .mock("GET", "/empty.mp4")
        .match_header("range", "bytes=0-")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("")
        .create_async()
        .await;

    let client = test_client(&server_url);
    let err = StreamDownloader::new(&client)
        .download(&format!("{}/empty.mp4", server_url), &save_path)
        .await
        .unwrap_err();

    media.assert_async().await;
    assert!(matches!(err, AppError::EmptyContent { .. }));
    assert_eq!(err.kind(), FailureKind::EmptyContent);
    assert!(!save_path.exists(), "长度为0时不应留下文件");
}

#[tokio::test]
async fn test_http_error_is_transport_failure() {
    let mut server = Server::new_async().await;
    let server_url = server.url();
    let out_dir = tempdir().unwrap();
    let save_path = out_dir.path().join("gone.mp4");

    let _media = server
        .mock("GET", "/gone.mp4")
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let client = test_client(&server_url);
    let err = StreamDownloader::new(&client)
        .download(&format!("{}/gone.mp4", server_url), &save_path)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(!save_path.exists());
}

#[tokio::test]
async fn test_download_spanning_many_chunks() -> AppResult<()> {
    let mut server = Server::new_async().await;
    let server_url = server.url();
    let out_dir = tempdir()?;
    let save_path = out_dir.path().join("nested").join("big_720P.mp4");

    // 大于单个写入块，覆盖分块写入
    let body: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
    let _media = server
        .mock("GET", "/big.mp4")
        .with_status(206)
        .with_header("content-type", "video/mp4")
        .with_body(&body)
        .create_async()
        .await;

    let client = test_client(&server_url);
    let outcome = StreamDownloader::new(&client)
        .download(&format!("{}/big.mp4", server_url), &save_path)
        .await?;

    assert_eq!(outcome.bytes, body.len() as u64);
    assert_eq!(outcome.path, save_path);
    assert_eq!(fs::read(&save_path)?, body);
    Ok(())
}

#[tokio::test]
async fn test_truncated_body_keeps_partial_file() {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    const DECLARED: usize = 100_000;
    const SENT: usize = 20_000;

    // 声明 100000 字节，只发送 20000 字节后关闭连接
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: video/mp4\r\nContent-Length: {}\r\n\r\n",
            DECLARED
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&vec![7u8; SENT]).await.unwrap();
        socket.flush().await.unwrap();
        socket.shutdown().await.unwrap();
    });

    let server_url = format!("http://{}", addr);
    let out_dir = tempdir().unwrap();
    let save_path = out_dir.path().join("cut_1080P.mp4");

    let client = test_client(&server_url);
    let err = StreamDownloader::new(&client)
        .download(&format!("{}/cut.mp4", server_url), &save_path)
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(save_path.exists(), "失败时已写入的部分文件应保留");
    let written = fs::read(&save_path).unwrap();
    assert_eq!(written.len(), SENT);
    assert!(written.iter().all(|&b| b == 7));
}
