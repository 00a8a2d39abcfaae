use std::net::SocketAddr;
use std::time::Duration;

use postbox::{PostStore, Server, api};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn connect(addr: SocketAddr) -> TcpStream {
    for _ in 0..50 {
        if let Ok(stream) = TcpStream::connect(addr).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server never started listening on {addr}");
}

async fn roundtrip(addr: SocketAddr, raw: &str) -> String {
    let mut stream = connect(addr).await;
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn serves_over_tcp_and_shuts_down() {
    let addr = free_addr();
    let (stop, stopped) = oneshot::channel::<()>();

    let server = tokio::spawn(
        Server::bind(addr).serve_with_shutdown(api::router(PostStore::seeded()), async move {
            let _ = stopped.await;
        }),
    );

    let body = r#"{"title":"Over","content":"the wire"}"#;
    let created = roundtrip(
        addr,
        &format!(
            "POST /api/posts HTTP/1.1\r\nhost: localhost\r\ncontent-type: application/json\r\n\
             content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len(),
        ),
    )
    .await;
    assert!(created.starts_with("HTTP/1.1 201"), "{created}");
    assert!(created.contains(r#""id":3"#), "{created}");
    assert!(created.to_ascii_lowercase().contains("access-control-allow-origin: *"), "{created}");

    let found = roundtrip(
        addr,
        "GET /api/posts/search?title=over HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(found.starts_with("HTTP/1.1 200"), "{found}");
    assert!(found.contains("the wire"), "{found}");

    let unknown = roundtrip(
        addr,
        "BREW /api/posts HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(unknown.starts_with("HTTP/1.1 405"), "{unknown}");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
