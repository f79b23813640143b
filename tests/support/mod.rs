// One-time server bootstrap shared by the integration tests in a binary.
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use matchmaker::{RequestVerifier, ServerConfig};

pub const SECRET: &[u8] = b"integration-test-secret";
pub const REQUEST_TTL_SECONDS: u64 = 30;

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Ensure the test server is running and return the shared base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // A dedicated OS thread keeps the server alive across `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));

                let config = ServerConfig {
                    addr,
                    match_size: 1,
                    ticket_ttl_seconds: 1800,
                    request_ttl_seconds: REQUEST_TTL_SECONDS,
                    sweep_interval: Duration::from_millis(50),
                    secret: SECRET.to_vec(),
                };
                matchmaker::run(listener, config)
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// Headers for a request signed at the current wall-clock second.
pub fn signed_headers(body: &str) -> [(&'static str, String); 2] {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs()
        .to_string();
    let signature = RequestVerifier::new(SECRET, REQUEST_TTL_SECONDS)
        .expect("valid key")
        .sign(&timestamp, body.as_bytes());

    [("X-Timestamp", timestamp), ("X-Signature", signature)]
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
