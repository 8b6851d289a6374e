/*!
 * Common test utilities for the festfeed test suite
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Two program items and one hands-on culture note
pub const FESTIVAL_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<festival>
    <program>
        <item number="1" performer="Golden Lion Troupe">
            <genre xml:lang="zh-Hans">舞狮</genre>
            <genre xml:lang="en">Lion Dance</genre>
            <title xml:lang="zh-Hans">醒狮迎春</title>
            <title xml:lang="en">Awakening Lion</title>
            <bio xml:lang="en">Founded in 1998 by three brothers.</bio>
        </item>
        <item number="2" performer="Rivers & Mountains Ensemble">
            <title xml:lang="zh-Hans">高山流水</title>
            <title xml:lang="en">High Mountains, Flowing Water</title>
        </item>
    </program>
    <cultureNotes>
        <note category="Hands-On Workshop">
            <title xml:lang="zh-Hans">剪纸</title>
            <title xml:lang="en">Paper Cutting</title>
            <desc xml:lang="zh-Hans">亲手剪一幅窗花。</desc>
            <desc xml:lang="en">Cut your own window flower.</desc>
        </note>
    </cultureNotes>
</festival>"#;

/// Older feed shape: `lang` attributes, child-text fields and a `culture` section
pub const LEGACY_FEED: &str = r#"<festival>
    <program>
        <item>
            <performer>Erhu Duo</performer>
            <title lang="en">Horse Racing</title>
        </item>
    </program>
    <culture>
        <item>
            <category>Culture 101</category>
            <image>https://img.test/kite.jpg</image>
            <title lang="en">Kites</title>
        </item>
    </culture>
</festival>"#;

/// Text that stays broken after ampersand repair
pub const MALFORMED_FEED: &str = "<festival><program><item></program></festival>";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Requests seen by a `serve_once` server, raw header block included
pub type SeenRequests = Arc<Mutex<Vec<String>>>;

/// Serve a single HTTP response on a random local port.
///
/// Returns the base URL and the list the raw request is recorded into.
pub async fn serve_once(status: u16, body: &'static str) -> Result<(String, SeenRequests)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let seen: SeenRequests = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buffer = vec![0u8; 8192];
            let read = socket.read(&mut buffer).await.unwrap_or(0);
            recorded.lock().push(String::from_utf8_lossy(&buffer[..read]).to_string());

            let response = format!(
                "HTTP/1.1 {} Test\r\ncontent-type: application/xml; charset=utf-8\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Ok((format!("http://{}/festivalData", address), seen))
}

/// Initialise test logging once; later calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
