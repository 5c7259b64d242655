//! Small helpers shared by the reqwest-backed adapters.

use reqwest::{Response, StatusCode, Url};

/// Failure to obtain a usable response body.
#[derive(Debug)]
pub(crate) enum BodyReadError {
    /// The body could not be read off the wire.
    Transport(reqwest::Error),
    /// Non-2xx answer, described as `status N` plus a body preview.
    Status(String),
}

/// Resolve `path` beneath `base`, treating `base` as a directory even when it
/// was configured without a trailing slash.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }
    base.join(path.trim_start_matches('/'))
}

/// Whitespace-collapsed, length-limited view of a response body for error
/// messages.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Return the body of a 2xx response, or describe the failed status.
pub(crate) async fn read_success_body(response: Response) -> Result<Vec<u8>, BodyReadError> {
    let status = response.status();
    let body = response.bytes().await.map_err(BodyReadError::Transport)?;
    if status.is_success() {
        Ok(body.to_vec())
    } else {
        Err(BodyReadError::Status(describe_status(status, body.as_ref())))
    }
}

fn describe_status(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}
