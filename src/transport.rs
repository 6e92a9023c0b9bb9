//! HTTP transport: the two ways the service performs a conversion.
//!
//! ```text
//! File → POST  endpoint?apiUser&apiKey&format        multipart file_contents
//! URL  → GET   endpoint?apiUser&apiKey&format&url    (service fetches the doc)
//! ```
//!
//! Both paths stream the response body into a scratch file next to the
//! destination and persist it over `dest` once the body is complete. A failed
//! or truncated transfer never replaces an existing image, and the scratch
//! file is removed on every exit path.

use crate::config::{ClientConfig, StatusPolicy};
use crate::error::MsWordToImageError;
use crate::endpoint::redact;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response, Url};
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Multipart field the service reads the Word document from.
pub const FILE_FIELD: &str = "file_contents";

/// Build an HTTP client honouring the configured timeout and user agent.
pub fn build_client(config: &ClientConfig) -> Result<Client, MsWordToImageError> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone());
    if !config.system_proxy {
        builder = builder.no_proxy();
    }
    builder
        .build()
        .map_err(|e| MsWordToImageError::Internal(format!("failed to build HTTP client: {e}")))
}

/// Upload a local Word document and save the converted image at `dest`.
///
/// The input is checked before anything is sent: a missing file fails with
/// [`MsWordToImageError::FileNotFound`] without touching the network. A
/// non-success status fails with [`MsWordToImageError::TransportFailure`]
/// and leaves `dest` as it was.
///
/// Returns the number of bytes written.
pub async fn upload_file(
    client: &Client,
    url: Url,
    source: &Path,
    dest: &Path,
    timeout_secs: u64,
) -> Result<u64, MsWordToImageError> {
    let (file, len) = open_input(source).await?;
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let target = redact(&url);
    debug!("Uploading {} ({} bytes) to {}", source.display(), len, target);

    let part = Part::stream_with_length(Body::from(file), len).file_name(file_name);
    let form = Form::new().part(FILE_FIELD, part);
    let response = client
        .post(url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| request_error(e, &target, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MsWordToImageError::TransportFailure {
            status: status.as_u16(),
            target,
        });
    }

    write_body(response, dest, &target, timeout_secs).await
}

/// Ask the service to fetch and convert a remote document, saving the image
/// at `dest`.
///
/// With [`StatusPolicy::Ignore`] the body is saved whatever the status.
pub async fn fetch_url(
    client: &Client,
    url: Url,
    dest: &Path,
    policy: StatusPolicy,
    timeout_secs: u64,
) -> Result<u64, MsWordToImageError> {
    let target = redact(&url);
    debug!("Requesting URL conversion from {}", target);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| request_error(e, &target, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        match policy {
            StatusPolicy::Strict => {
                return Err(MsWordToImageError::TransportFailure {
                    status: status.as_u16(),
                    target,
                });
            }
            StatusPolicy::Ignore => {
                warn!("Ignoring HTTP {} from {}; saving body as-is", status, target);
            }
        }
    }

    write_body(response, dest, &target, timeout_secs).await
}

/// Open the input document for streaming, validating existence and
/// readability. Returns the file and its length.
async fn open_input(path: &Path) -> Result<(tokio::fs::File, u64), MsWordToImageError> {
    let len = match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(MsWordToImageError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        _ => {
            return Err(MsWordToImageError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let file = tokio::fs::File::open(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            MsWordToImageError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else {
            MsWordToImageError::InputReadFailed {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok((file, len))
}

/// Stream the response body into a scratch file beside `dest`, then persist
/// it over `dest`.
async fn write_body(
    response: Response,
    dest: &Path,
    target: &str,
    timeout_secs: u64,
) -> Result<u64, MsWordToImageError> {
    let write_err = |e| MsWordToImageError::OutputWriteFailed {
        path: dest.to_path_buf(),
        source: e,
    };

    let dir = scratch_dir(dest)?;
    tokio::fs::create_dir_all(dir).await.map_err(write_err)?;

    // Dropping `scratch` before `persist` deletes the file.
    let scratch = NamedTempFile::new_in(dir).map_err(write_err)?;
    let file = scratch.as_file().try_clone().map_err(write_err)?;
    let written = stream_to(
        response,
        tokio::fs::File::from_std(file),
        dest,
        target,
        timeout_secs,
    )
    .await?;

    scratch.persist(dest).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", written, dest.display());
    Ok(written)
}

async fn stream_to(
    response: Response,
    mut file: tokio::fs::File,
    dest: &Path,
    target: &str,
    timeout_secs: u64,
) -> Result<u64, MsWordToImageError> {
    let write_err = |e| MsWordToImageError::OutputWriteFailed {
        path: dest.to_path_buf(),
        source: e,
    };

    let mut body = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| request_error(e, target, timeout_secs))?;
        file.write_all(&chunk).await.map_err(write_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(write_err)?;
    Ok(written)
}

/// Directory the scratch file is created in: the destination's parent, or
/// the working directory for a bare file name.
fn scratch_dir(dest: &Path) -> Result<&Path, MsWordToImageError> {
    if dest.file_name().is_none() {
        return Err(MsWordToImageError::InvalidConfiguration(format!(
            "output path '{}' has no file name",
            dest.display()
        )));
    }
    Ok(dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new(".")))
}

fn request_error(e: reqwest::Error, target: &str, timeout_secs: u64) -> MsWordToImageError {
    if e.is_timeout() {
        MsWordToImageError::Timeout {
            target: target.to_string(),
            secs: timeout_secs,
        }
    } else {
        MsWordToImageError::RequestFailed {
            target: target.to_string(),
            // reqwest errors embed the full URL, credentials included.
            source: e.without_url(),
        }
    }
}
