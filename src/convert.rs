//! Conversion entry points.
//!
//! Two surfaces share one implementation:
//!
//! * [`convert`] / [`convert_sync`] take an immutable [`ConversionRequest`]
//!   and return a [`ConversionArtifact`] or a typed error.
//! * [`Converter`] keeps the classic `from_*` / `to_*` call sequence and the
//!   boolean success contract of the msword2image client libraries.

use crate::config::ClientConfig;
use crate::endpoint::build_url;
use crate::error::MsWordToImageError;
use crate::model::{
    check_sanity, check_supported, ConversionArtifact, ConversionRequest, Credentials,
    ImageFormat, Input, Output, OutputKind,
};
use crate::transport;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, info};

/// Convert a Word document to an image.
///
/// # Errors
/// - [`MsWordToImageError::FileNotFound`] — file input missing (no request is sent)
/// - [`MsWordToImageError::TransportFailure`] — the service answered with an
///   error status
/// - [`MsWordToImageError::Timeout`] / [`MsWordToImageError::RequestFailed`]
/// - [`MsWordToImageError::OutputWriteFailed`] — the image could not be saved
///
/// # Example
/// ```rust,no_run
/// use msword2image::{convert, ClientConfig, ConversionRequest, Credentials, ImageFormat, Input, Output};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = ConversionRequest::new(
///     Credentials::new("user", "key"),
///     Input::file("report.docx"),
///     Output::file("report.png", ImageFormat::Png),
/// );
/// let artifact = convert(&request, &ClientConfig::default()).await?;
/// println!("{artifact:?}");
/// # Ok(())
/// # }
/// ```
pub async fn convert(
    request: &ConversionRequest,
    config: &ClientConfig,
) -> Result<ConversionArtifact, MsWordToImageError> {
    check_supported(request.input.kind(), request.output.kind())?;

    let start = Instant::now();
    info!(
        "Converting {:?} '{}' to {} ({:?})",
        request.input.kind(),
        request.input.value(),
        request.output.format(),
        request.output.kind()
    );

    let client = transport::build_client(config)?;
    let artifact = match &request.output {
        Output::File { path, .. } => {
            let bytes_written = convert_into(&client, request, config, path).await?;
            ConversionArtifact::File {
                path: path.clone(),
                bytes_written,
            }
        }
        Output::Base64 { format } => {
            let data = convert_to_base64(&client, request, config, *format).await?;
            ConversionArtifact::Base64 { data }
        }
    };

    info!("Conversion complete in {}ms", start.elapsed().as_millis());
    Ok(artifact)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally, so it must not be called
/// from within an async context.
pub fn convert_sync(
    request: &ConversionRequest,
    config: &ClientConfig,
) -> Result<ConversionArtifact, MsWordToImageError> {
    block_on(convert(request, config))
}

fn block_on<T>(
    fut: impl Future<Output = Result<T, MsWordToImageError>>,
) -> Result<T, MsWordToImageError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| MsWordToImageError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(fut)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Run the transport for the request's input kind, writing the image to `dest`.
async fn convert_into(
    client: &Client,
    request: &ConversionRequest,
    config: &ClientConfig,
    dest: &Path,
) -> Result<u64, MsWordToImageError> {
    let format = request.output.format();
    match &request.input {
        Input::File(source) => {
            let url = build_url(&config.endpoint, &request.credentials, format, &[])?;
            transport::upload_file(client, url, source, dest, config.timeout_secs).await
        }
        Input::Url(source) => {
            let url = build_url(
                &config.endpoint,
                &request.credentials,
                format,
                &[("url", source.as_str())],
            )?;
            transport::fetch_url(client, url, dest, config.url_fetch_status, config.timeout_secs)
                .await
        }
    }
}

/// Convert into a scratch file and return its contents base64-encoded.
///
/// The scratch directory is removed when `scratch` drops, on every exit path.
async fn convert_to_base64(
    client: &Client,
    request: &ConversionRequest,
    config: &ClientConfig,
    format: ImageFormat,
) -> Result<String, MsWordToImageError> {
    let scratch = TempDir::new().map_err(MsWordToImageError::TempFile)?;
    let dest = scratch.path().join(format!("converted.{}", format.extension()));

    convert_into(client, request, config, &dest).await?;

    let bytes = tokio::fs::read(&dest)
        .await
        .map_err(MsWordToImageError::TempFile)?;
    let encoded = STANDARD.encode(&bytes);
    debug!("Encoded {} bytes → {} bytes base64", bytes.len(), encoded.len());
    Ok(encoded)
}

// ── Stateful converter ───────────────────────────────────────────────────

/// Call-sequence API: pick a source, then pick a destination, which runs
/// the conversion.
///
/// ```rust,no_run
/// use msword2image::{Converter, ImageFormat};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut converter = Converter::new("user", "key");
/// converter.from_url("http://example.com/report.docx");
/// let ok = converter.to_file_with_format("report.gif", ImageFormat::Gif).await?;
/// assert!(ok);
/// # Ok(())
/// # }
/// ```
///
/// Mutators take `&mut self`, so one instance cannot run two conversions at
/// once. Reconfigure and reuse it sequentially.
///
/// Every `to_*` method has a blocking `*_sync` twin for callers without a
/// runtime. Like [`convert_sync`], those must not be called from async code.
#[derive(Debug, Clone)]
pub struct Converter {
    credentials: Credentials,
    config: ClientConfig,
    input: Option<Input>,
    output: Option<Output>,
}

impl Converter {
    /// Converter talking to the public msword2image.com endpoint.
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_config(api_user, api_key, ClientConfig::default())
    }

    pub fn with_config(
        api_user: impl Into<String>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Self {
        Self {
            credentials: Credentials::new(api_user, api_key),
            config,
            input: None,
            output: None,
        }
    }

    /// Convert from a local Word document. Existence is checked at
    /// conversion time.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_file(&mut self, path: impl Into<PathBuf>) {
        self.input = Some(Input::File(path.into()));
    }

    /// Convert from a remote Word document fetched by the service.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_url(&mut self, url: impl Into<String>) {
        self.input = Some(Input::Url(url.into()));
    }

    /// Convert to a JPEG file. See [`Converter::to_file_with_format`].
    pub async fn to_file(&mut self, path: impl Into<PathBuf>) -> Result<bool, MsWordToImageError> {
        self.to_file_with_format(path, ImageFormat::Jpeg).await
    }

    /// Convert to an image file at `path`.
    ///
    /// Returns `Ok(false)` when the service answers with an error status;
    /// every other failure is an `Err`.
    pub async fn to_file_with_format(
        &mut self,
        path: impl Into<PathBuf>,
        format: ImageFormat,
    ) -> Result<bool, MsWordToImageError> {
        self.output = Some(Output::file(path, format));
        self.convert_to_file().await
    }

    /// Convert to a base64-encoded JPEG.
    pub async fn to_base64_encoded_string(&mut self) -> Result<String, MsWordToImageError> {
        self.to_base64_encoded_string_with_format(ImageFormat::Jpeg)
            .await
    }

    pub async fn to_base64_encoded_string_with_format(
        &mut self,
        format: ImageFormat,
    ) -> Result<String, MsWordToImageError> {
        self.output = Some(Output::base64(format));
        self.convert_to_base64_string().await
    }

    /// Blocking [`Converter::to_file`].
    pub fn to_file_sync(&mut self, path: impl Into<PathBuf>) -> Result<bool, MsWordToImageError> {
        block_on(self.to_file(path))
    }

    /// Blocking [`Converter::to_file_with_format`].
    pub fn to_file_with_format_sync(
        &mut self,
        path: impl Into<PathBuf>,
        format: ImageFormat,
    ) -> Result<bool, MsWordToImageError> {
        block_on(self.to_file_with_format(path, format))
    }

    pub fn to_base64_encoded_string_sync(&mut self) -> Result<String, MsWordToImageError> {
        block_on(self.to_base64_encoded_string())
    }

    pub fn to_base64_encoded_string_with_format_sync(
        &mut self,
        format: ImageFormat,
    ) -> Result<String, MsWordToImageError> {
        block_on(self.to_base64_encoded_string_with_format(format))
    }

    /// Run the conversion for the current input and a file output.
    pub async fn convert_to_file(&self) -> Result<bool, MsWordToImageError> {
        let request = self.request_for(OutputKind::File)?;
        match convert(&request, &self.config).await {
            Ok(_) => Ok(true),
            Err(MsWordToImageError::TransportFailure { status, target }) => {
                debug!("HTTP {} from {}; reporting failure", status, target);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Run the conversion for the current input and a base64 output.
    pub async fn convert_to_base64_string(&self) -> Result<String, MsWordToImageError> {
        let request = self.request_for(OutputKind::Base64String)?;
        let artifact = convert(&request, &self.config).await?;
        artifact
            .into_base64()
            .ok_or_else(|| MsWordToImageError::Internal("expected a base64 artifact".into()))
    }

    pub fn input(&self) -> Option<&Input> {
        self.input.as_ref()
    }

    pub fn output(&self) -> Option<&Output> {
        self.output.as_ref()
    }

    /// Like [`Converter::request`], but also require a specific output kind.
    fn request_for(&self, kind: OutputKind) -> Result<ConversionRequest, MsWordToImageError> {
        let request = self.request()?;
        if request.output.kind() != kind {
            return Err(MsWordToImageError::InvalidConfiguration(format!(
                "output is {:?}, expected {:?}",
                request.output.kind(),
                kind
            )));
        }
        Ok(request)
    }

    /// Snapshot the current state as a request, after the sanity check.
    fn request(&self) -> Result<ConversionRequest, MsWordToImageError> {
        let (input, output) = check_sanity(self.input.as_ref(), self.output.as_ref())?;
        Ok(ConversionRequest::new(
            self.credentials.clone(),
            input.clone(),
            output.clone(),
        ))
    }
}
