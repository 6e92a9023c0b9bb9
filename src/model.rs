//! Conversion descriptors: where the Word document comes from, where the
//! image goes, and which pairings the service supports.
//!
//! A [`ConversionRequest`] bundles credentials, [`Input`] and [`Output`] into
//! one immutable value, so "both input and output are set" is enforced by the
//! type system for callers of [`crate::convert()`]. The stateful
//! [`crate::Converter`] builds one of these per call.

use crate::error::MsWordToImageError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ── Input ────────────────────────────────────────────────────────────────

/// Kind of conversion source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    File,
    Url,
}

/// Conversion source: a local Word document or a URL the service fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Local file, uploaded as multipart form data.
    File(PathBuf),
    /// Remote document, passed to the service as the `url` parameter.
    Url(String),
}

impl Input {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Input::Url(url.into())
    }

    /// Classify a free-form argument: `http://` and `https://` prefixes are
    /// URLs, everything else is a local path.
    pub fn detect(arg: &str) -> Self {
        if is_url(arg) {
            Input::Url(arg.to_string())
        } else {
            Input::File(PathBuf::from(arg))
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            Input::File(_) => InputKind::File,
            Input::Url(_) => InputKind::Url,
        }
    }

    /// The path or URL as text.
    pub fn value(&self) -> String {
        match self {
            Input::File(p) => p.display().to_string(),
            Input::Url(u) => u.clone(),
        }
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

// ── Output ───────────────────────────────────────────────────────────────

/// Kind of conversion destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    File,
    Base64String,
}

/// Image format requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Gif,
    Png,
}

impl ImageFormat {
    /// Canonical name sent as the `format` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Png => "PNG",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Png => "png",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = MsWordToImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JPEG" | "JPG" => Ok(ImageFormat::Jpeg),
            "GIF" => Ok(ImageFormat::Gif),
            "PNG" => Ok(ImageFormat::Png),
            other => Err(MsWordToImageError::InvalidConfiguration(format!(
                "unsupported image format '{other}' (expected JPEG, GIF or PNG)"
            ))),
        }
    }
}

/// Conversion destination together with the requested image format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Save the image at `path`, overwriting any existing file.
    File { path: PathBuf, format: ImageFormat },
    /// Return the image as a base64 string.
    Base64 { format: ImageFormat },
}

impl Output {
    pub fn file(path: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Output::File {
            path: path.into(),
            format,
        }
    }

    pub fn base64(format: ImageFormat) -> Self {
        Output::Base64 { format }
    }

    pub fn kind(&self) -> OutputKind {
        match self {
            Output::File { .. } => OutputKind::File,
            Output::Base64 { .. } => OutputKind::Base64String,
        }
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            Output::File { format, .. } | Output::Base64 { format } => *format,
        }
    }

    /// Destination path; `None` for base64 output.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Output::File { path, .. } => Some(path),
            Output::Base64 { .. } => None,
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────

/// Supported (input, output) pairings.
///
/// Every arm is spelled out so adding a new kind fails to compile until it
/// is classified here.
pub fn is_supported(input: InputKind, output: OutputKind) -> bool {
    match (input, output) {
        (InputKind::File, OutputKind::File) => true,
        (InputKind::File, OutputKind::Base64String) => true,
        (InputKind::Url, OutputKind::File) => true,
        (InputKind::Url, OutputKind::Base64String) => true,
    }
}

/// Conversion sanity check: both descriptors present and a supported pairing.
pub fn check_sanity<'a>(
    input: Option<&'a Input>,
    output: Option<&'a Output>,
) -> Result<(&'a Input, &'a Output), MsWordToImageError> {
    let input = input.ok_or_else(|| {
        MsWordToImageError::InvalidConfiguration("input was not set".into())
    })?;
    let output = output.ok_or_else(|| {
        MsWordToImageError::InvalidConfiguration("output was not set".into())
    })?;
    check_supported(input.kind(), output.kind())?;
    Ok((input, output))
}

/// Fail with `InvalidConfiguration` unless the pairing is in the table.
pub fn check_supported(input: InputKind, output: OutputKind) -> Result<(), MsWordToImageError> {
    if is_supported(input, output) {
        Ok(())
    } else {
        Err(MsWordToImageError::InvalidConfiguration(format!(
            "conversion from {input:?} to {output:?} is not supported"
        )))
    }
}

// ── Request ──────────────────────────────────────────────────────────────

/// API credentials issued by msword2image.com.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_user: String,
    api_key: String,
}

impl Credentials {
    pub fn new(api_user: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_key: api_key.into(),
        }
    }

    pub fn api_user(&self) -> &str {
        &self.api_user
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_user", &self.api_user)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Everything one conversion needs, fixed for the duration of the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub credentials: Credentials,
    pub input: Input,
    pub output: Output,
}

impl ConversionRequest {
    pub fn new(credentials: Credentials, input: Input, output: Output) -> Self {
        Self {
            credentials,
            input,
            output,
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionArtifact {
    /// Image written to `path`.
    File { path: PathBuf, bytes_written: u64 },
    /// Image returned inline, base64-encoded.
    Base64 { data: String },
}

impl ConversionArtifact {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConversionArtifact::File { path, .. } => Some(path),
            ConversionArtifact::Base64 { .. } => None,
        }
    }

    pub fn as_base64(&self) -> Option<&str> {
        match self {
            ConversionArtifact::Base64 { data } => Some(data),
            ConversionArtifact::File { .. } => None,
        }
    }

    pub fn into_base64(self) -> Option<String> {
        match self {
            ConversionArtifact::Base64 { data } => Some(data),
            ConversionArtifact::File { .. } => None,
        }
    }
}
