//! # msword2image
//!
//! Convert Microsoft Word documents to JPEG, GIF or PNG images through the
//! [msword2image.com](http://msword2image.com) conversion service.
//!
//! The service does all of the rendering. This crate validates what you ask
//! for, builds the request, moves bytes over HTTP, and hands the image back
//! as a file or a base64 string.
//!
//! ## Conversion Paths
//!
//! ```text
//! local .docx ──POST multipart──▶ ┐
//!                                  ├─ /convert ──▶ image ──▶ file | base64
//! remote URL  ──GET ?url=…─────▶ ┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msword2image::{Converter, ImageFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut converter = Converter::new("my-user", "my-key");
//!     converter.from_file("letter.docx");
//!     let saved = converter.to_file_with_format("letter.png", ImageFormat::Png).await?;
//!     assert!(saved);
//!
//!     converter.from_url("http://example.com/invoice.docx");
//!     let b64 = converter.to_base64_encoded_string().await?;
//!     println!("data:image/jpeg;base64,{b64}");
//!     Ok(())
//! }
//! ```
//!
//! For a single immutable call with typed errors instead of `bool`, build a
//! [`ConversionRequest`] and pass it to [`convert()`] (or [`convert_sync`]
//! outside an async runtime).
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `msword2image` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod endpoint;
pub mod error;
pub mod model;
pub mod transport;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder, StatusPolicy, DEFAULT_ENDPOINT};
pub use convert::{convert, convert_sync, Converter};
pub use error::MsWordToImageError;
pub use model::{
    ConversionArtifact, ConversionRequest, Credentials, ImageFormat, Input, InputKind, Output,
    OutputKind,
};
