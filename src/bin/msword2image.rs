//! CLI binary for msword2image.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `ConversionRequest` + `ClientConfig` and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use msword2image::{
    convert, ClientConfig, ConversionArtifact, ConversionRequest, Credentials, ImageFormat, Input,
    Output, StatusPolicy, DEFAULT_ENDPOINT,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Local document to JPEG
  msword2image letter.docx -o letter.jpg

  # Remote document to PNG
  msword2image https://example.com/report.docx -o report.png --format png

  # Base64 on stdout (e.g. for a data: URI)
  msword2image letter.docx --format gif > letter.gif.b64

  # JSON result
  msword2image letter.docx -o letter.jpg --json

ENVIRONMENT VARIABLES:
  MSWORD2IMAGE_API_USER   API user issued by msword2image.com
  MSWORD2IMAGE_API_KEY    API key issued by msword2image.com
  MSWORD2IMAGE_ENDPOINT   Override the conversion endpoint
  RUST_LOG                Override the log filter (e.g. msword2image=debug)
"#;

/// Convert Word documents to images via msword2image.com.
#[derive(Parser, Debug)]
#[command(
    name = "msword2image",
    version,
    about = "Convert Word documents (local files or URLs) to JPEG, GIF or PNG images",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local Word document path or HTTP/HTTPS URL.
    input: String,

    /// Write the image to this file. Without it, base64 is printed to stdout.
    #[arg(short, long, env = "MSWORD2IMAGE_OUTPUT")]
    output: Option<PathBuf>,

    /// Output image format.
    #[arg(short, long, env = "MSWORD2IMAGE_FORMAT", value_enum, default_value = "jpeg")]
    format: FormatArg,

    /// API user issued by msword2image.com.
    #[arg(long, env = "MSWORD2IMAGE_API_USER", hide_env_values = true)]
    api_user: String,

    /// API key issued by msword2image.com.
    #[arg(long, env = "MSWORD2IMAGE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Conversion endpoint.
    #[arg(long, env = "MSWORD2IMAGE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "MSWORD2IMAGE_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// For URL inputs, save the response body even on an HTTP error status.
    #[arg(long)]
    ignore_url_fetch_status: bool,

    /// Ignore HTTP_PROXY / HTTPS_PROXY from the environment.
    #[arg(long)]
    no_proxy: bool,

    /// Output the result as JSON.
    #[arg(long)]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "MSWORD2IMAGE_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the result.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    #[value(alias = "jpg")]
    Jpeg,
    Gif,
    Png,
}

impl From<FormatArg> for ImageFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Jpeg => ImageFormat::Jpeg,
            FormatArg::Gif => ImageFormat::Gif,
            FormatArg::Png => ImageFormat::Png,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build request ────────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let format = ImageFormat::from(cli.format);
    let output = match cli.output {
        Some(ref path) => Output::file(path, format),
        None => Output::base64(format),
    };
    let request = ConversionRequest::new(
        Credentials::new(&cli.api_user, &cli.api_key),
        Input::detect(&cli.input),
        output,
    );

    // ── Run conversion ───────────────────────────────────────────────────
    let progress = show_progress.then(|| spinner(&cli.input));
    let result = convert(&request, &config).await;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }
    let artifact = result.context("Conversion failed")?;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&artifact).context("Failed to serialise output")?;
        println!("{json}");
        return Ok(());
    }

    match artifact {
        ConversionArtifact::File {
            path,
            bytes_written,
        } => {
            if !cli.quiet {
                eprintln!(
                    "{}  {}  {}",
                    green("✔"),
                    bold(&path.display().to_string()),
                    dim(&format!("{bytes_written} bytes, {format}")),
                );
            }
        }
        ConversionArtifact::Base64 { data } => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{data}").context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let policy = if cli.ignore_url_fetch_status {
        StatusPolicy::Ignore
    } else {
        StatusPolicy::Strict
    };

    ClientConfig::builder()
        .endpoint(&cli.endpoint)
        .timeout_secs(cli.timeout)
        .url_fetch_status(policy)
        .system_proxy(!cli.no_proxy)
        .build()
        .context("Invalid configuration")
}

fn spinner(input: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Converting");
    bar.set_message(input.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
