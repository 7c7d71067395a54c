//! CLI binary for md2deck.
//!
//! A thin shim over the library crate that maps CLI flags to tool
//! parameters and writes the returned artifact to disk.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2deck::{ClientConfig, SlidevTool, ToolMessage, ToolParameters};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Export a deck to PPTX (filename suggested by the service)
  md2deck slides.md --service-url http://slides.internal:3000/slidev/generate

  # Explicit output path and format
  md2deck slides.md -o quarterly.pdf --format pdf

  # Read markdown from stdin
  cat slides.md | md2deck - --title "Quarterly Review"

  # Export options
  md2deck slides.md --toc --dark-mode --with-clicks

  # Print the raw message envelope instead of writing a file
  md2deck slides.md --json > message.json

ENVIRONMENT VARIABLES:
  SLIDEV_SERVICE_URL       Export service URL (overridden by --service-url)
  MD2DECK_OUTPUT           Default output path (as --output)
  MD2DECK_FORMAT           Default artifact format (as --format)
  MD2DECK_TIMEOUT          Total request timeout in seconds (as --timeout)
  MD2DECK_CONNECT_TIMEOUT  Connect timeout in seconds (as --connect-timeout)

SETUP:
  1. Run a Slidev export service and note its generate endpoint.
  2. export SLIDEV_SERVICE_URL=http://slides.internal:3000/slidev/generate
  3. md2deck slides.md
"#;

/// Export Markdown files to presentation decks via a Slidev service.
#[derive(Parser, Debug)]
#[command(
    name = "md2deck",
    version,
    about = "Export Markdown to presentation decks via a remote Slidev service",
    long_about = "Export Markdown documents to PPTX, PDF, or processed Markdown using a remote \
Slidev rendering service. The service does all the rendering; this tool validates inputs, \
drives the export call, and writes the returned artifact to disk.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to export, or '-' for stdin.
    input: PathBuf,

    /// Slidev export service URL.
    #[arg(long, env = "SLIDEV_SERVICE_URL")]
    service_url: String,

    /// Write the artifact here instead of the service-suggested filename.
    #[arg(short, long, env = "MD2DECK_OUTPUT")]
    output: Option<PathBuf>,

    /// Artifact format. Service default (pptx) when omitted.
    #[arg(long, env = "MD2DECK_FORMAT", value_enum)]
    format: Option<FormatArg>,

    /// Deck title, kept as metadata (not sent to the service).
    #[arg(long)]
    title: Option<String>,

    /// Include a generated table-of-contents slide.
    #[arg(long)]
    toc: bool,

    /// Render slides without their background layer.
    #[arg(long)]
    omit_background: bool,

    /// Emit one page per click-state instead of one per slide.
    #[arg(long)]
    with_clicks: bool,

    /// Render with the dark colour scheme.
    #[arg(long)]
    dark_mode: bool,

    /// TCP/TLS connect timeout in seconds.
    #[arg(long, env = "MD2DECK_CONNECT_TIMEOUT", default_value_t = 30)]
    connect_timeout: u64,

    /// Total request timeout in seconds.
    #[arg(long, env = "MD2DECK_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Print the JSON message envelope to stdout instead of writing a file.
    #[arg(long, env = "MD2DECK_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "MD2DECK_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2DECK_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2DECK_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Pptx,
    Pdf,
    Md,
}

impl FormatArg {
    fn as_str(self) -> &'static str {
        match self {
            FormatArg::Pptx => "pptx",
            FormatArg::Pdf => "pdf",
            FormatArg::Md => "md",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is active; the
    // spinner and summary line carry the feedback that matters.
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

    // ── Read markdown ────────────────────────────────────────────────────
    let markdown = if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read markdown from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read {}", cli.input.display()))?
    };

    // ── Build the tool ───────────────────────────────────────────────────
    let tool = SlidevTool::with_config(ClientConfig {
        connect_timeout_secs: cli.connect_timeout,
        request_timeout_secs: cli.timeout,
    })
    .context("Failed to construct the HTTP client")?;

    let params = ToolParameters {
        markdown: Some(markdown),
        title: cli.title.clone(),
        service_url: Some(cli.service_url.clone()),
        export_format: cli.format.map(|f| f.as_str().to_string()),
        with_toc: cli.toc.then_some(true),
        omit_background: cli.omit_background.then_some(true),
        with_clicks: cli.with_clicks.then_some(true),
        dark_mode: cli.dark_mode.then_some(true),
    };

    // ── Run the export ───────────────────────────────────────────────────
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Exporting");
        bar.set_message(cli.service_url.clone());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let start = Instant::now();
    let message = tool.invoke(params).await;
    let elapsed = start.elapsed();

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    // ── Report ───────────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&message).context("Failed to serialise the message")?
        );
        if message.is_error() {
            bail!("export failed");
        }
        return Ok(());
    }

    match message {
        ToolMessage::Blob { blob, meta } => {
            let out_path = cli
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(&meta.filename));
            tokio::fs::write(&out_path, &blob)
                .await
                .with_context(|| format!("Failed to write {}", out_path.display()))?;

            if !cli.quiet {
                eprintln!(
                    "{}  {} bytes  {:.1}s  →  {}",
                    green("✔"),
                    blob.len(),
                    elapsed.as_secs_f64(),
                    bold(&out_path.display().to_string()),
                );
                eprintln!("   {}", dim(&meta.mime_type));
            }
        }
        ToolMessage::Json { json } => {
            let detail = json
                .pointer("/error/en")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| json.to_string());
            eprintln!("{} {}", red("✘"), red(&detail));
            bail!("export failed");
        }
    }

    Ok(())
}
