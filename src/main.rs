use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod engine;
mod engines;
mod error;
mod extractor;
mod output;
mod preprocessing;

use config::{Config, Source};
use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ocr-extract")]
#[command(about = "Extract text from images with preprocessing and OCR")]
#[command(version)]
pub struct Args {
    /// Path to an image file to process
    #[arg(long)]
    pub image: Option<std::path::PathBuf>,

    /// Base64-encoded image data (alternative to --image)
    #[arg(long)]
    pub base64: Option<String>,

    /// Skip the preprocessing pipeline and pass the raw image to the engine
    #[arg(long)]
    pub no_preprocess: bool,

    /// Output format for the detection list
    #[arg(long, value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Log to stderr; stdout carries only the detection output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::try_from(args)?;

    let engine = engines::create()?;
    tracing::info!(
        "Using {} engine ({}); languages: {}",
        engine.name(),
        engine.description(),
        engine.supported_languages().join(", ")
    );

    let extractor = extractor::Extractor::new(engine);

    let detections = match &config.source {
        Source::Path(path) => extractor.extract_from_path(path, config.preprocess),
        Source::Base64(data) => extractor.extract_from_base64(data, config.preprocess),
    };

    println!("{}", output::render(&detections, config.output_format)?);

    Ok(())
}
