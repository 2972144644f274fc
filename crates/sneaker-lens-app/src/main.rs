#![warn(missing_docs)]
//! # sneaker-lens-app binary
//!
//! Terminal front end: select a photo, analyze it, print the rendered view.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sneaker_lens_app::{AppConfig, AppError, app_version, build_controller, load_image_file};
use sneaker_lens_ui::render_text;

#[derive(Parser, Debug)]
#[command(author, version, about = "Identify a sneaker photo and show market prices")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a photo to the analysis service and print the result.
    Analyze {
        /// Path to the sneaker photo.
        image: PathBuf,
        /// Declared media type; sniffed from the file when omitted.
        #[arg(long)]
        media_type: Option<String>,
        /// Backend base URL (overrides SNEAKER_LENS_API_BASE_URL).
        #[arg(long)]
        api_base_url: Option<String>,
        /// Request timeout in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Print the parsed result as JSON instead of the rendered view.
        #[arg(long)]
        json: bool,
    },
    /// Print the app version.
    Version,
}

/// CLI entry point.
#[tokio::main]
async fn main() -> ExitCode {
    sneaker_lens_app::init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Version => {
            println!("sneaker-lens {}", app_version());
            ExitCode::SUCCESS
        }
        Command::Analyze {
            image,
            media_type,
            api_base_url,
            timeout_secs,
            json,
        } => match analyze(image, media_type, api_base_url, timeout_secs, json).await {
            Ok(code) => code,
            Err(error) => {
                tracing::error!(stage = "cli", action = "setup_failed", detail = %error);
                eprintln!("{error}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn analyze(
    image: PathBuf,
    media_type: Option<String>,
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    json: bool,
) -> Result<ExitCode, AppError> {
    let config = AppConfig::from_env(api_base_url.as_deref(), timeout_secs)?;
    let mut controller = build_controller(&config)?;
    let input = load_image_file(&image, media_type.as_deref()).await?;

    if controller.select_image(input).is_err() {
        print!("{}", render_text(&controller.snapshot()));
        return Ok(ExitCode::FAILURE);
    }
    print!("{}", render_text(&controller.snapshot()));

    let outcome = controller.analyze().await;
    match (json, controller.result()) {
        (true, Some(result)) => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        _ => print!("{}", render_text(&controller.snapshot())),
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
