// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use pocket_camera::app::{AppFlags, AppModel};
use pocket_camera::backends::camera::CameraSelector;
use pocket_camera::i18n;

mod cli;

#[derive(Parser)]
#[command(name = "pocket-camera")]
#[command(about = "Single-screen camera with photo sheet and video recording")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Camera to open on startup (overrides the saved default)
    #[arg(short, long)]
    camera: Option<CameraSelector>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras and microphones
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control the log level, e.g. RUST_LOG=pocket_camera=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => cli::list_devices(),
        None => run_gui(AppFlags {
            camera: cli.camera,
        }),
    }
}

fn run_gui(flags: AppFlags) -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(480.0),
    );

    cosmic::app::run::<AppModel>(settings, flags)?;

    Ok(())
}
