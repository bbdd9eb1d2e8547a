//! markshelf - a tabbed terminal markdown viewer with a folder library.
//!
//! # Usage
//!
//! ```bash
//! markshelf docs/
//! markshelf --no-index docs/
//! markshelf            # open the library
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use markshelf::app::App;
use markshelf::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// A tabbed terminal markdown viewer with a folder library
#[derive(Parser, Debug)]
#[command(name = "markshelf", version, about, long_about = None)]
struct Cli {
    /// Folder to scan for markdown files; omit to open the library
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// Ignore index.json ordering when opening folders
    #[arg(long)]
    no_index: bool,

    /// Color theme
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Save current command-line flags as defaults in .markshelfrc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .markshelfrc
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    if let Some(folder) = &cli.folder
        && !folder.is_dir()
    {
        anyhow::bail!("Folder not found: {}", folder.display());
    }

    let mut app = App::new()
        .with_folder(cli.folder)
        .with_no_index(effective.no_index)
        .with_theme(effective.theme.unwrap_or(ThemeMode::Auto));

    app.run().context("Application error")
}
