//! Banner art command line (default binary).
//!
//! Renders text directly to stdout, lists the banners in a fonts directory, or
//! runs the render server.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use banner_art::core::{BannerLibrary, LibraryConfig};
use banner_art::server::{check_tcp_listen_available, run_server, ServerConfig};
use banner_art::types::{RenderRequest, DEFAULT_BANNER};

#[derive(Debug, Parser)]
#[command(name = "banner-art", version, about = "Render text as block-letter banner art")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render text to stdout
    Render {
        /// Banner font name (file stem inside the fonts directory)
        #[arg(short, long, default_value = DEFAULT_BANNER)]
        banner: String,

        #[arg(long)]
        fonts_dir: Option<PathBuf>,

        /// Text to render; several arguments are joined with a space
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List banner names in the fonts directory
    List {
        #[arg(long)]
        fonts_dir: Option<PathBuf>,
    },
    /// Run the render server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        #[arg(long)]
        fonts_dir: Option<PathBuf>,

        /// Keep parsed fonts in memory between requests
        #[arg(long)]
        cache: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialise logger")?;

    match cli.command {
        Command::Render {
            banner,
            fonts_dir,
            text,
        } => render(banner, fonts_dir, text.join(" ")),
        Command::List { fonts_dir } => list(fonts_dir),
        Command::Serve {
            host,
            port,
            fonts_dir,
            cache,
        } => serve(host, port, fonts_dir, cache),
    }
}

fn library_config(fonts_dir: Option<PathBuf>) -> LibraryConfig {
    match fonts_dir {
        Some(dir) => LibraryConfig::with_fonts_dir(dir),
        None => ServerConfig::from_env().library,
    }
}

fn render(banner: String, fonts_dir: Option<PathBuf>, text: String) -> Result<()> {
    let library = BannerLibrary::new(library_config(fonts_dir));
    let art = library
        .generate(&RenderRequest::new(text, banner))
        .context("failed to generate art")?;
    println!("{art}");
    Ok(())
}

fn list(fonts_dir: Option<PathBuf>) -> Result<()> {
    let library = BannerLibrary::new(library_config(fonts_dir));
    let names = library.available().with_context(|| {
        format!("cannot list {}", library.config().fonts_dir.display())
    })?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn serve(
    host: Option<String>,
    port: Option<u16>,
    fonts_dir: Option<PathBuf>,
    cache: bool,
) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(dir) = fonts_dir {
        config.library.fonts_dir = dir;
    }
    config.library.cache |= cache;

    check_tcp_listen_available(&config.host, config.port)
        .with_context(|| format!("cannot listen on {}:{}", config.host, config.port))?;
    info!(
        "serving banners from {}",
        config.library.fonts_dir.display()
    );

    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(run_server(config, None))
}
