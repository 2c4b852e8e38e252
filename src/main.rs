use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use cursexml::{app::Viewer, config::Config, model::document, services::tracing_setup};
use std::io::{self, Write};
use std::path::PathBuf;

/// Browse an XML document in the terminal
#[derive(Parser, Debug)]
#[command(name = "cursexml")]
#[command(about = "A terminal viewer for XML documents", long_about = None)]
#[command(version)]
struct Args {
    /// XML file to view, or "-" for stdin
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start with indent guides shown
    #[arg(long)]
    guides: bool,

    /// Write the whole document to stdout instead of opening the viewer
    #[arg(long)]
    print: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_file);
    tracing::info!("Viewer starting");

    let mut config = Config::resolve(args.config.as_deref()).context("Failed to load config")?;
    if args.guides {
        config.viewer.show_indent_guides = true;
    }

    // Handle --dump-config early (no document or terminal needed)
    if args.dump_config {
        let json = config.to_json().context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    let root = document::load(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let mut viewer = Viewer::new(root, &config).context("Invalid configuration")?;

    if args.print {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        viewer.print(&mut out)?;
        out.flush()?;
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let result = viewer.run(&mut terminal, crossterm::event::read);
    ratatui::restore();

    tracing::info!("Viewer exiting");
    result.context("Terminal error")
}
