use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;
use gazette::store::PageCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Invalid configuration is the only fatal error class; bail out before
    // the main loop starts.
    let config = Config::load()?;

    let interactive = cli.command.is_none();
    init_tracing(interactive)?;

    let ctx = Arc::new(AppContext::new(config, None)?);

    // Expired pages are purged at process start; the explicit purge command
    // reports its own count instead.
    if !matches!(cli.command, Some(Commands::Purge)) {
        ctx.cache.purge_expired()?;
    }

    match cli.command {
        Some(Commands::List) => commands::list_articles(&ctx).await?,
        Some(Commands::Read { row }) => commands::read_article(&ctx, row).await?,
        Some(Commands::Purge) => commands::purge_cache(&ctx)?,
        None => gazette::tui::run(ctx.clone()).await?,
    }

    ctx.cache.flush()?;

    Ok(())
}

/// The TUI owns the terminal, so its logs go to a file; CLI subcommands log
/// to stderr.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    if to_file {
        let dir = dirs::data_dir()
            .context("could not find data directory")?
            .join("gazette");
        std::fs::create_dir_all(&dir)?;
        let file = std::fs::File::create(dir.join("gazette.log"))?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    Ok(())
}
