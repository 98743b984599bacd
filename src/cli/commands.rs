use crate::app::{AppContext, GazetteError, Result};
use crate::articles::ArticleStore;
use crate::domain::{Block, Document};
use crate::store::PageCache;

/// Divider width for plain-text output.
const RULE_WIDTH: usize = 72;

pub async fn list_articles(ctx: &AppContext) -> Result<()> {
    let round = ctx.listing.list_all(&ctx.sources, false).await;

    if round.failed_sources > 0 {
        eprintln!("warning: {} source(s) failed to load", round.failed_sources);
    }

    if round.stubs.is_empty() {
        println!("No articles found");
        return Ok(());
    }

    for (i, stub) in round.stubs.iter().enumerate() {
        println!("{:>3}. [{}] {}", i + 1, stub.source_name, stub.label);
    }

    Ok(())
}

pub async fn read_article(ctx: &AppContext, row: usize) -> Result<()> {
    let index = row.checked_sub(1).ok_or(GazetteError::NoSuchArticle(row))?;

    let round = ctx.listing.list_all(&ctx.sources, false).await;
    let mut store = ArticleStore::new(ctx.fetcher.clone());
    store.reset(round.stubs);

    let document = store.select(index).await?;
    print_document(&document);

    Ok(())
}

pub fn purge_cache(ctx: &AppContext) -> Result<()> {
    let removed = ctx.cache.purge_expired()?;
    println!("Purged {removed} expired page(s)");
    Ok(())
}

fn print_document(document: &Document) {
    for block in &document.blocks {
        match block {
            Block::Divider { glyph } => println!("{}", glyph.to_string().repeat(RULE_WIDTH)),
            Block::Text { runs } => {
                let line: String = runs.iter().map(|run| run.text.as_str()).collect();
                println!("{line}");
            }
        }
    }

    if !document.links.is_empty() {
        println!();
        for (index, url) in document.links.iter() {
            println!("[{index}] {url}");
        }
    }
}
