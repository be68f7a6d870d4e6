use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::print_json;
use crate::startup::StartupContext;

pub async fn handle_broca_command(startup: &StartupContext, message: &str) -> Result<()> {
    let response = startup.client.broca(message).await?;
    print_json(&response)
}

pub async fn handle_rerank_command(
    startup: &StartupContext,
    query: &str,
    documents: &[String],
) -> Result<()> {
    let response = startup.client.rerank(query, documents.to_vec()).await?;
    print_json(&response)
}

pub async fn handle_url_command(startup: &StartupContext, url: &str) -> Result<()> {
    let response = startup.client.url4llm(url).await?;
    print_json(&response)
}

pub async fn handle_pdf_command(startup: &StartupContext, path: &Path) -> Result<()> {
    let content =
        fs::read(path).with_context(|| format!("Failed to read PDF: {}", path.display()))?;
    let response = startup.client.pdf4llm(&content).await?;
    print_json(&response)
}

pub async fn handle_search_command(startup: &StartupContext, query: &str) -> Result<()> {
    let response = startup.client.web_search(query).await?;
    print_json(&response)
}

pub async fn handle_youtube_command(startup: &StartupContext, url: &str) -> Result<()> {
    let response = startup.client.youtube4llm(url).await?;
    print_json(&response)
}
