use bedrock_playground::cli::{run_qa, AppContext};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

const DOCUMENT_ENV: &str = "RAG_DOCUMENT";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let ctx = AppContext::from_env()?;

    let path = std::env::var(DOCUMENT_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| ctx.config.config.rag.document_path.clone());

    println!("Loading document {}...", path.display());
    let (document, chunks) = ctx.document_service().ingest(&path).await?;
    println!(
        "Loaded {} page(s), split into {} chunk(s).",
        document.page_count(),
        chunks.len()
    );

    println!("Creating embeddings and building the index...");
    let qa = ctx.qa_service(&chunks).await?;
    info!(document = %document.name, "ready for questions");
    println!("Index ready.");

    let stdin = BufReader::new(tokio::io::stdin());
    run_qa(&qa, stdin, &mut std::io::stdout()).await
}
