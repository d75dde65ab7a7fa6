use filmvault::{catalog::Catalog, config::Config, db, importers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmvault=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;
    let db = db::connect_and_migrate(&config.database_url).await?;
    let catalog = Catalog::new(db);

    let summary = importers::run_all(&catalog, &config.dataset_dir).await;

    let created: usize = summary.reports.iter().map(|(_, r)| r.created).sum();
    tracing::info!(
        stages = summary.reports.len(),
        failed = summary.failed.len(),
        created,
        "import run complete"
    );

    Ok(())
}
