use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub dataset_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://filmvault.db?mode=rwc".to_string());

        let dataset_dir =
            PathBuf::from(std::env::var("DATASET_DIR").unwrap_or_else(|_| "dataset".to_string()));

        Ok(Self { database_url, dataset_dir })
    }
}
