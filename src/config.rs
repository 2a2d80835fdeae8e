use crate::highscore::DEFAULT_KEY;
use crate::storage::s3::S3Store;
use crate::storage::ObjectStore;
use anyhow::Context;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub highscore_key: String,
    pub highscore_bucket: Option<String>,
    pub s3_endpoint: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |name: &str| {
            var(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match non_empty("PORT") {
                Some(value) => value
                    .parse::<u16>()
                    .with_context(|| format!("PORT has invalid value '{value}'"))?,
                None => 8080,
            },
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            highscore_key: non_empty("HIGHSCORE_KEY").unwrap_or_else(|| DEFAULT_KEY.to_string()),
            highscore_bucket: non_empty("HIGHSCORE_BUCKET"),
            s3_endpoint: non_empty("S3_ENDPOINT"),
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// S3 when a bucket is configured, otherwise a process-local store.
    pub async fn object_store(&self) -> ObjectStore {
        match &self.highscore_bucket {
            Some(bucket) => ObjectStore::S3(
                S3Store::from_env(bucket.clone(), self.s3_endpoint.clone()).await,
            ),
            None => ObjectStore::memory(),
        }
    }
}
