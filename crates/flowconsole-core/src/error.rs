use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}
