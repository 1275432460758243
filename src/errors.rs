use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum EtlError {
    #[error("could not read config file {}: {}", .path.display(), .source)]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {}: {}", .path.display(), .source)]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Database(#[from] postgres::Error),
}

pub type EtlResult<T> = Result<T, EtlError>;
