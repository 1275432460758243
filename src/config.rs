use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{EtlError, EtlResult};

/// Warehouse and source-data configuration, read from `dwh.toml`.
///
/// Three sections: `[cluster]` for the Redshift connection, `[s3]` for the
/// JSON dump locations, and `[iam_role]` for the role the cluster assumes
/// when reading them.
#[derive(Debug, Clone, Deserialize)]
pub struct DwhConfig {
    pub cluster: ClusterConfig,
    pub s3: S3Config,
    pub iam_role: IamRoleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    pub host: String,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    /// Event-log JSON dumps, e.g. `s3://udacity-dend/log_data`
    pub log_data: String,
    /// The jsonpaths document mapping event keys to staging columns
    pub log_jsonpath: String,
    /// Song-catalog JSON dumps
    pub song_data: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IamRoleConfig {
    pub arn: String,
}

impl DwhConfig {
    /// Read and parse a config file
    ///
    /// A missing file or key errors here, before any connection is opened.
    pub fn from_path(path: impl AsRef<Path>) -> EtlResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| EtlError::Config {
            path: path.to_owned(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| EtlError::ConfigFormat {
            path: path.to_owned(),
            source,
        })
    }
}

impl ClusterConfig {
    /// Assemble the keyword/value connection string the postgres driver
    /// expects. Redshift clusters speak the postgres wire protocol.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} dbname={} user={} password={} port={}",
            self.host, self.db_name, self.db_user, self.db_password, self.db_port
        )
    }
}
