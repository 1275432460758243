//! ELT for the Sparkify analytics warehouse.
//!
//! Provisions a star schema on a Redshift cluster and populates it from the
//! JSON event and song dumps staged in S3, using the cluster's own `COPY`
//! command for the heavy lifting. The crate ships two binaries built on the
//! library: `create_tables` (drop and recreate everything) and `etl` (bulk
//! copy into staging, then transform into the star schema).
//!
//! Example usage:
//!
//! ```rust,no_run
//! use sparkify_redshift_etl::{DwhConfig, EtlResult, Runner};
//!
//! fn main() -> EtlResult<()> {
//!     let config = DwhConfig::from_path("dwh.toml")?;
//!
//!     let mut runner = Runner::connect(&config)?;
//!     runner.drop_tables()?;
//!     runner.create_tables()?;
//!     runner.load_staging_tables(&config.s3, &config.iam_role)?;
//!     runner.insert_tables()?;
//!     runner.finish()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Each statement commits on its own; there is no rollback-to-start if a
//! run dies partway. Provisioning must complete before the pipeline runs,
//! and a second pipeline run without re-provisioning trips the analytical
//! tables' primary keys: the load is a full rebuild, not an upsert.

pub mod config;
pub mod copy;
mod errors;
pub mod insert;
#[cfg(test)]
#[cfg(feature = "live-tests")]
mod live_tests;
pub mod runner;
pub mod schema;

pub use config::{ClusterConfig, DwhConfig, IamRoleConfig, S3Config};
pub use errors::{EtlError, EtlResult};
pub use runner::Runner;
