//! Pipeline runner: bulk-copy the S3 JSON dumps into staging, then rebuild
//! the star schema from them. Assumes `create_tables` has already left an
//! empty, valid schema behind.

use log::{error, info};
use sparkify_redshift_etl::{DwhConfig, EtlResult, Runner};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> EtlResult<()> {
    let config_path =
        std::env::var("DWH_CONFIG").unwrap_or_else(|_| "dwh.toml".to_string());
    let config = DwhConfig::from_path(&config_path)?;

    let mut runner = Runner::connect(&config)?;
    runner.load_staging_tables(&config.s3, &config.iam_role)?;
    runner.insert_tables()?;
    runner.finish()?;

    info!("done");
    Ok(())
}
