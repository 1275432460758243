use postgres::{Client, NoTls, SimpleQueryMessage};

use crate::config::{DwhConfig, IamRoleConfig, S3Config};
use crate::errors::EtlResult;
use crate::{copy, insert, schema};

/// Executes statement lists over a single warehouse connection.
///
/// Statements run strictly one after another through the simple query
/// protocol, and each one commits on its own as it completes. There is no
/// enclosing transaction: a failure partway through a list leaves the
/// earlier statements' effects applied, and the error carries the driver's
/// native report of whatever the warehouse rejected.
pub struct Runner {
    client: Client,
}

impl Runner {
    /// Open the one connection a run uses. Fails before any statement
    /// executes if the cluster is unreachable or the credentials are bad.
    pub fn connect(config: &DwhConfig) -> EtlResult<Self> {
        log::info!("connecting to cluster at {}", config.cluster.host);
        let client = Client::connect(&config.cluster.connection_string(), NoTls)?;
        Ok(Runner { client })
    }

    fn execute(&mut self, sql: &str) -> EtlResult<u64> {
        log::info!("executing:\n{}", sql);
        let mut rows = 0;
        for message in self.client.simple_query(sql)? {
            if let SimpleQueryMessage::CommandComplete(count) = message {
                rows = count;
            }
        }
        Ok(rows)
    }

    /// Drop all seven tables, dependents first. `IF EXISTS` makes this a
    /// no-op on a fresh database.
    pub fn drop_tables(&mut self) -> EtlResult<()> {
        log::info!("dropping tables");
        for table in schema::DROP_ORDER {
            self.execute(&table.drop_statement())?;
        }
        Ok(())
    }

    /// Create all seven tables, dependencies first.
    pub fn create_tables(&mut self) -> EtlResult<()> {
        log::info!("creating tables");
        for table in schema::CREATE_ORDER {
            self.execute(table.create)?;
        }
        Ok(())
    }

    /// Bulk-copy the S3 JSON dumps into the staging tables, events first.
    pub fn load_staging_tables(
        &mut self,
        s3: &S3Config,
        iam_role: &IamRoleConfig,
    ) -> EtlResult<()> {
        log::info!("copying to staging tables");
        let statements = [
            copy::staging_events_copy(
                &s3.log_data,
                &s3.log_jsonpath,
                &iam_role.arn,
                copy::DEFAULT_REGION,
            ),
            copy::staging_songs_copy(&s3.song_data, &iam_role.arn, copy::DEFAULT_REGION),
        ];
        for sql in &statements {
            self.execute(sql)?;
        }
        Ok(())
    }

    /// Populate the star schema from staging, dimensions before the fact
    /// table.
    pub fn insert_tables(&mut self) -> EtlResult<()> {
        log::info!("inserting into analytical tables");
        for sql in insert::INSERT_ORDER {
            let rows = self.execute(sql)?;
            log::info!("{} rows inserted", rows);
        }
        Ok(())
    }

    /// Close the connection, surfacing any teardown error.
    pub fn finish(self) -> EtlResult<()> {
        self.client.close()?;
        Ok(())
    }
}
