//! Builders for the two Redshift `COPY` statements that land the S3 JSON
//! dumps in the staging tables.
//!
//! All inputs are passed in explicitly; nothing here reads configuration on
//! its own. The statements either load the whole source or the copy job
//! fails inside the warehouse; there is no row-level recovery to expose.

/// Region the source buckets live in.
pub const DEFAULT_REGION: &str = "us-west-2";

/// `COPY staging_events FROM <s3>` with an explicit jsonpaths document.
///
/// The event dumps' keys (`userId`, `sessionId`, ...) don't line up with the
/// staging column order, so the jsonpaths document does the mapping, and
/// `TIMEFORMAT 'epochmillisecs'` turns the raw `ts` epoch into a TIMESTAMP.
pub fn staging_events_copy(
    source_uri: &str,
    jsonpath_uri: &str,
    role_arn: &str,
    region: &str,
) -> String {
    format!(
        "COPY staging_events \
         FROM '{source_uri}' \
         JSON '{jsonpath_uri}' \
         TIMEFORMAT 'epochmillisecs' \
         IAM_ROLE '{role_arn}' \
         REGION '{region}';"
    )
}

/// `COPY staging_songs FROM <s3>`.
///
/// Song dumps use exactly the staging column names, so `JSON 'auto'` maps
/// them without a jsonpaths document.
pub fn staging_songs_copy(source_uri: &str, role_arn: &str, region: &str) -> String {
    format!(
        "COPY staging_songs \
         FROM '{source_uri}' \
         JSON 'auto' \
         IAM_ROLE '{role_arn}' \
         REGION '{region}';"
    )
}
