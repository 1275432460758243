//! Tests that run against a real warehouse, behind the `live-tests` feature.
//!
//! Point `DWH_CONFIG` at a config file for a cluster that is safe to wipe:
//! every test here re-provisions all seven tables. Tests share that cluster,
//! so they serialize on a process-wide lock.

use std::sync::Mutex;

use chrono::NaiveDate;
use postgres::{Client, NoTls};

use crate::config::DwhConfig;
use crate::errors::EtlResult;
use crate::{schema, Runner};

static WAREHOUSE: Mutex<()> = Mutex::new(());

fn test_config() -> DwhConfig {
    let _ = env_logger::try_init();
    let path = std::env::var("DWH_CONFIG").expect("DWH_CONFIG not set");
    DwhConfig::from_path(&path).expect("failed to load config")
}

fn provisioned_runner(config: &DwhConfig) -> EtlResult<Runner> {
    let mut runner = Runner::connect(config)?;
    runner.drop_tables()?;
    runner.create_tables()?;
    Ok(runner)
}

fn inspector(config: &DwhConfig) -> EtlResult<Client> {
    Ok(Client::connect(
        &config.cluster.connection_string(),
        NoTls,
    )?)
}

fn count(client: &mut Client, table: &str) -> i64 {
    client
        .query_one(format!("SELECT COUNT(*) FROM {}", table).as_str(), &[])
        .unwrap()
        .get(0)
}

/// Two NextSong events (one matching the staged song, one not) from the same
/// user and session, plus one non-play page view.
fn seed_staging(client: &mut Client) -> EtlResult<()> {
    client.batch_execute(
        "INSERT INTO staging_events
            (artist, auth, firstName, gender, itemInSession, lastName, length,
             level, location, method, page, registration, sessionId, song,
             status, ts, userAgent, userId)
        VALUES
            ('Test Artist', 'Logged In', 'Ada', 'F', 0, 'Lovelace', 200.5,
             'paid', 'San Francisco', 'PUT', 'NextSong', 1540000000000, 101,
             'Test Song', 200, TIMESTAMP '2018-11-12 02:33:20', 'agent/1.0', 7),
            ('Ghost Artist', 'Logged In', 'Ada', 'F', 1, 'Lovelace', 180.0,
             'paid', 'San Francisco', 'PUT', 'NextSong', 1540000000000, 101,
             'Unstaged Song', 200, TIMESTAMP '2018-11-12 02:36:40', 'agent/1.0', 7),
            (NULL, 'Logged In', 'Ada', 'F', 2, 'Lovelace', NULL,
             'paid', 'San Francisco', 'GET', 'Home', 1540000000000, 101,
             NULL, 200, TIMESTAMP '2018-11-12 02:40:00', 'agent/1.0', 7);",
    )?;
    client.batch_execute(
        "INSERT INTO staging_songs
            (num_songs, artist_id, artist_latitude, artist_longitude,
             artist_location, artist_name, song_id, title, duration, year)
        VALUES
            (1, 'A1', 37.77, -122.43, 'San Francisco', 'Test Artist', 'S1',
             'Test Song', 200.5, 2018);",
    )?;
    Ok(())
}

#[test]
fn provisioning_twice_succeeds() -> EtlResult<()> {
    let _guard = WAREHOUSE.lock().unwrap();
    let config = test_config();
    let mut runner = Runner::connect(&config)?;
    for _ in 0..2 {
        runner.drop_tables()?;
        runner.create_tables()?;
    }
    runner.finish()
}

#[test]
fn provisioned_tables_exist_and_are_empty() -> EtlResult<()> {
    let _guard = WAREHOUSE.lock().unwrap();
    let config = test_config();
    provisioned_runner(&config)?.finish()?;

    let mut client = inspector(&config)?;
    for table in schema::CREATE_ORDER {
        assert_eq!(count(&mut client, table.name), 0, "{} not empty", table.name);
    }
    Ok(())
}

#[test]
fn transform_propagates_plays_and_dedups_dimensions() -> EtlResult<()> {
    let _guard = WAREHOUSE.lock().unwrap();
    let config = test_config();
    let mut runner = provisioned_runner(&config)?;

    let mut client = inspector(&config)?;
    seed_staging(&mut client)?;
    runner.insert_tables()?;
    runner.finish()?;

    // 2 NextSong events, 1 other page view
    assert_eq!(count(&mut client, "songplay"), 2);
    // one distinct user across all plays
    assert_eq!(count(&mut client, "sparkify_user"), 1);
    // two distinct play timestamps
    assert_eq!(count(&mut client, "time"), 2);
    // straight copy of staging_songs
    assert_eq!(
        count(&mut client, "song"),
        count(&mut client, "staging_songs")
    );
    assert_eq!(count(&mut client, "artist"), 1);
    Ok(())
}

#[test]
fn matched_title_resolves_song_and_artist_ids() -> EtlResult<()> {
    let _guard = WAREHOUSE.lock().unwrap();
    let config = test_config();
    let mut runner = provisioned_runner(&config)?;

    let mut client = inspector(&config)?;
    seed_staging(&mut client)?;
    runner.insert_tables()?;
    runner.finish()?;

    let matched = client.query_one(
        "SELECT song_id, artist_id FROM songplay WHERE start_time = TIMESTAMP '2018-11-12 02:33:20'",
        &[],
    )?;
    assert_eq!(matched.get::<_, Option<String>>(0).as_deref(), Some("S1"));
    assert_eq!(matched.get::<_, Option<String>>(1).as_deref(), Some("A1"));

    let unmatched = client.query_one(
        "SELECT song_id, artist_id FROM songplay WHERE start_time = TIMESTAMP '2018-11-12 02:36:40'",
        &[],
    )?;
    assert_eq!(unmatched.get::<_, Option<String>>(0), None);
    assert_eq!(unmatched.get::<_, Option<String>>(1), None);
    Ok(())
}

#[test]
fn time_rows_carry_derived_calendar_fields() -> EtlResult<()> {
    let _guard = WAREHOUSE.lock().unwrap();
    let config = test_config();
    let mut runner = provisioned_runner(&config)?;

    let mut client = inspector(&config)?;
    seed_staging(&mut client)?;
    runner.insert_tables()?;
    runner.finish()?;

    let expected_start = NaiveDate::from_ymd_opt(2018, 11, 12)
        .unwrap()
        .and_hms_opt(2, 33, 20)
        .unwrap();
    let row = client.query_one(
        "SELECT start_time, hour, day, week, month, year, weekday
         FROM time WHERE start_time = TIMESTAMP '2018-11-12 02:33:20'",
        &[],
    )?;
    assert_eq!(row.get::<_, chrono::NaiveDateTime>(0), expected_start);
    assert_eq!(row.get::<_, i16>(1), 2); // hour
    assert_eq!(row.get::<_, i16>(2), 12); // day
    assert_eq!(row.get::<_, i16>(3), 46); // ISO week
    assert_eq!(row.get::<_, i16>(4), 11); // month
    assert_eq!(row.get::<_, i16>(5), 2018); // year
    assert_eq!(row.get::<_, i16>(6), 1); // Monday
    Ok(())
}

#[test]
fn rerun_without_reprovisioning_violates_a_primary_key() -> EtlResult<()> {
    let _guard = WAREHOUSE.lock().unwrap();
    let config = test_config();
    let mut runner = provisioned_runner(&config)?;

    let mut client = inspector(&config)?;
    seed_staging(&mut client)?;
    runner.insert_tables()?;

    // the first keyed insert of the second pass collides
    assert!(runner.insert_tables().is_err());
    let users: i64 = count(&mut client, "sparkify_user");
    assert_eq!(users, 1);
    Ok(())
}
