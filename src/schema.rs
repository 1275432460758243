//! The seven-table catalog: two staging landing zones and the five-table
//! star schema (`songplay` fact, `time`/`sparkify_user`/`song`/`artist`
//! dimensions).
//!
//! Both staging tables are raw pass-throughs of the source JSON with no
//! constraints; duplicates land as-is and are dealt with (or deliberately
//! not) by the insert stage.

/// A warehouse table: its name and the DDL that creates it.
pub struct Table {
    pub name: &'static str,
    pub create: &'static str,
}

impl Table {
    /// `DROP TABLE IF EXISTS`: succeeds whether or not the table is there.
    pub fn drop_statement(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", self.name)
    }
}

pub const STAGING_EVENTS: Table = Table {
    name: "staging_events",
    create: "\
CREATE TABLE IF NOT EXISTS staging_events (
    artist         VARCHAR,
    auth           VARCHAR,
    firstName      VARCHAR,
    gender         CHAR,
    itemInSession  INTEGER,
    lastName       VARCHAR,
    length         FLOAT,
    level          VARCHAR,
    location       VARCHAR,
    method         VARCHAR,
    page           VARCHAR,
    registration   BIGINT,
    sessionId      INTEGER,
    song           VARCHAR,
    status         INTEGER,
    ts             TIMESTAMP,
    userAgent      VARCHAR,
    userId         INTEGER
);",
};

pub const STAGING_SONGS: Table = Table {
    name: "staging_songs",
    create: "\
CREATE TABLE IF NOT EXISTS staging_songs (
    num_songs         INTEGER,
    artist_id         VARCHAR,
    artist_latitude   FLOAT,
    artist_longitude  FLOAT,
    artist_location   VARCHAR,
    artist_name       VARCHAR,
    song_id           VARCHAR,
    title             VARCHAR,
    duration          FLOAT,
    year              SMALLINT
);",
};

pub const SPARKIFY_USER: Table = Table {
    name: "sparkify_user",
    create: "\
CREATE TABLE IF NOT EXISTS sparkify_user (
    user_id     INTEGER  PRIMARY KEY,
    first_name  VARCHAR,
    last_name   VARCHAR,
    gender      CHAR,
    level       VARCHAR
);",
};

pub const SONG: Table = Table {
    name: "song",
    create: "\
CREATE TABLE IF NOT EXISTS song (
    song_id    VARCHAR   PRIMARY KEY,
    title      VARCHAR,
    artist_id  VARCHAR,
    year       SMALLINT,
    duration   FLOAT
);",
};

pub const ARTIST: Table = Table {
    name: "artist",
    create: "\
CREATE TABLE IF NOT EXISTS artist (
    artist_id  VARCHAR  PRIMARY KEY,
    name       VARCHAR,
    location   VARCHAR,
    latitude   FLOAT,
    longitude  FLOAT
);",
};

pub const TIME: Table = Table {
    name: "time",
    create: "\
CREATE TABLE IF NOT EXISTS time (
    start_time  TIMESTAMP  DISTKEY SORTKEY PRIMARY KEY,
    hour        SMALLINT,
    day         SMALLINT,
    week        SMALLINT,
    month       SMALLINT,
    year        SMALLINT,
    weekday     SMALLINT
);",
};

pub const SONGPLAY: Table = Table {
    name: "songplay",
    create: "\
CREATE TABLE IF NOT EXISTS songplay (
    songplay_id  INTEGER    IDENTITY(0, 1) PRIMARY KEY,
    start_time   TIMESTAMP  NOT NULL DISTKEY REFERENCES time,
    user_id      INTEGER    NOT NULL REFERENCES sparkify_user,
    song_id      VARCHAR    REFERENCES song,
    artist_id    VARCHAR    REFERENCES artist,
    session_id   INTEGER,
    location     VARCHAR,
    user_agent   VARCHAR
);",
};

/// Creation order: dimensions before `songplay`, whose column definitions
/// reference them.
pub const CREATE_ORDER: &[&Table] = &[
    &STAGING_EVENTS,
    &STAGING_SONGS,
    &SPARKIFY_USER,
    &SONG,
    &ARTIST,
    &TIME,
    &SONGPLAY,
];

/// Drop order: `songplay` goes before the tables it references.
pub const DROP_ORDER: &[&Table] = &[
    &STAGING_EVENTS,
    &STAGING_SONGS,
    &SONGPLAY,
    &SPARKIFY_USER,
    &SONG,
    &ARTIST,
    &TIME,
];
