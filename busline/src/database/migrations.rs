//! Database schema management and migrations.
//!
//! This module handles database schema initialization and version checking.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_CITY_PAIR_INDEX, CREATE_METADATA_TABLE, CREATE_ROUTES_TABLE, CREATE_SOURCE_INDEX,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables and indices and records the schema version. Every
/// statement is `IF NOT EXISTS`, so running it twice is harmless.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use busline::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_ROUTES_TABLE, [])?;
    conn.execute(CREATE_SOURCE_INDEX, [])?;
    conn.execute(CREATE_CITY_PAIR_INDEX, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
///
/// # Errors
///
/// Returns an error if the query fails for any other reason.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value.parse::<i32>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::FromSqlConversionFailure(..)) => Err(Error::DatabaseCorruption {
            details: "schema_version is not an integer".into(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// - version 0: fresh database, the schema is created
/// - version equal to current: nothing to do
/// - anything else: [`Error::UnsupportedSchemaVersion`]
///
/// # Errors
///
/// Returns an error if the schema version is incompatible or a query fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        log::debug!("initializing database schema v{CURRENT_SCHEMA_VERSION}");
        return initialize_schema(conn);
    }

    if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_has_version_zero() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_check_initializes_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        check_schema_compatibility(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        // Second call is a no-op
        check_schema_compatibility(&conn).unwrap();
    }

    #[test]
    fn test_newer_schema_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION + 1])
            .unwrap();

        let err = check_schema_compatibility(&conn).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedSchemaVersion { found, .. } if found == CURRENT_SCHEMA_VERSION + 1
        ));
    }

    #[test]
    fn test_garbage_version_is_corruption() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "UPDATE metadata SET value = 'abc' WHERE key = 'schema_version'",
            [],
        )
        .unwrap();

        let err = get_schema_version(&conn).unwrap_err();
        assert!(matches!(err, Error::DatabaseCorruption { .. }));
    }

    #[test]
    fn test_check_constraint_blocks_overdraw() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO routes (source_city, destination_city, departure_time, arrival_time, total_seats, available_seats, price) VALUES ('A', 'B', '08:00', '09:00', 10, 10, 1.0)",
            [],
        )
        .unwrap();

        let result = conn.execute("UPDATE routes SET available_seats = -1", []);
        assert!(result.is_err());
        let result = conn.execute("UPDATE routes SET available_seats = 11", []);
        assert!(result.is_err());
    }
}
