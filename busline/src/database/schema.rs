//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on every open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the routes table.
///
/// The CHECK constraint keeps `0 <= available_seats <= total_seats` true
/// even for writers that bypass the booking engine.
pub const CREATE_ROUTES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS routes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        source_city TEXT NOT NULL,
        destination_city TEXT NOT NULL,
        departure_time TEXT NOT NULL,
        arrival_time TEXT NOT NULL,
        total_seats INTEGER NOT NULL CHECK (total_seats >= 0),
        available_seats INTEGER NOT NULL,
        price REAL NOT NULL CHECK (price >= 0),
        CHECK (available_seats BETWEEN 0 AND total_seats)
    )";

/// Index for source-city lookups.
pub const CREATE_SOURCE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_routes_source ON routes(source_city)";

/// Index for city-pair lookups.
pub const CREATE_CITY_PAIR_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_routes_city_pair ON routes(source_city, destination_city)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a route. Availability starts at capacity.
pub const INSERT_ROUTE: &str = r"
    INSERT INTO routes
    (source_city, destination_city, departure_time, arrival_time,
     total_seats, available_seats, price)
    VALUES (?1, ?2, ?3, ?4, ?5, ?5, ?6)
";

/// SQL statement to count routes.
pub const COUNT_ROUTES: &str = "SELECT COUNT(*) FROM routes";
