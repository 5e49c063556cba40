/// Isolated test database that is created per test and dropped afterwards
///
/// Uses TEST_DATABASE_URL from the environment to reach the database server.
/// When it is not set, `TestDb::try_new` returns `None` and database tests
/// are skipped.
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_query;
use diesel::sql_types::{Nullable, Text, Uuid as SqlUuid};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use import_sync_lib::modules::import_source::ImportSourceRecord;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use uuid::Uuid;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

pub type TestPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Row as stored, with the enum label read back as text
#[derive(QueryableByName, Debug)]
pub struct StoredRow {
    #[diesel(sql_type = Text)]
    pub source_name: String,
    #[diesel(sql_type = Text)]
    pub import_state: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub last_error_message: Option<String>,
}

pub struct TestDb {
    server_url: String,
    name: String,
    pool: TestPool,
}

impl TestDb {
    /// Create a migrated database named test_db_{process_id}_{counter}
    pub fn try_new() -> Option<Self> {
        dotenvy::dotenv().ok();

        let Ok(server_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        };

        let name = format!(
            "test_db_{}_{}",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let mut conn =
            PgConnection::establish(&server_url).expect("Failed to connect to test database server");
        sql_query(format!("CREATE DATABASE {}", name))
            .execute(&mut conn)
            .unwrap_or_else(|e| panic!("Failed to create test database {}: {}", name, e));

        // Replace the database name in the URL (everything after the last '/')
        let last_slash = server_url
            .rfind('/')
            .unwrap_or_else(|| panic!("Invalid TEST_DATABASE_URL format: {}", server_url));
        let isolated_url = format!("{}/{}", &server_url[..last_slash], name);

        let pool = r2d2::Pool::builder()
            .max_size(2)
            .test_on_check_out(true)
            .build(ConnectionManager::<PgConnection>::new(isolated_url))
            .expect("Failed to build test database connection pool");

        pool.get()
            .expect("Unable to connect to the test database")
            .run_pending_migrations(MIGRATIONS)
            .expect("Unable to migrate the test database");

        Some(Self {
            server_url,
            name,
            pool,
        })
    }

    pub fn pool(&self) -> TestPool {
        self.pool.clone()
    }

    /// Insert a source row directly, bypassing the repository
    pub fn insert(&self, record: &ImportSourceRecord) {
        let mut conn = self.pool.get().expect("Failed to get DB connection");
        sql_query(
            "INSERT INTO import_source (id, source_name, import_state, last_error_message) \
             VALUES ($1, $2, $3::import_state, $4)",
        )
        .bind::<SqlUuid, _>(record.id)
        .bind::<Text, _>(&record.source_name)
        .bind::<Text, _>(record.import_state.as_str())
        .bind::<Nullable<Text>, _>(record.last_error_message.as_deref())
        .execute(&mut conn)
        .expect("Failed to insert import source");
    }

    /// Read a row back without going through the repository mapping
    pub fn stored_row(&self, id: Uuid) -> StoredRow {
        let mut conn = self.pool.get().expect("Failed to get DB connection");
        sql_query(
            "SELECT source_name, import_state::text AS import_state, last_error_message \
             FROM import_source WHERE id = $1",
        )
        .bind::<SqlUuid, _>(id)
        .get_result(&mut conn)
        .expect("Failed to read import source")
    }
}

impl Drop for TestDb {
    /// Drop the database unless the test panicked, then it is left for debugging
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!("TestDb leaking database '{}' due to panic", self.name);
            return;
        }

        let Ok(mut conn) = PgConnection::establish(&self.server_url) else {
            eprintln!("Failed to connect for cleanup of '{}'", self.name);
            return;
        };

        let _ = sql_query(format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
            self.name
        ))
        .execute(&mut conn);

        if let Err(e) = sql_query(format!("DROP DATABASE IF EXISTS {}", self.name)).execute(&mut conn)
        {
            eprintln!("Failed to drop test database '{}': {}", self.name, e);
        }
    }
}
