use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `programs` table carries the `operator` column.
/// Its absence marks the single-operator schema (< 0.3.0).
fn programs_has_operator_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('programs')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "operator" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the roster tables with the modern schema (operator-scoped).
fn create_roster_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS programs (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            operator   TEXT NOT NULL,
            name       TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(operator, name)
        );

        CREATE TABLE IF NOT EXISTS members (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            operator      TEXT NOT NULL,
            name          TEXT NOT NULL,
            phone         TEXT NOT NULL DEFAULT '',
            program_id    INTEGER NOT NULL,
            program_name  TEXT NOT NULL,
            registered_on TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS attendance (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id INTEGER NOT NULL,
            date      TEXT NOT NULL,
            operator  TEXT NOT NULL,
            status    TEXT NOT NULL CHECK(status IN ('present','absent')),
            UNIQUE(member_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_members_operator_program ON members(operator, program_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_operator_date ON attendance(operator, date);
        "#,
    )?;
    Ok(())
}

/// Migrate a single-operator schema: add the `operator` column to all
/// roster tables, backfilling existing rows with 'default'.
fn migrate_add_operator_scope(conn: &Connection) -> Result<(), Error> {
    let version = "20250614_0006_add_operator_scope";

    // 1) Already applied?
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    // 2) Execute the migration
    conn.execute_batch(
        r#"
        ALTER TABLE programs   ADD COLUMN operator TEXT NOT NULL DEFAULT 'default';
        ALTER TABLE members    ADD COLUMN operator TEXT NOT NULL DEFAULT 'default';
        ALTER TABLE attendance ADD COLUMN operator TEXT NOT NULL DEFAULT 'default';
        "#,
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'operator' columns: {}", e)),
        )
    })?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added operator scope to roster tables')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'operator' to roster tables",
        version
    ));

    Ok(())
}

/// Create a zip copy of the database before a destructive migration.
fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_operator_scope.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            e.kind(),
            format!("Backup failed (create): {}", e),
        )))
    })?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (start_file): {}",
            e
        ))))
    })?;

    let db_content = fs::read(db_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (read): {}",
            e
        ))))
    })?;

    zip.write_all(&db_content).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (write_all): {}",
            e
        ))))
    })?;

    zip.finish().map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (finish): {}",
            e
        ))))
    })?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() and `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Detect the current schema generation
    let roster_exists = table_exists(conn, "programs")?;
    let has_operator = if roster_exists {
        programs_has_operator_column(conn)?
    } else {
        false
    };

    // 3) Legacy single-operator schema → safety backup before migrating
    if roster_exists && !has_operator {
        warning("Legacy schema detected — creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path — backup skipped.");
        }

        migrate_add_operator_scope(conn)?;
    }

    // 4) Create roster tables if missing, otherwise make sure indices exist
    if !roster_exists {
        create_roster_tables(conn)?;
        success("Created roster tables (modern schema).");
    } else {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_members_operator_program ON members(operator, program_id);
            CREATE INDEX IF NOT EXISTS idx_attendance_operator_date ON attendance(operator, date);
            "#,
        )?;
    }

    Ok(())
}
