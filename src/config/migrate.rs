use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;

/// Migration that adds the export marker parameters to the YAML config,
/// if missing, and marks the migration as applied in the `log` table.
pub fn migrate_add_export_markers(conn: &Connection) -> Result<(), Error> {
    let version = "20250902_0008_add_export_markers";

    // Check if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    let conf_file = super::Config::config_file();

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to read config {:?}: {}", conf_file, e)),
            )
        })?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            let mut changed = false;

            for (key, default) in [("present_marker", "O"), ("absent_marker", "X")] {
                let key = Value::String(key.to_string());
                if !map.contains_key(&key) {
                    map.insert(key, Value::String(default.to_string()));
                    changed = true;
                }
            }

            if changed {
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to serialize updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                // Keep a short usage note next to the new keys
                let mut new_content = String::new();
                for line in serialized.lines() {
                    new_content.push_str(line);
                    new_content.push('\n');

                    if line.starts_with("absent_marker:") {
                        new_content.push_str(
                            "# export markers:\n\
                             #   present_marker → cell value for a present mark\n\
                             #   absent_marker  → cell value for an absent mark\n\
                             #   unset marks always render as an empty cell\n",
                        );
                    }
                }

                fs::write(&conf_file, new_content).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to write updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;
            }
        }
    }

    // Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added export markers to config')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} — added export marker parameters to config.",
        version
    ));

    Ok(())
}
