use crate::config::Config;
use crate::config::migrate::migrate_add_export_markers;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

use crate::cli::parser::Commands;
use crate::ui::messages::{success, warning};
use std::process::Command;

/// Expected top-level keys of the YAML config.
const EXPECTED_KEYS: [&str; 4] = [
    "database",
    "default_operator",
    "present_marker",
    "absent_marker",
];

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!(
                "{}",
                serde_yaml::to_string(&cfg).unwrap_or_else(|_| "<unreadable>".to_string())
            );
        }

        // ---- CHECK CONFIG ----
        if *check {
            if !path.exists() {
                warning(format!("Config file not found: {}", path.display()));
            } else {
                let content = std::fs::read_to_string(&path)?;
                let yaml: serde_yaml::Value =
                    serde_yaml::from_str(&content).unwrap_or(serde_yaml::Value::Null);

                let mut missing = Vec::new();
                if let Some(map) = yaml.as_mapping() {
                    for key in EXPECTED_KEYS {
                        if !map.contains_key(&serde_yaml::Value::String(key.to_string())) {
                            missing.push(key);
                        }
                    }
                } else {
                    missing.extend(EXPECTED_KEYS);
                }

                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!(
                        "Missing fields: {} (run `rollbook config --migrate`)",
                        missing.join(", ")
                    ));
                }
            }
        }

        // ---- MIGRATE CONFIG ----
        if *migrate {
            let pool = DbPool::new(&cfg.database)?;
            migrate_add_export_markers(&pool.conn)?;
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let requested_editor = editor.clone();

            // Default editor based on the platform
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = requested_editor.unwrap_or_else(|| default_editor.clone());

            let status = Command::new(&editor_to_use).arg(&path).status();

            match status {
                Ok(s) if s.success() => {
                    println!(
                        "✅ Configuration file edited successfully using '{}'",
                        editor_to_use
                    );
                }
                Ok(_) | Err(_) => {
                    eprintln!(
                        "⚠️  Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    );

                    let fallback_status = Command::new(&default_editor).arg(&path).status();
                    match fallback_status {
                        Ok(s) if s.success() => {
                            println!(
                                "✅ Configuration file edited successfully using fallback '{}'",
                                default_editor
                            );
                        }
                        Ok(_) | Err(_) => {
                            eprintln!(
                                "❌ Failed to edit configuration file using fallback '{}'",
                                default_editor
                            );
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
