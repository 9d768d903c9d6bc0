use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// ANSI color per logged operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "program_add" | "member_add" => Colour::Green,
        "program_del" | "member_del" => Colour::Red,
        "member_edit" => Colour::Yellow,
        "mark" => Colour::Cyan,
        "export" | "backup" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target, message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("Internal log is empty.");
            return Ok(());
        }

        // Truncate long op+target labels before colorizing, so padding is
        // computed on visible characters only.
        let labels: Vec<String> = entries
            .iter()
            .map(|(_, _, operation, target, _)| {
                let label = if target.is_empty() {
                    operation.clone()
                } else {
                    format!("{operation} ({target})")
                };
                if label.len() > 40 {
                    let mut s = label.chars().take(37).collect::<String>();
                    s.push_str("...");
                    s
                } else {
                    label
                }
            })
            .collect();

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);
        let op_w = labels.iter().map(|l| l.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for ((id, date, operation, _, message), label) in entries.iter().zip(labels) {
            let color = color_for_operation(operation);

            // Only the operation word is colored; the target stays plain.
            let colored = if let Some((op_word, rest)) = label.split_once(' ') {
                format!("{} {}", color.paint(op_word), rest)
            } else {
                color.paint(label.as_str()).to_string()
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).len()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
