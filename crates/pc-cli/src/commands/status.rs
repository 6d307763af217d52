//! Status command for showing where data lives and what has been completed.

use std::io::Write;

use anyhow::Result;

use pc_core::completion::completion_prefix;
use pc_db::Database;

use crate::Config;

pub fn run<W: Write>(writer: &mut W, db: &Database, config: &Config) -> Result<()> {
    let prefix = completion_prefix(&config.namespace);
    let entries = db.list_prefix(&prefix)?;

    writeln!(writer, "Program coach status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;

    if entries.is_empty() {
        writeln!(writer, "No days completed yet.")?;
        return Ok(());
    }

    writeln!(writer, "Completed:")?;
    for entry in entries {
        let day = entry.key.strip_prefix(&prefix).unwrap_or(&entry.key);
        writeln!(writer, "- {day}: {}", entry.value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    #[test]
    fn status_command_lists_completed_days() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("pc.db");
        let mut db = Database::open(&db_path).unwrap();
        db.set_value("pc:done:w2:Day 1 - Push", "2025-01-08T06:00:00.000Z")
            .unwrap();
        db.set_value("pc:done:w1:Day 1 - Push", "2025-01-01T06:00:00.000Z")
            .unwrap();
        db.set_value("pc:lastWeek", "2").unwrap();
        db.set_value("other:done:w1:Day 1 - Push", "2025-01-01T06:00:00.000Z")
            .unwrap();

        let config = Config {
            database_path: db_path.clone(),
            ..Config::default()
        };
        let mut output = Vec::new();
        run(&mut output, &db, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&db_path.display().to_string(), "[TEMP]/pc.db");
        assert_snapshot!(output, @r"
        Program coach status
        Database: [TEMP]/pc.db
        Completed:
        - w1:Day 1 - Push: 2025-01-01T06:00:00.000Z
        - w2:Day 1 - Push: 2025-01-08T06:00:00.000Z
        ");
    }

    #[test]
    fn status_command_without_completions() {
        let db = Database::open_in_memory().unwrap();
        let config = Config::default();
        let mut output = Vec::new();
        run(&mut output, &db, &config).unwrap();
        assert!(
            String::from_utf8(output)
                .unwrap()
                .ends_with("No days completed yet.\n")
        );
    }
}
