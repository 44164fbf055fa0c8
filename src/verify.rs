// Billionaires Database - Structural Verification
// Validates an existing database file: expected tables and columns, non-empty
// data, the dense-rank invariant, and orphaned foreign keys. Reports findings
// instead of failing fast, so one run surfaces every problem.

use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashSet;

/// One named verification check.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Full verification outcome.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub checks: Vec<Check>,
}

impl VerifyReport {
    pub fn ok(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }

    fn push(&mut self, name: impl Into<String>, passed: bool, detail: impl Into<String>) {
        self.checks.push(Check {
            name: name.into(),
            passed,
            detail: detail.into(),
        });
    }
}

const EXPECTED_TABLES: &[&str] = &[
    "billionaires",
    "personal_info",
    "city",
    "country",
    "economics",
    "company",
    "works",
];

// Columns the query layer depends on, per table.
const EXPECTED_COLUMNS: &[(&str, &[&str])] = &[
    ("billionaires", &["id", "rank", "final_worth", "person_name", "personal_info", "city"]),
    ("personal_info", &["id", "age", "first_name", "last_name", "country_of_citizenship"]),
    ("city", &["id", "city_name", "country"]),
    ("country", &["id", "country_name", "economics"]),
    ("economics", &["id", "gdp", "total_tax_rate"]),
    ("company", &["id", "source", "category"]),
    ("works", &["id", "billionaire_id", "company_id"]),
];

// (name, count query) pairs for orphaned FK detection.
const ORPHAN_CHECKS: &[(&str, &str)] = &[
    (
        "billionaires.city",
        "SELECT COUNT(*) FROM billionaires b
         WHERE b.city IS NOT NULL AND b.city NOT IN (SELECT id FROM city)",
    ),
    (
        "billionaires.personal_info",
        "SELECT COUNT(*) FROM billionaires b
         WHERE b.personal_info IS NOT NULL
           AND b.personal_info NOT IN (SELECT id FROM personal_info)",
    ),
    (
        "city.country",
        "SELECT COUNT(*) FROM city c
         WHERE c.country IS NOT NULL AND c.country NOT IN (SELECT id FROM country)",
    ),
    (
        "country.economics",
        "SELECT COUNT(*) FROM country c
         WHERE c.economics IS NOT NULL AND c.economics NOT IN (SELECT id FROM economics)",
    ),
    (
        "works.billionaire_id",
        "SELECT COUNT(*) FROM works w
         WHERE w.billionaire_id NOT IN (SELECT id FROM billionaires)",
    ),
    (
        "works.company_id",
        "SELECT COUNT(*) FROM works w
         WHERE w.company_id NOT IN (SELECT id FROM company)",
    ),
];

fn existing_tables(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(tables)
}

fn table_columns(conn: &Connection, table: &str) -> Result<HashSet<String>> {
    // Table names come from the fixed lists above.
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(columns)
}

/// Run every structural check against an open connection.
pub fn verify_database(conn: &Connection) -> Result<VerifyReport> {
    let mut report = VerifyReport::default();

    // Tables present.
    let tables = existing_tables(conn)?;
    for expected in EXPECTED_TABLES {
        let present = tables.contains(*expected);
        report.push(
            format!("table {}", expected),
            present,
            if present { "exists" } else { "missing" },
        );
    }
    if !report.ok() {
        // Column and data checks would all fail noisily on missing tables.
        return Ok(report);
    }

    // Columns present.
    for (table, expected_cols) in EXPECTED_COLUMNS {
        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = expected_cols
            .iter()
            .filter(|c| !columns.contains(**c))
            .copied()
            .collect();
        report.push(
            format!("columns of {}", table),
            missing.is_empty(),
            if missing.is_empty() {
                "all present".to_string()
            } else {
                format!("missing: {}", missing.join(", "))
            },
        );
    }

    // Tables non-empty.
    for table in EXPECTED_TABLES {
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        report.push(
            format!("data in {}", table),
            count > 0,
            format!("{} rows", count),
        );
    }

    // Dense rank: unique and contiguous from 1.
    let (total, distinct, min, max): (i64, i64, Option<i64>, Option<i64>) = conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT rank), MIN(rank), MAX(rank) FROM billionaires",
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
    )?;
    let dense = total > 0 && total == distinct && min == Some(1) && max == Some(total);
    report.push(
        "rank density",
        dense,
        format!(
            "{} rows, {} distinct ranks, range {:?}..{:?}",
            total, distinct, min, max
        ),
    );

    // Orphaned foreign keys.
    for (name, sql) in ORPHAN_CHECKS {
        let orphans: i64 = conn.query_row(sql, [], |row| row.get(0))?;
        report.push(
            format!("references {}", name),
            orphans == 0,
            format!("{} orphaned", orphans),
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::configure_connection;
    use crate::seed::create_database;

    fn seeded_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();
        create_database(&conn).unwrap();
        conn
    }

    #[test]
    fn test_seeded_database_passes() {
        let conn = seeded_connection();
        let report = verify_database(&conn).unwrap();

        assert!(
            report.ok(),
            "failures: {:?}",
            report.failures().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_table_fails() {
        let conn = seeded_connection();
        conn.execute("DROP TABLE works", []).unwrap();

        let report = verify_database(&conn).unwrap();
        assert!(!report.ok());
        assert!(report
            .failures()
            .any(|c| c.name == "table works" && c.detail == "missing"));
    }

    #[test]
    fn test_broken_rank_density_fails() {
        let conn = seeded_connection();
        conn.execute("UPDATE billionaires SET rank = 42 WHERE rank = 5", [])
            .unwrap();

        let report = verify_database(&conn).unwrap();
        assert!(report.failures().any(|c| c.name == "rank density"));
    }

    #[test]
    fn test_orphaned_reference_fails() {
        let conn = seeded_connection();
        // Detach under foreign_keys=ON would be rejected, so flip it off the
        // way a foreign tool writing the file might.
        conn.pragma_update(None, "foreign_keys", "OFF").unwrap();
        conn.execute("DELETE FROM city WHERE city_name = 'Seattle'", [])
            .unwrap();

        let report = verify_database(&conn).unwrap();
        assert!(report
            .failures()
            .any(|c| c.name == "references billionaires.city"));
    }
}
