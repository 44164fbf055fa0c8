use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use billionaires_db::{
    create_database, import_records, load_csv, verify_database, Database, DEFAULT_DB_PATH,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("seed") => run_seed(args.get(2).map(String::as_str)),
        Some("import") => match args.get(2) {
            Some(csv_path) => run_import(csv_path, args.get(3).map(String::as_str)),
            None => {
                eprintln!("❌ import requires a CSV path");
                print_usage();
                std::process::exit(1);
            }
        },
        Some("verify") => run_verify(args.get(2).map(String::as_str)),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Billionaires Database");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Usage:");
    println!("  billionaires-db seed [db-path]          create and populate the sample database");
    println!("  billionaires-db import <csv> [db-path]  import a flat dataset CSV");
    println!("  billionaires-db verify [db-path]        check structure and integrity");
    println!();
    println!("Default database path: {}", DEFAULT_DB_PATH);
    println!("API server: cargo run --bin billionaires-server --features server");
}

fn run_seed(db_path: Option<&str>) -> Result<()> {
    let db_path = db_path.unwrap_or(DEFAULT_DB_PATH);

    println!("🗄️  Creating database: {}", db_path);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Start from a clean file so reruns do not accumulate rows.
    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("Removed existing {}", db_path);
    }

    let db = Database::new(db_path);
    let conn = db.connect_for_tooling()?;

    let report = create_database(&conn)?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✅ Database created with {} rows total", report.total_rows());
    if !report.warnings.is_empty() {
        println!("⚠️  {} unresolved references (left NULL)", report.warnings.len());
    }
    println!();
    println!("To verify: billionaires-db verify {}", db_path);

    Ok(())
}

fn run_import(csv_path: &str, db_path: Option<&str>) -> Result<()> {
    let db_path = db_path.unwrap_or(DEFAULT_DB_PATH);
    let db = Database::new(db_path);

    if !db.exists() {
        bail!(
            "database not found at {} - run `billionaires-db seed` first",
            db_path
        );
    }

    println!("📂 Loading CSV: {}", csv_path);
    let records = load_csv(Path::new(csv_path))?;
    println!("✓ Loaded {} records from CSV", records.len());

    let conn = db.connect_for_tooling()?;
    let report = import_records(&conn, &records)?;

    if !report.warnings.is_empty() {
        println!("⚠️  {} rows imported with unresolved references", report.warnings.len());
    }

    Ok(())
}

fn run_verify(db_path: Option<&str>) -> Result<()> {
    let db_path = db_path.unwrap_or(DEFAULT_DB_PATH);
    let db = Database::new(db_path);

    println!("🔍 Verifying database: {}", db_path);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if !db.exists() {
        eprintln!("❌ Database file not found: {}", db_path);
        std::process::exit(1);
    }

    let conn = db.connect_for_tooling()?;
    let report = verify_database(&conn)?;

    for check in &report.checks {
        let mark = if check.passed { "✓" } else { "❌" };
        println!("{} {}: {}", mark, check.name, check.detail);
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if report.ok() {
        println!("✅ Database structure verified");
        Ok(())
    } else {
        let failures = report.failures().count();
        eprintln!("❌ {} check(s) failed", failures);
        std::process::exit(1);
    }
}
