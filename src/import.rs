// Billionaires Database - CSV Import
// Ingests the flat published dataset (one row per billionaire) into the
// normalized schema, resolving or creating the referenced country, city and
// company rows along the way. Duplicate ranks are skipped, not errors.

use crate::seed::{resolve_reference, RefKey, RefTable, SeedWarning};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

// ============================================================================
// RECORD
// ============================================================================

/// One row of the flat dataset. Field names follow the published CSV headers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillionaireRecord {
    #[serde(rename = "rank")]
    pub rank: i64,

    #[serde(rename = "finalWorth")]
    pub final_worth: f64,

    #[serde(rename = "personName")]
    pub person_name: String,

    #[serde(rename = "age", default)]
    pub age: Option<i64>,

    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,

    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,

    #[serde(rename = "birthDate", default)]
    pub birth_date: Option<String>,

    #[serde(rename = "gender", default)]
    pub gender: Option<String>,

    #[serde(rename = "countryOfCitizenship", default)]
    pub country_of_citizenship: Option<String>,

    // The dataset writes booleans as "True"/"False".
    #[serde(rename = "selfMade", default, deserialize_with = "de_opt_bool")]
    pub self_made: Option<bool>,

    #[serde(rename = "status", default)]
    pub status: Option<String>,

    #[serde(rename = "city", default)]
    pub city: Option<String>,

    #[serde(rename = "state", default)]
    pub state: Option<String>,

    #[serde(rename = "residenceStateRegion", default)]
    pub region: Option<String>,

    #[serde(rename = "country", default)]
    pub country: Option<String>,

    #[serde(rename = "source", default)]
    pub source: Option<String>,

    #[serde(rename = "organization", default)]
    pub organization: Option<String>,

    #[serde(rename = "category", default)]
    pub category: Option<String>,

    #[serde(rename = "industries", default)]
    pub industries: Option<String>,

    #[serde(rename = "title", default)]
    pub title: Option<String>,
}

/// Accepts True/False/true/false/1/0 and the empty cell.
fn de_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean '{}'",
                other
            ))),
        },
    }
}

impl BillionaireRecord {
    /// Day/month/year derived from birth_date. The dataset carries dates as
    /// either ISO (1964-01-12) or US-style (1/12/1964).
    fn birth_parts(&self) -> Option<(i64, i64, i64)> {
        let raw = self.birth_date.as_deref()?.trim();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
            .ok()?;
        Some((date.day() as i64, date.month() as i64, date.year() as i64))
    }
}

// ============================================================================
// LOADING
// ============================================================================

pub fn load_csv(csv_path: &Path) -> Result<Vec<BillionaireRecord>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: BillionaireRecord = result.context("Failed to deserialize record")?;
        records.push(record);
    }

    Ok(records)
}

/// Same as `load_csv` but over any reader, for callers that already hold the
/// bytes.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<BillionaireRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: BillionaireRecord = result.context("Failed to deserialize record")?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// IMPORT
// ============================================================================

/// Outcome of an import run.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub warnings: Vec<SeedWarning>,
}

/// Insert-or-lookup a country by name. Imported countries carry only their
/// name; indicator columns stay NULL until richer data lands.
fn ensure_country(conn: &Connection, name: &str) -> Result<i64> {
    if let Some(id) = resolve_reference(conn, RefTable::Country, &RefKey::Name(name))? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO country (country_name) VALUES (?1)",
        params![name],
    )?;
    Ok(conn.last_insert_rowid())
}

fn ensure_city(conn: &Connection, record: &BillionaireRecord, name: &str) -> Result<i64> {
    if let Some(id) = resolve_reference(conn, RefTable::City, &RefKey::Name(name))? {
        return Ok(id);
    }
    let country_id = match record.country.as_deref() {
        Some(country) => Some(ensure_country(conn, country)?),
        None => None,
    };
    conn.execute(
        "INSERT INTO city (city_name, state, region, country) VALUES (?1, ?2, ?3, ?4)",
        params![name, record.state, record.region, country_id],
    )?;
    Ok(conn.last_insert_rowid())
}

fn ensure_company(conn: &Connection, record: &BillionaireRecord, source: &str) -> Result<i64> {
    if let Some(id) = resolve_reference(conn, RefTable::Company, &RefKey::Name(source))? {
        return Ok(id);
    }
    conn.execute(
        "INSERT INTO company (source, organization, category, industries)
         VALUES (?1, ?2, ?3, ?4)",
        params![source, record.organization, record.category, record.industries],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Import flat records into the normalized tables. Referenced entities are
/// created on first sight; a rank already present counts as a duplicate and
/// the row is skipped.
pub fn import_records(conn: &Connection, records: &[BillionaireRecord]) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for record in records {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM billionaires WHERE rank = ?1",
            params![record.rank],
            |row| row.get(0),
        )?;
        if exists > 0 {
            report.duplicates += 1;
            continue;
        }

        // personal_info first; citizenship is stored by name, not FK.
        let (birth_day, birth_month, birth_year) = match record.birth_parts() {
            Some((d, m, y)) => (Some(d), Some(m), Some(y)),
            None => (None, None, None),
        };
        let (first_name, last_name) = names_of(record);
        conn.execute(
            "INSERT INTO personal_info (age, first_name, last_name, birth_date, birth_day,
                                        birth_month, birth_year, gender, country_of_citizenship)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.age,
                first_name,
                last_name,
                record.birth_date,
                birth_day,
                birth_month,
                birth_year,
                record.gender,
                record.country_of_citizenship,
            ],
        )?;
        let personal_id = conn.last_insert_rowid();

        let city_id = match record.city.as_deref() {
            Some(city) => Some(ensure_city(conn, record, city)?),
            None => {
                report.warnings.push(SeedWarning {
                    table: "city",
                    reference: "(none)".to_string(),
                    dependent: record.person_name.clone(),
                });
                None
            }
        };

        conn.execute(
            "INSERT INTO billionaires (rank, final_worth, person_name, self_made, status,
                                       city, personal_info)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.rank,
                record.final_worth,
                record.person_name,
                record.self_made.map(|b| b as i64),
                record.status,
                city_id,
                personal_id,
            ],
        )?;
        let billionaire_id = conn.last_insert_rowid();

        if let Some(source) = record.source.as_deref() {
            let company_id = ensure_company(conn, record, source)?;
            conn.execute(
                "INSERT INTO works (billionaire_id, company_id, title) VALUES (?1, ?2, ?3)",
                params![billionaire_id, company_id, record.title],
            )?;
        }

        report.inserted += 1;
    }

    println!("✓ Imported: {} billionaires", report.inserted);
    println!("✓ Skipped duplicates: {}", report.duplicates);

    Ok(report)
}

/// Split first/last name, preferring the explicit columns and falling back to
/// the full name. last_name is NOT NULL in the schema, so worst case the full
/// name lands there.
fn names_of(record: &BillionaireRecord) -> (String, String) {
    match (record.first_name.as_deref(), record.last_name.as_deref()) {
        (Some(first), Some(last)) => (first.to_string(), last.to_string()),
        _ => match record.person_name.split_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (String::new(), record.person_name.clone()),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================
