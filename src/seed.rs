// Billionaires Database - Schema & Seed Builder
// Creates the normalized tables and inserts the fixed sample rows, resolving
// cross-table references by name lookup. Missing references warn and continue;
// seeding never aborts mid-run.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

// ============================================================================
// REFERENCE RESOLVER
// ============================================================================

/// Tables a seed-time reference can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTable {
    Economics,
    Country,
    City,
    PersonalInfo,
    Billionaire,
    Company,
}

impl RefTable {
    pub fn name(&self) -> &'static str {
        match self {
            RefTable::Economics => "economics",
            RefTable::Country => "country",
            RefTable::City => "city",
            RefTable::PersonalInfo => "personal_info",
            RefTable::Billionaire => "billionaires",
            RefTable::Company => "company",
        }
    }

    /// Column a human-readable name lookup matches against. Tables keyed only
    /// by id have no natural-name column.
    fn name_column(&self) -> Option<&'static str> {
        match self {
            RefTable::Country => Some("country_name"),
            RefTable::City => Some("city_name"),
            RefTable::Company => Some("source"),
            RefTable::Billionaire => Some("person_name"),
            RefTable::Economics | RefTable::PersonalInfo => None,
        }
    }
}

/// A lookup key for a referenced row: either its id or its natural name.
#[derive(Debug, Clone)]
pub enum RefKey<'a> {
    Id(i64),
    Name(&'a str),
}

impl std::fmt::Display for RefKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefKey::Id(id) => write!(f, "id {}", id),
            RefKey::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Resolve a reference to a row identifier. Returns `Ok(None)` when no row
/// matches; absence is the caller's decision to handle, never an error here.
pub fn resolve_reference(
    conn: &Connection,
    table: RefTable,
    key: &RefKey<'_>,
) -> Result<Option<i64>> {
    // Table and column names come from the enums above, never from input.
    let sql = match (&key, table.name_column()) {
        (RefKey::Id(_), _) => format!("SELECT id FROM {} WHERE id = ?1", table.name()),
        (RefKey::Name(_), Some(col)) => {
            format!("SELECT id FROM {} WHERE {} = ?1", table.name(), col)
        }
        (RefKey::Name(name), None) => {
            anyhow::bail!("table {} has no name column (lookup '{}')", table.name(), name)
        }
    };

    let id = match key {
        RefKey::Id(id) => conn
            .query_row(&sql, params![id], |row| row.get::<_, i64>(0))
            .optional(),
        RefKey::Name(name) => conn
            .query_row(&sql, params![name], |row| row.get::<_, i64>(0))
            .optional(),
    }
    .with_context(|| format!("lookup failed on table {}", table.name()))?;

    Ok(id)
}

/// Diagnostic recorded when a reference could not be resolved at seed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedWarning {
    /// Table the unresolved reference points at.
    pub table: &'static str,
    /// The key that failed to resolve.
    pub reference: String,
    /// The dependent row the NULL (or skip) lands on.
    pub dependent: String,
}

impl std::fmt::Display for SeedWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "⚠️  Warning: {} {} not found for {}, using NULL",
            self.table, self.reference, self.dependent
        )
    }
}

/// Resolve a reference for a dependent row, pushing a warning on a miss.
fn resolve_or_warn(
    conn: &Connection,
    table: RefTable,
    key: RefKey<'_>,
    dependent: &str,
    warnings: &mut Vec<SeedWarning>,
) -> Result<Option<i64>> {
    let id = resolve_reference(conn, table, &key)?;
    if id.is_none() {
        let warning = SeedWarning {
            table: table.name(),
            reference: key.to_string(),
            dependent: dependent.to_string(),
        };
        eprintln!("{}", warning);
        warnings.push(warning);
    }
    Ok(id)
}

// ============================================================================
// SEED REPORT
// ============================================================================

/// Outcome of a full seed run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub economics: usize,
    pub personal_info: usize,
    pub companies: usize,
    pub countries: usize,
    pub cities: usize,
    pub billionaires: usize,
    pub works: usize,
    pub warnings: Vec<SeedWarning>,
}

impl SeedReport {
    pub fn total_rows(&self) -> usize {
        self.economics
            + self.personal_info
            + self.companies
            + self.countries
            + self.cities
            + self.billionaires
            + self.works
    }
}

// ============================================================================
// TABLE BUILDERS
// Ordered so every referenced table exists before its dependents:
// economics / personal_info / company, then country, city, billionaires, works.
// ============================================================================

pub fn seed_economics(conn: &Connection) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS economics (
            id INTEGER PRIMARY KEY,
            cpi REAL,
            cpi_change REAL,
            gdp REAL,
            tax_revenue REAL,
            total_tax_rate REAL
        )",
        [],
    )?;

    let economics_data: &[(i64, f64, f64, f64, f64, f64)] = &[
        (1, 258.811, 4.7, 21_427_700_000_000.0, 25.6, 36.6), // United States
        (2, 110.0, 1.1, 2_715_518_000_000.0, 46.2, 60.7),    // France
        (3, 107.0, 2.0, 14_722_730_697_890.0, 22.1, 59.2),   // China
        (4, 155.0, 6.2, 2_875_142_000_000.0, 17.7, 49.2),    // India
        (5, 107.0, 3.4, 1_269_956_000_000.0, 16.2, 51.7),    // Mexico
        (6, 106.0, 0.9, 2_827_113_000_000.0, 32.5, 30.0),    // United Kingdom
        (7, 103.5, 1.8, 1_394_116_000_000.0, 37.2, 47.0),    // Spain
        (8, 102.8, 1.2, 2_003_576_000_000.0, 42.4, 59.1),    // Italy
        (9, 141.6, 3.4, 1_736_426_000_000.0, 38.4, 20.8),    // Canada
        (10, 145.7, 4.5, 1_839_758_000_000.0, 32.3, 65.0),   // Brazil
    ];

    for row in economics_data {
        conn.execute(
            "INSERT INTO economics (id, cpi, cpi_change, gdp, tax_revenue, total_tax_rate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![row.0, row.1, row.2, row.3, row.4, row.5],
        )?;
    }

    println!("✓ economics table created with {} records", economics_data.len());
    Ok(economics_data.len())
}

pub fn seed_personal_info(conn: &Connection) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS personal_info (
            id INTEGER PRIMARY KEY,
            age INTEGER,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT,
            birth_day INTEGER,
            birth_month INTEGER,
            birth_year INTEGER,
            gender TEXT,
            country_of_citizenship TEXT
        )",
        [],
    )?;

    let personal_data: &[(i64, i64, &str, &str, &str, i64, i64, i64, &str, &str)] = &[
        (1, 57, "Jeff", "Bezos", "1964-01-12", 12, 1, 1964, "M", "United States"),
        (2, 50, "Elon", "Musk", "1971-06-28", 28, 6, 1971, "M", "United States"),
        (3, 72, "Bernard", "Arnault", "1949-03-05", 5, 3, 1949, "M", "France"),
        (4, 66, "Bill", "Gates", "1955-10-28", 28, 10, 1955, "M", "United States"),
        (5, 37, "Mark", "Zuckerberg", "1984-05-14", 14, 5, 1984, "M", "United States"),
        (6, 91, "Warren", "Buffett", "1930-08-30", 30, 8, 1930, "M", "United States"),
        (7, 64, "Mukesh", "Ambani", "1957-04-19", 19, 4, 1957, "M", "India"),
        (8, 81, "Carlos", "Slim Helu", "1940-01-28", 28, 1, 1940, "M", "Mexico"),
        (9, 48, "Larry", "Page", "1973-03-26", 26, 3, 1973, "M", "United States"),
        (10, 48, "Sergey", "Brin", "1973-08-21", 21, 8, 1973, "M", "United States"),
    ];

    for row in personal_data {
        conn.execute(
            "INSERT INTO personal_info (id, age, first_name, last_name, birth_date,
                                        birth_day, birth_month, birth_year, gender,
                                        country_of_citizenship)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![row.0, row.1, row.2, row.3, row.4, row.5, row.6, row.7, row.8, row.9],
        )?;
    }

    println!("✓ personal_info table created with {} records", personal_data.len());
    Ok(personal_data.len())
}

pub fn seed_companies(conn: &Connection) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS company (
            id INTEGER PRIMARY KEY,
            source TEXT NOT NULL UNIQUE,
            organization TEXT,
            category TEXT,
            industries TEXT
        )",
        [],
    )?;

    let company_data: &[(i64, &str, &str, &str, &str)] = &[
        (1, "Amazon", "Amazon.com Inc.", "Technology", "E-commerce, Cloud Computing"),
        (2, "Microsoft", "Microsoft Corporation", "Technology", "Software, Cloud Computing"),
        (3, "Tesla", "Tesla Inc.", "Automotive", "Electric Vehicles, Clean Energy"),
        (4, "LVMH", "LVMH Moët Hennessy Louis Vuitton", "Fashion & Retail", "Luxury Goods"),
        (5, "Berkshire Hathaway", "Berkshire Hathaway Inc.", "Finance & Investments", "Diversified Holdings"),
        (6, "Reliance Industries", "Reliance Industries Limited", "Diversified", "Energy, Retail, Telecom"),
        (7, "Grupo Carso", "Grupo Carso S.A.B. de C.V.", "Diversified", "Industrial, Retail, Infrastructure"),
        (8, "Facebook", "Meta Platforms Inc.", "Technology", "Social Media, Internet"),
        (9, "Google", "Alphabet Inc.", "Technology", "Internet, Software"),
        (10, "Oracle", "Oracle Corporation", "Technology", "Software, Cloud Computing"),
    ];

    for row in company_data {
        conn.execute(
            "INSERT INTO company (id, source, organization, category, industries)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![row.0, row.1, row.2, row.3, row.4],
        )?;
    }

    println!("✓ company table created with {} records", company_data.len());
    Ok(company_data.len())
}

pub fn seed_countries(conn: &Connection, warnings: &mut Vec<SeedWarning>) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS country (
            id INTEGER PRIMARY KEY,
            country_name TEXT NOT NULL UNIQUE,
            gross_tertiary_education REAL,
            gross_primary_education REAL,
            life_expectancy REAL,
            population INTEGER,
            latitude REAL,
            longitude REAL,
            economics INTEGER,
            FOREIGN KEY (economics) REFERENCES economics(id)
        )",
        [],
    )?;

    // (name, tertiary, primary, life expectancy, population, lat, long, economics id)
    let country_data: &[(&str, f64, f64, f64, i64, f64, f64, i64)] = &[
        ("United States", 88.2, 101.5, 78.9, 331_002_651, 37.09024, -95.712891, 1),
        ("France", 65.9, 102.3, 82.7, 65_273_511, 46.227638, 2.213749, 2),
        ("China", 51.0, 104.2, 76.9, 1_439_323_776, 35.86166, 104.195397, 3),
        ("India", 28.1, 112.8, 69.7, 1_380_004_385, 20.593684, 78.96288, 4),
        ("Mexico", 38.4, 104.8, 75.1, 128_932_753, 23.634501, -102.552784, 5),
        ("United Kingdom", 60.0, 106.5, 81.3, 67_886_011, 55.378051, -3.435973, 6),
        ("Spain", 89.5, 105.2, 83.6, 46_754_778, 40.463667, -3.74922, 7),
        ("Italy", 63.8, 101.1, 83.5, 60_461_826, 41.87194, 12.56738, 8),
        ("Canada", 71.3, 101.8, 82.3, 37_742_154, 56.130366, -106.346771, 9),
        ("Brazil", 51.3, 107.2, 75.9, 212_559_417, -14.235004, -51.92528, 10),
    ];

    for row in country_data {
        let economics_id = resolve_or_warn(
            conn,
            RefTable::Economics,
            RefKey::Id(row.7),
            row.0,
            warnings,
        )?;

        conn.execute(
            "INSERT INTO country (country_name, gross_tertiary_education, gross_primary_education,
                                  life_expectancy, population, latitude, longitude, economics)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![row.0, row.1, row.2, row.3, row.4, row.5, row.6, economics_id],
        )?;
    }

    println!("✓ country table created with {} records", country_data.len());
    Ok(country_data.len())
}

pub fn seed_cities(conn: &Connection, warnings: &mut Vec<SeedWarning>) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS city (
            id INTEGER PRIMARY KEY,
            city_name TEXT NOT NULL,
            state TEXT,
            region TEXT,
            country INTEGER,
            FOREIGN KEY (country) REFERENCES country(id)
        )",
        [],
    )?;

    // (city, state, region, country name for lookup)
    let city_data: &[(&str, &str, &str, &str)] = &[
        ("New York", "New York", "Northeast", "United States"),
        ("Seattle", "Washington", "Northwest", "United States"),
        ("Omaha", "Nebraska", "Midwest", "United States"),
        ("Los Angeles", "California", "West", "United States"),
        ("Austin", "Texas", "South", "United States"),
        ("Paris", "Ile-de-France", "Europe", "France"),
        ("Hong Kong", "Hong Kong", "Asia", "China"),
        ("Shanghai", "Shanghai", "Asia", "China"),
        ("Mumbai", "Maharashtra", "Asia", "India"),
        ("Mexico City", "CDMX", "Latin America", "Mexico"),
        ("London", "England", "Europe", "United Kingdom"),
        ("Madrid", "Madrid", "Europe", "Spain"),
        ("Milan", "Lombardy", "Europe", "Italy"),
        ("Toronto", "Ontario", "North America", "Canada"),
        ("Sao Paulo", "Sao Paulo", "South America", "Brazil"),
    ];

    for row in city_data {
        let country_id =
            resolve_or_warn(conn, RefTable::Country, RefKey::Name(row.3), row.0, warnings)?;

        conn.execute(
            "INSERT INTO city (city_name, state, region, country)
             VALUES (?1, ?2, ?3, ?4)",
            params![row.0, row.1, row.2, country_id],
        )?;
    }

    println!("✓ city table created with {} records", city_data.len());
    Ok(city_data.len())
}

pub fn seed_billionaires(conn: &Connection, warnings: &mut Vec<SeedWarning>) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS billionaires (
            id INTEGER PRIMARY KEY,
            rank INTEGER NOT NULL UNIQUE,
            final_worth REAL NOT NULL,
            person_name TEXT NOT NULL,
            self_made INTEGER,
            status TEXT,
            city INTEGER,
            personal_info INTEGER,
            FOREIGN KEY (city) REFERENCES city(id),
            FOREIGN KEY (personal_info) REFERENCES personal_info(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_billionaires_rank ON billionaires(rank)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_billionaires_person_name ON billionaires(person_name)",
        [],
    )?;

    // (id, rank, worth, name, self made, status, city name for lookup, personal id)
    let billionaire_data: &[(i64, i64, f64, &str, i64, &str, &str, i64)] = &[
        (1, 1, 177_000.0, "Jeff Bezos", 1, "D", "Seattle", 1),
        (2, 2, 151_000.0, "Elon Musk", 1, "D", "Austin", 2),
        (3, 3, 150_000.0, "Bernard Arnault", 1, "D", "Paris", 3),
        (4, 4, 124_000.0, "Bill Gates", 1, "D", "Seattle", 4),
        (5, 5, 97_000.0, "Mark Zuckerberg", 1, "D", "New York", 5),
        (6, 6, 96_000.0, "Warren Buffett", 1, "D", "Omaha", 6),
        (7, 7, 84_500.0, "Mukesh Ambani", 1, "D", "Mumbai", 7),
        (8, 8, 62_800.0, "Carlos Slim Helu", 1, "D", "Mexico City", 8),
        (9, 9, 55_000.0, "Larry Page", 1, "D", "Los Angeles", 9),
        (10, 10, 53_000.0, "Sergey Brin", 1, "D", "Los Angeles", 10),
    ];

    for row in billionaire_data {
        let city_id =
            resolve_or_warn(conn, RefTable::City, RefKey::Name(row.6), row.3, warnings)?;
        let personal_id = resolve_or_warn(
            conn,
            RefTable::PersonalInfo,
            RefKey::Id(row.7),
            row.3,
            warnings,
        )?;

        conn.execute(
            "INSERT INTO billionaires (id, rank, final_worth, person_name, self_made,
                                       status, city, personal_info)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![row.0, row.1, row.2, row.3, row.4, row.5, city_id, personal_id],
        )?;
    }

    println!(
        "✓ billionaires table created with {} records",
        billionaire_data.len()
    );
    Ok(billionaire_data.len())
}

pub fn seed_works(conn: &Connection, warnings: &mut Vec<SeedWarning>) -> Result<usize> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS works (
            id INTEGER PRIMARY KEY,
            billionaire_id INTEGER NOT NULL,
            company_id INTEGER NOT NULL,
            title TEXT,
            FOREIGN KEY (billionaire_id) REFERENCES billionaires(id),
            FOREIGN KEY (company_id) REFERENCES company(id)
        )",
        [],
    )?;

    // (id, billionaire id, company id, title)
    let works_data: &[(i64, i64, i64, &str)] = &[
        (1, 1, 1, "CEO and Founder"),
        (2, 2, 3, "CEO and Product Architect"),
        (3, 3, 4, "Chairman and CEO"),
        (4, 4, 2, "Co-Founder and Former CEO"),
        (5, 5, 8, "Chairman and CEO"),
        (6, 6, 5, "Chairman and CEO"),
        (7, 7, 6, "Chairman and Managing Director"),
        (8, 8, 7, "Chairman"),
        (9, 9, 9, "Co-Founder"),
        (10, 10, 9, "Co-Founder"),
    ];

    let mut inserted = 0;
    for row in works_data {
        // Both columns are NOT NULL, so an unresolved side skips the row
        // instead of inserting a NULL.
        let billionaire_id = resolve_or_warn(
            conn,
            RefTable::Billionaire,
            RefKey::Id(row.1),
            &format!("works record {}", row.0),
            warnings,
        )?;
        let company_id = resolve_or_warn(
            conn,
            RefTable::Company,
            RefKey::Id(row.2),
            &format!("works record {}", row.0),
            warnings,
        )?;

        let (Some(billionaire_id), Some(company_id)) = (billionaire_id, company_id) else {
            continue;
        };

        conn.execute(
            "INSERT INTO works (id, billionaire_id, company_id, title)
             VALUES (?1, ?2, ?3, ?4)",
            params![row.0, billionaire_id, company_id, row.3],
        )?;
        inserted += 1;
    }

    println!("✓ works table created with {} records", inserted);
    Ok(inserted)
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Create and populate the full database. Base tables first, then dependents,
/// junction table last. Unresolved references downgrade to NULL-plus-warning;
/// the run itself always completes.
pub fn create_database(conn: &Connection) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    report.economics = seed_economics(conn)?;
    report.personal_info = seed_personal_info(conn)?;
    report.companies = seed_companies(conn)?;

    report.countries = seed_countries(conn, &mut report.warnings)?;
    report.cities = seed_cities(conn, &mut report.warnings)?;

    report.billionaires = seed_billionaires(conn, &mut report.warnings)?;
    report.works = seed_works(conn, &mut report.warnings)?;

    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::configure_connection;

    fn seeded_connection() -> (Connection, SeedReport) {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();
        let report = create_database(&conn).unwrap();
        (conn, report)
    }

    #[test]
    fn test_full_seed_counts() {
        let (conn, report) = seeded_connection();

        assert_eq!(report.economics, 10);
        assert_eq!(report.personal_info, 10);
        assert_eq!(report.companies, 10);
        assert_eq!(report.countries, 10);
        assert_eq!(report.cities, 15);
        assert_eq!(report.billionaires, 10);
        assert_eq!(report.works, 10);
        assert!(report.warnings.is_empty(), "clean seed should not warn");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM billionaires", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 10);
    }

    #[test]
    fn test_rank_is_dense_and_unique() {
        let (conn, _) = seeded_connection();

        let (total, distinct, max): (i64, i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT rank), MAX(rank) FROM billionaires",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(total, distinct);
        assert_eq!(total, max);
    }

    #[test]
    fn test_resolver_hit_and_miss() {
        let (conn, _) = seeded_connection();

        let id = resolve_reference(&conn, RefTable::Country, &RefKey::Name("France"))
            .unwrap()
            .expect("France is seeded");
        assert!(id > 0);

        let missing =
            resolve_reference(&conn, RefTable::Country, &RefKey::Name("Atlantis")).unwrap();
        assert_eq!(missing, None);

        let by_id = resolve_reference(&conn, RefTable::Economics, &RefKey::Id(999)).unwrap();
        assert_eq!(by_id, None);
    }

    #[test]
    fn test_missing_country_leaves_null_fk_and_warns_once() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        // Country table exists but is empty, so every city lookup misses.
        conn.execute(
            "CREATE TABLE country (id INTEGER PRIMARY KEY, country_name TEXT NOT NULL UNIQUE)",
            [],
        )
        .unwrap();

        let mut warnings = Vec::new();
        let inserted = seed_cities(&conn, &mut warnings).unwrap();

        assert_eq!(inserted, 15, "seed run completes despite misses");
        assert_eq!(warnings.len(), 15, "one warning per unresolved city");
        assert!(warnings
            .iter()
            .any(|w| w.table == "country" && w.reference.contains("United States")));

        let null_fks: i64 = conn
            .query_row("SELECT COUNT(*) FROM city WHERE country IS NULL", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(null_fks, 15);
    }

    #[test]
    fn test_works_skips_rows_with_unresolved_sides() {
        let conn = Connection::open_in_memory().unwrap();
        configure_connection(&conn).unwrap();

        // Companies exist, billionaires table is empty: every junction row
        // must be skipped, not inserted with NULLs.
        seed_companies(&conn).unwrap();
        conn.execute(
            "CREATE TABLE billionaires (id INTEGER PRIMARY KEY, rank INTEGER NOT NULL UNIQUE,
             final_worth REAL NOT NULL, person_name TEXT NOT NULL, self_made INTEGER,
             status TEXT, city INTEGER, personal_info INTEGER)",
            [],
        )
        .unwrap();

        let mut warnings = Vec::new();
        let inserted = seed_works(&conn, &mut warnings).unwrap();

        assert_eq!(inserted, 0);
        assert_eq!(warnings.len(), 10);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM works", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_name_lookup_on_id_only_table_is_an_error() {
        let (conn, _) = seeded_connection();
        let result = resolve_reference(&conn, RefTable::Economics, &RefKey::Name("whatever"));
        assert!(result.is_err());
    }
}
