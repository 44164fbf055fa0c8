// Billionaires Database - Aggregate/Statistics Queries
// GROUP BY rollups over the seeded tables. Every call recomputes from a full
// scan; the dataset is small and written once.

use crate::db::QueryError;
use rusqlite::{params, Connection};
use serde::Serialize;

// ============================================================================
// ROW TYPES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub country_name: Option<String>,
    pub billionaire_count: i64,
    pub avg_worth: Option<f64>,
    pub total_worth: Option<f64>,
    pub population: Option<i64>,
    pub life_expectancy: Option<f64>,
    pub gdp: Option<f64>,
    pub cpi: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryStat {
    pub category: Option<String>,
    pub industries: Option<String>,
    pub billionaire_count: i64,
    pub avg_worth: Option<f64>,
    pub total_worth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryCount {
    pub category: Option<String>,
    pub billionaire_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStat {
    pub city_name: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub billionaire_count: i64,
    pub avg_worth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStat {
    pub source: String,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub industries: Option<String>,
    pub billionaire_count: i64,
    pub total_worth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_billionaires: i64,
    pub avg_worth: Option<f64>,
    pub max_worth: Option<f64>,
    pub min_worth: Option<f64>,
    pub total_worth: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderCount {
    pub gender: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfMadeCount {
    pub self_made: Option<bool>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeStats {
    pub avg_age: Option<f64>,
    pub max_age: Option<i64>,
    pub min_age: Option<i64>,
}

/// Combined payload for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub overall: OverallStats,
    pub gender_distribution: Vec<GenderCount>,
    pub self_made_distribution: Vec<SelfMadeCount>,
    pub age_statistics: AgeStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBandCount {
    pub age_group: String,
    pub count: i64,
    pub avg_worth: Option<f64>,
}

// ============================================================================
// AGE BANDS
// ============================================================================

/// One decade band of the age histogram. Bounds are [min, max): `min` is
/// inclusive, `max` exclusive; either side open at the edges.
#[derive(Debug, Clone, Copy)]
pub struct AgeBand {
    pub label: &'static str,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// The enumerated band boundary table for the age histogram.
pub const AGE_BANDS: &[AgeBand] = &[
    AgeBand { label: "Under 30", min: None, max: Some(30) },
    AgeBand { label: "30-39", min: Some(30), max: Some(40) },
    AgeBand { label: "40-49", min: Some(40), max: Some(50) },
    AgeBand { label: "50-59", min: Some(50), max: Some(60) },
    AgeBand { label: "60-69", min: Some(60), max: Some(70) },
    AgeBand { label: "70-79", min: Some(70), max: Some(80) },
    AgeBand { label: "80+", min: Some(80), max: None },
];

/// Build the CASE expression mapping an age to its band label. Labels and
/// bounds come from the fixed table above, never from input.
fn age_band_case() -> String {
    let mut case = String::from("CASE");
    for band in AGE_BANDS {
        match (band.min, band.max) {
            (None, Some(max)) => {
                case.push_str(&format!(" WHEN p.age < {} THEN '{}'", max, band.label))
            }
            (Some(min), Some(max)) => case.push_str(&format!(
                " WHEN p.age >= {} AND p.age < {} THEN '{}'",
                min, max, band.label
            )),
            (Some(min), None) => {
                case.push_str(&format!(" WHEN p.age >= {} THEN '{}'", min, band.label))
            }
            (None, None) => unreachable!("open band on both sides"),
        }
    }
    case.push_str(" END");
    case
}

/// Build the CASE expression ordering band labels by table index, so the
/// histogram comes back in band order regardless of counts.
fn age_band_order() -> String {
    let mut case = String::from("CASE age_group");
    for (i, band) in AGE_BANDS.iter().enumerate() {
        case.push_str(&format!(" WHEN '{}' THEN {}", band.label, i));
    }
    case.push_str(" END");
    case
}

// ============================================================================
// AGGREGATE QUERIES
// ============================================================================

/// Per-citizenship-country count and wealth rollup, joined to country and
/// economics context. Ties on count break on country name to keep the output
/// deterministic.
pub fn country_stats(conn: &Connection) -> Result<Vec<CountryStat>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT p.country_of_citizenship AS country_name,
                COUNT(*) AS billionaire_count,
                AVG(b.final_worth) AS avg_worth,
                SUM(b.final_worth) AS total_worth,
                co.population, co.life_expectancy, e.gdp, e.cpi
         FROM personal_info p
         JOIN billionaires b ON b.personal_info = p.id
         LEFT JOIN country co ON co.country_name = p.country_of_citizenship
         LEFT JOIN economics e ON co.economics = e.id
         GROUP BY p.country_of_citizenship
         ORDER BY billionaire_count DESC, country_name ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CountryStat {
                country_name: row.get(0)?,
                billionaire_count: row.get(1)?,
                avg_worth: row.get(2)?,
                total_worth: row.get(3)?,
                population: row.get(4)?,
                life_expectancy: row.get(5)?,
                gdp: row.get(6)?,
                cpi: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Per category+industries rollup over billionaires linked through works.
pub fn industry_stats(conn: &Connection) -> Result<Vec<IndustryStat>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT c.category, c.industries,
                COUNT(DISTINCT b.rank) AS billionaire_count,
                AVG(b.final_worth) AS avg_worth,
                SUM(b.final_worth) AS total_worth
         FROM company c
         JOIN works w ON w.company_id = c.id
         JOIN billionaires b ON w.billionaire_id = b.id
         GROUP BY c.category, c.industries
         ORDER BY billionaire_count DESC, c.category ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(IndustryStat {
                category: row.get(0)?,
                industries: row.get(1)?,
                billionaire_count: row.get(2)?,
                avg_worth: row.get(3)?,
                total_worth: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Categories with more than `min_count` distinct billionaires.
pub fn industries_with_min_count(
    conn: &Connection,
    min_count: i64,
) -> Result<Vec<IndustryCount>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT c.category, COUNT(DISTINCT b.rank) AS billionaire_count
         FROM company c
         JOIN works w ON w.company_id = c.id
         JOIN billionaires b ON w.billionaire_id = b.id
         GROUP BY c.category
         HAVING COUNT(DISTINCT b.rank) > ?1
         ORDER BY billionaire_count DESC, c.category ASC",
    )?;

    let rows = stmt
        .query_map(params![min_count], |row| {
            Ok(IndustryCount {
                category: row.get(0)?,
                billionaire_count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Per-residence-city rollup.
pub fn city_stats(conn: &Connection) -> Result<Vec<CityStat>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT ct.city_name, ct.state, ct.region,
                COUNT(*) AS billionaire_count,
                AVG(b.final_worth) AS avg_worth
         FROM billionaires b
         LEFT JOIN city ct ON b.city = ct.id
         GROUP BY ct.city_name, ct.state, ct.region
         ORDER BY billionaire_count DESC, city_name ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CityStat {
                city_name: row.get(0)?,
                state: row.get(1)?,
                region: row.get(2)?,
                billionaire_count: row.get(3)?,
                avg_worth: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Per-company rollup. LEFT JOIN keeps companies with no linked billionaire,
/// reported with count 0 and NULL worth.
pub fn company_stats(conn: &Connection) -> Result<Vec<CompanyStat>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT c.source, c.organization, c.category, c.industries,
                COUNT(b.rank) AS billionaire_count,
                SUM(b.final_worth) AS total_worth
         FROM company c
         LEFT JOIN works w ON w.company_id = c.id
         LEFT JOIN billionaires b ON w.billionaire_id = b.id
         GROUP BY c.source, c.organization, c.category, c.industries
         ORDER BY billionaire_count DESC, total_worth DESC, c.source ASC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CompanyStat {
                source: row.get(0)?,
                organization: row.get(1)?,
                category: row.get(2)?,
                industries: row.get(3)?,
                billionaire_count: row.get(4)?,
                total_worth: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn overall_stats(conn: &Connection) -> Result<OverallStats, QueryError> {
    let stats = conn.query_row(
        "SELECT COUNT(*), AVG(final_worth), MAX(final_worth), MIN(final_worth),
                SUM(final_worth)
         FROM billionaires",
        [],
        |row| {
            Ok(OverallStats {
                total_billionaires: row.get(0)?,
                avg_worth: row.get(1)?,
                max_worth: row.get(2)?,
                min_worth: row.get(3)?,
                total_worth: row.get(4)?,
            })
        },
    )?;
    Ok(stats)
}

pub fn gender_distribution(conn: &Connection) -> Result<Vec<GenderCount>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT gender, COUNT(*) FROM personal_info GROUP BY gender ORDER BY gender",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(GenderCount {
                gender: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn self_made_distribution(conn: &Connection) -> Result<Vec<SelfMadeCount>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT self_made, COUNT(*) FROM billionaires GROUP BY self_made ORDER BY self_made",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(SelfMadeCount {
                self_made: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn age_stats(conn: &Connection) -> Result<AgeStats, QueryError> {
    let stats = conn.query_row(
        "SELECT AVG(age), MAX(age), MIN(age) FROM personal_info",
        [],
        |row| {
            Ok(AgeStats {
                avg_age: row.get(0)?,
                max_age: row.get(1)?,
                min_age: row.get(2)?,
            })
        },
    )?;
    Ok(stats)
}

/// The combined stats payload.
pub fn stats_summary(conn: &Connection) -> Result<StatsSummary, QueryError> {
    Ok(StatsSummary {
        overall: overall_stats(conn)?,
        gender_distribution: gender_distribution(conn)?,
        self_made_distribution: self_made_distribution(conn)?,
        age_statistics: age_stats(conn)?,
    })
}

/// Age histogram over the fixed band table, in band order.
pub fn age_distribution(conn: &Connection) -> Result<Vec<AgeBandCount>, QueryError> {
    let sql = format!(
        "SELECT {} AS age_group, COUNT(*) AS count, AVG(b.final_worth) AS avg_worth
         FROM personal_info p
         JOIN billionaires b ON b.personal_info = p.id
         WHERE p.age IS NOT NULL
         GROUP BY age_group
         ORDER BY {}",
        age_band_case(),
        age_band_order()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AgeBandCount {
                age_group: row.get(0)?,
                count: row.get(1)?,
                avg_worth: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================

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
    fn test_country_counts_sum_to_total() {
        let conn = seeded_connection();

        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM billionaires", [], |row| row.get(0))
            .unwrap();
        let stats = country_stats(&conn).unwrap();
        let summed: i64 = stats.iter().map(|s| s.billionaire_count).sum();

        assert_eq!(summed, total);
        // United States leads the sample; ordering is count DESC.
        assert_eq!(stats[0].country_name.as_deref(), Some("United States"));
        assert!(stats[0].billionaire_count >= stats.last().unwrap().billionaire_count);
        assert!(stats[0].population.is_some());
        assert!(stats[0].gdp.is_some());
    }

    #[test]
    fn test_country_ties_break_on_name() {
        let conn = seeded_connection();
        let stats = country_stats(&conn).unwrap();

        let singles: Vec<&str> = stats
            .iter()
            .filter(|s| s.billionaire_count == 1)
            .filter_map(|s| s.country_name.as_deref())
            .collect();
        let mut sorted = singles.clone();
        sorted.sort_unstable();
        assert_eq!(singles, sorted);
    }

    #[test]
    fn test_overall_stats() {
        let conn = seeded_connection();
        let overall = overall_stats(&conn).unwrap();

        assert_eq!(overall.total_billionaires, 10);
        assert_eq!(overall.max_worth, Some(177_000.0));
        assert_eq!(overall.min_worth, Some(53_000.0));
        let avg = overall.avg_worth.unwrap();
        let total = overall.total_worth.unwrap();
        assert!((total / 10.0 - avg).abs() < 1e-9);
    }

    #[test]
    fn test_age_distribution_band_order_and_total() {
        let conn = seeded_connection();
        let bands = age_distribution(&conn).unwrap();

        // Only bands with members appear, in table order.
        let labels: Vec<&str> = bands.iter().map(|b| b.age_group.as_str()).collect();
        let table_order: Vec<&str> = AGE_BANDS
            .iter()
            .map(|b| b.label)
            .filter(|l| labels.contains(l))
            .collect();
        assert_eq!(labels, table_order);

        let total: i64 = bands.iter().map(|b| b.count).sum();
        assert_eq!(total, 10);

        // Sample ages: 37 → 30-39; 91 → 80+.
        assert!(bands.iter().any(|b| b.age_group == "30-39" && b.count >= 1));
        assert!(bands.iter().any(|b| b.age_group == "80+" && b.count >= 1));
        assert!(!labels.contains(&"Under 30"));
    }

    #[test]
    fn test_age_band_case_covers_boundaries() {
        let case = age_band_case();
        assert!(case.starts_with("CASE"));
        assert!(case.contains("p.age < 30"));
        assert!(case.contains("p.age >= 80"));
        // Adjacent bands share a boundary: 40 belongs to 40-49, not 30-39.
        assert!(case.contains("p.age >= 30 AND p.age < 40"));
    }

    #[test]
    fn test_industries_having_filter() {
        let conn = seeded_connection();

        // Technology links 5 distinct billionaires in the sample
        // (Bezos, Gates, Zuckerberg, Page, Brin).
        let over_four = industries_with_min_count(&conn, 4).unwrap();
        assert_eq!(over_four.len(), 1);
        assert_eq!(over_four[0].category.as_deref(), Some("Technology"));
        assert_eq!(over_four[0].billionaire_count, 5);

        let over_hundred = industries_with_min_count(&conn, 100).unwrap();
        assert!(over_hundred.is_empty());
    }

    #[test]
    fn test_company_stats_keep_unlinked_companies() {
        let conn = seeded_connection();
        let stats = company_stats(&conn).unwrap();

        assert_eq!(stats.len(), 10);
        // Oracle has no works row in the sample data.
        let oracle = stats.iter().find(|s| s.source == "Oracle").unwrap();
        assert_eq!(oracle.billionaire_count, 0);
        assert_eq!(oracle.total_worth, None);

        // Google links two billionaires.
        let google = stats.iter().find(|s| s.source == "Google").unwrap();
        assert_eq!(google.billionaire_count, 2);
    }

    #[test]
    fn test_stats_summary_distributions() {
        let conn = seeded_connection();
        let summary = stats_summary(&conn).unwrap();

        let gender_total: i64 = summary.gender_distribution.iter().map(|g| g.count).sum();
        assert_eq!(gender_total, 10);

        let self_made_total: i64 = summary
            .self_made_distribution
            .iter()
            .map(|s| s.count)
            .sum();
        assert_eq!(self_made_total, 10);
        assert_eq!(summary.self_made_distribution.len(), 1);
        assert_eq!(summary.self_made_distribution[0].self_made, Some(true));

        assert_eq!(summary.age_statistics.max_age, Some(91));
        assert_eq!(summary.age_statistics.min_age, Some(37));
    }

    #[test]
    fn test_city_stats() {
        let conn = seeded_connection();
        let stats = city_stats(&conn).unwrap();

        let total: i64 = stats.iter().map(|s| s.billionaire_count).sum();
        assert_eq!(total, 10);

        // Seattle and Los Angeles host two billionaires each.
        let seattle = stats
            .iter()
            .find(|s| s.city_name.as_deref() == Some("Seattle"))
            .unwrap();
        assert_eq!(seattle.billionaire_count, 2);
        assert_eq!(seattle.region.as_deref(), Some("Northwest"));
    }
}
