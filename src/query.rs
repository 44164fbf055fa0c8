// Billionaires Database - Query/Filter Composer
// Translates optional, independently-specifiable filters into one SQL
// statement plus a bound parameter list. Filter values are always bound;
// sort column and direction come from enums and are spliced as fixed literals.

use crate::db::QueryError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// SORT WHITELIST
// ============================================================================

/// Caller-selectable sort direction. The only two values that ever reach
/// statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Parse a direction parameter. Anything outside ASC/DESC (any case)
    /// coerces to the endpoint's documented default instead of erroring.
    pub fn parse_or(input: &str, default: SortDirection) -> SortDirection {
        match input.trim().to_ascii_uppercase().as_str() {
            "ASC" => SortDirection::Asc,
            "DESC" => SortDirection::Desc,
            _ => default,
        }
    }
}

/// Sortable listing columns. Rank ordering is always ascending; age and worth
/// carry a direction and default DESC when the parameter is invalid or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    Rank,
    Age(SortDirection),
    Worth(SortDirection),
}

impl ListOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            ListOrder::Rank => " ORDER BY b.rank",
            ListOrder::Age(SortDirection::Asc) => " ORDER BY p.age ASC",
            ListOrder::Age(SortDirection::Desc) => " ORDER BY p.age DESC",
            ListOrder::Worth(SortDirection::Asc) => " ORDER BY b.final_worth ASC",
            ListOrder::Worth(SortDirection::Desc) => " ORDER BY b.final_worth DESC",
        }
    }
}

impl Default for ListOrder {
    fn default() -> Self {
        ListOrder::Rank
    }
}

// ============================================================================
// FILTER SET
// ============================================================================

/// Optional filters for the listing endpoint. Absent filters emit no SQL at
/// all; present ones each append a single `AND col op ?` clause.
#[derive(Debug, Clone, Default)]
pub struct BillionaireFilter {
    pub limit: Option<u32>,
    pub offset: u32,
    pub self_made: Option<bool>,
    pub min_worth: Option<f64>,
    pub max_worth: Option<f64>,
    pub max_age: Option<i64>,
    pub country: Option<String>,
    pub gender: Option<String>,
    pub order: ListOrder,
}

fn parse_param<T: std::str::FromStr>(
    params: &HashMap<String, String>,
    key: &str,
    expected: &str,
) -> Result<Option<T>, QueryError> {
    match params.get(key) {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(|_| {
            QueryError::BadRequest(format!("parameter '{}' must be {}", key, expected))
        }),
    }
}

impl BillionaireFilter {
    /// Build a filter from raw query parameters, performing all type coercion.
    /// Coercion failures are BadRequest; the sort fields alone silently fall
    /// back to their defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, QueryError> {
        let limit: Option<u32> = parse_param(params, "limit", "a positive integer")?;
        if limit == Some(0) {
            return Err(QueryError::BadRequest(
                "parameter 'limit' must be a positive integer".to_string(),
            ));
        }

        let offset: u32 = parse_param(params, "offset", "a non-negative integer")?.unwrap_or(0);

        let self_made = match parse_param::<i64>(params, "selfMade", "0 or 1")? {
            None => None,
            Some(0) => Some(false),
            Some(1) => Some(true),
            Some(_) => {
                return Err(QueryError::BadRequest(
                    "parameter 'selfMade' must be 0 or 1".to_string(),
                ))
            }
        };

        let min_worth: Option<f64> = parse_param(params, "minWorth", "a non-negative number")?;
        let max_worth: Option<f64> = parse_param(params, "maxWorth", "a non-negative number")?;
        for (key, value) in [("minWorth", min_worth), ("maxWorth", max_worth)] {
            if value.is_some_and(|v| v < 0.0) {
                return Err(QueryError::BadRequest(format!(
                    "parameter '{}' must be a non-negative number",
                    key
                )));
            }
        }

        let max_age: Option<i64> = parse_param(params, "maxAge", "an integer")?;

        let country = params.get("country").filter(|s| !s.is_empty()).cloned();
        let gender = params.get("gender").filter(|s| !s.is_empty()).cloned();

        let order = match params.get("orderBy").map(String::as_str) {
            Some("age") => ListOrder::Age(direction_param(params, SortDirection::Desc)),
            Some("worth") => ListOrder::Worth(direction_param(params, SortDirection::Desc)),
            // Unknown sort columns fall back to rank, same policy as direction.
            _ => ListOrder::Rank,
        };

        Ok(BillionaireFilter {
            limit,
            offset,
            self_made,
            min_worth,
            max_worth,
            max_age,
            country,
            gender,
            order,
        })
    }
}

fn direction_param(params: &HashMap<String, String>, default: SortDirection) -> SortDirection {
    params
        .get("dir")
        .map(|raw| SortDirection::parse_or(raw, default))
        .unwrap_or(default)
}

// ============================================================================
// ROW TYPES
// ============================================================================

/// Listing row. Joined columns are NULL when the referenced entity was absent
/// at seed time, hence the Options.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillionaireSummary {
    pub rank: i64,
    pub person_name: String,
    pub final_worth: f64,
    pub self_made: Option<bool>,
    pub status: Option<String>,
    pub city_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub country_of_citizenship: Option<String>,
    pub source: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub industries: Option<String>,
    pub title: Option<String>,
}

/// Full profile for the single-entity lookup, including city, country and
/// economic context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillionaireDetail {
    pub rank: i64,
    pub person_name: String,
    pub final_worth: f64,
    pub self_made: Option<bool>,
    pub status: Option<String>,
    pub city_name: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_day: Option<i64>,
    pub birth_month: Option<i64>,
    pub birth_year: Option<i64>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub country_of_citizenship: Option<String>,
    pub source: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
    pub industries: Option<String>,
    pub title: Option<String>,
    pub life_expectancy: Option<f64>,
    pub gross_tertiary_education: Option<f64>,
    pub gross_primary_education: Option<f64>,
    pub population: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cpi: Option<f64>,
    pub cpi_change: Option<f64>,
    pub tax_revenue: Option<f64>,
    pub total_tax_rate: Option<f64>,
    pub gdp: Option<f64>,
}

/// Name-search hit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub rank: i64,
    pub person_name: String,
    pub final_worth: f64,
    pub title: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub country_of_citizenship: Option<String>,
    pub organization: Option<String>,
    pub category: Option<String>,
}

/// Profile plus rank-neighbor navigation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectProfile {
    pub billionaire: BillionaireDetail,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Listing row scoped to one citizenship country, with country context
/// carried on every row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryBillionaire {
    pub rank: i64,
    pub person_name: String,
    pub final_worth: f64,
    pub age: Option<i64>,
    pub country_of_citizenship: Option<String>,
    pub population: Option<i64>,
    pub life_expectancy: Option<f64>,
    pub gdp: Option<f64>,
}

// ============================================================================
// STATEMENT COMPOSITION
// ============================================================================

// Fixed LEFT JOIN set: filters on joined tables still work because a failed
// join leaves NULLs that an equality predicate never matches.
const LISTING_BASE: &str = "SELECT b.rank, b.person_name, b.final_worth, b.self_made, b.status, \
     ct.city_name, p.first_name, p.last_name, p.age, p.gender, p.country_of_citizenship, \
     c.source, c.organization, c.category, c.industries, w.title \
     FROM billionaires b \
     LEFT JOIN personal_info p ON b.personal_info = p.id \
     LEFT JOIN city ct ON b.city = ct.id \
     LEFT JOIN works w ON w.billionaire_id = b.id \
     LEFT JOIN company c ON w.company_id = c.id \
     WHERE 1=1";

/// Compose the listing statement and its bound parameters. Split out from the
/// execution path so the statement text itself is testable.
fn compose_listing(filter: &BillionaireFilter) -> (String, Vec<Value>) {
    let mut sql = String::from(LISTING_BASE);
    let mut values: Vec<Value> = Vec::new();

    if let Some(self_made) = filter.self_made {
        sql.push_str(" AND b.self_made = ?");
        values.push(Value::Integer(self_made as i64));
    }
    if let Some(min_worth) = filter.min_worth {
        sql.push_str(" AND b.final_worth >= ?");
        values.push(Value::Real(min_worth));
    }
    if let Some(max_worth) = filter.max_worth {
        sql.push_str(" AND b.final_worth <= ?");
        values.push(Value::Real(max_worth));
    }
    if let Some(max_age) = filter.max_age {
        sql.push_str(" AND p.age <= ?");
        values.push(Value::Integer(max_age));
    }
    if let Some(country) = &filter.country {
        sql.push_str(" AND p.country_of_citizenship = ?");
        values.push(Value::Text(country.clone()));
    }
    if let Some(gender) = &filter.gender {
        sql.push_str(" AND p.gender = ?");
        values.push(Value::Text(gender.clone()));
    }

    sql.push_str(filter.order.as_sql());

    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ? OFFSET ?");
        values.push(Value::Integer(limit as i64));
        values.push(Value::Integer(filter.offset as i64));
    }

    (sql, values)
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Listing with optional filters, whitelisted ordering and pagination.
pub fn list_billionaires(
    conn: &Connection,
    filter: &BillionaireFilter,
) -> Result<Vec<BillionaireSummary>, QueryError> {
    let (sql, values) = compose_listing(filter);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(values), |row| {
            Ok(BillionaireSummary {
                rank: row.get(0)?,
                person_name: row.get(1)?,
                final_worth: row.get(2)?,
                self_made: row.get(3)?,
                status: row.get(4)?,
                city_name: row.get(5)?,
                first_name: row.get(6)?,
                last_name: row.get(7)?,
                age: row.get(8)?,
                gender: row.get(9)?,
                country_of_citizenship: row.get(10)?,
                source: row.get(11)?,
                organization: row.get(12)?,
                category: row.get(13)?,
                industries: row.get(14)?,
                title: row.get(15)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

const DETAIL_SQL: &str = "SELECT b.rank, b.person_name, b.final_worth, b.self_made, b.status, \
     ct.city_name, ct.state, ct.region, \
     p.first_name, p.last_name, p.birth_date, p.birth_day, p.birth_month, p.birth_year, \
     p.age, p.gender, p.country_of_citizenship, \
     c.source, c.organization, c.category, c.industries, w.title, \
     co.life_expectancy, co.gross_tertiary_education, co.gross_primary_education, \
     co.population, co.latitude, co.longitude, \
     e.cpi, e.cpi_change, e.tax_revenue, e.total_tax_rate, e.gdp \
     FROM billionaires b \
     LEFT JOIN personal_info p ON b.personal_info = p.id \
     LEFT JOIN city ct ON b.city = ct.id \
     LEFT JOIN works w ON w.billionaire_id = b.id \
     LEFT JOIN company c ON w.company_id = c.id \
     LEFT JOIN country co ON co.country_name = p.country_of_citizenship \
     LEFT JOIN economics e ON co.economics = e.id";

fn detail_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<BillionaireDetail> {
    Ok(BillionaireDetail {
        rank: row.get(0)?,
        person_name: row.get(1)?,
        final_worth: row.get(2)?,
        self_made: row.get(3)?,
        status: row.get(4)?,
        city_name: row.get(5)?,
        state: row.get(6)?,
        region: row.get(7)?,
        first_name: row.get(8)?,
        last_name: row.get(9)?,
        birth_date: row.get(10)?,
        birth_day: row.get(11)?,
        birth_month: row.get(12)?,
        birth_year: row.get(13)?,
        age: row.get(14)?,
        gender: row.get(15)?,
        country_of_citizenship: row.get(16)?,
        source: row.get(17)?,
        organization: row.get(18)?,
        category: row.get(19)?,
        industries: row.get(20)?,
        title: row.get(21)?,
        life_expectancy: row.get(22)?,
        gross_tertiary_education: row.get(23)?,
        gross_primary_education: row.get(24)?,
        population: row.get(25)?,
        latitude: row.get(26)?,
        longitude: row.get(27)?,
        cpi: row.get(28)?,
        cpi_change: row.get(29)?,
        tax_revenue: row.get(30)?,
        total_tax_rate: row.get(31)?,
        gdp: row.get(32)?,
    })
}

/// Single-entity lookup by rank.
pub fn get_billionaire(conn: &Connection, rank: i64) -> Result<BillionaireDetail, QueryError> {
    let sql = format!("{} WHERE b.rank = ?1", DETAIL_SQL);
    conn.query_row(&sql, params![rank], detail_from_row)
        .optional()?
        .ok_or_else(|| QueryError::NotFound("Billionaire not found".to_string()))
}

/// Case-insensitive substring search over full, first and last name.
pub fn search_billionaires(conn: &Connection, term: &str) -> Result<Vec<SearchHit>, QueryError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(QueryError::BadRequest(
            "Search query parameter \"q\" is required".to_string(),
        ));
    }

    let pattern = format!("%{}%", term);
    let mut stmt = conn.prepare(
        "SELECT b.rank, b.person_name, b.final_worth, w.title,
                p.age, p.gender, p.country_of_citizenship,
                c.organization, c.category
         FROM billionaires b
         LEFT JOIN personal_info p ON b.personal_info = p.id
         LEFT JOIN works w ON w.billionaire_id = b.id
         LEFT JOIN company c ON w.company_id = c.id
         WHERE b.person_name LIKE ?1 OR p.first_name LIKE ?1 OR p.last_name LIKE ?1
         ORDER BY b.rank",
    )?;

    let hits = stmt
        .query_map(params![pattern], |row| {
            Ok(SearchHit {
                rank: row.get(0)?,
                person_name: row.get(1)?,
                final_worth: row.get(2)?,
                title: row.get(3)?,
                age: row.get(4)?,
                gender: row.get(5)?,
                country_of_citizenship: row.get(6)?,
                organization: row.get(7)?,
                category: row.get(8)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(hits)
}

/// Exact-name profile with rank-neighbor navigation.
pub fn get_subject(conn: &Connection, name: &str) -> Result<SubjectProfile, QueryError> {
    let sql = format!("{} WHERE b.person_name = ?1", DETAIL_SQL);
    let billionaire = conn
        .query_row(&sql, params![name], detail_from_row)
        .optional()?
        .ok_or_else(|| QueryError::NotFound(format!("Billionaire not found: {}", name)))?;

    let prev: Option<String> = conn
        .query_row(
            "SELECT person_name FROM billionaires WHERE rank < ?1 ORDER BY rank DESC LIMIT 1",
            params![billionaire.rank],
            |row| row.get(0),
        )
        .optional()?;
    let next: Option<String> = conn
        .query_row(
            "SELECT person_name FROM billionaires WHERE rank > ?1 ORDER BY rank ASC LIMIT 1",
            params![billionaire.rank],
            |row| row.get(0),
        )
        .optional()?;

    Ok(SubjectProfile {
        billionaire,
        prev,
        next,
    })
}

/// All billionaires of one citizenship country, each row carrying the
/// country's population, life expectancy and GDP for comparison views.
pub fn billionaires_by_country(
    conn: &Connection,
    country: &str,
) -> Result<Vec<CountryBillionaire>, QueryError> {
    let mut stmt = conn.prepare(
        "SELECT b.rank, b.person_name, b.final_worth, p.age, p.country_of_citizenship,
                co.population, co.life_expectancy, e.gdp
         FROM billionaires b
         LEFT JOIN personal_info p ON b.personal_info = p.id
         LEFT JOIN country co ON co.country_name = p.country_of_citizenship
         LEFT JOIN economics e ON co.economics = e.id
         WHERE p.country_of_citizenship = ?1
         ORDER BY b.rank",
    )?;

    let rows = stmt
        .query_map(params![country], |row| {
            Ok(CountryBillionaire {
                rank: row.get(0)?,
                person_name: row.get(1)?,
                final_worth: row.get(2)?,
                age: row.get(3)?,
                country_of_citizenship: row.get(4)?,
                population: row.get(5)?,
                life_expectancy: row.get(6)?,
                gdp: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Err(QueryError::NotFound(format!(
            "No billionaires found for country: {}",
            country
        )));
    }

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

    fn params_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_unfiltered_listing_ordered_by_rank() {
        let conn = seeded_connection();
        let rows = list_billionaires(&conn, &BillionaireFilter::default()).unwrap();

        assert_eq!(rows.len(), 10);
        let ranks: Vec<i64> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<i64>>());
        assert_eq!(rows[0].person_name, "Jeff Bezos");
        assert_eq!(rows[0].organization.as_deref(), Some("Amazon.com Inc."));
    }

    #[test]
    fn test_limit_offset_windowing() {
        let conn = seeded_connection();
        let full = list_billionaires(&conn, &BillionaireFilter::default()).unwrap();

        let filter = BillionaireFilter {
            limit: Some(3),
            offset: 4,
            ..Default::default()
        };
        let window = list_billionaires(&conn, &filter).unwrap();

        assert_eq!(window.len(), 3);
        for (i, row) in window.iter().enumerate() {
            assert_eq!(row.rank, full[4 + i].rank);
        }
    }

    #[test]
    fn test_filters_compose_as_logical_and() {
        let conn = seeded_connection();
        let full = list_billionaires(&conn, &BillionaireFilter::default()).unwrap();

        let filter = BillionaireFilter {
            country: Some("United States".to_string()),
            min_worth: Some(90_000.0),
            ..Default::default()
        };
        let filtered = list_billionaires(&conn, &filter).unwrap();

        let expected: Vec<i64> = full
            .iter()
            .filter(|r| r.country_of_citizenship.as_deref() == Some("United States"))
            .filter(|r| r.final_worth >= 90_000.0)
            .map(|r| r.rank)
            .collect();

        assert_eq!(
            filtered.iter().map(|r| r.rank).collect::<Vec<_>>(),
            expected
        );
        assert!(!filtered.is_empty());
    }

    #[test]
    fn test_joined_table_filter_degrades_to_inner_join() {
        let conn = seeded_connection();
        // Give one billionaire no personal_info row; a citizenship filter
        // must then never match it.
        conn.execute("UPDATE billionaires SET personal_info = NULL WHERE rank = 1", [])
            .unwrap();

        let filter = BillionaireFilter {
            country: Some("United States".to_string()),
            ..Default::default()
        };
        let rows = list_billionaires(&conn, &filter).unwrap();
        assert!(rows.iter().all(|r| r.rank != 1));
    }

    #[test]
    fn test_search_musk_case_insensitive() {
        let conn = seeded_connection();

        let hits = search_billionaires(&conn, "musk").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].person_name, "Elon Musk");

        let hits_upper = search_billionaires(&conn, "MUSK").unwrap();
        assert_eq!(hits_upper.len(), 1);
        assert_eq!(hits_upper[0].rank, hits[0].rank);
    }

    #[test]
    fn test_search_matches_first_and_last_name_columns() {
        let conn = seeded_connection();

        // "Larry" only appears in first_name.
        let hits = search_billionaires(&conn, "Larry").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].person_name, "Larry Page");

        // "Helu" only appears in last_name / full name.
        let hits = search_billionaires(&conn, "Helu").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].person_name, "Carlos Slim Helu");
    }

    #[test]
    fn test_search_empty_term_is_bad_request() {
        let conn = seeded_connection();
        for term in ["", "   "] {
            match search_billionaires(&conn, term) {
                Err(QueryError::BadRequest(msg)) => assert!(msg.contains("\"q\"")),
                other => panic!("expected BadRequest, got {:?}", other.map(|v| v.len())),
            }
        }
    }

    #[test]
    fn test_get_billionaire_found_and_not_found() {
        let conn = seeded_connection();

        let detail = get_billionaire(&conn, 3).unwrap();
        assert_eq!(detail.rank, 3);
        assert_eq!(detail.person_name, "Bernard Arnault");
        assert_eq!(detail.country_of_citizenship.as_deref(), Some("France"));
        assert!(detail.gdp.is_some(), "economics context joined in");

        match get_billionaire(&conn, 99) {
            Err(QueryError::NotFound(msg)) => assert_eq!(msg, "Billionaire not found"),
            other => panic!("expected NotFound, got {:?}", other.map(|d| d.rank)),
        }
    }

    #[test]
    fn test_subject_navigation() {
        let conn = seeded_connection();

        let profile = get_subject(&conn, "Bill Gates").unwrap();
        assert_eq!(profile.billionaire.rank, 4);
        assert_eq!(profile.prev.as_deref(), Some("Bernard Arnault"));
        assert_eq!(profile.next.as_deref(), Some("Mark Zuckerberg"));

        let first = get_subject(&conn, "Jeff Bezos").unwrap();
        assert_eq!(first.prev, None);

        let last = get_subject(&conn, "Sergey Brin").unwrap();
        assert_eq!(last.next, None);

        assert!(matches!(
            get_subject(&conn, "Nobody"),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_billionaires_by_country() {
        let conn = seeded_connection();

        let rows = billionaires_by_country(&conn, "India").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].person_name, "Mukesh Ambani");
        assert!(rows[0].population.is_some());
        assert!(rows[0].gdp.is_some());

        assert!(matches!(
            billionaires_by_country(&conn, "Atlantis"),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_sort_direction_whitelist_and_fallback() {
        assert_eq!(
            SortDirection::parse_or("asc", SortDirection::Desc),
            SortDirection::Asc
        );
        assert_eq!(
            SortDirection::parse_or("DESC", SortDirection::Asc),
            SortDirection::Desc
        );
        // Injection attempts and garbage coerce to the default.
        for junk in ["ASC; DROP TABLE billionaires", "up", "", "1"] {
            assert_eq!(
                SortDirection::parse_or(junk, SortDirection::Desc),
                SortDirection::Desc
            );
        }
    }

    #[test]
    fn test_statement_text_contains_only_whitelisted_literals() {
        let params = params_of(&[("orderBy", "age"), ("dir", "ASC; DROP TABLE billionaires")]);
        let filter = BillionaireFilter::from_params(&params).unwrap();
        let (sql, _) = compose_listing(&filter);

        assert!(sql.ends_with(" ORDER BY p.age DESC"));
        assert!(!sql.contains("DROP"));
    }

    #[test]
    fn test_compose_emits_nothing_for_absent_filters() {
        let (sql, values) = compose_listing(&BillionaireFilter::default());
        assert!(!sql.contains(" AND "));
        assert!(!sql.contains("LIMIT"));
        assert!(values.is_empty());
        assert!(sql.ends_with(" ORDER BY b.rank"));
    }

    #[test]
    fn test_from_params_type_coercion_failures() {
        for (key, value) in [
            ("limit", "abc"),
            ("limit", "0"),
            ("limit", "-5"),
            ("offset", "-1"),
            ("minWorth", "lots"),
            ("minWorth", "-10"),
            ("maxAge", "old"),
            ("selfMade", "2"),
        ] {
            let params = params_of(&[(key, value)]);
            match BillionaireFilter::from_params(&params) {
                Err(QueryError::BadRequest(msg)) => {
                    assert!(msg.contains(key), "message should name '{}': {}", key, msg)
                }
                other => panic!("expected BadRequest for {}={}, got {:?}", key, value, other),
            }
        }
    }

    #[test]
    fn test_from_params_happy_path() {
        let params = params_of(&[
            ("limit", "5"),
            ("offset", "2"),
            ("selfMade", "1"),
            ("minWorth", "1000"),
            ("maxWorth", "200000"),
            ("country", "United States"),
            ("gender", "M"),
            ("orderBy", "worth"),
            ("dir", "asc"),
        ]);
        let filter = BillionaireFilter::from_params(&params).unwrap();

        assert_eq!(filter.limit, Some(5));
        assert_eq!(filter.offset, 2);
        assert_eq!(filter.self_made, Some(true));
        assert_eq!(filter.min_worth, Some(1000.0));
        assert_eq!(filter.max_worth, Some(200_000.0));
        assert_eq!(filter.country.as_deref(), Some("United States"));
        assert_eq!(filter.order, ListOrder::Worth(SortDirection::Asc));
    }

    #[test]
    fn test_age_ordering_applies_direction() {
        let conn = seeded_connection();

        let params = params_of(&[("orderBy", "age"), ("dir", "asc")]);
        let filter = BillionaireFilter::from_params(&params).unwrap();
        let rows = list_billionaires(&conn, &filter).unwrap();
        let ages: Vec<i64> = rows.iter().filter_map(|r| r.age).collect();
        let mut sorted = ages.clone();
        sorted.sort_unstable();
        assert_eq!(ages, sorted);

        // Invalid direction falls back to DESC.
        let params = params_of(&[("orderBy", "age"), ("dir", "sideways")]);
        let filter = BillionaireFilter::from_params(&params).unwrap();
        let rows = list_billionaires(&conn, &filter).unwrap();
        let ages: Vec<i64> = rows.iter().filter_map(|r| r.age).collect();
        let mut sorted = ages.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(ages, sorted);
    }
}
