// Billionaires Database - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod db;
pub mod import;
pub mod query;
pub mod seed;
pub mod stats;
pub mod verify;

// Re-export commonly used types
pub use db::{configure_connection, Database, QueryError, DEFAULT_DB_PATH};
pub use import::{import_records, load_csv, records_from_reader, BillionaireRecord, ImportReport};
pub use query::{
    billionaires_by_country, get_billionaire, get_subject, list_billionaires, search_billionaires,
    BillionaireDetail, BillionaireFilter, BillionaireSummary, CountryBillionaire, ListOrder,
    SearchHit, SortDirection, SubjectProfile,
};
pub use seed::{create_database, resolve_reference, RefKey, RefTable, SeedReport, SeedWarning};
pub use stats::{
    age_distribution, city_stats, company_stats, country_stats, industries_with_min_count,
    industry_stats, stats_summary, AgeBand, AgeBandCount, CityStat, CompanyStat, CountryStat,
    IndustryCount, IndustryStat, StatsSummary, AGE_BANDS,
};
pub use verify::{verify_database, Check, VerifyReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
