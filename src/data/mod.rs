/// Data layer: core types, loading, aggregation, filtering, and export.
///
/// Architecture:
/// ```text
///  co2.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table, classify columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Record>, column kinds, unique values
///   └──────────┘
///        │
///        ├────────────────┬─────────────────┐
///        ▼                ▼                 ▼
///   ┌──────────┐    ┌──────────┐     ┌──────────┐
///   │  filter   │    │ aggregate │     │  stats    │
///   │ subset by │    │ per-group │     │ describe, │
///   │ selection │    │ means     │     │ Pearson   │
///   └──────────┘    └──────────┘     └──────────┘
///                         │
///                         ▼
///                    ┌──────────┐
///                    │  export   │  GroupSummary → CSV bytes
///                    └──────────┘
/// ```
///
/// Every derived view is a pure function of the immutable `Table`, so
/// re-invocation on each UI interaction is trivially correct.
pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
