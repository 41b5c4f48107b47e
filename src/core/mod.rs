//! Core business logic - framework-agnostic record storage and aggregation.

/// Grouping and summing of stored records
pub mod aggregate;
/// Injected reporting of recovered anomalies
pub mod diagnostics;
/// Forgiving field decoders for persisted records
pub mod lenient;
/// One store per asset category
pub mod portfolio;
/// Typed record shapes per category
pub mod records;
/// Generic CRUD over one partition
pub mod store;
/// Wealth summary across all categories
pub mod summary;
