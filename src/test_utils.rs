//! Shared test utilities for `WealthTracker`.
//!
//! Helpers for setting up in-memory test databases, opening stores, and building
//! records and field sets with sensible defaults.

use crate::{
    config::{database, settings::PartitionKeys},
    core::{
        diagnostics::{Anomaly, Diagnostics, TracingDiagnostics},
        portfolio::Portfolio,
        records::{
            CashFields, CashRecord, MetalFields, MetalRecord, MetalType, Purity, RecordId,
            SeedFields, SeedRecord,
        },
        store::RecordStore,
    },
    entities::partition,
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    database::connect("sqlite::memory:").await
}

/// Sets up a database and a portfolio using the default partition keys.
pub async fn setup_with_portfolio() -> Result<(DatabaseConnection, Portfolio)> {
    let db = setup_test_db().await?;
    let portfolio =
        Portfolio::open(&db, &PartitionKeys::default(), Arc::new(TracingDiagnostics)).await?;
    Ok((db, portfolio))
}

/// Opens the `cashData` partition.
pub async fn cash_store(db: &DatabaseConnection) -> Result<RecordStore<CashRecord>> {
    RecordStore::open(db.clone(), "cashData", Arc::new(TracingDiagnostics)).await
}

/// Opens the `metalsData` partition.
pub async fn metal_store(db: &DatabaseConnection) -> Result<RecordStore<MetalRecord>> {
    RecordStore::open(db.clone(), "metalsData", Arc::new(TracingDiagnostics)).await
}

/// Writes a partition row with arbitrary (possibly invalid) contents.
pub async fn insert_raw_partition(db: &DatabaseConnection, key: &str, raw: &str) -> Result<()> {
    partition::ActiveModel {
        key: Set(key.to_string()),
        records: Set(raw.to_string()),
        last_issued_id: Set(0),
        updated_at: Set(chrono::Utc::now().naive_utc()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Parses a `YYYY-MM-DD` literal.
///
/// # Panics
/// Panics on a malformed date; test input only.
#[allow(clippy::expect_used)]
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("test date literal")
}

/// Cash fields without notes.
pub fn cash_fields(on: &str, amount: Decimal) -> CashFields {
    CashFields {
        date: date(on),
        amount,
        notes: None,
    }
}

/// Metal fields dated 2024-01-01 without notes.
pub fn metal_fields(metal_type: MetalType, purity: Purity, grams: Decimal) -> MetalFields {
    MetalFields {
        date: date("2024-01-01"),
        metal_type,
        purity,
        grams,
        notes: None,
    }
}

/// Seed fields dated 2024-01-01 with only name, variety and quantity set.
pub fn seed_fields(seed_name: &str, variety: Option<&str>, quantity: u32) -> SeedFields {
    SeedFields {
        date: date("2024-01-01"),
        seed_name: seed_name.to_string(),
        variety: variety.map(str::to_string),
        quantity,
        source: None,
        collection_year: None,
        notes: None,
    }
}

/// A stored cash record with the given id.
pub fn sample_cash(id: &str, on: &str, amount: Decimal) -> CashRecord {
    CashRecord {
        id: RecordId::new(id),
        date: date(on),
        amount,
        notes: None,
    }
}

/// A stored metal record with the given id.
pub fn sample_metal(id: &str, metal_type: MetalType, purity: Purity, grams: Decimal) -> MetalRecord {
    MetalRecord {
        id: RecordId::new(id),
        date: date("2024-01-01"),
        metal_type,
        purity,
        grams,
        notes: None,
    }
}

/// A stored seed record with the given id.
pub fn sample_seed(id: &str, seed_name: &str, variety: Option<&str>, quantity: u32) -> SeedRecord {
    SeedRecord {
        id: RecordId::new(id),
        date: date("2024-01-01"),
        seed_name: seed_name.to_string(),
        variety: variety.map(str::to_string),
        quantity,
        source: None,
        collection_year: None,
        notes: None,
    }
}

/// Decodes a JSON cash partition.
#[allow(clippy::expect_used)]
pub fn decode_cash(raw: &str) -> Vec<CashRecord> {
    serde_json::from_str(raw).expect("test cash json")
}

/// Decodes a JSON metals partition.
#[allow(clippy::expect_used)]
pub fn decode_metals(raw: &str) -> Vec<MetalRecord> {
    serde_json::from_str(raw).expect("test metals json")
}

/// Decodes a JSON seed partition.
#[allow(clippy::expect_used)]
pub fn decode_seeds(raw: &str) -> Vec<SeedRecord> {
    serde_json::from_str(raw).expect("test seeds json")
}

/// Diagnostics sink that keeps every anomaly for later inspection.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    anomalies: Mutex<Vec<Anomaly>>,
}

impl RecordingDiagnostics {
    /// Anomalies reported so far.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, anomaly: &Anomaly) {
        if let Ok(mut seen) = self.anomalies.lock() {
            seen.push(anomaly.clone());
        }
    }
}
