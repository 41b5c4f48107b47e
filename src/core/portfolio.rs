//! The set of category stores a front end works with.

use crate::{
    config::settings::PartitionKeys,
    core::{
        diagnostics::Diagnostics,
        records::{CashRecord, MetalRecord, SeedRecord},
        store::RecordStore,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

/// One store per asset category, all sharing a database connection.
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Cash transactions
    pub cash: RecordStore<CashRecord>,
    /// Precious metal holdings
    pub metals: RecordStore<MetalRecord>,
    /// Seed inventory
    pub seeds: RecordStore<SeedRecord>,
}

impl Portfolio {
    /// Opens (and initializes) all three partitions.
    ///
    /// # Errors
    /// Returns an error if any partition cannot be initialized.
    pub async fn open(
        db: &DatabaseConnection,
        keys: &PartitionKeys,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self> {
        let cash = RecordStore::open(db.clone(), &keys.cash, Arc::clone(&diagnostics)).await?;
        let metals = RecordStore::open(db.clone(), &keys.metals, Arc::clone(&diagnostics)).await?;
        let seeds = RecordStore::open(db.clone(), &keys.seeds, diagnostics).await?;
        info!(
            cash = %keys.cash,
            metals = %keys.metals,
            seeds = %keys.seeds,
            "Portfolio partitions ready"
        );
        Ok(Self { cash, metals, seeds })
    }
}
