//! Partition entity - One row per named record collection.
//!
//! The `records` column holds the whole partition as a JSON array. Every write
//! replaces it wholesale. `last_issued_id` is the highest numeric record id ever
//! handed out for the partition, so ids are not reused after a delete.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Partition database model - stores one serialized record sequence per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partitions")]
pub struct Model {
    /// Partition key (e.g., `"cashData"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// JSON array of records
    #[sea_orm(column_type = "Text")]
    pub records: String,
    /// Highest numeric id issued in this partition
    pub last_issued_id: i64,
    /// When the partition was last written
    pub updated_at: DateTime,
}

/// `Partition` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
