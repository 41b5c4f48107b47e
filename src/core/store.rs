//! Record store business logic - CRUD over one partition.
//!
//! A [`RecordStore`] owns one partition key. Reads decode the whole partition from
//! its `partitions` row; every mutation decodes, changes and rewrites the whole
//! value inside a single database transaction. Partitions stay small (personal
//! finance scale), so there is no incremental write path.
//!
//! Elements that do not decode as records are invisible to reads but are written
//! back exactly as stored, so a single bad record never costs the others.

use crate::{
    core::{
        diagnostics::{Anomaly, Diagnostics},
        records::{Record, RecordId},
    },
    entities::{Partition, partition},
    errors::{Error, Result},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set,
    TransactionTrait,
};
use std::{marker::PhantomData, sync::Arc};
use tracing::{debug, instrument};

/// One element of a stored partition.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry<R> {
    Record(R),
    Undecodable(Value),
}

impl<R: Record> Entry<R> {
    fn record(&self) -> Option<&R> {
        match self {
            Self::Record(record) => Some(record),
            Self::Undecodable(_) => None,
        }
    }

    fn into_record(self) -> Option<R> {
        match self {
            Self::Record(record) => Some(record),
            Self::Undecodable(_) => None,
        }
    }

    /// Numeric id of the element, read from the raw `id` field when undecodable.
    fn numeric_id(&self) -> Option<i64> {
        match self {
            Self::Record(record) => record.id().as_number(),
            Self::Undecodable(value) => match value.get("id")? {
                Value::String(id) => id.trim().parse().ok(),
                Value::Number(id) => id.as_i64(),
                _ => None,
            },
        }
    }
}

/// Keyed collection of records of one category, persisted under `key`.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    db: DatabaseConnection,
    key: String,
    diagnostics: Arc<dyn Diagnostics>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RecordStore<R> {
    /// Creates a handle without touching the database. Prefer [`RecordStore::open`].
    pub fn new(
        db: DatabaseConnection,
        key: impl Into<String>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            db,
            key: key.into(),
            diagnostics,
            _record: PhantomData,
        }
    }

    /// Creates a handle and makes sure its partition exists.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the partition row cannot be read or created.
    pub async fn open(
        db: DatabaseConnection,
        key: impl Into<String>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self> {
        let store = Self::new(db, key, diagnostics);
        store.initialize().await?;
        Ok(store)
    }

    /// Partition key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Ensures the partition exists, creating it empty if absent. An existing
    /// partition is left untouched, so this is safe to call repeatedly.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails.
    #[instrument(skip(self), fields(partition = %self.key))]
    pub async fn initialize(&self) -> Result<()> {
        let txn = self.db.begin().await.map_err(self.storage())?;
        if self.load(&txn).await?.is_none() {
            partition::ActiveModel {
                key: Set(self.key.clone()),
                records: Set("[]".to_string()),
                last_issued_id: Set(0),
                updated_at: Set(Utc::now().naive_utc()),
            }
            .insert(&txn)
            .await
            .map_err(self.storage())?;
            debug!("Created empty partition");
        }
        txn.commit().await.map_err(self.storage())?;
        Ok(())
    }

    /// Returns every record in stored order. Absent, empty or corrupt partitions
    /// yield an empty vector.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails.
    #[instrument(skip(self), fields(partition = %self.key))]
    pub async fn get_all(&self) -> Result<Vec<R>> {
        let row = self.load(&self.db).await?;
        Ok(self
            .decode(row.as_ref())
            .into_iter()
            .filter_map(Entry::into_record)
            .collect())
    }

    /// Number of records currently stored.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails.
    pub async fn len(&self) -> Result<usize> {
        Ok(self.get_all().await?.len())
    }

    /// Whether the partition holds no records.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails.
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Finds a record by id.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails.
    #[instrument(skip(self), fields(partition = %self.key))]
    pub async fn get_by_id(&self, id: &RecordId) -> Result<Option<R>> {
        Ok(self.get_all().await?.into_iter().find(|r| r.id() == id))
    }

    /// Stores a new record under a freshly issued id and returns it.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails, or
    /// [`Error::Serialization`] if the partition cannot be encoded.
    #[instrument(skip(self, input), fields(partition = %self.key))]
    pub async fn create(&self, input: R::Fields) -> Result<R> {
        let txn = self.db.begin().await.map_err(self.storage())?;
        let row = self.load(&txn).await?;
        let mut entries = self.decode(row.as_ref());

        let last_issued = row.as_ref().map_or(0, |r| r.last_issued_id);
        let id = next_id(last_issued, &entries, Utc::now().timestamp_millis());
        let record = R::from_fields(RecordId::from(id), input);
        entries.push(Entry::Record(record.clone()));

        self.save(&txn, row, &entries, id).await?;
        txn.commit().await.map_err(self.storage())?;

        debug!(id = %record.id(), "Created {} record", R::CATEGORY.label());
        Ok(record)
    }

    /// Merges `patch` into the record with `id` and returns the result. Returns
    /// `None`, writing nothing, if no such record exists.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails, or
    /// [`Error::Serialization`] if the partition cannot be encoded.
    #[instrument(skip(self, patch), fields(partition = %self.key))]
    pub async fn update(&self, id: &RecordId, patch: R::Patch) -> Result<Option<R>> {
        let txn = self.db.begin().await.map_err(self.storage())?;
        let row = self.load(&txn).await?;
        let mut entries = self.decode(row.as_ref());

        let Some(record) = entries.iter_mut().find_map(|entry| match entry {
            Entry::Record(record) if record.id() == id => Some(record),
            _ => None,
        }) else {
            debug!("No record to update");
            return Ok(None);
        };
        record.merge(patch);
        let updated = record.clone();

        let last_issued = row.as_ref().map_or(0, |r| r.last_issued_id);
        self.save(&txn, row, &entries, last_issued).await?;
        txn.commit().await.map_err(self.storage())?;

        debug!("Updated record");
        Ok(Some(updated))
    }

    /// Permanently removes the record with `id`. Returns whether one was removed.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the storage medium fails, or
    /// [`Error::Serialization`] if the partition cannot be encoded.
    #[instrument(skip(self), fields(partition = %self.key))]
    pub async fn delete(&self, id: &RecordId) -> Result<bool> {
        let txn = self.db.begin().await.map_err(self.storage())?;
        let row = self.load(&txn).await?;
        let mut entries = self.decode(row.as_ref());

        let before = entries.len();
        entries.retain(|entry| entry.record().is_none_or(|r| r.id() != id));
        if entries.len() == before {
            debug!("No record to delete");
            return Ok(false);
        }

        let last_issued = row.as_ref().map_or(0, |r| r.last_issued_id);
        self.save(&txn, row, &entries, last_issued).await?;
        txn.commit().await.map_err(self.storage())?;

        debug!("Deleted record");
        Ok(true)
    }

    async fn load<C>(&self, conn: &C) -> Result<Option<partition::Model>>
    where
        C: ConnectionTrait,
    {
        Partition::find_by_id(self.key.as_str())
            .one(conn)
            .await
            .map_err(self.storage())
    }

    /// Splits the stored value into elements. A value that is not a JSON array
    /// reads as empty; an element that is not a valid record is kept raw.
    fn decode(&self, row: Option<&partition::Model>) -> Vec<Entry<R>> {
        let Some(row) = row else {
            return Vec::new();
        };
        let raw = row.records.trim();
        if raw.is_empty() || raw == "null" {
            return Vec::new();
        }
        let values: Vec<Value> = match serde_json::from_str(raw) {
            Ok(values) => values,
            Err(e) => {
                self.diagnostics.report(&Anomaly::CorruptPartition {
                    partition: self.key.clone(),
                    reason: e.to_string(),
                });
                return Vec::new();
            }
        };

        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match R::deserialize(&value) {
                Ok(record) => Entry::Record(record),
                Err(e) => {
                    self.diagnostics.report(&Anomaly::CorruptRecord {
                        partition: self.key.clone(),
                        index,
                        reason: e.to_string(),
                    });
                    Entry::Undecodable(value)
                }
            })
            .collect()
    }

    async fn save<C>(
        &self,
        conn: &C,
        row: Option<partition::Model>,
        entries: &[Entry<R>],
        last_issued_id: i64,
    ) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let encoded = serde_json::to_string(entries).map_err(|source| Error::Serialization {
            partition: self.key.clone(),
            source,
        })?;
        let now = Utc::now().naive_utc();

        if let Some(existing) = row {
            let mut active_model: partition::ActiveModel = existing.into();
            active_model.records = Set(encoded);
            active_model.last_issued_id = Set(last_issued_id);
            active_model.updated_at = Set(now);
            active_model.update(conn).await.map_err(self.storage())?;
        } else {
            partition::ActiveModel {
                key: Set(self.key.clone()),
                records: Set(encoded),
                last_issued_id: Set(last_issued_id),
                updated_at: Set(now),
            }
            .insert(conn)
            .await
            .map_err(self.storage())?;
        }
        Ok(())
    }

    fn storage(&self) -> impl Fn(DbErr) -> Error + '_ {
        move |source| Error::Storage {
            partition: self.key.clone(),
            source,
        }
    }
}

/// Picks the next id: the current millisecond timestamp, bumped past both the
/// persisted high-water mark and any numeric id still in the partition.
fn next_id<R: Record>(last_issued: i64, entries: &[Entry<R>], now_millis: i64) -> i64 {
    let newest = entries
        .iter()
        .filter_map(Entry::numeric_id)
        .max()
        .unwrap_or(0);
    now_millis
        .max(last_issued.saturating_add(1))
        .max(newest.saturating_add(1))
}
