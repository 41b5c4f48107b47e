//! Record types for each asset category.
//!
//! Every category has three shapes: the stored record (with its id), the `*Fields`
//! a caller supplies to create one, and a `*Patch` whose `Some` fields overwrite
//! the stored ones on update. Ids are not part of either input type, so an update
//! can never change them.

use crate::{
    core::lenient,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;

/// Opaque record identifier, assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it was issued by this crate's generator.
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// The three asset categories, one partition each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Cash transactions
    Cash,
    /// Precious metal holdings
    Metals,
    /// Seed inventory
    Seeds,
}

impl Category {
    /// Human-readable category name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Metals => "metals",
            Self::Seeds => "seeds",
        }
    }
}

/// A stored entry in one partition.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Field values required to create a record
    type Fields: Send;
    /// Partial update; only `Some` fields are applied
    type Patch: Send;

    /// Category this record belongs to
    const CATEGORY: Category;

    /// The record's identifier
    fn id(&self) -> &RecordId;

    /// Builds a stored record from freshly assigned `id` and caller `fields`.
    fn from_fields(id: RecordId, fields: Self::Fields) -> Self;

    /// Applies `patch` in place. Fields absent from the patch are preserved.
    fn merge(&mut self, patch: Self::Patch);
}

// ---------------------------------------------------------------------------
// Cash

/// A cash transaction. Positive amounts are income, negative are expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRecord {
    /// Store-assigned id
    pub id: RecordId,
    /// Transaction date
    pub date: NaiveDate,
    /// Signed amount
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Decimal,
    /// Free-text note
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// Fields for a new cash record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashFields {
    /// Transaction date
    pub date: NaiveDate,
    /// Signed amount
    pub amount: Decimal,
    /// Free-text note
    pub notes: Option<String>,
}

/// Partial update for a cash record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashPatch {
    /// New date
    pub date: Option<NaiveDate>,
    /// New amount
    pub amount: Option<Decimal>,
    /// New note; `Some(None)` clears it
    pub notes: Option<Option<String>>,
}

impl Record for CashRecord {
    type Fields = CashFields;
    type Patch = CashPatch;

    const CATEGORY: Category = Category::Cash;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: CashFields) -> Self {
        Self {
            id,
            date: fields.date,
            amount: fields.amount,
            notes: fields.notes,
        }
    }

    fn merge(&mut self, patch: CashPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

// ---------------------------------------------------------------------------
// Precious metals

/// Kind of precious metal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    /// Gold
    Gold,
    /// Silver
    Silver,
    /// Platinum
    Platinum,
}

impl MetalType {
    /// All metal types in form order.
    pub const ALL: [Self; 3] = [Self::Gold, Self::Silver, Self::Platinum];

    /// Purity preselected when this metal is chosen.
    #[must_use]
    pub const fn default_purity(self) -> Purity {
        Purity::options_for(self)[0]
    }

    /// Lowercase storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for MetalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Platinum => "Platinum",
        })
    }
}

/// Fineness grade. Gold is graded in karats, silver and platinum in parts per
/// thousand; `900` is shared by silver and platinum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purity {
    /// 24 karat
    #[serde(rename = "24k")]
    K24,
    /// 22 karat
    #[serde(rename = "22k")]
    K22,
    /// 18 karat
    #[serde(rename = "18k")]
    K18,
    /// 14 karat
    #[serde(rename = "14k")]
    K14,
    /// 10 karat
    #[serde(rename = "10k")]
    K10,
    /// .999 fine
    #[serde(rename = "999")]
    Fine999,
    /// .950 fine
    #[serde(rename = "950")]
    Fine950,
    /// .925 sterling
    #[serde(rename = "925")]
    Fine925,
    /// .900 fine
    #[serde(rename = "900")]
    Fine900,
    /// .850 fine
    #[serde(rename = "850")]
    Fine850,
    /// .800 fine
    #[serde(rename = "800")]
    Fine800,
}

impl Purity {
    /// Purity options offered for `metal`, first one being the default.
    #[must_use]
    pub const fn options_for(metal: MetalType) -> &'static [Self] {
        match metal {
            MetalType::Gold => &[Self::K24, Self::K22, Self::K18, Self::K14, Self::K10],
            MetalType::Silver => &[Self::Fine999, Self::Fine925, Self::Fine900, Self::Fine800],
            MetalType::Platinum => &[Self::Fine950, Self::Fine900, Self::Fine850],
        }
    }

    /// Storage and display name (`"24k"`, `"925"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::K24 => "24k",
            Self::K22 => "22k",
            Self::K18 => "18k",
            Self::K14 => "14k",
            Self::K10 => "10k",
            Self::Fine999 => "999",
            Self::Fine950 => "950",
            Self::Fine925 => "925",
            Self::Fine900 => "900",
            Self::Fine850 => "850",
            Self::Fine800 => "800",
        }
    }

    /// Whether this grade is one of the options for `metal`.
    #[must_use]
    pub fn applies_to(self, metal: MetalType) -> bool {
        Self::options_for(metal).contains(&self)
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A precious metal holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalRecord {
    /// Store-assigned id
    pub id: RecordId,
    /// Acquisition date
    pub date: NaiveDate,
    /// Kind of metal
    pub metal_type: MetalType,
    /// Fineness
    pub purity: Purity,
    /// Weight in grams
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub grams: Decimal,
    /// Free-text note
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl MetalRecord {
    /// Whether the stored purity belongs to the stored metal's option set.
    #[must_use]
    pub fn purity_matches(&self) -> bool {
        self.purity.applies_to(self.metal_type)
    }
}

/// Fields for a new metal record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetalFields {
    /// Acquisition date
    pub date: NaiveDate,
    /// Kind of metal
    pub metal_type: MetalType,
    /// Fineness
    pub purity: Purity,
    /// Weight in grams
    pub grams: Decimal,
    /// Free-text note
    pub notes: Option<String>,
}

impl MetalFields {
    /// Checks the entry-form rules: non-negative weight and a purity offered for
    /// the chosen metal.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.grams < Decimal::ZERO {
            return Err(Error::validation("grams", "weight cannot be negative"));
        }
        if !self.purity.applies_to(self.metal_type) {
            return Err(Error::validation(
                "purity",
                format!("{} is not a purity for {}", self.purity, self.metal_type.as_str()),
            ));
        }
        Ok(())
    }
}

/// Partial update for a metal record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetalPatch {
    /// New date
    pub date: Option<NaiveDate>,
    /// New metal type
    pub metal_type: Option<MetalType>,
    /// New purity
    pub purity: Option<Purity>,
    /// New weight
    pub grams: Option<Decimal>,
    /// New note; `Some(None)` clears it
    pub notes: Option<Option<String>>,
}

impl Record for MetalRecord {
    type Fields = MetalFields;
    type Patch = MetalPatch;

    const CATEGORY: Category = Category::Metals;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: MetalFields) -> Self {
        Self {
            id,
            date: fields.date,
            metal_type: fields.metal_type,
            purity: fields.purity,
            grams: fields.grams,
            notes: fields.notes,
        }
    }

    fn merge(&mut self, patch: MetalPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(metal_type) = patch.metal_type {
            self.metal_type = metal_type;
        }
        if let Some(purity) = patch.purity {
            self.purity = purity;
        }
        if let Some(grams) = patch.grams {
            self.grams = grams;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

// ---------------------------------------------------------------------------
// Seeds

/// A batch of saved seeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// Store-assigned id
    pub id: RecordId,
    /// Entry date
    pub date: NaiveDate,
    /// Plant name, e.g. "Tomato"
    pub seed_name: String,
    /// Cultivar, e.g. "Beefsteak"
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub variety: Option<String>,
    /// Number of seeds or packets
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: u32,
    /// Where the seeds came from
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    /// Harvest year
    #[serde(
        default,
        deserialize_with = "lenient::optional_integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub collection_year: Option<i32>,
    /// Free-text note
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// Fields for a new seed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFields {
    /// Entry date
    pub date: NaiveDate,
    /// Plant name
    pub seed_name: String,
    /// Cultivar
    pub variety: Option<String>,
    /// Number of seeds or packets
    pub quantity: u32,
    /// Where the seeds came from
    pub source: Option<String>,
    /// Harvest year
    pub collection_year: Option<i32>,
    /// Free-text note
    pub notes: Option<String>,
}

impl SeedFields {
    /// Checks the entry-form rules: a seed name and a positive quantity.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.seed_name.trim().is_empty() {
            return Err(Error::validation("seed_name", "seed name is required"));
        }
        if self.quantity == 0 {
            return Err(Error::validation("quantity", "quantity must be at least 1"));
        }
        Ok(())
    }
}

/// Partial update for a seed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedPatch {
    /// New date
    pub date: Option<NaiveDate>,
    /// New plant name
    pub seed_name: Option<String>,
    /// New cultivar; `Some(None)` clears it
    pub variety: Option<Option<String>>,
    /// New quantity
    pub quantity: Option<u32>,
    /// New source; `Some(None)` clears it
    pub source: Option<Option<String>>,
    /// New harvest year; `Some(None)` clears it
    pub collection_year: Option<Option<i32>>,
    /// New note; `Some(None)` clears it
    pub notes: Option<Option<String>>,
}

impl Record for SeedRecord {
    type Fields = SeedFields;
    type Patch = SeedPatch;

    const CATEGORY: Category = Category::Seeds;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_fields(id: RecordId, fields: SeedFields) -> Self {
        Self {
            id,
            date: fields.date,
            seed_name: fields.seed_name,
            variety: fields.variety,
            quantity: fields.quantity,
            source: fields.source,
            collection_year: fields.collection_year,
            notes: fields.notes,
        }
    }

    fn merge(&mut self, patch: SeedPatch) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(seed_name) = patch.seed_name {
            self.seed_name = seed_name;
        }
        if let Some(variety) = patch.variety {
            self.variety = variety;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(collection_year) = patch.collection_year {
            self.collection_year = collection_year;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}
