//! Aggregation of stored records into summary rows.
//!
//! Pure functions over the output of [`RecordStore::get_all`](crate::core::store::RecordStore::get_all).
//! Groups come back in order of first appearance in the input, not sorted.

use crate::core::records::{CashRecord, MetalRecord, MetalType, Purity, SeedRecord};
use rust_decimal::Decimal;

/// Variety shown for seeds recorded without one.
pub const DEFAULT_VARIETY_LABEL: &str = "Standard";

/// Grouping key for seeds recorded without a variety.
const DEFAULT_VARIETY_KEY: &str = "default";

/// Total weight held for one metal and purity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetalGroup {
    /// Kind of metal
    pub metal_type: MetalType,
    /// Fineness
    pub purity: Purity,
    /// Sum of grams across the group
    pub total_grams: Decimal,
}

/// Total quantity held for one seed name and variety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedGroup {
    /// Plant name
    pub seed_name: String,
    /// Variety as displayed; [`DEFAULT_VARIETY_LABEL`] when none was recorded
    pub variety: String,
    /// Sum of quantities across the group
    pub total_quantity: u64,
}

/// Net cash balance: the sum of all amounts. Saturates at the `Decimal` bounds.
#[must_use]
pub fn sum_cash(records: &[CashRecord]) -> Decimal {
    records
        .iter()
        .fold(Decimal::ZERO, |total, r| total.saturating_add(r.amount))
}

/// Groups metal holdings by `(metal_type, purity)` and sums their weight.
#[must_use]
pub fn group_metals(records: &[MetalRecord]) -> Vec<MetalGroup> {
    let mut groups: Vec<MetalGroup> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|g| g.metal_type == record.metal_type && g.purity == record.purity)
        {
            Some(group) => group.total_grams = group.total_grams.saturating_add(record.grams),
            None => groups.push(MetalGroup {
                metal_type: record.metal_type,
                purity: record.purity,
                total_grams: record.grams,
            }),
        }
    }
    groups
}

/// Groups seed batches by `(seed_name, variety or "default")` and sums their
/// quantity. Batches without a variety share the `"default"` group of their seed
/// name, as does a variety literally named `default`; the group shows the variety
/// of its first batch, or [`DEFAULT_VARIETY_LABEL`] if that batch had none.
#[must_use]
pub fn group_seeds(records: &[SeedRecord]) -> Vec<SeedGroup> {
    let mut groups: Vec<(&str, SeedGroup)> = Vec::new();
    for record in records {
        let variety = record.variety.as_deref().filter(|v| !v.trim().is_empty());
        let key = variety.unwrap_or(DEFAULT_VARIETY_KEY);
        match groups
            .iter_mut()
            .find(|(k, g)| *k == key && g.seed_name == record.seed_name)
        {
            Some((_, group)) => {
                group.total_quantity = group
                    .total_quantity
                    .saturating_add(u64::from(record.quantity));
            }
            None => groups.push((
                key,
                SeedGroup {
                    seed_name: record.seed_name.clone(),
                    variety: variety.unwrap_or(DEFAULT_VARIETY_LABEL).to_string(),
                    total_quantity: u64::from(record.quantity),
                },
            )),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}
