//! Wealth summary generation.
//!
//! Reads every partition in full and reduces it with the aggregator. Nothing is
//! cached; each call reflects the current stored state.

use crate::{
    core::{
        aggregate::{self, MetalGroup, SeedGroup},
        portfolio::Portfolio,
    },
    errors::Result,
};
use rust_decimal::Decimal;

/// Totals across all asset categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WealthSummary {
    /// Net cash balance
    pub cash_total: Decimal,
    /// Number of cash transactions
    pub cash_entries: usize,
    /// Metal holdings grouped by type and purity
    pub metals: Vec<MetalGroup>,
    /// Number of metal records
    pub metal_entries: usize,
    /// Seed inventory grouped by name and variety
    pub seeds: Vec<SeedGroup>,
    /// Number of seed records
    pub seed_entries: usize,
}

/// Builds a [`WealthSummary`] from the current contents of `portfolio`.
///
/// # Errors
/// Returns an error if any partition cannot be read.
pub async fn generate_summary(portfolio: &Portfolio) -> Result<WealthSummary> {
    let cash = portfolio.cash.get_all().await?;
    let metals = portfolio.metals.get_all().await?;
    let seeds = portfolio.seeds.get_all().await?;

    Ok(WealthSummary {
        cash_total: aggregate::sum_cash(&cash),
        cash_entries: cash.len(),
        metals: aggregate::group_metals(&metals),
        metal_entries: metals.len(),
        seeds: aggregate::group_seeds(&seeds),
        seed_entries: seeds.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::records::{CashPatch, MetalType, Purity},
        test_utils::*,
    };
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_summary_of_empty_portfolio() -> Result<()> {
        let (_db, portfolio) = setup_with_portfolio().await?;

        let summary = generate_summary(&portfolio).await?;

        assert_eq!(summary.cash_total, Decimal::ZERO);
        assert_eq!(summary.cash_entries, 0);
        assert!(summary.metals.is_empty());
        assert!(summary.seeds.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_across_categories() -> Result<()> {
        let (_db, portfolio) = setup_with_portfolio().await?;
        portfolio.cash.create(cash_fields("2024-01-01", dec!(2500))).await?;
        portfolio.cash.create(cash_fields("2024-01-05", dec!(-120.75))).await?;
        portfolio
            .metals
            .create(metal_fields(MetalType::Gold, Purity::K22, dec!(8)))
            .await?;
        portfolio
            .metals
            .create(metal_fields(MetalType::Gold, Purity::K22, dec!(4.5)))
            .await?;
        portfolio.seeds.create(seed_fields("Squash", Some("Butternut"), 20)).await?;

        let summary = generate_summary(&portfolio).await?;

        assert_eq!(summary.cash_total, dec!(2379.25));
        assert_eq!(summary.cash_entries, 2);
        assert_eq!(summary.metal_entries, 2);
        assert_eq!(summary.metals.len(), 1);
        assert_eq!(summary.metals[0].total_grams, dec!(12.5));
        assert_eq!(summary.seed_entries, 1);
        assert_eq!(summary.seeds[0].total_quantity, 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_summary_reflects_latest_writes() -> Result<()> {
        let (_db, portfolio) = setup_with_portfolio().await?;
        let entry = portfolio.cash.create(cash_fields("2024-01-01", dec!(50))).await?;
        assert_eq!(generate_summary(&portfolio).await?.cash_total, dec!(50));

        portfolio
            .cash
            .update(
                &entry.id,
                CashPatch {
                    amount: Some(dec!(75)),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(generate_summary(&portfolio).await?.cash_total, dec!(75));

        portfolio.cash.delete(&entry.id).await?;
        let summary = generate_summary(&portfolio).await?;
        assert_eq!(summary.cash_total, Decimal::ZERO);
        assert_eq!(summary.cash_entries, 0);
        Ok(())
    }
}
