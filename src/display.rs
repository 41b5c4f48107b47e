//! Text rendering of a [`WealthSummary`] for the terminal.
//!
//! Formatting is en-US: `$1,234.50`, grams to two decimals.

use crate::core::summary::WealthSummary;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Rounds to two decimal places and fixes the scale at two.
fn two_places(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats `amount` as US dollars, e.g. `$1,234.50` or `-$40.50`.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = two_places(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = two_places(rounded.abs()).to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Formats a weight as `7.50g`.
#[must_use]
pub fn format_grams(grams: Decimal) -> String {
    format!("{}g", two_places(grams))
}

/// `1 transaction`, `3 transactions`.
#[must_use]
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Terminal view of a [`WealthSummary`].
#[derive(Debug, Clone, Copy)]
pub struct SummaryView<'a>(pub &'a WealthSummary);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "Wealth Summary")?;
        writeln!(
            f,
            "Cash Balance: {} ({})",
            format_currency(summary.cash_total),
            count_label(summary.cash_entries, "transaction", "transactions")
        )?;

        writeln!(
            f,
            "Precious Metals ({})",
            count_label(summary.metal_entries, "entry", "entries")
        )?;
        if summary.metals.is_empty() {
            writeln!(f, "  No metals recorded")?;
        }
        for metal in &summary.metals {
            writeln!(
                f,
                "  {} {} {}",
                metal.metal_type,
                metal.purity,
                format_grams(metal.total_grams)
            )?;
        }

        writeln!(
            f,
            "Seed Bank ({})",
            count_label(summary.seed_entries, "entry", "entries")
        )?;
        if summary.seeds.is_empty() {
            writeln!(f, "  No seeds recorded")?;
        }
        for seed in &summary.seeds {
            writeln!(
                f,
                "  {} ({}): {}",
                seed.seed_name, seed.variety, seed.total_quantity
            )?;
        }
        Ok(())
    }
}

/// Renders the full summary as printable lines.
#[must_use]
pub fn render_summary(summary: &WealthSummary) -> String {
    SummaryView(summary).to_string()
}
