//! Presentation helpers shared by the table views
//!
//! Aggregated rows carry fractions; percentages and rounding only happen here.

use crate::aggregate::{AggregatedRow, DrawProbabilities};
use crate::lookup::TextLookup;
use crate::model::{BuildUp, Order};

/// Decimal places shown in probability tables
pub const DEFAULT_DECIMALS: usize = 3;

/// Format a fraction (0-1) as a percentage, e.g. `0.0125` -> `"1.250%"`
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Card name as shown in the table, with the rarity glyphs in individual mode
pub fn display_name(row: &AggregatedRow, lookup: &impl TextLookup) -> String {
    let name = lookup.text(&row.key.card);
    match row.key.rarity {
        Some(rarity) => format!("{} {}", name, rarity.icon()),
        None => name.into_owned(),
    }
}

/// Per-position sums over a set of rows
pub fn totals<'a>(rows: impl IntoIterator<Item = &'a AggregatedRow>) -> DrawProbabilities {
    let mut sums = DrawProbabilities::default();
    for row in rows {
        for order in Order::ALL {
            sums.add(order, row.probabilities.get(order));
        }
    }
    sums
}

/// Case-insensitive card-name filter
///
/// Matches against the looked-up display name of the card only, so the
/// rarity part of an individual key never matches. Whitespace in the
/// filter text is significant: `" ex"` finds "Mew ex" but not "Exeggcute".
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    needle: String,
}

impl RowFilter {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    fn matches_text(&self, text: &str) -> bool {
        self.needle.is_empty() || text.to_lowercase().contains(&self.needle)
    }

    pub fn matches(&self, row: &AggregatedRow, lookup: &impl TextLookup) -> bool {
        self.matches_text(&lookup.text(&row.key.card))
    }

    /// Build-ups match on their name or any of their cards
    pub fn matches_buildup(&self, build_up: &BuildUp, lookup: &impl TextLookup) -> bool {
        self.matches_text(&build_up.name)
            || build_up
                .cards
                .iter()
                .any(|card| self.matches_text(&lookup.text(card)))
    }

    pub fn apply<'a>(
        &self,
        rows: &'a [AggregatedRow],
        lookup: &impl TextLookup,
    ) -> Vec<&'a AggregatedRow> {
        rows.iter().filter(|row| self.matches(row, lookup)).collect()
    }
}
