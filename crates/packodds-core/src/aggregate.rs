//! Probability aggregator - per-card drop rates per draw position
//!
//! Turns the nested packet -> sub-packet -> bundle -> card structure into
//! one row per card key. Output order is first-seen order of the keys, so
//! the authorial card order of the catalog is preserved.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::model::{Order, Packet, Rarity};
use crate::{CoreError, Result};

/// How card occurrences are merged into rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One row per (card, rarity) pair
    #[default]
    Individual,
    /// One row per card, merged across all rarities
    Accumulated,
}

impl Grouping {
    pub fn from_accumulate(accumulate: bool) -> Self {
        if accumulate {
            Grouping::Accumulated
        } else {
            Grouping::Individual
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Grouping::Individual => Grouping::Accumulated,
            Grouping::Accumulated => Grouping::Individual,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grouping::Individual => "Individual Probabilities",
            Grouping::Accumulated => "Accumulated Probabilities",
        }
    }
}

/// Row identity: a card, optionally qualified by rarity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CardKey {
    pub card: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
}

impl CardKey {
    pub fn new(card: &str, rarity: Rarity, grouping: Grouping) -> Self {
        Self {
            card: card.to_string(),
            rarity: match grouping {
                Grouping::Individual => Some(rarity),
                Grouping::Accumulated => None,
            },
        }
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rarity {
            Some(rarity) => write!(f, "{} ({})", self.card, rarity),
            None => f.write_str(&self.card),
        }
    }
}

/// Accumulated probability (fraction 0-1) for each draw position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DrawProbabilities {
    pub first_to_third: f64,
    pub fourth: f64,
    pub fifth: f64,
}

impl DrawProbabilities {
    pub fn get(&self, order: Order) -> f64 {
        match order {
            Order::FirstToThird => self.first_to_third,
            Order::Fourth => self.fourth,
            Order::Fifth => self.fifth,
        }
    }

    pub fn add(&mut self, order: Order, probability: f64) {
        match order {
            Order::FirstToThird => self.first_to_third += probability,
            Order::Fourth => self.fourth += probability,
            Order::Fifth => self.fifth += probability,
        }
    }
}

/// One output row of the aggregator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRow {
    #[serde(flatten)]
    pub key: CardKey,
    /// First-seen position of the key
    pub index: usize,
    pub probabilities: DrawProbabilities,
}

/// Aggregate a packet into per-card probability rows.
///
/// Every card listing in a bundle receives `probability / cards.len()`;
/// a card listed twice in one bundle receives two shares. Sums are not
/// validated against 1.0, whatever the packet encodes is propagated.
///
/// Fails with [`CoreError::InvalidArgument`] if the packet has no
/// sub-packets.
pub fn aggregate(packet: &Packet, grouping: Grouping) -> Result<Vec<AggregatedRow>> {
    if packet.sub_packets.is_empty() {
        return Err(CoreError::InvalidArgument(format!(
            "packet '{}' has no sub-packets",
            packet.name
        )));
    }

    // Insertion-ordered: `rows` is in first-seen order, `positions` maps key -> slot in `rows`
    let mut positions: HashMap<CardKey, usize> = HashMap::new();
    let mut rows: Vec<AggregatedRow> = Vec::new();

    for sub_packet in &packet.sub_packets {
        for bundle in &sub_packet.bundles {
            let share = bundle.card_share();
            for card in &bundle.cards {
                let key = CardKey::new(card, bundle.rarity, grouping);
                let slot = match positions.get(&key) {
                    Some(&slot) => slot,
                    None => {
                        let slot = rows.len();
                        positions.insert(key.clone(), slot);
                        rows.push(AggregatedRow {
                            key,
                            index: slot,
                            probabilities: DrawProbabilities::default(),
                        });
                        slot
                    }
                };
                rows[slot].probabilities.add(sub_packet.order, share);
            }
        }
    }

    tracing::debug!(
        packet = %packet.name,
        grouping = ?grouping,
        rows = rows.len(),
        "aggregated packet"
    );

    Ok(rows)
}
