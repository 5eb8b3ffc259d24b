//! Packet domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Draw-position group a sub-packet applies to
///
/// These are slot groups, not sequential integers: the first three cards of
/// a pack share one rate table, the 4th and 5th card each have their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Order {
    FirstToThird,
    Fourth,
    Fifth,
}

impl Order {
    /// All draw positions in display order
    pub const ALL: [Order; 3] = [Order::FirstToThird, Order::Fourth, Order::Fifth];

    /// Column header used by the table views
    pub fn label(&self) -> &'static str {
        match self {
            Order::FirstToThird => "1st to 3rd",
            Order::Fourth => "4th",
            Order::Fifth => "5th",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::FirstToThird => "FIRST_TO_THIRD",
            Order::Fourth => "FOURTH",
            Order::Fifth => "FIFTH",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rarity tier of a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Diamond1,
    Diamond2,
    Diamond3,
    Diamond4,
    Star1,
    Star2,
    Star3,
    Crown,
}

impl Rarity {
    pub const ALL: [Rarity; 8] = [
        Rarity::Diamond1,
        Rarity::Diamond2,
        Rarity::Diamond3,
        Rarity::Diamond4,
        Rarity::Star1,
        Rarity::Star2,
        Rarity::Star3,
        Rarity::Crown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Diamond1 => "DIAMOND1",
            Rarity::Diamond2 => "DIAMOND2",
            Rarity::Diamond3 => "DIAMOND3",
            Rarity::Diamond4 => "DIAMOND4",
            Rarity::Star1 => "STAR1",
            Rarity::Star2 => "STAR2",
            Rarity::Star3 => "STAR3",
            Rarity::Crown => "CROWN",
        }
    }

    /// Glyphs shown next to a card name in individual mode
    pub fn icon(&self) -> &'static str {
        match self {
            Rarity::Diamond1 => "♢",
            Rarity::Diamond2 => "♢♢",
            Rarity::Diamond3 => "♢♢♢",
            Rarity::Diamond4 => "♢♢♢♢",
            Rarity::Star1 => "⭐️",
            Rarity::Star2 => "⭐️⭐️",
            Rarity::Star3 => "⭐️⭐️⭐️",
            Rarity::Crown => "👑",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a configured packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketName {
    #[serde(rename = "Mew Packet")]
    Mew,
    #[serde(rename = "Pikachu Packet")]
    Pikachu,
}

impl PacketName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PacketName::Mew => "Mew Packet",
            PacketName::Pikachu => "Pikachu Packet",
        }
    }
}

impl fmt::Display for PacketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PacketName {
    type Err = CoreError;

    /// Accepts the full name ("Mew Packet") or the short form ("mew"), any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let short = normalized
            .strip_suffix(" packet")
            .unwrap_or(&normalized)
            .trim();

        match short {
            "mew" => Ok(PacketName::Mew),
            "pikachu" => Ok(PacketName::Pikachu),
            _ => Err(CoreError::UnknownPacketName(s.to_string())),
        }
    }
}

/// A rarity tier within a draw position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub rarity: Rarity,
    /// Probability of drawing this bundle at its draw position (0-1)
    pub probability: f64,
    /// Cards sharing the bundle probability equally; duplicates allowed
    pub cards: Vec<String>,
}

impl Bundle {
    pub fn new(rarity: Rarity, probability: f64, cards: &[&str]) -> Self {
        Self {
            rarity,
            probability,
            cards: cards.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Share each listed card receives. Zero for a bundle without cards.
    pub fn card_share(&self) -> f64 {
        if self.cards.is_empty() {
            0.0
        } else {
            self.probability / self.cards.len() as f64
        }
    }
}

/// Rate table for one draw position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPacket {
    pub order: Order,
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

impl SubPacket {
    pub fn new(order: Order, bundles: Vec<Bundle>) -> Self {
        Self { order, bundles }
    }

    /// Sum of bundle probabilities (expected to be 1.0)
    pub fn total_probability(&self) -> f64 {
        self.bundles.iter().map(|b| b.probability).sum()
    }
}

/// A named draw configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub name: PacketName,
    #[serde(default)]
    pub sub_packets: Vec<SubPacket>,
}

impl Packet {
    pub fn new(name: PacketName, sub_packets: Vec<SubPacket>) -> Self {
        Self { name, sub_packets }
    }

    /// Total bundle mass supplied for a draw position across all sub-packets
    pub fn total_probability(&self, order: Order) -> f64 {
        self.sub_packets
            .iter()
            .filter(|s| s.order == order)
            .map(SubPacket::total_probability)
            .sum()
    }

    /// Number of distinct card names across all bundles
    pub fn distinct_cards(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for bundle in self.sub_packets.iter().flat_map(|s| &s.bundles) {
            for card in &bundle.cards {
                seen.insert(card.as_str());
            }
        }
        seen.len()
    }
}

/// A curated deck combination, display only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildUp {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<String>,
}

impl BuildUp {
    pub fn new(name: impl Into<String>, cards: &[&str]) -> Self {
        Self {
            name: name.into(),
            cards: cards.iter().map(|c| c.to_string()).collect(),
        }
    }
}
