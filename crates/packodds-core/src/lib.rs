//! Core domain models and logic for packodds
//!
//! This crate contains:
//! - Domain models (Packet, SubPacket, Bundle, BuildUp)
//! - Probability aggregator (per-card drop rates per draw position)
//! - View helpers shared by the CLI and the TUI (filtering, formatting)

pub mod aggregate;
pub mod error;
pub mod lookup;
pub mod model;
pub mod view;

pub use aggregate::{AggregatedRow, CardKey, DrawProbabilities, Grouping, aggregate};
pub use error::{CoreError, Result};
pub use lookup::{TextLookup, Verbatim};
pub use model::{BuildUp, Bundle, Order, Packet, PacketName, Rarity, SubPacket};
pub use view::{RowFilter, display_name, format_percent, totals};
