use anyhow::Result;
use packodds_config::Catalog;
use packodds_core::{
    AggregatedRow, Grouping, Order, PacketName, RowFilter, TextLookup, aggregate, display_name,
    format_percent, totals,
};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::cli::OutputFormat;

pub struct ShowArgs {
    pub packet: PacketName,
    pub grouping: Grouping,
    pub filter: Option<String>,
    pub format: OutputFormat,
    pub decimals: usize,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    packet: PacketName,
    grouping: Grouping,
    rows: Vec<&'a AggregatedRow>,
}

pub fn handle(catalog: &Catalog, args: ShowArgs) -> Result<()> {
    let packet = catalog.packet(args.packet)?;
    let rows = aggregate(packet, args.grouping)?;

    let filter = RowFilter::new(args.filter.as_deref().unwrap_or_default());
    let visible = filter.apply(&rows, &catalog.names);
    tracing::debug!(total = rows.len(), shown = visible.len(), "filtered rows");

    match args.format {
        OutputFormat::Json => {
            let output = ShowOutput {
                packet: packet.name,
                grouping: args.grouping,
                rows: visible,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!(
                "{} - {}\n",
                catalog.names.text(packet.name.as_str()),
                args.grouping.label()
            );
            if visible.is_empty() && !filter.is_empty() {
                println!("No cards match the filter.");
            } else if visible.is_empty() {
                println!("No cards in this packet.");
            } else {
                print!("{}", render_table(&visible, &catalog.names, args.decimals));
            }
        }
    }

    Ok(())
}

/// Render rows as an aligned text table with a totals line
pub fn render_table(rows: &[&AggregatedRow], lookup: &impl TextLookup, decimals: usize) -> String {
    let names: Vec<String> = rows.iter().map(|row| display_name(row, lookup)).collect();
    let name_width = names
        .iter()
        .map(|n| n.width())
        .chain(std::iter::once("Card Name".width()))
        .max()
        .unwrap_or_default();

    let headers: Vec<String> = Order::ALL
        .iter()
        .map(|order| format!("{} Probability", order.label()))
        .collect();
    let column_width = headers.iter().map(String::len).max().unwrap_or_default();

    let mut out = String::new();
    out.push_str(&pad("Card Name", name_width));
    for header in &headers {
        out.push_str(&format!("  {:>column_width$}", header));
    }
    out.push('\n');
    out.push_str(&"-".repeat(name_width + headers.len() * (column_width + 2)));
    out.push('\n');

    for (row, name) in rows.iter().zip(&names) {
        out.push_str(&pad(name, name_width));
        for order in Order::ALL {
            let value = format_percent(row.probabilities.get(order), decimals);
            out.push_str(&format!("  {:>column_width$}", value));
        }
        out.push('\n');
    }

    let sums = totals(rows.iter().copied());
    out.push_str(&pad("Total", name_width));
    for order in Order::ALL {
        let value = format_percent(sums.get(order), decimals);
        out.push_str(&format!("  {:>column_width$}", value));
    }
    out.push('\n');

    out
}

/// Left-align by terminal cells; `format!` padding counts chars, and glyphs
/// like the crown take two cells
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use packodds_core::{Bundle, Packet, Rarity, SubPacket, Verbatim};

    #[test]
    fn test_render_table() {
        let catalog = Catalog::builtin().unwrap();
        let packet = catalog.packet(PacketName::Pikachu).unwrap();
        let rows = aggregate(packet, Grouping::Accumulated).unwrap();
        let visible = RowFilter::new("zapdos").apply(&rows, &Verbatim);

        let table = render_table(&visible, &Verbatim, 3);
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with("Card Name"));
        assert!(lines[0].contains("1st to 3rd Probability"));
        assert!(lines[0].ends_with("5th Probability"));
        assert!(lines[2].starts_with("Zapdos ex"));
        assert!(lines[2].contains("0.000%"));
        assert!(lines.last().unwrap().starts_with("Total"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_table_totals_full_packet() {
        let catalog = Catalog::builtin().unwrap();
        let packet = catalog.packet(PacketName::Mew).unwrap();
        let rows = aggregate(packet, Grouping::Individual).unwrap();
        let visible: Vec<&AggregatedRow> = rows.iter().collect();

        let table = render_table(&visible, &Verbatim, 3);
        let total = table.lines().last().unwrap();
        assert_eq!(total.matches("100.000%").count(), 3);
    }

    #[test]
    fn test_render_table_aligns_wide_glyphs() {
        let packet = Packet::new(
            PacketName::Mew,
            vec![SubPacket::new(
                Order::Fifth,
                vec![
                    Bundle::new(Rarity::Diamond4, 0.5, &["Mew ex"]),
                    Bundle::new(Rarity::Star3, 0.25, &["Mew ex"]),
                    Bundle::new(Rarity::Crown, 0.25, &["Mew ex"]),
                ],
            )],
        );
        let rows = aggregate(&packet, Grouping::Individual).unwrap();
        let visible: Vec<&AggregatedRow> = rows.iter().collect();

        let table = render_table(&visible, &Verbatim, 3);
        let widths: Vec<usize> = table.lines().map(|line| line.width()).collect();
        assert_eq!(widths.len(), 6);
        assert!(widths.iter().all(|w| *w == widths[0]), "ragged table: {widths:?}\n{table}");
    }

    #[test]
    fn test_json_output_shape() {
        let catalog = Catalog::builtin().unwrap();
        let packet = catalog.packet(PacketName::Mew).unwrap();
        let rows = aggregate(packet, Grouping::Accumulated).unwrap();

        let output = ShowOutput {
            packet: packet.name,
            grouping: Grouping::Accumulated,
            rows: rows.iter().collect(),
        };
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["packet"], "Mew Packet");
        assert_eq!(json["grouping"], "accumulated");
        assert_eq!(json["rows"][0]["card"], "Exeggcute");
        assert!(json["rows"][0]["probabilities"]["FOURTH"].is_number());
    }
}
