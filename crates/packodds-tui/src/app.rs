use packodds_config::Catalog;
use packodds_core::{
    AggregatedRow, BuildUp, Grouping, Packet, PacketName, RowFilter, TextLookup, aggregate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Probabilities,
    BuildUps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filtering,
    ShowingHelp,
}

/// Initial view settings
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub packet: PacketName,
    pub grouping: Grouping,
    pub decimals: usize,
}

pub struct App {
    pub catalog: Catalog,
    pub tab: Tab,
    pub selected_packet: usize,
    pub grouping: Grouping,
    pub filter: String,
    pub input_mode: InputMode,
    pub rows: Vec<AggregatedRow>,
    pub selected_row: usize,
    pub decimals: usize,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(catalog: Catalog, options: AppOptions) -> Self {
        let selected_packet = catalog
            .packets
            .iter()
            .position(|p| p.name == options.packet)
            .unwrap_or(0);

        let mut app = Self {
            catalog,
            tab: Tab::Probabilities,
            selected_packet,
            grouping: options.grouping,
            filter: String::new(),
            input_mode: InputMode::Normal,
            rows: Vec::new(),
            selected_row: 0,
            decimals: options.decimals,
            status_message: None,
        };
        app.recompute();
        app
    }

    pub fn packet(&self) -> Option<&Packet> {
        self.catalog.packets.get(self.selected_packet)
    }

    /// Re-run the aggregator for the current packet and grouping
    fn recompute(&mut self) {
        self.selected_row = 0;
        let result = match self.packet() {
            Some(packet) => aggregate(packet, self.grouping),
            None => {
                self.rows.clear();
                self.status_message = Some("No packets in catalog".to_string());
                return;
            }
        };

        match result {
            Ok(rows) => self.rows = rows,
            Err(e) => {
                tracing::warn!(error = %e, "aggregation failed");
                self.rows.clear();
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn visible_rows(&self) -> Vec<&AggregatedRow> {
        RowFilter::new(&self.filter).apply(&self.rows, &self.catalog.names)
    }

    pub fn visible_buildups(&self) -> Vec<&BuildUp> {
        let filter = RowFilter::new(&self.filter);
        self.catalog
            .buildups
            .iter()
            .filter(|b| filter.matches_buildup(b, &self.catalog.names))
            .collect()
    }

    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Probabilities => self.visible_rows().len(),
            Tab::BuildUps => self.visible_buildups().len(),
        }
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected_row = (self.selected_row + 1) % len;
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected_row = if self.selected_row == 0 {
            len - 1
        } else {
            self.selected_row - 1
        };
    }

    pub fn next_packet(&mut self) {
        let count = self.catalog.packets.len();
        if count == 0 {
            return;
        }
        self.selected_packet = (self.selected_packet + 1) % count;
        self.recompute();
        self.announce_packet();
    }

    pub fn previous_packet(&mut self) {
        let count = self.catalog.packets.len();
        if count == 0 {
            return;
        }
        self.selected_packet = if self.selected_packet == 0 {
            count - 1
        } else {
            self.selected_packet - 1
        };
        self.recompute();
        self.announce_packet();
    }

    fn announce_packet(&mut self) {
        if let Some(packet) = self.packet() {
            let name = packet.name;
            self.status_message = Some(format!("Packet: {}", self.packet_label(name)));
        }
    }

    /// Packet name as shown to the user
    pub fn packet_label(&self, name: PacketName) -> String {
        self.catalog.names.text(name.as_str()).into_owned()
    }

    pub fn toggle_grouping(&mut self) {
        self.grouping = self.grouping.toggled();
        self.recompute();
        self.status_message = Some(self.grouping.label().to_string());
    }

    pub fn switch_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Probabilities => Tab::BuildUps,
            Tab::BuildUps => Tab::Probabilities,
        };
        self.selected_row = 0;
    }

    pub fn toggle_help(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::ShowingHelp => InputMode::Normal,
            _ => InputMode::ShowingHelp,
        };
    }

    pub fn start_filter(&mut self) {
        self.input_mode = InputMode::Filtering;
    }

    /// Leave filter input, keeping the filter text
    pub fn confirm_filter(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave filter input and clear the filter
    pub fn cancel_filter(&mut self) {
        self.input_mode = InputMode::Normal;
        self.filter.clear();
        self.selected_row = 0;
    }

    pub fn input_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected_row = 0;
    }

    pub fn input_backspace(&mut self) {
        self.filter.pop();
        self.selected_row = 0;
    }
}
