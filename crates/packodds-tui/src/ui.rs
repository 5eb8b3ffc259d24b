use crate::app::{App, InputMode, Tab};
use packodds_core::{Order, Rarity, TextLookup, display_name, format_percent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Selectors + filter
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);
    draw_controls(f, app, chunks[1]);
    match app.tab {
        Tab::Probabilities => draw_probabilities(f, app, chunks[2]),
        Tab::BuildUps => draw_buildups(f, app, chunks[2]),
    }
    draw_footer(f, app, chunks[3]);

    if app.input_mode == InputMode::ShowingHelp {
        draw_help(f);
    }
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.tab {
        Tab::Probabilities => 0,
        Tab::BuildUps => 1,
    };

    let tabs = Tabs::new(vec!["Probabilities", "Popular Build-ups"])
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" packodds - Packet Probabilities "),
        )
        .style(Style::default().fg(Color::Cyan))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_controls(f: &mut Frame, app: &App, area: Rect) {
    let packet = app
        .packet()
        .map(|p| app.packet_label(p.name))
        .unwrap_or_else(|| "-".to_string());

    let filter_style = if app.input_mode == InputMode::Filtering {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let filter_text = if app.filter.is_empty() && app.input_mode != InputMode::Filtering {
        "Filter by card name".to_string()
    } else {
        app.filter.clone()
    };

    let line = Line::from(vec![
        Span::styled("Packet: ", Style::default().fg(Color::DarkGray)),
        Span::styled(packet, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  |  "),
        Span::styled(app.grouping.label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  |  "),
        Span::styled("/ ", Style::default().fg(Color::DarkGray)),
        Span::styled(filter_text, filter_style),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_probabilities(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_rows();

    let header_cells = std::iter::once("Card Name".to_string()).chain(
        Order::ALL
            .iter()
            .map(|order| format!("{} Probability", order.label())),
    );
    let header = Row::new(header_cells.map(Cell::from))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|row| {
            let mut cells = vec![Cell::from(display_name(row, &app.catalog.names))];
            for order in Order::ALL {
                cells.push(Cell::from(format_percent(
                    row.probabilities.get(order),
                    app.decimals,
                )));
            }
            Row::new(cells)
        })
        .collect();

    let title = format!(" {} / {} cards ", visible.len(), app.rows.len());
    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
        Constraint::Percentage(25),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_buildups(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, build_up) in app.visible_buildups().iter().enumerate() {
        let style = if i == app.selected_row {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(build_up.name.clone(), style)));

        for chunk in build_up.cards.chunks(5) {
            let cards: Vec<String> = chunk
                .iter()
                .map(|card| app.catalog.names.text(card).into_owned())
                .collect();
            lines.push(Line::from(Span::styled(
                format!("  {}", cards.join(" · ")),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::default());
    }

    if lines.is_empty() {
        lines.push(Line::from("No build-ups match the filter."));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Popular Build-ups "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "Ready".to_string()
    };

    let help_text = vec![
        Span::raw(status),
        Span::raw(" | "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(":quit "),
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(":move "),
        Span::styled("h/l", Style::default().fg(Color::Yellow)),
        Span::raw(":packet "),
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::raw(":grouping "),
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(":filter "),
        Span::styled("tab", Style::default().fg(Color::Yellow)),
        Span::raw(":view "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(":help"),
    ];

    let footer = Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    let mut text = String::from(
        "Keyboard shortcuts:\n\
        \n  j/k, up/down   - Move selection\
        \n  h/l, left/right - Previous/next packet\
        \n  a              - Toggle individual/accumulated\
        \n  /              - Filter by card name (enter keeps, esc clears)\
        \n  tab            - Switch probabilities/build-ups\
        \n  ?              - Close help\
        \n  q              - Quit\n\
        \nRarities:\n ",
    );
    for rarity in Rarity::ALL {
        text.push_str(&format!(" {} {}", rarity.icon(), rarity));
    }

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppOptions;
    use packodds_config::Catalog;
    use packodds_core::{Grouping, PacketName};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for line in buffer.content.chunks(buffer.area.width as usize) {
            for cell in line {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> App {
        App::new(
            Catalog::builtin().unwrap(),
            AppOptions {
                packet: PacketName::Mew,
                grouping: Grouping::Accumulated,
                decimals: 3,
            },
        )
    }

    #[test]
    fn test_draws_probability_table() {
        let screen = render(&app());
        assert!(screen.contains("Card Name"));
        assert!(screen.contains("Mew Packet"));
        assert!(screen.contains("Accumulated Probabilities"));
        assert!(screen.contains("Exeggcute"));
        assert!(screen.contains("%"));
    }

    #[test]
    fn test_draws_buildups() {
        let mut app = app();
        app.switch_tab();
        let screen = render(&app);
        assert!(screen.contains("Pikachu ex Electric"));
    }

    #[test]
    fn test_draws_help_overlay() {
        let mut app = app();
        app.toggle_help();
        let screen = render(&app);
        assert!(screen.contains("Keyboard shortcuts"));
        assert!(screen.contains("Rarities"));
        assert!(screen.contains("DIAMOND1"));
        assert!(screen.contains("CROWN"));
    }
}
