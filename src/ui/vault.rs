use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::ui::style;

pub fn render_vault(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // File list
            Constraint::Length(1), // Notice
            Constraint::Length(3), // Path input
            Constraint::Length(3), // Help
        ])
        .split(area);

    let files = app.vault.files();
    let content = if files.is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Your vault is empty",
                Style::default().fg(palette.dim),
            )),
            Line::from(Span::styled(
                "Accepted: PDF, DOCX, TXT only",
                Style::default().fg(palette.dim),
            )),
        ])
    } else {
        let mut lines = Vec::new();
        for (idx, file) in files.iter().enumerate() {
            let selected = idx == app.vault_selected;
            let marker = if selected { "▶ " } else { "  " };
            let name_style = if selected {
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.highlight)),
                Span::styled(format!("[{}] ", display_kind(&file.kind)), Style::default().fg(palette.accent)),
                Span::styled(file.name.clone(), name_style),
                Span::styled(
                    format!("  {} • {}", file.size, file.date),
                    Style::default().fg(palette.dim),
                ),
            ]));
        }
        Text::from(lines)
    };

    Paragraph::new(content)
        .block(
            Block::bordered()
                .title(format!("Digital Vault ({} files, metadata only)", files.len()))
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false })
        .render(main_layout[0], buf);

    // Notice
    if let Some(notice) = &app.vault_notice {
        Paragraph::new(notice.as_str())
            .style(Style::default().fg(palette.accent))
            .alignment(Alignment::Center)
            .render(main_layout[1], buf);
    }

    // Path input
    Paragraph::new(format!("> {}", app.vault_input))
        .block(
            Block::bordered()
                .title("Add document by path")
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(palette.highlight))
        .render(main_layout[2], buf);

    let help = Paragraph::new("Enter: Add file • ↑/↓: Select • Del: Remove • Tab: Next view • Esc: Home")
        .block(
            Block::bordered()
                .title("Controls")
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    help.render(main_layout[3], buf);
}

/// Collapse the noisy Word subtypes for display, the way the web vault did.
fn display_kind(kind: &str) -> &str {
    if kind == "MSWORD" || kind.contains("WORDPROCESSINGML") {
        "DOC"
    } else if kind == "PLAIN" {
        "TXT"
    } else {
        kind
    }
}
