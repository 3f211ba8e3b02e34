use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::catalog;
use crate::ui::style;

/// Quick links shown beside the bulletins, mirroring the student portal
/// shortcuts of the web dashboard.
const STALLION_TOOLS: [(&str, &str); 4] = [
    ("MMSU Official Site", "https://www.mmsu.edu.ph/"),
    ("Tuition Assessment", "https://my.mmsu.edu.ph/"),
    ("MVLE Learning", "https://mvle4.mmsu.edu.ph/my/"),
    ("Registrar Requests", "https://registrar.mmsu.edu.ph/"),
];

pub fn render_home(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);
    let profile = app.profile();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Welcome banner
            Constraint::Min(1),    // Bulletins and tools
            Constraint::Length(3), // Help
        ])
        .split(area);

    // Welcome banner
    let banner = Text::from(vec![
        Line::from(Span::styled(
            format!("Rise Higher, Stallion {}!", profile.first_name()),
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Dashboard for {}", profile.college)),
        Line::from(vec![
            Span::styled("Academic Year: ", Style::default().fg(palette.dim)),
            Span::raw("2025 - 2026 (2nd Semester)"),
            Span::styled("   Campus: ", Style::default().fg(palette.dim)),
            Span::raw(profile.campus.as_str()),
        ]),
        Line::from(Span::styled(
            "Jan 20, 2026 • Foundation Day",
            Style::default().fg(palette.accent),
        )),
    ]);
    Paragraph::new(banner)
        .block(
            Block::bordered()
                .title("Welcome")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(style::MMSU_GREEN)),
        )
        .wrap(Wrap { trim: true })
        .render(main_layout[0], buf);

    let content_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Bulletins
            Constraint::Percentage(40), // Tools
        ])
        .split(main_layout[1]);

    // Bulletins
    let mut bulletin_lines = Vec::new();
    for ann in catalog::announcements() {
        bulletin_lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", ann.category.as_str()),
                Style::default().fg(palette.accent),
            ),
            Span::styled(
                ann.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", ann.date), Style::default().fg(palette.dim)),
        ]));
        bulletin_lines.push(Line::from(Span::styled(
            format!("    {}", ann.content),
            Style::default().fg(palette.dim),
        )));
        bulletin_lines.push(Line::from(""));
    }
    Paragraph::new(Text::from(bulletin_lines))
        .block(
            Block::bordered()
                .title("Latest Bulletins")
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false })
        .render(content_layout[0], buf);

    // Stallion tools
    let mut tool_lines = Vec::new();
    for (label, url) in STALLION_TOOLS {
        tool_lines.push(Line::from(Span::styled(
            label,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        tool_lines.push(Line::from(Span::styled(
            format!("    {}", url),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::UNDERLINED),
        )));
        tool_lines.push(Line::from(""));
    }
    Paragraph::new(Text::from(tool_lines))
        .block(
            Block::bordered()
                .title("Stallion Tools")
                .border_type(BorderType::Rounded),
        )
        .render(content_layout[1], buf);

    // Help
    let help = Paragraph::new(
        "Tab/←→: Switch view • 1-5: Jump • 'c': Chat • 's': Settings • 't': Theme • 'q': Quit",
    )
    .block(
        Block::bordered()
            .title("Controls")
            .border_type(BorderType::Rounded),
    )
    .style(Style::default().fg(palette.dim))
    .alignment(Alignment::Center);
    help.render(main_layout[2], buf);
}
