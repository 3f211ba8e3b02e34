use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::ui::style;

pub fn render_tutor(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);
    let verified = app.profile().has_verified_student_id();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Landing card
            Constraint::Length(3), // Help
        ])
        .split(area);

    let status_line = if verified {
        Line::from(Span::styled(
            format!(
                "Student ID on file: {}. You're ready to go.",
                app.profile().student_id.as_deref().unwrap_or("")
            ),
            Style::default().fg(palette.assistant),
        ))
    } else {
        Line::from(Span::styled(
            "A verified student ID (YY-XXXXXX) is required. Add yours under Settings.",
            Style::default().fg(palette.accent),
        ))
    };

    let content = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "🎓 Stallion Tutor Room",
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Expert academic deep-dives grounded in MMSU curriculum data."),
        Line::from(format!(
            "Sessions are scoped to {}.",
            app.profile().college
        )),
        Line::from(""),
        status_line,
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start a tutoring session",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ]);

    Paragraph::new(content)
        .block(
            Block::bordered()
                .title("Tutor")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(style::MMSU_GOLD)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(main_layout[0], buf);

    let help = Paragraph::new("Enter: Start session • Tab: Next view • 's': Settings • 'q': Quit")
        .block(
            Block::bordered()
                .title("Controls")
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    help.render(main_layout[1], buf);
}
