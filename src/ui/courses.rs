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

pub fn render_courses(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);
    let college = app.profile().college;

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Course cards
            Constraint::Length(3), // Help
        ])
        .split(area);

    let courses = catalog::courses_for(college);

    let content = if courses.is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No courses published yet for {}.", college),
                Style::default().fg(palette.dim),
            )),
        ])
    } else {
        let mut lines = Vec::new();
        for course in courses {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", course.code),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    course.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} Units", course.credits),
                    Style::default().fg(palette.dim),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    \"{}\"", course.description),
                Style::default()
                    .fg(palette.dim)
                    .add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::from(""));
        }
        Text::from(lines)
    };

    Paragraph::new(content)
        .block(
            Block::bordered()
                .title(format!("Catalog: {}", college))
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false })
        .render(main_layout[0], buf);

    let help = Paragraph::new("Change college under Settings ('s' on Home) • Tab: Next view • 'q': Quit")
        .block(
            Block::bordered()
                .title("Controls")
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    help.render(main_layout[1], buf);
}
