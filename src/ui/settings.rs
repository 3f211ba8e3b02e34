use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

use crate::app::{App, SettingsField};
use crate::ui::{centered_rect, style};

pub fn render_settings(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(form) = &app.settings else {
        return;
    };
    let palette = style::palette(app.profile().theme);

    let popup = centered_rect(70, 60, area);
    Clear.render(popup, buf);

    let row = |field: SettingsField, label: &str, value: String, cycles: bool| -> Vec<Line<'static>> {
        let focused = form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let value_span = if cycles {
            Span::styled(
                format!("◂ {} ▸", value),
                if focused {
                    Style::default()
                        .fg(palette.highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.fg)
                },
            )
        } else {
            Span::styled(
                format!("{}_", value),
                if focused {
                    Style::default()
                        .fg(palette.highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.fg)
                },
            )
        };

        vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.highlight)),
                Span::styled(format!("{}: ", label), Style::default().fg(palette.dim)),
                value_span,
            ]),
            Line::from(""),
        ]
    };

    let mut lines = vec![Line::from("")];
    lines.extend(row(SettingsField::Name, "Full Name", form.name.clone(), false));
    lines.extend(row(
        SettingsField::College,
        "College",
        form.college().to_string(),
        true,
    ));
    lines.extend(row(
        SettingsField::Campus,
        "Campus",
        form.campus().as_str().to_string(),
        true,
    ));
    lines.extend(row(
        SettingsField::StudentId,
        "Student ID",
        form.student_id.clone(),
        false,
    ));
    lines.push(Line::from(Span::styled(
        "Student IDs look like 24-123456 and unlock Tutor Mode.",
        Style::default().fg(palette.dim),
    )));

    Paragraph::new(Text::from(lines))
        .block(
            Block::bordered()
                .title("Academic Profile")
                .title_bottom("Enter: Save • Esc: Cancel • Tab: Field • ←/→: Change")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(style::MMSU_GOLD)),
        )
        .style(style::base(&palette))
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}
