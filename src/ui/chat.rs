use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, StatefulWidget, Widget, Wrap},
};
use throbber_widgets_tui::{Throbber, WhichUse};

use crate::app::App;
use crate::chat::{ChatMode, Role};
use crate::ui::style;

pub fn render_chat(app: &mut App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode header
            Constraint::Min(1),    // Transcript
            Constraint::Length(1), // Typing indicator
            Constraint::Length(3), // Input box
            Constraint::Length(3), // Help
        ])
        .split(area);

    render_mode_header(app, main_layout[0], buf);
    render_transcript(app, main_layout[1], buf);
    render_typing_indicator(app, main_layout[2], buf);

    // Input box
    let input_widget = Paragraph::new(format!("> {}", app.chat_input))
        .block(
            Block::bordered()
                .title("Ask about MMSU...")
                .border_type(BorderType::Rounded),
        )
        .style(Style::default().fg(palette.highlight));
    input_widget.render(main_layout[3], buf);

    // Help
    let help = Paragraph::new(
        "Enter: Send • Ctrl+T: General/Tutor • ↑/↓: Scroll • Tab: Next view • Esc: Home",
    )
    .block(
        Block::bordered()
            .title("Controls")
            .border_type(BorderType::Rounded),
    )
    .style(Style::default().fg(palette.dim))
    .alignment(Alignment::Center);
    help.render(main_layout[4], buf);
}

fn render_mode_header(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);
    let mode = app.chat.mode();

    let icon = match mode {
        ChatMode::General => "🤖",
        ChatMode::Tutoring => "🎓",
    };
    let header = Paragraph::new(format!("{} {} • {}", icon, mode.label(), app.assistant.model_info()))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(match mode {
                    ChatMode::General => style::MMSU_GREEN,
                    ChatMode::Tutoring => style::MMSU_GOLD,
                })),
        )
        .style(Style::default().fg(palette.fg).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    header.render(area, buf);
}

fn render_transcript(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);

    let content = if app.chat.transcript().is_empty() {
        Text::from(vec![
            Line::from("Welcome to the Stallion AI Companion!"),
            Line::from(""),
            Line::from("I can help you with:"),
            Line::from("• Enrollment, scholarships, and campus announcements"),
            Line::from("• Your college's course offerings"),
            Line::from("• Academic tutoring (verified students, Tutor Mode)"),
            Line::from(""),
            Line::from("Try asking: 'When does enrollment close?'"),
        ])
    } else {
        let mut lines = Vec::new();
        for msg in app.chat.transcript() {
            let (prefix, prefix_color) = match msg.role {
                Role::User => ("You: ", palette.user),
                Role::Assistant => ("Stallion: ", palette.assistant),
            };

            let mut content_lines = msg.content.lines();
            let first_line = content_lines.next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![
                Span::styled(
                    prefix,
                    Style::default()
                        .fg(prefix_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(first_line, Style::default().fg(palette.fg)),
            ]));
            for line in content_lines {
                lines.push(Line::from(Span::styled(
                    format!("    {}", line),
                    Style::default().fg(palette.fg),
                )));
            }

            // Grounding citations render as link chips under the message.
            for link in &msg.links {
                lines.push(Line::from(vec![
                    Span::styled("    🔗 ", Style::default().fg(palette.dim)),
                    Span::styled(
                        link.title.clone(),
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" ({})", link.uri),
                        Style::default()
                            .fg(palette.dim)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
            }
            lines.push(Line::from(""));
        }
        Text::from(lines)
    };

    // Pin to the newest line unless the user scrolled away.
    let total_lines = content.lines.len() as u16;
    let visible = area.height.saturating_sub(2);
    let offset_top = total_lines
        .saturating_sub(visible)
        .saturating_sub(app.chat.scroll_from_bottom());

    let chat_widget = Paragraph::new(content)
        .block(
            Block::bordered()
                .title("Transcript (↑/↓ to scroll)")
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset_top, 0));

    chat_widget.render(area, buf);
}

fn render_typing_indicator(app: &mut App, area: Rect, buf: &mut Buffer) {
    if !app.chat.is_awaiting() {
        return;
    }
    let palette = style::palette(app.profile().theme);

    let throbber = Throbber::default()
        .label("Thinking...")
        .style(Style::default().fg(palette.dim))
        .throbber_style(Style::default().fg(palette.highlight))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(WhichUse::Spin);
    StatefulWidget::render(throbber, area, buf, &mut app.throbber);
}
