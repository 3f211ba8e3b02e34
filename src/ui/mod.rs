pub mod chat;
pub mod courses;
pub mod home;
pub mod settings;
pub mod style;
pub mod tutor;
pub mod vault;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Tabs, Widget},
};

use crate::app::{App, Tab};

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = style::palette(self.profile().theme);

        Block::default().style(style::base(&palette)).render(area, buf);

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header with the tab dock
                Constraint::Min(1),    // Active view
            ])
            .split(area);

        render_header(self, main_layout[0], buf);

        match self.tab {
            Tab::Home => home::render_home(self, main_layout[1], buf),
            Tab::Chat => chat::render_chat(self, main_layout[1], buf),
            Tab::Courses => courses::render_courses(self, main_layout[1], buf),
            Tab::Tutor => tutor::render_tutor(self, main_layout[1], buf),
            Tab::Vault => vault::render_vault(self, main_layout[1], buf),
        }

        if self.settings.is_some() {
            settings::render_settings(self, area, buf);
        }
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let palette = style::palette(app.profile().theme);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(
            Block::bordered()
                .title("🐎 MMSU Stallion Companion")
                .title_alignment(Alignment::Center)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(style::MMSU_GREEN)),
        )
        .style(Style::default().fg(palette.dim))
        .highlight_style(
            Style::default()
                .fg(palette.highlight)
                .add_modifier(Modifier::BOLD),
        );
    tabs.render(area, buf);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
