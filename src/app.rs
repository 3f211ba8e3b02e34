use crate::chat::{ChatMode, ChatSession};
use crate::config::CompanionConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::gemini::GeminiClient;
use crate::llm::AssistantStrategy;
use crate::profile::{Campus, College, ProfilePatch, ProfileStore, UserProfile};
use crate::storage::StateStore;
use crate::vault::{FileUpload, VaultStore, REJECTION_NOTICE};
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    DefaultTerminal,
};
use color_eyre::Result;
use std::path::Path;
use std::sync::Arc;

/// Top-level views, in dock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Chat,
    Courses,
    Tutor,
    Vault,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Chat, Tab::Courses, Tab::Tutor, Tab::Vault];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Chat => "Chat",
            Tab::Courses => "Catalog",
            Tab::Tutor => "Tutor",
            Tab::Vault => "Vault",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Name,
    College,
    Campus,
    StudentId,
}

impl SettingsField {
    const ORDER: [SettingsField; 4] = [
        SettingsField::Name,
        SettingsField::College,
        SettingsField::Campus,
        SettingsField::StudentId,
    ];
}

/// Working copy of the profile while the settings popup is open. Nothing is
/// persisted until the form is saved.
#[derive(Debug)]
pub struct SettingsForm {
    pub name: String,
    pub student_id: String,
    pub college_idx: usize,
    pub campus_idx: usize,
    pub focus: SettingsField,
}

impl SettingsForm {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            student_id: profile.student_id.clone().unwrap_or_default(),
            college_idx: College::ALL
                .iter()
                .position(|c| *c == profile.college)
                .unwrap_or(0),
            campus_idx: Campus::ALL
                .iter()
                .position(|c| *c == profile.campus)
                .unwrap_or(0),
            focus: SettingsField::Name,
        }
    }

    pub fn college(&self) -> College {
        College::ALL[self.college_idx % College::ALL.len()]
    }

    pub fn campus(&self) -> Campus {
        Campus::ALL[self.campus_idx % Campus::ALL.len()]
    }

    pub fn patch(&self) -> ProfilePatch {
        ProfilePatch {
            name: Some(self.name.clone()),
            college: Some(self.college()),
            campus: Some(self.campus()),
            theme: None,
            student_id: Some(self.student_id.clone()),
        }
    }

    pub fn next_field(&mut self) {
        let at = SettingsField::ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = SettingsField::ORDER[(at + 1) % SettingsField::ORDER.len()];
    }

    pub fn prev_field(&mut self) {
        let at = SettingsField::ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = SettingsField::ORDER[(at + SettingsField::ORDER.len() - 1) % SettingsField::ORDER.len()];
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            SettingsField::Name => self.name.push(ch),
            SettingsField::StudentId => self.student_id.push(ch),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            SettingsField::Name => {
                self.name.pop();
            }
            SettingsField::StudentId => {
                self.student_id.pop();
            }
            _ => {}
        }
    }

    pub fn cycle_left(&mut self) {
        match self.focus {
            SettingsField::College => {
                self.college_idx = (self.college_idx + College::ALL.len() - 1) % College::ALL.len();
            }
            SettingsField::Campus => {
                self.campus_idx = (self.campus_idx + Campus::ALL.len() - 1) % Campus::ALL.len();
            }
            _ => {}
        }
    }

    pub fn cycle_right(&mut self) {
        match self.focus {
            SettingsField::College => {
                self.college_idx = (self.college_idx + 1) % College::ALL.len();
            }
            SettingsField::Campus => {
                self.campus_idx = (self.campus_idx + 1) % Campus::ALL.len();
            }
            _ => {}
        }
    }
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Currently rendered view.
    pub tab: Tab,
    /// Settings popup, when open.
    pub settings: Option<SettingsForm>,

    pub profile_store: ProfileStore,
    pub vault: VaultStore,
    pub chat: ChatSession,
    /// Assistant backend shared with in-flight turn tasks.
    pub assistant: Arc<AssistantStrategy>,

    /// Current chat input buffer.
    pub chat_input: String,
    /// Path being typed into the vault.
    pub vault_input: String,
    pub vault_selected: usize,
    pub vault_notice: Option<String>,

    /// Event handler.
    pub events: EventHandler,
    pub throbber: throbber_widgets_tui::ThrobberState,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: CompanionConfig) -> Result<Self> {
        let store = StateStore::open(&config.db_path)?;
        let profile_store = ProfileStore::load(store.clone());
        let vault = VaultStore::load(store);

        let assistant = Arc::new(AssistantStrategy::Gemini(GeminiClient::new(&config)));
        tracing::info!("Assistant backend: {}", assistant.model_info());

        Ok(Self {
            running: true,
            tab: Tab::Home,
            settings: None,
            profile_store,
            vault,
            chat: ChatSession::new(),
            assistant,
            chat_input: String::new(),
            vault_input: String::new(),
            vault_selected: 0,
            vault_notice: None,
            events: EventHandler::new(),
            throbber: throbber_widgets_tui::ThrobberState::default(),
        })
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| {
                    frame.render_widget(&mut self, frame.area());
                })?;

                // save power
                needs_redraw = false;
            }

            match self.events.next().await {
                Ok(event) => match event {
                    Event::Tick => {
                        // The typing indicator is the only animation.
                        if self.chat.is_awaiting() {
                            self.throbber.calc_next();
                            needs_redraw = true;
                        }
                    }
                    Event::Crossterm(event) => {
                        if let crossterm::event::Event::Key(key_event) = event {
                            self.handle_key_events(key_event)?;
                            needs_redraw = true;
                        }
                    }
                    Event::App(app_event) => {
                        self.handle_app_event(app_event);
                        needs_redraw = true;
                    }
                },
                Err(e) => tracing::error!("Event error: {}", e),
            }
        }
        Ok(())
    }

    fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::NextTab => self.tab = self.tab.next(),
            AppEvent::PrevTab => self.tab = self.tab.prev(),
            AppEvent::GoTab(tab) => self.tab = tab,
            AppEvent::ToggleTheme => self.profile_store.toggle_theme(),

            AppEvent::OpenSettings => {
                self.settings = Some(SettingsForm::from_profile(self.profile_store.profile()));
            }
            AppEvent::CloseSettings => self.settings = None,
            AppEvent::SaveSettings => {
                if let Some(form) = self.settings.take() {
                    self.profile_store.update(form.patch());
                }
            }
            AppEvent::SettingsInput(ch) => {
                if let Some(form) = &mut self.settings {
                    form.input(ch);
                }
            }
            AppEvent::SettingsBackspace => {
                if let Some(form) = &mut self.settings {
                    form.backspace();
                }
            }
            AppEvent::SettingsNextField => {
                if let Some(form) = &mut self.settings {
                    form.next_field();
                }
            }
            AppEvent::SettingsPrevField => {
                if let Some(form) = &mut self.settings {
                    form.prev_field();
                }
            }
            AppEvent::SettingsCycleLeft => {
                if let Some(form) = &mut self.settings {
                    form.cycle_left();
                }
            }
            AppEvent::SettingsCycleRight => {
                if let Some(form) = &mut self.settings {
                    form.cycle_right();
                }
            }

            AppEvent::ChatInput(ch) => self.chat_input.push(ch),
            AppEvent::ChatBackspace => {
                self.chat_input.pop();
            }
            AppEvent::ChatSubmit => self.submit_chat_message(),
            AppEvent::ChatToggleMode => self.toggle_chat_mode(),
            AppEvent::ScrollChatUp => self.chat.scroll_up(),
            AppEvent::ScrollChatDown => self.chat.scroll_down(),
            AppEvent::AssistantReply(outcome) => self.chat.complete(outcome),

            AppEvent::StartTutorSession => self.start_tutor_session(),

            AppEvent::VaultInput(ch) => self.vault_input.push(ch),
            AppEvent::VaultBackspace => {
                self.vault_input.pop();
            }
            AppEvent::VaultAdd => self.add_vault_file(),
            AppEvent::VaultDeleteSelected => self.delete_selected_vault_file(),
            AppEvent::VaultNext => {
                if self.vault_selected + 1 < self.vault.files().len() {
                    self.vault_selected += 1;
                }
            }
            AppEvent::VaultPrev => {
                self.vault_selected = self.vault_selected.saturating_sub(1);
            }
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        // The settings popup captures everything while it is open.
        if self.settings.is_some() {
            match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::CloseSettings),
                KeyCode::Enter => self.events.send(AppEvent::SaveSettings),
                KeyCode::Tab | KeyCode::Down => self.events.send(AppEvent::SettingsNextField),
                KeyCode::BackTab | KeyCode::Up => self.events.send(AppEvent::SettingsPrevField),
                KeyCode::Left => self.events.send(AppEvent::SettingsCycleLeft),
                KeyCode::Right => self.events.send(AppEvent::SettingsCycleRight),
                KeyCode::Backspace => self.events.send(AppEvent::SettingsBackspace),
                KeyCode::Char(ch) => self.events.send(AppEvent::SettingsInput(ch)),
                _ => {}
            }
            return Ok(());
        }

        match self.tab {
            // Text-entry views: printable keys go to the buffer.
            Tab::Chat => match key_event.code {
                KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                    self.events.send(AppEvent::Quit)
                }
                KeyCode::Char('t' | 'T') if key_event.modifiers == KeyModifiers::CONTROL => {
                    self.events.send(AppEvent::ChatToggleMode)
                }
                KeyCode::Esc => self.events.send(AppEvent::GoTab(Tab::Home)),
                KeyCode::Tab => self.events.send(AppEvent::NextTab),
                KeyCode::BackTab => self.events.send(AppEvent::PrevTab),
                KeyCode::Enter => self.events.send(AppEvent::ChatSubmit),
                KeyCode::Backspace => self.events.send(AppEvent::ChatBackspace),
                KeyCode::PageUp | KeyCode::Up => self.events.send(AppEvent::ScrollChatUp),
                KeyCode::PageDown | KeyCode::Down => self.events.send(AppEvent::ScrollChatDown),
                KeyCode::Char(ch) => self.events.send(AppEvent::ChatInput(ch)),
                _ => {}
            },
            Tab::Vault => match key_event.code {
                KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                    self.events.send(AppEvent::Quit)
                }
                KeyCode::Esc => self.events.send(AppEvent::GoTab(Tab::Home)),
                KeyCode::Tab => self.events.send(AppEvent::NextTab),
                KeyCode::BackTab => self.events.send(AppEvent::PrevTab),
                KeyCode::Enter => self.events.send(AppEvent::VaultAdd),
                KeyCode::Backspace => self.events.send(AppEvent::VaultBackspace),
                KeyCode::Up => self.events.send(AppEvent::VaultPrev),
                KeyCode::Down => self.events.send(AppEvent::VaultNext),
                KeyCode::Delete => self.events.send(AppEvent::VaultDeleteSelected),
                KeyCode::Char(ch) => self.events.send(AppEvent::VaultInput(ch)),
                _ => {}
            },
            // Browsing views.
            _ => match key_event.code {
                KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
                KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                    self.events.send(AppEvent::Quit)
                }
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                    self.events.send(AppEvent::NextTab)
                }
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                    self.events.send(AppEvent::PrevTab)
                }
                KeyCode::Char('1') => self.events.send(AppEvent::GoTab(Tab::Home)),
                KeyCode::Char('2') => self.events.send(AppEvent::GoTab(Tab::Chat)),
                KeyCode::Char('3') => self.events.send(AppEvent::GoTab(Tab::Courses)),
                KeyCode::Char('4') => self.events.send(AppEvent::GoTab(Tab::Tutor)),
                KeyCode::Char('5') => self.events.send(AppEvent::GoTab(Tab::Vault)),
                KeyCode::Char('t') => self.events.send(AppEvent::ToggleTheme),
                KeyCode::Char('s') => self.events.send(AppEvent::OpenSettings),
                KeyCode::Char('c') => self.events.send(AppEvent::GoTab(Tab::Chat)),
                KeyCode::Char('v') => self.events.send(AppEvent::GoTab(Tab::Vault)),
                KeyCode::Enter if self.tab == Tab::Tutor => {
                    self.events.send(AppEvent::StartTutorSession)
                }
                _ => {}
            },
        }
        Ok(())
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn profile(&self) -> &UserProfile {
        self.profile_store.profile()
    }

    /// Validates the pending input and, when a turn starts, hands the
    /// boundary call to a task so the UI keeps rendering the typing state.
    pub fn submit_chat_message(&mut self) {
        let profile = self.profile_store.profile().clone();
        let Some(request) = self.chat.submit(&self.chat_input, &profile) else {
            return;
        };
        self.chat_input.clear();

        let assistant = self.assistant.clone();
        let sender = self.events.sender();
        tokio::spawn(async move {
            let outcome = assistant.generate(&request.turns, &request.instruction).await;
            let _ = sender.send(Event::App(AppEvent::AssistantReply(outcome)));
        });
    }

    fn toggle_chat_mode(&mut self) {
        let target = match self.chat.mode() {
            ChatMode::General => ChatMode::Tutoring,
            ChatMode::Tutoring => ChatMode::General,
        };
        let profile = self.profile_store.profile().clone();
        self.chat.set_mode(target, &profile);
    }

    /// The tutor landing's call to action. Navigates to the chat either way;
    /// a refused switch leaves the verification notice waiting there.
    fn start_tutor_session(&mut self) {
        let profile = self.profile_store.profile().clone();
        self.chat.set_mode(ChatMode::Tutoring, &profile);
        self.tab = Tab::Chat;
    }

    fn add_vault_file(&mut self) {
        let raw = self.vault_input.trim().to_string();
        if raw.is_empty() {
            return;
        }

        match FileUpload::from_path(Path::new(&raw)) {
            Ok(upload) => {
                let outcome = self.vault.add_files(vec![upload]);
                if !outcome.rejected.is_empty() {
                    self.vault_notice = Some(REJECTION_NOTICE.to_string());
                } else {
                    self.vault_input.clear();
                    self.vault_selected = 0;
                    self.vault_notice = Some(format!("Added {} file(s) to the vault.", outcome.added));
                }
            }
            Err(e) => {
                self.vault_notice = Some(format!("Cannot read {}: {}", raw, e));
            }
        }
    }

    fn delete_selected_vault_file(&mut self) {
        let Some(file) = self.vault.files().get(self.vault_selected) else {
            return;
        };
        let id = file.id.clone();
        self.vault.delete_file(&id);
        if self.vault_selected >= self.vault.files().len() {
            self.vault_selected = self.vault.files().len().saturating_sub(1);
        }
    }
}
