// src/chat.rs
// Chat session state: an append-only transcript plus one pending-turn flag.
// Each submitted turn appends exactly one assistant message, on the success
// path and on every error path.

use uuid::Uuid;

use crate::llm::{AssistantTurn, GenerateReply, GroundingLink, LlmError};
use crate::profile::UserProfile;

/// Shown when the boundary reports a missing credential.
pub const OFFLINE_CREDENTIAL_NOTICE: &str =
    "Stallion AI is offline: no API credential is configured. Set GEMINI_API_KEY and restart the companion.";

/// Shown for any other failure at the boundary.
pub const SERVERS_BUSY_NOTICE: &str = "Stallion Network Timeout. Please try again.";

/// Shown when tutoring is requested without a verified student ID.
pub const VERIFY_STUDENT_ID_NOTICE: &str =
    "Tutor Mode needs a verified student ID (format YY-XXXXXX). Add yours under Settings, then start the session again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    #[default]
    General,
    Tutoring,
}

impl ChatMode {
    pub fn label(&self) -> &'static str {
        match self {
            ChatMode::General => "Assistant Mode",
            ChatMode::Tutoring => "Tutor Mode",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: i64,
    pub links: Vec<GroundingLink>,
}

/// Everything the boundary needs for one turn: the role-mapped history
/// (ending with the new user message) and the scoped system instruction.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub turns: Vec<AssistantTurn>,
    pub instruction: String,
}

#[derive(Debug)]
pub struct ChatSession {
    session_id: String,
    transcript: Vec<Message>,
    mode: ChatMode,
    awaiting: bool,
    next_id: u64,
    scroll_from_bottom: u16,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            transcript: Vec::new(),
            mode: ChatMode::General,
            awaiting: false,
            next_id: 0,
            scroll_from_bottom: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    /// True between a submission and its (single) assistant reply.
    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    /// Switches modes. Tutoring is refused until the profile carries a valid
    /// student ID; the refusal is surfaced inline in the transcript.
    pub fn set_mode(&mut self, mode: ChatMode, profile: &UserProfile) -> bool {
        if mode == ChatMode::Tutoring && !profile.has_verified_student_id() {
            self.push_assistant_notice(VERIFY_STUDENT_ID_NOTICE);
            return false;
        }
        self.mode = mode;
        true
    }

    /// Validates and records a user submission. Returns the request to hand
    /// to the boundary, or None when a guard fired (blank input, a turn
    /// already in flight, or an unverified tutoring session).
    pub fn submit(&mut self, input: &str, profile: &UserProfile) -> Option<TurnRequest> {
        if input.trim().is_empty() || self.awaiting {
            return None;
        }

        // Re-checked at submit time: the ID may have been cleared after the
        // mode was switched.
        if self.mode == ChatMode::Tutoring && !profile.has_verified_student_id() {
            self.push_assistant_notice(VERIFY_STUDENT_ID_NOTICE);
            return None;
        }

        self.push_message(Role::User, input.trim().to_string(), Vec::new());
        self.awaiting = true;

        Some(TurnRequest {
            turns: self.provider_turns(),
            instruction: build_instruction(self.mode, profile),
        })
    }

    /// Finishes the pending turn. Errors become user-facing notices; the raw
    /// fault never reaches the transcript.
    pub fn complete(&mut self, outcome: Result<GenerateReply, LlmError>) {
        self.awaiting = false;
        match outcome {
            Ok(reply) => self.push_message(Role::Assistant, reply.text, reply.links),
            Err(error) => {
                let notice = fallback_notice(&error);
                self.push_message(Role::Assistant, notice.to_string(), Vec::new());
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(1);
    }

    /// Lines above the bottom of the transcript the user has scrolled to.
    /// Zero means pinned to the newest message.
    pub fn scroll_from_bottom(&self) -> u16 {
        self.scroll_from_bottom
    }

    fn provider_turns(&self) -> Vec<AssistantTurn> {
        self.transcript
            .iter()
            .map(|message| AssistantTurn {
                role: match message.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                },
                text: message.content.clone(),
            })
            .collect()
    }

    fn push_assistant_notice(&mut self, notice: &str) {
        self.push_message(Role::Assistant, notice.to_string(), Vec::new());
    }

    fn push_message(&mut self, role: Role, content: String, links: Vec<GroundingLink>) {
        // Wall-clock millis can tie within one tick; transcript order stays
        // strictly increasing regardless.
        let mut timestamp = chrono::Utc::now().timestamp_millis();
        if let Some(last) = self.transcript.last() {
            if timestamp <= last.timestamp {
                timestamp = last.timestamp + 1;
            }
        }

        let id = self.next_id;
        self.next_id += 1;

        self.transcript.push(Message {
            id,
            role,
            content,
            timestamp,
            links,
        });
        self.scroll_from_bottom = 0;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_notice(error: &LlmError) -> &'static str {
    match error {
        LlmError::MissingCredential => OFFLINE_CREDENTIAL_NOTICE,
        _ => SERVERS_BUSY_NOTICE,
    }
}

fn build_instruction(mode: ChatMode, profile: &UserProfile) -> String {
    format!(
        "You are the \"MMSU Stallion AI Companion\" for Mariano Marcos State University.\n\
         Current Context: 2nd Semester AY 2025-2026. Today is Jan 20 (Foundation Day).\n\
         User College: {}. Campus: {}. Student ID: {}.\n\
         Mode: {}.\n\
         Constraint: Strictly MMSU-related. Formal English. No asterisks.",
        profile.college,
        profile.campus.as_str(),
        profile.student_id.as_deref().unwrap_or("N/A"),
        match mode {
            ChatMode::Tutoring => "Academic Tutoring",
            ChatMode::General => "General Assistant",
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AssistantStrategy, MockAssistant};
    use crate::profile::{College, UserProfile};

    fn guest() -> UserProfile {
        UserProfile::default()
    }

    fn verified() -> UserProfile {
        UserProfile {
            student_id: Some("24-123456".to_string()),
            ..UserProfile::default()
        }
    }

    fn hello_reply() -> GenerateReply {
        GenerateReply {
            text: "Hello".to_string(),
            links: Vec::new(),
        }
    }

    #[test]
    fn blank_input_appends_nothing_and_requests_nothing() {
        let mut session = ChatSession::new();
        assert!(session.submit("", &guest()).is_none());
        assert!(session.submit("   \t  ", &guest()).is_none());
        assert!(session.transcript().is_empty());
        assert!(!session.is_awaiting());
    }

    #[test]
    fn second_submission_is_blocked_while_awaiting() {
        let mut session = ChatSession::new();
        assert!(session.submit("first", &guest()).is_some());
        assert!(session.is_awaiting());
        assert!(session.submit("second", &guest()).is_none());
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn tutoring_without_student_id_never_reaches_the_boundary() {
        let mut session = ChatSession::new();

        // Switching the mode is refused outright...
        assert!(!session.set_mode(ChatMode::Tutoring, &guest()));
        assert_eq!(session.mode(), ChatMode::General);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].content, VERIFY_STUDENT_ID_NOTICE);

        // ...and even a session already in tutoring mode is re-gated when the
        // ID disappears before a submit.
        let mut tutoring = ChatSession::new();
        assert!(tutoring.set_mode(ChatMode::Tutoring, &verified()));
        assert!(tutoring.submit("integrate x^2", &guest()).is_none());
        assert!(!tutoring.is_awaiting());
        assert_eq!(
            tutoring.transcript().last().unwrap().content,
            VERIFY_STUDENT_ID_NOTICE
        );
    }

    #[test]
    fn tutoring_with_valid_id_builds_tutoring_framing() {
        let mut session = ChatSession::new();
        assert!(session.set_mode(ChatMode::Tutoring, &verified()));

        let request = session.submit("explain statics", &verified()).unwrap();
        assert!(request.instruction.contains("Academic Tutoring"));
        assert!(request.instruction.contains("24-123456"));
    }

    #[test]
    fn full_turn_appends_exactly_two_ordered_messages() {
        let mut session = ChatSession::new();
        let request = session.submit("Hi", &guest()).unwrap();

        assert_eq!(request.turns.len(), 1);
        assert_eq!(request.turns[0].role, "user");
        assert_eq!(request.turns[0].text, "Hi");

        session.complete(Ok(hello_reply()));

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].content, "Hi");
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[1].content, "Hello");
        assert!(transcript[1].timestamp > transcript[0].timestamp);
        assert_ne!(transcript[0].id, transcript[1].id);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn history_is_role_mapped_into_provider_vocabulary() {
        let mut session = ChatSession::new();
        session.submit("Hi", &guest());
        session.complete(Ok(hello_reply()));

        let request = session.submit("And enrollment?", &guest()).unwrap();
        let roles: Vec<&str> = request.turns.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(request.turns.last().unwrap().text, "And enrollment?");
    }

    #[test]
    fn credential_error_maps_to_the_offline_notice() {
        let mut session = ChatSession::new();
        session.submit("Hi", &guest());
        session.complete(Err(LlmError::MissingCredential));

        let last = session.transcript().last().unwrap();
        assert_eq!(last.content, OFFLINE_CREDENTIAL_NOTICE);
        assert_ne!(last.content, SERVERS_BUSY_NOTICE);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn other_errors_map_to_the_busy_notice() {
        let mut session = ChatSession::new();
        session.submit("Hi", &guest());
        session.complete(Err(LlmError::Api {
            status: 429,
            message: "rate limited".to_string(),
        }));
        assert_eq!(
            session.transcript().last().unwrap().content,
            SERVERS_BUSY_NOTICE
        );

        // The session stays usable afterwards.
        assert!(session.submit("again", &guest()).is_some());
    }

    #[test]
    fn grounding_links_ride_along_on_the_assistant_message() {
        let mut session = ChatSession::new();
        session.submit("sources?", &guest());
        session.complete(Ok(GenerateReply {
            text: "See the registrar.".to_string(),
            links: vec![GroundingLink {
                title: "Registrar".to_string(),
                uri: "https://registrar.mmsu.edu.ph/".to_string(),
            }],
        }));

        let last = session.transcript().last().unwrap();
        assert_eq!(last.links.len(), 1);
        assert_eq!(last.links[0].title, "Registrar");
    }

    #[test]
    fn instruction_carries_college_scope() {
        let profile = UserProfile {
            college: College::Engineering,
            ..verified()
        };
        let mut session = ChatSession::new();
        let request = session.submit("hello", &profile).unwrap();
        assert!(request.instruction.contains("College of Engineering"));
        assert!(request.instruction.contains("General Assistant"));
    }

    #[tokio::test]
    async fn mock_strategy_round_trip() {
        let strategy = AssistantStrategy::Mock(MockAssistant::with_replies(vec![Ok(hello_reply())]));
        let mut session = ChatSession::new();

        let request = session.submit("Hi", &guest()).unwrap();
        let outcome = strategy.generate(&request.turns, &request.instruction).await;
        session.complete(outcome);

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].content, "Hello");
    }
}
