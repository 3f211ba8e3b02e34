use stallion_companion::chat::{ChatMode, ChatSession, Role, VERIFY_STUDENT_ID_NOTICE};
use stallion_companion::llm::{AssistantStrategy, GenerateReply, GroundingLink, LlmError, MockAssistant};
use stallion_companion::profile::{Campus, College, ProfilePatch, ProfileStore, Theme, UserProfile};
use stallion_companion::storage::StateStore;
use stallion_companion::vault::{FileUpload, VaultStore};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> StateStore {
    StateStore::open(&dir.path().join("companion.db")).unwrap()
}

#[test]
fn profile_round_trips_across_process_restarts() {
    let dir = TempDir::new().unwrap();

    {
        let mut profiles = ProfileStore::load(open_store(&dir));
        profiles.update(ProfilePatch {
            name: Some("Maria Clara".to_string()),
            college: Some(College::HealthSciences),
            campus: Some(Campus::Currimao),
            theme: Some(Theme::Light),
            student_id: Some("25-654321".to_string()),
        });
    }

    // A brand-new store over the same database sees the same profile.
    let profiles = ProfileStore::load(open_store(&dir));
    assert_eq!(
        profiles.profile(),
        &UserProfile {
            name: "Maria Clara".to_string(),
            college: College::HealthSciences,
            campus: Campus::Currimao,
            theme: Theme::Light,
            student_id: Some("25-654321".to_string()),
        }
    );
}

#[test]
fn vault_metadata_survives_reload_and_deletes_cleanly() {
    let dir = TempDir::new().unwrap();

    let first_id;
    {
        let mut vault = VaultStore::load(open_store(&dir));
        vault.add_files(vec![
            FileUpload {
                name: "thesis.pdf".to_string(),
                size_bytes: 204800,
                mime: "application/pdf".to_string(),
            },
            FileUpload {
                name: "notes.txt".to_string(),
                size_bytes: 1024,
                mime: "text/plain".to_string(),
            },
        ]);
        first_id = vault.files()[0].id.clone();
    }

    let mut vault = VaultStore::load(open_store(&dir));
    assert_eq!(vault.files().len(), 2);
    assert_eq!(vault.files()[0].size, "200.0 KB");
    assert_eq!(vault.files()[0].kind, "PDF");

    assert!(vault.delete_file(&first_id));
    let survivors = VaultStore::load(open_store(&dir));
    assert_eq!(survivors.files().len(), 1);
    assert_eq!(survivors.files()[0].name, "notes.txt");
}

#[tokio::test]
async fn a_full_chat_turn_against_a_scripted_backend() {
    let strategy = AssistantStrategy::Mock(MockAssistant::with_replies(vec![Ok(GenerateReply {
        text: "Hello".to_string(),
        links: vec![GroundingLink {
            title: "MMSU".to_string(),
            uri: "https://www.mmsu.edu.ph/".to_string(),
        }],
    })]));

    let mut session = ChatSession::new();
    let profile = UserProfile::default();

    let request = session.submit("Hi", &profile).expect("turn should start");
    assert!(session.is_awaiting());

    let outcome = strategy.generate(&request.turns, &request.instruction).await;
    session.complete(outcome);

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[1].content, "Hello");
    assert_eq!(transcript[1].links.len(), 1);
    assert!(transcript[0].timestamp < transcript[1].timestamp);
    assert!(!session.is_awaiting());
}

#[tokio::test]
async fn credential_failure_keeps_the_session_usable() {
    let strategy = AssistantStrategy::Mock(MockAssistant::with_replies(vec![
        Err(LlmError::MissingCredential),
        Ok(GenerateReply {
            text: "Back online".to_string(),
            links: Vec::new(),
        }),
    ]));

    let mut session = ChatSession::new();
    let profile = UserProfile::default();

    let request = session.submit("first try", &profile).unwrap();
    session.complete(strategy.generate(&request.turns, &request.instruction).await);
    assert!(session.transcript().last().unwrap().content.contains("offline"));

    let request = session.submit("second try", &profile).unwrap();
    session.complete(strategy.generate(&request.turns, &request.instruction).await);
    assert_eq!(session.transcript().last().unwrap().content, "Back online");
}

#[test]
fn tutoring_stays_gated_until_the_profile_is_verified() {
    let dir = TempDir::new().unwrap();
    let mut profiles = ProfileStore::load(open_store(&dir));
    let mut session = ChatSession::new();

    assert!(!session.set_mode(ChatMode::Tutoring, profiles.profile()));
    assert_eq!(
        session.transcript().last().unwrap().content,
        VERIFY_STUDENT_ID_NOTICE
    );

    profiles.update(ProfilePatch {
        student_id: Some("24-111222".to_string()),
        ..ProfilePatch::default()
    });
    assert!(session.set_mode(ChatMode::Tutoring, profiles.profile()));

    let request = session
        .submit("help me with statics", profiles.profile())
        .unwrap();
    assert!(request.instruction.contains("Academic Tutoring"));
}
