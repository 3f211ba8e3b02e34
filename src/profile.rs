use serde::{Deserialize, Serialize};

use crate::storage::{StateStore, PROFILE_KEY};

/// The fixed set of MMSU colleges a profile can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum College {
    #[serde(rename = "College of Agriculture, Food and Sustainable Development")]
    Agriculture,
    #[serde(rename = "College of Aquatic Science and Applied Technology")]
    AquaticScience,
    #[serde(rename = "College of Arts and Sciences")]
    ArtsAndSciences,
    #[serde(rename = "College of Business, Economics and Accountancy")]
    Business,
    #[serde(rename = "College of Computing and Information Sciences")]
    Computing,
    #[serde(rename = "College of Engineering")]
    Engineering,
    #[serde(rename = "College of Health Sciences")]
    HealthSciences,
    #[serde(rename = "College of Industrial Technology")]
    IndustrialTechnology,
    #[serde(rename = "College of Teacher Education")]
    TeacherEducation,
    #[serde(rename = "College of Medicine")]
    Medicine,
    #[serde(rename = "College of Law")]
    Law,
}

impl College {
    pub const ALL: [College; 11] = [
        College::Agriculture,
        College::AquaticScience,
        College::ArtsAndSciences,
        College::Business,
        College::Computing,
        College::Engineering,
        College::HealthSciences,
        College::IndustrialTechnology,
        College::TeacherEducation,
        College::Medicine,
        College::Law,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            College::Agriculture => "College of Agriculture, Food and Sustainable Development",
            College::AquaticScience => "College of Aquatic Science and Applied Technology",
            College::ArtsAndSciences => "College of Arts and Sciences",
            College::Business => "College of Business, Economics and Accountancy",
            College::Computing => "College of Computing and Information Sciences",
            College::Engineering => "College of Engineering",
            College::HealthSciences => "College of Health Sciences",
            College::IndustrialTechnology => "College of Industrial Technology",
            College::TeacherEducation => "College of Teacher Education",
            College::Medicine => "College of Medicine",
            College::Law => "College of Law",
        }
    }
}

impl std::fmt::Display for College {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Campus {
    Batac,
    Laoag,
    Currimao,
    Dingras,
}

impl Campus {
    pub const ALL: [Campus; 4] = [Campus::Batac, Campus::Laoag, Campus::Currimao, Campus::Dingras];

    pub fn as_str(&self) -> &'static str {
        match self {
            Campus::Batac => "Batac",
            Campus::Laoag => "Laoag",
            Campus::Currimao => "Currimao",
            Campus::Dingras => "Dingras",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn flipped(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Exactly one profile exists per state database. It is created with defaults
/// on first load and only ever overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub college: College,
    pub campus: Campus,
    pub theme: Theme,
    pub student_id: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Stallion Guest".to_string(),
            college: College::Computing,
            campus: Campus::Batac,
            theme: Theme::Dark,
            student_id: None,
        }
    }
}

impl UserProfile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("Guest")
    }

    /// Student IDs look like "YY-XXXXXX". Checked only when tutoring mode
    /// asks for it, never on save.
    pub fn has_verified_student_id(&self) -> bool {
        match &self.student_id {
            Some(id) => is_valid_student_id(id),
            None => false,
        }
    }
}

pub fn is_valid_student_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 9
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2] == b'-'
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// Partial update applied over the current profile. `None` leaves a field
/// untouched; a blank `student_id` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub college: Option<College>,
    pub campus: Option<Campus>,
    pub theme: Option<Theme>,
    pub student_id: Option<String>,
}

#[derive(Debug)]
pub struct ProfileStore {
    store: StateStore,
    profile: UserProfile,
}

impl ProfileStore {
    /// Loads the persisted profile, falling back to defaults when the blob is
    /// missing or no longer parses.
    pub fn load(store: StateStore) -> Self {
        let profile = match store.get_state(PROFILE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!("Stored profile is unreadable, resetting: {}", e);
                    UserProfile::default()
                }
            },
            Ok(None) => UserProfile::default(),
            Err(e) => {
                tracing::warn!("Failed to read stored profile: {}", e);
                UserProfile::default()
            }
        };

        Self { store, profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn update(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.profile.name = name;
        }
        if let Some(college) = patch.college {
            self.profile.college = college;
        }
        if let Some(campus) = patch.campus {
            self.profile.campus = campus;
        }
        if let Some(theme) = patch.theme {
            self.profile.theme = theme;
        }
        if let Some(student_id) = patch.student_id {
            let trimmed = student_id.trim();
            self.profile.student_id = if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            };
        }
        self.persist();
    }

    pub fn toggle_theme(&mut self) {
        self.profile.theme = self.profile.theme.flipped();
        self.persist();
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.profile) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize profile: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save_state(PROFILE_KEY, &raw) {
            tracing::warn!("Failed to persist profile: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store(dir: &TempDir) -> StateStore {
        StateStore::open(&dir.path().join("state.db")).unwrap()
    }

    #[test]
    fn first_load_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::load(temp_store(&dir));
        assert_eq!(store.profile(), &UserProfile::default());
    }

    #[test]
    fn update_round_trips_through_storage() {
        let dir = TempDir::new().unwrap();

        let mut store = ProfileStore::load(temp_store(&dir));
        store.update(ProfilePatch {
            name: Some("Juan Dela Cruz".to_string()),
            college: Some(College::Engineering),
            campus: Some(Campus::Laoag),
            theme: Some(Theme::Light),
            student_id: Some("24-123456".to_string()),
        });

        // A fresh load from the same database must see every field unchanged.
        let reloaded = ProfileStore::load(temp_store(&dir));
        let profile = reloaded.profile();
        assert_eq!(profile.name, "Juan Dela Cruz");
        assert_eq!(profile.college, College::Engineering);
        assert_eq!(profile.campus, Campus::Laoag);
        assert_eq!(profile.theme, Theme::Light);
        assert_eq!(profile.student_id.as_deref(), Some("24-123456"));
    }

    #[test]
    fn partial_patch_leaves_other_fields_alone() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::load(temp_store(&dir));

        store.update(ProfilePatch {
            campus: Some(Campus::Dingras),
            ..ProfilePatch::default()
        });

        assert_eq!(store.profile().campus, Campus::Dingras);
        assert_eq!(store.profile().name, "Stallion Guest");
        assert_eq!(store.profile().college, College::Computing);
    }

    #[test]
    fn malformed_blob_resets_to_defaults() {
        let dir = TempDir::new().unwrap();
        let raw_store = temp_store(&dir);
        raw_store
            .save_state(PROFILE_KEY, "{not valid json at all")
            .unwrap();

        let store = ProfileStore::load(raw_store);
        assert_eq!(store.profile(), &UserProfile::default());
    }

    #[test]
    fn blank_student_id_clears_the_field() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::load(temp_store(&dir));

        store.update(ProfilePatch {
            student_id: Some("24-000001".to_string()),
            ..ProfilePatch::default()
        });
        assert!(store.profile().student_id.is_some());

        store.update(ProfilePatch {
            student_id: Some("   ".to_string()),
            ..ProfilePatch::default()
        });
        assert_eq!(store.profile().student_id, None);
    }

    #[test]
    fn toggle_theme_flips_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = ProfileStore::load(temp_store(&dir));
        store.toggle_theme();
        assert_eq!(store.profile().theme, Theme::Light);

        let reloaded = ProfileStore::load(temp_store(&dir));
        assert_eq!(reloaded.profile().theme, Theme::Light);
    }

    #[test]
    fn student_id_pattern() {
        assert!(is_valid_student_id("24-123456"));
        assert!(!is_valid_student_id("2024-1234"));
        assert!(!is_valid_student_id("ab-123456"));
        assert!(!is_valid_student_id("24-12345"));
        assert!(!is_valid_student_id(""));
    }
}
