// The vault records document metadata only. No file bytes are copied,
// uploaded, or retained anywhere.

use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CompanionError, Result};
use crate::storage::{StateStore, VAULT_KEY};

const ALLOWED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

pub const REJECTION_NOTICE: &str = "Only documents (PDF, Word, TXT) are allowed.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultFile {
    pub id: String,
    pub name: String,
    pub size: String,
    pub kind: String,
    pub date: String,
}

/// A candidate file before the allow-list is applied.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub size_bytes: u64,
    pub mime: String,
}

impl FileUpload {
    /// Stats a file on disk and guesses its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(CompanionError::VaultError(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();

        Ok(Self {
            mime: guess_mime(&name).to_string(),
            size_bytes: metadata.len(),
            name,
        })
    }
}

fn guess_mime(name: &str) -> &'static str {
    let extension = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Default)]
pub struct AddOutcome {
    pub added: usize,
    pub rejected: Vec<String>,
}

#[derive(Debug)]
pub struct VaultStore {
    store: StateStore,
    files: Vec<VaultFile>,
}

impl VaultStore {
    pub fn load(store: StateStore) -> Self {
        let files = match store.get_state(VAULT_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!("Stored vault list is unreadable, resetting: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read stored vault list: {}", e);
                Vec::new()
            }
        };

        Self { store, files }
    }

    pub fn files(&self) -> &[VaultFile] {
        &self.files
    }

    /// Applies the document allow-list, records the accepted files (newest
    /// first), and reports the names that were turned away.
    pub fn add_files(&mut self, uploads: Vec<FileUpload>) -> AddOutcome {
        let mut outcome = AddOutcome::default();
        let mut accepted = Vec::new();

        for upload in uploads {
            if !ALLOWED_MIME_TYPES.contains(&upload.mime.as_str()) {
                outcome.rejected.push(upload.name);
                continue;
            }
            accepted.push(VaultFile {
                id: random_file_id(),
                kind: derive_kind(&upload.mime),
                size: format_size(upload.size_bytes),
                date: chrono::Local::now().format("%m/%d/%Y").to_string(),
                name: upload.name,
            });
        }

        outcome.added = accepted.len();
        accepted.append(&mut self.files);
        self.files = accepted;

        if outcome.added > 0 {
            self.persist();
        }
        outcome
    }

    /// Removes the file with the given id. Returns false when no entry
    /// matched; the relative order of the survivors is untouched.
    pub fn delete_file(&mut self, id: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        let removed = self.files.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.files) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize vault list: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save_state(VAULT_KEY, &raw) {
            tracing::warn!("Failed to persist vault list: {}", e);
        }
    }
}

fn random_file_id() -> String {
    let id: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    id.to_lowercase()
}

fn format_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// The display kind is the upper-cased MIME subtype ("PDF", "MSWORD", ...).
fn derive_kind(mime: &str) -> String {
    mime.split('/').nth(1).unwrap_or(mime).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_vault(dir: &TempDir) -> VaultStore {
        VaultStore::load(StateStore::open(&dir.path().join("state.db")).unwrap())
    }

    fn upload(name: &str, size_bytes: u64, mime: &str) -> FileUpload {
        FileUpload {
            name: name.to_string(),
            size_bytes,
            mime: mime.to_string(),
        }
    }

    #[test]
    fn pdf_upload_gets_display_size_and_kind() {
        let dir = TempDir::new().unwrap();
        let mut vault = temp_vault(&dir);

        let outcome = vault.add_files(vec![upload("thesis.pdf", 204800, "application/pdf")]);
        assert_eq!(outcome.added, 1);
        assert!(outcome.rejected.is_empty());

        let file = &vault.files()[0];
        assert_eq!(file.name, "thesis.pdf");
        assert_eq!(file.size, "200.0 KB");
        assert_eq!(file.kind, "PDF");
        assert_eq!(file.id.len(), 9);
    }

    #[test]
    fn disallowed_mime_is_rejected_with_its_name() {
        let dir = TempDir::new().unwrap();
        let mut vault = temp_vault(&dir);

        let outcome = vault.add_files(vec![
            upload("notes.txt", 512, "text/plain"),
            upload("game.exe", 1024, "application/octet-stream"),
        ]);

        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.rejected, vec!["game.exe".to_string()]);
        assert_eq!(vault.files().len(), 1);
    }

    #[test]
    fn newest_files_come_first() {
        let dir = TempDir::new().unwrap();
        let mut vault = temp_vault(&dir);

        vault.add_files(vec![upload("first.pdf", 1024, "application/pdf")]);
        vault.add_files(vec![upload("second.pdf", 1024, "application/pdf")]);

        assert_eq!(vault.files()[0].name, "second.pdf");
        assert_eq!(vault.files()[1].name, "first.pdf");
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let dir = TempDir::new().unwrap();
        let mut vault = temp_vault(&dir);

        vault.add_files(vec![
            upload("a.pdf", 1024, "application/pdf"),
            upload("b.txt", 1024, "text/plain"),
            upload("c.doc", 1024, "application/msword"),
        ]);
        let ids: Vec<String> = vault.files().iter().map(|f| f.id.clone()).collect();

        assert!(vault.delete_file(&ids[1]));
        let remaining: Vec<&str> = vault.files().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(remaining, vec![ids[0].as_str(), ids[2].as_str()]);

        assert!(!vault.delete_file("no-such-id"));
        assert_eq!(vault.files().len(), 2);
    }

    #[test]
    fn vault_survives_a_reload() {
        let dir = TempDir::new().unwrap();
        {
            let mut vault = temp_vault(&dir);
            vault.add_files(vec![upload("kept.pdf", 2048, "application/pdf")]);
        }

        let vault = temp_vault(&dir);
        assert_eq!(vault.files().len(), 1);
        assert_eq!(vault.files()[0].name, "kept.pdf");
        assert_eq!(vault.files()[0].size, "2.0 KB");
    }

    #[test]
    fn mime_guess_covers_the_allow_list() {
        assert_eq!(guess_mime("paper.PDF"), "application/pdf");
        assert_eq!(guess_mime("old.doc"), "application/msword");
        assert_eq!(
            guess_mime("new.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(guess_mime("readme.txt"), "text/plain");
        assert_eq!(guess_mime("archive.zip"), "application/octet-stream");
    }

    #[test]
    fn word_kind_derives_from_subtype() {
        assert_eq!(derive_kind("application/msword"), "MSWORD");
        assert!(derive_kind(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        )
        .contains("DOC"));
    }
}
