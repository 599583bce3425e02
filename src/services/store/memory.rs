//! In-memory `ImportStore` for tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use super::ImportStore;
use crate::types::{
    Context, Galley, Genre, Issue, NewGalley, NewSubmissionFile, Publication, Submission, User,
};

/// A stored file record together with the bytes it received
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: i64,
    pub record: NewSubmissionFile,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    contexts: Vec<Context>,
    genres: Vec<Genre>,
    issues: Vec<Issue>,
    /// issue id -> submissions
    submissions: HashMap<i64, Vec<Submission>>,
    galleys: Vec<Galley>,
    files: Vec<StoredFile>,
    fail_uploads: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Collects everything in memory for assertion in tests.
#[derive(Default)]
pub struct MemoryImportStore {
    state: Mutex<State>,
}

impl MemoryImportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.users.push(User { id, username: username.to_string() });
        id
    }

    pub fn add_context(&self, path: &str, primary_locale: &str, supported: &[&str]) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.contexts.push(Context {
            id,
            path: path.to_string(),
            primary_locale: primary_locale.to_string(),
            supported_submission_locales: supported.iter().map(|s| s.to_string()).collect(),
        });
        id
    }

    pub fn add_genre(&self, context_id: i64, key: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.genres.push(Genre { id, context_id, entry_key: key.to_string() });
        id
    }

    /// Add an issue published at midnight of `date` (`YYYY-MM-DD`)
    pub fn add_issue(&self, context_id: i64, date: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let date_published = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0);
        state.issues.push(Issue { id, context_id, date_published });
        id
    }

    /// Add a submission to an issue; returns the current publication id
    pub fn add_submission(&self, context_id: i64, issue_id: i64, titles: &[(&str, &str)]) -> i64 {
        let mut state = self.state.lock().unwrap();
        let submission_id = state.next_id();
        let publication_id = state.next_id();
        let publication = Publication {
            id: publication_id,
            titles: titles
                .iter()
                .map(|(locale, title)| (locale.to_string(), title.to_string()))
                .collect(),
        };
        state.submissions.entry(issue_id).or_default().push(Submission {
            id: submission_id,
            context_id,
            locale: titles.first().map(|(locale, _)| locale.to_string()),
            current_publication: publication,
        });
        publication_id
    }

    /// Attach an existing URL-backed galley to a publication
    pub fn add_galley(&self, publication_id: i64, label: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.galleys.push(Galley {
            id,
            publication_id,
            label: Some(label.to_string()),
            locale: None,
            file_id: None,
            url_path: None,
            url_remote: Some("https://example.org/article".to_string()),
        });
        id
    }

    /// Make every subsequent `create_submission_file` fail
    pub fn fail_uploads(&self) {
        self.state.lock().unwrap().fail_uploads = true;
    }

    pub fn galleys(&self) -> Vec<Galley> {
        self.state.lock().unwrap().galleys.clone()
    }

    pub fn files(&self) -> Vec<StoredFile> {
        self.state.lock().unwrap().files.clone()
    }
}

#[async_trait]
impl ImportStore for MemoryImportStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_context_by_path(&self, path: &str) -> Result<Option<Context>> {
        let state = self.state.lock().unwrap();
        Ok(state.contexts.iter().find(|c| c.path == path).cloned())
    }

    async fn find_genre_by_key(&self, context_id: i64, key: &str) -> Result<Option<Genre>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .genres
            .iter()
            .find(|g| g.context_id == context_id && g.entry_key == key)
            .cloned())
    }

    async fn list_issues(&self, context_id: i64) -> Result<Vec<Issue>> {
        let state = self.state.lock().unwrap();
        Ok(state.issues.iter().filter(|i| i.context_id == context_id).cloned().collect())
    }

    async fn list_issue_submissions(&self, context_id: i64, issue_id: i64) -> Result<Vec<Submission>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .submissions
            .get(&issue_id)
            .map(|subs| subs.iter().filter(|s| s.context_id == context_id).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_galleys(&self, publication_id: i64) -> Result<Vec<Galley>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .galleys
            .iter()
            .filter(|g| g.publication_id == publication_id)
            .cloned()
            .collect())
    }

    async fn create_galley(&self, galley: &NewGalley) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.galleys.push(Galley {
            id,
            publication_id: galley.publication_id,
            label: Some(galley.label.clone()),
            locale: Some(galley.locale.clone()),
            file_id: None,
            url_path: None,
            url_remote: None,
        });
        Ok(id)
    }

    async fn attach_file(&self, galley_id: i64, file_id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match state.galleys.iter_mut().find(|g| g.id == galley_id) {
            Some(galley) => {
                galley.file_id = Some(file_id);
                Ok(())
            }
            None => bail!("galley {galley_id} not found"),
        }
    }

    async fn delete_galley(&self, galley_id: i64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.galleys.retain(|g| g.id != galley_id);
        Ok(())
    }

    async fn create_submission_file(&self, file: &NewSubmissionFile, source: &Path) -> Result<i64> {
        let bytes = std::fs::read(source)?;
        let mut state = self.state.lock().unwrap();
        if state.fail_uploads {
            bail!("file storage unavailable");
        }
        let id = state.next_id();
        state.files.push(StoredFile { id, record: file.clone(), bytes });
        Ok(id)
    }
}
