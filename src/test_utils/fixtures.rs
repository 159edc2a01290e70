//! Fixtures for library and login tests.

use crate::core::IonicError;
use crate::library::LibraryPaths;
use crate::utils::prompt::Prompter;
use std::collections::VecDeque;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Build an in-memory zip archive from `(name, content)` pairs.
#[must_use]
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).expect("start zip entry");
        writer.write_all(content.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

/// A library archive whose `version.json` reports `version`.
#[must_use]
pub fn library_archive(version: &str) -> Vec<u8> {
    let descriptor = format!(r#"{{"version":"{version}","codename":"test"}}"#);
    zip_archive(&[
        ("version.json", descriptor.as_str()),
        ("js/ionic.bundle.js", "/* ionic bundle */"),
        ("css/ionic.css", "body {}"),
    ])
}

/// `latest.json` body.
#[must_use]
pub fn latest_json(version: &str, release_date: &str) -> String {
    format!(
        r#"{{"version_number":"{version}","release_date":"{release_date}","archive":"/{version}/ionic-v{version}.zip"}}"#
    )
}

/// Temporary project with a `www` directory.
pub struct IonicProject {
    dir: TempDir,
}

impl IonicProject {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp project");
        std::fs::create_dir_all(dir.path().join("www")).expect("create www");
        Self {
            dir,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn paths(&self) -> LibraryPaths {
        LibraryPaths::new(self.dir.path())
    }

    /// Install a fake library at `version` with a `version.json`.
    pub fn install_version(&self, version: &str) {
        let paths = self.paths();
        std::fs::create_dir_all(paths.lib_dir()).expect("create lib dir");
        std::fs::write(paths.version_descriptor(), format!(r#"{{"version":"{version}"}}"#))
            .expect("write version.json");
        std::fs::write(paths.lib_dir().join("old-marker.txt"), version).expect("write marker");
    }

    /// Install a Bower-managed library at `version`.
    pub fn install_bower_version(&self, version: &str) {
        let paths = self.paths();
        std::fs::create_dir_all(paths.lib_dir()).expect("create lib dir");
        std::fs::write(
            paths.bower_descriptor(),
            format!(r#"{{"name":"ionic","version":"{version}"}}"#),
        )
        .expect("write bower.json");
    }
}

impl Default for IonicProject {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Prompter`] that replays canned answers and records what was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| (*a).to_string()).collect()),
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// Messages and questions in the order they were shown.
    #[must_use]
    pub fn transcript(&self) -> Vec<String> {
        self.transcript.lock().expect("transcript lock").clone()
    }

    /// Answers not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.lock().expect("answers lock").len()
    }

    fn next_answer(&self, label: &str) -> Result<String, IonicError> {
        self.transcript.lock().expect("transcript lock").push(label.to_string());
        self.answers.lock().expect("answers lock").pop_front().ok_or_else(|| {
            IonicError::PromptFailed {
                reason: format!("no scripted answer for '{label}'"),
            }
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn message(&self, text: &str) {
        self.transcript.lock().expect("transcript lock").push(text.to_string());
    }

    fn confirm(&self, question: &str) -> Result<bool, IonicError> {
        let answer = self.next_answer(question)?;
        Ok(crate::utils::prompt::is_affirmative(&answer))
    }

    fn input(&self, label: &str) -> Result<String, IonicError> {
        self.next_answer(label)
    }

    fn password(&self, label: &str) -> Result<String, IonicError> {
        self.next_answer(label)
    }
}
