//! Mock environment implementations for testing
//!
//! These implementations use in-memory data structures and record every call,
//! so tests can assert on exactly what a run wrote to each channel.

use super::traits::{Console, EnvSink, FileStore, OutputSink};
use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory file system
///
/// # Examples
///
/// ```
/// use release_env::env::{MemoryFileStore, FileStore};
/// use std::path::Path;
///
/// let files = MemoryFileStore::new();
/// files.add_file("build.json", "{}");
///
/// assert_eq!(files.read(Path::new("build.json")).unwrap(), b"{}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    protected: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the store
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Make `remove_file` fail with `PermissionDenied` for this path
    pub fn deny_removal(&self, path: impl Into<PathBuf>) {
        self.protected.lock().unwrap().insert(path.into());
    }

    /// Paths currently present
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.files.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

fn not_found(path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("File not found: {}", path.display()),
    )
}

impl FileStore for MemoryFileStore {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn write(&self, path: &Path, content: &[u8]) -> std::io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        if self.protected.lock().unwrap().contains(path) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("Permission denied: {}", path.display()),
            ));
        }
        self.files
            .lock()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }
}

/// Records exported variables
#[derive(Debug, Clone, Default)]
pub struct RecordingEnvSink {
    vars: Arc<Mutex<BTreeMap<String, String>>>,
    failing: Arc<Mutex<Option<String>>>,
}

impl RecordingEnvSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the export of `name` fail
    pub fn fail_on(&self, name: impl Into<String>) {
        *self.failing.lock().unwrap() = Some(name.into());
    }

    pub fn vars(&self) -> BTreeMap<String, String> {
        self.vars.lock().unwrap().clone()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.vars.lock().unwrap().get(name).cloned()
    }
}

impl EnvSink for RecordingEnvSink {
    fn export_variable(&self, name: &str, value: &str) -> Result<()> {
        if self.failing.lock().unwrap().as_deref() == Some(name) {
            bail!("Unable to export {name}");
        }
        self.vars
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Records step outputs
#[derive(Debug, Clone, Default)]
pub struct RecordingOutputSink {
    outputs: Arc<Mutex<BTreeMap<String, String>>>,
}

impl RecordingOutputSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> BTreeMap<String, String> {
        self.outputs.lock().unwrap().clone()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.outputs.lock().unwrap().get(name).cloned()
    }
}

impl OutputSink for RecordingOutputSink {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.outputs
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// One call made on a `RecordingConsole`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    Mask(String),
    GroupStart(String),
    GroupEnd,
    Debug(String),
    Warning(String),
    Failed(String),
}

/// Records console calls in order
#[derive(Debug, Clone, Default)]
pub struct RecordingConsole {
    events: Arc<Mutex<Vec<ConsoleEvent>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ConsoleEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Messages passed to `set_failed`
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ConsoleEvent::Failed(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Messages passed to `warning`
    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ConsoleEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Debug lines written inside the group titled `title`
    pub fn group_lines(&self, title: &str) -> Option<Vec<String>> {
        let events = self.events();
        let start = events
            .iter()
            .position(|event| *event == ConsoleEvent::GroupStart(title.to_string()))?;
        let lines = events[start + 1..]
            .iter()
            .take_while(|event| **event != ConsoleEvent::GroupEnd)
            .filter_map(|event| match event {
                ConsoleEvent::Debug(line) => Some(line.clone()),
                _ => None,
            })
            .collect();
        Some(lines)
    }

    fn record(&self, event: ConsoleEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Console for RecordingConsole {
    fn add_mask(&self, secret: &str) {
        self.record(ConsoleEvent::Mask(secret.to_string()));
    }

    fn group(&self, title: &str, lines: &[&str]) {
        let mut events = self.events.lock().unwrap();
        events.push(ConsoleEvent::GroupStart(title.to_string()));
        events.extend(lines.iter().map(|line| ConsoleEvent::Debug(line.to_string())));
        events.push(ConsoleEvent::GroupEnd);
    }

    fn warning(&self, message: &str) {
        self.record(ConsoleEvent::Warning(message.to_string()));
    }

    fn set_failed(&self, message: &str) {
        self.record(ConsoleEvent::Failed(message.to_string()));
    }
}
