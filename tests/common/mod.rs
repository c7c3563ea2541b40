//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a temporary data directory, optionally pre-seeded with stored tags
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw text as the stored tag collection
    pub fn with_stored_tags(self, content: &str) -> Self {
        fs::write(tags_file(self.temp_dir.path()), content).expect("Failed to write stored tags");
        self
    }

    /// Write a thread file and return its path
    pub fn write_threads(&self, name: &str, threads: &Value) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, threads.to_string()).expect("Failed to write thread file");
        path
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Location of the stored tag collection inside a data directory
pub fn tags_file(dir: &Path) -> PathBuf {
    dir.join("fusion-custom-tags.json")
}

/// Builder for thread JSON objects as an external source would supply them
pub struct ThreadBuilder {
    id: String,
    subject: String,
    participants: Vec<String>,
    last_message: String,
    timestamp: Option<String>,
    unread_count: u64,
    priority: String,
    tags: Vec<String>,
}

impl ThreadBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            subject: format!("Subject {}", id),
            participants: vec!["someone@example.com".to_string()],
            last_message: "Last message".to_string(),
            timestamp: Some("2024-01-10T10:30:00Z".to_string()),
            unread_count: 0,
            priority: "medium".to_string(),
            tags: Vec::new(),
        }
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    pub fn participants(mut self, participants: &[&str]) -> Self {
        self.participants = participants.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn last_message(mut self, last_message: &str) -> Self {
        self.last_message = last_message.to_string();
        self
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn no_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    pub fn unread(mut self, count: u64) -> Self {
        self.unread_count = count;
        self
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.priority = priority.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "id": self.id,
            "subject": self.subject,
            "participants": self.participants,
            "lastMessage": self.last_message,
            "lastSender": "Someone",
            "unreadCount": self.unread_count,
            "priority": self.priority,
            "tags": self.tags,
            "isRead": self.unread_count == 0,
            "channel": "Gmail"
        });
        if let Some(ts) = &self.timestamp {
            value["timestamp"] = json!(ts);
        }
        value
    }
}

/// Array of thread objects
pub fn threads_json(threads: &[ThreadBuilder]) -> Value {
    Value::Array(threads.iter().map(ThreadBuilder::to_json).collect())
}
