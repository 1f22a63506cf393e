//! Static documentation lookup store.
//!
//! Built once at startup into an immutable table and shared by reference;
//! consumers never mutate it.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// One documentation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct DocFile {
    #[serde(default)]
    topics: HashMap<String, DocEntry>,
}

#[derive(Debug)]
pub struct KnowledgeBase {
    entries: HashMap<String, DocEntry>,
}

impl KnowledgeBase {
    /// Build the table from the built-in entries, extended (and overridden)
    /// by an optional TOML file of `[topics.<name>]` sections.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut entries = builtin_entries();

        if let Some(path) = path {
            let raw = std::fs::read_to_string(path)?;
            let file: DocFile = toml::from_str(&raw).map_err(|e| {
                AppError::Config(format!("Invalid knowledge file {}: {e}", path.display()))
            })?;
            entries.extend(file.topics);
        }

        Ok(Self { entries })
    }

    pub fn lookup(&self, topic: &str) -> Option<&DocEntry> {
        self.entries.get(topic)
    }

    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        topics.sort_unstable();
        topics
    }
}

fn builtin_entries() -> HashMap<String, DocEntry> {
    let mut entries = HashMap::new();
    entries.insert(
        "branch-naming".to_string(),
        DocEntry {
            title: "Branch naming policy".to_string(),
            body: "Branch names start with feature/, fix/, hotfix/, chore/, release/ or \
                   docs/, stay within 50 characters, and use only ASCII letters, digits, \
                   '/', '_' and '-'."
                .to_string(),
        },
    );
    entries.insert(
        "workflows".to_string(),
        DocEntry {
            title: "Available workflows".to_string(),
            body: "task-creation opens a branch and a tracking card; review-transition \
                   opens a pull request and optionally moves the card to a review list; \
                   completion closes the card with a final note. Steps run in order and \
                   the first failure stops the rest without undoing earlier steps."
                .to_string(),
        },
    );
    entries.insert(
        "pull-requests".to_string(),
        DocEntry {
            title: "Pull request conventions".to_string(),
            body: "Pull requests are opened from the task branch against the configured \
                   base branch. Keep titles imperative and reference the tracking card \
                   in the description when one exists."
                .to_string(),
        },
    );
    entries
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_topics_are_present() {
        let kb = KnowledgeBase::load(None).unwrap();
        assert!(kb.lookup("branch-naming").is_some());
        assert!(kb.lookup("workflows").is_some());
        assert_eq!(kb.topics(), vec!["branch-naming", "pull-requests", "workflows"]);
    }

    #[test]
    fn test_unknown_topic_is_none() {
        let kb = KnowledgeBase::load(None).unwrap();
        assert!(kb.lookup("deploys").is_none());
    }

    #[test]
    fn test_file_entries_extend_and_override_builtins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[topics.releases]
title = "Release process"
body = "Tag from release/ branches only."

[topics.branch-naming]
title = "Branch naming policy (local)"
body = "See the team wiki."
"#
        )
        .unwrap();

        let kb = KnowledgeBase::load(Some(file.path())).unwrap();
        assert_eq!(kb.lookup("releases").unwrap().title, "Release process");
        assert_eq!(
            kb.lookup("branch-naming").unwrap().title,
            "Branch naming policy (local)"
        );
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not toml [[").unwrap();

        let err = KnowledgeBase::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
