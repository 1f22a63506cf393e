use serde::{Deserialize, Serialize};

/// A branch ref created on the version-control host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
    pub sha: String,
}

/// Summary of an existing branch (for listings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub sha: String,
    pub protected: bool,
}

#[derive(Debug, Clone)]
pub struct CreatePullRequest {
    pub title: String,
    pub body: String,
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub head_branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub content: String,
    pub sha: String,
}

#[derive(Debug, Clone)]
pub struct UpdateFile {
    pub path: String,
    pub message: String,
    pub content: String,
    /// Blob SHA of the file being replaced; `None` creates a new file.
    pub sha: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileCommit {
    pub path: String,
    pub sha: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCard {
    pub list_id: String,
    pub title: String,
    pub description: String,
    pub due: Option<String>,
    pub label_ids: Vec<String>,
    pub member_ids: Vec<String>,
}

/// Fields of a card to change; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct CardFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub closed: Option<bool>,
    pub due: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub list_id: String,
    pub url: String,
    pub closed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}
