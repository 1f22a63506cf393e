pub mod github;
pub mod trello;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;
use types::*;

/// Operations against the version-control host.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Create a branch pointing at `base_sha`.
    ///
    /// The branch name is checked against the naming policy first; a
    /// rejected name surfaces as
    /// [`AppError::PolicyViolation`](crate::error::AppError::PolicyViolation)
    /// and is never retried.
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        base_sha: &str,
    ) -> Result<BranchRef>;

    /// List branches of a repository.
    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>>;

    /// Open a pull request.
    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr: &CreatePullRequest,
    ) -> Result<PullRequest>;

    /// List open pull requests.
    async fn list_pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>>;

    /// Fetch a file's decoded content from a branch.
    async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileContent>;

    /// Create or update a file on a branch.
    async fn update_file(&self, owner: &str, repo: &str, update: &UpdateFile)
        -> Result<FileCommit>;
}

/// Operations against the task board.
#[async_trait]
pub trait TaskBoard: Send + Sync {
    /// Create a card on a list.
    async fn create_card(&self, card: &CreateCard) -> Result<Card>;

    /// Change fields of an existing card.
    async fn update_card(&self, card_id: &str, fields: &CardFields) -> Result<Card>;

    /// Move a card to another list.
    async fn move_card(&self, card_id: &str, list_id: &str) -> Result<Card>;

    /// Post a comment on a card.
    async fn add_comment(&self, card_id: &str, text: &str) -> Result<Comment>;

    /// List boards visible to the configured credentials.
    async fn list_boards(&self) -> Result<Vec<Board>>;

    /// List the lists of a board.
    async fn list_lists(&self, board_id: &str) -> Result<Vec<BoardList>>;

    /// List the cards on a list.
    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>>;
}
