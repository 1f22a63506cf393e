use std::fmt;

use serde::{Deserialize, Serialize};

use crate::adapter::types::{BranchRef, Card, Comment, PullRequest};
use crate::error::AppError;

pub const STEP_CREATE_BRANCH: &str = "create-branch";
pub const STEP_CREATE_CARD: &str = "create-card";
pub const STEP_CREATE_PULL_REQUEST: &str = "create-pull-request";
pub const STEP_MOVE_CARD: &str = "move-card";
pub const STEP_COMMENT_CARD: &str = "comment-card";
pub const STEP_CLOSE_CARD: &str = "close-card";

/// The closed set of workflows the orchestrator can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowKind {
    TaskCreation,
    ReviewTransition,
    Completion,
}

impl WorkflowKind {
    /// Parse the wire discriminator. Unknown values are rejected here,
    /// before any remote call.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "task-creation" => Ok(WorkflowKind::TaskCreation),
            "review-transition" => Ok(WorkflowKind::ReviewTransition),
            "completion" => Ok(WorkflowKind::Completion),
            _ => Err(AppError::UnknownWorkflowKind(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowKind::TaskCreation => "task-creation",
            WorkflowKind::ReviewTransition => "review-transition",
            WorkflowKind::Completion => "completion",
        }
    }

    /// The fixed step plan for this workflow. Optional steps may end up
    /// skipped at run time when their gating parameters are absent.
    pub fn plan(&self) -> &'static [StepSpec] {
        match self {
            WorkflowKind::TaskCreation => &[
                StepSpec {
                    name: STEP_CREATE_BRANCH,
                    service: ServiceTag::VersionControl,
                    required: true,
                },
                StepSpec {
                    name: STEP_CREATE_CARD,
                    service: ServiceTag::TaskBoard,
                    required: true,
                },
            ],
            WorkflowKind::ReviewTransition => &[
                StepSpec {
                    name: STEP_CREATE_PULL_REQUEST,
                    service: ServiceTag::VersionControl,
                    required: true,
                },
                StepSpec {
                    name: STEP_MOVE_CARD,
                    service: ServiceTag::TaskBoard,
                    required: false,
                },
                StepSpec {
                    name: STEP_COMMENT_CARD,
                    service: ServiceTag::TaskBoard,
                    required: false,
                },
            ],
            WorkflowKind::Completion => &[
                StepSpec {
                    name: STEP_CLOSE_CARD,
                    service: ServiceTag::TaskBoard,
                    required: true,
                },
                StepSpec {
                    name: STEP_COMMENT_CARD,
                    service: ServiceTag::TaskBoard,
                    required: true,
                },
            ],
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which external service a step talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceTag {
    VersionControl,
    TaskBoard,
}

impl fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceTag::VersionControl => f.write_str("version-control"),
            ServiceTag::TaskBoard => f.write_str("task-board"),
        }
    }
}

/// Static description of one step in a workflow plan.
#[derive(Debug, Clone, Copy)]
pub struct StepSpec {
    pub name: &'static str,
    pub service: ServiceTag,
    pub required: bool,
}

/// Success payload of one adapter call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OperationResult {
    Branch(BranchRef),
    PullRequest(PullRequest),
    Card(Card),
    Comment(Comment),
}

impl OperationResult {
    /// Short human-readable description for reports and logs.
    pub fn describe(&self) -> String {
        match self {
            OperationResult::Branch(b) => format!("branch '{}' at {}", b.name, b.sha),
            OperationResult::PullRequest(pr) => {
                format!("pull request #{} '{}'", pr.number, pr.title)
            }
            OperationResult::Card(c) => format!("card '{}' ({})", c.name, c.id),
            OperationResult::Comment(c) => format!("comment {}", c.id),
        }
    }
}

impl From<BranchRef> for OperationResult {
    fn from(b: BranchRef) -> Self {
        OperationResult::Branch(b)
    }
}

impl From<PullRequest> for OperationResult {
    fn from(pr: PullRequest) -> Self {
        OperationResult::PullRequest(pr)
    }
}

impl From<Card> for OperationResult {
    fn from(c: Card) -> Self {
        OperationResult::Card(c)
    }
}

impl From<Comment> for OperationResult {
    fn from(c: Comment) -> Self {
        OperationResult::Comment(c)
    }
}

/// One successfully completed step. Failed or skipped steps leave no entry.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub step_name: &'static str,
    pub service: ServiceTag,
    pub payload: OperationResult,
}

/// Aggregated result of one workflow run. Owned by the caller; the
/// orchestrator keeps no reference to it.
#[derive(Debug, Serialize)]
pub struct WorkflowOutcome {
    pub success: bool,
    pub message: String,
    pub steps: Vec<StepResult>,
}

/// Lifecycle of a run, reported through tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Pending,
    Running,
    Completed,
    Aborted,
}

// --- Per-kind parameters, deserialized from the caller's JSON map ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreationParams {
    pub repo_name: String,
    pub branch_name: String,
    pub task_title: String,
    pub task_description: String,
    pub trello_list_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTransitionParams {
    pub repo_name: String,
    pub branch_name: String,
    pub pr_title: String,
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub review_list_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionParams {
    pub card_id: String,
    pub repo_name: String,
    pub branch_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(
            WorkflowKind::parse("task-creation").unwrap(),
            WorkflowKind::TaskCreation
        );
        assert_eq!(
            WorkflowKind::parse("review-transition").unwrap(),
            WorkflowKind::ReviewTransition
        );
        assert_eq!(
            WorkflowKind::parse("completion").unwrap(),
            WorkflowKind::Completion
        );
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = WorkflowKind::parse("deploy").unwrap_err();
        assert!(matches!(err, AppError::UnknownWorkflowKind(ref s) if s == "deploy"));
    }

    #[test]
    fn test_plans_have_required_first_step() {
        for kind in [
            WorkflowKind::TaskCreation,
            WorkflowKind::ReviewTransition,
            WorkflowKind::Completion,
        ] {
            assert!(kind.plan()[0].required, "{kind} must start required");
        }
    }
}
