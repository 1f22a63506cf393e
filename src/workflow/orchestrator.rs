//! Sequential workflow execution across the two service adapters.
//!
//! Each run drives a fixed, ordered sequence of remote operations. Steps
//! never run in parallel: later steps consume data produced by earlier
//! ones. The first failing step aborts the remainder of the sequence and
//! already-completed side effects stay in place; there is no compensation
//! and no retry. Failure is always reported through the returned
//! [`WorkflowOutcome`], never as an error.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::adapter::types::{CardFields, CreateCard, CreatePullRequest};
use crate::adapter::{TaskBoard, VersionControl};
use crate::error::{AppError, Result};
use crate::workflow::types::*;

pub struct Orchestrator<'a> {
    vcs: &'a dyn VersionControl,
    board: &'a dyn TaskBoard,
    base_branch: &'a str,
}

impl<'a> Orchestrator<'a> {
    pub fn new(vcs: &'a dyn VersionControl, board: &'a dyn TaskBoard, base_branch: &'a str) -> Self {
        Self {
            vcs,
            board,
            base_branch,
        }
    }

    /// Run a workflow to completion.
    pub async fn run(&self, kind: WorkflowKind, params: serde_json::Value) -> WorkflowOutcome {
        self.run_with_cancel(kind, params, CancellationToken::new())
            .await
    }

    /// Run a workflow, abandoning it if `cancel` fires. A cancelled run is
    /// reported as aborted with the ledger accumulated so far; completed
    /// remote side effects stay in place.
    pub async fn run_with_cancel(
        &self,
        kind: WorkflowKind,
        params: serde_json::Value,
        cancel: CancellationToken,
    ) -> WorkflowOutcome {
        let mut run = WorkflowRun::new(kind, cancel);
        tracing::info!(workflow = %kind, phase = ?run.phase, "Workflow run accepted");

        let result = match kind {
            WorkflowKind::TaskCreation => self.task_creation(params, &mut run).await,
            WorkflowKind::ReviewTransition => self.review_transition(params, &mut run).await,
            WorkflowKind::Completion => self.completion(params, &mut run).await,
        };

        run.finish(result)
    }

    /// Create a policy-checked branch, then a tracking card whose
    /// description references it.
    async fn task_creation(
        &self,
        params: serde_json::Value,
        run: &mut WorkflowRun,
    ) -> Result<String> {
        let params: TaskCreationParams = parse_params(params)?;
        let (owner, repo) = split_repo(&params.repo_name)?;

        let branch = run
            .step(STEP_CREATE_BRANCH, ServiceTag::VersionControl, async {
                let base_sha = self.base_branch_sha(owner, repo).await?;
                self.vcs
                    .create_branch(owner, repo, &params.branch_name, &base_sha)
                    .await
            })
            .await?;

        let description = format!(
            "{}\n\nBranch: `{}` (from `{}`)\nRepository: {}",
            params.task_description, branch.name, self.base_branch, params.repo_name
        );
        let card = run
            .step(STEP_CREATE_CARD, ServiceTag::TaskBoard, async {
                self.board
                    .create_card(&CreateCard {
                        list_id: params.trello_list_id.clone(),
                        title: params.task_title.clone(),
                        description,
                        ..Default::default()
                    })
                    .await
            })
            .await?;

        Ok(format!(
            "Created branch '{}' and card '{}'",
            branch.name, card.name
        ))
    }

    /// Open a pull request; when the caller also names a card and a review
    /// list, move the card there and comment the PR link on it.
    async fn review_transition(
        &self,
        params: serde_json::Value,
        run: &mut WorkflowRun,
    ) -> Result<String> {
        let params: ReviewTransitionParams = parse_params(params)?;
        let (owner, repo) = split_repo(&params.repo_name)?;

        let pr = run
            .step(STEP_CREATE_PULL_REQUEST, ServiceTag::VersionControl, async {
                self.vcs
                    .create_pull_request(
                        owner,
                        repo,
                        &CreatePullRequest {
                            title: params.pr_title.clone(),
                            body: format!(
                                "Review requested for branch `{}`.",
                                params.branch_name
                            ),
                            head_branch: params.branch_name.clone(),
                            base_branch: self.base_branch.to_string(),
                        },
                    )
                    .await
            })
            .await?;

        // Board updates are scheduled only when the caller supplied both
        // identifiers; their absence is a skip, not a failure.
        if let (Some(card_id), Some(review_list_id)) = (&params.card_id, &params.review_list_id) {
            run.step(
                STEP_MOVE_CARD,
                ServiceTag::TaskBoard,
                self.board.move_card(card_id, review_list_id),
            )
            .await?;

            let note = format!("Pull request #{} opened: {}", pr.number, pr.url);
            run.step(
                STEP_COMMENT_CARD,
                ServiceTag::TaskBoard,
                self.board.add_comment(card_id, &note),
            )
            .await?;
        }

        Ok(format!("Opened pull request #{}", pr.number))
    }

    /// Close the card and leave a completion note on it.
    async fn completion(&self, params: serde_json::Value, run: &mut WorkflowRun) -> Result<String> {
        let params: CompletionParams = parse_params(params)?;

        let close = CardFields {
            closed: Some(true),
            ..Default::default()
        };
        let card = run
            .step(
                STEP_CLOSE_CARD,
                ServiceTag::TaskBoard,
                self.board.update_card(&params.card_id, &close),
            )
            .await?;

        let note = format!(
            "Work on branch `{}` in {} finished {}; closing this card.",
            params.branch_name,
            params.repo_name,
            chrono::Utc::now().format("%Y-%m-%d")
        );
        run.step(
            STEP_COMMENT_CARD,
            ServiceTag::TaskBoard,
            self.board.add_comment(&params.card_id, &note),
        )
        .await?;

        Ok(format!("Closed card '{}'", card.name))
    }

    /// Head SHA of the configured base branch, resolved via the branch
    /// listing.
    async fn base_branch_sha(&self, owner: &str, repo: &str) -> Result<String> {
        let branches = self.vcs.list_branches(owner, repo).await?;
        branches
            .into_iter()
            .find(|b| b.name == self.base_branch)
            .map(|b| b.sha)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "base branch '{}' in {owner}/{repo}",
                    self.base_branch
                ))
            })
    }
}

/// Mutable state of one run: the lifecycle phase plus the ledger of
/// completed steps.
struct WorkflowRun {
    kind: WorkflowKind,
    phase: RunPhase,
    ledger: Vec<StepResult>,
    cancel: CancellationToken,
}

impl WorkflowRun {
    fn new(kind: WorkflowKind, cancel: CancellationToken) -> Self {
        Self {
            kind,
            phase: RunPhase::Pending,
            ledger: Vec::new(),
            cancel,
        }
    }

    /// Await one adapter call as a named step, recording its payload in the
    /// ledger on success.
    async fn step<T, F>(&mut self, name: &'static str, service: ServiceTag, invoke: F) -> Result<T>
    where
        T: Clone + Into<OperationResult>,
        F: Future<Output = Result<T>>,
    {
        self.phase = RunPhase::Running;
        tracing::debug!(workflow = %self.kind, step = name, "Executing step");

        let value = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(AppError::Cancelled(format!(
                    "run abandoned before step '{name}' completed"
                )));
            }
            result = invoke => result?,
        };

        self.ledger.push(StepResult {
            step_name: name,
            service,
            payload: value.clone().into(),
        });
        Ok(value)
    }

    /// Convert the run into its outcome. Steps completed before a failure
    /// stay in the ledger; nothing is compensated.
    fn finish(mut self, result: Result<String>) -> WorkflowOutcome {
        match result {
            Ok(message) => {
                self.phase = RunPhase::Completed;
                let required_done = self
                    .kind
                    .plan()
                    .iter()
                    .filter(|s| s.required)
                    .all(|s| self.ledger.iter().any(|r| r.step_name == s.name));
                tracing::info!(
                    workflow = %self.kind,
                    phase = ?self.phase,
                    steps = self.ledger.len(),
                    "Workflow run finished"
                );
                WorkflowOutcome {
                    success: required_done,
                    message,
                    steps: self.ledger,
                }
            }
            Err(e) => {
                self.phase = RunPhase::Aborted;
                tracing::warn!(
                    workflow = %self.kind,
                    phase = ?self.phase,
                    error = %e,
                    completed_steps = self.ledger.len(),
                    "Workflow run aborted; completed steps are left in place"
                );
                WorkflowOutcome {
                    success: false,
                    message: e.to_string(),
                    steps: self.ledger,
                }
            }
        }
    }
}

fn parse_params<T>(params: serde_json::Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(params).map_err(|e| AppError::InvalidParams(e.to_string()))
}

fn split_repo(repo_name: &str) -> Result<(&str, &str)> {
    repo_name
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
        .ok_or_else(|| {
            AppError::InvalidParams(format!("repoName must be 'owner/repo', got '{repo_name}'"))
        })
}
