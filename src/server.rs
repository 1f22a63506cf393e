use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::adapter::github::GitHubAdapter;
use crate::adapter::trello::TrelloAdapter;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::knowledge::KnowledgeBase;
use crate::shell::CommandRunner;
use crate::workflow::{report, Orchestrator, WorkflowKind, WorkflowOutcome};

pub struct AppState {
    pub config: AppConfig,
    pub github: GitHubAdapter,
    pub trello: TrelloAdapter,
    pub knowledge: KnowledgeBase,
    pub runner: CommandRunner,
    /// Cancelled on shutdown to abandon in-flight workflow runs.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: AppConfig) -> crate::error::Result<Self> {
        let github = GitHubAdapter::new(&config.github)?;
        let trello = TrelloAdapter::new(&config.trello);
        let knowledge = KnowledgeBase::load(config.knowledge.docs_path.as_deref())?;
        let runner = CommandRunner::new(&config.shell);

        Ok(Self {
            config,
            github,
            trello,
            knowledge,
            runner,
            shutdown: CancellationToken::new(),
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/workflows/:kind", post(run_workflow))
        .route("/knowledge/:topic", get(get_topic))
        .route("/commands", post(run_command))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

#[derive(Serialize)]
struct WorkflowResponse {
    outcome: WorkflowOutcome,
    report: String,
}

async fn run_workflow(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(params): Json<serde_json::Value>,
) -> Response {
    let kind = match WorkflowKind::parse(&kind) {
        Ok(kind) => kind,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected workflow request");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let orchestrator = Orchestrator::new(
        &state.github,
        &state.trello,
        &state.config.workflow.base_branch,
    );
    let outcome = orchestrator
        .run_with_cancel(kind, params, state.shutdown.child_token())
        .await;
    let report = report::render(&outcome);

    Json(WorkflowResponse { outcome, report }).into_response()
}

async fn get_topic(State(state): State<Arc<AppState>>, Path(topic): Path<String>) -> Response {
    match state.knowledge.lookup(&topic) {
        Some(entry) => Json(entry.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("No documentation for topic '{topic}'"),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommandRequest {
    program: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    cwd: Option<PathBuf>,
}

async fn run_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Response {
    match state
        .runner
        .run(&request.program, &request.args, request.cwd.as_deref())
        .await
    {
        Ok(output) => Json(output).into_response(),
        Err(e @ AppError::CommandNotAllowed(_)) => {
            (StatusCode::FORBIDDEN, e.to_string()).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
