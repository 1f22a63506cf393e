//! Rendering of workflow outcomes for the calling interface.

use crate::workflow::types::WorkflowOutcome;

/// Render an outcome as a short human-readable report.
pub fn render(outcome: &WorkflowOutcome) -> String {
    let mut lines = Vec::new();

    if outcome.success {
        lines.push(format!("Workflow succeeded: {}", outcome.message));
    } else {
        lines.push(format!("Workflow failed: {}", outcome.message));
    }

    if !outcome.steps.is_empty() {
        lines.push(format!("Completed steps ({}):", outcome.steps.len()));
        for (i, step) in outcome.steps.iter().enumerate() {
            lines.push(format!(
                "  {}. [{}] {}: {}",
                i + 1,
                step.service,
                step.step_name,
                step.payload.describe()
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::types::BranchRef;
    use crate::workflow::types::{OperationResult, ServiceTag, StepResult, STEP_CREATE_BRANCH};

    #[test]
    fn test_render_success_lists_steps() {
        let outcome = WorkflowOutcome {
            success: true,
            message: "Created branch 'feature/x'".to_string(),
            steps: vec![StepResult {
                step_name: STEP_CREATE_BRANCH,
                service: ServiceTag::VersionControl,
                payload: OperationResult::Branch(BranchRef {
                    name: "feature/x".to_string(),
                    sha: "abc123".to_string(),
                }),
            }],
        };

        let report = render(&outcome);
        assert!(report.starts_with("Workflow succeeded"));
        assert!(report.contains("[version-control] create-branch"));
        assert!(report.contains("feature/x"));
    }

    #[test]
    fn test_render_failure_without_steps_is_single_line() {
        let outcome = WorkflowOutcome {
            success: false,
            message: "Not found: base branch 'main'".to_string(),
            steps: Vec::new(),
        };

        let report = render(&outcome);
        assert_eq!(report, "Workflow failed: Not found: base branch 'main'");
    }
}
