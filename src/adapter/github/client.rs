use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use octocrab::params::repos::Reference;
use octocrab::Octocrab;

use crate::adapter::types::*;
use crate::adapter::VersionControl;
use crate::config::GitHubConfig;
use crate::error::{AppError, Result};
use crate::policy;

use super::mapper;

pub struct GitHubAdapter {
    client: Octocrab,
}

impl GitHubAdapter {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build GitHub client: {e}")))?;

        Ok(Self { client })
    }

    /// Percent-encode each segment of a repo-relative file path.
    fn encode_path(path: &str) -> String {
        path.split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[async_trait]
impl VersionControl for GitHubAdapter {
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        base_sha: &str,
    ) -> Result<BranchRef> {
        let verdict = policy::validate(name);
        if let Some(rule) = verdict.failed_rule {
            return Err(AppError::PolicyViolation {
                rule: rule.name().to_string(),
                explanation: verdict.explanation,
            });
        }

        let created = self
            .client
            .repos(owner, repo)
            .create_ref(&Reference::Branch(name.to_string()), base_sha)
            .await?;

        Ok(mapper::map_created_ref(name, &created))
    }

    async fn list_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        let page = self
            .client
            .repos(owner, repo)
            .list_branches()
            .per_page(100)
            .send()
            .await?;

        Ok(page.items.into_iter().map(mapper::map_branch).collect())
    }

    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr: &CreatePullRequest,
    ) -> Result<PullRequest> {
        let created = self
            .client
            .pulls(owner, repo)
            .create(&pr.title, &pr.head_branch, &pr.base_branch)
            .body(&pr.body)
            .send()
            .await?;

        Ok(mapper::map_pull_request(created))
    }

    async fn list_pull_requests(&self, owner: &str, repo: &str) -> Result<Vec<PullRequest>> {
        let page = self
            .client
            .pulls(owner, repo)
            .list()
            .per_page(100)
            .send()
            .await?;

        Ok(page.items.into_iter().map(mapper::map_pull_request).collect())
    }

    async fn get_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileContent> {
        let encoded = Self::encode_path(path);
        let url = format!("/repos/{owner}/{repo}/contents/{encoded}?ref={branch}");
        let response: serde_json::Value = self.client.get(&url, None::<&()>).await?;

        let raw = response["content"]
            .as_str()
            .unwrap_or_default()
            .replace(['\n', '\r'], "");
        let bytes = BASE64
            .decode(raw)
            .map_err(|e| AppError::Adapter(format!("Invalid base64 in file content: {e}")))?;

        Ok(FileContent {
            path: path.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            sha: response["sha"].as_str().unwrap_or_default().to_string(),
        })
    }

    async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        update: &UpdateFile,
    ) -> Result<FileCommit> {
        let mut body = serde_json::json!({
            "message": update.message,
            "content": BASE64.encode(&update.content),
        });
        if let Some(sha) = &update.sha {
            body["sha"] = serde_json::json!(sha);
        }
        if let Some(branch) = &update.branch {
            body["branch"] = serde_json::json!(branch);
        }

        let encoded = Self::encode_path(&update.path);
        let url = format!("/repos/{owner}/{repo}/contents/{encoded}");
        let response: serde_json::Value = self.client.put(&url, Some(&body)).await?;

        Ok(FileCommit {
            path: update.path.clone(),
            sha: response["commit"]["sha"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        })
    }
}
