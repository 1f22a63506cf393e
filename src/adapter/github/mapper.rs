use crate::adapter::types;

/// Map a freshly created git ref to our branch type.
pub fn map_created_ref(name: &str, r: &octocrab::models::repos::Ref) -> types::BranchRef {
    let sha = match &r.object {
        octocrab::models::repos::Object::Commit { sha, .. } => sha.clone(),
        octocrab::models::repos::Object::Tag { sha, .. } => sha.clone(),
        _ => String::new(),
    };

    types::BranchRef {
        name: name.to_string(),
        sha,
    }
}

pub fn map_branch(branch: octocrab::models::repos::Branch) -> types::Branch {
    types::Branch {
        name: branch.name,
        sha: branch.commit.sha,
        protected: branch.protected,
    }
}

pub fn map_pull_request(pr: octocrab::models::pulls::PullRequest) -> types::PullRequest {
    types::PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        url: pr.html_url.as_ref().map(|u| u.to_string()).unwrap_or_default(),
        head_branch: pr.head.ref_field.clone(),
        base_branch: pr.base.ref_field.clone(),
    }
}
