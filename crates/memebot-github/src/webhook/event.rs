//! Webhook event payload types.
//!
//! Only the fields the bot reads are modeled; serde ignores the rest of
//! GitHub's (large) payloads.

use serde::Deserialize;

/// A `pull_request` event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// What happened to the pull request ("opened", "closed", "synchronize", ...).
    pub action: String,
    /// The pull request the event is about.
    pub pull_request: PullRequestInfo,
    /// The repository the event came from.
    pub repository: RepositoryInfo,
}

impl PullRequestEvent {
    /// Whether this event announces a newly opened pull request.
    pub fn is_opened(&self) -> bool {
        self.action == "opened"
    }
}

/// The subset of pull request fields the bot uses.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    /// PR number within the repository, used as the issue number when
    /// commenting.
    pub number: u64,
    /// Target branch.
    pub base: BranchRef,
    /// Source branch.
    pub head: BranchRef,
}

/// A branch reference within a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    /// Branch name, e.g. "main".
    #[serde(rename = "ref")]
    pub name: String,
}

/// Repository identification from the event payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    /// Repository name without the owner prefix.
    pub name: String,
    /// Account that owns the repository.
    pub owner: RepositoryOwner,
}

impl RepositoryInfo {
    /// The `owner/name` form used in API paths and logs.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

/// Owner of a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    /// Login name of the owning user or organization.
    pub login: String,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
