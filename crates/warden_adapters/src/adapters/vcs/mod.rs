//! Version control system adapters.

mod github;
mod gitlab;

pub use github::GitHubAdapter;
pub use gitlab::GitLabAdapter;
