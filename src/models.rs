//! GitHub API data transfer objects
//!
//! Wire-format records decoded from response bodies. Unknown fields are
//! ignored everywhere except [`ErrorBody`], which preserves them.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Fixed date pattern used by the API, UTC
pub const DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";

// ============================================================================
// Date format
// ============================================================================

/// Serde adapter for the fixed `yyyy-MM-dd'T'HH:mm:ss'Z'` pattern
pub mod github_date {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_PATTERN).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for nullable date fields in the same pattern
pub mod github_date_opt {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => github_date::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse_date(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, DATE_PATTERN).map(|naive| Utc.from_utc_datetime(&naive))
}

// ============================================================================
// Users
// ============================================================================

/// Collection summary item: one contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions: Option<u64>,
}

/// Per-user detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    pub login: String,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(with = "github_date_opt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Pull requests
// ============================================================================

/// Branch endpoint of a pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub sha: String,
}

/// Pull request summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(with = "github_date")]
    pub updated_at: DateTime<Utc>,
    #[serde(with = "github_date_opt", default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<CommitReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<CommitReference>,
}

// ============================================================================
// Comments
// ============================================================================

/// Which URL field of a [`Comment`] supplies its issue number.
///
/// Plain issue comments carry an `issue_url`; pull-request review comments
/// carry a `pull_request_url` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Issue,
    PullRequestReview,
}

/// A comment on an issue or a pull request.
///
/// One shared record covers both wire shapes; the review-only fields stay
/// `None` for plain issue comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(with = "github_date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "github_date")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_url: Option<String>,
    // review-comment only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request_review_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_hunk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_position: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_commit_id: Option<String>,
}

impl Comment {
    /// The issue number this comment belongs to, derived from the URL field
    /// selected by `kind`.
    pub fn issue_number(&self, kind: CommentKind) -> Option<u64> {
        let url = match kind {
            CommentKind::Issue => self.issue_url.as_deref(),
            CommentKind::PullRequestReview => self.pull_request_url.as_deref(),
        }?;
        number_from_url(url)
    }
}

/// Trailing path segment of a URL parsed as a number
fn number_from_url(url: &str) -> Option<u64> {
    url.rsplit('/').next()?.parse().ok()
}

// ============================================================================
// Error body
// ============================================================================

/// JSON body of a non-2xx response.
///
/// `message` and `documentation_url` are the documented fields; anything
/// else the server sends is preserved losslessly in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_date_round_trip() {
        let date = parse_date("2015-04-26T18:51:36Z").unwrap();
        assert_eq!(date.format(DATE_PATTERN).to_string(), "2015-04-26T18:51:36Z");
    }

    #[test]
    fn test_user_detail_deserialize() {
        let detail: UserDetail = serde_json::from_value(json!({
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "company": "GitHub",
            "public_repos": 8,
            "created_at": "2011-01-25T18:44:36Z",
            "some_future_field": true
        }))
        .unwrap();

        assert_eq!(detail.login, "octocat");
        assert_eq!(detail.name.as_deref(), Some("The Octocat"));
        let created = detail.created_at.unwrap();
        assert_eq!(created.format(DATE_PATTERN).to_string(), "2011-01-25T18:44:36Z");
    }

    #[test]
    fn test_pull_request_nullable_merged_at() {
        let pr: PullRequest = serde_json::from_value(json!({
            "id": 1,
            "number": 42,
            "title": "Add feature",
            "state": "open",
            "updated_at": "2020-03-01T10:00:00Z",
            "merged_at": null,
            "head": {"label": "octo:topic", "ref": "topic", "sha": "abc123"}
        }))
        .unwrap();

        assert!(pr.merged_at.is_none());
        assert_eq!(pr.head.unwrap().git_ref, "topic");
    }

    #[test]
    fn test_issue_comment_number_from_issue_url() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 7,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-02T00:00:00Z",
            "body": "looks good",
            "issue_url": "https://api.github.com/repos/octo/flow/issues/1347"
        }))
        .unwrap();

        assert_eq!(comment.issue_number(CommentKind::Issue), Some(1347));
        assert_eq!(comment.issue_number(CommentKind::PullRequestReview), None);
    }

    #[test]
    fn test_review_comment_number_from_pull_request_url() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 8,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-02T00:00:00Z",
            "diff_hunk": "@@ -1,3 +1,3 @@",
            "path": "src/lib.rs",
            "pull_request_url": "https://api.github.com/repos/octo/flow/pulls/91"
        }))
        .unwrap();

        assert_eq!(comment.issue_number(CommentKind::PullRequestReview), Some(91));
        assert_eq!(comment.diff_hunk.as_deref(), Some("@@ -1,3 +1,3 @@"));
    }

    #[test]
    fn test_error_body_preserves_extra_fields() {
        let raw = json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest",
            "errors": [{"resource": "Issue", "code": "missing_field"}]
        });
        let body: ErrorBody = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(body.message, "Validation Failed");
        assert_eq!(
            body.documentation_url.as_deref(),
            Some("https://docs.github.com/rest")
        );
        assert_eq!(serde_json::to_value(&body).unwrap(), raw);
    }

    #[test]
    fn test_error_body_defaults_on_empty_object() {
        let body: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert!(body.message.is_empty());
        assert!(body.documentation_url.is_none());
        assert!(body.extra.is_empty());
    }
}
