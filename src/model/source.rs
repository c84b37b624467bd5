use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Combined output of the ticket and code-host fetchers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AggregatedData {
    #[serde(rename = "jiraIssues", deserialize_with = "nullable_vec")]
    pub ticket_issues: Vec<TicketIssue>,
    #[serde(rename = "githubIssues", deserialize_with = "nullable_vec")]
    pub host_issues: Vec<HostIssue>,
    /// Carried for the summary counts only; never projected onto the roadmap.
    #[serde(rename = "githubPRs", deserialize_with = "nullable_vec")]
    pub host_pull_requests: Vec<HostPullRequest>,
    pub metadata: SourceMetadata,
}

/// An issue from the ticketing system.
///
/// Timestamps keep the offset they were written with so calendar dates
/// are read in the source's own zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketIssue {
    pub key: String,
    pub issue_type: String,
    pub summary: String,
    /// Native workflow status, e.g. `In Progress`
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub reporter: String,
    pub team: String,
    #[serde(deserialize_with = "nullable_vec")]
    pub labels: Vec<String>,
    /// Key of the parent epic, e.g. `PROJ-1`
    pub epic_link: String,
    pub created_date: DateTime<FixedOffset>,
    pub updated_date: DateTime<FixedOffset>,
    pub description: String,
    #[serde(deserialize_with = "nullable_vec")]
    pub fix_versions: Vec<String>,
    #[serde(deserialize_with = "nullable_vec")]
    pub watchers: Vec<String>,
    pub url: String,

    // --- Planning fields ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub initiative: String,
    /// Keys of issues this one depends on
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Numeric priority (1-100)
    #[serde(skip_serializing_if = "is_zero")]
    pub priority_score: i32,
    /// Explicit planning status, e.g. `At Risk`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub roadmap_status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub milestone: String,
    /// Explicit quarter label, e.g. `Q1 2025`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub quarter: String,
}

/// An issue from the code-hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostIssue {
    pub title: String,
    pub number: u64,
    /// `open` or `closed`
    pub state: String,
    #[serde(deserialize_with = "nullable_vec")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "nullable_vec")]
    pub assignees: Vec<String>,
    pub created_date: DateTime<FixedOffset>,
    pub updated_date: DateTime<FixedOffset>,
    pub url: String,
    /// `owner/name`
    pub repository: String,

    // --- Planning fields ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub theme: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub initiative: String,
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub priority_score: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub roadmap_status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub milestone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub quarter: String,
}

/// A pull request from the code-hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostPullRequest {
    pub title: String,
    pub number: u64,
    pub state: String,
    #[serde(deserialize_with = "nullable_vec")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "nullable_vec")]
    pub assignees: Vec<String>,
    pub created_date: DateTime<FixedOffset>,
    pub updated_date: DateTime<FixedOffset>,
    pub url: String,
    pub repository: String,
    pub is_draft: bool,
    pub merge_status: String,
}

/// Information about how the data was collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceMetadata {
    pub fetch_time: DateTime<Utc>,
    #[serde(rename = "jiraProjects", deserialize_with = "nullable_vec")]
    pub ticket_projects: Vec<String>,
    #[serde(rename = "githubRepos", deserialize_with = "nullable_vec")]
    pub host_repos: Vec<String>,
    #[serde(rename = "jiraJql", skip_serializing_if = "String::is_empty")]
    pub ticket_query: String,
    #[serde(
        rename = "githubLabels",
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub host_labels: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version_label: String,
}

impl SourceMetadata {
    /// True when the fetch time was never recorded (zero value or epoch).
    pub fn fetch_time_unset(&self) -> bool {
        self.fetch_time.timestamp() <= 0
    }
}

/// The fetchers emit `null` for empty lists.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_ticket_issue_with_nulls() {
        let json = r#"{
            "key": "PROJ-7",
            "issueType": "Story",
            "summary": "Ship the thing",
            "status": "In Progress",
            "labels": null,
            "epicLink": "PROJ-1",
            "createdDate": "2025-01-10T09:00:00Z",
            "updatedDate": "2025-01-20T17:30:00Z",
            "fixVersions": null,
            "watchers": null,
            "url": "https://tickets.example.com/browse/PROJ-7",
            "plannedEndDate": "2025-04-01T00:00:00Z",
            "dependencies": ["PROJ-3"]
        }"#;
        let issue: TicketIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "PROJ-7");
        assert_eq!(issue.epic_link, "PROJ-1");
        assert!(issue.labels.is_empty());
        assert_eq!(issue.planned_start_date, None);
        assert_eq!(
            issue.planned_end_date,
            Some(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap().fixed_offset())
        );
        assert_eq!(issue.dependencies, vec!["PROJ-3".to_string()]);
    }

    #[test]
    fn test_timestamps_keep_their_offset() {
        let json = r#"{"key": "PROJ-8", "plannedStartDate": "2025-04-01T00:00:00+10:00"}"#;
        let issue: TicketIssue = serde_json::from_str(json).unwrap();
        let start = issue.planned_start_date.unwrap();
        assert_eq!(start.offset().local_minus_utc(), 10 * 3600);
        assert_eq!(start.date_naive().to_string(), "2025-04-01");
    }

    #[test]
    fn test_parse_aggregated_data() {
        let json = r#"{
            "jiraIssues": [],
            "githubIssues": [{"title": "Flaky CI", "number": 12, "state": "open",
                              "createdDate": "2025-02-01T00:00:00Z",
                              "updatedDate": "2025-02-03T00:00:00Z",
                              "repository": "acme/api"}],
            "githubPRs": null,
            "metadata": {"fetchTime": "2025-02-04T08:00:00Z", "githubRepos": ["acme/api"]}
        }"#;
        let data: AggregatedData = serde_json::from_str(json).unwrap();
        assert!(data.ticket_issues.is_empty());
        assert_eq!(data.host_issues.len(), 1);
        assert_eq!(data.host_issues[0].number, 12);
        assert!(data.host_pull_requests.is_empty());
        assert_eq!(data.metadata.host_repos, vec!["acme/api".to_string()]);
        assert!(!data.metadata.fetch_time_unset());
    }

    #[test]
    fn test_go_zero_time_counts_as_unset() {
        let json = r#"{"fetchTime": "0001-01-01T00:00:00Z"}"#;
        let meta: SourceMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.fetch_time_unset());
    }
}
