use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::source::{AggregatedData, SourceMetadata};

/// Error type for loading fetcher output and writing rendered pages
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no input files given")]
    NoInput,
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Load one aggregated-data JSON file.
pub fn load_data(path: &Path) -> Result<AggregatedData, InputError> {
    let text = fs::read_to_string(path).map_err(|e| InputError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let data: AggregatedData =
        serde_json::from_str(&text).map_err(|e| InputError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(
        path = %path.display(),
        tickets = data.ticket_issues.len(),
        host_issues = data.host_issues.len(),
        pull_requests = data.host_pull_requests.len(),
        "loaded input"
    );
    Ok(data)
}

/// Load and merge several input files, e.g. separate ticket and code-host
/// fetches.
///
/// Issue lists are concatenated in argument order.
pub fn load_inputs(paths: &[PathBuf]) -> Result<AggregatedData, InputError> {
    if paths.is_empty() {
        return Err(InputError::NoInput);
    }
    paths
        .iter()
        .map(|p| load_data(p))
        .try_fold(AggregatedData::default(), |acc, data| Ok(merge(acc, data?)))
}

/// Combine two fetches. Issue lists concatenate; project, repository and
/// label lists are unioned; the newer fetch supplies the fetch time and
/// any scalar metadata it sets.
pub fn merge(mut base: AggregatedData, other: AggregatedData) -> AggregatedData {
    base.ticket_issues.extend(other.ticket_issues);
    base.host_issues.extend(other.host_issues);
    base.host_pull_requests.extend(other.host_pull_requests);
    base.metadata = merge_metadata(base.metadata, other.metadata);
    base
}

fn merge_metadata(a: SourceMetadata, b: SourceMetadata) -> SourceMetadata {
    let (older, newer) = if b.fetch_time >= a.fetch_time { (a, b) } else { (b, a) };
    SourceMetadata {
        fetch_time: newer.fetch_time,
        ticket_projects: union(older.ticket_projects, newer.ticket_projects),
        host_repos: union(older.host_repos, newer.host_repos),
        host_labels: union(older.host_labels, newer.host_labels),
        ticket_query: prefer_non_empty(newer.ticket_query, older.ticket_query),
        version_label: prefer_non_empty(newer.version_label, older.version_label),
    }
}

fn union(mut first: Vec<String>, second: Vec<String>) -> Vec<String> {
    for value in second {
        if !first.contains(&value) {
            first.push(value);
        }
    }
    first
}

fn prefer_non_empty(preferred: String, fallback: String) -> String {
    if preferred.is_empty() { fallback } else { preferred }
}

/// Write via a temp file in the same directory, then rename into place.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), InputError> {
    let write = || -> io::Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    };
    write().map_err(|e| InputError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TICKETS: &str = r#"{
        "jiraIssues": [
            {"key": "PROJ-1", "summary": "Schema", "status": "Done", "labels": null}
        ],
        "githubIssues": null,
        "metadata": {
            "fetchTime": "2025-03-01T10:00:00Z",
            "jiraProjects": ["PROJ"],
            "jiraJql": "project = PROJ"
        }
    }"#;

    const HOST: &str = r#"{
        "githubIssues": [
            {"title": "Client", "number": 5, "state": "open", "repository": "acme/api"}
        ],
        "githubPRs": [
            {"title": "Fix", "number": 6, "state": "open", "repository": "acme/api"}
        ],
        "metadata": {
            "fetchTime": "2025-03-02T08:00:00Z",
            "githubRepos": ["acme/api"],
            "jiraProjects": ["PROJ"]
        }
    }"#;

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_load_single_file() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "tickets.json", TICKETS);
        let data = load_data(&path).unwrap();
        assert_eq!(data.ticket_issues.len(), 1);
        assert!(data.host_issues.is_empty());
        assert_eq!(data.metadata.ticket_query, "project = PROJ");
    }

    #[test]
    fn test_merge_inputs() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![
            write(&tmp, "tickets.json", TICKETS),
            write(&tmp, "host.json", HOST),
        ];
        let data = load_inputs(&paths).unwrap();

        assert_eq!(data.ticket_issues[0].key, "PROJ-1");
        assert_eq!(data.host_issues[0].number, 5);
        assert_eq!(data.host_pull_requests.len(), 1);
        assert_eq!(
            data.metadata.fetch_time,
            Utc.with_ymd_and_hms(2025, 3, 2, 8, 0, 0).unwrap()
        );
        assert_eq!(data.metadata.ticket_projects, vec!["PROJ".to_string()]);
        assert_eq!(data.metadata.host_repos, vec!["acme/api".to_string()]);
        // The newer fetch has no query, so the older one is kept
        assert_eq!(data.metadata.ticket_query, "project = PROJ");
    }

    #[test]
    fn test_no_inputs() {
        assert!(matches!(load_inputs(&[]), Err(InputError::NoInput)));
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_data(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, InputError::ReadError { .. }));
        assert!(err.to_string().starts_with("could not read "));
    }

    #[test]
    fn test_malformed_json() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "bad.json", "{ not json");
        assert!(matches!(load_data(&path), Err(InputError::ParseError { .. })));
    }

    #[test]
    fn test_atomic_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("roadmap.html");

        atomic_write(&path, b"<h1>one</h1>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<h1>one</h1>");

        atomic_write(&path, b"<h1>two</h1>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<h1>two</h1>");
    }
}
