use serde::{Deserialize, Serialize};

/// Configuration from roadmap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapConfig {
    #[serde(default)]
    pub roadmap: RoadmapDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapDefaults {
    /// Timeframe expression, e.g. `6months`, `1year`, `Q1-Q4 2025`
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    /// One of epic, theme, team, quarter
    #[serde(default = "default_grouping")]
    pub grouping: String,
    /// One of timeline, strategic, release, epicgantt
    #[serde(default = "default_view")]
    pub view: String,
    #[serde(default)]
    pub include_dependencies: bool,
    /// Emit dependency edges for code-host issues too. Off by default:
    /// host issues appear as diagram nodes only.
    #[serde(default)]
    pub symmetric_host_edges: bool,
}

impl Default for RoadmapDefaults {
    fn default() -> Self {
        RoadmapDefaults {
            timeframe: default_timeframe(),
            grouping: default_grouping(),
            view: default_view(),
            include_dependencies: false,
            symmetric_host_edges: false,
        }
    }
}

fn default_timeframe() -> String {
    "6months".to_string()
}

fn default_grouping() -> String {
    "theme".to_string()
}

fn default_view() -> String {
    "timeline".to_string()
}

fn default_format() -> String {
    "roadmap".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// One of table, kanban, custom, gantt, roadmap
    #[serde(default = "default_format")]
    pub format: String,
    /// Append the metadata footer
    #[serde(default)]
    pub include_metadata: bool,
    /// Version label printed under the page title
    #[serde(default)]
    pub version_label: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: default_format(),
            include_metadata: false,
            version_label: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RoadmapConfig = toml::from_str("").unwrap();
        assert_eq!(config.roadmap.timeframe, "6months");
        assert_eq!(config.roadmap.grouping, "theme");
        assert_eq!(config.roadmap.view, "timeline");
        assert!(!config.roadmap.include_dependencies);
        assert!(!config.roadmap.symmetric_host_edges);
        assert_eq!(config.output.format, "roadmap");
        assert!(!config.output.include_metadata);
        assert_eq!(config.output.version_label, None);
    }

    #[test]
    fn test_partial_config() {
        let config: RoadmapConfig = toml::from_str(
            r#"[roadmap]
view = "epicgantt"
include_dependencies = true

[output]
format = "kanban"
version_label = "v2.1"
"#,
        )
        .unwrap();
        assert_eq!(config.roadmap.view, "epicgantt");
        assert_eq!(config.roadmap.grouping, "theme");
        assert!(config.roadmap.include_dependencies);
        assert_eq!(config.output.format, "kanban");
        assert_eq!(config.output.version_label.as_deref(), Some("v2.1"));
    }
}
