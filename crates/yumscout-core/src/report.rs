//! Result of a completed repository walk.

use serde::{Deserialize, Serialize};

/// Everything a successful walk discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkReport {
    /// Normalised repository base URL.
    pub base_url: String,
    /// Visited domains in first-seen order.
    pub domains: Vec<String>,
    /// Visited URLs, including redirect hops, in first-seen order.
    pub urls: Vec<String>,
    /// Number of package entries in the primary metadata.
    pub packages: usize,
    /// Probes skipped under the best-effort policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_probes: Vec<FailedProbe>,
}

/// A package probe that failed under the best-effort policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedProbe {
    /// Package location as written in the primary metadata.
    pub href: String,
    /// Rendered error.
    pub error: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let report = WalkReport {
            base_url: "http://a.test/repo/".to_string(),
            domains: vec!["a.test".to_string(), "b.test".to_string()],
            urls: vec!["http://a.test/repo/repodata/repomd.xml".to_string()],
            packages: 0,
            failed_probes: Vec::new(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["domains"], serde_json::json!(["a.test", "b.test"]));
        assert_eq!(value["packages"], 0);
        assert!(value.get("failed_probes").is_none());

        let back: WalkReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }
}
