//! Search-index mirror configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Elasticsearch-compatible driver index
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Whether documents are mirrored at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Base URL of the search cluster
    #[serde(default = "default_url")]
    pub url: String,

    /// Index holding driver documents
    #[serde(default = "default_driver_index")]
    pub driver_index: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Capacity of the reindex queue; documents beyond it are dropped
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_url(),
            driver_index: default_driver_index(),
            request_timeout_secs: default_request_timeout(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl SearchConfig {
    /// URL of a single driver document
    pub fn document_url(&self, id: &str) -> String {
        format!(
            "{}/{}/_doc/{}",
            self.url.trim_end_matches('/'),
            self.driver_index,
            id
        )
    }
}

fn default_enabled() -> bool {
    true
}

fn default_url() -> String {
    String::from("http://localhost:9200")
}

fn default_driver_index() -> String {
    String::from("driver")
}

fn default_request_timeout() -> u64 {
    5
}

fn default_queue_capacity() -> usize {
    1024
}
