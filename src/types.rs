use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the crawl CSV with its derived URL features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub domain: String,
    pub path_depth: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrationResponse {
    pub system: String,
    pub status: String,
    pub summary: String,
    pub sample_payload: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftFixResponse {
    pub status: String,
    pub summary: String,
    pub branch: String,
}
