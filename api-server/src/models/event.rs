//! Serverless event model
//!
//! Function-style invocation envelope: the HTTP request arrives as a JSON
//! document and the response goes back as one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ServerlessEvent {
    #[serde(rename = "httpMethod", default = "default_method")]
    pub http_method: String,

    #[serde(default = "default_path")]
    pub path: String,

    /// Raw request body (a JSON document encoded as a string)
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerlessResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ServerlessResponse {
    pub fn json(status_code: u16, body: &impl Serialize) -> Self {
        let mut headers = cors_headers();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status_code,
            headers,
            // Serializing our own response types cannot fail
            body: serde_json::to_string(body).unwrap_or_default(),
        }
    }

    /// CORS preflight answer
    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: cors_headers(),
            body: String::new(),
        }
    }
}

pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Methods".to_string(), "GET, POST, OPTIONS".to_string()),
        ("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string()),
    ])
}
