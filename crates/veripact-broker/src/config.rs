//! Broker configuration parsing.
//!
//! Recognized keys: `url` (required string), `username` and `password`
//! (optional strings), `tags` (a string or a list of strings; a
//! comma-separated string splits into a list). Configuration errors are
//! raised here, before any retrieval.

use serde_json::Value;
use veripact::{ConfigMap, ConfigurationError};

/// Basic-auth credentials forwarded to the broker client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAuth {
    username: String,
    password: String,
}

impl BrokerAuth {
    /// The configured username, trimmed.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The configured password, trimmed.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Parsed broker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerConfig {
    url: String,
    username: String,
    password: String,
    tags: Vec<String>,
}

impl BrokerConfig {
    /// Parse the recognized keys from an external configuration map.
    ///
    /// Unrecognized keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingKey`] when `url` is absent and
    /// [`ConfigurationError::InvalidType`] when a recognized key holds a
    /// value of the wrong type.
    pub fn from_config(config: &ConfigMap) -> Result<Self, ConfigurationError> {
        let url = match config.get("url") {
            None => return Err(ConfigurationError::MissingKey { key: "url" }),
            Some(Value::String(url)) => url.clone(),
            Some(other) => {
                return Err(ConfigurationError::InvalidType {
                    key: "url",
                    expected: "a string",
                    found: json_type(other).to_string(),
                });
            }
        };

        Ok(Self {
            url,
            username: optional_string(config, "username")?,
            password: optional_string(config, "password")?,
            tags: parse_tags(config.get("tags"))?,
        })
    }

    /// The broker base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Tags to retrieve, in declaration order; empty means "latest per
    /// consumer".
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Credentials, present only when both username and password are
    /// non-empty after trimming.
    #[must_use]
    pub fn auth(&self) -> Option<BrokerAuth> {
        let username = self.username.trim();
        let password = self.password.trim();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(BrokerAuth {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

fn optional_string(config: &ConfigMap, key: &'static str) -> Result<String, ConfigurationError> {
    match config.get(key) {
        None => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(ConfigurationError::InvalidType {
            key,
            expected: "a string",
            found: json_type(other).to_string(),
        }),
    }
}

fn parse_tags(value: Option<&Value>) -> Result<Vec<String>, ConfigurationError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::String(tags)) => Ok(split_tags(tags)),
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(tag) = item else {
                    return Err(ConfigurationError::InvalidType {
                        key: "tags",
                        expected: "a string or a list of strings",
                        found: json_type(item).to_string(),
                    });
                };
                let tag = tag.trim();
                if !tag.is_empty() {
                    tags.push(tag.to_string());
                }
            }
            Ok(tags)
        }
        Some(other) => Err(ConfigurationError::InvalidType {
            key: "tags",
            expected: "a string or a list of strings",
            found: json_type(other).to_string(),
        }),
    }
}

fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
