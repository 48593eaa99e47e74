//! Status code to reason phrase lookup.
//!
//! A client starts from the built-in table or replaces it wholesale with an
//! external one loaded during construction. Tables are never merged and never
//! change after the client is built.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_MESSAGES: &[(u16, &str)] = &[
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (204, "No Content"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (500, "Internal Server Error"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
];

/// Errors from loading an external status table.
#[derive(Debug, Error)]
pub enum StatusTableError {
    #[error("failed to read status table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML status table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON status table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' is not a valid HTTP status code")]
    InvalidCode(String),

    #[error("status table is empty")]
    Empty,
}

/// Read-only mapping from HTTP status code to a human-readable phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessageTable {
    messages: HashMap<u16, String>,
}

impl Default for StatusMessageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StatusMessageTable {
    /// The default table every client starts with.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_MESSAGES.iter().map(|(code, msg)| (*code, *msg)))
    }

    /// Build a table from `(code, phrase)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u16, S)>,
        S: Into<String>,
    {
        Self {
            messages: pairs.into_iter().map(|(code, msg)| (code, msg.into())).collect(),
        }
    }

    /// Phrase for `code`, if the table has one.
    pub fn lookup(&self, code: u16) -> Option<&str> {
        self.messages.get(&code).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Entries sorted by status code.
    pub fn entries(&self) -> Vec<(u16, &str)> {
        let mut entries: Vec<_> = self
            .messages
            .iter()
            .map(|(code, msg)| (*code, msg.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(code, _)| *code);
        entries
    }

    /// Load an external table.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as TOML. Both
    /// formats are flat maps keyed by status code.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StatusTableError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StatusTableError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, StatusTableError> {
        let raw: BTreeMap<String, String> = toml::from_str(content)?;
        Self::from_raw(raw)
    }

    pub fn from_json(content: &str) -> Result<Self, StatusTableError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, String>) -> Result<Self, StatusTableError> {
        if raw.is_empty() {
            return Err(StatusTableError::Empty);
        }

        let mut messages = HashMap::with_capacity(raw.len());
        for (key, message) in raw {
            let code = key
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|code| (100..=599).contains(code))
                .ok_or_else(|| StatusTableError::InvalidCode(key.clone()))?;
            messages.insert(code, message);
        }

        Ok(Self { messages })
    }
}
