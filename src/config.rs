//! Environment-driven settings for the REST backend.

use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_STUDENTS_PATH: &str = "/students";
pub const DEFAULT_GRADES_PATH: &str = "/grades";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the student and grade collections live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub students_path: String,
    pub grades_path: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            students_path: DEFAULT_STUDENTS_PATH.to_string(),
            grades_path: DEFAULT_GRADES_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Reads `BULLETIN_API_URL`, `BULLETIN_STUDENTS_PATH`, `BULLETIN_GRADES_PATH`
    /// and `BULLETIN_HTTP_TIMEOUT_SECS`, falling back to the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let timeout = match lookup("BULLETIN_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("BULLETIN_HTTP_TIMEOUT_SECS={raw:?} is not a number of seconds"))?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            base_url: lookup("BULLETIN_API_URL").unwrap_or(defaults.base_url),
            students_path: lookup("BULLETIN_STUDENTS_PATH").unwrap_or(defaults.students_path),
            grades_path: lookup("BULLETIN_GRADES_PATH").unwrap_or(defaults.grades_path),
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    pub fn students_url(&self) -> String {
        join_url(&self.base_url, &self.students_path)
    }

    pub fn grades_url(&self) -> String {
        join_url(&self.base_url, &self.grades_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
