use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::models::{GradeBatch, StudentRecord};
use crate::parser::{parse_grades, parse_students};
use crate::services::school_api::SchoolApi;

/// Reads the two collections from JSON files shaped like the REST payloads.
pub struct FileSchoolSource {
    pub students_path: PathBuf,
    pub grades_path: PathBuf,
}

impl FileSchoolSource {
    pub fn new(students_path: impl Into<PathBuf>, grades_path: impl Into<PathBuf>) -> Self {
        Self {
            students_path: students_path.into(),
            grades_path: grades_path.into(),
        }
    }
}

#[async_trait]
impl SchoolApi for FileSchoolSource {
    async fn list_students(&self) -> Result<Vec<StudentRecord>> {
        let bytes = tokio::fs::read(&self.students_path)
            .await
            .with_context(|| format!("reading {}", self.students_path.display()))?;
        parse_students(&bytes)
    }

    async fn list_grades(&self) -> Result<GradeBatch> {
        let bytes = tokio::fs::read(&self.grades_path)
            .await
            .with_context(|| format!("reading {}", self.grades_path.display()))?;
        parse_grades(&bytes)
    }
}
