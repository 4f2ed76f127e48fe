use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::config::ApiConfig;
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::models::{GradeBatch, StudentRecord};
use crate::parser::{parse_grades, parse_students};
use crate::services::school_api::SchoolApi;

/// Reads the collections from the school REST backend.
pub struct RestSchoolClient<C = BasicClient> {
    http: C,
    config: ApiConfig,
}

impl RestSchoolClient<BasicClient> {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = BasicClient::new(config.timeout)?;
        Ok(Self { http, config })
    }
}

impl<C: HttpClient> RestSchoolClient<C> {
    pub fn with_client(http: C, config: ApiConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl<C: HttpClient> SchoolApi for RestSchoolClient<C> {
    async fn list_students(&self) -> Result<Vec<StudentRecord>> {
        let url = self.config.students_url();
        let bytes = fetch_bytes(&self.http, &url).await?;
        let students = parse_students(&bytes).with_context(|| format!("decoding {url}"))?;
        info!(count = students.len(), "Students fetched");
        Ok(students)
    }

    async fn list_grades(&self) -> Result<GradeBatch> {
        let url = self.config.grades_url();
        let bytes = fetch_bytes(&self.http, &url).await?;
        let batch = parse_grades(&bytes).with_context(|| format!("decoding {url}"))?;
        info!(
            count = batch.grades.len(),
            rejected = batch.rejected,
            "Grades fetched"
        );
        Ok(batch)
    }
}
