//! Trait and snapshot type for reading the school's collections.

use anyhow::Result;
use tracing::info;

use crate::models::{GradeBatch, StudentRecord};

/// Read-only access to the student and grade collections.
#[async_trait::async_trait]
pub trait SchoolApi: Send + Sync {
    /// Returns every enrolled student.
    async fn list_students(&self) -> Result<Vec<StudentRecord>>;

    /// Returns every grade that passed validation.
    async fn list_grades(&self) -> Result<GradeBatch>;
}

/// Both collections as read at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub students: Vec<StudentRecord>,
    pub grades: GradeBatch,
}

/// Fetches students and grades concurrently and waits for both.
///
/// # Errors
///
/// Fails as soon as either fetch fails.
#[tracing::instrument(skip(api))]
pub async fn load_snapshot<A: SchoolApi + ?Sized>(api: &A) -> Result<Snapshot> {
    let (students, grades) = tokio::try_join!(api.list_students(), api.list_grades())?;

    info!(
        students = students.len(),
        grades = grades.grades.len(),
        rejected_grades = grades.rejected,
        "Snapshot loaded"
    );

    Ok(Snapshot { students, grades })
}
