//! JSON decoders for the backend's student and grade collections.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::{GradeBatch, GradeRecord, StudentRecord};

/// Decodes the `GET /students` payload.
///
/// # Errors
///
/// Returns an error if the body is not a JSON array of well-formed students.
pub fn parse_students(bytes: &[u8]) -> Result<Vec<StudentRecord>> {
    let students: Vec<StudentRecord> =
        serde_json::from_slice(bytes).context("students payload is not a valid student list")?;
    debug!(count = students.len(), "Students decoded");
    Ok(students)
}

/// Decodes the `GET /grades` payload record by record.
///
/// A record with a missing key field or a score that is not a number in
/// 0–20 is dropped and counted in [`GradeBatch::rejected`]; the remaining
/// records keep their original order.
///
/// # Errors
///
/// Returns an error only if the body is not a JSON array.
pub fn parse_grades(bytes: &[u8]) -> Result<GradeBatch> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).context("grades payload is not a JSON array")?;

    let mut batch = GradeBatch::default();
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<GradeRecord>(value) {
            Ok(grade) => batch.grades.push(grade),
            Err(e) => {
                warn!(index, error = %e, "Grade record rejected");
                batch.rejected += 1;
            }
        }
    }

    debug!(
        count = batch.grades.len(),
        rejected = batch.rejected,
        "Grades decoded"
    );
    Ok(batch)
}
