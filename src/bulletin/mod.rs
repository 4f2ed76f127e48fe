//! Report-card (bulletin) generation.
//!
//! This module filters a student's grades, keeps the first grade per course,
//! groups them by class, averages them, and derives the overall average,
//! appreciation, and summary statistics.

pub mod aggregate;
pub mod appreciation;
pub mod types;
pub mod utility;

pub use aggregate::{generate_bulletin, generate_bulletin_on};
pub use types::{BulletinOutcome, BulletinReport, NoStudentSelected};
