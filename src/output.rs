//! JSON export and CSV register of generated bulletins.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::bulletin::types::BulletinReport;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// One line of the bulletin register.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRow<'a> {
    pub date_generation: &'a str,
    pub matricule: &'a str,
    pub nom: &'a str,
    pub prenom: &'a str,
    pub classe: &'a str,
    pub moyenne_generale: String,
    pub appreciation: &'a str,
    pub notes_reussies: usize,
    pub notes_echouees: usize,
    pub total_matieres: usize,
}

impl<'a> From<&'a BulletinReport> for RegisterRow<'a> {
    fn from(report: &'a BulletinReport) -> Self {
        let stats = &report.statistiques;
        Self {
            date_generation: &report.date_generation,
            matricule: &report.eleve.matricule,
            nom: &report.eleve.nom,
            prenom: &report.eleve.prenom,
            classe: report.eleve.nom_classe.as_deref().unwrap_or(""),
            moyenne_generale: report.moyenne_generale.to_string(),
            appreciation: &report.appreciation,
            notes_reussies: stats.notes_reussies,
            notes_echouees: stats.notes_echouees,
            total_matieres: stats.total_matieres,
        }
    }
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &BulletinReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the JSON export of `report` to `path`.
pub fn write_json(report: &BulletinReport, path: &Path) -> Result<()> {
    fs::write(path, to_json(report)?).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "Bulletin JSON written");
    Ok(())
}

/// Appends a [`RegisterRow`] for `report` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_register(path: &Path, report: &BulletinReport) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending register row");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("opening register {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(RegisterRow::from(report))?;
    writer.flush()?;

    Ok(())
}
