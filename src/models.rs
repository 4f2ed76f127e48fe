//! Student and grade records as served by the school REST backend.
//!
//! Field names follow the backend's camelCase JSON. Optional attributes are
//! explicit `Option`s; empty strings coming from form inputs are folded into
//! `None` at decode time so downstream code never has to test for `""`.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Student sex as recorded on the enrollment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sexe {
    #[serde(alias = "Masculin", alias = "m")]
    M,
    #[serde(alias = "Féminin", alias = "f")]
    F,
}

impl fmt::Display for Sexe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexe::M => f.write_str("M"),
            Sexe::F => f.write_str("F"),
        }
    }
}

/// Identity and enrollment data for one student.
///
/// `matricule` is the only join key used against grades; `id` is the
/// backend row id and is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub matricule: String,
    pub nom: String,
    pub prenom: String,
    pub sexe: Sexe,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_naissance: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub ville_naissance: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub nom_classe: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub niveau: Option<String>,
}

impl StudentRecord {
    /// Birth date as `dd/mm/YYYY`, or an empty string when unknown.
    pub fn date_naissance_display(&self) -> String {
        self.date_naissance
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }
}

/// A validated score on the 0–20 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 20.0;

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            bail!("score {value} is not a finite number");
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            bail!("score {value} is outside {}..={}", Self::MIN, Self::MAX);
        }
        Ok(Self(value))
    }

    /// Parses a score typed into a form. A comma is accepted as the decimal
    /// separator; anything that is not a plain number is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let cleaned = raw.trim().replace(',', ".");
        if cleaned.is_empty() {
            bail!("score is empty");
        }
        match cleaned.parse::<f64>() {
            Ok(value) => Self::new(value),
            Err(_) => bail!("score {raw:?} is not numeric"),
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match RawScore::deserialize(deserializer)? {
            RawScore::Number(n) => Score::new(n),
            RawScore::Text(s) => Score::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// One scored evaluation for one student in one course.
///
/// `nom_cours` is the course *name* and doubles as the grouping key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub matricule_eleve: String,
    pub nom_cours: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub classe: Option<String>,
    pub valeur: Score,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub type_evaluation: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub date_evaluation: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub observation: Option<String>,
}

/// Grades that survived boundary validation, plus how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct GradeBatch {
    pub grades: Vec<GradeRecord>,
    pub rejected: usize,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let Some(raw) = blank_as_none(deserializer)? else {
        return Ok(None);
    };
    // Dates are stored either as `YYYY-MM-DD` or as a full ISO timestamp.
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| serde::de::Error::custom(format!("invalid date {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(0.0).is_ok());
        assert!(Score::new(20.0).is_ok());
        assert!(Score::new(-0.5).is_err());
        assert!(Score::new(20.01).is_err());
        assert!(Score::new(f64::NAN).is_err());
        assert!(Score::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_score_parse_text() {
        assert_eq!(Score::parse(" 12.5 ").unwrap().value(), 12.5);
        assert_eq!(Score::parse("12,5").unwrap().value(), 12.5);
        assert!(Score::parse("").is_err());
        assert!(Score::parse("douze").is_err());
        assert!(Score::parse("12abc").is_err());
        assert!(Score::parse("25").is_err());
    }

    #[test]
    fn test_score_display_matches_plain_numbers() {
        assert_eq!(Score::new(10.0).unwrap().to_string(), "10");
        assert_eq!(Score::new(12.5).unwrap().to_string(), "12.5");
    }

    #[test]
    fn test_grade_accepts_string_or_number_valeur() {
        let from_number: GradeRecord = serde_json::from_value(json!({
            "matriculeEleve": "E001", "nomCours": "Maths", "valeur": 14
        }))
        .unwrap();
        let from_text: GradeRecord = serde_json::from_value(json!({
            "matriculeEleve": "E001", "nomCours": "Maths", "valeur": "14"
        }))
        .unwrap();
        assert_eq!(from_number.valeur, from_text.valeur);
        assert_eq!(from_number.classe, None);
    }

    #[test]
    fn test_grade_rejects_out_of_range() {
        let result = serde_json::from_value::<GradeRecord>(json!({
            "matriculeEleve": "E001", "nomCours": "Maths", "valeur": 21
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_student_blank_fields_become_none() {
        let student: StudentRecord = serde_json::from_value(json!({
            "id": "64f0",
            "matricule": "E001",
            "nom": "Diallo",
            "prenom": "Awa",
            "sexe": "F",
            "dateNaissance": "2012-03-09",
            "villeNaissance": "",
            "telephone": "  ",
            "nomClasse": "6ème"
        }))
        .unwrap();
        assert_eq!(student.ville_naissance, None);
        assert_eq!(student.telephone, None);
        assert_eq!(student.nom_classe.as_deref(), Some("6ème"));
        assert_eq!(student.date_naissance_display(), "09/03/2012");
    }

    #[test]
    fn test_student_accepts_iso_timestamp_birth_date() {
        let student: StudentRecord = serde_json::from_value(json!({
            "matricule": "E002", "nom": "Traoré", "prenom": "Moussa",
            "sexe": "Masculin", "dateNaissance": "2011-11-30T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(student.sexe, Sexe::M);
        assert_eq!(student.date_naissance_display(), "30/11/2011");
    }

    #[test]
    fn test_student_rejects_unknown_sexe() {
        let result = serde_json::from_value::<StudentRecord>(json!({
            "matricule": "E003", "nom": "X", "prenom": "Y", "sexe": "Z"
        }));
        assert!(result.is_err());
    }
}
