//! Data types produced by the bulletin aggregator.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::models::{Score, StudentRecord};

/// Mean score for one course within one class group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAverage {
    pub cours: String,
    /// Raw scores in encounter order.
    pub notes: Vec<Score>,
    /// Two-decimal rendering of the mean.
    pub moyenne: String,
    /// `moyenne` read back as a number.
    #[serde(skip)]
    pub(crate) value: f64,
}

impl CourseAverage {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Raw scores comma-joined, as shown in the "Notes" column.
    pub fn notes_display(&self) -> String {
        self.notes
            .iter()
            .map(Score::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Course averages computed for the grades attached to one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassResults {
    pub classe: String,
    pub matieres: Vec<CourseAverage>,
    /// Mean of the course averages, two decimals.
    pub moyenne_classe: String,
}

/// Class name → results, in first-seen order.
///
/// Serialized as a JSON object mapping each class name to its course
/// averages; the class averages go out separately through [`Self::averages`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassGrouping(pub(crate) Vec<ClassResults>);

impl ClassGrouping {
    pub fn iter(&self) -> impl Iterator<Item = &ClassResults> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, classe: &str) -> Option<&ClassResults> {
        self.0.iter().find(|r| r.classe == classe)
    }

    /// Class name → class average, for serialization.
    pub fn averages(&self) -> ClassAverages<'_> {
        ClassAverages(self)
    }

    /// Every course average across all classes, class by class.
    pub fn course_averages(&self) -> impl Iterator<Item = &CourseAverage> {
        self.0.iter().flat_map(|r| r.matieres.iter())
    }
}

impl Serialize for ClassGrouping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for results in &self.0 {
            map.serialize_entry(&results.classe, &results.matieres)?;
        }
        map.end()
    }
}

/// Serializes as `{ classe: moyenneClasse }`.
pub struct ClassAverages<'a>(&'a ClassGrouping);

impl Serialize for ClassAverages<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for results in self.0.iter() {
            map.serialize_entry(&results.classe, &results.moyenne_classe)?;
        }
        map.end()
    }
}

/// Overall average across every course average.
///
/// With no course averages at all the overall average is the bare number 0
/// rather than a formatted `"0.00"`.
#[derive(Debug, Clone, PartialEq)]
pub enum OverallAverage {
    Fixed { text: String, value: f64 },
    Unscored,
}

impl OverallAverage {
    pub fn value(&self) -> f64 {
        match self {
            OverallAverage::Fixed { value, .. } => *value,
            OverallAverage::Unscored => 0.0,
        }
    }
}

impl fmt::Display for OverallAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallAverage::Fixed { text, .. } => f.write_str(text),
            OverallAverage::Unscored => f.write_str("0"),
        }
    }
}

impl Serialize for OverallAverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OverallAverage::Fixed { text, .. } => serializer.serialize_str(text),
            OverallAverage::Unscored => serializer.serialize_u8(0),
        }
    }
}

/// Pass/fail counts and extremes over the course averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletinStatistics {
    pub notes_reussies: usize,
    pub notes_echouees: usize,
    pub total_matieres: usize,
    /// `None` only when there are no course averages.
    pub meilleure_note: Option<String>,
    pub moins_bonne_note: Option<String>,
    pub nombre_classes: usize,
}

/// Complete report card for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletinReport {
    pub eleve: StudentRecord,
    pub resultats_par_classe: ClassGrouping,
    pub moyenne_generale: OverallAverage,
    pub appreciation: String,
    pub couleur_appreciation: String,
    /// Local calendar date, `dd/mm/YYYY`.
    pub date_generation: String,
    pub statistiques: BulletinStatistics,
}

impl Serialize for BulletinReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut report = serializer.serialize_struct("BulletinReport", 8)?;
        report.serialize_field("eleve", &self.eleve)?;
        report.serialize_field("resultatsParClasse", &self.resultats_par_classe)?;
        report.serialize_field("moyennesParClasse", &self.resultats_par_classe.averages())?;
        report.serialize_field("moyenneGenerale", &self.moyenne_generale)?;
        report.serialize_field("appreciation", &self.appreciation)?;
        report.serialize_field("couleurAppreciation", &self.couleur_appreciation)?;
        report.serialize_field("dateGeneration", &self.date_generation)?;
        report.serialize_field("statistiques", &self.statistiques)?;
        report.end()
    }
}

/// Result of a bulletin request for a selected student.
#[derive(Debug, Clone, PartialEq)]
pub enum BulletinOutcome {
    Report(Box<BulletinReport>),
    /// The student has no grades at all.
    NoData,
}

/// Raised when a bulletin is requested without a selected student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoStudentSelected;

impl fmt::Display for NoStudentSelected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Veuillez sélectionner un élève")
    }
}

impl std::error::Error for NoStudentSelected {}
