use crate::bulletin::appreciation::{appreciation, appreciation_color, is_passing};
use crate::bulletin::types::{
    BulletinOutcome, BulletinReport, BulletinStatistics, ClassGrouping, ClassResults,
    CourseAverage, NoStudentSelected, OverallAverage,
};
use crate::bulletin::utility::{fixed2, mean, rounded2};
use crate::models::{GradeRecord, Score, StudentRecord};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Class label used when neither the student nor the grade names a class.
pub const UNDEFINED_CLASS: &str = "Classe non définie";

/// Builds the bulletin of `selected` from the full grade collection, dated today.
///
/// # Errors
///
/// Fails with [`NoStudentSelected`] when no student (or one with an empty
/// matricule) is given, and with a generic error if a figure cannot be
/// computed. A student without grades is not an error: it yields
/// [`BulletinOutcome::NoData`].
pub fn generate_bulletin(
    selected: Option<&StudentRecord>,
    grades: &[GradeRecord],
) -> Result<BulletinOutcome> {
    generate_bulletin_on(selected, grades, Local::now().date_naive())
}

/// Same as [`generate_bulletin`] with an explicit generation date.
#[tracing::instrument(skip_all, fields(matricule = selected.map(|s| s.matricule.as_str())))]
pub fn generate_bulletin_on(
    selected: Option<&StudentRecord>,
    grades: &[GradeRecord],
    date: NaiveDate,
) -> Result<BulletinOutcome> {
    let student = match selected {
        Some(s) if !s.matricule.trim().is_empty() => s,
        _ => return Err(NoStudentSelected.into()),
    };

    let student_grades = grades_of(&student.matricule, grades);
    if student_grades.is_empty() {
        info!("No grades found for student");
        return Ok(BulletinOutcome::NoData);
    }

    let kept = first_grade_per_course(student_grades);
    let resultats_par_classe = average_by_class(group_by_class(student, &kept))?;

    let course_values: Vec<f64> = resultats_par_classe
        .course_averages()
        .map(CourseAverage::value)
        .collect();

    let moyenne_generale = overall_average(&course_values)?;
    let statistiques = statistics(&course_values, resultats_par_classe.len());

    debug!(
        courses = statistiques.total_matieres,
        classes = statistiques.nombre_classes,
        moyenne = %moyenne_generale,
        "Bulletin computed"
    );

    Ok(BulletinOutcome::Report(Box::new(BulletinReport {
        eleve: student.clone(),
        resultats_par_classe,
        appreciation: appreciation(moyenne_generale.value()).to_string(),
        couleur_appreciation: appreciation_color(moyenne_generale.value()).to_string(),
        moyenne_generale,
        date_generation: date.format("%d/%m/%Y").to_string(),
        statistiques,
    })))
}

/// Grades whose `matricule_eleve` is exactly `matricule`, in collection order.
pub fn grades_of<'a>(matricule: &str, grades: &'a [GradeRecord]) -> Vec<&'a GradeRecord> {
    grades
        .iter()
        .filter(|g| g.matricule_eleve == matricule)
        .collect()
}

/// Keeps the first grade seen for each course name and drops the rest.
///
/// Later evaluations in an already-seen course never reach the averages.
pub fn first_grade_per_course<'a>(grades: Vec<&'a GradeRecord>) -> Vec<&'a GradeRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept = Vec::with_capacity(grades.len());

    for grade in grades {
        if seen.insert(grade.nom_cours.as_str()) {
            kept.push(grade);
        } else {
            warn!(
                cours = %grade.nom_cours,
                matricule = %grade.matricule_eleve,
                "Duplicate grade ignored"
            );
        }
    }

    kept
}

/// Class key for one grade: the student's class, else the grade's class,
/// else [`UNDEFINED_CLASS`].
pub fn class_key<'a>(student: &'a StudentRecord, grade: &'a GradeRecord) -> &'a str {
    student
        .nom_classe
        .as_deref()
        .or(grade.classe.as_deref())
        .unwrap_or(UNDEFINED_CLASS)
}

/// Groups grades by class key, preserving first-seen order of classes and
/// of grades within each class.
pub fn group_by_class<'a>(
    student: &'a StudentRecord,
    grades: &[&'a GradeRecord],
) -> Vec<(&'a str, Vec<&'a GradeRecord>)> {
    let mut groups: Vec<(&str, Vec<&GradeRecord>)> = Vec::new();

    for &grade in grades {
        let key = class_key(student, grade);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(grade),
            None => groups.push((key, vec![grade])),
        }
    }

    groups
}

/// Averages each course inside each class group.
fn average_by_class(groups: Vec<(&str, Vec<&GradeRecord>)>) -> Result<ClassGrouping> {
    let mut results = Vec::with_capacity(groups.len());

    for (classe, grades) in groups {
        let mut by_course: Vec<(&str, Vec<Score>)> = Vec::new();
        for grade in grades {
            match by_course.iter_mut().find(|(c, _)| *c == grade.nom_cours) {
                Some((_, notes)) => notes.push(grade.valeur),
                None => by_course.push((grade.nom_cours.as_str(), vec![grade.valeur])),
            }
        }

        let matieres = by_course
            .into_iter()
            .map(|(cours, notes)| course_average(cours, notes))
            .collect::<Result<Vec<_>>>()?;

        let values: Vec<f64> = matieres.iter().map(CourseAverage::value).collect();
        let (moyenne_classe, _) = rounded2(mean(&values))?;

        results.push(ClassResults {
            classe: classe.to_string(),
            matieres,
            moyenne_classe,
        });
    }

    Ok(ClassGrouping(results))
}

/// Mean of `notes`, formatted to two decimals.
pub fn course_average(cours: &str, notes: Vec<Score>) -> Result<CourseAverage> {
    let values: Vec<f64> = notes.iter().map(|s| s.value()).collect();
    let (moyenne, value) = rounded2(mean(&values))?;
    Ok(CourseAverage {
        cours: cours.to_string(),
        notes,
        moyenne,
        value,
    })
}

/// Mean of all course averages; the bare number 0 when there are none.
pub fn overall_average(course_values: &[f64]) -> Result<OverallAverage> {
    if course_values.is_empty() {
        return Ok(OverallAverage::Unscored);
    }
    let (text, value) = rounded2(mean(course_values))?;
    Ok(OverallAverage::Fixed { text, value })
}

/// Pass/fail counts and extremes over the course averages.
pub fn statistics(course_values: &[f64], nombre_classes: usize) -> BulletinStatistics {
    let notes_reussies = course_values.iter().filter(|v| is_passing(**v)).count();
    let best = course_values.iter().copied().reduce(f64::max);
    let worst = course_values.iter().copied().reduce(f64::min);

    BulletinStatistics {
        notes_reussies,
        notes_echouees: course_values.len() - notes_reussies,
        total_matieres: course_values.len(),
        meilleure_note: best.map(fixed2),
        moins_bonne_note: worst.map(fixed2),
        nombre_classes,
    }
}
