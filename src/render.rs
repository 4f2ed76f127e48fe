//! Screen and printable renderings of a [`BulletinReport`].
//!
//! Both views only project the figures stored in the report; nothing here
//! recomputes an average.

use anyhow::{Context, Result};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fmt::{self, Write};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::bulletin::appreciation::is_passing;
use crate::bulletin::types::{BulletinReport, ClassResults, CourseAverage};
use crate::niveau;

pub const SCHOOL_NAME: &str = "Ecole des Frères de Saint-Gabriel";
pub const SCHOOL_YEAR: &str = "Année Scolaire 2024-2025";

/// Shown instead of a table when no bulletin has been generated.
pub const PLACEHOLDER: &str = "Sélectionnez un élève puis générez son bulletin.";

const PASS_GLYPH: &str = "✅";
const FAIL_GLYPH: &str = "❌";

fn glyph(avg: &CourseAverage) -> &'static str {
    if is_passing(avg.value()) {
        PASS_GLYPH
    } else {
        FAIL_GLYPH
    }
}

/// Plain-text view for the terminal.
pub fn render_screen(report: Option<&BulletinReport>) -> String {
    let Some(report) = report else {
        return format!("{PLACEHOLDER}\n");
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_screen(&mut out, report);
    out
}

fn write_screen(out: &mut String, report: &BulletinReport) -> fmt::Result {
    let eleve = &report.eleve;

    writeln!(out, "{SCHOOL_NAME}")?;
    writeln!(out, "BULLETIN DE NOTES - {SCHOOL_YEAR}")?;
    writeln!(out)?;
    writeln!(out, "Élève     : {} {} ({})", eleve.nom, eleve.prenom, eleve.matricule)?;
    writeln!(out, "Classe    : {}", eleve.nom_classe.as_deref().unwrap_or("-"))?;
    if let Some(n) = eleve.niveau.as_deref() {
        writeln!(out, "Niveau    : {n} ({})", niveau::category(Some(n)))?;
    }

    for class in report.resultats_par_classe.iter() {
        writeln!(out)?;
        writeln!(out, "Classe: {}", class.classe)?;
        for avg in &class.matieres {
            writeln!(
                out,
                "  {:<24} {:<16} {:>6}/20 {}",
                avg.cours,
                avg.notes_display(),
                avg.moyenne,
                glyph(avg)
            )?;
        }
        writeln!(
            out,
            "  Moyenne de la classe {}: {}/20",
            class.classe, class.moyenne_classe
        )?;
    }

    let stats = &report.statistiques;
    writeln!(out)?;
    writeln!(out, "Moyenne générale : {}/20", report.moyenne_generale)?;
    writeln!(out, "Appréciation     : {}", report.appreciation)?;
    writeln!(
        out,
        "Matières réussies {} / échouées {} / total {}",
        stats.notes_reussies, stats.notes_echouees, stats.total_matieres
    )?;
    if let (Some(best), Some(worst)) = (&stats.meilleure_note, &stats.moins_bonne_note) {
        writeln!(out, "Meilleure moyenne {best} / plus faible {worst}")?;
    }
    writeln!(out, "Généré le {}", report.date_generation)
}

/// Standalone printable HTML document.
pub fn render_printable(report: &BulletinReport) -> String {
    printable_page(report).into_string()
}

/// Writes the printable document to `path`.
pub fn write_printable(report: &BulletinReport, path: &Path) -> Result<()> {
    fs::write(path, render_printable(report))
        .with_context(|| format!("writing bulletin to {}", path.display()))?;
    info!(path = %path.display(), "Printable bulletin written");
    Ok(())
}

fn printable_page(report: &BulletinReport) -> Markup {
    let eleve = &report.eleve;
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="UTF-8";
                title { "Bulletin - " (eleve.nom) " " (eleve.prenom) }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.header {
                    h1 { (SCHOOL_NAME) }
                    h2 { "BULLETIN DE NOTES" }
                    p { (SCHOOL_YEAR) }
                }
                div."student-info" {
                    div { strong { "Nom :" } " " (eleve.nom) }
                    div { strong { "Prénom :" } " " (eleve.prenom) }
                    div { strong { "Matricule :" } " " (eleve.matricule) }
                    div { strong { "Classe principale :" } " " (eleve.nom_classe.as_deref().unwrap_or("")) }
                    @if let Some(n) = &eleve.niveau {
                        div {
                            strong { "Niveau :" }
                            " "
                            span.niveau style={ "background-color: " (niveau::color(Some(n.as_str()))) } {
                                (n) " (" (niveau::category(Some(n.as_str()))) ")"
                            }
                        }
                    }
                    div { strong { "Sexe :" } " " (eleve.sexe.to_string()) }
                    div { strong { "Date de naissance :" } " " (eleve.date_naissance_display()) }
                }
                div."notes-table" {
                    @for class in report.resultats_par_classe.iter() {
                        (class_section(class))
                    }
                }
                div.results {
                    div."result-box" {
                        h4 { "Moyenne Générale" }
                        div.average { (report.moyenne_generale.to_string()) "/20" }
                    }
                    div."result-box" {
                        h4 { "Appréciation Générale" }
                        div { strong style={ "color: " (report.couleur_appreciation) } { (report.appreciation) } }
                    }
                }
                div.footer {
                    div { strong { "Date de génération :" } " " (report.date_generation) }
                    div.signature {
                        div { "Signature du responsable" }
                        div."signature-line" {}
                    }
                }
                div.notice {
                    "Ce bulletin est généré automatiquement par le système de gestion de l'"
                    (SCHOOL_NAME)
                    ". Il présente les résultats académiques de l'élève pour la période en cours."
                }
            }
        }
    }
}

fn class_section(class: &ClassResults) -> Markup {
    html! {
        div.class {
            h4 { "Classe: " (class.classe) }
            table {
                thead {
                    tr {
                        th { "Matière" }
                        th { "Notes" }
                        th { "Moyenne" }
                        th { "Appréciation" }
                    }
                }
                tbody {
                    @for avg in &class.matieres {
                        tr {
                            td.course { (avg.cours) }
                            td { (avg.notes_display()) }
                            td.mark { (avg.moyenne) "/20" }
                            td { (glyph(avg)) }
                        }
                    }
                }
            }
            div."class-average" {
                "Moyenne de la classe " (class.classe) ": " (class.moyenne_classe) "/20"
            }
        }
    }
}

const CSS: &str = r#"
body { font-family: Arial, sans-serif; margin: 0; padding: 15px; color: #000; }
.header { text-align: center; margin-bottom: 20px; border-bottom: 2px solid #000; padding-bottom: 8px; }
.header h1 { margin: 0; font-size: 22px; white-space: nowrap; }
.header h2 { margin: 3px 0; font-size: 18px; }
.header p { margin: 3px 0; }
.student-info { margin-bottom: 20px; }
.student-info div { display: flex; justify-content: space-between; margin: 3px 0; }
.niveau { color: #fff; padding: 1px 8px; border-radius: 10px; }
.class h4 { background-color: #f0f0f0; padding: 10px; margin: 10px 0; border-left: 4px solid #1a237e; }
table { border-collapse: collapse; width: 100%; margin-bottom: 15px; }
th, td { border: 1px solid #000; padding: 6px; text-align: center; }
th { background-color: #e3f2fd; }
td.course, td.mark { font-weight: bold; }
.class-average { text-align: center; font-weight: bold; background-color: #f5f5f5; padding: 5px; border: 1px solid #ccc; margin-bottom: 20px; }
.results { display: flex; justify-content: space-between; margin-bottom: 20px; }
.result-box { border: 2px solid #000; padding: 12px; text-align: center; width: 45%; }
.result-box h4 { margin: 3px 0; }
.result-box .average { font-size: 28px; font-weight: bold; margin: 8px 0; }
.footer { display: flex; justify-content: space-between; margin-top: 20px; border-top: 2px solid #000; padding-top: 8px; }
.signature { border: 1px solid #000; padding: 8px; text-align: center; }
.signature-line { width: 120px; height: 40px; border-bottom: 1px solid #000; margin-top: 8px; }
.notice { margin-top: 15px; padding: 8px; background-color: #f5f5f5; border: 1px solid #ccc; font-style: italic; font-size: 11px; }
@page { margin: 1cm; size: A4; }
@media print { th, .niveau { color: #fff; padding: 1px 8px; border-radius: 10px; }
.class h4 { background-color: #f0f0f0 !important; } }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulletin::{BulletinOutcome, generate_bulletin_on};
    use crate::models::{GradeRecord, Score, Sexe, StudentRecord};
    use chrono::NaiveDate;

    fn sample_report() -> BulletinReport {
        let student = StudentRecord {
            id: None,
            matricule: "E001".to_string(),
            nom: "Diallo".to_string(),
            prenom: "Awa".to_string(),
            sexe: Sexe::F,
            date_naissance: NaiveDate::from_ymd_opt(2012, 3, 9),
            ville_naissance: None,
            telephone: None,
            nom_classe: Some("6ème".to_string()),
            niveau: Some("6ème".to_string()),
        };
        let grade = |cours: &str, valeur: f64| GradeRecord {
            id: None,
            matricule_eleve: "E001".to_string(),
            nom_cours: cours.to_string(),
            classe: None,
            valeur: Score::new(valeur).unwrap(),
            type_evaluation: None,
            date_evaluation: None,
            observation: None,
        };
        let grades = vec![
            grade("Maths", 9.5),
            grade("Français", 14.25),
            grade("Histoire & Géo", 11.0),
        ];
        let date = NaiveDate::from_ymd_opt(2025, 6, 27).unwrap();
        match generate_bulletin_on(Some(&student), &grades, date).unwrap() {
            BulletinOutcome::Report(r) => *r,
            BulletinOutcome::NoData => panic!("expected a report"),
        }
    }

    /// Every `xx.xx` token in `text`.
    fn fixed_numbers(text: &str) -> Vec<String> {
        let bytes = text.as_bytes();
        let mut found = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i].is_ascii_digit() && (i == 0 || !bytes[i - 1].is_ascii_digit()) {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i + 2 < bytes.len()
                    && bytes[i] == b'.'
                    && bytes[i + 1].is_ascii_digit()
                    && bytes[i + 2].is_ascii_digit()
                    && (i + 3 == bytes.len() || !bytes[i + 3].is_ascii_digit())
                {
                    found.push(text[start..i + 3].to_string());
                    i += 3;
                }
            } else {
                i += 1;
            }
        }
        found
    }

    #[test]
    fn test_screen_placeholder_without_report() {
        assert_eq!(render_screen(None), format!("{PLACEHOLDER}\n"));
    }

    #[test]
    fn test_screen_shows_figures() {
        let report = sample_report();
        let screen = render_screen(Some(&report));
        assert!(screen.contains("Moyenne générale : 11.58/20"));
        assert!(screen.contains("Assez bien - Peut mieux faire"));
        assert!(screen.contains("Niveau    : 6ème (Collège)"));
        assert!(screen.contains("Moyenne de la classe 6ème: 11.58/20"));
        assert!(screen.ends_with("Généré le 27/06/2025\n"));
    }

    #[test]
    fn test_printable_colours_niveau_chip() {
        let html = render_printable(&sample_report());
        assert!(html.contains(r#"style="background-color: #2196f3""#));
        assert!(html.contains("6ème (Collège)"));
    }

    #[test]
    fn test_printable_contains_every_reported_figure() {
        let report = sample_report();
        let html = render_printable(&report);

        for class in report.resultats_par_classe.iter() {
            for avg in &class.matieres {
                assert!(html.contains(&format!("{}/20", avg.moyenne)), "{}", avg.cours);
            }
            assert!(html.contains(&format!(
                "Moyenne de la classe {}: {}/20",
                class.classe, class.moyenne_classe
            )));
        }
        assert!(html.contains(&format!("{}/20", report.moyenne_generale)));
        assert!(html.contains(&report.appreciation));
        assert!(html.contains(&report.date_generation));
    }

    #[test]
    fn test_printable_numbers_all_come_from_report() {
        let report = sample_report();
        let html = render_printable(&report);

        let mut allowed: Vec<String> = report
            .resultats_par_classe
            .course_averages()
            .map(|a| a.moyenne.clone())
            .collect();
        allowed.extend(report.resultats_par_classe.iter().map(|c| c.moyenne_classe.clone()));
        allowed.push(report.moyenne_generale.to_string());

        let found = fixed_numbers(&html);
        assert!(!found.is_empty());
        for number in found {
            assert!(allowed.contains(&number), "unexpected figure {number}");
        }
    }

    #[test]
    fn test_printable_glyphs_follow_pass_mark() {
        let report = sample_report();
        let html = render_printable(&report);
        assert_eq!(html.matches(PASS_GLYPH).count(), 2);
        assert_eq!(html.matches(FAIL_GLYPH).count(), 1);
    }

    #[test]
    fn test_printable_is_self_contained_and_escaped() {
        let html = render_printable(&sample_report());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
        assert!(!html.contains("<script"));
        assert!(html.contains("Histoire &amp; Géo"));
    }
}
