//! Student lookup for the selection step.

use crate::models::StudentRecord;

/// Finds the student with exactly this matricule.
pub fn find_by_matricule<'a>(
    students: &'a [StudentRecord],
    matricule: &str,
) -> Option<&'a StudentRecord> {
    students.iter().find(|s| s.matricule == matricule)
}

/// Label shown for a student in selection lists.
pub fn option_label(student: &StudentRecord) -> String {
    format!(
        "{} - {} {} ({})",
        student.matricule,
        student.nom,
        student.prenom,
        student.nom_classe.as_deref().unwrap_or("")
    )
}

fn is_match(student: &StudentRecord, query: &str) -> bool {
    [
        student.matricule.as_str(),
        student.nom.as_str(),
        student.prenom.as_str(),
        student.nom_classe.as_deref().unwrap_or(""),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query))
}

/// Case-insensitive search on matricule, nom, prenom and class name.
///
/// Students whose matricule starts with the query come first; within each of
/// the two groups results are sorted by matricule. A blank query returns
/// everyone in collection order.
pub fn search_students<'a>(students: &'a [StudentRecord], query: &str) -> Vec<&'a StudentRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return students.iter().collect();
    }

    let mut found: Vec<(bool, String, &StudentRecord)> = students
        .iter()
        .filter(|s| is_match(s, &query))
        .map(|s| {
            let key = s.matricule.to_lowercase();
            (!key.starts_with(&query), key, s)
        })
        .collect();
    found.sort_by(|(a_rest, a_key, _), (b_rest, b_key, _)| {
        a_rest.cmp(b_rest).then_with(|| a_key.cmp(b_key))
    });

    found.into_iter().map(|(_, _, s)| s).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sexe;

    fn student(matricule: &str, nom: &str, prenom: &str) -> StudentRecord {
        in_class(matricule, nom, prenom, "6ème")
    }

    fn in_class(matricule: &str, nom: &str, prenom: &str, classe: &str) -> StudentRecord {
        StudentRecord {
            id: None,
            matricule: matricule.to_string(),
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            sexe: Sexe::M,
            date_naissance: None,
            ville_naissance: None,
            telephone: None,
            nom_classe: Some(classe.to_string()),
            niveau: None,
        }
    }

    fn matricules(found: &[&StudentRecord]) -> Vec<String> {
        found.iter().map(|s| s.matricule.clone()).collect()
    }

    #[test]
    fn test_blank_query_returns_all_in_order() {
        let students = vec![student("E002", "B", "b"), student("E001", "A", "a")];
        assert_eq!(matricules(&search_students(&students, "  ")), ["E002", "E001"]);
    }

    #[test]
    fn test_matricule_prefix_first_then_by_matricule() {
        let students = vec![
            student("X900", "Keita", "Mariam"),
            student("Z01", "E1mage", "Test"),
            student("E10", "Sow", "Ibrahima"),
            student("AE1", "Diallo", "Awa"),
            student("E100", "Camara", "Fanta"),
            student("E1", "Bah", "Oumar"),
        ];

        let found = search_students(&students, "e1");
        assert_eq!(matricules(&found), ["E1", "E10", "E100", "AE1", "Z01"]);
    }

    #[test]
    fn test_search_matches_class_name() {
        let students = vec![
            in_class("L200", "Kone", "Adama", "Terminale"),
            in_class("L100", "Sylla", "Binta", "Terminale"),
            student("E001", "Diallo", "Awa"),
        ];
        assert_eq!(matricules(&search_students(&students, "termin")), ["L100", "L200"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_names() {
        let students = vec![
            student("E001", "Diallo", "Awa"),
            student("E002", "Traoré", "Moussa"),
        ];
        assert_eq!(matricules(&search_students(&students, "TRAO")), ["E002"]);
        assert_eq!(matricules(&search_students(&students, "awa")), ["E001"]);
        assert!(search_students(&students, "zzz").is_empty());
    }

    #[test]
    fn test_find_and_label() {
        let students = vec![student("E001", "Diallo", "Awa")];
        let found = find_by_matricule(&students, "E001").unwrap();
        assert_eq!(option_label(found), "E001 - Diallo Awa (6ème)");
        assert!(find_by_matricule(&students, "e001").is_none());
    }
}
