//! School levels (niveaux) with their display colour and category.

/// Colour and category for a niveau that is set but not in [`NIVEAUX`].
pub const UNKNOWN_COLOR: &str = "#666";
pub const UNKNOWN_CATEGORY: &str = "Autre";

/// Colour and category for a student with no niveau assigned.
pub const UNASSIGNED_COLOR: &str = "#999";
pub const UNASSIGNED_CATEGORY: &str = "Non défini";

const UNASSIGNED_LABEL: &str = "Non assigné";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Primaire,
    College,
    Lycee,
    Universite,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Primaire => "Primaire",
            Category::College => "Collège",
            Category::Lycee => "Lycée",
            Category::Universite => "Université",
        }
    }
}

pub struct Niveau {
    pub name: &'static str,
    pub color: &'static str,
    pub category: Category,
}

const fn niveau(name: &'static str, color: &'static str, category: Category) -> Niveau {
    Niveau {
        name,
        color,
        category,
    }
}

pub static NIVEAUX: &[Niveau] = &[
    niveau("Ps(3ans)", "#ff6b6b", Category::Primaire),
    niveau("Ms", "#4ecdc4", Category::Primaire),
    niveau("Gs", "#45b7d1", Category::Primaire),
    niveau("11ème", "#96ceb4", Category::Primaire),
    niveau("10ème", "#feca57", Category::Primaire),
    niveau("9ème", "#ff9ff3", Category::Primaire),
    niveau("8ème", "#54a0ff", Category::Primaire),
    niveau("7ème", "#5f27cd", Category::Primaire),
    niveau("6ème", "#2196f3", Category::College),
    niveau("5ème", "#4caf50", Category::College),
    niveau("4ème", "#ff9800", Category::College),
    niveau("3ème", "#f44336", Category::College),
    niveau("2nde", "#9c27b0", Category::Lycee),
    niveau("1ère", "#607d8b", Category::Lycee),
    niveau("Terminale", "#795548", Category::Lycee),
    niveau("L1", "#e91e63", Category::Universite),
    niveau("L2", "#00bcd4", Category::Universite),
    niveau("L3", "#8bc34a", Category::Universite),
    niveau("M1", "#ff5722", Category::Universite),
    niveau("M2", "#3f51b5", Category::Universite),
];

pub fn lookup(name: &str) -> Option<&'static Niveau> {
    NIVEAUX.iter().find(|n| n.name == name)
}

fn is_unassigned(name: Option<&str>) -> bool {
    matches!(name, None | Some("") | Some(UNASSIGNED_LABEL))
}

pub fn color(name: Option<&str>) -> &'static str {
    if is_unassigned(name) {
        return UNASSIGNED_COLOR;
    }
    name.and_then(lookup).map_or(UNKNOWN_COLOR, |n| n.color)
}

pub fn category(name: Option<&str>) -> &'static str {
    if is_unassigned(name) {
        return UNASSIGNED_CATEGORY;
    }
    name.and_then(lookup)
        .map_or(UNKNOWN_CATEGORY, |n| n.category.label())
}
