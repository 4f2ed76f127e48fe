/// One row of the appreciation scale: every average at or above `floor`
/// (and below the previous row's floor) gets this label and colour.
struct Band {
    floor: f64,
    label: &'static str,
    color: &'static str,
}

/// Converts an average on the 0–20 scale into a qualitative verdict.
///
/// | Average  | Label                             | Colour    |
/// |----------|-----------------------------------|-----------|
/// | >= 16    | Excellent - Félicitations !       | `#4caf50` |
/// | >= 14    | Très bien - Bon travail !         | `#8bc34a` |
/// | >= 12    | Bien - Continuez ainsi !          | `#ff9800` |
/// | >= 10    | Assez bien - Peut mieux faire     | `#ffc107` |
/// | >= 8     | Passable - Efforts à fournir      | `#ff5722` |
/// | < 8      | Insuffisant - Travail à reprendre | `#f44336` |
static BANDS: [Band; 6] = [
    Band {
        floor: 16.0,
        label: "Excellent - Félicitations !",
        color: "#4caf50",
    },
    Band {
        floor: 14.0,
        label: "Très bien - Bon travail !",
        color: "#8bc34a",
    },
    Band {
        floor: 12.0,
        label: "Bien - Continuez ainsi !",
        color: "#ff9800",
    },
    Band {
        floor: 10.0,
        label: "Assez bien - Peut mieux faire",
        color: "#ffc107",
    },
    Band {
        floor: 8.0,
        label: "Passable - Efforts à fournir",
        color: "#ff5722",
    },
    Band {
        floor: f64::NEG_INFINITY,
        label: "Insuffisant - Travail à reprendre",
        color: "#f44336",
    },
];

/// Average at or above which a course counts as passed.
pub const PASS_MARK: f64 = 10.0;

fn band(average: f64) -> &'static Band {
    BANDS
        .iter()
        .find(|b| average >= b.floor)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

pub fn appreciation(average: f64) -> &'static str {
    band(average).label
}

pub fn appreciation_color(average: f64) -> &'static str {
    band(average).color
}

pub fn is_passing(average: f64) -> bool {
    average >= PASS_MARK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appreciation_boundaries() {
        assert_eq!(appreciation(20.00), "Excellent - Félicitations !");
        assert_eq!(appreciation(16.00), "Excellent - Félicitations !");
        assert_eq!(appreciation(15.99), "Très bien - Bon travail !");
        assert_eq!(appreciation(14.00), "Très bien - Bon travail !");
        assert_eq!(appreciation(13.99), "Bien - Continuez ainsi !");
        assert_eq!(appreciation(12.00), "Bien - Continuez ainsi !");
        assert_eq!(appreciation(11.99), "Assez bien - Peut mieux faire");
        assert_eq!(appreciation(10.00), "Assez bien - Peut mieux faire");
        assert_eq!(appreciation(9.99), "Passable - Efforts à fournir");
        assert_eq!(appreciation(8.00), "Passable - Efforts à fournir");
        assert_eq!(appreciation(7.99), "Insuffisant - Travail à reprendre");
        assert_eq!(appreciation(0.00), "Insuffisant - Travail à reprendre");
    }

    #[test]
    fn test_color_tracks_label() {
        let probes = [20.0, 16.0, 15.99, 14.0, 12.0, 10.0, 9.99, 8.0, 7.99, 0.0];
        for avg in probes {
            let expected = BANDS.iter().position(|b| b.label == appreciation(avg));
            let actual = BANDS.iter().position(|b| b.color == appreciation_color(avg));
            assert_eq!(expected, actual, "mismatch at {avg}");
        }
        assert_eq!(appreciation_color(16.0), "#4caf50");
        assert_eq!(appreciation_color(7.99), "#f44336");
    }

    #[test]
    fn test_nan_falls_to_lowest_band() {
        assert_eq!(appreciation(f64::NAN), "Insuffisant - Travail à reprendre");
    }

    #[test]
    fn test_pass_mark() {
        assert!(is_passing(10.0));
        assert!(!is_passing(9.99));
    }
}
