/// Full name of a prediction label. TESS answers with disposition codes,
/// the Kepler model with `1`/`0`.
pub fn disposition_name(label: &str) -> String {
    match label.trim().to_ascii_uppercase().as_str() {
        "APC" => "Ambiguous Planet Candidate".to_string(),
        "CP" => "Confirmed Planet".to_string(),
        "FA" => "False Alarm".to_string(),
        "FP" => "False Positive".to_string(),
        "KP" => "Known Planet".to_string(),
        "PC" => "Planet Candidate".to_string(),
        "1" | "CANDIDATE" | "CONFIRMED" => "Planet Found".to_string(),
        "0" | "FALSE POSITIVE" => "Planet Not Found".to_string(),
        _ => label.to_string(),
    }
}

pub fn is_planet(label: &str) -> bool {
    !matches!(
        label.trim().to_ascii_uppercase().as_str(),
        "FA" | "FP" | "0" | "FALSE POSITIVE"
    )
}

/// Confidence fraction as `93.4%`.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_names() {
        assert_eq!(disposition_name("PC"), "Planet Candidate");
        assert_eq!(disposition_name("apc"), "Ambiguous Planet Candidate");
        assert_eq!(disposition_name("1"), "Planet Found");
        assert_eq!(disposition_name("XYZ"), "XYZ");
    }

    #[test]
    fn test_not_found_labels() {
        for label in ["FA", "FP", "0"] {
            assert!(!is_planet(label), "{}", label);
        }
        for label in ["PC", "CP", "KP", "APC", "1"] {
            assert!(is_planet(label), "{}", label);
        }
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.934), "93.4%");
        assert_eq!(percent(1.0), "100.0%");
    }
}
