use super::schema::{AveragingConfig, Config, TierConfig};
use crate::engine::Bound;

/// Validate the config file at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (section, averaging) in [
        ("gwa", &config.gwa),
        ("weighted", &config.weighted),
        ("average", &config.average),
    ] {
        if let Some(averaging) = averaging {
            validate_averaging(section, averaging, &mut errors);
        }
    }

    if let Some(ref semester) = config.semester {
        if let Some(ref tiers) = semester.tiers {
            validate_tiers("semester.tiers", tiers, &mut errors);
        }
        if let Some(ref letters) = semester.letter_grades {
            if letters.is_empty() {
                errors.push("semester.letter_grades: must list at least one letter".to_string());
            }
            for (letter, points) in letters {
                if letter.trim().is_empty() {
                    errors.push("semester.letter_grades: letter must not be blank".to_string());
                }
                if !points.is_finite() || *points < 0.0 {
                    errors.push(format!(
                        "semester.letter_grades.{}: must be a non-negative number",
                        letter
                    ));
                }
            }
        }
    }

    if let Some(ref cgpa) = config.cgpa {
        if let Some(factor) = cgpa.ten_point_factor {
            if !factor.is_finite() || factor <= 0.0 {
                errors.push("cgpa.ten_point_factor: must be a positive number".to_string());
            }
        }
        if let Some(ref tiers) = cgpa.tiers {
            validate_tiers("cgpa.tiers", tiers, &mut errors);
        }
    }

    if let Some(ref final_grade) = config.final_grade {
        if let Some(ref tiers) = final_grade.tiers {
            validate_tiers("final_grade.tiers", tiers, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_averaging(section: &str, config: &AveragingConfig, errors: &mut Vec<String>) {
    if let Some(range) = config.valid_range {
        if !range.min.is_finite() || !range.max.is_finite() {
            errors.push(format!("{}.valid_range: bounds must be finite", section));
        } else if range.min >= range.max {
            errors.push(format!(
                "{}.valid_range: min ({}) must be less than max ({})",
                section, range.min, range.max
            ));
        }
    }
    if let Some(ref tiers) = config.tiers {
        validate_tiers(&format!("{}.tiers", section), tiers, errors);
    }
}

fn validate_tiers(path: &str, tiers: &TierConfig, errors: &mut Vec<String>) {
    let before = errors.len();
    for (i, band) in tiers.bands.iter().enumerate() {
        if let Err(e) = Bound::parse(&band.range) {
            errors.push(format!(
                "{}.bands[{}].range: invalid '{}' - {}",
                path, i, band.range, e
            ));
        }
        if band.label.trim().is_empty() {
            errors.push(format!("{}.bands[{}].label: must not be empty", path, i));
        }
    }

    // Ordering only makes sense once every range parsed.
    if errors.len() == before {
        if let Ok(table) = tiers.to_table() {
            for problem in table.check() {
                errors.push(format!("{}.bands{}", path, problem));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CgpaConfig, FinalGradeConfig, SemesterConfig, TierBand};
    use crate::engine::ValidRange;
    use std::collections::BTreeMap;

    fn band(range: &str, label: &str) -> TierBand {
        TierBand {
            range: range.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_builtin_config() {
        assert!(validate_config(&Config::builtin()).is_ok());
    }

    #[test]
    fn test_inverted_range() {
        let config = Config {
            gwa: Some(AveragingConfig {
                valid_range: Some(ValidRange::new(100.0, 0.0)),
                tiers: None,
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("gwa.valid_range"));
    }

    #[test]
    fn test_invalid_band_range() {
        let config = Config {
            weighted: Some(AveragingConfig {
                valid_range: None,
                tiers: Some(TierConfig {
                    bands: vec![band("90+", "A")],
                    otherwise: "F".to_string(),
                }),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("weighted.tiers.bands[0].range"));
    }

    #[test]
    fn test_unreachable_band() {
        let config = Config {
            final_grade: Some(FinalGradeConfig {
                tiers: Some(TierConfig {
                    bands: vec![band("<=110", "Hard"), band("<=100", "Fine")],
                    otherwise: "No".to_string(),
                }),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("final_grade.tiers.bands[1]"));
    }

    #[test]
    fn test_bad_factor_and_letters() {
        let mut letters = BTreeMap::new();
        letters.insert("A".to_string(), -1.0);
        let config = Config {
            cgpa: Some(CgpaConfig {
                ten_point_factor: Some(0.0),
                tiers: None,
            }),
            semester: Some(SemesterConfig {
                tiers: None,
                letter_grades: Some(letters),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("cgpa.ten_point_factor")));
        assert!(errors.iter().any(|e| e.contains("semester.letter_grades.A")));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            gwa: Some(AveragingConfig {
                valid_range: Some(ValidRange::new(5.0, 5.0)), // Error 1
                tiers: Some(TierConfig {
                    bands: vec![band("bad", "")], // Errors 2 and 3
                    otherwise: "F".to_string(),
                }),
            }),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
