use gradecalc::engine::{
    compute_weighted_average, convert_scale, solve_required_score, EngineError, EngineOptions,
    RawEntry, Scale,
};
use gradecalc::tools::{presets, Report, Toolkit};

// GWA rows need a subject name, or strict validation skips them as incomplete.
fn rows(pairs: &[(&str, &str)]) -> Vec<RawEntry> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (value, weight))| RawEntry::new(Some(&format!("Subject {}", i + 1)), value, weight))
        .collect()
}

#[test]
fn two_subject_gwa() {
    let options = EngineOptions::strict(presets::GWA_RANGE, presets::average_tiers());
    let result = compute_weighted_average(&rows(&[("85", "3"), ("90", "2")]), &options).unwrap();
    assert_eq!(result.weighted_average, 87.0);
    assert_eq!(result.total_weight, 5.0);
    assert_eq!(result.category.label, "Good job! You're doing well!");
}

#[test]
fn four_subject_gwa() {
    let options = EngineOptions::strict(presets::GWA_RANGE, presets::average_tiers());
    let result = compute_weighted_average(
        &rows(&[("90", "3"), ("85", "2"), ("92", "2"), ("88", "3")]),
        &options,
    )
    .unwrap();
    assert_eq!(result.total_weight, 10.0);
    assert_eq!(result.weighted_sum, 888.0);
    assert_eq!(result.weighted_average, 88.8);
}

#[test]
fn cgpa_ten_point_to_percentage() {
    assert_eq!(convert_scale(7.8, Scale::TenPoint, Scale::Percentage).unwrap(), 74.1);
}

#[test]
fn philippine_gwa_to_four_point() {
    assert_eq!(convert_scale(2.0, Scale::Philippine, Scale::FourPoint).unwrap(), 3.0);
}

#[test]
fn final_exam_requirement_above_full_marks() {
    let required = solve_required_score(82.0, 0.30, 90.0);
    assert!((required - 108.666_666).abs() < 1e-3);

    match Toolkit::default().final_grade("82", "30", "90").unwrap() {
        Report::Solver { result, .. } => {
            assert_eq!(result.required_rounded, 108.67);
            assert_eq!(result.band.label, "Very challenging but possible");
        }
        other => panic!("unexpected report {:?}", other),
    }
}

#[test]
fn empty_permissive_list_is_insufficient() {
    let options = EngineOptions::permissive(presets::average_tiers());
    assert_eq!(
        compute_weighted_average(&[], &options),
        Err(EngineError::InsufficientInput)
    );
}

#[test]
fn strict_batch_names_the_offending_subject() {
    let err = Toolkit::default()
        .gwa(&[
            RawEntry::from_row("Math:90:3"),
            RawEntry::from_row("Physics:101:3"),
        ])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Grade for Physics must be a number between 0 and 100."
    );
}
