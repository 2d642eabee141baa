use mentara_instruments::error::InstrumentError;
use mentara_instruments::instruments::asrs::SCREEN_POSITIVE;
use mentara_instruments::scorer::calculate_detailed_result;
use mentara_instruments::scoring::{ScoringGranularity, UNANSWERED};
use mentara_instruments::{Questionnaire, Registry};

fn score(id: &str, answers: &[i32]) -> mentara_instruments::scoring::ToolResult {
    calculate_detailed_result(&Registry::standard(), id, answers)
}

#[test]
fn registry_has_fifteen_tools() {
    let registry = Registry::standard();
    assert_eq!(registry.len(), 15);

    let ids: Vec<&str> = registry.iter().map(|q| q.id()).collect();
    assert_eq!(ids[0], "stress");
    assert_eq!(ids[14], "alcohol");

    for q in registry.iter() {
        assert!(!q.questions().is_empty(), "{} has no questions", q.id());
        assert!(!q.scoring().severity_bands.is_empty(), "{} has no bands", q.id());
    }
}

#[test]
fn lookup_by_id_title_or_short_name() {
    let registry = Registry::standard();
    assert_eq!(registry.get("depression").unwrap().short_name(), "PHQ-9");
    assert_eq!(registry.get("phq-9").unwrap().id(), "depression");
    assert_eq!(registry.get("Social anxiety").unwrap().id(), "social_anxiety");
    assert!(registry.get("nope").is_none());
}

#[test]
fn resolve_rejects_unknown_and_duplicate_ids() {
    let registry = Registry::standard();
    assert!(matches!(
        registry.resolve(&["depression", "nope"]),
        Err(InstrumentError::UnknownQuestionnaire(id)) if id == "nope"
    ));
    assert!(matches!(
        registry.resolve(&["depression", "PHQ-9"]),
        Err(InstrumentError::DuplicateQuestionnaire(id)) if id == "depression"
    ));
    assert_eq!(registry.resolve(&["anxiety", "stress"]).unwrap().len(), 2);
}

#[test]
fn validates_answer_ranges() {
    let registry = Registry::standard();
    let phq9 = registry.get("depression").unwrap();

    assert!(phq9.validate_answers(&[0, 3, UNANSWERED]).is_empty());

    let errors = phq9.validate_answers(&[0, 4]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].question_index, 1);
    assert_eq!(errors[0].value, 4);

    let too_many = phq9.validate_answers(&[0; 10]);
    assert_eq!(too_many.len(), 1);
    assert_eq!(too_many[0].question_index, 9);

    assert_eq!(phq9.validate_answers(&[-2]).len(), 1);
}

#[test]
fn stress_reverse_scores_positive_items() {
    // Items 4, 5, 7 and 8 score 4 - answer.
    let result = score("stress", &[0; 10]);
    assert_eq!(result.score, 16);
    assert_eq!(result.severity, "Moderate Stress");
    assert_eq!(result.percentage, 40.0);

    let relaxed = score("stress", &[0, 0, 0, 4, 4, 0, 4, 4, 0, 0]);
    assert_eq!(relaxed.score, 0);
    assert_eq!(relaxed.severity, "Low Stress");
}

#[test]
fn drug_screen_reverse_scores_coping_items() {
    assert_eq!(score("drug_abuse", &[0; 10]).severity, "Low Level");
    let all_yes = score("drug_abuse", &[1; 10]);
    assert_eq!(all_yes.score, 8);
    assert_eq!(all_yes.severity, "Substantial Level");
}

#[test]
fn bipolar_screen_needs_all_three_criteria() {
    let mut answers = vec![1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 2];
    let positive = score("bipolar", &answers);
    assert_eq!(positive.score, 1);
    assert_eq!(
        positive.severity,
        "Positive Bipolar Screen (All 3 Criteria Met)"
    );

    answers[14] = 1;
    let mild_impairment = score("bipolar", &answers);
    assert_eq!(mild_impairment.score, 0);
    assert_eq!(mild_impairment.severity, "Negative Screen");

    answers[14] = 3;
    answers[6] = 0;
    assert_eq!(score("bipolar", &answers).severity, "Negative Screen");
}

#[test]
fn adhd_part_a_screen() {
    let mut answers = vec![0; 18];
    answers[..6].copy_from_slice(&[2, 2, 2, 3, 0, 0]);
    assert_eq!(score("adhd", &answers).severity, SCREEN_POSITIVE);

    // Only three shaded answers: item 4 needs at least "Often".
    answers[..6].copy_from_slice(&[4, 4, 4, 2, 0, 0]);
    let negative = score("adhd", &answers);
    assert_eq!(negative.score, 14);
    assert_eq!(negative.severity, "Low");

    let mut high = vec![4; 18];
    high[..6].copy_from_slice(&[0, 0, 0, 0, 0, 0]);
    let result = score("adhd", &high);
    assert_eq!(result.score, 48);
    assert_eq!(result.severity, "High");
}

#[test]
fn burnout_reports_subscales() {
    let registry = Registry::standard();
    assert_eq!(
        registry.get("burnout").unwrap().granularity(),
        ScoringGranularity::Subscales
    );
    assert_eq!(
        registry.get("depression").unwrap().granularity(),
        ScoringGranularity::TotalOnly
    );

    let low = score("burnout", &[0; 22]);
    assert_eq!(low.severity, "EE: Low, DP: Low, PA: Low Accomplishment");
    let subscales = low.subscales.unwrap();
    assert_eq!(subscales["EE"], 0);
    assert_eq!(subscales["PA"], 0);

    let high = score("burnout", &[6; 22]);
    assert_eq!(high.score, 132);
    assert_eq!(high.percentage, 100.0);
    assert_eq!(high.severity, "EE: High, DP: High, PA: High Accomplishment");
    let subscales = high.subscales.unwrap();
    assert_eq!(subscales["EE"], 42);
    assert_eq!(subscales["DP"], 42);
    assert_eq!(subscales["PA"], 48);

    let mut mixed = vec![0; 22];
    mixed[..7].copy_from_slice(&[3, 3, 3, 3, 3, 3, 2]);
    mixed[7..9].copy_from_slice(&[6, 3]);
    mixed[14..22].copy_from_slice(&[4; 8]);
    assert_eq!(
        score("burnout", &mixed).severity,
        "EE: Moderate, DP: Moderate, PA: Moderate"
    );
}

#[test]
fn summary_lists_questions_and_bands() {
    let registry = Registry::standard();
    let summary = registry.get("anxiety").unwrap().summary();
    assert_eq!(summary.short_name, "GAD-7");
    assert_eq!(summary.questions.len(), 7);
    assert_eq!(summary.questions[0].options.len(), 4);
    assert_eq!(summary.severity_bands.len(), 4);

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["shortName"], "GAD-7");
    assert_eq!(value["granularity"], "total_only");
}

#[test]
fn check_answers_reports_the_first_problem() {
    let registry = Registry::standard();
    let phq9 = registry.require("depression").unwrap();
    assert!(phq9.check_answers(&[0, 3, UNANSWERED]).is_ok());

    match phq9.check_answers(&[0, 7, 9]) {
        Err(InstrumentError::Validation(error)) => {
            assert_eq!(error.question_index, 1);
            assert_eq!(error.value, 7);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn unchecked_answers_saturate_instead_of_overflowing() {
    let result = score("adhd", &[i32::MAX, i32::MAX, i32::MAX]);
    assert_eq!(result.score, i32::MAX);
    assert!(result.percentage.is_finite());
}
