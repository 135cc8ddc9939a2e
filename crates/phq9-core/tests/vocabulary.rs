use phq9_core::keys;
use phq9_core::models::{
    DifficultyAnswer, InputRole, Platform, QuestionAnswer, QuestionNumber, SensorKind,
    SeverityBand, SubjectId,
};

fn subject() -> SubjectId {
    SubjectId::new("1234").expect("valid subject id")
}

#[test]
fn question_weights_follow_ordinal_encoding() {
    let weights: Vec<u8> = QuestionAnswer::ALL.iter().map(|a| a.weight()).collect();
    assert_eq!(weights, vec![0, 1, 2, 3]);
    assert_eq!(QuestionAnswer::default(), QuestionAnswer::NotAtAll);
}

#[test]
fn answers_parse_from_key_or_label() {
    assert_eq!(
        QuestionAnswer::from_state("several_days"),
        Some(QuestionAnswer::SeveralDays)
    );
    assert_eq!(
        QuestionAnswer::from_state("More than half the days"),
        Some(QuestionAnswer::MoreThanHalfTheDays)
    );
    assert_eq!(
        DifficultyAnswer::from_state("very_difficult"),
        Some(DifficultyAnswer::VeryDifficult)
    );
    assert!("sometimes".parse::<QuestionAnswer>().is_err());
}

#[test]
fn unrecognised_or_missing_answers_weigh_zero() {
    assert_eq!(QuestionAnswer::weight_of(None), 0);
    assert_eq!(QuestionAnswer::weight_of(Some("unavailable")), 0);
    assert_eq!(QuestionAnswer::weight_of(Some("")), 0);
    assert_eq!(QuestionAnswer::weight_of(Some("nearly_every_day")), 3);
}

#[test]
fn question_number_bounds() {
    assert!(QuestionNumber::new(0).is_err());
    assert!(QuestionNumber::new(10).is_err());
    assert_eq!(QuestionNumber::all().count(), 9);
    assert_eq!(QuestionNumber::new(9).unwrap().index(), 8);
}

#[test]
fn empty_subject_id_rejected() {
    assert!(SubjectId::new("  ").is_err());
}

#[test]
fn naming_scheme_is_deterministic() {
    let s = subject();
    let q3 = keys::question(&s, QuestionNumber::new(3).unwrap());
    assert_eq!(q3.platform, Platform::Select);
    assert_eq!(q3.unique_id, "phq9_1234_3");
    assert_eq!(keys::difficulty(&s).unique_id, "phq9_1234_difficulty");
    assert_eq!(keys::total_score(&s).unique_id, "phq9_1234_score");
    assert_eq!(keys::total_score(&s).platform, Platform::Sensor);
    assert_eq!(
        keys::score_interpretation(&s).unique_id,
        "phq9_1234_score_interpretation"
    );
    assert_eq!(
        keys::input_object_id(&s, InputRole::Question(QuestionNumber::new(1).unwrap())),
        "phq9_1234_q1"
    );
    assert_eq!(
        keys::sensor_object_id(&s, SensorKind::LastEvaluated),
        "phq9_1234_last_evaluated"
    );
}

#[test]
fn input_keys_cover_nine_questions_then_difficulty() {
    let keys = keys::input_keys(&subject());
    assert_eq!(keys.len(), 10);
    assert_eq!(keys[0].unique_id, "phq9_1234_1");
    assert_eq!(keys[8].unique_id, "phq9_1234_9");
    assert_eq!(keys[9].unique_id, "phq9_1234_difficulty");
}

#[test]
fn severity_band_names() {
    assert_eq!(SeverityBand::ModeratelySevere.to_string(), "moderately_severe");
    assert_eq!("mild".parse::<SeverityBand>(), Ok(SeverityBand::Mild));
    assert_eq!("garbage".parse::<SeverityBand>(), Ok(SeverityBand::Unknown));
    assert_eq!(
        serde_json::to_string(&SeverityBand::NoneMinimal).unwrap(),
        "\"none_minimal\""
    );
}
