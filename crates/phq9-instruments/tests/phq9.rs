use phq9_core::models::{QuestionAnswer, SeverityBand};
use phq9_instruments::scoring::{self, TotalScore};
use phq9_instruments::{Instrument, Phq9};

#[test]
fn nine_several_days_scores_nine() {
    let answers = vec![Some(QuestionAnswer::SeveralDays); 9];
    let score = Phq9.score(&answers).expect("nine answers");
    assert_eq!(score.value(), 9);
    assert_eq!(Phq9.interpret(i64::from(score.value())), SeverityBand::Mild);
}

#[test]
fn score_is_sum_of_weights() {
    let answers = [
        Some(QuestionAnswer::NearlyEveryDay),
        Some(QuestionAnswer::MoreThanHalfTheDays),
        Some(QuestionAnswer::SeveralDays),
        Some(QuestionAnswer::NotAtAll),
        None,
        Some(QuestionAnswer::NearlyEveryDay),
        Some(QuestionAnswer::NearlyEveryDay),
        Some(QuestionAnswer::SeveralDays),
        Some(QuestionAnswer::MoreThanHalfTheDays),
    ];
    assert_eq!(Phq9.score(&answers).unwrap().value(), 3 + 2 + 1 + 3 + 3 + 1 + 2);
}

#[test]
fn every_item_at_max_hits_range_ceiling() {
    let answers = vec![Some(QuestionAnswer::NearlyEveryDay); 9];
    assert_eq!(Phq9.score(&answers).unwrap().value(), TotalScore::MAX);
    assert_eq!(Phq9.score_range().max, TotalScore::MAX);
}

#[test]
fn wrong_answer_count_is_rejected() {
    let answers = vec![Some(QuestionAnswer::SeveralDays); 8];
    assert!(Phq9.score(&answers).is_err());
}

#[test]
fn raw_states_default_to_zero() {
    let states = [
        Some("several_days"),
        Some("Nearly every day"),
        Some("unavailable"),
        None,
        Some("more_than_half_the_days"),
        None,
        None,
        None,
        None,
    ];
    assert_eq!(scoring::total_score_of_states(states).value(), 1 + 3 + 2);
}

#[test]
fn severity_boundaries() {
    let cases = [
        (0, SeverityBand::NoneMinimal),
        (4, SeverityBand::NoneMinimal),
        (5, SeverityBand::Mild),
        (9, SeverityBand::Mild),
        (10, SeverityBand::Moderate),
        (14, SeverityBand::Moderate),
        (15, SeverityBand::ModeratelySevere),
        (19, SeverityBand::ModeratelySevere),
        (20, SeverityBand::Severe),
        (27, SeverityBand::Severe),
    ];
    for (score, band) in cases {
        assert_eq!(Phq9.interpret(score), band, "score {score}");
    }
}

#[test]
fn bands_partition_the_producible_range() {
    for score in 0..=27i64 {
        let claimed = Phq9
            .severity_table()
            .iter()
            .filter(|row| row.range.contains(score))
            .count();
        // The top band is the fall-through, so exactly one row or none.
        if score >= 20 {
            assert_eq!(claimed, 0, "score {score}");
        } else {
            assert_eq!(claimed, 1, "score {score}");
        }
    }
}

#[test]
fn out_of_range_scores_fall_through_to_severe() {
    assert_eq!(Phq9.interpret(28), SeverityBand::Severe);
    assert_eq!(Phq9.interpret(1000), SeverityBand::Severe);
    assert_eq!(Phq9.interpret(-1), SeverityBand::Severe);
}

#[test]
fn unparseable_state_is_unknown() {
    assert_eq!(Phq9.interpret_state(Some("abc")), Some(SeverityBand::Unknown));
    assert_eq!(Phq9.interpret_state(Some("15.0")), Some(SeverityBand::Unknown));
    assert_eq!(Phq9.interpret_state(Some("15")), Some(SeverityBand::ModeratelySevere));
    assert_eq!(Phq9.interpret_state(None), None);
}

#[test]
fn item_wording_is_available() {
    assert_eq!(Phq9.items().len(), 9);
    assert_eq!(Phq9.items()[0].number, 1);
    assert!(Phq9.items()[8].text.starts_with("Thoughts that you would be better off dead"));
    assert_eq!(Phq9.id(), "phq9");
}
