use phq9_core::keys;
use phq9_core::models::{
    DifficultyAnswer, EntityKey, QuestionAnswer, ScreeningSnapshot, SensorKind, SeverityBand,
    SubjectId,
};
use phq9_host::HostContext;

async fn read(host: &HostContext, key: &EntityKey) -> Option<String> {
    let id = host.directory.resolve(key).await?;
    host.states.get(&id).await
}

/// Read a subject's inputs and derived values back from the host.
pub async fn snapshot(host: &HostContext, subject: &SubjectId) -> ScreeningSnapshot {
    let mut answers = Vec::new();
    for key in keys::question_keys(subject) {
        let raw = read(host, &key).await;
        answers.push(raw.as_deref().and_then(QuestionAnswer::from_state));
    }

    let difficulty = read(host, &keys::difficulty(subject))
        .await
        .as_deref()
        .and_then(DifficultyAnswer::from_state);

    let total_score = read(host, &keys::sensor(subject, SensorKind::TotalScore))
        .await
        .and_then(|raw| raw.trim().parse::<u8>().ok());

    let severity = read(host, &keys::sensor(subject, SensorKind::ScoreInterpretation))
        .await
        .and_then(|raw| raw.parse::<SeverityBand>().ok());

    let last_evaluated = read(host, &keys::sensor(subject, SensorKind::LastEvaluated))
        .await
        .and_then(|raw| raw.parse::<jiff::Timestamp>().ok());

    ScreeningSnapshot {
        subject_id: subject.clone(),
        answers,
        difficulty,
        total_score,
        severity,
        last_evaluated,
    }
}
