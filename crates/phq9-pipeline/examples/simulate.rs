//! End-to-end run against the in-memory host.
//!
//! Registers one person, answers the questionnaire, then registers a second
//! person to show the reload, printing each subject's screening as it goes.
//!
//! Usage:
//!   PHQ9_CONFIG=./phq9.json \
//!   RUST_LOG=phq9_pipeline=debug \
//!   cargo run -p phq9-pipeline --example simulate

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use phq9_core::models::{InputRole, QuestionNumber, Subject, SubjectId};
use phq9_host::{HostContext, MemoryHost};
use phq9_pipeline::{Phq9Config, Phq9Integration, select_option, snapshot};

async fn print_screening(ctx: &HostContext, subject: &SubjectId) {
    let snap = snapshot(ctx, subject).await;
    println!("  Subject:        {}", snap.subject_id);
    println!(
        "  Total score:    {}",
        snap.total_score.map_or("-".to_string(), |s| s.to_string())
    );
    println!(
        "  Severity:       {}",
        snap.severity.map_or("-".to_string(), |s| s.to_string())
    );
    println!(
        "  Difficulty:     {}",
        snap.difficulty.map_or("-".to_string(), |d| d.label().to_string())
    );
    println!(
        "  Last evaluated: {}",
        snap.last_evaluated.map_or("-".to_string(), |t| t.to_string())
    );
    println!();
}

/// Sensors react on their own tasks; give them a moment.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("PHQ9_CONFIG") {
        Ok(path) => Phq9Config::load_or_default(&PathBuf::from(path))?,
        Err(_) => Phq9Config::default(),
    };

    let first = Subject::new("1234", "test")?;
    let host = Arc::new(MemoryHost::with_people(vec![first.clone()]));
    let ctx = HostContext::new(host.clone());

    let integration = Phq9Integration::setup(ctx.clone(), &config).await;
    settle().await;

    println!("After setup:");
    print_screening(&ctx, &first.id).await;

    for n in QuestionNumber::all() {
        select_option(&ctx, &first.id, InputRole::Question(n), "several_days").await?;
    }
    select_option(&ctx, &first.id, InputRole::Difficulty, "Somewhat difficult").await?;
    settle().await;

    println!("After answering 'Several days' to every item:");
    print_screening(&ctx, &first.id).await;

    let second = Subject::new("5678", "other")?;
    let mut loaded = integration.loaded();
    host.add_person(second.clone());
    loaded.changed().await?;
    settle().await;

    println!("After registering a second person ({} loaded):", loaded.borrow().len());
    print_screening(&ctx, &first.id).await;
    print_screening(&ctx, &second.id).await;

    integration.unload().await;
    println!("Unloaded, {} entities left in the host.", host.entity_count());
    Ok(())
}
