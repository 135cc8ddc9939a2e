use phq9_core::keys;
use phq9_core::models::{InputRole, SubjectId};
use phq9_host::HostContext;

use crate::entities;
use crate::error::PipelineError;

/// Set one of a subject's ten inputs.
///
/// `option` may be the canonical key or the display label; the canonical key
/// is what gets written.
pub async fn select_option(
    host: &HostContext,
    subject: &SubjectId,
    role: InputRole,
    option: &str,
) -> Result<(), PipelineError> {
    let canonical =
        entities::canonical_option(role, option).ok_or_else(|| PipelineError::InvalidOption {
            role,
            option: option.to_string(),
        })?;

    let key = keys::input(subject, role);
    let id = host
        .directory
        .resolve(&key)
        .await
        .ok_or(PipelineError::EntityNotFound(key))?;

    host.states.set(&id, Some(canonical.to_string())).await?;
    tracing::info!(subject = %subject, input = %role, option = canonical, "input selected");
    Ok(())
}
