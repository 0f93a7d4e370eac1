use channel_state::ChannelStore;

use crate::error::ResolutionError;

/// A resolved admin command target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub channel_id: i64,
    /// How the channel is named in replies: `@handle (id)` or the bare id.
    pub label: String,
}

/// Resolves an `allow`/`remove` argument. `@handle` goes through the name index and needs a prior
/// sighting; a bare integer is taken as the channel id as is.
pub async fn resolve_target(
    store: &ChannelStore,
    arg: Option<&str>,
    command: &'static str,
) -> Result<Target, ResolutionError> {
    let arg = arg
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or(ResolutionError::MissingArgument { command })?;

    if arg.starts_with('@') {
        let channel_id = store
            .resolve_handle(arg)
            .await
            .ok_or_else(|| ResolutionError::UnknownHandle(arg.to_string()))?;
        return Ok(Target {
            channel_id,
            label: format!("{} ({})", arg, channel_id),
        });
    }

    let channel_id = arg
        .parse::<i64>()
        .map_err(|_| ResolutionError::InvalidId(arg.to_string()))?;
    Ok(Target {
        channel_id,
        label: channel_id.to_string(),
    })
}
