//! # Validation Rules
//!
//! Decides whether the current form input may be submitted for the selected
//! game. The rules are local only; whether an identifier actually exists is
//! for the remote service to say.

use thiserror::Error;

use crate::catalog::GameDefinition;

/// Why a form cannot be submitted yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select a game and enter an account ID")]
    IncompleteForm,
    #[error("Zone ID is required for {game}")]
    ZoneRequired { game: &'static str },
}

/// Checks the form against the selected game's requirements.
///
/// The server is never checked: the form always carries a default region, so
/// `requires_server` cannot block submission.
pub fn check_submission(
    game: Option<&GameDefinition>,
    account_id: &str,
    zone_id: &str,
    _server: &str,
) -> Result<(), ValidationError> {
    let game = match game {
        Some(game) if !account_id.is_empty() => game,
        _ => return Err(ValidationError::IncompleteForm),
    };

    if game.requires_zone && zone_id.is_empty() {
        return Err(ValidationError::ZoneRequired {
            game: game.display_name,
        });
    }

    Ok(())
}

/// Returns `true` when the form may be submitted.
pub fn is_submittable(
    game: Option<&GameDefinition>,
    account_id: &str,
    zone_id: &str,
    server: &str,
) -> bool {
    check_submission(game, account_id, zone_id, server).is_ok()
}
