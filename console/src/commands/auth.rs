//! Session commands
use loctur_core::{AuthPhase, User};
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub phase: AuthPhase,
    pub user: Option<User>,
    pub display_name: Option<String>,
    pub location: String,
}

/// Report the session, signing in first when credentials were given
pub async fn whoami(state: &AppState) -> Result<Value, CliError> {
    let console = state.console();
    if !console.session().is_authenticated() {
        match state.ensure_signed_in().await {
            Ok(()) | Err(CliError::MissingCredentials) => {}
            Err(e) => return Err(e),
        }
    }

    let user = console.session().user();
    let info = SessionInfo {
        phase: console.session().phase(),
        display_name: user.as_ref().map(User::display_name),
        user,
        location: console.navigator().current().path(),
    };
    Ok(serde_json::to_value(info)?)
}
