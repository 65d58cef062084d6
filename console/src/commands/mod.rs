//! Console commands
//!
//! Every command answers with a [`CommandResult`] that is printed as JSON.

pub mod auth;
pub mod resources;

use serde::Serialize;
use serde_json::Value;

use crate::cli::Command;
use crate::error::CliError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T> From<Result<T, CliError>> for CommandResult<T> {
    fn from(result: Result<T, CliError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                tracing::warn!(error = %e, "Command failed");
                Self::err(e.to_string())
            }
        }
    }
}

pub async fn execute(state: &AppState, command: Command) -> CommandResult<Value> {
    let result = match command {
        Command::Whoami => auth::whoami(state).await,
        Command::Trips(trips) => resources::trips(state, trips.command).await,
        Command::Places(places) => resources::places(state, places.command).await,
        Command::Travelers(list) => resources::travelers(state, list.command).await,
        Command::Expenses(list) => resources::expenses(state, list.command).await,
        Command::Files(files) => resources::files(state, files.command).await,
        Command::Metrics { range } => resources::metrics(state, range).await,
        Command::Settings => resources::settings(state).await,
    };
    result.into()
}

#[cfg(test)]
pub(crate) mod test_support {
    use loctur_core::{Config, Console, Credentials, Transport};
    use loctur_gateway::testing::ScriptedTransport;
    use loctur_gateway::Jar;
    use std::sync::Arc;

    use crate::state::AppState;

    pub fn state(credentials: Option<Credentials>) -> (AppState, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let console = Console::with_transport(
            Config::new("http://admin.test"),
            Arc::new(Jar::default()),
            Arc::clone(&transport) as Arc<dyn Transport>,
        )
        .unwrap();
        (AppState::with_console(console, credentials), transport)
    }
}
