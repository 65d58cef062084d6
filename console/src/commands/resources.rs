//! Resource commands
//!
//! Each one signs in when needed, opens the matching screen and fetches
//! what that screen shows.
use loctur_core::{Location, Visit};
use serde_json::Value;

use crate::cli::{FilesSubcommand, ListSubcommand, PlacesSubcommand, TripsSubcommand};
use crate::error::CliError;
use crate::state::AppState;

async fn open(state: &AppState, location: Location) -> Result<Visit, CliError> {
    state.ensure_signed_in().await?;
    Ok(state.console().open(location)?)
}

/// Answers may land after the console moved elsewhere; they are still returned
fn settle(visit: &Visit, data: Value) -> Result<Value, CliError> {
    if !visit.is_current() {
        tracing::debug!(location = %visit.location(), "Screen left before data arrived");
    }
    Ok(data)
}

pub async fn trips(state: &AppState, command: TripsSubcommand) -> Result<Value, CliError> {
    let api = state.console().api();

    match command {
        TripsSubcommand::List(args) => {
            let visit = open(state, Location::Trips).await?;
            settle(&visit, api.trips().list(&args.query()).await?)
        }
        TripsSubcommand::Show { id } => {
            let visit = open(state, Location::TripDetail(id)).await?;
            settle(&visit, api.trips().get(id).await?)
        }
        TripsSubcommand::Participants { id } => {
            let visit = open(state, Location::TripDetail(id)).await?;
            settle(&visit, api.trips().participants(id).await?)
        }
    }
}

pub async fn places(state: &AppState, command: PlacesSubcommand) -> Result<Value, CliError> {
    let PlacesSubcommand::List(args) = command;
    let visit = open(state, Location::Places).await?;
    settle(&visit, state.console().api().places().list(&args.query()).await?)
}

pub async fn travelers(state: &AppState, command: ListSubcommand) -> Result<Value, CliError> {
    let ListSubcommand::List(args) = command;
    let visit = open(state, Location::Travelers).await?;
    settle(&visit, state.console().api().travelers().list(&args.query()).await?)
}

pub async fn expenses(state: &AppState, command: ListSubcommand) -> Result<Value, CliError> {
    let ListSubcommand::List(args) = command;
    let visit = open(state, Location::Expenses).await?;
    settle(&visit, state.console().api().expenses().list(&args.query()).await?)
}

pub async fn files(state: &AppState, command: FilesSubcommand) -> Result<Value, CliError> {
    let FilesSubcommand::Stats { trip } = command;
    let files = state.console().api().files();

    match trip {
        Some(id) => {
            let visit = open(state, Location::TripDetail(id)).await?;
            settle(&visit, files.trip_stats(id).await?)
        }
        None => {
            let visit = open(state, Location::Dashboard).await?;
            settle(&visit, files.stats().await?)
        }
    }
}

pub async fn metrics(state: &AppState, range_days: u32) -> Result<Value, CliError> {
    let visit = open(state, Location::Dashboard).await?;
    settle(&visit, state.console().api().metrics().overview(range_days).await?)
}

pub async fn settings(state: &AppState) -> Result<Value, CliError> {
    let visit = open(state, Location::Settings).await?;
    settle(&visit, state.console().api().settings().get().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Command, ListArgs, TripsCommand};
    use crate::commands::{execute, test_support::state};
    use loctur_core::Credentials;
    use loctur_gateway::Method;
    use serde_json::json;
    use uuid::Uuid;

    const IDENTITY: &str = "/api/auth/user/";

    #[tokio::test]
    async fn test_trip_detail() {
        let (state, transport) = state(None);
        let id = Uuid::new_v4();
        transport
            .respond_json(Method::GET, IDENTITY, 200, json!({"id": 1, "username": "admin"}))
            .respond_json(
                Method::GET,
                &format!("/api/trips/{id}/"),
                200,
                json!({"title": "Altai"}),
            );
        state.initialize().await;

        let trip = trips(&state, TripsSubcommand::Show { id }).await.unwrap();

        assert_eq!(trip["title"], "Altai");
        assert_eq!(state.console().navigator().current(), Location::TripDetail(id));
    }

    #[tokio::test]
    async fn test_signs_in_before_fetching() {
        let (state, transport) = state(Some(Credentials::new("admin", "secret")));
        transport
            .respond_status(Method::GET, IDENTITY, 401)
            .respond_json(
                Method::POST,
                "/api/auth/login/",
                200,
                json!({"user": {"id": 1, "username": "admin"}}),
            )
            .respond_json(Method::GET, "/api/metrics/overview/", 200, json!({"revenue": 0}));
        state.initialize().await;

        let overview = metrics(&state, 7).await.unwrap();

        assert_eq!(overview["revenue"], 0);
        let sent = transport.requests_to("/api/metrics/overview/");
        assert_eq!(sent[0].url.query(), Some("range=7d"));
    }

    #[tokio::test]
    async fn test_missing_credentials_reported() {
        let (state, transport) = state(None);
        transport.respond_status(Method::GET, IDENTITY, 401);
        state.initialize().await;

        let result = execute(
            &state,
            Command::Trips(TripsCommand {
                command: TripsSubcommand::List(ListArgs::default()),
            }),
        )
        .await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("not signed in"));
        assert!(transport.requests_to("/api/trips/").is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_reported() {
        let (state, transport) = state(None);
        transport
            .respond_json(Method::GET, IDENTITY, 200, json!({"id": 1, "username": "admin"}))
            .respond_status(Method::GET, "/api/settings/", 403);
        state.initialize().await;

        let result = execute(&state, Command::Settings).await;

        assert!(!result.success);
        assert!(!state.console().session().is_authenticated());
    }
}
