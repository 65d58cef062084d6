//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use loctur_core::{Config, Credentials, DEFAULT_RANGE_DAYS, DEFAULT_SERVER_URL};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "loctur-console", about = "LocTur trip administration console", version)]
pub struct Cli {
    #[arg(long, env = "LOCTUR_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    #[arg(long, env = "LOCTUR_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "LOCTUR_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> Config {
        let mut config = Config::new(self.server_url.clone());
        config.request_timeout = self.timeout;
        config
    }

    /// Present only when both halves were given
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the current session
    Whoami,
    Trips(TripsCommand),
    Places(PlacesCommand),
    Travelers(ListCommand),
    Expenses(ListCommand),
    Files(FilesCommand),
    /// Dashboard overview
    Metrics {
        /// Window in days
        #[arg(long, default_value_t = DEFAULT_RANGE_DAYS)]
        range: u32,
    },
    /// Show site settings
    Settings,
}

#[derive(Args, Debug, Clone)]
pub struct TripsCommand {
    #[command(subcommand)]
    pub command: TripsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TripsSubcommand {
    List(ListArgs),
    Show { id: Uuid },
    Participants { id: Uuid },
}

#[derive(Args, Debug, Clone)]
pub struct PlacesCommand {
    #[command(subcommand)]
    pub command: PlacesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlacesSubcommand {
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct FilesCommand {
    #[command(subcommand)]
    pub command: FilesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FilesSubcommand {
    /// Storage totals, or a single trip's with --trip
    Stats {
        #[arg(long)]
        trip: Option<Uuid>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Listing filter as key=value, repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,
}

impl ListArgs {
    pub fn query(&self) -> Vec<(&str, &str)> {
        self.filters
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trip_show() {
        let id = Uuid::new_v4();
        let cli = Cli::try_parse_from([
            "loctur-console",
            "--server-url",
            "https://admin.loctur.ru",
            "trips",
            "show",
            &id.to_string(),
        ])
        .unwrap();

        assert_eq!(cli.config().server_url, "https://admin.loctur.ru");
        let Command::Trips(TripsCommand {
            command: TripsSubcommand::Show { id: shown },
        }) = cli.command
        else {
            panic!("expected trips show");
        };
        assert_eq!(shown, id);
    }

    #[test]
    fn test_filters() {
        let cli = Cli::try_parse_from([
            "loctur-console",
            "places",
            "list",
            "--filter",
            "city=Kazan",
            "--filter",
            "search=kremlin",
        ])
        .unwrap();

        let Command::Places(PlacesCommand {
            command: PlacesSubcommand::List(args),
        }) = cli.command
        else {
            panic!("expected places list");
        };
        assert_eq!(args.query(), [("city", "Kazan"), ("search", "kremlin")]);

        let bad = Cli::try_parse_from(["loctur-console", "places", "list", "--filter", "=x"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_credentials_need_both_halves() {
        let cli = Cli::try_parse_from(["loctur-console", "--username", "admin", "whoami"]).unwrap();
        assert!(cli.credentials().is_none());

        let cli = Cli::try_parse_from([
            "loctur-console",
            "--username",
            "admin",
            "--password",
            "secret",
            "--timeout",
            "5",
            "metrics",
        ])
        .unwrap();
        assert!(cli.credentials().is_some());
        assert_eq!(cli.config().request_timeout, 5);
        assert!(matches!(cli.command, Command::Metrics { range: 30 }));
    }
}
