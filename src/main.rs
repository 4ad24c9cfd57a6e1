use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;

use cli_style::get_styles;
use jellyfin_chown_pl::{
    execute, AppConfig, ChownError, ChownOutcome, CliConfig, Phase, ProcessEnv, Selection,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Changes the ownership of Jellyfin playlists.
#[derive(Parser, Debug)]
#[command(
    name = "jellyfin-chown-pl",
    version = env!("APP_VERSION"),
    styles = get_styles(),
    group(
        ArgGroup::new("selection")
            .required(true)
            .args(["playlists", "all_playlists", "all_unowned"])
    )
)]
struct CliArgs {
    /// The path to the library.db SQLite database. Inferred from the
    /// Jellyfin data directory ($JELLYFIN_DATA_DIR, $XDG_DATA_HOME/jellyfin
    /// or ~/.local/share/jellyfin) when omitted.
    #[clap(short, long, value_parser = parse_path)]
    pub database: Option<PathBuf>,

    /// The URL of the Jellyfin server.
    #[clap(short, long)]
    pub server_url: String,

    /// The name of a playlist to change ownership of (case sensitive).
    /// Can be repeated for multiple playlists.
    #[clap(short = 'p', long = "playlist", value_name = "NAME")]
    pub playlists: Vec<String>,

    /// Change ownership of every playlist on the server, regardless of its
    /// current owner.
    #[clap(long)]
    pub all_playlists: bool,

    /// Change ownership of every playlist whose owner is not a user of the
    /// server.
    #[clap(long)]
    pub all_unowned: bool,

    /// The user who will own the playlists. To give playlists to different
    /// users, run once per user.
    #[clap(short, long)]
    pub user: String,

    /// Only warn about playlists that could not be found, and update the
    /// ones that were.
    #[clap(long)]
    pub lax: bool,

    /// Let failures propagate with their full diagnostic trace instead of a
    /// short report.
    #[clap(long)]
    pub debug: bool,
}

impl CliArgs {
    fn into_config(self) -> CliConfig {
        CliConfig {
            database: self.database,
            server_url: self.server_url,
            user: self.user,
            playlists: self.playlists,
            all_playlists: self.all_playlists,
            all_unowned: self.all_unowned,
            lax: self.lax,
            debug: self.debug,
        }
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn playlist_set_label(names: &[String]) -> String {
    if names.is_empty() {
        "(all)".to_string()
    } else {
        names
            .iter()
            .map(|name| format!("'{}'", name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn failure_headline(error: &ChownError, requested: &[String]) -> String {
    match error.phase() {
        Phase::Config => "Invalid configuration:".to_string(),
        Phase::UserResolution => "Error fetching user ID:".to_string(),
        Phase::DatabaseOpen => {
            "The database could not be opened, due to the following error:".to_string()
        }
        Phase::Mutation => format!(
            "Playlist ownership could not be changed for playlist set {}, due to the following:",
            playlist_set_label(requested)
        ),
    }
}

/// In debug mode the error leaves `main` untouched, so the runtime prints
/// its full chain and backtrace. Otherwise it is reported and exit code 1
/// is returned.
fn report_failure(error: ChownError, requested: &[String], debug: bool) -> Result<ExitCode> {
    let headline = failure_headline(&error, requested);
    if debug {
        return Err(anyhow::Error::new(error).context(headline));
    }

    cli_style::print_failure(&headline, &error);
    Ok(ExitCode::from(1))
}

fn print_outcome(outcome: &ChownOutcome, selection: &Selection) {
    let report = &outcome.report;
    if !report.missing.is_empty() {
        cli_style::print_warning("These playlists were not found and were left out:");
        for name in &report.missing {
            cli_style::eprint_list_item(name, 1);
        }
    }

    // None of the requested playlists matched
    if report.updated.is_empty() && !report.missing.is_empty() {
        cli_style::print_empty_list("no playlists were changed");
        return;
    }

    cli_style::print_success("Ownership updated!");
    cli_style::print_key_value(
        "New owner",
        &format!("{} ({})", outcome.username, outcome.user_id),
    );
    if report.updated.is_empty() {
        let note = match selection {
            Selection::AllUnowned => "every playlist already has a known owner",
            _ => "no playlists were changed",
        };
        cli_style::print_empty_list(note);
    } else {
        cli_style::print_key_value("Playlists", &report.updated.len().to_string());
        for name in &report.updated {
            cli_style::print_list_item(name, 1);
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli_args = CliArgs::parse();
    let debug = cli_args.debug;

    if debug && std::env::var_os("RUST_LIB_BACKTRACE").is_none() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1");
    }
    init_logging(debug)?;

    let cli_config = cli_args.into_config();
    let config = match AppConfig::resolve(&cli_config, &ProcessEnv) {
        Ok(config) => config,
        Err(err) => return report_failure(err, &cli_config.playlists, debug),
    };

    match execute(&config) {
        Ok(outcome) => {
            print_outcome(&outcome, &config.selection);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => report_failure(err, config.selection.requested_names(), config.debug),
    }
}
