use crate::chown::Selection;
use crate::error::{ChownError, ChownResult};
use crate::library::MatchPolicy;
use reqwest::Url;
use std::collections::HashMap;
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "JELLYFIN_API_KEY";
pub const DATA_DIR_ENV: &str = "JELLYFIN_DATA_DIR";
pub const XDG_DATA_HOME_ENV: &str = "XDG_DATA_HOME";
pub const HOME_ENV: &str = "HOME";

/// Location of the library database inside a Jellyfin data directory.
const LIBRARY_DB_SUBPATH: &str = "data/library.db";

/// Source of environment variables, so resolution can be tested without
/// touching the process environment.
pub trait EnvLookup {
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`EnvLookup::var`], but empty values count as unset.
    fn non_empty_var(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Raw values as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub database: Option<PathBuf>,
    pub server_url: String,
    pub user: String,
    pub playlists: Vec<String>,
    pub all_playlists: bool,
    pub all_unowned: bool,
    pub lax: bool,
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub server_url: Url,
    pub api_key: String,
    pub username: String,
    pub selection: Selection,
    pub match_policy: MatchPolicy,
    pub debug: bool,
}

impl AppConfig {
    /// Resolve the CLI values against the environment. Every configuration
    /// problem is reported here, before any network or database access.
    pub fn resolve(cli: &CliConfig, env: &dyn EnvLookup) -> ChownResult<Self> {
        let db_path = match &cli.database {
            Some(path) => path.clone(),
            None => default_db_path(env).ok_or(ChownError::DatabasePathUnresolved)?,
        };

        let server_url = parse_server_url(&cli.server_url)?;

        let api_key = env
            .non_empty_var(API_KEY_ENV)
            .ok_or(ChownError::MissingApiKey(API_KEY_ENV))?;

        let selection = Selection::from_flags(&cli.playlists, cli.all_playlists, cli.all_unowned)?;

        let match_policy = if cli.lax {
            MatchPolicy::Lenient
        } else {
            MatchPolicy::Strict
        };

        Ok(AppConfig {
            db_path,
            server_url,
            api_key,
            username: cli.user.clone(),
            selection,
            match_policy,
            debug: cli.debug,
        })
    }
}

/// Default library database path, following Jellyfin's data directory
/// precedence: `$JELLYFIN_DATA_DIR`, then `$XDG_DATA_HOME/jellyfin`, then
/// `$HOME/.local/share/jellyfin`.
pub fn default_db_path(env: &dyn EnvLookup) -> Option<PathBuf> {
    let data_dir = env
        .non_empty_var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| {
            env.non_empty_var(XDG_DATA_HOME_ENV)
                .map(|xdg| PathBuf::from(xdg).join("jellyfin"))
        })
        .or_else(|| {
            env.non_empty_var(HOME_ENV)
                .map(|home| PathBuf::from(home).join(".local/share/jellyfin"))
        })?;

    Some(data_dir.join(LIBRARY_DB_SUBPATH))
}

fn parse_server_url(raw: &str) -> ChownResult<Url> {
    let invalid = |reason: &str| ChownError::InvalidServerUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("only http and https are supported"));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(url)
}
