//! A complete ownership change: resolve the new owner, open the library,
//! rewrite the selected playlists and commit.

use crate::config::AppConfig;
use crate::error::{ChownError, ChownResult};
use crate::library::{update_all, update_many, update_single, BulkPolicy, LibraryDb, UpdateReport};
use crate::users::{resolve_owner, JellyfinClient, ResolvedOwner, UserDirectory};
use tracing::info;

/// The playlists a run applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(String),
    Many(Vec<String>),
    All,
    /// Every playlist whose owner is not a user of the server.
    AllUnowned,
}

impl Selection {
    /// Builds the selection from the three mutually exclusive CLI options.
    pub fn from_flags(
        playlists: &[String],
        all_playlists: bool,
        all_unowned: bool,
    ) -> ChownResult<Self> {
        let given = [!playlists.is_empty(), all_playlists, all_unowned]
            .into_iter()
            .filter(|given| *given)
            .count();
        if given != 1 {
            return Err(ChownError::InvalidSelection(
                "exactly one of --playlist, --all-playlists or --all-unowned must be given"
                    .to_string(),
            ));
        }

        Ok(match playlists {
            [] if all_playlists => Selection::All,
            [] => Selection::AllUnowned,
            [single] => Selection::Single(single.clone()),
            many => Selection::Many(many.to_vec()),
        })
    }

    pub fn needs_known_ids(&self) -> bool {
        matches!(self, Selection::AllUnowned)
    }

    /// Names given on the command line, empty for bulk selections.
    pub fn requested_names(&self) -> &[String] {
        match self {
            Selection::Single(name) => std::slice::from_ref(name),
            Selection::Many(names) => names,
            Selection::All | Selection::AllUnowned => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChownOutcome {
    pub username: String,
    pub user_id: String,
    pub report: UpdateReport,
}

/// Runs the change against the given user directory. Every step must succeed
/// before the next one starts; the database is only opened once the owner is
/// known, and nothing is committed unless every selected row was rewritten.
pub fn run(config: &AppConfig, directory: &dyn UserDirectory) -> ChownResult<ChownOutcome> {
    let ResolvedOwner { user_id, known_ids } = resolve_owner(
        directory,
        &config.username,
        config.selection.needs_known_ids(),
    )?;

    let mut db = LibraryDb::open(&config.db_path)?;
    let tx = db.transaction()?;

    let report = match &config.selection {
        Selection::Single(name) => update_single(&tx, &user_id, name)?,
        Selection::Many(names) => update_many(&tx, &user_id, names, config.match_policy)?,
        Selection::All => update_all(&tx, &user_id, BulkPolicy::All)?,
        Selection::AllUnowned => {
            // Always collected for this selection
            let known_ids = known_ids.unwrap_or_default();
            update_all(&tx, &user_id, BulkPolicy::UnownedOnly(&known_ids))?
        }
    };

    tx.commit()?;
    info!(
        "Committed ownership change of {} playlists in {:?}",
        report.updated.len(),
        db.path()
    );

    Ok(ChownOutcome {
        username: config.username.clone(),
        user_id,
        report,
    })
}

/// Runs the change against the Jellyfin server named in the config.
pub fn execute(config: &AppConfig) -> ChownResult<ChownOutcome> {
    let client = JellyfinClient::new(&config.server_url, &config.api_key)?;
    run(config, &client)
}
