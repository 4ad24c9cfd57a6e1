use super::document::PlaylistDocument;
use super::schema::{PLAYLIST_TYPE, TYPED_BASE_ITEMS};
use crate::error::{ChownError, ChownResult};
use crate::users::UserIdSet;
use rusqlite::types::ValueRef;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// What to do when some of the requested playlists do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Abort without writing anything.
    Strict,
    /// Warn and update the playlists that were found.
    Lenient,
}

/// Which playlists a bulk update rewrites.
#[derive(Debug, Clone, Copy)]
pub enum BulkPolicy<'a> {
    All,
    /// Only playlists whose owner is none of the given users.
    UnownedOnly(&'a UserIdSet),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Names of the rewritten playlists, one entry per row.
    pub updated: Vec<String>,
    /// Requested names that matched no playlist.
    pub missing: Vec<String>,
}

struct PlaylistRow {
    rowid: i64,
    name: String,
    data: Option<Vec<u8>>,
}

impl PlaylistRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        // Jellyfin writes BLOBs, but TEXT is accepted too
        let data = match row.get_ref(2)? {
            ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Some(bytes.to_vec()),
            ValueRef::Null => None,
            other => {
                return Err(rusqlite::Error::InvalidColumnType(
                    2,
                    "data".to_string(),
                    other.data_type(),
                ))
            }
        };
        Ok(PlaylistRow {
            rowid: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            data,
        })
    }

    fn document(&self) -> ChownResult<PlaylistDocument> {
        match &self.data {
            Some(raw) => PlaylistDocument::parse(&self.name, raw),
            None => Err(ChownError::malformed_document(
                &self.name,
                "the data column is NULL",
            )),
        }
    }
}

/// A rewritten document waiting to be written back.
struct StagedWrite {
    rowid: i64,
    name: String,
    data: Vec<u8>,
}

fn stage_owner_change(
    row: &PlaylistRow,
    mut document: PlaylistDocument,
    owner_id: &str,
) -> ChownResult<StagedWrite> {
    debug!(
        "Playlist '{}' (rowid {}): owner {:?} -> {}",
        row.name,
        row.rowid,
        document.owner_user_id(),
        owner_id
    );
    document.set_owner_user_id(owner_id);
    Ok(StagedWrite {
        rowid: row.rowid,
        name: row.name.clone(),
        data: document.to_bytes(&row.name)?,
    })
}

/// Playlist rows, optionally restricted to the given names.
fn select_playlists(conn: &Connection, names: Option<&[&str]>) -> ChownResult<Vec<PlaylistRow>> {
    let rows = match names {
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT rowid, Name, data FROM {} WHERE type = ?1 ORDER BY rowid",
                TYPED_BASE_ITEMS.name
            ))?;
            let rows = stmt
                .query_map(params![PLAYLIST_TYPE], PlaylistRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
        Some(names) => {
            let placeholders = vec!["?"; names.len()].join(", ");
            let mut stmt = conn.prepare(&format!(
                "SELECT rowid, Name, data FROM {} WHERE type = ? AND Name IN ({}) ORDER BY rowid",
                TYPED_BASE_ITEMS.name, placeholders
            ))?;
            let query_params = std::iter::once(PLAYLIST_TYPE).chain(names.iter().copied());
            let rows = stmt
                .query_map(params_from_iter(query_params), PlaylistRow::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        }
    };
    Ok(rows)
}

/// Writes every staged document. Nothing is written unless all of them
/// were staged successfully, and the caller owns the commit.
fn write_staged(tx: &Transaction<'_>, writes: Vec<StagedWrite>) -> ChownResult<Vec<String>> {
    let mut stmt = tx.prepare_cached(&format!(
        "UPDATE {} SET data = ?1 WHERE rowid = ?2",
        TYPED_BASE_ITEMS.name
    ))?;
    let mut updated = Vec::with_capacity(writes.len());
    for write in writes {
        stmt.execute(params![write.data, write.rowid])?;
        updated.push(write.name);
    }
    Ok(updated)
}

fn stage_all(rows: &[PlaylistRow], owner_id: &str) -> ChownResult<Vec<StagedWrite>> {
    rows.iter()
        .map(|row| stage_owner_change(row, row.document()?, owner_id))
        .collect()
}

/// Gives the playlist named `playlist` to `owner_id`.
pub fn update_single(
    tx: &Transaction<'_>,
    owner_id: &str,
    playlist: &str,
) -> ChownResult<UpdateReport> {
    let rows = select_playlists(tx, Some(&[playlist]))?;
    if rows.is_empty() {
        return Err(ChownError::PlaylistNotFound(playlist.to_string()));
    }
    if rows.len() > 1 {
        warn!(
            "{} playlists are named '{}', all of them will be updated",
            rows.len(),
            playlist
        );
    }

    let writes = stage_all(&rows, owner_id)?;
    let updated = write_staged(tx, writes)?;
    info!("Updated owner of playlist '{}'", playlist);
    Ok(UpdateReport {
        updated,
        missing: vec![],
    })
}

/// Gives every playlist named in `playlists` to `owner_id`.
pub fn update_many(
    tx: &Transaction<'_>,
    owner_id: &str,
    playlists: &[String],
    policy: MatchPolicy,
) -> ChownResult<UpdateReport> {
    let mut seen = HashSet::new();
    let requested: Vec<&str> = playlists
        .iter()
        .map(String::as_str)
        .filter(|name| seen.insert(*name))
        .collect();
    if requested.is_empty() {
        return Ok(UpdateReport::default());
    }

    let rows = select_playlists(tx, Some(&requested))?;

    let found: HashSet<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    let missing: Vec<String> = requested
        .iter()
        .filter(|name| !found.contains(*name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        match policy {
            MatchPolicy::Strict => return Err(ChownError::PlaylistsNotFound { missing }),
            MatchPolicy::Lenient => warn!(
                "Playlists not found, continuing without them: {}",
                missing.join(", ")
            ),
        }
    }

    let writes = stage_all(&rows, owner_id)?;
    let updated = write_staged(tx, writes)?;
    info!("Updated owner of {} playlists", updated.len());
    Ok(UpdateReport { updated, missing })
}

/// Gives every playlist, or every playlist without a known owner, to `owner_id`.
pub fn update_all(
    tx: &Transaction<'_>,
    owner_id: &str,
    policy: BulkPolicy<'_>,
) -> ChownResult<UpdateReport> {
    let rows = select_playlists(tx, None)?;
    debug!("Found {} playlists", rows.len());

    let mut writes = Vec::with_capacity(rows.len());
    for row in &rows {
        let document = row.document()?;
        if let BulkPolicy::UnownedOnly(known_ids) = policy {
            if let Some(current_owner) = document.owner_user_id() {
                if known_ids.contains(current_owner) {
                    debug!(
                        "Skipping playlist '{}', owned by known user {}",
                        row.name, current_owner
                    );
                    continue;
                }
            }
        }
        writes.push(stage_owner_change(row, document, owner_id)?);
    }

    let updated = write_staged(tx, writes)?;
    info!(
        "Updated owner of {} out of {} playlists",
        updated.len(),
        rows.len()
    );
    Ok(UpdateReport {
        updated,
        missing: vec![],
    })
}
