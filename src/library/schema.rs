use crate::error::{ChownError, ChownResult};
use rusqlite::{params, Connection};

/// Jellyfin's generic item table. Its schema belongs to the server, this
/// tool only checks that the columns it touches are there.
pub struct ItemTable {
    pub name: &'static str,
    pub required_columns: &'static [&'static str],
}

pub const TYPED_BASE_ITEMS: ItemTable = ItemTable {
    name: "TypedBaseItems",
    required_columns: &["type", "Name", "data"],
};

/// Value of the `type` discriminator for playlist rows.
pub const PLAYLIST_TYPE: &str = "MediaBrowser.Controller.Playlists.Playlist";

/// Field of the playlist document holding the owner's user id.
pub const OWNER_USER_ID_FIELD: &str = "OwnerUserId";

impl ItemTable {
    pub fn validate(&self, conn: &Connection) -> ChownResult<()> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", self.name))?;
        let actual_columns = stmt
            .query_map(params![], |row| row.get::<usize, String>(1))?
            .collect::<Result<Vec<String>, _>>()?;

        // SQLite column names are case-insensitive
        let missing_columns: Vec<&'static str> = self
            .required_columns
            .iter()
            .filter(|expected| {
                !actual_columns
                    .iter()
                    .any(|actual| actual.eq_ignore_ascii_case(expected))
            })
            .copied()
            .collect();

        if !missing_columns.is_empty() {
            return Err(ChownError::UnexpectedSchema {
                table: self.name,
                missing_columns,
            });
        }
        Ok(())
    }
}
