//! Fixtures for tests that need a library database on disk.
//!
//! Shared by the unit tests and the integration tests (included there from
//! `tests/common`), so it only depends on external crates.

#![allow(dead_code)]

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PLAYLIST_TYPE: &str = "MediaBrowser.Controller.Playlists.Playlist";
pub const ALBUM_TYPE: &str = "MediaBrowser.Controller.Entities.Audio.MusicAlbum";

/// Trimmed down version of the table Jellyfin creates.
const CREATE_TYPED_BASE_ITEMS: &str = "CREATE TABLE TypedBaseItems (
    guid GUID PRIMARY KEY NOT NULL,
    type TEXT NOT NULL,
    data BLOB NULL,
    ParentId GUID NULL,
    Path TEXT NULL,
    StartDate DATETIME NULL,
    EndDate DATETIME NULL,
    ChannelId Text NULL,
    IsMovie BIT NULL,
    Name TEXT NULL
)";

/// Creates a library database holding one playlist row per entry, laid out
/// like a Jellyfin data directory: the database is `<temp_dir>/data/library.db`.
pub fn create_library_db(playlists: &[(&str, Value)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("data").join("library.db");
    std::fs::create_dir_all(db_path.parent().unwrap()).unwrap();

    let conn = Connection::open(&db_path).unwrap();
    conn.execute(CREATE_TYPED_BASE_ITEMS, params![]).unwrap();
    for (name, document) in playlists {
        let raw = serde_json::to_vec(document).unwrap();
        insert_item(&conn, PLAYLIST_TYPE, name, Some(&raw));
    }

    (temp_dir, db_path)
}

pub fn insert_item(conn: &Connection, item_type: &str, name: &str, data: Option<&[u8]>) {
    let next_id: i64 = conn
        .query_row("SELECT COUNT(*) + 1 FROM TypedBaseItems", params![], |row| {
            row.get(0)
        })
        .unwrap();
    conn.execute(
        "INSERT INTO TypedBaseItems (guid, type, data, Name) VALUES (?1, ?2, ?3, ?4)",
        params![format!("{:032x}", next_id), item_type, data, name],
    )
    .unwrap();
}

/// Raw `data` column of the first row of the given type and name.
pub fn read_raw_data(db_path: &Path, item_type: &str, name: &str) -> Option<Vec<u8>> {
    let conn = Connection::open(db_path).unwrap();
    conn.query_row(
        "SELECT data FROM TypedBaseItems WHERE type = ?1 AND Name = ?2 ORDER BY rowid",
        params![item_type, name],
        |row| row.get::<_, Vec<u8>>(0),
    )
    .optional()
    .unwrap()
}

pub fn read_playlist_document(db_path: &Path, name: &str) -> Value {
    let raw = read_raw_data(db_path, PLAYLIST_TYPE, name).unwrap();
    serde_json::from_slice(&raw).unwrap()
}

/// A playlist document shaped like the ones Jellyfin stores. It carries a
/// float that needs all 17 significant digits and an integer wider than
/// u64, so any lossy rewrite shows up in comparisons.
pub fn playlist_document(name: &str, owner: &str) -> Value {
    let mut document = json!({
        "OwnerUserId": owner,
        "Shares": [],
        "PlaylistMediaType": "Audio",
        "LinkedChildren": [
            {"Path": format!("/music/{}/01.flac", name), "ItemId": null},
            {"Path": format!("/music/{}/02.flac", name), "ItemId": null}
        ],
        "IsRoot": false,
        "Name": name,
        "DateCreated": "2024-05-01T10:00:00.0000000Z",
        "ProviderIds": {}
    });
    document["CommunityRating"] = serde_json::from_str("9.976354335106961").unwrap();
    document["ExternalSerial"] = serde_json::from_str("123456789012345678901234567890").unwrap();
    document
}
