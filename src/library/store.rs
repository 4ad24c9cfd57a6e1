use super::schema::TYPED_BASE_ITEMS;
use crate::error::{ChownError, ChownResult};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::{Path, PathBuf};
use tracing::info;

/// An open Jellyfin library database.
///
/// The connection is closed when this is dropped. Any transaction that was
/// not committed by then is rolled back.
pub struct LibraryDb {
    conn: Connection,
    path: PathBuf,
}

impl LibraryDb {
    /// Opens an existing library database. The file is never created.
    pub fn open<T: AsRef<Path>>(db_path: T) -> ChownResult<Self> {
        let path = db_path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ChownError::DatabaseMissing(path));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| ChownError::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Opening is lazy, a file that is not a database only fails here
        TYPED_BASE_ITEMS.validate(&conn).map_err(|err| match err {
            ChownError::Database(source) => ChownError::DatabaseOpen {
                path: path.clone(),
                source,
            },
            other => other,
        })?;

        info!("Opened library database at {:?}", path);
        Ok(LibraryDb { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn transaction(&mut self) -> ChownResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }
}
