//! Access to the playlists stored in Jellyfin's `library.db`.

mod document;
mod schema;
mod store;
mod updater;

#[cfg(test)]
pub(crate) mod test_support;

pub use document::PlaylistDocument;
pub use schema::{ItemTable, OWNER_USER_ID_FIELD, PLAYLIST_TYPE, TYPED_BASE_ITEMS};
pub use store::LibraryDb;
pub use updater::{update_all, update_many, update_single, BulkPolicy, MatchPolicy, UpdateReport};
