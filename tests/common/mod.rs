//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{create_library_db, playlist_document, FakeJellyfin, ALICE_ID};
//!
//! #[test]
//! fn test_something() {
//!     let server = FakeJellyfin::spawn();
//!     let (_dir, db_path) = create_library_db(&[("Chill", playlist_document("Chill", ALICE_ID))]);
//! }
//! ```

mod constants;
#[path = "../../src/library/test_support.rs"]
mod fixtures;
mod server;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{
    create_library_db, insert_item, playlist_document, read_playlist_document, read_raw_data,
    ALBUM_TYPE,
};
pub use server::FakeJellyfin;
