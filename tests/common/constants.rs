//! Shared test constants

#![allow(dead_code)]

pub const API_KEY: &str = "0123456789abcdef0123456789abcdef";

pub const ALICE_NAME: &str = "alice";
pub const ALICE_ID: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

pub const BOB_NAME: &str = "Bob";
pub const BOB_ID: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// An owner id that belongs to no user of the fake server.
pub const DELETED_USER_ID: &str = "deadbeefdeadbeefdeadbeefdeadbeef";

pub const PLAYLIST_TYPE: &str = "MediaBrowser.Controller.Playlists.Playlist";
