//! Resolution of Jellyfin usernames into user ids, through the server's
//! `/Users` endpoint.

mod client;
mod models;
mod resolve;

pub use client::{JellyfinClient, UserDirectory};
pub use models::{normalize_user_id, ServerUser, UserIdSet};
pub use resolve::{find_user_id, resolve_owner, ResolvedOwner};
