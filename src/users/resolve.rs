use super::client::UserDirectory;
use super::models::{ServerUser, UserIdSet};
use crate::error::{ChownError, ChownResult};
use tracing::info;

/// The user that will own the playlists.
#[derive(Debug, Clone)]
pub struct ResolvedOwner {
    pub user_id: String,
    /// Ids of every user on the server, only collected when asked for.
    pub known_ids: Option<UserIdSet>,
}

/// Exact, case-sensitive lookup of a username.
pub fn find_user_id<'a>(users: &'a [ServerUser], username: &str) -> Option<&'a str> {
    users
        .iter()
        .find(|user| user.name == username)
        .map(|user| user.id.as_str())
}

/// Fetches the user list once and resolves `username` against it.
pub fn resolve_owner(
    directory: &dyn UserDirectory,
    username: &str,
    include_known_ids: bool,
) -> ChownResult<ResolvedOwner> {
    let users = directory.fetch_users()?;

    let user_id = find_user_id(&users, username)
        .ok_or_else(|| ChownError::UserNotFound(username.to_string()))?
        .to_string();
    info!("Resolved user '{}' to id {}", username, user_id);

    let known_ids = include_known_ids.then(|| users.iter().map(|user| &user.id).collect());

    Ok(ResolvedOwner { user_id, known_ids })
}
