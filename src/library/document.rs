//! The JSON document stored in a playlist row's `data` column.
//!
//! Jellyfin serializes the whole playlist item into that column. Only the
//! owner field matters here, so the document is kept as a generic map and
//! every other field goes back untouched.

use super::schema::OWNER_USER_ID_FIELD;
use crate::error::{ChownError, ChownResult};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistDocument {
    fields: Map<String, Value>,
}

impl PlaylistDocument {
    /// Parses the raw column content. `playlist` only names the row in errors.
    pub fn parse(playlist: &str, raw: &[u8]) -> ChownResult<Self> {
        let text = std::str::from_utf8(raw)
            .map_err(|err| ChownError::malformed_document(playlist, err))?;
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Ok(PlaylistDocument { fields }),
            Ok(_) => Err(ChownError::malformed_document(
                playlist,
                "expected a JSON object",
            )),
            Err(err) => Err(ChownError::malformed_document(playlist, err)),
        }
    }

    /// Current owner id. Missing, null and non-string values all read as `None`.
    pub fn owner_user_id(&self) -> Option<&str> {
        self.fields.get(OWNER_USER_ID_FIELD).and_then(Value::as_str)
    }

    pub fn set_owner_user_id(&mut self, user_id: &str) {
        self.fields.insert(
            OWNER_USER_ID_FIELD.to_string(),
            Value::String(user_id.to_string()),
        );
    }

    pub fn to_bytes(&self, playlist: &str) -> ChownResult<Vec<u8>> {
        serde_json::to_vec(&self.fields).map_err(|err| ChownError::malformed_document(playlist, err))
    }
}
