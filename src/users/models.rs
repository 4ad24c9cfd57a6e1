use serde::Deserialize;
use std::collections::HashSet;

/// A user as listed by the server. Everything but the name and id is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerUser {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Id")]
    pub id: String,
}

/// Canonical form of a user id: lowercase hex without dashes, which is
/// how the server reports ids.
pub fn normalize_user_id(id: &str) -> String {
    id.chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// The set of ids of every user known to the server.
#[derive(Debug, Clone, Default)]
pub struct UserIdSet {
    ids: HashSet<String>,
}

impl UserIdSet {
    pub fn contains(&self, id: &str) -> bool {
        !id.is_empty() && self.ids.contains(&normalize_user_id(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for UserIdSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        UserIdSet {
            ids: iter
                .into_iter()
                .map(|id| normalize_user_id(id.as_ref()))
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let body = r#"[
            {"Name": "alice", "Id": "aaaa", "ServerId": "x", "HasPassword": true},
            {"Name": "bob", "Id": "bbbb", "Policy": {"IsAdministrator": false}}
        ]"#;
        let users: Vec<ServerUser> = serde_json::from_str(body).unwrap();
        assert_eq!(
            users,
            vec![
                ServerUser {
                    name: "alice".to_string(),
                    id: "aaaa".to_string()
                },
                ServerUser {
                    name: "bob".to_string(),
                    id: "bbbb".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_deserialize_requires_name_and_id() {
        let body = r#"[{"Name": "alice"}]"#;
        assert!(serde_json::from_str::<Vec<ServerUser>>(body).is_err());
    }

    #[test]
    fn test_user_id_set_matches_hyphenated_and_uppercase_ids() {
        let ids: UserIdSet = ["4f1c9a0e2b7d4e8f9a6b3c2d1e0f9a8b"].into_iter().collect();
        assert!(ids.contains("4f1c9a0e2b7d4e8f9a6b3c2d1e0f9a8b"));
        assert!(ids.contains("4F1C9A0E-2B7D-4E8F-9A6B-3C2D1E0F9A8B"));
        assert!(!ids.contains("00000000000000000000000000000000"));
        assert!(!ids.contains(""));
        assert_eq!(ids.len(), 1);
    }
}
