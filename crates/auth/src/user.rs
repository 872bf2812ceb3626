use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use stockroom_core::{Entity, UserId};

use crate::Role;

/// A user as returned by the backend.
///
/// Users are immutable on the client: a re-login replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,

    /// `None` when the backend omitted the role or sent something other
    /// than a string.
    #[serde(
        default,
        deserialize_with = "lenient_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,
}

impl User {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Option<Role>,
    ) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_admin)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(name)) => Some(Role::new(name)),
        _ => None,
    })
}
