use serde::{Deserialize, Serialize};

use super::Resource;
use crate::de;

/// A role from `GET /roles` or `GET /employees/{id}/roles`.
///
/// Relationships: `organization` (owner), `organizations` and `groups`
/// (scopes the role grants access to).
pub type Role = Resource<RoleAttributes>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::bool_or_false")]
    pub is_default: bool,
    #[serde(default, deserialize_with = "de::bool_or_false")]
    pub is_admin_role: bool,
}
