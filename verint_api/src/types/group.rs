//! Group listing and group roster types.

use serde::{Deserialize, Serialize};

use super::Resource;
use crate::de;

/// A group from `GET /groups`.
pub type Group = Resource<GroupAttributes>;

/// An employee from `GET /groups/{id}/employees`.
pub type GroupMember = Resource<MemberAttributes>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    /// Absent or `null` for root groups.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub group_type: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub middle_initial: String,
}
