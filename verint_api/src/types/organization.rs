//! Organization listing and per-organization detail types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use crate::de;

/// An organization from `GET /organizations`.
pub type Organization = Resource<OrganizationAttributes>;

/// A skill from `GET /organizations/{id}/skills`.
pub type OrganizationSkill = Resource<OrganizationSkillAttributes>;

/// A user-defined field from `GET /organizations/{id}/user-defined-fields`.
pub type OrganizationUdf = Resource<OrganizationUdfAttributes>;

/// A job title from `GET /organizations/{id}/jobTitles` or `GET /employees/{id}/jobTitle`.
pub type JobTitle = Resource<JobTitleAttributes>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    /// Absent or `null` for root organizations.
    #[serde(default, deserialize_with = "de::opt_string")]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "de::string")]
    pub time_zone: String,
    #[serde(default, deserialize_with = "de::string")]
    pub week_start_day: String,
    #[serde(default, deserialize_with = "de::string")]
    pub seats_number: String,
    #[serde(default, deserialize_with = "de::string")]
    pub location: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSkillAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub media: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::bool_or_false")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUdfAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
    #[serde(default, deserialize_with = "de::string")]
    pub udf_type: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTitleAttributes {
    #[serde(default, deserialize_with = "de::string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub description: String,
}
