//! Employee listing and per-employee detail types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Resource;
use crate::de;

/// An employee from `GET /employees`.
///
/// Relationships: `organization` (with the organization name in `meta`).
pub type Employee = Resource<EmployeeAttributes>;

/// `GET /employees/{id}/workspace`.
pub type Workspace = Resource<WorkspaceAttributes>;

/// One entry of `GET /api/em/v2/datasources/{id}`.
pub type DataSource = Resource<DataSourceAttributes>;

/// One entry of `GET /employees/{id}/preferences`; the resource id is the preference key.
pub type Preference = Resource<PreferenceAttributes>;

/// One entry of `GET /employees/{id}/skills`.
///
/// Relationships: `skill` (with the skill name in `meta`).
pub type SkillAssignment = Resource<SkillAssignmentAttributes>;

/// One entry of `GET /employees/{id}/user-defined-fields`.
pub type EmployeeUdf = Resource<EmployeeUdfAttributes>;

/// `GET /employees/{id}/supervisor` and `GET /employees/{id}/teamLead`.
pub type PersonRef = Resource<PersonName>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttributes {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub employee_number: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub employee_type: Option<String>,
    #[serde(default)]
    pub is_supervisor: Option<bool>,
    #[serde(default)]
    pub is_team_lead: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub organization_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub person: Person,
    #[serde(default, deserialize_with = "de::null_default")]
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub middle_initial: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub birth_date: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub contact: Contact,
    #[serde(default, deserialize_with = "de::null_default")]
    pub address: Address,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub desktop_messaging_username: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub home_phone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub work_phone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub cell_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address_line1: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address_line2: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub address_line3: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub state_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceAttributes {
    #[serde(default, deserialize_with = "de::null_default")]
    pub assets: Vec<WorkspaceAsset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceAsset {
    #[serde(rename = "dataSourceID", default, deserialize_with = "de::opt_string")]
    pub data_source_id: Option<String>,
    #[serde(rename = "loginName", default, deserialize_with = "de::opt_string")]
    pub login_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourceAttributes {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceAttributes {
    #[serde(default)]
    pub value: Option<Value>,
}

/// Dated skill assignment attributes.
///
/// The API has been seen to spell the date and reserve-level keys both in
/// camelCase and snake_case, so both spellings are kept and resolved by the
/// accessor methods (snake_case wins when both are non-empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillAssignmentAttributes {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub proficiency: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub priority: Option<String>,
    #[serde(rename = "start_date", default, deserialize_with = "de::opt_string")]
    pub start_date_snake: Option<String>,
    #[serde(rename = "startDate", default, deserialize_with = "de::opt_string")]
    pub start_date_camel: Option<String>,
    #[serde(rename = "end_date", default, deserialize_with = "de::opt_string")]
    pub end_date_snake: Option<String>,
    #[serde(rename = "endDate", default, deserialize_with = "de::opt_string")]
    pub end_date_camel: Option<String>,
    #[serde(rename = "reserveLevel", default, deserialize_with = "de::opt_string")]
    pub reserve_level_camel: Option<String>,
    #[serde(rename = "reserve_level", default, deserialize_with = "de::opt_string")]
    pub reserve_level_snake: Option<String>,
}

fn first_non_empty<'a>(a: &'a Option<String>, b: &'a Option<String>) -> Option<&'a str> {
    a.as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| b.as_deref().filter(|s| !s.is_empty()))
}

impl SkillAssignmentAttributes {
    pub fn start_date(&self) -> Option<&str> {
        first_non_empty(&self.start_date_snake, &self.start_date_camel)
    }

    pub fn end_date(&self) -> Option<&str> {
        first_non_empty(&self.end_date_snake, &self.end_date_camel)
    }

    pub fn reserve_level(&self) -> Option<&str> {
        first_non_empty(&self.reserve_level_camel, &self.reserve_level_snake)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUdfAttributes {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    #[serde(default, deserialize_with = "de::string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "de::string")]
    pub last_name: String,
}

impl PersonName {
    /// `"First Last"` with surrounding whitespace removed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skill_dates_accept_both_spellings() {
        let camel: SkillAssignmentAttributes =
            serde_json::from_value(json!({"startDate": "2024-01-01", "endDate": "2025-01-01"}))
                .unwrap();
        assert_eq!(camel.start_date(), Some("2024-01-01"));
        assert_eq!(camel.end_date(), Some("2025-01-01"));

        let snake: SkillAssignmentAttributes =
            serde_json::from_value(json!({"start_date": "2024-02-02", "end_date": "2025-02-02"}))
                .unwrap();
        assert_eq!(snake.start_date(), Some("2024-02-02"));
        assert_eq!(snake.end_date(), Some("2025-02-02"));
    }

    #[test]
    fn empty_spelling_falls_through_to_other() {
        let attrs: SkillAssignmentAttributes =
            serde_json::from_value(json!({"end_date": "", "endDate": "2030-01-01"})).unwrap();
        assert_eq!(attrs.end_date(), Some("2030-01-01"));

        let none: SkillAssignmentAttributes =
            serde_json::from_value(json!({"end_date": null})).unwrap();
        assert_eq!(none.end_date(), None);
    }

    #[test]
    fn numeric_proficiency_is_kept_as_text() {
        let attrs: SkillAssignmentAttributes =
            serde_json::from_value(json!({"proficiency": 3, "priority": "1", "reserve_level": 2}))
                .unwrap();
        assert_eq!(attrs.proficiency.as_deref(), Some("3"));
        assert_eq!(attrs.priority.as_deref(), Some("1"));
        assert_eq!(attrs.reserve_level(), Some("2"));
    }

    #[test]
    fn display_name_trims() {
        let p = PersonName {
            first_name: " Ada ".into(),
            last_name: "".into(),
        };
        assert_eq!(p.display_name(), "Ada");
    }
}
