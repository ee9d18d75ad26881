//! Roles pass.

use serde::Serialize;
use serde_json::Value;
use verint_api::types::{Document, Role};

use crate::error::MigrateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub is_admin_role: bool,
    /// Name of the organization that owns the role.
    pub organization_name: String,
}

impl From<Role> for RoleRecord {
    fn from(role: Role) -> Self {
        let organization_name = role
            .relationships
            .one("organization")
            .and_then(|org| org.meta.name.clone())
            .unwrap_or_default();
        Self {
            name: role.attributes.name,
            description: role.attributes.description,
            is_default: role.attributes.is_default,
            is_admin_role: role.attributes.is_admin_role,
            organization_name,
        }
    }
}

/// Converts an already-fetched `GET /roles` response into records.
pub fn role_records(listing: Value) -> Result<Vec<RoleRecord>, MigrateError> {
    let doc: Document<Vec<Role>> = verint_api::decode("roles", listing)?;
    let records: Vec<RoleRecord> = doc.data.into_iter().map(RoleRecord::from).collect();
    tracing::info!("Roles pass complete: {} roles", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_records_take_owner_name_from_relationship_meta() {
        let records = role_records(json!({
            "data": [
                {"id": "r1", "attributes": {"name": "Admin", "isAdminRole": true},
                 "relationships": {"organization": {"data": {"id": "1", "meta": {"name": "Head Office"}}}}},
                {"id": "r2", "attributes": {"name": "Agent", "description": "Front line", "isDefault": true}}
            ]
        }))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].organization_name, "Head Office");
        assert!(records[0].is_admin_role);
        assert!(!records[0].is_default);
        assert_eq!(records[1].organization_name, "");
        assert_eq!(records[1].description, "Front line");
        assert!(records[1].is_default);
    }

    #[test]
    fn empty_listing_yields_no_records() {
        assert!(role_records(json!({"data": []})).unwrap().is_empty());
        assert!(role_records(json!({})).unwrap().is_empty());
    }
}
