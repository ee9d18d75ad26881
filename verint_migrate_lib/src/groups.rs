//! Group pass: flatten the group forest, attach each group's roster, and
//! collect employee → group memberships along the way.

use serde::Serialize;
use serde_json::Value;
use verint_api::types::{Document, Group};
use verint_api::Client;

use crate::attempt::Diagnostics;
use crate::error::MigrateError;
use crate::hierarchy::{flatten, FlatRow, HierarchyIndex, NodeEnricher, OverflowPolicy};
use crate::membership::{GroupMembershipIndex, GroupRef};

pub const GROUP_MEMBERS: &str = "group members";

/// A roster entry exported in the "Group Members" column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
}

/// Per-group row payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub description: String,
    /// Group types joined with `", "`.
    pub group_type: String,
    pub members: Vec<MemberSummary>,
}

/// Fetches each group's roster and records the memberships it reveals.
pub struct GroupEnricher<'a> {
    client: &'a Client,
    memberships: GroupMembershipIndex,
    diagnostics: Diagnostics,
}

impl<'a> GroupEnricher<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            memberships: GroupMembershipIndex::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn into_parts(self) -> (GroupMembershipIndex, Diagnostics) {
        (self.memberships, self.diagnostics)
    }
}

impl NodeEnricher<Group> for GroupEnricher<'_> {
    type Payload = GroupDetail;

    async fn enrich(&mut self, group: &Group) -> GroupDetail {
        let roster = self
            .diagnostics
            .attempt(GROUP_MEMBERS, &group.id, self.client.group_employees(&group.id))
            .await;

        for member in &roster.data {
            self.memberships.record(
                &member.id,
                GroupRef {
                    id: group.id.clone(),
                    name: group.attributes.name.clone(),
                },
            );
        }

        GroupDetail {
            description: group.attributes.description.clone(),
            group_type: group.attributes.group_type.join(", "),
            members: roster
                .data
                .into_iter()
                .map(|m| MemberSummary {
                    id: m.id,
                    first_name: m.attributes.first_name,
                    last_name: m.attributes.last_name,
                    middle_initial: m.attributes.middle_initial,
                })
                .collect(),
        }
    }
}

/// Output of the group pass.
pub struct GroupExtraction {
    pub rows: Vec<FlatRow<GroupDetail>>,
    /// Consumed by the employee pass.
    pub memberships: GroupMembershipIndex,
    pub diagnostics: Diagnostics,
}

/// Runs the group pass over an already-fetched `GET /groups` response.
pub async fn extract_groups(
    client: &Client,
    listing: Value,
    policy: OverflowPolicy,
) -> Result<GroupExtraction, MigrateError> {
    let doc: Document<Vec<Group>> = verint_api::decode("groups", listing)?;
    let index = HierarchyIndex::build(doc.data);
    tracing::info!("Flattening {} groups", index.len());

    let mut enricher = GroupEnricher::new(client);
    let rows = flatten(&index, &mut enricher, policy).await?;
    let (memberships, diagnostics) = enricher.into_parts();

    tracing::info!(
        "Group pass complete: {} rows, {} employees with memberships, {} roster failures",
        rows.len(),
        memberships.employee_count(),
        diagnostics.count(GROUP_MEMBERS)
    );
    Ok(GroupExtraction {
        rows,
        memberships,
        diagnostics,
    })
}
