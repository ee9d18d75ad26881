//! Organization pass: flatten the organization forest and attach the skills,
//! user-defined fields and job titles defined directly on each organization.

use serde::Serialize;
use serde_json::Value;
use verint_api::types::{Document, Organization, Resource};
use verint_api::Client;

use crate::attempt::Diagnostics;
use crate::error::MigrateError;
use crate::hierarchy::{flatten, FlatRow, HierarchyIndex, NodeEnricher, OverflowPolicy};

pub const ORG_SKILLS: &str = "organization skills";
pub const ORG_UDFS: &str = "organization UDFs";
pub const ORG_JOB_TITLES: &str = "organization job titles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSkill {
    pub name: String,
    pub media: String,
    pub description: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUdf {
    pub name: String,
    pub description: String,
    pub udf_type: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgJobTitle {
    pub name: String,
    pub description: String,
}

/// Per-organization row payload.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDetail {
    pub description: String,
    pub time_zone: String,
    pub week_start_day: String,
    pub seats_number: String,
    pub location: String,
    pub skills: Vec<OrgSkill>,
    pub udfs: Vec<OrgUdf>,
    pub job_titles: Vec<OrgJobTitle>,
}

/// Keeps entries whose owning `organization` relationship is `org_id`.
///
/// The endpoints also return entries inherited from ancestors; those carry
/// the ancestor's id and are dropped.
fn owned_by<'a, A: 'a>(
    entries: Vec<Resource<A>>,
    org_id: &'a str,
) -> impl Iterator<Item = Resource<A>> + 'a {
    entries.into_iter().filter(move |entry| {
        entry
            .relationships
            .one("organization")
            .is_some_and(|owner| owner.id == org_id)
    })
}

/// Fetches direct skills, UDFs and job titles; each independently recoverable.
pub struct OrganizationEnricher<'a> {
    client: &'a Client,
    diagnostics: Diagnostics,
}

impl<'a> OrganizationEnricher<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

impl NodeEnricher<Organization> for OrganizationEnricher<'_> {
    type Payload = OrganizationDetail;

    async fn enrich(&mut self, org: &Organization) -> OrganizationDetail {
        let id = org.id.as_str();
        let skills: Document<Vec<_>> = self
            .diagnostics
            .attempt(ORG_SKILLS, id, self.client.organization_skills(id))
            .await;
        let udfs: Document<Vec<_>> = self
            .diagnostics
            .attempt(ORG_UDFS, id, self.client.organization_udfs(id))
            .await;
        let job_titles: Document<Vec<_>> = self
            .diagnostics
            .attempt(ORG_JOB_TITLES, id, self.client.organization_job_titles(id))
            .await;

        let attrs = &org.attributes;
        OrganizationDetail {
            description: attrs.description.clone(),
            time_zone: attrs.time_zone.clone(),
            week_start_day: attrs.week_start_day.clone(),
            seats_number: attrs.seats_number.clone(),
            location: attrs.location.clone(),
            skills: owned_by(skills.data, id)
                .map(|s| OrgSkill {
                    name: s.attributes.name,
                    media: s.attributes.media,
                    description: s.attributes.description,
                    is_active: s.attributes.is_active,
                })
                .collect(),
            udfs: owned_by(udfs.data, id)
                .map(|u| OrgUdf {
                    name: u.attributes.name,
                    description: u.attributes.description,
                    udf_type: u.attributes.udf_type,
                    values: u.attributes.values,
                })
                .collect(),
            job_titles: owned_by(job_titles.data, id)
                .map(|j| OrgJobTitle {
                    name: j.attributes.name,
                    description: j.attributes.description,
                })
                .collect(),
        }
    }
}

/// Output of the organization pass.
pub struct OrganizationExtraction {
    pub rows: Vec<FlatRow<OrganizationDetail>>,
    pub diagnostics: Diagnostics,
}

/// Runs the organization pass over an already-fetched `GET /organizations` response.
pub async fn extract_organizations(
    client: &Client,
    listing: Value,
    policy: OverflowPolicy,
) -> Result<OrganizationExtraction, MigrateError> {
    let doc: Document<Vec<Organization>> = verint_api::decode("organizations", listing)?;
    let index = HierarchyIndex::build(doc.data);
    tracing::info!("Flattening {} organizations", index.len());

    let mut enricher = OrganizationEnricher::new(client);
    let rows = flatten(&index, &mut enricher, policy).await?;
    let diagnostics = enricher.into_diagnostics();

    tracing::info!(
        "Organization pass complete: {} rows, {} enrichment failures",
        rows.len(),
        diagnostics.len()
    );
    Ok(OrganizationExtraction { rows, diagnostics })
}
