//! Employee pass: one flat record per employee, with every per-employee
//! sub-fetch isolated so a failing lookup only blanks its own field.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use verint_api::types::{Document, Employee, PersonRef};
use verint_api::Client;

use crate::attempt::Diagnostics;
use crate::cache::LookupCache;
use crate::error::MigrateError;
use crate::membership::{GroupMembershipIndex, GroupRef};
use crate::skills::{active_skills, ActiveSkill};

pub const JOB_TITLE: &str = "job title";
pub const WORKSPACE: &str = "workspace";
pub const DATA_SOURCE: &str = "data source";
pub const PREFERENCES: &str = "preferences";
pub const SKILLS: &str = "skills";
pub const UDFS: &str = "user-defined fields";
pub const SUPERVISOR: &str = "supervisor";
pub const TEAM_LEAD: &str = "team lead";

/// Preference keys requested for every employee; anything else is ignored.
pub const PREFERENCE_KEYS: [&str; 8] = [
    "UserTimezone",
    "UserLanguage",
    "UserDefaultPageRows",
    "UserRegionalFormat",
    "UserAccessibilityComplianceMode",
    "UserShowOrgListHierarchical",
    "UserRepeatHeaderInterval",
    "UserLoginScreenName",
];

/// `{id, name}` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceValue {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UdfValue {
    pub name: Option<String>,
    pub value: Option<Value>,
}

/// One row of the employee sheet.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub username: Option<String>,
    pub user_status: Option<String>,
    pub employee_number: Option<String>,
    pub employee_type: Option<String>,
    pub job_title: Option<NamedRef>,
    pub is_supervisor: Option<bool>,
    pub is_team_lead: Option<bool>,
    pub organization_id: Option<String>,
    pub organization_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub desktop_messaging_username: Option<String>,
    pub supervisor: Option<NamedRef>,
    pub team_lead: Option<NamedRef>,
    pub home_phone: Option<String>,
    pub work_phone: Option<String>,
    pub cell_phone: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub birth_date: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    /// `"<data source name> - <login>"` entries joined by `", "`.
    pub workspace_logins: String,
    pub preferences: Vec<PreferenceValue>,
    pub skills: Vec<ActiveSkill>,
    pub udfs: Vec<UdfValue>,
    pub groups: Vec<GroupRef>,
}

fn person_ref(doc: Document<PersonRef>) -> Option<NamedRef> {
    let person = doc.data;
    if person.id.is_empty() {
        return None;
    }
    Some(NamedRef {
        name: person.attributes.display_name(),
        id: person.id,
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => s != "null",
        _ => true,
    }
}

/// Resolves per-employee detail through the API.
///
/// Data-source names are shared by many employees and are resolved once
/// through the [`LookupCache`].
pub struct EmployeeEnricher<'a> {
    client: &'a Client,
    cache: LookupCache,
    diagnostics: Diagnostics,
    reference_date: NaiveDate,
}

impl<'a> EmployeeEnricher<'a> {
    /// Skill activity is judged against today's UTC date.
    pub fn new(client: &'a Client) -> Self {
        Self::with_reference_date(client, Utc::now().date_naive())
    }

    pub fn with_reference_date(client: &'a Client, reference_date: NaiveDate) -> Self {
        Self {
            client,
            cache: LookupCache::new(),
            diagnostics: Diagnostics::new(),
            reference_date,
        }
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub async fn enrich(
        &mut self,
        employee: &Employee,
        memberships: &GroupMembershipIndex,
    ) -> EmployeeRecord {
        let id = employee.id.as_str();
        let client = self.client;

        let job_title = self
            .diagnostics
            .attempt(JOB_TITLE, id, client.employee_job_title(id))
            .await
            .data;
        let job_title = (!job_title.id.is_empty() && !job_title.attributes.name.is_empty())
            .then(|| NamedRef {
                id: job_title.id,
                name: job_title.attributes.name,
            });

        let workspace_logins = self.workspace_logins(id).await;

        let preferences = self
            .diagnostics
            .attempt(PREFERENCES, id, client.employee_preferences(id, &PREFERENCE_KEYS))
            .await
            .data
            .into_iter()
            .filter(|p| PREFERENCE_KEYS.contains(&p.id.as_str()))
            .filter_map(|p| {
                let value = p.attributes.value.filter(is_present)?;
                Some(PreferenceValue { name: p.id, value })
            })
            .collect();

        let assignments = self
            .diagnostics
            .attempt(SKILLS, id, client.employee_skills(id))
            .await
            .data;
        let skills = active_skills(&assignments, self.reference_date);
        tracing::debug!(
            "Employee {}: kept {} of {} skills after end-date filter",
            id,
            skills.len(),
            assignments.len()
        );

        let udfs = self
            .diagnostics
            .attempt(UDFS, id, client.employee_udfs(id))
            .await
            .data
            .into_iter()
            .map(|u| UdfValue {
                name: u.attributes.name,
                value: u.attributes.value,
            })
            .collect();

        let supervisor = person_ref(
            self.diagnostics
                .attempt(SUPERVISOR, id, client.employee_supervisor(id))
                .await,
        );
        let team_lead = person_ref(
            self.diagnostics
                .attempt(TEAM_LEAD, id, client.employee_team_lead(id))
                .await,
        );

        let attrs = &employee.attributes;
        let person = &attrs.person;
        let contact = &person.contact;
        let address = &person.address;
        EmployeeRecord {
            id: employee.id.clone(),
            username: attrs.user.username.clone(),
            user_status: attrs.user.status.clone(),
            employee_number: attrs.employee_number.clone(),
            employee_type: attrs.employee_type.clone(),
            job_title,
            is_supervisor: attrs.is_supervisor,
            is_team_lead: attrs.is_team_lead,
            organization_id: attrs.organization_id.clone(),
            organization_name: employee
                .relationships
                .one("organization")
                .and_then(|org| org.meta.name.clone()),
            first_name: person.first_name.clone(),
            middle_initial: person.middle_initial.clone(),
            last_name: person.last_name.clone(),
            email: contact.email.clone(),
            desktop_messaging_username: contact.desktop_messaging_username.clone(),
            supervisor,
            team_lead,
            home_phone: contact.home_phone.clone(),
            work_phone: contact.work_phone.clone(),
            cell_phone: contact.cell_phone.clone(),
            start_time: attrs.start_time.clone(),
            end_time: attrs.end_time.clone(),
            birth_date: person.birth_date.clone(),
            address_line1: address.address_line1.clone(),
            address_line2: address.address_line2.clone(),
            address_line3: address.address_line3.clone(),
            city: address.city.clone(),
            state: address.state_name.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
            workspace_logins,
            preferences,
            skills,
            udfs,
            groups: memberships.groups_for(id).to_vec(),
        }
    }

    /// Login names per data source, with data-source ids resolved to names.
    ///
    /// A data source that cannot be resolved is shown by its raw id and is
    /// retried for the next employee that references it.
    async fn workspace_logins(&mut self, employee_id: &str) -> String {
        let client = self.client;
        let workspace = self
            .diagnostics
            .attempt(WORKSPACE, employee_id, client.employee_workspace(employee_id))
            .await
            .data;

        let mut logins = Vec::with_capacity(workspace.attributes.assets.len());
        for asset in &workspace.attributes.assets {
            let login = asset.login_name.as_deref().unwrap_or("null");
            let source = match asset.data_source_id.as_deref() {
                None => "unknown".to_string(),
                Some(ds_id) => {
                    let resolved = self
                        .cache
                        .get_or_resolve(ds_id, || async move {
                            let doc = client.data_source(ds_id).await?;
                            let name = doc
                                .data
                                .into_iter()
                                .next()
                                .and_then(|ds| ds.attributes.name)
                                .unwrap_or_else(|| ds_id.to_string());
                            Ok::<_, verint_api::Error>(name)
                        })
                        .await;
                    match resolved {
                        Ok(name) => name,
                        Err(e) => {
                            self.diagnostics.record(DATA_SOURCE, ds_id, &e);
                            ds_id.to_string()
                        }
                    }
                }
            };
            logins.push(format!("{} - {}", source, login));
        }
        logins.join(", ")
    }
}

/// Parses an already-fetched `GET /employees` response.
pub fn parse_employees(listing: Value) -> Result<Vec<Employee>, MigrateError> {
    let doc: Document<Vec<Employee>> = verint_api::decode("employees", listing)?;
    Ok(doc.data)
}

/// Output of the employee pass.
pub struct EmployeeExtraction {
    pub records: Vec<EmployeeRecord>,
    pub diagnostics: Diagnostics,
}

/// Runs the employee pass, calling `on_record` after each employee.
pub async fn extract_employees<F>(
    client: &Client,
    listing: Value,
    memberships: &GroupMembershipIndex,
    mut on_record: F,
) -> Result<EmployeeExtraction, MigrateError>
where
    F: FnMut(&EmployeeRecord),
{
    let employees = parse_employees(listing)?;
    tracing::info!("Enriching {} employees", employees.len());

    let mut enricher = EmployeeEnricher::new(client);
    let mut records = Vec::with_capacity(employees.len());
    for employee in &employees {
        let record = enricher.enrich(employee, memberships).await;
        on_record(&record);
        records.push(record);
    }

    tracing::info!(
        "Employee pass complete: {} records, {} data sources resolved, {} enrichment failures",
        records.len(),
        enricher.cache().len(),
        enricher.diagnostics().len()
    );
    Ok(EmployeeExtraction {
        records,
        diagnostics: enricher.into_diagnostics(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_literal_null_preferences_are_not_present() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!("null")));
        assert!(is_present(&json!("")));
        assert!(is_present(&json!(25)));
        assert!(is_present(&json!(false)));
    }

    #[test]
    fn person_ref_requires_an_id() {
        let empty: Document<PersonRef> = serde_json::from_value(json!({"data": null})).unwrap();
        assert_eq!(person_ref(empty), None);

        let sup: Document<PersonRef> = serde_json::from_value(json!({
            "data": {"id": 77, "attributes": {"firstName": " Ada ", "lastName": "Lovelace"}}
        }))
        .unwrap();
        assert_eq!(
            person_ref(sup),
            Some(NamedRef {
                id: "77".into(),
                name: "Ada Lovelace".into()
            })
        );
    }

    #[test]
    fn parse_employees_rejects_non_document() {
        let err = parse_employees(json!({"data": "oops"})).unwrap_err();
        assert!(matches!(err, MigrateError::Api(_)));
    }
}
