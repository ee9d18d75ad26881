//! HTTP client for the Verint user-management API.

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    auth::Signer,
    types::{
        DataSource, Document, Employee, EmployeeUdf, Group, GroupMember, JobTitle, Organization,
        OrganizationSkill, OrganizationUdf, PersonRef, Preference, Role, SkillAssignment,
        Workspace,
    },
    Error,
};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_MGMT: &str = "wfo/user-mgmt-api/v1";

/// HMAC-authenticated client for the Verint API.
///
/// Every request is signed individually: a fresh salt and timestamp go into
/// the `Authorization` header of each call. Non-2xx responses surface as
/// [`Error::HttpStatus`] carrying the endpoint and status code.
pub struct Client {
    http: reqwest::Client,
    /// Base URL, e.g. `https://wfo.example.com`. Endpoints are joined below it.
    base_url: String,
    signer: Signer,
}

impl Client {
    /// Creates a client with the default timeout.
    pub fn new(base_url: &str, signer: Signer) -> Result<Self, Error> {
        Self::with_timeout(base_url, signer, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(base_url: &str, signer: Signer, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed {
                    endpoint: base_url.to_string(),
                    source: e,
                }
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            signer,
        })
    }

    fn url(&self, endpoint: &str) -> Result<Url, Error> {
        let joined = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Issues a signed request and returns the parsed JSON body.
    ///
    /// An empty success body is returned as `Value::Null`.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let url = self.url(endpoint)?;
        tracing::info!("Calling Verint API [{}] => {}", method, url);

        let authorization = self.signer.sign(method.as_str(), url.path());
        let mut request = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to call {}: {}", endpoint, e);
            Error::RequestFailed {
                endpoint: endpoint.to_string(),
                source: e,
            }
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", endpoint, e);
            Error::RequestFailed {
                endpoint: endpoint.to_string(),
                source: e,
            }
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&text);
            tracing::error!(
                "Request to {} failed with status {}: {}",
                endpoint,
                status,
                snippet
            );
            return Err(Error::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: snippet,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                "Failed to parse response from {}: {} | body: {}",
                endpoint,
                e,
                truncate_body(&text)
            );
            Error::Parse {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// `GET` returning the raw JSON body.
    pub async fn get_json(&self, endpoint: &str) -> Result<Value, Error> {
        self.call(endpoint, Method::GET, None).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        let value = match self.get_json(endpoint).await? {
            // an empty body is an empty document
            Value::Null => Value::Object(Default::default()),
            value => value,
        };
        decode(endpoint, value)
    }

    /// Raw group listing, for callers that persist the response before parsing.
    pub async fn groups_raw(&self) -> Result<Value, Error> {
        self.get_json(&format!("{}/groups", USER_MGMT)).await
    }

    pub async fn groups(&self) -> Result<Document<Vec<Group>>, Error> {
        self.get(&format!("{}/groups", USER_MGMT)).await
    }

    pub async fn group_employees(&self, group_id: &str) -> Result<Document<Vec<GroupMember>>, Error> {
        self.get(&format!("{}/groups/{}/employees", USER_MGMT, group_id))
            .await
    }

    pub async fn organizations_raw(&self) -> Result<Value, Error> {
        self.get_json(&format!("{}/organizations", USER_MGMT)).await
    }

    pub async fn organizations(&self) -> Result<Document<Vec<Organization>>, Error> {
        self.get(&format!("{}/organizations", USER_MGMT)).await
    }

    pub async fn organization_skills(
        &self,
        org_id: &str,
    ) -> Result<Document<Vec<OrganizationSkill>>, Error> {
        self.get(&format!("{}/organizations/{}/skills", USER_MGMT, org_id))
            .await
    }

    pub async fn organization_udfs(
        &self,
        org_id: &str,
    ) -> Result<Document<Vec<OrganizationUdf>>, Error> {
        self.get(&format!(
            "{}/organizations/{}/user-defined-fields",
            USER_MGMT, org_id
        ))
        .await
    }

    pub async fn organization_job_titles(
        &self,
        org_id: &str,
    ) -> Result<Document<Vec<JobTitle>>, Error> {
        self.get(&format!("{}/organizations/{}/jobTitles", USER_MGMT, org_id))
            .await
    }

    pub async fn employees_raw(&self) -> Result<Value, Error> {
        self.get_json(&format!("{}/employees", USER_MGMT)).await
    }

    pub async fn employees(&self) -> Result<Document<Vec<Employee>>, Error> {
        self.get(&format!("{}/employees", USER_MGMT)).await
    }

    pub async fn employee_job_title(&self, employee_id: &str) -> Result<Document<JobTitle>, Error> {
        self.get(&format!("{}/employees/{}/jobTitle", USER_MGMT, employee_id))
            .await
    }

    pub async fn employee_workspace(
        &self,
        employee_id: &str,
    ) -> Result<Document<Workspace>, Error> {
        self.get(&format!("{}/employees/{}/workspace", USER_MGMT, employee_id))
            .await
    }

    /// Preferences restricted to `keys`, sent as a comma-separated `keys` query parameter.
    pub async fn employee_preferences(
        &self,
        employee_id: &str,
        keys: &[&str],
    ) -> Result<Document<Vec<Preference>>, Error> {
        self.get(&format!(
            "{}/employees/{}/preferences?keys={}",
            USER_MGMT,
            employee_id,
            keys.join(",")
        ))
        .await
    }

    pub async fn employee_skills(
        &self,
        employee_id: &str,
    ) -> Result<Document<Vec<SkillAssignment>>, Error> {
        self.get(&format!("{}/employees/{}/skills", USER_MGMT, employee_id))
            .await
    }

    pub async fn employee_udfs(
        &self,
        employee_id: &str,
    ) -> Result<Document<Vec<EmployeeUdf>>, Error> {
        self.get(&format!(
            "{}/employees/{}/user-defined-fields",
            USER_MGMT, employee_id
        ))
        .await
    }

    pub async fn employee_supervisor(&self, employee_id: &str) -> Result<Document<PersonRef>, Error> {
        self.get(&format!("{}/employees/{}/supervisor", USER_MGMT, employee_id))
            .await
    }

    pub async fn employee_team_lead(&self, employee_id: &str) -> Result<Document<PersonRef>, Error> {
        self.get(&format!("{}/employees/{}/teamLead", USER_MGMT, employee_id))
            .await
    }

    pub async fn employee_roles(&self, employee_id: &str) -> Result<Document<Vec<Role>>, Error> {
        self.get(&format!("{}/employees/{}/roles", USER_MGMT, employee_id))
            .await
    }

    pub async fn roles_raw(&self) -> Result<Value, Error> {
        self.get_json(&format!("{}/roles", USER_MGMT)).await
    }

    pub async fn roles(&self) -> Result<Document<Vec<Role>>, Error> {
        self.get(&format!("{}/roles", USER_MGMT)).await
    }

    pub async fn data_source(&self, data_source_id: &str) -> Result<Document<Vec<DataSource>>, Error> {
        self.get(&format!("api/em/v2/datasources/{}", data_source_id))
            .await
    }
}

/// Decodes an already-fetched JSON body into a typed document.
pub fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!("Unexpected response shape from {}: {}", endpoint, e);
        Error::Parse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        }
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
