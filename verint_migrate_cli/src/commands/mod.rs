pub mod access_rights;
pub mod employees;
pub mod groups;
pub mod organizations;
pub mod roles;

use std::future::Future;
use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use verint_migrate_lib::verint_api::{self, Client};
use verint_migrate_lib::{dump_response, GroupMembershipIndex, OverflowPolicy};

use crate::output::{Sheet, SummaryRow};

/// State shared by every pass in one run.
pub struct Session {
    pub client: Client,
    pub policy: OverflowPolicy,
    dump_dir: Option<PathBuf>,
    employees: Option<Value>,
}

impl Session {
    pub fn new(client: Client, policy: OverflowPolicy, dump_dir: Option<PathBuf>) -> Self {
        Self {
            client,
            policy,
            dump_dir,
            employees: None,
        }
    }

    /// Awaits a top-level listing and dumps it before anything parses it.
    ///
    /// A failed listing is fatal; a failed dump is only logged.
    pub async fn listing<F>(&self, kind: &str, fetch: F) -> Result<Value>
    where
        F: Future<Output = Result<Value, verint_api::Error>>,
    {
        let response = fetch.await?;
        if let Some(dir) = &self.dump_dir {
            if let Err(e) = dump_response(dir, kind, &response) {
                tracing::warn!("Could not save {} response to {}: {}", kind, dir.display(), e);
            }
        }
        Ok(response)
    }

    /// The employee listing, fetched at most once per run.
    pub async fn employees(&mut self) -> Result<Value> {
        if let Some(listing) = &self.employees {
            return Ok(listing.clone());
        }
        let listing = self.listing("employee", self.client.employees_raw()).await?;
        self.employees = Some(listing.clone());
        Ok(listing)
    }
}

/// Sheets and summary lines accumulated over a run.
#[derive(Default)]
pub struct Report {
    pub sheets: Vec<Sheet>,
    pub summary: Vec<SummaryRow>,
}

impl Report {
    pub fn push(&mut self, sheet: Sheet, failures: usize) {
        tracing::info!("{} sheet prepared with {} rows", sheet.name, sheet.rows.len());
        self.summary.push(SummaryRow {
            sheet: sheet.name.to_string(),
            rows: sheet.rows.len(),
            failures,
        });
        self.sheets.push(sheet);
    }
}

/// One extraction pass, producing one sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Organizations,
    Groups,
    Employees,
    Roles,
    AccessRights,
}

impl Pass {
    pub const ALL: [Pass; 5] = [
        Pass::Organizations,
        Pass::Groups,
        Pass::Employees,
        Pass::Roles,
        Pass::AccessRights,
    ];
}

/// Runs `passes` in order, pushing each finished sheet onto `report`.
///
/// The employee pass needs group memberships, so the group pass runs
/// first when it was not already listed. On a fatal error the sheets of
/// the passes that completed stay in `report`.
pub async fn run_passes(passes: &[Pass], session: &mut Session, report: &mut Report) -> Result<()> {
    let mut memberships: Option<GroupMembershipIndex> = None;
    for pass in passes {
        match pass {
            Pass::Organizations => organizations::run(session, report).await?,
            Pass::Groups => memberships = Some(groups::run(session, report).await?),
            Pass::Employees => {
                let index = match memberships.take() {
                    Some(index) => index,
                    None => groups::run(session, report).await?,
                };
                employees::run(session, report, &index).await?;
                memberships = Some(index);
            }
            Pass::Roles => roles::run(session, report).await?,
            Pass::AccessRights => access_rights::run(session, report).await?,
        }
    }
    Ok(())
}

pub fn progress_bar(len: usize, message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({eta}) {msg}",
    )?);
    pb.set_message(message);
    Ok(pb)
}

/// Number of entries in a listing's `data` array.
pub fn listing_len(listing: &Value) -> usize {
    listing
        .get("data")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
