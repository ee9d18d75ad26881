use anyhow::Result;
use verint_migrate_lib::extract_organizations;

use super::{Report, Session};
use crate::output;

pub async fn run(session: &Session, report: &mut Report) -> Result<()> {
    let listing = session
        .listing("org", session.client.organizations_raw())
        .await?;
    let extraction = extract_organizations(&session.client, listing, session.policy).await?;
    report.push(
        output::organization_sheet(&extraction.rows)?,
        extraction.diagnostics.len(),
    );
    Ok(())
}
