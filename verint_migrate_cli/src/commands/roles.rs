use anyhow::Result;
use verint_migrate_lib::role_records;

use super::{Report, Session};
use crate::output;

pub async fn run(session: &Session, report: &mut Report) -> Result<()> {
    let listing = session.listing("roles", session.client.roles_raw()).await?;
    let records = role_records(listing)?;
    report.push(output::role_sheet(&records), 0);
    Ok(())
}
