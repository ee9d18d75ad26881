use anyhow::Result;
use verint_migrate_lib::{extract_employees, GroupMembershipIndex};

use super::{listing_len, progress_bar, Report, Session};
use crate::output;

pub async fn run(
    session: &mut Session,
    report: &mut Report,
    memberships: &GroupMembershipIndex,
) -> Result<()> {
    let listing = session.employees().await?;
    let pb = progress_bar(listing_len(&listing), "enriching employees...")?;

    let extraction =
        extract_employees(&session.client, listing, memberships, |_| pb.inc(1)).await?;
    pb.finish_with_message("employees done");

    report.push(
        output::employee_sheet(&extraction.records)?,
        extraction.diagnostics.len(),
    );
    Ok(())
}
