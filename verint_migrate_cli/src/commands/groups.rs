use anyhow::Result;
use verint_migrate_lib::{extract_groups, GroupMembershipIndex};

use super::{Report, Session};
use crate::output;

/// Runs the group pass and hands back the memberships for the employee pass.
pub async fn run(session: &Session, report: &mut Report) -> Result<GroupMembershipIndex> {
    let listing = session
        .listing("group", session.client.groups_raw())
        .await?;
    let extraction = extract_groups(&session.client, listing, session.policy).await?;
    report.push(
        output::group_sheet(&extraction.rows)?,
        extraction.diagnostics.len(),
    );
    Ok(extraction.memberships)
}
