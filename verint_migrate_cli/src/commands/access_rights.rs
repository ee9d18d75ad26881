use anyhow::Result;
use verint_migrate_lib::extract_access_rights;

use super::{listing_len, progress_bar, Report, Session};
use crate::output;

pub async fn run(session: &mut Session, report: &mut Report) -> Result<()> {
    let listing = session.employees().await?;
    let pb = progress_bar(listing_len(&listing), "collecting role assignments...")?;

    let extraction = extract_access_rights(&session.client, listing, |_| pb.inc(1)).await?;
    pb.finish_with_message("access rights done");

    report.push(
        output::access_rights_sheet(&extraction.records)?,
        extraction.diagnostics.len(),
    );
    Ok(())
}
