//! Tabular report assembly and the xlsx / CSV / JSON writers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use verint_migrate_lib::{
    AccessRightRecord, EmployeeRecord, FlatRow, GroupDetail, OrganizationDetail, RoleRecord,
    LEVEL_COLUMNS,
};

pub const ORGANIZATION_SHEET: &str = "Organization Hierarchy";
pub const GROUP_SHEET: &str = "Group Hierarchy";
pub const EMPLOYEE_SHEET: &str = "Employees";
pub const ROLE_SHEET: &str = "Roles";
pub const ACCESS_RIGHTS_SHEET: &str = "Access Rights";

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Bool(bool),
}

impl Cell {
    fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Cell::Empty => Value::Null,
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// One worksheet worth of rows.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Column holding the row's identifier, used when reporting on a row.
    pub id_column: usize,
    /// Header background colour as `0xRRGGBB`; bold only when `None`.
    pub header_fill: Option<u32>,
}

fn compact_json<T: Serialize + ?Sized>(value: &T) -> Result<Cell> {
    Ok(Cell::Text(serde_json::to_string(value)?))
}

/// Compact JSON, or an empty cell for an empty list.
fn json_or_empty<T: Serialize>(values: &[T]) -> Result<Cell> {
    if values.is_empty() {
        Ok(Cell::Empty)
    } else {
        compact_json(values)
    }
}

fn level_headers() -> Vec<String> {
    (1..=LEVEL_COLUMNS).map(|i| format!("Level {}", i)).collect()
}

fn headers(tail: &[&str]) -> Vec<String> {
    tail.iter().map(|h| h.to_string()).collect()
}

fn level_cells<P>(row: &FlatRow<P>) -> Vec<Cell> {
    row.levels
        .iter()
        .map(|name| {
            if name.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(name.clone())
            }
        })
        .collect()
}

// -- Sheet builders --

pub fn organization_sheet(rows: &[FlatRow<OrganizationDetail>]) -> Result<Sheet> {
    let mut header = level_headers();
    header.extend(headers(&[
        "Organization ID",
        "Description",
        "TimeZone",
        "WeekStartDay",
        "SeatsNumber",
        "Location",
        "Skills (Direct Only)",
        "User Defined Fields (Direct Only)",
        "Job Titles (Direct Only)",
    ]));

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let d = &row.payload;
        let mut cells = level_cells(row);
        cells.extend([
            Cell::from(row.id.as_str()),
            Cell::from(d.description.as_str()),
            Cell::from(d.time_zone.as_str()),
            Cell::from(d.week_start_day.as_str()),
            Cell::from(d.seats_number.as_str()),
            Cell::from(d.location.as_str()),
            compact_json(&d.skills)?,
            compact_json(&d.udfs)?,
            compact_json(&d.job_titles)?,
        ]);
        out.push(cells);
    }
    Ok(Sheet {
        name: ORGANIZATION_SHEET,
        headers: header,
        rows: out,
        id_column: LEVEL_COLUMNS,
        header_fill: Some(0xFBE4D5),
    })
}

pub fn group_sheet(rows: &[FlatRow<GroupDetail>]) -> Result<Sheet> {
    let mut header = level_headers();
    header.extend(headers(&["Group ID", "Description", "Group Type", "Group Members"]));

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let d = &row.payload;
        let mut cells = level_cells(row);
        cells.extend([
            Cell::from(row.id.as_str()),
            Cell::from(d.description.as_str()),
            Cell::from(d.group_type.as_str()),
            compact_json(&d.members)?,
        ]);
        out.push(cells);
    }
    Ok(Sheet {
        name: GROUP_SHEET,
        headers: header,
        rows: out,
        id_column: LEVEL_COLUMNS,
        header_fill: Some(0xDDEBF7),
    })
}

pub fn employee_sheet(records: &[EmployeeRecord]) -> Result<Sheet> {
    let header = headers(&[
        "Employee ID",
        "Username",
        "User Status",
        "Employee Number",
        "Employee Type",
        "Job Title",
        "Is Supervisor",
        "Is Team Lead",
        "Organization ID",
        "Organization Name",
        "First Name",
        "Middle Initial",
        "Last Name",
        "Email",
        "Desktop Messaging Username",
        "Supervisor",
        "Team Lead",
        "Home Phone",
        "Work Phone",
        "Cell Phone",
        "Start Time",
        "End Time",
        "Birth Date",
        "Address Line 1",
        "Address Line 2",
        "Address Line 3",
        "City",
        "State",
        "Zip Code",
        "Country",
        "Workspace Logins (dataSourceName - loginName)",
        "Preferences",
        "User Defined Fields",
        "Skills",
        "Groups",
    ]);

    let mut out = Vec::with_capacity(records.len());
    for r in records {
        out.push(vec![
            Cell::from(r.id.as_str()),
            r.username.clone().into(),
            r.user_status.clone().into(),
            r.employee_number.clone().into(),
            r.employee_type.clone().into(),
            r.job_title.as_ref().map(compact_json).transpose()?.into(),
            r.is_supervisor.into(),
            r.is_team_lead.into(),
            r.organization_id.clone().into(),
            r.organization_name.clone().into(),
            r.first_name.clone().into(),
            r.middle_initial.clone().into(),
            r.last_name.clone().into(),
            r.email.clone().into(),
            r.desktop_messaging_username.clone().into(),
            r.supervisor.as_ref().map(compact_json).transpose()?.into(),
            r.team_lead.as_ref().map(compact_json).transpose()?.into(),
            r.home_phone.clone().into(),
            r.work_phone.clone().into(),
            r.cell_phone.clone().into(),
            r.start_time.clone().into(),
            r.end_time.clone().into(),
            r.birth_date.clone().into(),
            r.address_line1.clone().into(),
            r.address_line2.clone().into(),
            r.address_line3.clone().into(),
            r.city.clone().into(),
            r.state.clone().into(),
            r.zip_code.clone().into(),
            r.country.clone().into(),
            Cell::from(r.workspace_logins.as_str()),
            json_or_empty(&r.preferences)?,
            json_or_empty(&r.udfs)?,
            json_or_empty(&r.skills)?,
            compact_json(&r.groups)?,
        ]);
    }
    Ok(Sheet {
        name: EMPLOYEE_SHEET,
        headers: header,
        rows: out,
        id_column: 0,
        header_fill: None,
    })
}

pub fn role_sheet(records: &[RoleRecord]) -> Sheet {
    Sheet {
        name: ROLE_SHEET,
        headers: headers(&[
            "Role Name",
            "Description",
            "Is Default",
            "Is Admin Role",
            "Organization Name",
        ]),
        rows: records
            .iter()
            .map(|r| {
                vec![
                    Cell::from(r.name.as_str()),
                    Cell::from(r.description.as_str()),
                    Cell::from(r.is_default),
                    Cell::from(r.is_admin_role),
                    Cell::from(r.organization_name.as_str()),
                ]
            })
            .collect(),
        id_column: 0,
        header_fill: None,
    }
}

pub fn access_rights_sheet(records: &[AccessRightRecord]) -> Result<Sheet> {
    let mut out = Vec::with_capacity(records.len());
    for r in records {
        out.push(vec![
            Cell::from(r.employee_id.as_str()),
            Cell::from(r.username.as_str()),
            Cell::from(r.role_name.as_str()),
            Cell::from(r.description.as_str()),
            Cell::from(r.is_admin_role),
            Cell::from(r.is_default),
            Cell::from(r.owning_organization.as_str()),
            compact_json(&r.accessible_organizations)?,
            compact_json(&r.accessible_groups)?,
        ]);
    }
    Ok(Sheet {
        name: ACCESS_RIGHTS_SHEET,
        headers: headers(&[
            "Employee ID",
            "Username",
            "Role Name",
            "Description",
            "Is Admin Role",
            "Is Default",
            "Owning Org Name",
            "Accessible Orgs",
            "Accessible Groups",
        ]),
        rows: out,
        id_column: 0,
        header_fill: None,
    })
}

// -- Workbook output --

/// Longest text Excel accepts in one cell, in characters.
pub const CELL_TEXT_LIMIT: usize = 32_767;

/// Appended to text cut down to [`CELL_TEXT_LIMIT`].
pub const TRUNCATION_MARKER: &str = "...[truncated]";

/// `text` cut at a char boundary so that, with [`TRUNCATION_MARKER`]
/// appended, it is exactly [`CELL_TEXT_LIMIT`] characters. `None` when
/// `text` already fits.
pub fn fit_cell_text(text: &str) -> Option<String> {
    if text.chars().count() <= CELL_TEXT_LIMIT {
        return None;
    }
    let keep = CELL_TEXT_LIMIT - TRUNCATION_MARKER.chars().count();
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(idx, _)| idx);
    Some(format!("{}{}", &text[..cut], TRUNCATION_MARKER))
}

/// Writes every sheet into a fresh workbook at `path`, replacing any existing file.
///
/// Text longer than Excel's cell limit is truncated with a marker and a
/// warning; CSV and JSON output keep it whole.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    for sheet in sheets {
        let mut header_format = Format::new().set_bold().set_align(FormatAlign::Center);
        if let Some(fill) = sheet.header_fill {
            header_format = header_format.set_background_color(Color::RGB(fill));
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        for (i, row) in sheet.rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) => match fit_cell_text(s) {
                        None => {
                            worksheet.write_string(row_num, col as u16, s)?;
                        }
                        Some(cut) => {
                            tracing::warn!(
                                "{} row {} column '{}' is {} characters; truncated to fit the workbook",
                                sheet.name,
                                row.get(sheet.id_column).map(Cell::as_text).unwrap_or_default(),
                                sheet.headers.get(col).map(String::as_str).unwrap_or(""),
                                s.chars().count()
                            );
                            worksheet.write_string(row_num, col as u16, cut)?;
                        }
                    },
                    Cell::Bool(b) => {
                        worksheet.write_boolean(row_num, col as u16, *b)?;
                    }
                }
            }
        }
        worksheet.set_freeze_panes(1, 0)?;
    }
    workbook.save(path)?;
    Ok(())
}

// -- CSV output --

/// CSV path for `sheet`, next to the workbook: `<stem>_<sheet_name>.csv`.
pub fn csv_path(workbook: &Path, sheet: &str) -> PathBuf {
    let stem = workbook
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "verint_export".to_string());
    let slug = sheet.to_lowercase().replace(' ', "_");
    workbook.with_file_name(format!("{}_{}.csv", stem, slug))
}

pub fn write_csv_sheet<W: std::io::Write>(writer: W, sheet: &Sheet) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        wtr.write_record(row.iter().map(Cell::as_text))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one CSV file per sheet and returns the paths written.
pub fn write_csv(workbook: &Path, sheets: &[Sheet]) -> Result<Vec<PathBuf>> {
    if let Some(parent) = workbook.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut written = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let path = csv_path(workbook, sheet.name);
        write_csv_sheet(fs::File::create(&path)?, sheet)?;
        written.push(path);
    }
    Ok(written)
}

/// Writes `sheets` in `format`; CSV files land next to `workbook`.
pub fn write_report(format: OutputFormat, workbook: &Path, sheets: &[Sheet]) -> Result<()> {
    match format {
        OutputFormat::Xlsx => {
            write_workbook(workbook, sheets)?;
            eprintln!("Workbook written to {}", workbook.display());
        }
        OutputFormat::Csv => {
            for path in write_csv(workbook, sheets)? {
                eprintln!("CSV written to {}", path.display());
            }
        }
        OutputFormat::Json => print_json(&sheets_to_json(sheets)),
    }
    Ok(())
}

// -- JSON output --

/// `{sheet name: [{header: value}, ...]}`, with nested JSON cells kept as strings.
pub fn sheets_to_json(sheets: &[Sheet]) -> Value {
    let mut root = Map::new();
    for sheet in sheets {
        let rows = sheet
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = sheet
                    .headers
                    .iter()
                    .cloned()
                    .zip(row.iter().map(Cell::to_json))
                    .collect();
                Value::Object(object)
            })
            .collect();
        root.insert(sheet.name.to_string(), Value::Array(rows));
    }
    Value::Object(root)
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Run summary --

#[derive(Tabled, Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    #[tabled(rename = "Sheet")]
    pub sheet: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Recovered failures")]
    pub failures: usize,
}

pub fn summary_table(rows: &[SummaryRow]) -> String {
    let mut table = Table::new(rows.to_vec());
    table.with(Style::rounded());
    table.to_string()
}

pub fn print_summary(rows: &[SummaryRow]) {
    eprintln!("{}", summary_table(rows));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use verint_migrate_lib::groups::MemberSummary;
    use verint_migrate_lib::{GroupRef, NamedRef};

    fn group_row(depth: usize, id: &str, name: &str) -> FlatRow<GroupDetail> {
        let mut levels: [String; LEVEL_COLUMNS] = Default::default();
        levels[depth] = name.to_string();
        FlatRow {
            levels,
            depth,
            id: id.to_string(),
            name: name.to_string(),
            payload: GroupDetail {
                description: "desc".into(),
                group_type: "Team, Skill".into(),
                members: vec![MemberSummary {
                    id: "e1".into(),
                    first_name: "Grace".into(),
                    last_name: "Hopper".into(),
                    middle_initial: String::new(),
                }],
            },
        }
    }

    #[test]
    fn test_group_sheet_layout() {
        let sheet = group_sheet(&[group_row(0, "1", "A"), group_row(1, "2", "B")]).unwrap();
        assert_eq!(sheet.name, "Group Hierarchy");
        assert_eq!(sheet.headers.len(), LEVEL_COLUMNS + 4);
        assert_eq!(sheet.headers[0], "Level 1");
        assert_eq!(sheet.headers[9], "Level 10");
        assert_eq!(sheet.headers[10], "Group ID");

        let second = &sheet.rows[1];
        assert_eq!(second.len(), sheet.headers.len());
        assert_eq!(second[0], Cell::Empty);
        assert_eq!(second[1], Cell::Text("B".into()));
        assert_eq!(second[10], Cell::Text("2".into()));
        assert_eq!(second[12], Cell::Text("Team, Skill".into()));
        assert_eq!(
            second[13],
            Cell::Text(r#"[{"id":"e1","firstName":"Grace","lastName":"Hopper","middleInitial":""}]"#.into())
        );
    }

    #[test]
    fn test_organization_sheet_always_encodes_lists() {
        let mut levels: [String; LEVEL_COLUMNS] = Default::default();
        levels[0] = "Support".into();
        let row = FlatRow {
            levels,
            depth: 0,
            id: "10".into(),
            name: "Support".into(),
            payload: OrganizationDetail {
                time_zone: "Europe/London".into(),
                ..Default::default()
            },
        };
        let sheet = organization_sheet(&[row]).unwrap();
        assert_eq!(sheet.headers.len(), LEVEL_COLUMNS + 9);
        let cells = &sheet.rows[0];
        assert_eq!(cells[10], Cell::Text("10".into()));
        assert_eq!(cells[12], Cell::Text("Europe/London".into()));
        assert_eq!(cells[16], Cell::Text("[]".into()));
        assert_eq!(cells[18], Cell::Text("[]".into()));
    }

    #[test]
    fn test_employee_sheet_blank_optional_blobs() {
        let record = EmployeeRecord {
            id: "5001".into(),
            username: Some("ghopper".into()),
            is_supervisor: Some(true),
            supervisor: Some(NamedRef {
                id: "42".into(),
                name: "Ada Lovelace".into(),
            }),
            groups: vec![GroupRef {
                id: "1".into(),
                name: "A".into(),
            }],
            ..Default::default()
        };
        let sheet = employee_sheet(&[record]).unwrap();
        let col = |name: &str| sheet.headers.iter().position(|h| h == name).unwrap();
        let row = &sheet.rows[0];

        assert_eq!(row.len(), sheet.headers.len());
        assert_eq!(row[col("Username")], Cell::Text("ghopper".into()));
        assert_eq!(row[col("Is Supervisor")], Cell::Bool(true));
        assert_eq!(row[col("Is Team Lead")], Cell::Empty);
        assert_eq!(row[col("Job Title")], Cell::Empty);
        assert_eq!(
            row[col("Supervisor")],
            Cell::Text(r#"{"id":"42","name":"Ada Lovelace"}"#.into())
        );
        assert_eq!(row[col("Preferences")], Cell::Empty);
        assert_eq!(row[col("Skills")], Cell::Empty);
        assert_eq!(row[col("Groups")], Cell::Text(r#"[{"id":"1","name":"A"}]"#.into()));
        assert!(!sheet.headers.iter().any(|h| h == "SSN"));
    }

    #[test]
    fn test_csv_output() {
        let sheet = role_sheet(&[RoleRecord {
            name: "Admin".into(),
            description: "Full, unrestricted access".into(),
            is_default: false,
            is_admin_role: true,
            organization_name: "Head Office".into(),
        }]);
        let mut buf = Vec::new();
        write_csv_sheet(&mut buf, &sheet).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Role Name,Description,Is Default,Is Admin Role,Organization Name");
        assert_eq!(lines[1], r#"Admin,"Full, unrestricted access",false,true,Head Office"#);
    }

    #[test]
    fn test_csv_path_sits_next_to_workbook() {
        let path = csv_path(Path::new("output/verint_full_export.xlsx"), ACCESS_RIGHTS_SHEET);
        assert_eq!(path, PathBuf::from("output/verint_full_export_access_rights.csv"));
    }

    #[test]
    fn test_sheets_to_json() {
        let sheet = role_sheet(&[RoleRecord {
            name: "Agent".into(),
            description: String::new(),
            is_default: true,
            is_admin_role: false,
            organization_name: String::new(),
        }]);
        let value = sheets_to_json(&[sheet]);
        assert_eq!(value["Roles"][0]["Role Name"], json!("Agent"));
        assert_eq!(value["Roles"][0]["Is Default"], json!(true));
    }

    #[test]
    fn test_write_workbook_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("export.xlsx");
        let sheet = role_sheet(&[]);
        write_workbook(&path, &[sheet]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_fit_cell_text_cuts_on_char_boundary() {
        assert_eq!(fit_cell_text("short"), None);
        assert_eq!(fit_cell_text(&"x".repeat(CELL_TEXT_LIMIT)), None);

        let long = "é".repeat(CELL_TEXT_LIMIT + 10);
        let cut = fit_cell_text(&long).unwrap();
        assert_eq!(cut.chars().count(), CELL_TEXT_LIMIT);
        assert!(cut.ends_with(TRUNCATION_MARKER));
        assert!(cut.starts_with("éé"));
    }

    #[test]
    fn test_write_workbook_with_large_roster() {
        let mut row = group_row(0, "1", "Everyone");
        row.payload.members = (0..600)
            .map(|i| MemberSummary {
                id: format!("{}", 100_000 + i),
                first_name: format!("First{i}"),
                last_name: format!("Lastname{i}"),
                middle_initial: "Q".into(),
            })
            .collect();
        let sheet = group_sheet(&[row]).unwrap();
        let Cell::Text(roster) = &sheet.rows[0][LEVEL_COLUMNS + 3] else {
            panic!("roster should be text");
        };
        assert!(roster.chars().count() > CELL_TEXT_LIMIT);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xlsx");
        write_workbook(&path, &[sheet.clone()]).unwrap();
        assert!(path.exists());

        // CSV and JSON keep the full roster.
        let value = sheets_to_json(&[sheet.clone()]);
        assert_eq!(value["Group Hierarchy"][0]["Group Members"], json!(roster));
    }

    #[test]
    fn test_header_fill_per_sheet() {
        let groups = group_sheet(&[]).unwrap();
        let orgs = organization_sheet(&[]).unwrap();
        assert_eq!(groups.header_fill, Some(0xDDEBF7));
        assert_eq!(orgs.header_fill, Some(0xFBE4D5));
        assert_eq!(role_sheet(&[]).header_fill, None);
        assert_eq!(employee_sheet(&[]).unwrap().header_fill, None);
        assert_eq!(access_rights_sheet(&[]).unwrap().header_fill, None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xlsx");
        write_workbook(&path, &[orgs, groups, role_sheet(&[])]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_summary_table_contains_rows() {
        let table = summary_table(&[SummaryRow {
            sheet: GROUP_SHEET.into(),
            rows: 12,
            failures: 1,
        }]);
        assert!(table.contains("Group Hierarchy"));
        assert!(table.contains("Recovered failures"));
        assert!(table.contains("12"));
    }
}
