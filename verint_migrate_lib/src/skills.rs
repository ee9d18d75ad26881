//! Active-skill filtering for employee skill assignments.

use chrono::NaiveDate;
use serde::Serialize;
use verint_api::types::{SkillAssignment, SkillAssignmentAttributes};

/// An active skill assignment as exported in the employee sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSkill {
    pub name: Option<String>,
    pub proficiency: Option<String>,
    pub priority: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reserve_level: Option<String>,
}

/// Whether a skill assignment is still in effect on `reference`.
///
/// Active when the end date is missing, empty, or the literal `"null"` (any
/// case); otherwise when the leading `YYYY-MM-DD` of the end date is on or
/// after `reference`. An end date that does not parse counts as active.
pub fn is_active(attrs: &SkillAssignmentAttributes, reference: NaiveDate) -> bool {
    let end = match attrs.end_date().map(str::trim) {
        None => return true,
        Some(end) if end.is_empty() || end.eq_ignore_ascii_case("null") => return true,
        Some(end) => end,
    };
    let date_part: String = end.chars().take(10).collect();
    match NaiveDate::parse_from_str(&date_part, "%Y-%m-%d") {
        Ok(end_date) => end_date >= reference,
        Err(e) => {
            tracing::debug!("unparseable skill end date '{}' kept as active: {}", end, e);
            true
        }
    }
}

/// Keeps the assignments that are active on `reference`.
pub fn active_skills(assignments: &[SkillAssignment], reference: NaiveDate) -> Vec<ActiveSkill> {
    assignments
        .iter()
        .filter(|a| is_active(&a.attributes, reference))
        .map(|a| ActiveSkill {
            name: a
                .relationships
                .one("skill")
                .and_then(|s| s.meta.name.clone()),
            proficiency: a.attributes.proficiency.clone(),
            priority: a.attributes.priority.clone(),
            start_date: a.attributes.start_date().map(str::to_string),
            end_date: a.attributes.end_date().map(str::to_string),
            reserve_level: a.attributes.reserve_level().map(str::to_string),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn with_end(value: serde_json::Value) -> SkillAssignmentAttributes {
        serde_json::from_value(json!({ "endDate": value })).unwrap()
    }

    #[test]
    fn missing_end_date_is_active() {
        let attrs: SkillAssignmentAttributes = serde_json::from_value(json!({})).unwrap();
        assert!(is_active(&attrs, today()));
        assert!(is_active(&with_end(json!(null)), today()));
    }

    #[test]
    fn empty_end_date_is_active() {
        assert!(is_active(&with_end(json!("")), today()));
    }

    #[test]
    fn literal_null_is_active_in_any_case() {
        assert!(is_active(&with_end(json!("null")), today()));
        assert!(is_active(&with_end(json!("NULL")), today()));
    }

    #[test]
    fn yesterday_is_inactive() {
        assert!(!is_active(&with_end(json!("2024-06-14")), today()));
    }

    #[test]
    fn today_is_active() {
        assert!(is_active(&with_end(json!("2024-06-15")), today()));
        assert!(is_active(&with_end(json!("2024-06-15T00:00:00Z")), today()));
    }

    #[test]
    fn future_is_active() {
        assert!(is_active(&with_end(json!("2030-01-01")), today()));
    }

    #[test]
    fn unparseable_is_active() {
        assert!(is_active(&with_end(json!("not-a-date")), today()));
        assert!(is_active(&with_end(json!("15/06/2024")), today()));
    }

    #[test]
    fn snake_case_end_date_is_honoured() {
        let attrs: SkillAssignmentAttributes =
            serde_json::from_value(json!({ "end_date": "2020-01-01" })).unwrap();
        assert!(!is_active(&attrs, today()));
    }

    #[test]
    fn active_skills_filters_and_maps() {
        let assignments: Vec<SkillAssignment> = serde_json::from_value(json!([
            {
                "id": "a",
                "attributes": {"proficiency": 4, "startDate": "2023-01-01", "reserveLevel": "2"},
                "relationships": {"skill": {"data": {"id": "s1", "meta": {"name": "Voice"}}}}
            },
            {
                "id": "b",
                "attributes": {"end_date": "2024-01-01"},
                "relationships": {"skill": {"data": {"id": "s2", "meta": {"name": "Chat"}}}}
            }
        ]))
        .unwrap();

        let active = active_skills(&assignments, today());
        assert_eq!(
            active,
            vec![ActiveSkill {
                name: Some("Voice".to_string()),
                proficiency: Some("4".to_string()),
                priority: None,
                start_date: Some("2023-01-01".to_string()),
                end_date: None,
                reserve_level: Some("2".to_string()),
            }]
        );
    }
}
