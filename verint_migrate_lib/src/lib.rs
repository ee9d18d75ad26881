//! Extraction engine for Verint workforce-management data.
//!
//! Builds parent/child indices over group and organization forests, flattens
//! them into level-indexed rows with fault-tolerant per-node enrichment, and
//! runs the employee, role and access-rights passes on top of the signed
//! `verint_api` client.

pub mod access_rights;
pub mod attempt;
pub mod cache;
pub mod config;
pub mod dump;
pub mod employees;
pub mod error;
pub mod groups;
pub mod hierarchy;
pub mod membership;
pub mod organizations;
pub mod roles;
pub mod skills;

pub use verint_api;
pub use verint_api::types;

pub use access_rights::{extract_access_rights, AccessRightRecord, AccessRightsExtraction};
pub use attempt::{Diagnostics, EnrichmentFailure};
pub use cache::LookupCache;
pub use config::Config;
pub use dump::dump_response;
pub use employees::{
    extract_employees, parse_employees, EmployeeEnricher, EmployeeExtraction, EmployeeRecord,
    NamedRef,
};
pub use error::MigrateError;
pub use groups::{extract_groups, GroupDetail, GroupEnricher, GroupExtraction, MemberSummary};
pub use hierarchy::{
    flatten, FlatRow, HierarchyIndex, HierarchyNode, NodeEnricher, OverflowPolicy, LEVEL_COLUMNS,
};
pub use membership::{GroupMembershipIndex, GroupRef};
pub use organizations::{
    extract_organizations, OrganizationDetail, OrganizationEnricher, OrganizationExtraction,
};
pub use roles::{role_records, RoleRecord};
pub use skills::{active_skills, is_active, ActiveSkill};
