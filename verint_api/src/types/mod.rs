//! Typed views of the JSON:API-style documents returned by the API.
//!
//! Every optional field defaults when missing or `null`, so callers never
//! have to re-check key presence after deserialization.

mod document;
mod employee;
mod group;
mod organization;
mod role;

pub use document::{
    Document, Linkage, RefMeta, Relationship, Relationships, Resource, ResourceRef,
};
pub use employee::*;
pub use group::*;
pub use organization::*;
pub use role::*;
