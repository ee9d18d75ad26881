use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::de;

/// Top-level response envelope: `{"data": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Document<T> {
    #[serde(default, deserialize_with = "de::null_default")]
    pub data: T,
}

/// A single resource object with typed attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de> + Default"))]
pub struct Resource<A> {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "de::string")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub attributes: A,
    #[serde(default, deserialize_with = "de::null_default")]
    pub relationships: Relationships,
}

/// Named relationships of a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationships(pub HashMap<String, Option<Relationship>>);

impl Relationships {
    pub fn get(&self, name: &str) -> Option<&Relationship> {
        self.0.get(name).and_then(Option::as_ref)
    }

    /// The single resource linked under `name`, if any.
    pub fn one(&self, name: &str) -> Option<&ResourceRef> {
        self.get(name).and_then(|r| r.data.one())
    }

    /// All resources linked under `name`; empty when absent.
    pub fn many(&self, name: &str) -> &[ResourceRef] {
        self.get(name).map(|r| r.data.many()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Linkage,
}

/// Resource linkage: null, a list of references, or a single reference.
///
/// `Many` is listed before `One` because a derived struct also accepts a
/// JSON array positionally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    #[default]
    Empty,
    Many(Vec<ResourceRef>),
    One(ResourceRef),
}

impl Linkage {
    pub fn one(&self) -> Option<&ResourceRef> {
        match self {
            Self::One(r) => Some(r),
            Self::Many(refs) => refs.first(),
            Self::Empty => None,
        }
    }

    pub fn many(&self) -> &[ResourceRef] {
        match self {
            Self::One(r) => std::slice::from_ref(r),
            Self::Many(refs) => refs,
            Self::Empty => &[],
        }
    }
}

/// Reference to another resource, optionally carrying its display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default, deserialize_with = "de::id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub meta: RefMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefMeta {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Named {
        #[serde(default, deserialize_with = "de::string")]
        name: String,
    }

    #[test]
    fn linkage_variants() {
        let r: Resource<Named> = serde_json::from_value(json!({
            "id": 5,
            "type": "role",
            "attributes": {"name": "Admin"},
            "relationships": {
                "organization": {"data": {"id": "10", "meta": {"name": "HQ"}}},
                "groups": {"data": [{"id": "1"}, {"id": 2, "meta": {"name": "Night"}}]},
                "supervisor": {"data": null},
                "teamLead": null
            }
        }))
        .unwrap();

        assert_eq!(r.id, "5");
        assert_eq!(r.kind, "role");
        assert_eq!(r.attributes.name, "Admin");
        let org = r.relationships.one("organization").unwrap();
        assert_eq!(org.id, "10");
        assert_eq!(org.meta.name.as_deref(), Some("HQ"));
        let groups = r.relationships.many("groups");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].id, "2");
        assert_eq!(groups[1].meta.name.as_deref(), Some("Night"));
        assert!(r.relationships.one("supervisor").is_none());
        assert!(r.relationships.one("teamLead").is_none());
        assert!(r.relationships.many("missing").is_empty());
    }

    #[test]
    fn null_data_defaults() {
        let doc: Document<Vec<Resource<Named>>> =
            serde_json::from_value(json!({"data": null})).unwrap();
        assert!(doc.data.is_empty());

        let doc: Document<Resource<Named>> = serde_json::from_value(json!({})).unwrap();
        assert!(doc.data.id.is_empty());
    }

    #[test]
    fn null_attributes_default() {
        let r: Resource<Named> =
            serde_json::from_value(json!({"id": "x", "attributes": null})).unwrap();
        assert_eq!(r.attributes.name, "");
    }
}
