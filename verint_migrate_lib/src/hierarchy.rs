//! Parent/child indexing and level-column flattening of group and
//! organization forests.
//!
//! A [`HierarchyIndex`] is built once from a listing response. [`flatten`]
//! then walks it depth first (roots in listing order, children in listing
//! order) and emits one [`FlatRow`] per node, with the node's name in the
//! level column matching its depth. A parent's row always precedes the rows
//! of its descendants.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use verint_api::types::{Group, Organization};

use crate::error::MigrateError;

/// Number of "Level N" columns in hierarchy sheets.
pub const LEVEL_COLUMNS: usize = 10;

/// A record that participates in a parent/child forest.
pub trait HierarchyNode {
    fn node_id(&self) -> &str;
    fn node_name(&self) -> &str;
    /// `None` (or an empty id) marks a root.
    fn parent_id(&self) -> Option<&str>;
}

impl HierarchyNode for Group {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_name(&self) -> &str {
        &self.attributes.name
    }

    fn parent_id(&self) -> Option<&str> {
        self.attributes.parent_id.as_deref()
    }
}

impl HierarchyNode for Organization {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn node_name(&self) -> &str {
        &self.attributes.name
    }

    fn parent_id(&self) -> Option<&str> {
        self.attributes.parent_id.as_deref()
    }
}

/// Produces the per-node enrichment payload during [`flatten`].
///
/// Enrichment cannot fail: implementations recover from their own fetch
/// errors (see [`crate::attempt::Diagnostics`]) and return an empty payload.
#[allow(async_fn_in_trait)]
pub trait NodeEnricher<N> {
    type Payload;

    async fn enrich(&mut self, node: &N) -> Self::Payload;
}

/// What to do with a node deeper than [`LEVEL_COLUMNS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Abort the pass with [`MigrateError::HierarchyTooDeep`].
    #[default]
    Reject,
    /// Put the name in the last level column and log a warning.
    Clamp,
}

/// Immutable id and parent → children index over a node listing.
pub struct HierarchyIndex<N> {
    nodes: Vec<N>,
    by_id: HashMap<String, usize>,
    children: HashMap<String, Vec<usize>>,
    roots: Vec<usize>,
}

impl<N: HierarchyNode> HierarchyIndex<N> {
    /// Indexes `nodes` in a single pass, preserving listing order for roots
    /// and for each parent's children.
    pub fn build(nodes: Vec<N>) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (idx, node) in nodes.iter().enumerate() {
            match by_id.entry(node.node_id().to_string()) {
                Entry::Occupied(_) => {
                    tracing::warn!("duplicate node id {} in listing", node.node_id());
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
            match node.parent_id().filter(|p| !p.is_empty()) {
                Some(parent) => children.entry(parent.to_string()).or_default().push(idx),
                None => roots.push(idx),
            }
        }

        Self {
            nodes,
            by_id,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id. With duplicate ids, the first one listed wins.
    pub fn get(&self, id: &str) -> Option<&N> {
        self.by_id.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Root nodes in listing order.
    pub fn roots(&self) -> impl Iterator<Item = &N> {
        self.roots.iter().map(|&idx| &self.nodes[idx])
    }

    /// Direct children of `id` in listing order.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &N> {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.nodes[idx])
    }

    /// All nodes in listing order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }
}

/// One output row of a hierarchy sheet.
#[derive(Debug, Clone)]
pub struct FlatRow<P> {
    /// Exactly one entry is non-empty: the node's name at its depth.
    pub levels: [String; LEVEL_COLUMNS],
    /// Depth from the root (root = 0). May exceed the last column index
    /// when the row was clamped.
    pub depth: usize,
    pub id: String,
    pub name: String,
    pub payload: P,
}

/// Flattens `index` in pre-order, enriching each node exactly once.
///
/// Traversal uses an explicit stack bounded by [`LEVEL_COLUMNS`]; see
/// [`OverflowPolicy`] for what happens past it. Nodes that cannot be reached
/// from a root (their parent is missing from the listing) are logged and
/// skipped.
pub async fn flatten<N, E>(
    index: &HierarchyIndex<N>,
    enricher: &mut E,
    policy: OverflowPolicy,
) -> Result<Vec<FlatRow<E::Payload>>, MigrateError>
where
    N: HierarchyNode,
    E: NodeEnricher<N>,
{
    let mut rows = Vec::with_capacity(index.len());
    let mut visited = vec![false; index.len()];
    let mut stack: Vec<(usize, usize)> = index.roots.iter().rev().map(|&idx| (idx, 0)).collect();

    while let Some((idx, depth)) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        let node = &index.nodes[idx];

        let column = if depth < LEVEL_COLUMNS {
            depth
        } else {
            match policy {
                OverflowPolicy::Reject => {
                    return Err(MigrateError::HierarchyTooDeep {
                        id: node.node_id().to_string(),
                        depth,
                    });
                }
                OverflowPolicy::Clamp => {
                    tracing::warn!(
                        "node {} ({}) is at level {}, placing it in level column {}",
                        node.node_id(),
                        node.node_name(),
                        depth + 1,
                        LEVEL_COLUMNS
                    );
                    LEVEL_COLUMNS - 1
                }
            }
        };

        let payload = enricher.enrich(node).await;
        let mut levels: [String; LEVEL_COLUMNS] = Default::default();
        levels[column] = node.node_name().to_string();
        rows.push(FlatRow {
            levels,
            depth,
            id: node.node_id().to_string(),
            name: node.node_name().to_string(),
            payload,
        });

        if let Some(children) = index.children.get(node.node_id()) {
            stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
        }
    }

    if rows.len() < index.len() {
        let orphans: Vec<&str> = index
            .nodes
            .iter()
            .zip(&visited)
            .filter(|(_, seen)| !**seen)
            .map(|(node, _)| node.node_id())
            .collect();
        tracing::warn!(
            "{} node(s) are not reachable from any root and were skipped: {}",
            orphans.len(),
            orphans.join(", ")
        );
    }

    Ok(rows)
}
