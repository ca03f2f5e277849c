//! The satisfaction-annotated prerequisite dependency graph.
//!
//! Nodes are the in-scope courses plus one synthetic node per equivalence
//! group that appears as a prerequisite target; courses that belong to such a
//! group are collapsed into the group node. Each prerequisite entry becomes a
//! directed edge from the dependent course to its prerequisite, weighted by
//! whether the student currently satisfies that single entry. The core never
//! performs layout or drawing; a rendering collaborator maps node labels
//! and edge satisfaction to visual output.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{
    algo::has_path_connecting,
    graph::{DiGraph, NodeIndex},
};
use tracing::instrument;

use crate::{
    audit::entry_satisfied,
    domain::{Catalog, Config, CourseCode, Student},
    policy::{equivalence, GroupId},
};

/// A node in the prerequisite graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    /// A single catalog course.
    Course(CourseCode),
    /// A collapsed equivalence group.
    Group(GroupId),
}

impl Node {
    /// The human-readable label a renderer should display.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Course(code) => code.to_string(),
            Self::Group(id) => equivalence::group(*id).label(),
        }
    }
}

/// Whether the student satisfies the prerequisite entry an edge represents.
///
/// Renderers conventionally draw satisfied edges green and unsatisfied ones
/// red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Satisfaction {
    /// The entry is currently met.
    Satisfied,
    /// The entry is not yet met.
    Unsatisfied,
}

/// A built prerequisite graph.
#[derive(Debug)]
pub struct PrerequisiteGraph {
    graph: DiGraph<Node, Satisfaction>,
    indices: BTreeMap<Node, NodeIndex>,
}

impl PrerequisiteGraph {
    /// The number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph contains the given node.
    #[must_use]
    pub fn contains(&self, node: &Node) -> bool {
        self.indices.contains_key(node)
    }

    /// Iterates over all nodes in canonical order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.indices.keys()
    }

    /// Iterates over all edges as `(dependent, prerequisite, satisfaction)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node, Satisfaction)> + '_ {
        self.graph.edge_indices().map(move |edge| {
            let (from, to) = self
                .graph
                .edge_endpoints(edge)
                .expect("edge index from the same graph");
            (&self.graph[from], &self.graph[to], self.graph[edge])
        })
    }

    /// The satisfaction of the edge between two nodes, if one exists.
    #[must_use]
    pub fn edge(&self, from: &Node, to: &Node) -> Option<Satisfaction> {
        let from = *self.indices.get(from)?;
        let to = *self.indices.get(to)?;
        let edge = self.graph.find_edge(from, to)?;
        Some(self.graph[edge])
    }

    /// The underlying petgraph graph, for rendering collaborators.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<Node, Satisfaction> {
        &self.graph
    }
}

/// Builds the prerequisite graph for the configured department.
///
/// Nodes and prerequisite entries are processed in canonical (sorted) order,
/// so the output, including the optional redundant-edge suppression, is
/// deterministic for a given catalog, student and config.
#[instrument(skip(catalog, student, config), fields(department = %config.department))]
#[must_use]
pub fn build(catalog: &Catalog, student: &Student, config: &Config) -> PrerequisiteGraph {
    let index = student.completion_index();
    let in_scope: Vec<_> = catalog.department(&config.department).collect();

    // Collect the equivalence groups that appear as prerequisite targets,
    // chasing group-to-group dependencies to a fixpoint (a group node
    // inherits its members' prerequisites, which may target further groups).
    let mut target_groups: BTreeSet<GroupId> = BTreeSet::new();
    let mut frontier: Vec<Vec<String>> = in_scope
        .iter()
        .map(|course| course.prerequisites.clone())
        .collect();
    while !frontier.is_empty() {
        let mut discovered = Vec::new();
        for entries in frontier.drain(..) {
            for entry in entries {
                if let Some(group) = equivalence::resolve(&entry) {
                    if target_groups.insert(group.id) {
                        discovered.push(group.id);
                    }
                }
            }
        }
        frontier = discovered
            .into_iter()
            .map(|id| group_prerequisites(id, catalog))
            .collect();
    }

    // Course nodes, minus those collapsed into a group node.
    let collapsed: BTreeSet<&str> = target_groups
        .iter()
        .flat_map(|id| equivalence::group(*id).members())
        .collect();

    let mut graph = DiGraph::new();
    let mut indices: BTreeMap<Node, NodeIndex> = BTreeMap::new();
    for id in &target_groups {
        let node = Node::Group(*id);
        indices.insert(node.clone(), graph.add_node(node));
    }
    for course in &in_scope {
        if collapsed.contains(course.code.as_str()) {
            continue;
        }
        let node = Node::Course(course.code.clone());
        indices.insert(node.clone(), graph.add_node(node));
    }

    // One edge per prerequisite entry, dependents in canonical node order.
    let dependents: Vec<(Node, Vec<String>)> = indices
        .keys()
        .map(|node| {
            let entries = match node {
                Node::Group(id) => group_prerequisites(*id, catalog),
                Node::Course(code) => catalog
                    .get(code)
                    .map(|course| course.prerequisites.clone())
                    .unwrap_or_default(),
            };
            (node.clone(), entries)
        })
        .collect();

    for (dependent, entries) in dependents {
        let from = indices[&dependent];
        for entry in entries {
            let Some(to) = resolve_target(&entry, &indices) else {
                continue;
            };
            if from == to || graph.find_edge(from, to).is_some() {
                continue;
            }
            if config.suppress_redundant_edges && has_path_connecting(&graph, from, to, None) {
                tracing::debug!(
                    from = %dependent.label(),
                    entry,
                    "suppressing transitively-implied edge"
                );
                continue;
            }
            let satisfaction = if entry_satisfied(&entry, &index) {
                Satisfaction::Satisfied
            } else {
                Satisfaction::Unsatisfied
            };
            graph.add_edge(from, to, satisfaction);
        }
    }

    PrerequisiteGraph { graph, indices }
}

/// The prerequisite entries a group node inherits from its members.
///
/// The union of the members' catalog entries, in member order, with entries
/// resolving back to the group itself dropped and duplicates (by resolved
/// target) removed.
fn group_prerequisites(id: GroupId, catalog: &Catalog) -> Vec<String> {
    let group = equivalence::group(id);
    let mut entries = Vec::new();
    let mut seen = BTreeSet::new();
    for member in group.members() {
        let Ok(code) = CourseCode::new(member) else {
            continue;
        };
        let Some(course) = catalog.get(&code) else {
            continue;
        };
        for entry in &course.prerequisites {
            if entry.is_empty() {
                continue;
            }
            let resolved = equivalence::resolve(entry);
            if resolved.is_some_and(|owner| owner.id == id) {
                continue;
            }
            let key = resolved.map_or_else(|| entry.clone(), |owner| owner.label());
            if seen.insert(key) {
                entries.push(entry.clone());
            }
        }
    }
    entries
}

/// Maps a raw prerequisite entry onto an existing node, if any.
fn resolve_target(entry: &str, indices: &BTreeMap<Node, NodeIndex>) -> Option<NodeIndex> {
    if let Some(group) = equivalence::resolve(entry) {
        return indices.get(&Node::Group(group.id)).copied();
    }
    let code = CourseCode::new(entry).ok()?;
    indices.get(&Node::Course(code)).copied()
}
