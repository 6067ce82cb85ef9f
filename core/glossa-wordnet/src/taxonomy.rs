use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use glossa_protocol::{tokens, SharedTables};

/// One semantic field as a graph node.
#[derive(Debug, Clone)]
pub struct FieldNode {
    pub code: String,
    pub english: String,
}

/// The shared semantic-field hierarchy, materialized once per aggregate as
/// a directed graph with edges pointing from broader to narrower fields.
#[derive(Debug, Default)]
pub struct SemfieldHierarchy {
    graph: DiGraph<FieldNode, ()>,
    by_code: HashMap<String, NodeIndex>,
}

impl SemfieldHierarchy {
    /// Builds the graph from the hierarchy table. Both the hyper and the
    /// hypon columns contribute edges, so a one-sided row still links up.
    pub fn build(shared: Option<&SharedTables>) -> Self {
        let mut hierarchy = Self::default();
        let Some(shared) = shared else {
            return hierarchy;
        };
        let rows = shared.hierarchy();

        for row in rows {
            hierarchy.add_field(row.code.clone(), row.english.clone());
        }
        for row in rows {
            let own = hierarchy.by_code[&row.code];
            for name in tokens(&row.hypons) {
                if let Some(child_row) = rows.iter().find(|r| r.english == name) {
                    let child = hierarchy.by_code[&child_row.code];
                    hierarchy.graph.update_edge(own, child, ());
                }
            }
            for name in tokens(&row.hypers) {
                if let Some(parent_row) = rows.iter().find(|r| r.english == name) {
                    let parent = hierarchy.by_code[&parent_row.code];
                    hierarchy.graph.update_edge(parent, own, ());
                }
            }
        }
        hierarchy
    }

    fn add_field(&mut self, code: String, english: String) {
        if !self.by_code.contains_key(&code) {
            let index = self.graph.add_node(FieldNode {
                code: code.clone(),
                english,
            });
            self.by_code.insert(code, index);
        }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Every field, in table order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldNode> {
        self.graph.node_weights()
    }

    pub fn by_code(&self, code: &str) -> Option<&FieldNode> {
        self.by_code.get(code).map(|index| &self.graph[*index])
    }

    /// All fields carrying the given name; more than one means the name is
    /// ambiguous without a code.
    pub fn by_english(&self, english: &str) -> Vec<&FieldNode> {
        self.graph
            .node_weights()
            .filter(|node| node.english == english)
            .collect()
    }

    /// Immediately broader fields of the given code.
    pub fn hypers_of(&self, code: &str) -> Vec<&FieldNode> {
        self.neighbors(code, Direction::Incoming)
    }

    /// Immediately narrower fields of the given code.
    pub fn hypons_of(&self, code: &str) -> Vec<&FieldNode> {
        self.neighbors(code, Direction::Outgoing)
    }

    fn neighbors(&self, code: &str, direction: Direction) -> Vec<&FieldNode> {
        match self.by_code.get(code) {
            Some(index) => self
                .graph
                .neighbors_directed(*index, direction)
                .map(|neighbor| &self.graph[neighbor])
                .collect(),
            None => Vec::new(),
        }
    }
}
