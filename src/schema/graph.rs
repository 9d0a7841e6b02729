//! Field dependency graph.
//!
//! Fields may declare that other fields must be processed before them. The
//! graph is built once when a schema is built: unknown dependencies and cycles
//! are rejected there, and the processing order is fixed for every pass.

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

use crate::core::NormalizeError;
use crate::schema::Field;

/// Color states for cycle path recovery using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Directed graph with an edge `dependency → dependent` per declaration.
pub(crate) struct FieldGraph {
    graph: DiGraph<String, ()>,
}

impl FieldGraph {
    /// Build the graph for fields in registration order.
    pub(crate) fn build(fields: &[Field]) -> Result<Self, NormalizeError> {
        let mut graph = DiGraph::with_capacity(fields.len(), fields.len());
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(fields.len());
        for field in fields {
            index.insert(field.name(), graph.add_node(field.name().to_string()));
        }

        for field in fields {
            let dependent = index[field.name()];
            for dependency in field.dependencies() {
                let Some(&dep) = index.get(dependency.as_str()) else {
                    return Err(NormalizeError::UnknownDependency {
                        field: field.name().to_string(),
                        dependency: dependency.clone(),
                    });
                };
                if !graph.contains_edge(dep, dependent) {
                    graph.add_edge(dep, dependent, ());
                }
            }
        }

        Ok(Self {
            graph,
        })
    }

    /// Processing order as registration indices.
    ///
    /// Dependencies come before dependents; among fields that are ready at the
    /// same time, registration order wins.
    pub(crate) fn order(&self) -> Result<Vec<usize>, NormalizeError> {
        if let Err(cycle) = toposort(&self.graph, None) {
            let path = self.cycle_through(cycle.node_id());
            return Err(NormalizeError::CircularDependency {
                cycle: path.join(" → "),
            });
        }

        let mut pending: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();
        let mut ready: BTreeSet<usize> =
            pending.iter().enumerate().filter(|(_, n)| **n == 0).map(|(i, _)| i).collect();
        let mut order = Vec::with_capacity(pending.len());

        while let Some(next) = ready.pop_first() {
            order.push(next);
            for dependent in self.graph.neighbors_directed(NodeIndex::new(next), Direction::Outgoing)
            {
                let slot = &mut pending[dependent.index()];
                *slot -= 1;
                if *slot == 0 {
                    ready.insert(dependent.index());
                }
            }
        }

        Ok(order)
    }

    /// Names along a cycle reachable from `start`, closed by repeating the first.
    fn cycle_through(&self, start: NodeIndex) -> Vec<String> {
        let mut colors = vec![Color::White; self.graph.node_count()];
        let mut path = Vec::new();
        self.dfs(start, &mut colors, &mut path)
            .unwrap_or_else(|| vec![self.graph[start].clone()])
    }

    fn dfs(
        &self,
        node: NodeIndex,
        colors: &mut [Color],
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<String>> {
        colors[node.index()] = Color::Gray;
        path.push(node);

        for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
            match colors[next.index()] {
                Color::Gray => {
                    let start = path.iter().position(|n| *n == next).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|n| self.graph[*n].clone()).collect();
                    cycle.push(self.graph[next].clone());
                    return Some(cycle);
                }
                Color::White => {
                    if let Some(cycle) = self.dfs(next, colors, path) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }

        path.pop();
        colors[node.index()] = Color::Black;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, deps: &[&str]) -> Field {
        Field::new(name, "string").unwrap().depends_on(deps.iter().copied())
    }

    #[test]
    fn test_order_keeps_registration_order_without_dependencies() {
        let fields = vec![field("b", &[]), field("a", &[]), field("c", &[])];
        let order = FieldGraph::build(&fields).unwrap().order().unwrap();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_dependency_moves_ahead() {
        // tasks (0) depends on cwd (2)
        let fields = vec![field("tasks", &["cwd"]), field("name", &[]), field("cwd", &[])];
        let order = FieldGraph::build(&fields).unwrap().order().unwrap();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_unknown_dependency() {
        let fields = vec![field("bin", &["files"])];
        let err = FieldGraph::build(&fields).err().unwrap();
        assert!(matches!(err, NormalizeError::UnknownDependency { ref dependency, .. } if dependency == "files"));
    }

    #[test]
    fn test_cycle_is_rejected_with_path() {
        let fields = vec![field("a", &["b"]), field("b", &["c"]), field("c", &["a"])];
        let err = FieldGraph::build(&fields).unwrap().order().unwrap_err();
        let NormalizeError::CircularDependency {
            cycle,
        } = err
        else {
            panic!("expected a cycle error");
        };
        assert!(cycle.contains('a') && cycle.contains('b') && cycle.contains('c'));
        assert_eq!(cycle.split(" → ").count(), 4);
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let fields = vec![field("a", &["a"])];
        assert!(FieldGraph::build(&fields).unwrap().order().is_err());
    }
}
