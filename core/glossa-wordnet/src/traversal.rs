//! Graph navigation over the relation edges a synset exposes: transitive
//! closure, depth metrics, root enumeration and root-path enumeration.

use std::collections::{HashSet, VecDeque};

use glossa_protocol::{RelationType, SynsetId};

use crate::error::Result;
use crate::synset::Synset;

/// Lazy breadth-first transitive closure under one relation type.
///
/// Yields every synset reachable from the origin, in BFS order, each at most
/// once and never the origin itself. Traversal faults (undecodable rows)
/// surface as an error item and end the walk.
pub struct Closure {
    ty: RelationType,
    limit: Option<usize>,
    queue: VecDeque<(Synset, usize)>,
    visited: HashSet<SynsetId>,
}

impl Iterator for Closure {
    type Item = Result<Synset>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.queue.pop_front()?;
        if self.limit.map_or(true, |limit| depth < limit) {
            let edges = match node.relations() {
                Ok(edges) => edges,
                Err(e) => {
                    self.queue.clear();
                    return Some(Err(e));
                }
            };
            // Nodes of another part of speech may not define the type at
            // all; for them the filter simply matches nothing.
            for edge in edges.iter().filter(|edge| edge.ty() == self.ty) {
                match edge.target() {
                    Ok(Some(target)) => {
                        if self.visited.insert(target.id().clone()) {
                            self.queue.push_back((target, depth + 1));
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        self.queue.clear();
                        return Some(Err(e));
                    }
                }
            }
        }
        Some(Ok(node))
    }
}

impl Synset {
    /// The transitive closure of this synset under `ty`, breadth-first.
    ///
    /// `limit` bounds the walk depth; `None` is unbounded. Requesting a type
    /// this synset's part of speech does not define fails up front.
    pub fn closure(&self, ty: RelationType, limit: Option<usize>) -> Result<Closure> {
        let mut visited = HashSet::from([self.id().clone()]);
        let mut queue = VecDeque::new();
        for edge in self.relations_of(ty)? {
            if let Some(target) = edge.target()? {
                if visited.insert(target.id().clone()) {
                    queue.push_back((target, 1));
                }
            }
        }
        Ok(Closure {
            ty,
            limit,
            queue,
            visited,
        })
    }

    /// Length of the longest hypernym path from this synset to a root.
    ///
    /// A synset with no hypernyms has depth 0. Revisiting a node already on
    /// the walk ends that branch at 0 instead of recursing forever; cyclic
    /// data therefore undercounts rather than failing.
    pub fn max_depth(&self) -> Result<usize> {
        let mut path = Vec::new();
        self.max_depth_from(&mut path)
    }

    fn max_depth_from(&self, path: &mut Vec<SynsetId>) -> Result<usize> {
        if path.len() > 1 && path[1..].contains(self.id()) {
            return Ok(0);
        }
        path.push(self.id().clone());
        let parents = self.hypernyms()?;
        if parents.is_empty() {
            return Ok(0);
        }
        let mut deepest = 0;
        for parent in &parents {
            deepest = deepest.max(parent.max_depth_from(path)?);
        }
        Ok(1 + deepest)
    }

    /// Length of the shortest hypernym path from this synset to a root.
    pub fn min_depth(&self) -> Result<usize> {
        let mut path = Vec::new();
        self.min_depth_from(&mut path)
    }

    fn min_depth_from(&self, path: &mut Vec<SynsetId>) -> Result<usize> {
        if path.len() > 1 && path[1..].contains(self.id()) {
            return Ok(0);
        }
        path.push(self.id().clone());
        let parents = self.hypernyms()?;
        if parents.is_empty() {
            return Ok(0);
        }
        let mut shallowest = usize::MAX;
        for parent in &parents {
            shallowest = shallowest.min(parent.min_depth_from(path)?);
        }
        Ok(1 + shallowest)
    }

    /// The topmost hypernyms reachable from this synset. A synset with no
    /// hypernym edges is its own sole root.
    pub fn roots(&self) -> Result<Vec<Synset>> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut todo = vec![self.clone()];
        while let Some(node) = todo.pop() {
            if !seen.insert(node.id().clone()) {
                continue;
            }
            let parents = node.hypernyms()?;
            if parents.is_empty() {
                result.push(node);
            } else {
                todo.extend(parents);
            }
        }
        Ok(result)
    }

    /// Every simple hypernym path from this synset to a root. Each path
    /// starts at the root and ends with this synset.
    ///
    /// The path count is bounded by the branching of the hypernym DAG;
    /// densely cross-classified taxonomies produce superlinearly many. A
    /// parent already on the current path is skipped, so malformed cyclic
    /// data terminates instead of recursing forever.
    pub fn paths_to_root(&self) -> Result<Vec<Vec<Synset>>> {
        let mut on_path = HashSet::new();
        self.paths_to_root_from(&mut on_path)
    }

    fn paths_to_root_from(&self, on_path: &mut HashSet<SynsetId>) -> Result<Vec<Vec<Synset>>> {
        on_path.insert(self.id().clone());
        let parents: Vec<Synset> = self
            .hypernyms()?
            .into_iter()
            .filter(|parent| !on_path.contains(parent.id()))
            .collect();
        let mut paths = Vec::new();
        if parents.is_empty() {
            paths.push(vec![self.clone()]);
        } else {
            for parent in parents {
                for mut ancestors in parent.paths_to_root_from(on_path)? {
                    ancestors.push(self.clone());
                    paths.push(ancestors);
                }
            }
        }
        on_path.remove(self.id());
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use glossa_protocol::Language;

    fn synset(id: &str) -> Synset {
        let store = fixtures::store();
        Synset::resolve(&store, id, Language::English)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_closure_excludes_origin_and_duplicates() {
        // dog -> {animal, pet} -> entity: entity reachable two ways, yielded
        // once; dog itself never
        let dog = synset("n#00000003");
        let reached: Vec<String> = dog
            .closure(RelationType::Hypernym, None)
            .unwrap()
            .map(|node| node.map(|s| s.id().to_string()))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(reached.len(), 3);
        assert!(!reached.contains(&"n#00000003".to_string()));
        assert_eq!(
            reached.iter().filter(|id| *id == "n#00000001").count(),
            1
        );
    }

    #[test]
    fn test_closure_depth_limit() {
        let dog = synset("n#00000003");
        let immediate: Vec<String> = dog
            .closure(RelationType::Hypernym, Some(1))
            .unwrap()
            .map(|node| node.map(|s| s.id().to_string()))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            immediate,
            vec!["n#00000002".to_string(), "n#00000005".to_string()]
        );
    }

    #[test]
    fn test_closure_rejects_undefined_type() {
        let run = synset("v#00000010");
        assert!(run.closure(RelationType::PartOf, None).is_err());
    }

    #[test]
    fn test_depths() {
        // dog: via animal = 2, via pet = 2; entity = 0
        let dog = synset("n#00000003");
        assert_eq!(dog.max_depth().unwrap(), 2);
        assert_eq!(dog.min_depth().unwrap(), 2);

        let entity = synset("n#00000001");
        assert_eq!(entity.max_depth().unwrap(), 0);
        assert_eq!(entity.min_depth().unwrap(), 0);

        // cat: single chain cat -> animal -> entity
        let cat = synset("n#00000004");
        assert_eq!(cat.max_depth().unwrap(), 2);
    }

    #[test]
    fn test_roots() {
        let dog = synset("n#00000003");
        let roots = dog.roots().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id().to_string(), "n#00000001");

        // A synset with no hypernym edges is its own sole root
        let entity = synset("n#00000001");
        let roots = entity.roots().unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0], entity);
    }

    #[test]
    fn test_paths_to_root() {
        let dog = synset("n#00000003");
        let mut paths: Vec<Vec<String>> = dog
            .paths_to_root()
            .unwrap()
            .into_iter()
            .map(|path| path.iter().map(|s| s.id().to_string()).collect())
            .collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                vec![
                    "n#00000001".to_string(),
                    "n#00000002".to_string(),
                    "n#00000003".to_string(),
                ],
                vec![
                    "n#00000001".to_string(),
                    "n#00000005".to_string(),
                    "n#00000003".to_string(),
                ],
            ]
        );
        // Every path starts at a root and ends here
        for path in dog.paths_to_root().unwrap() {
            assert!(path.first().unwrap().hypernyms().unwrap().is_empty());
            assert_eq!(path.last().unwrap(), &dog);
        }
    }

    #[test]
    fn test_cycle_guard_terminates() {
        // ouroboros synsets: x -> y -> x
        let store = fixtures::store();
        let x = Synset::resolve(&store, "n#00000040", Language::English)
            .unwrap()
            .unwrap();
        // The walk tolerates one revisit of the start node before the guard
        // cuts the branch off
        assert_eq!(x.max_depth().unwrap(), 3);
        assert_eq!(x.min_depth().unwrap(), 3);
        let paths = x.paths_to_root().unwrap();
        assert!(!paths.is_empty());
        // The closure still terminates and reports both members once
        let reached: Vec<Synset> = x
            .closure(RelationType::Hypernym, None)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(reached.len(), 1);
    }
}
