use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

/// Total order used to sort the members of each component.
pub type Comparator<N> = fn(&N, &N) -> Ordering;

/// Undirected graph with insertion-ordered nodes.
///
/// Built once during a raster scan, then queried once through
/// [`BlockGraph::connected_components`]. Adjacency lists may hold the
/// same neighbour more than once; duplicates never change membership.
#[derive(Clone, Debug)]
pub struct BlockGraph<N> {
    index: HashMap<N, usize>,
    nodes: Vec<N>,
    adjacency: Vec<Vec<usize>>,
    comparator: Comparator<N>,
}

impl<N> BlockGraph<N>
where
    N: Clone + Eq + Hash + Debug,
{
    pub fn new(comparator: Comparator<N>) -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            adjacency: Vec::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Number of adjacency entries recorded for `node`, duplicates included.
    pub fn degree(&self, node: &N) -> Option<usize> {
        self.index.get(node).map(|&i| self.adjacency[i].len())
    }

    /// Registers `node` with an empty adjacency record.
    ///
    /// Re-adding an existing node clears its record but keeps its original
    /// position in the enumeration order. Neighbours keep their entries
    /// pointing back at it.
    pub fn add_node(&mut self, node: N) {
        match self.index.get(&node) {
            Some(&i) => self.adjacency[i].clear(),
            None => {
                self.insert(node);
            }
        }
    }

    /// Links `node` to `existing` in both directions.
    ///
    /// `node` is created on demand; `existing` must already be a node.
    /// On error the graph is left untouched.
    pub fn link_to_existing(&mut self, node: N, existing: &N) -> Result<(), GraphError> {
        let j = self.lookup(existing)?;
        let i = match self.index.get(&node) {
            Some(&i) => i,
            None => self.insert(node),
        };
        self.connect(i, j);
        Ok(())
    }

    /// Links two existing nodes in both directions.
    pub fn add_edge(&mut self, a: &N, b: &N) -> Result<(), GraphError> {
        let i = self.lookup(a)?;
        let j = self.lookup(b)?;
        self.connect(i, j);
        Ok(())
    }

    /// Groups nodes into connected components.
    ///
    /// Labels start as enumeration indices and are lowered in a single
    /// forward sweep: for each node `u` in enumeration order and each
    /// neighbour `v`, `label(v) = min(label(v), label(u))`. The sweep is
    /// exact when every edge joins a node to one enumerated before it
    /// along a raster scan, except where a label is lowered after the node
    /// has already been swept (see the `late_merge` test).
    ///
    /// Members of each component are sorted with the comparator; components
    /// are ordered by descending size, equal sizes by ascending label.
    pub fn connected_components(&self) -> Vec<Vec<N>> {
        let mut labels: Vec<usize> = (0..self.nodes.len()).collect();
        for (u, neighbours) in self.adjacency.iter().enumerate() {
            for &v in neighbours {
                labels[v] = labels[v].min(labels[u]);
            }
        }

        let mut groups: BTreeMap<usize, Vec<N>> = BTreeMap::new();
        for (node, label) in self.nodes.iter().zip(labels) {
            groups.entry(label).or_default().push(node.clone());
        }

        let mut components: Vec<Vec<N>> = groups
            .into_values()
            .map(|mut members| {
                members.sort_by(self.comparator);
                members
            })
            .collect();
        components.sort_by(|a, b| b.len().cmp(&a.len()));
        components
    }

    fn insert(&mut self, node: N) -> usize {
        let i = self.nodes.len();
        self.index.insert(node.clone(), i);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        i
    }

    fn lookup(&self, node: &N) -> Result<usize, GraphError> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(format!("{node:?}")))
    }

    fn connect(&mut self, i: usize, j: usize) {
        self.adjacency[i].push(j);
        self.adjacency[j].push(i);
    }
}
