//! The `Space` graph: node/edge storage, adjacency, and traversal queries.

use std::collections::VecDeque;

use ew_core::{EdgeId, NodeId};

use crate::edge::{Edge, EdgeAttrs};
use crate::error::{SpaceError, SpaceResult};
use crate::node::{Node, NodeAttrs};

/// The world's spatial graph.
///
/// Nodes and edges are stored in id-indexed `Vec`s; adjacency lists hold
/// `(neighbor, edge)` pairs in insertion order.  Built incrementally by the
/// world generator, structurally static afterwards (only edge/node *state*
/// mutates during a run).
#[derive(Clone, Debug, PartialEq, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Space {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<(NodeId, EdgeId)>>,
}

impl Space {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a node and return its id (sequential from 0).
    pub fn add_node(&mut self, attrs: NodeAttrs) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, attrs));
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected edge between `a` and `b`.
    ///
    /// Rejects self-loops, unknown endpoints, and duplicate links.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, attrs: EdgeAttrs) -> SpaceResult<EdgeId> {
        if a == b {
            return Err(SpaceError::SelfLoop(a));
        }
        if a.index() >= self.nodes.len() {
            return Err(SpaceError::UnknownNode(a));
        }
        if b.index() >= self.nodes.len() {
            return Err(SpaceError::UnknownNode(b));
        }
        if self.edge_between(a, b).is_some() {
            return Err(SpaceError::DuplicateEdge(a, b));
        }

        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge::new(id, a, b, attrs));
        self.adjacency[a.index()].push((b, id));
        self.adjacency[b.index()].push((a, id));
        Ok(id)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index())
    }

    /// The edge linking `a` and `b`, if any.  Absence is an ordinary answer,
    /// not an error — callers decide how to handle it.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.adjacency
            .get(a.index())?
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, e)| e)
    }

    /// `(neighbor, edge)` pairs of `id`, in insertion order.
    pub fn neighbors(&self, id: NodeId) -> &[(NodeId, EdgeId)] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterator over all node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Iterator over all edge ids in ascending order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len() as u32).map(EdgeId)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Breadth-first traversal from `from`, visiting nodes at most
    /// `max_depth` hops away (`None` = unbounded).  Returns nodes in visit
    /// order, starting with `from`.  Deterministic: neighbors expand in
    /// adjacency insertion order.
    pub fn bfs(&self, from: NodeId, max_depth: Option<u32>) -> Vec<NodeId> {
        self.bfs_with_depth(from, max_depth)
            .into_iter()
            .map(|(node, _)| node)
            .collect()
    }

    /// [`bfs`](Self::bfs) that also reports each node's hop distance from
    /// `from`.
    pub fn bfs_with_depth(&self, from: NodeId, max_depth: Option<u32>) -> Vec<(NodeId, u32)> {
        if from.index() >= self.nodes.len() {
            return Vec::new();
        }
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        visited[from.index()] = true;
        queue.push_back((from, 0u32));

        while let Some((node, depth)) = queue.pop_front() {
            order.push((node, depth));
            if let Some(limit) = max_depth {
                if depth >= limit {
                    continue;
                }
            }
            for &(next, _) in &self.adjacency[node.index()] {
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back((next, depth + 1));
                }
            }
        }
        order
    }

    /// Hop distance from `from` to `to`, or `None` if unreachable.
    pub fn hop_distance(&self, from: NodeId, to: NodeId) -> Option<u32> {
        if from.index() >= self.nodes.len() || to.index() >= self.nodes.len() {
            return None;
        }
        if from == to {
            return Some(0);
        }
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        visited[from.index()] = true;
        queue.push_back((from, 0u32));

        while let Some((node, depth)) = queue.pop_front() {
            for &(next, _) in &self.adjacency[node.index()] {
                if next == to {
                    return Some(depth + 1);
                }
                if !visited[next.index()] {
                    visited[next.index()] = true;
                    queue.push_back((next, depth + 1));
                }
            }
        }
        None
    }
}
