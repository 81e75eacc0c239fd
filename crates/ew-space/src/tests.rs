//! Unit tests for ew-space.

use ew_core::{NodeId, ResourceTable, Terrain};

use crate::{EdgeAttrs, NodeAttrs, Space, SpaceError};

fn plain_node() -> NodeAttrs {
    NodeAttrs {
        temperature: 15.0,
        terrain: Terrain::Plains,
        disaster_rate: 0.0,
        capacity: ResourceTable::new(),
        initial_resources: ResourceTable::new(),
    }
}

fn quick_edge() -> EdgeAttrs {
    EdgeAttrs {
        distance: 1.0,
        travel_time: 1,
        capacity: 4,
        danger: 0.0,
    }
}

/// Line graph 0 — 1 — 2 — … — (n-1).
fn line(n: usize) -> Space {
    let mut space = Space::new();
    let ids: Vec<NodeId> = (0..n).map(|_| space.add_node(plain_node())).collect();
    for w in ids.windows(2) {
        space.add_edge(w[0], w[1], quick_edge()).unwrap();
    }
    space
}

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn node_ids_are_sequential() {
        let mut space = Space::new();
        assert_eq!(space.add_node(plain_node()), NodeId(0));
        assert_eq!(space.add_node(plain_node()), NodeId(1));
        assert_eq!(space.node_count(), 2);
    }

    #[test]
    fn self_loop_rejected() {
        let mut space = Space::new();
        let a = space.add_node(plain_node());
        assert_eq!(space.add_edge(a, a, quick_edge()), Err(SpaceError::SelfLoop(a)));
    }

    #[test]
    fn duplicate_edge_rejected() {
        let mut space = Space::new();
        let a = space.add_node(plain_node());
        let b = space.add_node(plain_node());
        space.add_edge(a, b, quick_edge()).unwrap();
        // Either direction counts as a duplicate of an undirected edge.
        assert!(space.add_edge(b, a, quick_edge()).is_err());
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let mut space = Space::new();
        let a = space.add_node(plain_node());
        assert_eq!(
            space.add_edge(a, NodeId(9), quick_edge()),
            Err(SpaceError::UnknownNode(NodeId(9)))
        );
    }
}

#[cfg(test)]
mod queries {
    use super::*;

    #[test]
    fn edge_between_is_symmetric() {
        let space = line(3);
        let e = space.edge_between(NodeId(0), NodeId(1));
        assert!(e.is_some());
        assert_eq!(space.edge_between(NodeId(1), NodeId(0)), e);
        assert_eq!(space.edge_between(NodeId(0), NodeId(2)), None);
    }

    #[test]
    fn neighbors_of_middle_node() {
        let space = line(3);
        let n: Vec<NodeId> = space.neighbors(NodeId(1)).iter().map(|&(n, _)| n).collect();
        assert_eq!(n, vec![NodeId(0), NodeId(2)]);
    }

    #[test]
    fn other_end() {
        let space = line(2);
        let e = space.edge(space.edge_between(NodeId(0), NodeId(1)).unwrap()).unwrap();
        assert_eq!(e.other_end(NodeId(0)), Some(NodeId(1)));
        assert_eq!(e.other_end(NodeId(5)), None);
    }
}

#[cfg(test)]
mod traversal {
    use super::*;

    #[test]
    fn bfs_visits_all_connected() {
        let space = line(6);
        let order = space.bfs(NodeId(0), None);
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], NodeId(0));
    }

    #[test]
    fn bfs_respects_depth_limit() {
        let space = line(6);
        let order = space.bfs(NodeId(0), Some(2));
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn bfs_skips_disconnected() {
        let mut space = line(3);
        space.add_node(plain_node()); // island
        let order = space.bfs(NodeId(0), None);
        assert_eq!(order.len(), 3);
    }

    #[test]
    fn hop_distance() {
        let space = line(5);
        assert_eq!(space.hop_distance(NodeId(0), NodeId(0)), Some(0));
        assert_eq!(space.hop_distance(NodeId(0), NodeId(3)), Some(3));
        let mut with_island = line(2);
        let island = with_island.add_node(plain_node());
        assert_eq!(with_island.hop_distance(NodeId(0), island), None);
    }
}

#[cfg(test)]
mod wear {
    use super::*;

    #[test]
    fn effective_travel_time_inflates_below_half() {
        let mut space = line(2);
        let eid = space.edge_between(NodeId(0), NodeId(1)).unwrap();
        let edge = space.edge_mut(eid).unwrap();
        edge.travel_time = 4;

        edge.durability = 1.0;
        assert_eq!(edge.effective_travel_time(), 4);
        edge.durability = 0.5;
        assert_eq!(edge.effective_travel_time(), 4);
        edge.durability = 0.0;
        assert_eq!(edge.effective_travel_time(), 8);
        assert!(edge.is_degraded());
    }
}

#[cfg(test)]
mod serde_roundtrip {
    use super::*;

    #[test]
    fn space_roundtrips_through_json() {
        let mut space = line(4);
        space.node_mut(NodeId(2)).unwrap().waste_heat = 7.5;
        let json = serde_json::to_string(&space).unwrap();
        let back: Space = serde_json::from_str(&json).unwrap();
        assert_eq!(back, space);
    }
}
