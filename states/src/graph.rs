use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt::{Debug, Formatter},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, from {:?}", .0)]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, from {:?} to {:?}", .0.route[0], .0.route[1])]
    DuplicateEdge(DepRoute<T>),
}

impl<T> TopologyError<T>
where
    T: Debug,
{
    /// Re-labels the nodes of the offending route, e.g. `TypeId` to type name.
    pub fn map<U, F>(self, f: F) -> TopologyError<U>
    where
        U: Debug,
        F: FnMut(T) -> U,
    {
        match self {
            Self::CycleDetected(route) => TopologyError::CycleDetected(route.map(f)),
            Self::DuplicateEdge(route) => TopologyError::DuplicateEdge(route.map(f)),
        }
    }
}

pub struct DepRoute<T> {
    // first means the start node, last means the end node
    route: Vec<T>,
}

impl<T> DepRoute<T> {
    pub fn nodes(&self) -> &[T] {
        &self.route
    }

    fn map<U>(self, f: impl FnMut(T) -> U) -> DepRoute<U> {
        DepRoute {
            route: self.route.into_iter().map(f).collect(),
        }
    }
}

impl<T> Debug for DepRoute<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Some((last, init)) = self.route.split_last() else {
            return write!(f, "[]");
        };
        for item in init {
            write!(f, "{item:?} -> ")?;
        }
        write!(f, "{last:?}")
    }
}

/// Directed dependency graph; an edge `from -> to` means `to` reads `from`.
#[derive(Debug)]
pub struct Graph<Node, Edge = ()>
where
    Node: Debug + PartialEq + Copy + Ord,
    Edge: Debug + PartialEq,
{
    routes: Vec<(Node, Edge, Node)>,

    route_cache: BTreeMap<Node, BTreeSet<Node>>,
}

impl<Node, Edge> Default for Graph<Node, Edge>
where
    Node: Debug + PartialEq + Copy + Ord,
    Edge: Debug + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node, Edge> Graph<Node, Edge>
where
    Node: Debug + PartialEq + Copy + Ord,
    Edge: Debug + PartialEq,
{
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),

            route_cache: BTreeMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            routes: Vec::with_capacity(capacity),

            route_cache: BTreeMap::new(),
        }
    }

    pub fn route_to(&mut self, from: Node, to: Node, via: Edge) {
        self.routes.push((from, via, to));
        self.route_cache.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn cal_in_out(&self) -> BTreeMap<Node, (usize, usize)> {
        let mut in_out = BTreeMap::<Node, (usize, usize)>::new();

        for (from, _via, to) in &self.routes {
            in_out.entry(*from).or_insert((0, 0)).1 += 1;
            in_out.entry(*to).or_insert((0, 0)).0 += 1;
        }

        in_out
    }

    /// Returns every node that appears in an edge, dependencies first.
    pub fn topology_sort(&self) -> Result<Vec<Node>, TopologyError<Node>> {
        let mut in_out = self.cal_in_out();
        let mut order = Vec::with_capacity(in_out.len());

        while !in_out.is_empty() {
            let Some((&node, _)) = in_out.iter().find(|(_, deg)| deg.0 == 0) else {
                let keys: Vec<Node> = in_out.keys().copied().collect();
                let route = self.find_cycle(&keys).unwrap_or_default();
                return Err(TopologyError::CycleDetected(DepRoute { route }));
            };

            in_out.remove(&node);
            order.push(node);

            for connected in self.direct_connected_nodes(node)? {
                if let Some(entry) = in_out.get_mut(&connected) {
                    entry.0 -= 1;
                }
            }
        }

        Ok(order)
    }

    fn find_cycle(&self, nodes: &[Node]) -> Option<Vec<Node>> {
        let mut visited = BTreeSet::new();
        // nodes on the current DFS path
        let mut path_set = BTreeSet::new();
        let mut path = Vec::new();

        let mut stack: Vec<(Node, std::vec::IntoIter<Node>)> = Vec::new();

        let neighbours_within = |node: Node| {
            self.direct_connected_nodes(node)
                .unwrap_or_default()
                .into_iter()
                .filter(|n| nodes.contains(n))
                .collect::<Vec<_>>()
                .into_iter()
        };

        for &start_node in nodes {
            if visited.contains(&start_node) {
                continue;
            }

            stack.push((start_node, neighbours_within(start_node)));
            visited.insert(start_node);
            path_set.insert(start_node);
            path.push(start_node);

            while let Some((current_node, neighbours)) = stack.last_mut() {
                if let Some(neighbour) = neighbours.next() {
                    if path_set.contains(&neighbour) {
                        if let Some(pos) = path.iter().position(|&x| x == neighbour) {
                            let mut cycle = path[pos..].to_vec();
                            cycle.push(neighbour);
                            return Some(cycle);
                        }
                    } else if !visited.contains(&neighbour) {
                        visited.insert(neighbour);
                        path_set.insert(neighbour);
                        path.push(neighbour);
                        stack.push((neighbour, neighbours_within(neighbour)));
                    }
                } else {
                    let node_to_remove = *current_node;
                    stack.pop();
                    path_set.remove(&node_to_remove);
                    path.pop();
                }
            }
        }
        None
    }

    /// # Connected Nodes, every node that transitively depends on the given node
    pub fn connected(&mut self, node: Node) -> impl Iterator<Item = &Node> {
        let routes = &self.routes;
        self.route_cache
            .entry(node)
            .or_insert_with(|| Self::connected_nodes(routes, node))
            .iter()
    }

    fn direct_connected_nodes(&self, node: Node) -> Result<BTreeSet<Node>, TopologyError<Node>> {
        let mut collected = BTreeSet::new();

        for (from, _via, to) in &self.routes {
            if from == &node && !collected.insert(*to) {
                return Err(TopologyError::DuplicateEdge(DepRoute {
                    route: vec![node, *to],
                }));
            }
        }

        Ok(collected)
    }

    fn connected_nodes(routes: &[(Node, Edge, Node)], node: Node) -> BTreeSet<Node> {
        let mut collected = BTreeSet::new();
        let mut queue = VecDeque::new();

        queue.push_back(node);

        while let Some(current) = queue.pop_front() {
            for (from, _via, to) in routes {
                // the collected check keeps cycles from looping forever
                if from == &current && collected.insert(*to) {
                    queue.push_back(*to);
                }
            }
        }

        collected
    }
}
