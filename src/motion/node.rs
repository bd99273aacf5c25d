use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use super::path::Path;
use crate::point::Point2i;

/// A node opened by the path search: a position together with the cost to
/// reach it from the start and the heuristic to the goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pos: Point2i,
    cost: f32,
    heuristic: f32,
}

impl Node {
    /// Constructs a new node with the specified position, cost and
    /// heuristic.
    pub fn new(pos: Point2i, cost: f32, heuristic: f32) -> Self {
        Self {
            pos,
            cost,
            heuristic,
        }
    }

    /// Gets the position of the node.
    pub fn pos(&self) -> Point2i {
        self.pos
    }

    /// Gets the cost to reach this node from the start.
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Whether or not the node contains the given point.
    pub fn contains(&self, p: Point2i) -> bool {
        self.pos == p
    }

    /// Generates the four cardinal neighbors of this node, each with its
    /// cumulative cost and its heuristic towards the target.
    pub fn neighbors(&self, target: Point2i) -> Vec<Node> {
        [(1, 0), (0, 1), (-1, 0), (0, -1)]
            .iter()
            .map(|&(dx, dy)| {
                let np = self.pos + Point2i::new(dx, dy);
                Node::new(
                    np,
                    self.cost + self.pos.distance(np),
                    np.distance(target),
                )
            })
            .collect()
    }

    /// The priority scoring function of the node.
    fn score(&self) -> f32 {
        self.cost + self.heuristic
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed on the score so that the max-heap pops the minimum,
        // with a coordinate tie-break to keep the ordering deterministic
        other
            .score()
            .partial_cmp(&self.score())
            .expect("Non-finite cost in path search")
            .then_with(|| self.pos.cmp(&other.pos))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The best known way to reach a position: its parent on that way and the
/// cumulative cost.
#[derive(Debug, Clone, Copy)]
struct Ancestor {
    parent: Option<Point2i>,
    cost: f32,
}

/// The open set and the ancestry map built while exploring the grid.
#[derive(Default)]
pub struct Frontier {
    open: BinaryHeap<Node>,
    ancestors: HashMap<Point2i, Ancestor>,
}

impl Frontier {
    /// Constructs a new empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the frontier with the starting point of the search. The start
    /// is registered with no parent so that reconstruction terminates at
    /// it.
    pub fn seed(&mut self, p: Point2i, heuristic: f32) {
        self.open.push(Node::new(p, 0.0, heuristic));
        self.ancestors.insert(
            p,
            Ancestor {
                parent: None,
                cost: 0.0,
            },
        );
    }

    /// Returns true only if there is no node left to examine.
    pub fn stuck(&self) -> bool {
        self.open.is_empty()
    }

    /// Registers a candidate node reached from `parent`. A position seen
    /// for the first time is recorded and opened; a known position is
    /// re-parented only when the new cost beats the recorded one, in which
    /// case the node is pushed again and a stale duplicate may linger in
    /// the open set.
    pub fn explore(&mut self, child: Node, parent: Point2i) {
        let ancestor = Ancestor {
            parent: Some(parent),
            cost: child.cost(),
        };
        match self.ancestors.entry(child.pos()) {
            Entry::Vacant(entry) => {
                entry.insert(ancestor);
                self.open.push(child);
            }
            Entry::Occupied(mut entry) => {
                if child.cost() < entry.get().cost {
                    entry.insert(ancestor);
                    self.open.push(child);
                }
            }
        }
    }

    /// Returns the open node with the minimum cost plus heuristic, popping
    /// it from the open set if requested.
    pub fn pick_best(&mut self, pop: bool) -> Option<Node> {
        if pop {
            self.open.pop()
        } else {
            self.open.peek().copied()
        }
    }

    /// Walks the ancestry from `end` back to a position with no recorded
    /// parent and returns the points visited, end first.
    pub fn reconstruct(&self, end: Point2i) -> Path {
        let mut path = Path::with_start(end);
        let mut cursor = Some(end);
        while let Some(p) = cursor {
            let ancestor = match self.ancestors.get(&p) {
                Some(ancestor) => ancestor,
                None => break,
            };
            path.add(p, false);
            cursor = ancestor.parent;
        }
        path
    }
}
