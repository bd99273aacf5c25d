use super::locator::Locator;
use super::node::{Frontier, Node};
use super::path::Path;
use crate::point::Point2i;

/// A* search over the open grid, from a starting to an ending cell, using
/// a locator for collision checks.
pub struct AStar<'a> {
    start: Point2i,
    end: Point2i,
    locator: &'a dyn Locator,
}

impl<'a> AStar<'a> {
    /// Constructs a new search between the two end points.
    pub fn new(start: Point2i, end: Point2i, locator: &'a dyn Locator) -> Self {
        Self {
            start,
            end,
            locator,
        }
    }

    /// Searches for a path between the two end points. `radius` bounds how
    /// far from the start any point of the path may lie; a non-positive
    /// value means no bound. Returns `None` when the goal cannot be
    /// reached.
    pub fn find_path(&self, radius: f32) -> Option<Path> {
        let mut frontier = Frontier::new();
        frontier.seed(self.start, self.start.distance(self.end));

        while let Some(current) = frontier.pick_best(true) {
            if current.contains(self.end) {
                return self.reconstruct(&frontier, radius);
            }

            for neighbor in current.neighbors(self.end) {
                // an obstructed cell is skipped, unless it is the goal
                // itself: reaching the target is always allowed
                if self.locator.obstructed(neighbor.pos(), false)
                    && !neighbor.contains(self.end)
                {
                    continue;
                }
                // don't consider cells farther away from the source than
                // allowed by the caller
                if radius > 0.0
                    && self.start.distance(neighbor.pos()) >= radius
                {
                    continue;
                }
                frontier.explore(neighbor, current.pos());
            }
        }

        None
    }

    /// Rebuilds the path from the ancestry gathered by the exploration and
    /// validates it against the starting point and the allowed radius.
    fn reconstruct(&self, frontier: &Frontier, radius: f32) -> Option<Path> {
        let mut path = frontier.reconstruct(self.end);
        path.reverse();

        if path.begin() != Some(self.start) {
            return None;
        }
        // reject only points that exceed the cap, so a path touching the
        // boundary exactly remains valid
        if radius > 0.0
            && path.iter().any(|&p| self.start.distance(p) > radius)
        {
            return None;
        }

        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A locator backed by a plain list of obstructed cells.
    struct Walls(Vec<Point2i>);

    impl Locator for Walls {
        fn obstructed(&self, p: Point2i, _include_non_solid: bool) -> bool {
            self.0.contains(&p)
        }

        fn visible(&self, _center: Point2i, _radius: f32) -> Vec<usize> {
            Vec::new()
        }

        fn get(&self, _index: usize) -> Option<&crate::entity::Element> {
            None
        }
    }

    /// A walled courtyard with open corners: two vertical walls flanking
    /// the start and two horizontal walls above and below it.
    fn corridor() -> Walls {
        let mut cells = Vec::new();
        for y in -2..=2 {
            cells.push(Point2i::new(-5, y));
            cells.push(Point2i::new(5, y));
        }
        for x in -2..=2 {
            cells.push(Point2i::new(x, 7));
            cells.push(Point2i::new(x, -7));
        }
        Walls(cells)
    }

    /// Asserts the path is walkable: starts at `s`, ends at `e`, moves one
    /// cardinal cell at a time and never crosses an obstructed interior
    /// cell.
    fn assert_valid(path: &Path, s: Point2i, e: Point2i, walls: &Walls) {
        assert_eq!(path.begin(), Some(s));
        assert_eq!(path.end(), Some(e));
        let points: Vec<_> = path.iter().copied().collect();
        for pair in points.windows(2) {
            let delta = pair[1] - pair[0];
            assert_eq!(delta.x.abs() + delta.y.abs(), 1);
        }
        for &p in &points {
            if p != e {
                assert!(!walls.obstructed(p, false));
            }
        }
    }

    #[test]
    fn straight_line_on_open_grid() {
        let s = Point2i::new(0, 0);
        let e = Point2i::new(6, 0);
        let walls = Walls(Vec::new());
        let path = AStar::new(s, e, &walls).find_path(-1.0).unwrap();
        assert_eq!(path.len(), 7);
        assert_valid(&path, s, e, &walls);
    }

    #[test]
    fn routes_around_the_corridor_walls() {
        let s = Point2i::new(0, 0);
        let e = Point2i::new(6, 0);
        let walls = corridor();
        let path = AStar::new(s, e, &walls).find_path(-1.0).unwrap();
        assert_valid(&path, s, e, &walls);
        // the wall at x = 5 forces a detour beyond the straight distance
        assert!(path.len() > 7);
    }

    #[test]
    fn obstructed_goal_remains_reachable() {
        let s = Point2i::new(0, 0);
        let e = Point2i::new(3, 0);
        let walls = Walls(vec![e]);
        let path = AStar::new(s, e, &walls).find_path(-1.0).unwrap();
        assert_valid(&path, s, e, &walls);
    }

    #[test]
    fn enclosed_start_fails() {
        let s = Point2i::new(0, 0);
        let e = Point2i::new(4, 0);
        let walls = Walls(vec![
            Point2i::new(1, 0),
            Point2i::new(-1, 0),
            Point2i::new(0, 1),
            Point2i::new(0, -1),
        ]);
        assert!(AStar::new(s, e, &walls).find_path(-1.0).is_none());
    }

    #[test]
    fn radius_caps_the_detour() {
        let s = Point2i::new(0, 0);
        let e = Point2i::new(2, 0);
        // a wall at x = 1 spanning y in [-3, 3] forces the path through
        // cells at distance greater than 3 from the start
        let mut cells = Vec::new();
        for y in -3..=3 {
            cells.push(Point2i::new(1, y));
        }
        let walls = Walls(cells);
        assert!(AStar::new(s, e, &walls).find_path(3.0).is_none());
        assert!(AStar::new(s, e, &walls).find_path(-1.0).is_some());
    }

    #[test]
    fn start_equals_end() {
        let s = Point2i::new(2, 2);
        let walls = Walls(Vec::new());
        let path = AStar::new(s, s, &walls).find_path(-1.0).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.begin(), Some(s));
    }

    #[test]
    fn zero_radius_means_no_cap() {
        let s = Point2i::new(2, 2);
        let walls = Walls(Vec::new());
        let path = AStar::new(s, s, &walls).find_path(0.0).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.begin(), Some(s));

        // a regular search is not capped either
        let e = Point2i::new(5, 2);
        assert!(AStar::new(s, e, &walls).find_path(0.0).is_some());
    }

    #[test]
    fn boundary_point_at_the_radius_is_valid() {
        // a path whose farthest point sits exactly at the cap is kept:
        // only points beyond it are rejected
        let s = Point2i::new(0, 0);
        let e = Point2i::new(3, 0);
        let walls = Walls(Vec::new());
        let astar = AStar::new(s, e, &walls);

        let mut frontier = Frontier::new();
        frontier.seed(s, s.distance(e));
        let mut previous = Node::new(s, 0.0, s.distance(e));
        for x in 1..=3 {
            let p = Point2i::new(x, 0);
            let node = Node::new(p, x as f32, p.distance(e));
            frontier.explore(node, previous.pos());
            previous = node;
        }

        assert!(astar.reconstruct(&frontier, 3.0).is_some());
        assert!(astar.reconstruct(&frontier, 2.5).is_none());
    }
}
