use std::mem;

use crate::entity::{Data, Element, Info, StepInfo, Tile};
use crate::influence::Influence;
use crate::motion::Locator;
use crate::point::Point2i;

/// The collection of every element of the world, kept in insertion order
/// so that iteration is deterministic. The grid itself is unbounded: the
/// elements carry their own coordinates and the lookup scans linearly,
/// which is enough at the scale of a few hundred elements.
#[derive(Default)]
pub struct Grid {
    cells: Vec<Element>,
    next_id: u64,
}

impl Grid {
    /// Constructs a new grid with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of elements registered in the grid at the moment.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true only if the grid holds no element.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Gets the element at the specified index. Panics when the index is
    /// out of range, which indicates a broken contract in the caller.
    pub fn at(&self, id: usize) -> &Element {
        &self.cells[id]
    }

    pub(crate) fn at_mut(&mut self, id: usize) -> &mut Element {
        &mut self.cells[id]
    }

    /// Gets the indices of all the elements occupying the given cell.
    /// Non solid elements (ants and pheromones) are only included when
    /// `include_non_solid` is set.
    pub fn at_cell(
        &self,
        x: i32,
        y: i32,
        include_non_solid: bool,
    ) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, el)| el.pos() == Point2i::new(x, y))
            .filter(|(_, el)| include_non_solid || el.tile().is_solid())
            .map(|(id, _)| id)
            .collect()
    }

    /// Iterates over the elements of the grid, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.cells.iter()
    }

    /// The minimum extent reached by an element of the grid.
    pub fn min(&self) -> Point2i {
        self.cells.iter().fold(Point2i::default(), |min, el| {
            Point2i::new(min.x.min(el.pos().x), min.y.min(el.pos().y))
        })
    }

    /// The maximum extent reached by an element of the grid.
    pub fn max(&self) -> Point2i {
        self.cells.iter().fold(Point2i::default(), |max, el| {
            Point2i::new(max.x.max(el.pos().x), max.y.max(el.pos().y))
        })
    }

    /// Spawns a new element in the grid. A pheromone is merged into an
    /// existing one of equal scent at the same cell when possible; a solid
    /// element is silently rejected when its cell is already occupied.
    /// Returns whether the element was registered (or merged).
    pub fn spawn(&mut self, mut element: Element) -> bool {
        if element.tile() == Tile::Pheromon && self.merge_pheromon(&element) {
            return true;
        }

        if element.tile().is_solid() {
            let pos = element.pos();
            if !self.at_cell(pos.x, pos.y, true).is_empty() {
                log::debug!(
                    "Preventing insertion of {} at {}: cell already occupied",
                    element.tile(),
                    pos
                );
                return false;
            }
        }

        element.assign_id(self.next_id);
        self.next_id += 1;

        log::trace!(
            "Spawning element of kind {} at {}",
            element.tile(),
            element.pos()
        );
        self.cells.push(element);
        true
    }

    /// Removes the elements which have been marked for deletion,
    /// preserving the order of the survivors.
    pub fn update(&mut self) {
        let before = self.cells.len();
        self.cells.retain(|el| !el.deleted());
        if before != self.cells.len() {
            log::trace!("Removed {} element(s)", before - self.cells.len());
        }
    }

    /// Advances the element at the given index by one tick: the brain runs
    /// against a read-only view of the grid, then its decisions (path,
    /// spawn requests, influences, self destruction) are folded back into
    /// the body, which finally advances along its path if the movement
    /// cadence allows.
    pub(crate) fn step_element(&mut self, id: usize, step: &mut StepInfo<'_>) {
        // the brain and path are moved out of the body so that the brain
        // can borrow the rest of the grid as its locator
        let (mut brain, mut path, pos, first) = {
            let el = &mut self.cells[id];
            let first = !el.initialized;
            (el.brain.take(), mem::take(&mut el.path), el.pos(), first)
        };

        let mut destruct = false;
        if let Some(brain) = brain.as_mut() {
            let mut info = Info {
                index: id,
                pos,
                rng: &mut *step.rng,
                moment: step.moment,
                elapsed: step.elapsed,
                path: &mut path,
                locator: &*self,
                self_destruct: false,
                spawned: Vec::new(),
                actions: &mut step.actions,
            };

            if first {
                brain.init(&mut info);
            } else {
                brain.step(&mut info);
            }

            destruct = info.self_destruct;
            for animat in info.spawned {
                step.spawned.push(Element::from_animat(animat));
            }
        }

        let had_brain = brain.is_some();
        let el = &mut self.cells[id];
        el.brain = brain;
        el.path = path;
        if destruct {
            el.deleted = true;
        }
        if first {
            el.initialized = true;
            el.last_move = step.moment;
        } else if had_brain {
            el.advance_along_path(step.moment);
        }
    }

    /// Applies a deferred influence to both of its participants, emitter
    /// first. The receiver is skipped when the emitter rejects it.
    pub(crate) fn apply(&mut self, influence: &Influence) -> bool {
        let (emitter, receiver) = influence.participants();
        if !self.at_mut(emitter).influence(influence, emitter) {
            return false;
        }
        self.at_mut(receiver).influence(influence, receiver)
    }

    /// Attempts to merge the input pheromone with an existing one of the
    /// same scent at the same cell. Returns whether the merge happened.
    fn merge_pheromon(&mut self, pheromon: &Element) -> bool {
        let scent = match pheromon.data() {
            Data::Pheromon { scent, .. } => scent,
            _ => return false,
        };

        let pos = pheromon.pos();
        let candidate = self
            .at_cell(pos.x, pos.y, true)
            .into_iter()
            .find(|&id| match self.cells[id].data() {
                Data::Pheromon { scent: s, .. } => s == scent,
                _ => false,
            });

        match candidate {
            Some(id) => {
                self.cells[id].merge(pheromon);
                true
            }
            None => false,
        }
    }
}

impl Locator for Grid {
    fn obstructed(&self, p: Point2i, include_non_solid: bool) -> bool {
        !self.at_cell(p.x, p.y, include_non_solid).is_empty()
    }

    fn visible(&self, center: Point2i, radius: f32) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, el)| el.pos().distance(center) < radius)
            .map(|(id, _)| id)
            .collect()
    }

    fn get(&self, index: usize) -> Option<&Element> {
        self.cells.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Brain, Food, Pheromon, Scent};

    fn pheromon(pos: Point2i, scent: Scent, amount: f32, rate: f32) -> Element {
        Element::with_brain(
            pos,
            Brain::Pheromon(Pheromon::new(scent, 0.0, amount, rate)),
        )
    }

    #[test]
    fn equal_scents_merge_on_spawn() {
        let mut grid = Grid::new();
        let pos = Point2i::new(3, 3);
        assert!(grid.spawn(pheromon(pos, Scent::Food, 1.0, 0.1)));
        assert!(grid.spawn(pheromon(pos, Scent::Food, 1.0, 0.2)));

        assert_eq!(grid.len(), 1);
        match grid.at(0).data() {
            Data::Pheromon {
                amount,
                evaporation,
                ..
            } => {
                assert!((amount - 2.0).abs() < f32::EPSILON);
                assert!((evaporation - 0.15).abs() < f32::EPSILON);
            }
            data => panic!("Unexpected data {:?}", data),
        }
    }

    #[test]
    fn different_scents_share_a_cell() {
        let mut grid = Grid::new();
        let pos = Point2i::new(1, -2);
        grid.spawn(pheromon(pos, Scent::Food, 1.0, 0.1));
        grid.spawn(pheromon(pos, Scent::Home, 1.0, 0.1));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn solid_spawn_is_rejected_on_any_occupant() {
        let mut grid = Grid::new();
        let pos = Point2i::new(0, 0);
        grid.spawn(pheromon(pos, Scent::Home, 1.0, 0.1));
        assert!(!grid.spawn(Element::with_brain(
            pos,
            Brain::Food(Food::new(10.0))
        )));
        assert_eq!(grid.len(), 1);

        // a free cell next to it is fine
        assert!(grid.spawn(Element::with_brain(
            Point2i::new(1, 0),
            Brain::Food(Food::new(10.0))
        )));
    }

    #[test]
    fn update_prunes_preserving_order() {
        let mut grid = Grid::new();
        for x in 0..4 {
            grid.spawn(Element::new(Tile::Obstacle, Point2i::new(x, 0)));
        }
        grid.at_mut(1).deleted = true;
        grid.at_mut(2).deleted = true;
        grid.update();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.at(0).pos(), Point2i::new(0, 0));
        assert_eq!(grid.at(1).pos(), Point2i::new(3, 0));
    }

    #[test]
    fn visibility_is_a_strict_distance_filter() {
        let mut grid = Grid::new();
        grid.spawn(Element::new(Tile::Obstacle, Point2i::new(3, 0)));
        grid.spawn(Element::new(Tile::Obstacle, Point2i::new(5, 0)));
        grid.spawn(Element::new(Tile::Obstacle, Point2i::new(6, 0)));

        let seen = grid.visible(Point2i::new(0, 0), 5.0);
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn obstruction_distinguishes_solidity() {
        let mut grid = Grid::new();
        let pos = Point2i::new(2, 2);
        grid.spawn(pheromon(pos, Scent::Home, 1.0, 0.1));

        assert!(!grid.obstructed(pos, false));
        assert!(grid.obstructed(pos, true));

        grid.spawn(Element::new(Tile::Obstacle, pos));
        assert!(grid.obstructed(pos, false));
    }

    #[test]
    fn extent_follows_the_elements() {
        let mut grid = Grid::new();
        grid.spawn(Element::new(Tile::Obstacle, Point2i::new(-4, 2)));
        grid.spawn(Element::new(Tile::Obstacle, Point2i::new(3, -7)));
        assert_eq!(grid.min(), Point2i::new(-4, -7));
        assert_eq!(grid.max(), Point2i::new(3, 2));
    }
}
