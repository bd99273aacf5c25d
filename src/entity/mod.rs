use std::fmt;

use crate::time::TimeStamp;

pub use ant::*;
pub use brain::*;
pub use colony::*;
pub use element::*;
pub use food::*;
pub use pheromon::*;

pub mod ant;
pub mod brain;
pub mod colony;
pub mod element;
pub mod food;
pub mod pheromon;

/// A unique identifier for an element, allocated by the grid.
pub type Id = u64;

/// The kinds of all the elements.
#[derive(Debug, Hash, PartialEq, PartialOrd, Eq, Ord, Clone, Copy)]
pub enum Tile {
    Colony,
    Ant,
    Food,
    Pheromon,
    Obstacle,
}

impl Tile {
    /// Returns true only if elements of this kind claim exclusive
    /// ownership of their cell.
    pub fn is_solid(&self) -> bool {
        matches!(self, Tile::Colony | Tile::Food | Tile::Obstacle)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tile::Colony => "colony",
            Tile::Ant => "ant",
            Tile::Food => "food",
            Tile::Pheromon => "pheromon",
            Tile::Obstacle => "obstacle",
        };
        write!(f, "{}", name)
    }
}

/// The per-kind payload of an element, exposed read-only to rendering
/// front-ends and to the other brains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Data {
    /// An ant exposes its current behavior.
    Ant(Behavior),
    /// A pheromone exposes its scent and its evaporation state.
    Pheromon {
        scent: Scent,
        created: TimeStamp,
        amount: f32,
        evaporation: f32,
    },
    /// Any other element carries no payload.
    Empty,
}
