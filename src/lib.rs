//! Core engine for an ant colony foraging simulation on an infinite
//! integer grid: a tick driven world of elements, each coupled to a brain,
//! coordinating through evaporating pheromone trails and navigating with
//! an A* path planner.
//!
//! The crate is a pure library: it performs no I/O, runs entirely on the
//! caller's thread and exposes a step-by-tick entry point, read-only
//! iteration over the elements for rendering, pause/resume and the
//! placement of food or obstacles on behalf of a user interface.

pub use conf::Conf;
pub use entity::{Behavior, Data, Element, Scent, Tile};
pub use point::Point2i;
pub use world::World;

pub mod conf;
pub mod entity;
pub mod grid;
pub mod influence;
pub mod motion;
pub mod point;
pub mod time;
pub mod world;
