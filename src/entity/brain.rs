use rand::rngs::StdRng;

use super::ant::Ant;
use super::colony::Colony;
use super::food::Food;
use super::pheromon::Pheromon;
use super::{Data, Tile};
use crate::influence::Influence;
use crate::motion::{Locator, Path};
use crate::point::Point2i;
use crate::time::TimeStamp;

/// A spawn request emitted by a brain: the position of the new element
/// together with the brain driving it. The element kind is inferred from
/// the concrete brain variant.
pub struct Animat {
    pub pos: Point2i,
    pub brain: Brain,
}

/// Everything a brain can see and touch while it runs for one tick.
pub struct Info<'a> {
    /// The index of the element being stepped, in grid order. Lets the
    /// brain name its own body as the participant of an influence.
    pub index: usize,
    /// The position of the element.
    pub pos: Point2i,
    /// A random number generator to use for any random process during the
    /// step.
    pub rng: &'a mut StdRng,
    /// The moment at which the processing is taking place.
    pub moment: TimeStamp,
    /// The time elapsed since the previous step, in seconds.
    pub elapsed: f32,
    /// The current path followed by the element.
    pub path: &'a mut Path,
    /// The locator service to query the surroundings.
    pub locator: &'a dyn Locator,
    /// Set by the brain to mark its element for deletion at the end of
    /// the tick.
    pub self_destruct: bool,
    /// The new agents created by this brain.
    pub spawned: Vec<Animat>,
    /// The influences pending for this tick.
    pub actions: &'a mut Vec<Influence>,
}

/// The decision making unit of an element, one variant per kind of agent.
/// Obstacles have no brain at all.
#[derive(Debug, Clone)]
pub enum Brain {
    Ant(Ant),
    Colony(Colony),
    Food(Food),
    Pheromon(Pheromon),
}

impl Brain {
    /// Gets the kind of tile matching the concrete variant of this brain.
    pub fn tile(&self) -> Tile {
        match self {
            Brain::Ant(_) => Tile::Ant,
            Brain::Colony(_) => Tile::Colony,
            Brain::Food(_) => Tile::Food,
            Brain::Pheromon(_) => Tile::Pheromon,
        }
    }

    /// Gets the payload this brain exposes to the outside world.
    pub fn data(&self) -> Data {
        match self {
            Brain::Ant(ant) => Data::Ant(ant.behavior()),
            Brain::Pheromon(pheromon) => Data::Pheromon {
                scent: pheromon.scent(),
                created: pheromon.created(),
                amount: pheromon.amount(),
                evaporation: pheromon.evaporation(),
            },
            _ => Data::Empty,
        }
    }

    /// Called before the first step of the element, with the info of the
    /// tick at the moment of the spawn.
    pub fn init(&mut self, info: &mut Info) {
        match self {
            Brain::Ant(ant) => ant.init(info),
            Brain::Colony(colony) => colony.init(info),
            Brain::Food(food) => food.init(info),
            Brain::Pheromon(pheromon) => pheromon.init(info),
        }
    }

    /// Advances the brain by one tick.
    pub fn step(&mut self, info: &mut Info) {
        match self {
            Brain::Ant(ant) => ant.step(info),
            Brain::Colony(colony) => colony.step(info),
            Brain::Food(food) => food.step(info),
            Brain::Pheromon(pheromon) => pheromon.step(info),
        }
    }

    /// Applies to this brain the amount of an influence, signed from the
    /// point of view of its element. Returns whether the influence was
    /// processed.
    pub fn influence(&mut self, influence: &Influence, amount: f32) -> bool {
        match self {
            Brain::Ant(ant) => ant.influence(influence, amount),
            Brain::Colony(colony) => colony.influence(influence, amount),
            Brain::Food(food) => food.influence(influence, amount),
            Brain::Pheromon(pheromon) => {
                pheromon.influence(influence, amount)
            }
        }
    }

    /// Merges another brain into this one. Only pheromones support
    /// merging; any other combination is a contract violation.
    pub fn merge(&mut self, other: &Brain) {
        match (&mut *self, other) {
            (Brain::Pheromon(lhs), Brain::Pheromon(rhs)) => lhs.merge(rhs),
            (lhs, rhs) => panic!(
                "Unsupported merge of {} into {}",
                rhs.tile(),
                lhs.tile()
            ),
        }
    }

    /// Freezes the time-dependent processes of the brain.
    pub fn pause(&mut self, t: TimeStamp) {
        match self {
            Brain::Ant(ant) => ant.pause(t),
            Brain::Colony(colony) => colony.pause(t),
            _ => (),
        }
    }

    /// Resumes the time-dependent processes of the brain.
    pub fn resume(&mut self, t: TimeStamp) {
        match self {
            Brain::Ant(ant) => ant.resume(t),
            Brain::Colony(colony) => colony.resume(t),
            _ => (),
        }
    }
}
