use rand::rngs::StdRng;

use super::brain::{Animat, Brain};
use super::{Data, Id, Tile};
use crate::influence::Influence;
use crate::motion::Path;
use crate::point::Point2i;
use crate::time::{milliseconds_to_duration, zero, Duration, TimeStamp};

/// The interval between two consecutive moves of an element, in
/// milliseconds of simulation time.
pub(crate) const IDLE_TIME: f32 = 200.0;

/// The per-tick context handed by the world to every element.
pub struct StepInfo<'a> {
    /// A random number generator to use for any random process during the
    /// step.
    pub rng: &'a mut StdRng,
    /// The moment at which the processing is taking place.
    pub moment: TimeStamp,
    /// The time elapsed since the previous step, in seconds.
    pub elapsed: f32,
    /// The elements spawned during the step, inserted in the grid once
    /// every element has been processed.
    pub spawned: Vec<Element>,
    /// The influences emitted during the step, applied after the spawns.
    pub actions: Vec<Influence>,
}

/// A body on the grid: a kind, a position and possibly a brain driving
/// it. Elements without a brain, like obstacles, are inert.
pub struct Element {
    id: Option<Id>,
    tile: Tile,
    pos: Point2i,
    pub(crate) brain: Option<Brain>,
    pub(crate) deleted: bool,
    pub(crate) initialized: bool,
    pub(crate) path: Path,
    pub(crate) last_move: TimeStamp,
    pause_accum: Duration,
}

impl Element {
    /// Constructs a new inert element of the given kind.
    pub fn new(tile: Tile, pos: Point2i) -> Self {
        Self {
            id: None,
            tile,
            pos,
            brain: None,
            deleted: false,
            initialized: false,
            path: Path::new(),
            last_move: zero(),
            pause_accum: zero(),
        }
    }

    /// Constructs a new element driven by the given brain; its kind is
    /// inferred from the concrete brain variant.
    pub fn with_brain(pos: Point2i, brain: Brain) -> Self {
        let mut element = Self::new(brain.tile(), pos);
        element.brain = Some(brain);
        element
    }

    pub(crate) fn from_animat(animat: Animat) -> Self {
        Self::with_brain(animat.pos, animat.brain)
    }

    /// Gets the identifier of the element, assigned when it joins a grid.
    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: Id) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Gets the kind of the element.
    pub fn tile(&self) -> Tile {
        self.tile
    }

    /// Gets the position of the element.
    pub fn pos(&self) -> Point2i {
        self.pos
    }

    /// Returns true only if the element has been marked for deletion.
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Gets the payload of the element, derived from its brain so that it
    /// can never go stale.
    pub fn data(&self) -> Data {
        match &self.brain {
            Some(brain) => brain.data(),
            None => Data::Empty,
        }
    }

    pub(crate) fn brain(&self) -> Option<&Brain> {
        self.brain.as_ref()
    }

    /// Applies an influence to the brain of this element, `index` being
    /// the position of the element in the grid. An influence reaching a
    /// brainless element is a contract violation.
    pub(crate) fn influence(
        &mut self,
        influence: &Influence,
        index: usize,
    ) -> bool {
        let amount = influence.amount_for(index);
        match self.brain.as_mut() {
            Some(brain) => brain.influence(influence, amount),
            None => panic!(
                "Influence applied to a brainless {} at {}",
                self.tile, self.pos
            ),
        }
    }

    /// Merges another element of the same kind into this one, delegating
    /// to the brains.
    pub(crate) fn merge(&mut self, other: &Element) {
        match (self.brain.as_mut(), other.brain()) {
            (Some(lhs), Some(rhs)) => lhs.merge(rhs),
            _ => panic!(
                "Cannot merge brainless elements at {}",
                self.pos
            ),
        }
    }

    /// Picks the next position in the path if the element moved long
    /// enough in the past.
    pub(crate) fn advance_along_path(&mut self, moment: TimeStamp) {
        if self.path.is_empty() {
            return;
        }
        if moment - self.last_move >= milliseconds_to_duration(IDLE_TIME) {
            self.pos = self.path.advance();
            self.last_move = moment;
        }
    }

    /// Freezes the durations this element depends on, so that they can be
    /// restored on resume.
    pub(crate) fn pause(&mut self, t: TimeStamp) {
        self.pause_accum = t - self.last_move;
        if let Some(brain) = self.brain.as_mut() {
            brain.pause(t);
        }
    }

    /// Opposite operation to `pause`: restores the time of the last move
    /// so that the elapsed duration is as it was when the pause occurred.
    pub(crate) fn resume(&mut self, t: TimeStamp) {
        self.last_move = t - self.pause_accum;
        self.pause_accum = zero();
        if let Some(brain) = self.brain.as_mut() {
            brain.resume(t);
        }
    }
}
