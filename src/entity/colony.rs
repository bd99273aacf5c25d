use rand::Rng;

use super::ant::Ant;
use super::brain::{Animat, Brain, Info};
use crate::conf::{AntsConf, ColonyConf, PheromonesConf};
use crate::influence::Influence;
use crate::point::Point2i;
use crate::time::{milliseconds_to_duration, zero, Duration, TimeStamp};

/// The brain of the colony: accrues a budget of food units delivered by
/// the ants and turns it into new ants at a bounded cadence.
#[derive(Debug, Clone, Copy)]
pub struct Colony {
    conf: ColonyConf,
    ants: AntsConf,
    pheromones: PheromonesConf,
    budget: f32,
    last_spawn: TimeStamp,
    spawn_pause: Duration,
}

impl Colony {
    /// Constructs a new colony with the initial budget of its
    /// configuration. The ant and pheromone blocks are kept to equip the
    /// ants it spawns.
    pub fn new(
        conf: ColonyConf,
        ants: AntsConf,
        pheromones: PheromonesConf,
    ) -> Self {
        Self {
            conf,
            ants,
            pheromones,
            budget: conf.budget,
            last_spawn: zero(),
            spawn_pause: zero(),
        }
    }

    /// Gets the current budget of food units.
    pub fn budget(&self) -> f32 {
        self.budget
    }

    pub(crate) fn init(&mut self, info: &mut Info) {
        // make sure an ant can be spawned right away if needed
        self.last_spawn =
            info.moment - milliseconds_to_duration(self.conf.rest_interval);
    }

    pub(crate) fn step(&mut self, info: &mut Info) {
        let rested = info.moment
            >= self.last_spawn
                + milliseconds_to_duration(self.conf.rest_interval);
        if self.budget >= self.conf.ant_cost && rested {
            self.spawn(info);
        }
    }

    pub(crate) fn influence(
        &mut self,
        _influence: &Influence,
        amount: f32,
    ) -> bool {
        log::debug!(
            "Adding {:.1} to the colony budget (current: {:.1})",
            amount,
            self.budget + amount
        );
        self.budget += amount;
        true
    }

    pub(crate) fn pause(&mut self, t: TimeStamp) {
        self.spawn_pause = t - self.last_spawn;
    }

    pub(crate) fn resume(&mut self, t: TimeStamp) {
        self.last_spawn = t - self.spawn_pause;
        self.spawn_pause = zero();
    }

    /// Spawns a new ant on a free cell around the colony, deducting its
    /// cost from the budget. Skipped with a warning when every candidate
    /// cell is occupied.
    fn spawn(&mut self, info: &mut Info) {
        let pos = match self.free_spot(info) {
            Some(pos) => pos,
            None => {
                log::warn!(
                    "Failed to spawn an ant: no empty cell around {}",
                    info.pos
                );
                return;
            }
        };

        log::debug!(
            "Colony spawning an ant at {} (budget: {:.0}/{:.0})",
            pos,
            self.budget,
            self.conf.ant_cost
        );
        info.spawned.push(Animat {
            pos,
            brain: Brain::Ant(Ant::new(self.ants, self.pheromones)),
        });

        self.last_spawn = info.moment;
        self.budget -= self.conf.ant_cost;
    }

    /// Picks a random unobstructed cell within the spawn radius, giving up
    /// after as many attempts as there are cells in the range.
    fn free_spot(&self, info: &mut Info) -> Option<Point2i> {
        let radius = self.conf.spawn_radius;
        let attempts = (2 * radius) * (2 * radius);

        for _ in 0..attempts {
            let x = info.rng.gen_range(info.pos.x - radius..=info.pos.x + radius);
            let y = info.rng.gen_range(info.pos.y - radius..=info.pos.y + radius);
            let pos = Point2i::new(x, y);
            if !info.locator.obstructed(pos, false) {
                return Some(pos);
            }
        }

        None
    }
}
