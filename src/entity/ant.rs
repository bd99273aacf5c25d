use std::fmt;

use rand::Rng;

use super::brain::{Animat, Brain, Info};
use super::pheromon::{Pheromon, Scent};
use super::{Data, Tile};
use crate::conf::{AntsConf, PheromonesConf};
use crate::influence::Influence;
use crate::motion::AStar;
use crate::point::Point2i;
use crate::time::{milliseconds_to_duration, zero, Duration, TimeStamp};

/// The activity an ant is currently engaged in. Depends on whether some
/// food was already found or not.
#[derive(Debug, Hash, PartialEq, PartialOrd, Eq, Ord, Clone, Copy)]
pub enum Behavior {
    /// Roaming in search of a food source.
    Wander,
    /// Navigating towards a located food source.
    Food,
    /// Carrying a portion of food back towards the colony.
    Return,
    /// Navigating towards the located colony to drop the cargo.
    Deposit,
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Behavior::Wander => "wander",
            Behavior::Food => "food",
            Behavior::Return => "return",
            Behavior::Deposit => "deposit",
        };
        write!(f, "{}", name)
    }
}

/// The outcome of aggregating the visible pheromones of a scent.
enum Aggregate {
    /// The averaged position of the pheromones ahead of the ant.
    Target(Point2i),
    /// Matching pheromones exist but every one of them is behind.
    AllBehind,
    /// No matching pheromone is visible at all.
    None,
}

/// The brain of an ant: a finite state machine over [`Behavior`] coupled
/// to the spatial queries of the locator, navigating with disposable
/// random targets until a trail or a goal comes into sight.
#[derive(Debug, Clone, Copy)]
pub struct Ant {
    conf: AntsConf,
    pheromones: PheromonesConf,
    behavior: Behavior,
    last_pheromon: TimeStamp,
    pheromon_pause: Duration,
    /// The cell the current path leads to, if any.
    target: Option<Point2i>,
    /// Whether the current target was picked at random; random paths are
    /// disposable and any trail-derived target replaces them.
    random_target: bool,
    last_pos: Point2i,
    /// The forward direction: where the ant moved last tick, zero when it
    /// did not move.
    dir: Point2i,
    food: f32,
}

impl Ant {
    /// Constructs a new ant, initially wandering and carrying nothing.
    pub fn new(conf: AntsConf, pheromones: PheromonesConf) -> Self {
        Self {
            conf,
            pheromones,
            behavior: Behavior::Wander,
            last_pheromon: zero(),
            pheromon_pause: zero(),
            target: None,
            random_target: false,
            last_pos: Point2i::default(),
            dir: Point2i::default(),
            food: 0.0,
        }
    }

    /// Gets the current behavior of the ant.
    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Gets the amount of food the ant is carrying.
    pub fn food(&self) -> f32 {
        self.food
    }

    pub(crate) fn init(&mut self, info: &mut Info) {
        self.behavior = Behavior::Wander;
        self.last_pheromon = info.moment;
        self.last_pos = info.pos;
        self.generate_path(info);
    }

    pub(crate) fn step(&mut self, info: &mut Info) {
        let items = info.locator.visible(info.pos, self.conf.vision_radius as f32);

        match self.behavior {
            Behavior::Wander => self.wander(info, &items),
            Behavior::Food => self.seek_food(info, &items),
            Behavior::Return => self.return_home(info, &items),
            Behavior::Deposit => self.deposit(info, &items),
        }

        // emit a pheromone if enough time passed since the last one
        let interval =
            milliseconds_to_duration(self.conf.pheromon_interval);
        if self.last_pheromon + interval < info.moment {
            self.spawn_pheromon(info);
        }

        self.dir = info.pos - self.last_pos;
        self.last_pos = info.pos;
    }

    pub(crate) fn influence(
        &mut self,
        _influence: &Influence,
        amount: f32,
    ) -> bool {
        if amount > 0.0 {
            log::debug!("Gathered {:.1} food", amount);
        } else {
            log::debug!("Deposited {:.1} food", -amount);
        }
        self.food += amount;
        true
    }

    pub(crate) fn pause(&mut self, t: TimeStamp) {
        self.pheromon_pause = t - self.last_pheromon;
    }

    pub(crate) fn resume(&mut self, t: TimeStamp) {
        self.last_pheromon = t - self.pheromon_pause;
        self.pheromon_pause = zero();
    }

    /// Finds a path to the current target, picking a random one within the
    /// vision radius when no target is set. Returns whether a path was
    /// found; on failure the previous path is left in place.
    fn generate_path(&mut self, info: &mut Info) -> bool {
        let target = match self.target {
            Some(target) => target,
            None => {
                let radius = self.conf.vision_radius;
                let x = info
                    .rng
                    .gen_range(info.pos.x - radius..=info.pos.x + radius);
                let y = info
                    .rng
                    .gen_range(info.pos.y - radius..=info.pos.y + radius);
                let target = Point2i::new(x, y);
                self.target = Some(target);
                self.random_target = true;
                target
            }
        };

        let astar = AStar::new(info.pos, target, info.locator);
        match astar.find_path(-1.0) {
            Some(path) => {
                *info.path = path;
                true
            }
            None => {
                log::warn!(
                    "Ant at {} found no path towards {}",
                    info.pos,
                    target
                );
                false
            }
        }
    }

    /// Leaves a pheromone at the current position: home scented while
    /// foraging, food scented while carrying food back.
    fn spawn_pheromon(&mut self, info: &mut Info) {
        let scent = match self.behavior {
            Behavior::Return | Behavior::Deposit => Scent::Food,
            _ => Scent::Home,
        };

        // small randomness in the amount and evaporation rate
        let amount = info.rng.gen_range(1.0..1.1);
        let base = self.pheromones.evaporation_base;
        let evaporation = info.rng.gen_range(base..base * 1.1);

        info.spawned.push(Animat {
            pos: info.pos,
            brain: Brain::Pheromon(Pheromon::new(
                scent,
                info.moment,
                amount,
                evaporation,
            )),
        });

        self.last_pheromon = info.moment;
    }

    /// Handles the wandering behavior: chase any food source in sight,
    /// otherwise follow the food scented trails, otherwise roam randomly.
    fn wander(&mut self, info: &mut Info, items: &[usize]) {
        if let Some(best) = self.find_closest(info, items, Tile::Food) {
            if info.path.end() == Some(best) {
                // already directed towards the deposit
                self.target = Some(best);
                self.random_target = false;
                self.behavior = Behavior::Food;
                return;
            }

            log::debug!("Found a food source at {}", best);
            self.target = Some(best);
            self.random_target = false;
            if self.generate_path(info) {
                self.behavior = Behavior::Food;
            }
            return;
        }

        self.follow_trail(info, items, Scent::Food);
    }

    /// Handles the go-to-food behavior: on arrival, take a cargo from the
    /// deposit and head back home.
    fn seek_food(&mut self, info: &mut Info, items: &[usize]) {
        if !info.path.is_empty() {
            // still on the way
            return;
        }

        let target = match self.target {
            Some(target) => target,
            None => {
                self.behavior = Behavior::Wander;
                return;
            }
        };

        let deposit = items.iter().copied().find(|&id| {
            info.locator.get(id).map_or(false, |el| {
                el.tile() == Tile::Food && el.pos() == target
            })
        });

        match deposit {
            Some(deposit) => {
                info.actions.push(Influence::food_interaction(
                    deposit,
                    info.index,
                    self.conf.cargo_space,
                ));
                log::debug!(
                    "Reached food at {}, going back home",
                    info.pos
                );
                self.behavior = Behavior::Return;
            }
            None => {
                // the deposit ran dry before we arrived
                log::warn!("No food left at {}, wandering", target);
                self.target = None;
                self.behavior = Behavior::Wander;
            }
        }
    }

    /// Handles the return behavior: chase the colony when in sight,
    /// otherwise follow the home scented trails laid by foraging ants.
    fn return_home(&mut self, info: &mut Info, items: &[usize]) {
        if let Some(best) = self.find_closest(info, items, Tile::Colony) {
            if info.path.end() == Some(best) {
                self.target = Some(best);
                self.random_target = false;
                self.behavior = Behavior::Deposit;
                return;
            }

            log::debug!("Found the colony at {}", best);
            self.target = Some(best);
            self.random_target = false;
            if self.generate_path(info) {
                self.behavior = Behavior::Deposit;
            }
            return;
        }

        self.follow_trail(info, items, Scent::Home);
    }

    /// Handles the deposit behavior: on arrival, hand the cargo over to
    /// the colony and wander off again.
    fn deposit(&mut self, info: &mut Info, items: &[usize]) {
        if !info.path.is_empty() {
            return;
        }

        let target = match self.target {
            Some(target) => target,
            None => {
                self.behavior = Behavior::Wander;
                return;
            }
        };

        let colony = items.iter().copied().find(|&id| {
            info.locator.get(id).map_or(false, |el| {
                el.tile() == Tile::Colony && el.pos() == target
            })
        });

        match colony {
            Some(colony) => {
                info.actions.push(Influence::food_interaction(
                    info.index,
                    colony,
                    self.conf.cargo_space,
                ));
                log::debug!(
                    "Reached the colony at {}, going back to wander",
                    info.pos
                );
                self.behavior = Behavior::Wander;
            }
            None => {
                log::warn!("No colony found at {}, wandering", target);
                self.target = None;
                self.behavior = Behavior::Wander;
            }
        }
    }

    /// Retargets along the pheromones of the given scent, or roams: a
    /// fresh averaged trail position replaces the current plan, a trail
    /// entirely behind the ant flips its direction, and with no trail at
    /// all an exhausted path is replaced by a random one.
    fn follow_trail(&mut self, info: &mut Info, items: &[usize], scent: Scent) {
        match self.aggregate_pheromons(info, items, scent) {
            Aggregate::Target(avg) => {
                if !self.random_target && self.target == Some(avg) {
                    // still bound for the same spot
                    return;
                }
                log::trace!(
                    "Picked target {} from {} visible item(s)",
                    avg,
                    items.len()
                );
                self.target = Some(avg);
                self.random_target = false;
                self.generate_path(info);
            }
            Aggregate::AllBehind => {
                // turn around but keep the current plan
                self.dir = -self.dir;
            }
            Aggregate::None => {
                if info.path.is_empty() {
                    self.target = None;
                    self.generate_path(info);
                }
            }
        }
    }

    /// Finds the closest visible element of the given kind and returns its
    /// position.
    fn find_closest(
        &self,
        info: &Info,
        items: &[usize],
        tile: Tile,
    ) -> Option<Point2i> {
        let mut best: Option<(f32, Point2i)> = None;

        for &id in items {
            let el = match info.locator.get(id) {
                Some(el) => el,
                None => continue,
            };
            if el.tile() != tile {
                continue;
            }

            let distance = info.pos.distance(el.pos());
            if best.map_or(true, |(closest, _)| distance < closest) {
                best = Some((distance, el.pos()));
            }
        }

        best.map(|(_, pos)| pos)
    }

    /// Aggregates the average position of the visible pheromones with the
    /// given scent, keeping only the ones ahead of the ant. An obstructed
    /// average is nudged to the nearest free cell.
    fn aggregate_pheromons(
        &self,
        info: &Info,
        items: &[usize],
        scent: Scent,
    ) -> Aggregate {
        let mut sum = (0.0f32, 0.0f32);
        let mut count = 0u32;
        let mut seen = false;

        for &id in items {
            let el = match info.locator.get(id) {
                Some(el) => el,
                None => continue,
            };
            match el.data() {
                Data::Pheromon { scent: s, .. } if s == scent => (),
                _ => continue,
            }
            seen = true;

            // discard pheromones that are not in the general way the ant
            // is moving, and the one at our own cell
            let to_pheromon = el.pos() - info.pos;
            if to_pheromon.dot(self.dir) <= 0 {
                continue;
            }
            if el.pos() == info.pos {
                continue;
            }

            sum.0 += el.pos().x as f32;
            sum.1 += el.pos().y as f32;
            count += 1;
        }

        if !seen {
            return Aggregate::None;
        }
        if count == 0 {
            return Aggregate::AllBehind;
        }

        let avg = Point2i::new(
            (sum.0 / count as f32).round() as i32,
            (sum.1 / count as f32).round() as i32,
        );

        if info.locator.obstructed(avg, false) {
            match self.nearest_free_cell(info, avg) {
                Some(free) => Aggregate::Target(free),
                None => Aggregate::None,
            }
        } else {
            Aggregate::Target(avg)
        }
    }

    /// Searches outwards, ring after ring, for the unobstructed cell
    /// closest to `center` within the vision radius.
    fn nearest_free_cell(
        &self,
        info: &Info,
        center: Point2i,
    ) -> Option<Point2i> {
        for radius in 1..=self.conf.vision_radius {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let p = center + Point2i::new(dx, dy);
                    if !info.locator.obstructed(p, false) {
                        return Some(p);
                    }
                }
            }
        }
        None
    }
}
