use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::conf::Conf;
use crate::entity::{Brain, Colony, Element, Food, StepInfo, Tile};
use crate::grid::Grid;
use crate::point::Point2i;
use crate::time::{zero, TimeStamp};

/// The simulation world: owns the grid of elements and the random number
/// generator, and drives the tick that advances every agent.
pub struct World {
    conf: Conf,
    rng: StdRng,
    grid: Grid,
    paused: bool,
    moment: TimeStamp,
}

impl World {
    /// Constructs a new world from the given configuration, populated with
    /// the opening scenario: the colony, a ring of food deposits around it
    /// and four walls with open corners. The elements present at this
    /// point are initialized at moment zero.
    pub fn new(conf: Conf) -> Self {
        let rng = StdRng::seed_from_u64(conf.seed.unwrap_or(0));
        let mut grid = Grid::new();
        populate(&mut grid, &conf);

        log::info!(
            "Created world with {} element(s), seed {:?}",
            grid.len(),
            conf.seed
        );

        let mut world = Self {
            conf,
            rng,
            grid,
            paused: false,
            moment: zero(),
        };
        world.initialize();
        world
    }

    /// Gets the current simulation timestamp, in milliseconds.
    pub fn moment(&self) -> TimeStamp {
        self.moment
    }

    /// Returns true only if the world is paused.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Advances the simulation by `t_delta` seconds of simulated time. A
    /// paused world ignores the call entirely.
    ///
    /// Every element is stepped against the grid as it was at the start of
    /// the tick: the elements spawned by the brains are inserted once the
    /// pass is over, the influences are applied right after, and the
    /// elements marked for deletion are pruned last.
    pub fn step(&mut self, t_delta: f32) {
        if self.paused {
            return;
        }

        // the input delta is expressed in seconds, the simulation
        // timestamps in milliseconds
        self.moment += 1000.0 * t_delta;

        let count = self.grid.len();
        let mut step = StepInfo {
            rng: &mut self.rng,
            moment: self.moment,
            elapsed: t_delta,
            spawned: Vec::new(),
            actions: Vec::new(),
        };

        for id in 0..count {
            self.grid.step_element(id, &mut step);
        }

        let StepInfo {
            spawned, actions, ..
        } = step;
        for element in spawned {
            self.grid.spawn(element);
        }
        for action in &actions {
            if !self.grid.apply(action) {
                log::warn!("Failed to apply influence {:?}", action);
            }
        }

        self.grid.update();
    }

    /// Pauses the simulation, freezing the timers of every element. A
    /// second call is a no-op.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        for id in 0..self.grid.len() {
            self.grid.at_mut(id).pause(self.moment);
        }
        self.paused = true;
    }

    /// Resumes the simulation, restoring the timers frozen by the pause.
    /// A second call is a no-op.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        for id in 0..self.grid.len() {
            self.grid.at_mut(id).resume(self.moment);
        }
        self.paused = false;
    }

    /// Counts the elements of the given kind.
    pub fn count(&self, tile: Tile) -> usize {
        self.grid.iter().filter(|el| el.tile() == tile).count()
    }

    /// Places a new element at the given cell on behalf of the embedding
    /// shell. Only food deposits and obstacles can be placed this way;
    /// other kinds are rejected with a warning. Placing on an occupied
    /// cell is a no-op.
    pub fn spawn(&mut self, pos: Point2i, tile: Tile) -> bool {
        let element = match tile {
            Tile::Food => Element::with_brain(
                pos,
                Brain::Food(Food::new(self.conf.food.stock)),
            ),
            Tile::Obstacle => Element::new(Tile::Obstacle, pos),
            _ => {
                log::warn!("Unsupported spawn request for {}", tile);
                return false;
            }
        };
        self.grid.spawn(element)
    }

    /// Gets a read-only view over every element of the world, in
    /// deterministic grid order, for rendering front-ends.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.grid.iter()
    }

    /// Runs the init pass over the elements present in the grid, at the
    /// current moment. Brains participate for the first time and may
    /// already spawn or act.
    fn initialize(&mut self) {
        let count = self.grid.len();
        let mut step = StepInfo {
            rng: &mut self.rng,
            moment: self.moment,
            elapsed: 0.0,
            spawned: Vec::new(),
            actions: Vec::new(),
        };

        for id in 0..count {
            self.grid.step_element(id, &mut step);
        }

        let StepInfo {
            spawned, actions, ..
        } = step;
        for element in spawned {
            self.grid.spawn(element);
        }
        for action in &actions {
            self.grid.apply(action);
        }
        self.grid.update();
    }
}

/// Seeds the grid with the opening scenario of the configuration.
fn populate(grid: &mut Grid, conf: &Conf) {
    let colony_pos = Point2i::from(conf.colony.location);
    grid.spawn(Element::with_brain(
        colony_pos,
        Brain::Colony(Colony::new(conf.colony, conf.ants, conf.pheromones)),
    ));

    // a ring of food deposits around the colony
    for id in 0..conf.food.deposits {
        let perc = id as f32 / conf.food.deposits as f32;
        let angle = 2.0 * std::f32::consts::PI * perc;
        let offset = Point2i::new(
            (conf.food.radius as f32 * angle.cos()).round() as i32,
            (conf.food.radius as f32 * angle.sin()).round() as i32,
        );
        grid.spawn(Element::with_brain(
            colony_pos + offset,
            Brain::Food(Food::new(conf.food.stock)),
        ));
    }

    // some obstacles describing a square around the colony, not closed
    if conf.obstacles.wall_length > 0 {
        let half = conf.obstacles.wall_length / 2;
        let mut wall = |x_min: i32, x_max: i32, y_min: i32, y_max: i32| {
            for y in y_min..y_max {
                for x in x_min..x_max {
                    grid.spawn(Element::new(
                        Tile::Obstacle,
                        colony_pos + Point2i::new(x, y),
                    ));
                }
            }
        };

        // left, right, top and bottom walls
        wall(-5, -4, -half, half + 1);
        wall(5, 6, -half, half + 1);
        wall(-half, half + 1, 7, 8);
        wall(-half, half + 1, -7, -6);
    }
}
