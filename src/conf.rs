use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// The simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conf {
    /// The seed of the world random number generator. Two runs with the
    /// same seed and the same sequence of step deltas are identical.
    pub seed: Option<u64>,
    pub colony: ColonyConf,
    pub ants: AntsConf,
    pub pheromones: PheromonesConf,
    pub food: FoodConf,
    pub obstacles: ObstaclesConf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColonyConf {
    /// The cell hosting the colony when the world is built.
    pub location: (i32, i32),
    /// The initial budget of food units.
    pub budget: f32,
    /// The cost of spawning a single ant.
    pub ant_cost: f32,
    /// The minimum interval between two consecutive spawns, in
    /// milliseconds of simulation time.
    pub rest_interval: f32,
    /// The range around the colony where new ants can appear.
    pub spawn_radius: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntsConf {
    /// How far an ant can perceive other elements. Also bounds how far a
    /// random wandering target can be picked.
    pub vision_radius: i32,
    /// The interval between two pheromone emissions, in milliseconds of
    /// simulation time.
    pub pheromon_interval: f32,
    /// The amount of food an ant carries in one go.
    pub cargo_space: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PheromonesConf {
    /// The base evaporation rate in units per second. Each emitted
    /// pheromone draws its rate uniformly from [base, 1.1 * base], so the
    /// base must be strictly positive.
    pub evaporation_base: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodConf {
    /// The number of deposits placed on a ring around the colony when the
    /// world is built.
    pub deposits: u32,
    /// The radius of the deposit ring.
    pub radius: i32,
    /// The initial stock of each deposit, also used for deposits placed by
    /// the embedding shell.
    pub stock: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstaclesConf {
    /// The length of the walls enclosing the colony when the world is
    /// built. Zero disables the walls entirely.
    pub wall_length: i32,
}

impl Default for Conf {
    fn default() -> Self {
        Self {
            seed: Some(0),
            colony: ColonyConf::default(),
            ants: AntsConf::default(),
            pheromones: PheromonesConf::default(),
            food: FoodConf::default(),
            obstacles: ObstaclesConf::default(),
        }
    }
}

impl Default for ColonyConf {
    fn default() -> Self {
        Self {
            location: (0, 0),
            budget: 50.0,
            ant_cost: 50.0,
            rest_interval: 200.0,
            spawn_radius: 2,
        }
    }
}

impl Default for AntsConf {
    fn default() -> Self {
        Self {
            vision_radius: 5,
            pheromon_interval: 500.0,
            cargo_space: 5.0,
        }
    }
}

impl Default for PheromonesConf {
    fn default() -> Self {
        Self {
            evaporation_base: 0.15,
        }
    }
}

impl Default for FoodConf {
    fn default() -> Self {
        Self {
            deposits: 4,
            radius: 10,
            stock: 50.0,
        }
    }
}

impl Default for ObstaclesConf {
    fn default() -> Self {
        Self { wall_length: 6 }
    }
}

impl Conf {
    /// Parses the simulation configuration from a JSON file.
    pub fn parse(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        log::info!("Parsing simulation configuration from {:?}", config_path);
        let contents = fs::read_to_string(config_path)?;
        let conf = serde_json::from_str(&contents)?;
        Ok(conf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let conf = Conf::default();
        let json = serde_json::to_string(&conf).unwrap();
        let parsed: Conf = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ants.vision_radius, conf.ants.vision_radius);
        assert_eq!(parsed.colony.location, conf.colony.location);
        assert_eq!(parsed.food.deposits, conf.food.deposits);
    }

    #[test]
    fn parse_missing_file_fails() {
        assert!(Conf::parse("no/such/conf.json").is_err());
    }
}
