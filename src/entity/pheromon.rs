use std::fmt;

use super::brain::Info;
use crate::influence::Influence;
use crate::time::TimeStamp;

/// The flavors of pheromone an ant can leave on its trail.
#[derive(Debug, Hash, PartialEq, PartialOrd, Eq, Ord, Clone, Copy)]
pub enum Scent {
    /// Laid while foraging, used to trace the path back home.
    Home,
    /// Laid while carrying food back, points the way to a deposit.
    Food,
}

impl fmt::Display for Scent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scent::Home => "home",
            Scent::Food => "food",
        };
        write!(f, "{}", name)
    }
}

/// The brain of a pheromone: a scented amount that evaporates over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pheromon {
    scent: Scent,
    created: TimeStamp,
    amount: f32,
    evaporation: f32,
}

impl Pheromon {
    /// Constructs a new pheromone with the specified scent, creation
    /// timestamp, amount and evaporation rate in units per second.
    pub fn new(
        scent: Scent,
        created: TimeStamp,
        amount: f32,
        evaporation: f32,
    ) -> Self {
        Self {
            scent,
            created,
            amount,
            evaporation,
        }
    }

    /// Gets the scent of the pheromone.
    pub fn scent(&self) -> Scent {
        self.scent
    }

    /// Gets the timestamp at which the pheromone was first laid down.
    pub fn created(&self) -> TimeStamp {
        self.created
    }

    /// Gets the amount of pheromone left.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Gets the evaporation rate in units per second.
    pub fn evaporation(&self) -> f32 {
        self.evaporation
    }

    pub(crate) fn init(&mut self, _info: &mut Info) {}

    pub(crate) fn step(&mut self, info: &mut Info) {
        self.amount -= self.evaporation * info.elapsed;
        if self.amount <= 0.0 {
            info.self_destruct = true;
        }
    }

    /// A pheromone is indifferent to influences.
    pub(crate) fn influence(
        &mut self,
        _influence: &Influence,
        _amount: f32,
    ) -> bool {
        true
    }

    /// Merges another pheromone into this one: the amounts add up, the
    /// evaporation rates are averaged and the earlier creation timestamp
    /// is kept.
    pub(crate) fn merge(&mut self, other: &Pheromon) {
        self.amount += other.amount;
        self.evaporation = 0.5 * (self.evaporation + other.evaporation);
        self.created = self.created.min(other.created);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_amounts_and_averages_rates() {
        let mut a = Pheromon::new(Scent::Food, 100.0, 1.0, 0.1);
        let b = Pheromon::new(Scent::Food, 50.0, 1.0, 0.2);
        a.merge(&b);
        assert!((a.amount() - 2.0).abs() < f32::EPSILON);
        assert!((a.evaporation() - 0.15).abs() < f32::EPSILON);
        assert_eq!(a.created(), 50.0);
    }
}
