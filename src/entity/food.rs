use super::brain::Info;
use crate::influence::Influence;

/// The brain of a food deposit: a stock of food units that ants withdraw
/// from until it runs dry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    stock: f32,
}

impl Food {
    /// Constructs a new deposit with the specified stock.
    pub fn new(stock: f32) -> Self {
        Self { stock }
    }

    /// Gets the amount of food left in the deposit.
    pub fn stock(&self) -> f32 {
        self.stock
    }

    pub(crate) fn init(&mut self, _info: &mut Info) {}

    pub(crate) fn step(&mut self, info: &mut Info) {
        // a dry deposit disappears from the world
        if self.stock <= 0.0 {
            log::info!("Deposit at {} is now empty", info.pos);
            info.self_destruct = true;
        }
    }

    pub(crate) fn influence(
        &mut self,
        _influence: &Influence,
        amount: f32,
    ) -> bool {
        if amount > 0.0 {
            log::debug!(
                "Piled up {:.1} food ({:.1} available)",
                amount,
                self.stock + amount
            );
        } else {
            log::debug!(
                "Withdrew {:.1} food ({:.1} remaining)",
                -amount,
                self.stock + amount
            );
        }
        self.stock += amount;
        true
    }
}
