use crate::logic::error::{AcquireError, Result, StockShortfall};

/// Per-turn stock purchase budget.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BuyStockState {
    pub buys_remaining: u32,
    budget: u32,
}

impl BuyStockState {
    pub fn new(budget: u32) -> Self {
        BuyStockState {
            buys_remaining: budget,
            budget,
        }
    }

    pub fn can_buy(&self) -> bool {
        self.buys_remaining > 0
    }

    pub fn ensure_can_buy(&self) -> Result<()> {
        match self.can_buy() {
            true => Ok(()),
            false => Err(AcquireError::StockUnavailable(StockShortfall::TurnBudgetSpent)),
        }
    }

    // This is called when a player has bought stock
    // It returns true if the player has bought all the stock they can
    pub fn player_has_bought_stock(&mut self) -> Result<bool> {
        self.ensure_can_buy()?;
        self.buys_remaining -= 1;
        Ok(self.buys_remaining == 0)
    }

    pub fn reset(&mut self) {
        self.buys_remaining = self.budget;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_runs_out() {
        let mut state = BuyStockState::new(2);
        assert_eq!(state.player_has_bought_stock(), Ok(false));
        assert_eq!(state.player_has_bought_stock(), Ok(true));
        assert_eq!(
            state.player_has_bought_stock(),
            Err(AcquireError::StockUnavailable(StockShortfall::TurnBudgetSpent))
        );
        assert_eq!(state.buys_remaining, 0);

        state.reset();
        assert_eq!(state.buys_remaining, 2);
    }
}
