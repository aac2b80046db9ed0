use std::fmt;

use tracing::{debug, info};

use super::{
    chain::{Chain, ChainId},
    error::{AcquireError, Result, StockShortfall},
    player::{Player, PlayerId},
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MergerPhase {
    Created,
    BonusPaid,
    TilesMerged,
}

impl fmt::Display for MergerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergerPhase::Created => "created",
            MergerPhase::BonusPaid => "bonus paid",
            MergerPhase::TilesMerged => "tiles merged",
        };
        write!(f, "{}", name)
    }
}

/// Splits the majority and minority bonuses over the holders of a chain.
///
/// Holders with the highest share count split the majority bonus. Holders
/// with the next highest count split the minority bonus, which is rounded
/// down to a multiple of 100 per holder. Without a minority group the
/// majority group also takes the minority bonus under the same rounding.
///
/// Returns one entry per paid player, in the order of `holdings`.
pub fn shareholder_payouts(
    holdings: &[(PlayerId, u32)],
    majority_bonus: u32,
    minority_bonus: u32,
) -> Vec<(PlayerId, u32)> {
    let holders: Vec<(PlayerId, u32)> = holdings
        .iter()
        .copied()
        .filter(|(_, shares)| *shares > 0)
        .collect();

    let Some(majority_shares) = holders.iter().map(|(_, shares)| *shares).max() else {
        return Vec::new();
    };
    let minority_shares = holders
        .iter()
        .map(|(_, shares)| *shares)
        .filter(|shares| *shares < majority_shares)
        .max();

    let majority_count = holders
        .iter()
        .filter(|(_, shares)| *shares == majority_shares)
        .count() as u32;
    let minority_count = match minority_shares {
        Some(minority_shares) => holders
            .iter()
            .filter(|(_, shares)| *shares == minority_shares)
            .count() as u32,
        None => 0,
    };

    let majority_payout = match minority_count {
        0 => majority_bonus / majority_count + minority_bonus / 100 / majority_count * 100,
        _ => majority_bonus / majority_count,
    };

    holders
        .iter()
        .filter_map(|(player, shares)| {
            if *shares == majority_shares {
                Some((*player, majority_payout))
            } else if Some(*shares) == minority_shares {
                Some((*player, minority_bonus / 100 / minority_count * 100))
            } else {
                None
            }
        })
        .collect()
}

/// Settlement of one acquired chain into its acquirer.
///
/// The shareholder list is captured when the merger is queued and never
/// changes afterwards; the cursor walks it one decision at a time.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Merger {
    acquiring: ChainId,
    acquired: ChainId,
    shareholders: Vec<PlayerId>,
    cursor: usize,
    phase: MergerPhase,
}

impl Merger {
    pub fn new(acquiring: ChainId, acquired: ChainId, shareholders: Vec<PlayerId>) -> Self {
        Self {
            acquiring,
            acquired,
            shareholders,
            cursor: 0,
            phase: MergerPhase::Created,
        }
    }

    pub fn acquiring_chain(&self) -> ChainId {
        self.acquiring
    }

    pub fn acquired_chain(&self) -> ChainId {
        self.acquired
    }

    pub fn phase(&self) -> MergerPhase {
        self.phase
    }

    pub fn shareholders(&self) -> &[PlayerId] {
        &self.shareholders
    }

    /// The shareholder currently deciding, if any remain.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.shareholders.get(self.cursor).copied()
    }

    pub fn more_players_to_handle(&self) -> bool {
        self.cursor < self.shareholders.len()
    }

    pub fn is_ready_to_merge(&self) -> bool {
        self.phase == MergerPhase::BonusPaid && !self.more_players_to_handle()
    }

    pub fn give_shareholder_bonus(
        &mut self,
        chains: &[Chain],
        players: &mut [Player],
    ) -> Result<Vec<(PlayerId, u32)>> {
        if self.phase != MergerPhase::Created {
            return Err(AcquireError::MergerOutOfOrder(self.phase));
        }

        let acquired = &chains[self.acquired.0];
        let holdings: Vec<(PlayerId, u32)> = self
            .shareholders
            .iter()
            .map(|id| (*id, players[id.0].shares_in(self.acquired)))
            .collect();

        let payouts = shareholder_payouts(
            &holdings,
            acquired.majority_shareholder_bonus(),
            acquired.minority_shareholder_bonus(),
        );
        for (id, amount) in &payouts {
            players[id.0].cash += amount;
            info!(player = %players[id.0].name, chain = %acquired.name, amount, "shareholder bonus paid");
        }

        self.phase = MergerPhase::BonusPaid;
        Ok(payouts)
    }

    fn deciding_player(&self) -> Result<PlayerId> {
        if self.phase != MergerPhase::BonusPaid {
            return Err(AcquireError::MergerOutOfOrder(self.phase));
        }
        self.current_player().ok_or(AcquireError::NoActivePlayer)
    }

    /// Sells one acquired-chain share back to its pool. Returns the price paid.
    pub fn sell_stock(&mut self, chains: &mut [Chain], players: &mut [Player]) -> Result<u32> {
        let id = self.deciding_player()?;
        let acquired = &mut chains[self.acquired.0];
        let player = &mut players[id.0];

        let stock = player.take_stock(self.acquired).ok_or_else(|| {
            AcquireError::StockUnavailable(StockShortfall::NoSharesHeld(acquired.name.clone()))
        })?;
        let price = acquired.stock_price();
        acquired.return_share(stock);
        player.cash += price;

        debug!(player = %player.name, chain = %acquired.name, price, "sold stock");
        Ok(price)
    }

    /// Trades two acquired-chain shares for one acquiring-chain share.
    pub fn trade_stock(&mut self, chains: &mut [Chain], players: &mut [Player]) -> Result<()> {
        let id = self.deciding_player()?;
        let player = &mut players[id.0];

        let held = player.shares_in(self.acquired);
        if held < 2 {
            return Err(AcquireError::InsufficientShares {
                player: player.name.clone(),
                chain: chains[self.acquired.0].name.clone(),
                held,
            });
        }
        let acquiring = &chains[self.acquiring.0];
        if acquiring.unsold_stock() == 0 {
            return Err(AcquireError::StockUnavailable(StockShortfall::PoolExhausted(
                acquiring.name.clone(),
            )));
        }

        for _ in 0..2 {
            if let Some(stock) = player.take_stock(self.acquired) {
                chains[self.acquired.0].return_share(stock);
            }
        }
        if let Some(stock) = chains[self.acquiring.0].issue_share() {
            player.add_stock(stock);
        }

        debug!(
            player = %player.name,
            from = %chains[self.acquired.0].name,
            to = %chains[self.acquiring.0].name,
            "traded stock"
        );
        Ok(())
    }

    pub fn go_to_next_player(&mut self) -> Result<()> {
        self.deciding_player()?;
        self.cursor += 1;
        Ok(())
    }

    pub(crate) fn mark_merged(&mut self) {
        debug_assert!(self.is_ready_to_merge());
        self.phase = MergerPhase::TilesMerged;
    }
}
