use tracing::info;

use super::{
    chain::{Chain, ChainId},
    merger::shareholder_payouts,
    player::{Player, PlayerId},
};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub cash: u32,
}

/// Closes the books at game end.
///
/// Every founded chain pays its shareholder bonuses, then buys back every
/// share of itself at its current price. Shares of unfounded chains are
/// worthless. Returns standings by descending cash, ties in `turn_order`.
pub fn settle_final_accounts(
    chains: &mut [Chain],
    founded: &[ChainId],
    players: &mut [Player],
    turn_order: &[PlayerId],
) -> Vec<Standing> {
    for id in founded {
        let chain = &mut chains[id.0];
        let holdings: Vec<(PlayerId, u32)> = turn_order
            .iter()
            .map(|player| (*player, players[player.0].shares_in(*id)))
            .collect();

        let payouts = shareholder_payouts(
            &holdings,
            chain.majority_shareholder_bonus(),
            chain.minority_shareholder_bonus(),
        );
        for (player, amount) in payouts {
            players[player.0].cash += amount;
        }

        let price = chain.stock_price();
        for player in turn_order {
            let player = &mut players[player.0];
            while let Some(stock) = player.take_stock(*id) {
                chain.return_share(stock);
                player.cash += price;
            }
        }
    }

    let mut standings: Vec<Standing> = turn_order
        .iter()
        .map(|id| Standing {
            player: *id,
            name: players[id.0].name.clone(),
            cash: players[id.0].cash,
        })
        .collect();
    standings.sort_by(|a, b| b.cash.cmp(&a.cash));

    for (place, standing) in standings.iter().enumerate() {
        info!(place = place + 1, player = %standing.name, cash = standing.cash, "final standing");
    }
    standings
}
