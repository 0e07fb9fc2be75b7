//! Influencer labels shown on token cards. Display only, never used for filtering.

use rand::seq::SliceRandom;
use rand::Rng;

use super::token::Chain;

pub const SOLANA_INFLUENCERS: [&str; 6] = [
    "SolWhaleAlpha",
    "SolanaGems",
    "SolanaWhale",
    "SolMoonHunter",
    "SolanaGuru",
    "SolanaSniper",
];

pub const ETHEREUM_INFLUENCERS: [&str; 6] = [
    "EthWhale",
    "EthereumGems",
    "ETHMoonshots",
    "DeFiGuru",
    "EthSniper",
    "ETHAlpha",
];

pub fn roster(chain: Chain) -> &'static [&'static str] {
    match chain {
        Chain::Solana => &SOLANA_INFLUENCERS,
        Chain::Ethereum => &ETHEREUM_INFLUENCERS,
    }
}

/// Pick a label from the chain's roster
pub fn pick_influencer<R: Rng + ?Sized>(chain: Chain, rng: &mut R) -> String {
    roster(chain)
        .choose(rng)
        .copied()
        .unwrap_or("None")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_from_chain_roster() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let sol = pick_influencer(Chain::Solana, &mut rng);
            assert!(SOLANA_INFLUENCERS.contains(&sol.as_str()));

            let eth = pick_influencer(Chain::Ethereum, &mut rng);
            assert!(ETHEREUM_INFLUENCERS.contains(&eth.as_str()));
        }
    }
}
