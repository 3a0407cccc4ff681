//! Change making.
//!
//! Finds a combination of inventory coins summing exactly to a target value.
//! Both strategies are pure queries: the caller withdraws the result from the
//! inventory only once a combination has been found.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::Amount;
use crate::model::{Coin, ParseError};

use super::CoinInventory;
use super::error::ChangeError;

/// Coins selected to pay out a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    counts: BTreeMap<Coin, u32>,
}

impl Change {
    fn push(&mut self, coin: Coin, count: u32) {
        if count > 0 {
            *self.counts.entry(coin).or_insert(0) += count;
        }
    }

    pub fn count(&self, coin: Coin) -> u32 {
        self.counts.get(&coin).copied().unwrap_or(0)
    }

    /// `(coin, count)` pairs, largest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Coin, u32)> + '_ {
        self.counts.iter().rev().map(|(coin, count)| (*coin, *count))
    }

    /// Every individual coin, largest denomination first.
    pub fn coins(&self) -> impl Iterator<Item = Coin> + '_ {
        self.iter()
            .flat_map(|(coin, count)| std::iter::repeat_n(coin, count as usize))
    }

    pub fn value(&self) -> Amount {
        self.iter().map(|(coin, count)| coin.value() * count).sum()
    }

    pub fn coin_count(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(Coin, u32)> for Change {
    fn from_iter<I: IntoIterator<Item = (Coin, u32)>>(iter: I) -> Self {
        let mut change = Change::default();
        for (coin, count) in iter {
            change.push(coin, count);
        }
        change
    }
}

/// How the machine picks coins when returning credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeStrategy {
    /// Largest denomination first, as many as available.
    ///
    /// Yields the fewest coins for the canonical 1/5/10/25 set. For other
    /// denomination sets it may miss a solution or use extra coins.
    #[default]
    Greedy,
    /// Bounded fewest-coin search over every reachable value.
    ///
    /// Finds an exact combination whenever the inventory allows one.
    Minimal,
}

impl ChangeStrategy {
    pub fn make_change(
        self,
        target: Amount,
        inventory: &CoinInventory,
    ) -> Result<Change, ChangeError> {
        match self {
            ChangeStrategy::Greedy => greedy(target, inventory),
            ChangeStrategy::Minimal => minimal(target, inventory),
        }
    }
}

impl FromStr for ChangeStrategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(ChangeStrategy::Greedy),
            "minimal" => Ok(ChangeStrategy::Minimal),
            _ => Err(ParseError::UnknownStrategy(s.to_string())),
        }
    }
}

fn greedy(target: Amount, inventory: &CoinInventory) -> Result<Change, ChangeError> {
    let mut remaining = target.cents();
    let mut change = Change::default();

    for coin in Coin::ALL {
        if remaining == 0 {
            break;
        }
        let value = coin.value().cents();
        let wanted = u32::try_from(remaining / value).unwrap_or(u32::MAX);
        let take = wanted.min(inventory.count(coin));
        change.push(coin, take);
        remaining -= value * u64::from(take);
    }

    if remaining == 0 {
        Ok(change)
    } else {
        Err(ChangeError::Infeasible { target })
    }
}

fn minimal(target: Amount, inventory: &CoinInventory) -> Result<Change, ChangeError> {
    let infeasible = ChangeError::Infeasible { target };
    let target = usize::try_from(target.cents()).map_err(|_| infeasible.clone())?;

    // fewest[i][v]: fewest coins summing to v using only the first i
    // denominations of Coin::ALL, or None if v is unreachable.
    let mut fewest: Vec<Vec<Option<u32>>> = Vec::with_capacity(Coin::ALL.len() + 1);
    let mut base = vec![None; target + 1];
    base[0] = Some(0);
    fewest.push(base);

    for coin in Coin::ALL {
        let value = coin.value().cents() as usize;
        let available = inventory.count(coin) as usize;
        let prev = &fewest[fewest.len() - 1];
        let mut next = vec![None; target + 1];

        for (v, slot) in next.iter_mut().enumerate() {
            for k in 0..=available.min(v / value) {
                if let Some(used) = prev[v - k * value] {
                    let total = used + k as u32;
                    if slot.is_none_or(|best| total < best) {
                        *slot = Some(total);
                    }
                }
            }
        }
        fewest.push(next);
    }

    let mut remaining = target;
    let mut change = Change::default();
    for (i, coin) in Coin::ALL.iter().enumerate().rev() {
        let here = fewest[i + 1][remaining].ok_or_else(|| infeasible.clone())?;
        let value = coin.value().cents() as usize;
        let available = inventory.count(*coin) as usize;
        let take = (0..=available.min(remaining / value))
            .find(|k| fewest[i][remaining - k * value].map(|used| used + *k as u32) == Some(here))
            .ok_or_else(|| infeasible.clone())?;
        change.push(*coin, take as u32);
        remaining -= take * value;
    }

    Ok(change)
}
