use std::collections::BTreeMap;

use crate::Amount;
use crate::model::Coin;

use super::Change;
use super::error::InventoryError;

/// Coins held by the machine and available for making change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinInventory {
    counts: BTreeMap<Coin, u32>,
}

impl CoinInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, coin: Coin) -> u32 {
        self.counts.get(&coin).copied().unwrap_or(0)
    }

    pub fn add(&mut self, coin: Coin) {
        *self.counts.entry(coin).or_insert(0) += 1;
    }

    /// Total value of every coin held.
    pub fn value(&self) -> Amount {
        self.counts
            .iter()
            .map(|(coin, count)| coin.value() * *count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|count| *count == 0)
    }

    /// Remove the coins in `change`.
    ///
    /// Either every count is decremented or, on shortfall, nothing is.
    pub fn withdraw(&mut self, change: &Change) -> Result<(), InventoryError> {
        for (coin, requested) in change.iter() {
            let available = self.count(coin);
            if available < requested {
                return Err(InventoryError::Shortfall {
                    coin,
                    requested,
                    available,
                });
            }
        }

        for (coin, requested) in change.iter() {
            if let Some(count) = self.counts.get_mut(&coin) {
                *count -= requested;
            }
        }
        self.counts.retain(|_, count| *count > 0);

        Ok(())
    }
}

impl Extend<Coin> for CoinInventory {
    fn extend<I: IntoIterator<Item = Coin>>(&mut self, coins: I) {
        for coin in coins {
            self.add(coin);
        }
    }
}

impl FromIterator<Coin> for CoinInventory {
    fn from_iter<I: IntoIterator<Item = Coin>>(coins: I) -> Self {
        let mut inventory = Self::new();
        inventory.extend(coins);
        inventory
    }
}
