//! Vending machine state holder.
//!
//! The machine keeps a credit ledger for the current customer and a coin
//! inventory used to make change. Customer operations can be called directly
//! or fed as a stream of [`Command`]s.

use tokio_stream::{Stream, StreamExt};
use tracing::{error, info, warn};

use crate::Amount;
use crate::hardware::Hardware;
use crate::model::{Coin, Command, Product};

mod change;
pub use change::{Change, ChangeStrategy};

mod inventory;
pub use inventory::CoinInventory;

mod error;
pub use error::{ChangeError, InventoryError, MachineError};

/// Outcome of a coin-return request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoinReturn {
    /// No credit was held; the hardware was not touched.
    Nothing,
    /// The full credit was paid out with these coins.
    Returned(Change),
    /// Exact change was impossible; this credit stays in the machine.
    Retained(Amount),
}

/// A coin-operated vending machine driving hardware `H`.
pub struct VendingMachine<H> {
    hardware: H,
    credit: Amount,
    inventory: CoinInventory,
    strategy: ChangeStrategy,
}

/// Public API
impl<H: Hardware> VendingMachine<H> {
    /// Empty machine using greedy change making.
    pub fn new(hardware: H) -> Self {
        Self::with_strategy(hardware, ChangeStrategy::default())
    }

    pub fn with_strategy(hardware: H, strategy: ChangeStrategy) -> Self {
        Self {
            hardware,
            credit: Amount::ZERO,
            inventory: CoinInventory::new(),
            strategy,
        }
    }

    /// Credit held for the current customer.
    pub fn credit(&self) -> Amount {
        self.credit
    }

    pub fn inventory(&self) -> &CoinInventory {
        &self.inventory
    }

    pub fn strategy(&self) -> ChangeStrategy {
        self.strategy
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn into_hardware(self) -> H {
        self.hardware
    }

    /// Stock coins for making change. Does not affect credit.
    pub fn load_change(&mut self, coins: impl IntoIterator<Item = Coin>) {
        self.inventory.extend(coins);
    }

    /// Accept a coin: it is credited and becomes available as change.
    pub fn insert_coin(&mut self, coin: Coin) {
        self.credit += coin.value();
        self.inventory.add(coin);
    }

    /// Vend `product` if enough credit is held, deducting its price.
    pub fn purchase(&mut self, product: Product) -> Result<(), MachineError> {
        let price = product.price();
        let remaining =
            self.credit
                .checked_sub(price)
                .ok_or(MachineError::InsufficientCredit {
                    product,
                    price,
                    credit: self.credit,
                })?;

        self.hardware.dispense(product);
        self.credit = remaining;

        Ok(())
    }

    /// Pay out the full credit in exact change.
    ///
    /// When the inventory cannot make the credit exactly, nothing is paid
    /// out and credit and inventory are left as they were.
    pub fn return_coins(&mut self) -> CoinReturn {
        let target = self.credit;
        if target.is_zero() {
            return CoinReturn::Nothing;
        }

        let change = match self.strategy.make_change(target, &self.inventory) {
            Ok(change) => change,
            Err(e) => {
                warn!(credit = %target, reason = %e, "credit retained");
                return CoinReturn::Retained(target);
            }
        };

        if let Err(e) = self.inventory.withdraw(&change) {
            error!(credit = %target, reason = %e, "change exceeds inventory, credit retained");
            return CoinReturn::Retained(target);
        }

        for coin in change.coins() {
            self.hardware.return_coin(coin);
        }
        self.credit = Amount::ZERO;

        CoinReturn::Returned(change)
    }

    /// Apply a single command on top of the current machine state.
    pub fn apply(&mut self, command: Command) -> Result<(), MachineError> {
        match command {
            Command::Load(coin) => {
                self.load_change([coin]);
                info!(coin = %coin, "change loaded");
            }
            Command::Insert(coin) => {
                self.insert_coin(coin);
                info!(coin = %coin, credit = %self.credit, "coin inserted");
            }
            Command::Purchase(product) => {
                let result = self.purchase(product);
                match &result {
                    Ok(()) => info!(product = %product, credit = %self.credit, "product dispensed"),
                    Err(e) => info!(product = %product, reason = %e, "purchase skipped"),
                }
                result?;
            }
            Command::Return => match self.return_coins() {
                CoinReturn::Nothing => info!("no credit to return"),
                CoinReturn::Returned(change) => {
                    info!(amount = %change.value(), coins = change.coin_count(), "coins returned")
                }
                CoinReturn::Retained(credit) => info!(credit = %credit, "return skipped"),
            },
        }
        Ok(())
    }

    /// Run the machine with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a failed command leaves the machine unchanged, carry on with the next one
            let _ = self.apply(command);
        }
    }
}

impl<H: Hardware + Default> Default for VendingMachine<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}
