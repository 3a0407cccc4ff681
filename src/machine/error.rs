//! Error types for machine operations.

use thiserror::Error;

use crate::Amount;
use crate::model::{Coin, Product};

/// Error returned by [`VendingMachine::apply`](super::VendingMachine::apply)
/// and [`VendingMachine::purchase`](super::VendingMachine::purchase).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("insufficient credit for {product}: price {price}, credit {credit}")]
    InsufficientCredit {
        product: Product,
        price: Amount,
        credit: Amount,
    },
}

/// The change-making engine could not hit the target exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    #[error("cannot make exact change for {target} from inventory")]
    Infeasible { target: Amount },
}

/// A withdrawal asked for more coins than the inventory holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("inventory holds {available} {coin}, {requested} requested")]
    Shortfall {
        coin: Coin,
        requested: u32,
        available: u32,
    },
}
