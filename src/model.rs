//! Core domain types for the vending machine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;

/// Error converting text into a domain value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown coin '{0}'")]
    UnknownCoin(String),
    #[error("unknown product '{0}'")]
    UnknownProduct(String),
    #[error("unknown change strategy '{0}'")]
    UnknownStrategy(String),
}

/// A coin denomination accepted by the machine.
///
/// Variants are declared in ascending value so the derived ordering matches
/// the ordering by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coin {
    Penny,
    Nickel,
    Dime,
    Quarter,
}

impl Coin {
    /// All denominations, largest value first.
    pub const ALL: [Coin; 4] = [Coin::Quarter, Coin::Dime, Coin::Nickel, Coin::Penny];

    pub const fn value(self) -> Amount {
        Amount::from_cents(match self {
            Coin::Penny => 1,
            Coin::Nickel => 5,
            Coin::Dime => 10,
            Coin::Quarter => 25,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Coin::Penny => "penny",
            Coin::Nickel => "nickel",
            Coin::Dime => "dime",
            Coin::Quarter => "quarter",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Coin {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coin::ALL
            .into_iter()
            .find(|coin| coin.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownCoin(s.to_string()))
    }
}

/// A catalog entry the machine can vend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    ChocolateSaltyBalls,
    Cola,
    Gum,
}

impl Product {
    pub const ALL: [Product; 3] = [Product::ChocolateSaltyBalls, Product::Cola, Product::Gum];

    pub const fn price(self) -> Amount {
        Amount::from_cents(match self {
            Product::ChocolateSaltyBalls => 65,
            Product::Cola => 100,
            Product::Gum => 15,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Product::ChocolateSaltyBalls => "chocolate_salty_balls",
            Product::Cola => "cola",
            Product::Gum => "gum",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Product {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .into_iter()
            .find(|product| product.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownProduct(s.to_string()))
    }
}

/// A single operation requested of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stock one coin for making change. Not customer facing.
    Load(Coin),
    /// Customer inserts a coin; adds to credit and inventory.
    Insert(Coin),
    /// Customer selects a product.
    Purchase(Product),
    /// Customer presses the coin return.
    Return,
}
