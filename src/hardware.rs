//! Interface to the physical machine.

use crate::model::{Coin, Product};

/// Actuators the machine drives. Calls are fire-and-forget.
pub trait Hardware {
    /// Eject one coin into the return tray.
    fn return_coin(&mut self, coin: Coin);

    /// Vend one unit of `product`.
    fn dispense(&mut self, product: Product);
}

impl<H: Hardware + ?Sized> Hardware for &mut H {
    fn return_coin(&mut self, coin: Coin) {
        (**self).return_coin(coin);
    }

    fn dispense(&mut self, product: Product) {
        (**self).dispense(product);
    }
}

/// A signal sent to the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareEvent {
    ReturnCoin(Coin),
    Dispense(Product),
}

/// Hardware stand-in that records every signal in order.
#[derive(Debug, Default)]
pub struct Recorder {
    events: Vec<HardwareEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[HardwareEvent] {
        &self.events
    }

    /// Coins returned so far, in ejection order.
    pub fn returned_coins(&self) -> Vec<Coin> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HardwareEvent::ReturnCoin(coin) => Some(*coin),
                HardwareEvent::Dispense(_) => None,
            })
            .collect()
    }

    /// Products dispensed so far, in order.
    pub fn dispensed(&self) -> Vec<Product> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HardwareEvent::Dispense(product) => Some(*product),
                HardwareEvent::ReturnCoin(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Hardware for Recorder {
    fn return_coin(&mut self, coin: Coin) {
        self.events.push(HardwareEvent::ReturnCoin(coin));
    }

    fn dispense(&mut self, product: Product) {
        self.events.push(HardwareEvent::Dispense(product));
    }
}
