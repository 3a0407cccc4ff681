pub mod amount;
pub mod csv;
pub mod hardware;
pub mod machine;
pub mod model;

pub use amount::Amount;
pub use hardware::{Hardware, HardwareEvent, Recorder};
pub use machine::{ChangeStrategy, CoinReturn, VendingMachine};
pub use model::{Coin, Command, Product};
