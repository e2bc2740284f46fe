pub mod swap_controller;

pub use swap_controller::{ControllerSettings, SwapController};
