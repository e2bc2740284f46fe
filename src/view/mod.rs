pub mod store;
pub mod swap_view;

pub use store::SwapStore;
pub use swap_view::{can_submit, render_changes, SwapView, TerminalSwapView};
