pub mod swap_interactor;

pub use swap_interactor::{ExecutionLimits, SwapInteractor, SwapInteractorImpl};
