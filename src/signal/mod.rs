//! Signal generation module
//!
//! Classifies market price against fair value into BUY/SELL/HOLD

mod decision;
mod quote;
mod types;

pub use decision::classify;
pub use quote::Quote;
pub use types::{Decision, DecisionConfig, Signal};
