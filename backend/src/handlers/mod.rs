//! HTTP handlers

pub mod credit;
pub mod health;
pub mod insurance;
pub mod risk;
pub mod soil;
pub mod weather;

pub use credit::*;
pub use health::*;
pub use insurance::*;
pub use risk::*;
pub use soil::*;
pub use weather::*;
