//! Domain models for the decisioning engine

mod credit;
mod premium;
mod risk;
mod soil;
mod weather;

pub use credit::*;
pub use premium::*;
pub use risk::*;
pub use soil::*;
pub use weather::*;
