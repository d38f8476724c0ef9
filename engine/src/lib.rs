//! Decisioning engine for the AgriShield micro-insurance and micro-credit platform
//!
//! This crate contains the pure computations shared by the backend and the
//! offline mobile client (via WASM): climate indicators, crop risk
//! classification, multi-source weather validation, premium pricing, soil
//! scoring and farmer credit scoring. It performs no I/O and never reads the
//! system clock.

pub mod classifier;
pub mod config;
pub mod credit;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod models;
pub mod pricing;
pub mod soil;
pub mod types;
pub mod validator;

pub use classifier::CropRiskClassifier;
pub use config::EngineConfig;
pub use credit::CreditScorer;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use indicators::WeatherIndicatorCalculator;
pub use models::*;
pub use pricing::PremiumPricer;
pub use types::*;
pub use validator::MultiSourceValidator;
