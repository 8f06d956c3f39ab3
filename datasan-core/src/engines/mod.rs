// datasan-core/src/engines/mod.rs
//! Concrete `SanitizationEngine` implementations.
//!
//! Each engine lives in its own file and is declared here with
//! `pub mod <engine_name>;`.

pub mod regex_engine;
