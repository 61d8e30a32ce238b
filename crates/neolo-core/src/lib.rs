//! Core library for neolo.
//!
//! Lexical statistics over plain text: type/token counts, neologism
//! detection against reference dictionaries, sentence splitting, and the
//! MSTTR, MLTD and HD-D diversity estimators. HD-D rests on an exact
//! hypergeometric ratio computed through prime factorizations of
//! factorials, so it stays finite for texts of any length.
//!
//! # Modules
//!
//! - [`primes`], [`factorial`], [`rational`], [`hypergeom`] - exact arithmetic
//! - [`tokenize`], [`sentences`] - text segmentation
//! - [`frequency`], [`diversity`], [`neologisms`] - statistics
//! - [`analysis`] - orchestration into a [`StatsReport`]
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use neolo_core::{AnalysisOptions, Check, analyze_lines};
//!
//! let options = AnalysisOptions {
//!     checks: vec![Check::Msttr],
//!     ..AnalysisOptions::default()
//! };
//! let report = analyze_lines(&["The cat sat on the mat."], &options).unwrap();
//! assert_eq!(report.basic.tokens, 7);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod diversity;
pub mod error;
pub mod factorial;
pub mod frequency;
pub mod hypergeom;
pub mod neologisms;
pub mod primes;
pub mod rational;
pub mod report;
pub mod sentences;
pub mod tokenize;

pub use analysis::{ALL_CHECKS, AnalysisOptions, Check, analyze_lines};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use diversity::{hdd, mltd, msttr};
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, StatsError, StatsResult,
};
pub use factorial::{PrimePowerMap, factorize_factorial, legendre_exponent};
pub use hypergeom::hypergeom_ratio;
pub use primes::primes_upto;
pub use rational::reduce_and_evaluate;
pub use report::StatsReport;
pub use sentences::sentence_split;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
