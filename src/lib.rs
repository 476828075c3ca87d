//! Net income engine for Polish business forms
//!
//! This crate compares the yearly tax and contribution burden of a sole
//! proprietorship (JDG) under each personal income tax regime, of a
//! limited-liability company (Sp. z o.o.) under each owner payout strategy,
//! and of an employment contract, all driven by an injected fiscal-year
//! rate table.
//!
//! # Example
//!
//! ```
//! use pl_tax_engine::calculation::compare_all_forms;
//! use pl_tax_engine::config::RateTable;
//! use pl_tax_engine::models::CalculationInput;
//! use rust_decimal_macros::dec;
//!
//! let table = RateTable::pl_2025();
//! let input = CalculationInput::new(dec!(15000), dec!(3000)).with_lump_sum_rate(dec!(0.12));
//! let comparison = compare_all_forms(&input, &table).unwrap();
//! println!("Best regime: {:?}", comparison.best);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
