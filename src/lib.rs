//! Allocation-free FIR and cascaded biquad IIR filters for sample-by-sample
//! streaming.
//!
//! Both filters are views over buffers owned by the caller: the filter
//! borrows coefficients immutably and its state mutably, so the borrow checker
//! keeps the buffers alive and unshared for as long as the filter exists.
//! Binding clears the state; `process` and `flush` never allocate or fail.

pub mod config;
pub mod error;
pub mod signal_processing;

pub use config::FilterConfig;
pub use error::{DspError, Result};
pub use signal_processing::{BiquadCoeffs, BiquadState, Filter, FirFilter, IirCascade};
