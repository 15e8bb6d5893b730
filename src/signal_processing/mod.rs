pub mod biquad;
mod delay_line;
pub mod filter;
pub mod fir;
pub mod iir_cascade;

pub use biquad::{BiquadCoeffs, BiquadState};
pub(crate) use delay_line::DelayLine;
pub use filter::Filter;
pub use fir::FirFilter;
pub use iir_cascade::IirCascade;
