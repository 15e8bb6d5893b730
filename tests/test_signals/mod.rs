#![allow(dead_code, unused_imports)]

pub mod design;
pub mod generate;
pub mod noise;

pub use design::{butterworth_lowpass_section, design_fir_bandpass};
pub use generate::{impulse, rms, sine, step};
pub use noise::white_noise;
