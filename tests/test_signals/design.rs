use embeddsp::BiquadCoeffs;
use pm_remez::{BandSetting, constant, pm_parameters, pm_remez};
use std::f64::consts::{PI, SQRT_2};

/// Linear-phase FIR bandpass taps from the Parks-McClellan algorithm
pub fn design_fir_bandpass(
    low_hz: f32,
    high_hz: f32,
    sample_rate: f32,
    num_taps: usize,
    transition_hz: f32,
) -> Vec<f32> {
    let normalize = |hz: f32| (hz / sample_rate) as f64;
    let trans_norm = (transition_hz / sample_rate) as f64;

    let bands = [
        BandSetting::new(0.0, normalize(low_hz) - trans_norm, constant(0.0)).unwrap(),
        BandSetting::new(normalize(low_hz), normalize(high_hz), constant(1.0)).unwrap(),
        BandSetting::new(normalize(high_hz) + trans_norm, 0.5, constant(0.0)).unwrap(),
    ];

    let params = pm_parameters(num_taps, &bands).unwrap();
    let design = pm_remez(&params).unwrap();

    design
        .impulse_response
        .iter()
        .map(|&tap| tap as f32)
        .collect()
}

/// Second-order Butterworth lowpass section (bilinear transform, a0 normalised)
pub fn butterworth_lowpass_section(sample_rate: f32, cutoff_hz: f32) -> BiquadCoeffs {
    let omega = 2.0 * PI * cutoff_hz as f64 / sample_rate as f64;
    let cos_omega = omega.cos();
    let alpha = omega.sin() / SQRT_2;

    let a0 = 1.0 + alpha;
    let b0 = (1.0 - cos_omega) / 2.0;

    BiquadCoeffs::new(
        (b0 / a0) as f32,
        ((1.0 - cos_omega) / a0) as f32,
        (b0 / a0) as f32,
        (-2.0 * cos_omega / a0) as f32,
        ((1.0 - alpha) / a0) as f32,
    )
}
