mod test_signals;

use approx::assert_relative_eq;
use embeddsp::{DspError, Filter, FirFilter};

const SMOOTHING_TAPS: [f32; 5] = [0.1, 0.2, 0.4, 0.2, 0.1];

fn run<F: Filter>(filter: &mut F, input: &[f32]) -> Vec<f32> {
    input.iter().map(|&x| filter.process(x)).collect()
}

fn run_fresh(taps: &[f32], input: &[f32]) -> Vec<f32> {
    let mut delay = vec![0.0; taps.len()];
    let mut fir = FirFilter::new(taps, &mut delay).unwrap();
    run(&mut fir, input)
}

#[test]
fn test_impulse_response_reproduces_taps() {
    let output = run_fresh(&SMOOTHING_TAPS, &test_signals::impulse(5));
    assert_eq!(output, SMOOTHING_TAPS);

    // Longer than the filter: trailing output is exactly zero
    let output = run_fresh(&SMOOTHING_TAPS, &test_signals::impulse(12));
    assert_eq!(&output[..5], &SMOOTHING_TAPS);
    assert!(output[5..].iter().all(|&y| y == 0.0));
}

#[test]
fn test_impulse_response_random_taps() {
    let taps = test_signals::white_noise(7, 33);
    let output = run_fresh(&taps, &test_signals::impulse(40));

    assert_eq!(&output[..33], taps.as_slice());
    assert!(output[33..].iter().all(|&y| y == 0.0));
}

#[test]
fn test_linearity() {
    let taps = test_signals::white_noise(1, 24);
    let input = test_signals::white_noise(2, 300);
    let reference = run_fresh(&taps, &input);

    // Power-of-two scaling commutes exactly with every product and sum
    let doubled: Vec<f32> = input.iter().map(|x| x * 2.0).collect();
    let output = run_fresh(&taps, &doubled);
    for (y, r) in output.iter().zip(&reference) {
        assert_eq!(*y, r * 2.0);
    }

    let k: f32 = -0.37;
    let scaled: Vec<f32> = input.iter().map(|x| x * k).collect();
    let output = run_fresh(&taps, &scaled);
    for (y, r) in output.iter().zip(&reference) {
        assert_relative_eq!(*y, r * k, epsilon = 1e-5, max_relative = 1e-4);
    }
}

#[test]
fn test_superposition() {
    let taps = test_signals::white_noise(3, 16);
    let a = test_signals::white_noise(4, 200);
    let b = test_signals::sine(440.0, 8000.0, 200);
    let sum: Vec<f32> = a.iter().zip(&b).map(|(x, y)| x + y).collect();

    let ya = run_fresh(&taps, &a);
    let yb = run_fresh(&taps, &b);
    let ysum = run_fresh(&taps, &sum);

    for ((s, ya), yb) in ysum.iter().zip(&ya).zip(&yb) {
        assert_relative_eq!(*s, ya + yb, epsilon = 1e-5, max_relative = 1e-5);
    }
}

#[test]
fn test_interleaved_instances_are_independent() {
    let taps_a = test_signals::white_noise(10, 9);
    let taps_b = SMOOTHING_TAPS;
    let input_a = test_signals::white_noise(11, 500);
    let input_b = test_signals::sine(1000.0, 48000.0, 500);

    let reference_a = run_fresh(&taps_a, &input_a);
    let reference_b = run_fresh(&taps_b, &input_b);

    let mut delay_a = vec![0.0; taps_a.len()];
    let mut delay_b = [0.0; 5];
    let mut fir_a = FirFilter::new(&taps_a, &mut delay_a).unwrap();
    let mut fir_b = FirFilter::new(&taps_b, &mut delay_b).unwrap();

    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    for (&xa, &xb) in input_a.iter().zip(&input_b) {
        out_b.push(fir_b.process(xb));
        out_a.push(fir_a.process(xa));
    }

    assert_eq!(out_a, reference_a);
    assert_eq!(out_b, reference_b);
}

#[test]
fn test_flush_matches_fresh_filter() {
    let taps = test_signals::white_noise(20, 12);
    let warmup = test_signals::white_noise(21, 37);
    let input = test_signals::white_noise(22, 100);
    let reference = run_fresh(&taps, &input);

    let mut delay = vec![0.0; taps.len()];
    let mut fir = FirFilter::new(&taps, &mut delay).unwrap();
    run(&mut fir, &warmup);

    fir.flush();
    assert_eq!(fir.write_cursor(), 0);
    assert!(fir.delay_line().iter().all(|&s| s == 0.0));

    fir.flush();
    assert_eq!(fir.write_cursor(), 0);
    assert!(fir.delay_line().iter().all(|&s| s == 0.0));

    assert_eq!(run(&mut fir, &input), reference);
}

#[test]
fn test_invalid_bindings() {
    let mut empty: [f32; 0] = [];
    assert_eq!(
        FirFilter::new(&[], &mut empty).err(),
        Some(DspError::InvalidArgument("FIR filter needs at least one tap"))
    );

    let mut delay = [0.0; 3];
    assert!(FirFilter::new(&SMOOTHING_TAPS, &mut delay).is_err());
    assert!(FirFilter::init(5, &SMOOTHING_TAPS[..3], &mut delay).is_err());
}

#[test]
fn test_designed_bandpass_passes_center_frequency() {
    let taps = test_signals::design_fir_bandpass(400.0, 600.0, 48000.0, 127, 100.0);
    assert_eq!(taps.len(), 127);

    let mut delay = vec![0.0; taps.len()];
    let mut fir = FirFilter::new(&taps, &mut delay).unwrap();
    assert_eq!(fir.group_delay_samples(), 63);

    let input = test_signals::sine(500.0, 48000.0, 4800);
    let output = run(&mut fir, &input);

    let attenuation_db =
        20.0 * (test_signals::rms(&output, 1000) / test_signals::rms(&input, 1000)).log10();
    assert!(
        attenuation_db > -3.0,
        "Center frequency too attenuated: {} dB",
        attenuation_db
    );
}

#[test]
fn test_designed_bandpass_attenuates_out_of_band() {
    let taps = test_signals::design_fir_bandpass(400.0, 600.0, 48000.0, 255, 100.0);

    let mut delay = vec![0.0; taps.len()];
    let mut fir = FirFilter::new(&taps, &mut delay).unwrap();

    let input = test_signals::sine(100.0, 48000.0, 4800);
    let output = run(&mut fir, &input);

    let attenuation_db =
        20.0 * (test_signals::rms(&output, 1000) / test_signals::rms(&input, 1000)).log10();
    assert!(
        attenuation_db < -20.0,
        "Out-of-band frequency not attenuated enough: {} dB",
        attenuation_db
    );
}

#[test]
fn test_step_settles_at_tap_sum() {
    let taps = test_signals::white_noise(30, 63);
    let tap_sum: f32 = taps.iter().sum();

    let output = run_fresh(&taps, &test_signals::step(200, 1.0));
    for &y in &output[taps.len()..] {
        assert_relative_eq!(y, tap_sum, epsilon = 1e-5);
    }
}
