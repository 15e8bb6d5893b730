use std::f32::consts::PI;

/// Unit impulse followed by `len - 1` zeros
pub fn impulse(len: usize) -> Vec<f32> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = 1.0;
    }
    samples
}

/// Constant input of `level`
pub fn step(len: usize, level: f32) -> Vec<f32> {
    vec![level; len]
}

/// Unit-amplitude sine wave
pub fn sine(freq_hz: f32, sample_rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate).sin())
        .collect()
}

/// RMS of `samples` after skipping the first `skip` (filter settling)
pub fn rms(samples: &[f32], skip: usize) -> f32 {
    let tail = &samples[skip..];
    (tail.iter().map(|x| x * x).sum::<f32>() / tail.len() as f32).sqrt()
}
