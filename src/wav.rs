use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Mono audio read from a WAV file, normalised to [-1, 1]
pub struct MonoWav {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

/// Read a mono WAV file
///
/// Integer formats are scaled by `2^(bits-1)`; float files are passed through.
pub fn load_wav_mono<P: AsRef<Path>>(path: P) -> anyhow::Result<MonoWav> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if spec.channels != 1 {
        anyhow::bail!("Expected mono WAV file, got {} channels", spec.channels);
    }

    let sample_rate = spec.sample_rate;
    let samples = read_samples(reader, &spec)?;

    Ok(MonoWav {
        samples,
        sample_rate,
    })
}

fn read_samples(mut reader: WavReader<BufReader<File>>, spec: &WavSpec) -> anyhow::Result<Vec<f32>> {
    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            // 32-bit PCM would overflow an i32 scale factor
            let max_val = 2f32.powi(spec.bits_per_sample as i32 - 1);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Write mono 32-bit float samples
pub fn save_wav_mono<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
