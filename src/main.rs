use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use embeddsp::config::FilterConfig;
use embeddsp::{BiquadCoeffs, BiquadState, Filter, FirFilter, IirCascade};

mod wav;

#[derive(Parser, Debug)]
#[command(name = "embeddsp")]
#[command(about = "Run FIR and biquad cascade filters over test signals and WAV files", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// TOML filter description
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// FIR taps, comma-separated (e.g., "0.25,0.5,0.25")
    #[arg(long, global = true, value_delimiter = ',', allow_hyphen_values = true)]
    taps: Option<Vec<f32>>,

    /// Biquad section "b0,b1,b2,a1,a2"; repeat for a cascade
    #[arg(long, global = true, allow_hyphen_values = true)]
    section: Vec<BiquadCoeffs>,

    /// Output format: text, json
    #[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the impulse response
    Impulse {
        /// Number of output samples
        #[arg(short = 'n', long, default_value_t = 16)]
        samples: usize,
    },
    /// Print the step response and the expected DC gain
    Step {
        /// Number of output samples
        #[arg(short = 'n', long, default_value_t = 64)]
        samples: usize,
    },
    /// Filter a mono WAV file, writing 32-bit float output
    Wav {
        /// Input WAV file (mono)
        input: PathBuf,
        /// Output WAV file
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Buffers owned by the host and lent to a filter engine
enum FilterStorage {
    Fir {
        taps: Vec<f32>,
        delay_line: Vec<f32>,
    },
    Iir {
        sections: Vec<BiquadCoeffs>,
        state: Vec<BiquadState>,
    },
}

impl FilterStorage {
    fn new(config: &FilterConfig) -> Self {
        match config {
            FilterConfig::Fir { taps } => Self::Fir {
                taps: taps.clone(),
                delay_line: vec![0.0; taps.len()],
            },
            FilterConfig::Iir { sections } => Self::Iir {
                sections: sections.clone(),
                state: vec![BiquadState::ZERO; sections.len()],
            },
        }
    }

    fn bind(&mut self) -> embeddsp::Result<Box<dyn Filter + '_>> {
        let filter: Box<dyn Filter + '_> = match self {
            Self::Fir { taps, delay_line } => {
                Box::new(FirFilter::new(taps.as_slice(), delay_line.as_mut_slice())?)
            }
            Self::Iir { sections, state } => {
                Box::new(IirCascade::new(sections.as_slice(), state.as_mut_slice())?)
            }
        };
        Ok(filter)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum Stimulus {
    Impulse,
    Step,
}

#[derive(Debug, Serialize)]
struct ResponseReport {
    filter: String,
    stages: usize,
    dc_gain: f32,
    stimulus: Stimulus,
    output: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct WavReport {
    filter: String,
    stages: usize,
    input: PathBuf,
    output: PathBuf,
    sample_rate: u32,
    samples: usize,
    input_peak: f32,
    output_peak: f32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = load_filter_config(&args)?;
    log::info!(
        "Using {} filter with {} stages, DC gain {:.4}",
        config,
        config.len(),
        config.dc_gain()
    );

    match &args.command {
        Command::Impulse { samples } => {
            let report = run_response(&config, Stimulus::Impulse, *samples)?;
            print_response(&report, args.format)?;
        }
        Command::Step { samples } => {
            let report = run_response(&config, Stimulus::Step, *samples)?;
            print_response(&report, args.format)?;
        }
        Command::Wav { input, output } => {
            let report = run_wav(&config, input, output)?;
            print_wav(&report, args.format)?;
        }
    }

    Ok(())
}

fn load_filter_config(args: &Args) -> Result<FilterConfig> {
    let sources = [
        args.config.is_some(),
        args.taps.is_some(),
        !args.section.is_empty(),
    ]
    .into_iter()
    .filter(|&given| given)
    .count();
    if sources > 1 {
        anyhow::bail!("Use only one of --config, --taps and --section");
    }

    if let Some(path) = &args.config {
        let content = fs::read_to_string(path).context("Failed to read filter config file")?;
        return FilterConfig::from_toml_str(&content).context("Failed to parse filter config file");
    }
    if let Some(taps) = &args.taps {
        return FilterConfig::fir(taps.clone()).context("Invalid --taps");
    }
    if !args.section.is_empty() {
        return FilterConfig::iir(args.section.clone()).context("Invalid --section");
    }
    Ok(FilterConfig::default())
}

fn run_response(config: &FilterConfig, stimulus: Stimulus, samples: usize) -> Result<ResponseReport> {
    let mut storage = FilterStorage::new(config);
    let mut filter = storage.bind()?;

    let output = (0..samples)
        .map(|n| {
            let x = match stimulus {
                Stimulus::Impulse if n == 0 => 1.0,
                Stimulus::Impulse => 0.0,
                Stimulus::Step => 1.0,
            };
            filter.process(x)
        })
        .collect();

    Ok(ResponseReport {
        filter: config.to_string(),
        stages: config.len(),
        dc_gain: config.dc_gain(),
        stimulus,
        output,
    })
}

fn run_wav(config: &FilterConfig, input: &Path, output: &Path) -> Result<WavReport> {
    let audio = wav::load_wav_mono(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    log::info!(
        "Filtering {} samples at {} Hz",
        audio.samples.len(),
        audio.sample_rate
    );

    let mut storage = FilterStorage::new(config);
    let mut filter = storage.bind()?;
    let filtered: Vec<f32> = audio.samples.iter().map(|&x| filter.process(x)).collect();

    wav::save_wav_mono(output, &filtered, audio.sample_rate)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let peak = |s: &[f32]| s.iter().fold(0.0f32, |m, x| m.max(x.abs()));
    Ok(WavReport {
        filter: config.to_string(),
        stages: config.len(),
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        sample_rate: audio.sample_rate,
        samples: filtered.len(),
        input_peak: peak(&audio.samples),
        output_peak: peak(&filtered),
    })
}

fn print_response(report: &ResponseReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "{} filter, {} stages, {:?} response",
                report.filter, report.stages, report.stimulus
            );
            println!("{:<8} {:<15}", "n", "output");
            println!("{}", "-".repeat(24));
            for (n, y) in report.output.iter().enumerate() {
                println!("{:<8} {:<15.8}", n, y);
            }
            if let (Stimulus::Step, Some(last)) = (report.stimulus, report.output.last()) {
                println!();
                println!("Final value: {:.6}", last);
                println!("DC gain:     {:.6}", report.dc_gain);
            }
        }
    }
    Ok(())
}

fn print_wav(report: &WavReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "{} -> {} ({} filter, {} stages)",
                report.input.display(),
                report.output.display(),
                report.filter,
                report.stages
            );
            println!("Samples:     {} @ {} Hz", report.samples, report.sample_rate);
            println!("Input peak:  {:.6}", report.input_peak);
            println!("Output peak: {:.6}", report.output_peak);
        }
    }
    Ok(())
}
