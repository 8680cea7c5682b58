//! ladder_probe - measure ladder responses from the command line
//!
//! Renders an impulse through each response type and reports the stopband
//! slope (lowpass/highpass) or the resonant peak (bandpass).
//!
//! Run with: cargo run --bin ladder_probe -- --cutoff 1000 --resonance 4

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use ladder_dsp::{
    analysis::{impulse_response, SpectrumAnalyzer},
    graph::{GraphNode, LadderNode},
    FilterType, LadderConfig, MoogLadderFilter,
};

#[derive(Parser, Debug)]
#[command(name = "ladder_probe")]
#[command(about = "Measure slope and peak of the ladder filter responses")]
#[command(version)]
struct Cli {
    /// Response to measure (LPF2, LPF4, HPF2, HPF4, BPF2, BPF4); all when omitted
    #[arg(short = 't', long = "type")]
    filter_type: Option<FilterType>,

    /// Cutoff in Hz
    #[arg(short, long, default_value_t = 1_000.0)]
    cutoff: f32,

    /// Resonance (Q); 10 is the self-oscillation threshold
    #[arg(short, long, default_value_t = 0.0)]
    resonance: f32,

    /// Saturation gain in front of tanh
    #[arg(short, long, default_value_t = 1.1)]
    drive: f32,

    #[arg(short, long, default_value_t = 44_100.0)]
    sample_rate: f32,

    /// FFT length, also the impulse response length
    #[arg(long, default_value_t = 32_768)]
    fft_size: usize,

    /// Bypass the tanh stage
    #[arg(long)]
    linear: bool,

    /// Log node setup
    #[arg(short, long)]
    verbose: bool,
}

struct Measurement {
    filter_type: FilterType,
    cutoff: f32,
    label: &'static str,
    value: f64,
    unit: &'static str,
}

fn measure(cli: &Cli, filter_type: FilterType, analyzer: &mut SpectrumAnalyzer) -> color_eyre::Result<Measurement> {
    let config = LadderConfig::default()
        .with_type(filter_type)
        .with_cutoff(cli.cutoff)
        .with_resonance(cli.resonance)
        .with_drive(cli.drive)
        .with_nonlinear(!cli.linear)
        .with_noise(0.0, 0);

    let mut node = LadderNode::new(config, cli.sample_rate)
        .wrap_err_with(|| format!("cannot set up {filter_type} at {} Hz", cli.sample_rate))?;
    let cutoff = node.cutoff();
    if cutoff != cli.cutoff {
        log::warn!("{filter_type}: cutoff clamped from {} Hz to {cutoff} Hz", cli.cutoff);
    }

    let response = impulse_response(cli.fft_size, |x| node.process(x));
    let spectrum = analyzer.analyze(&response);
    let fc = cutoff as f64;

    let measurement = if filter_type.is_lowpass() {
        Measurement {
            filter_type,
            cutoff,
            label: "slope",
            value: spectrum.slope_lowpass(fc),
            unit: "dB/oct",
        }
    } else if filter_type.is_highpass() {
        Measurement {
            filter_type,
            cutoff,
            label: "slope",
            value: spectrum.slope_highpass(fc),
            unit: "dB/oct",
        }
    } else {
        Measurement {
            filter_type,
            cutoff,
            label: "peak",
            value: spectrum.bin_to_freq(spectrum.peak_bin()),
            unit: "Hz",
        }
    };
    Ok(measurement)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .wrap_err("failed to install logger")?;

    if cli.fft_size < 64 {
        return Err(eyre!("fft size {} is too short to measure anything", cli.fft_size));
    }

    let types: Vec<FilterType> = match cli.filter_type {
        Some(t) => vec![t],
        None => MoogLadderFilter::types().to_vec(),
    };

    let mut analyzer = SpectrumAnalyzer::new(cli.fft_size, cli.sample_rate);
    println!(
        "{} Hz, Q {}, drive {}, {}",
        cli.sample_rate,
        cli.resonance,
        cli.drive,
        if cli.linear { "linear" } else { "tanh" }
    );
    for filter_type in types {
        let m = measure(&cli, filter_type, &mut analyzer)?;
        println!(
            "{:>5} @ {:>8.1} Hz  {:<5} {:>9.2} {}",
            m.filter_type, m.cutoff, m.label, m.value, m.unit
        );
    }

    Ok(())
}
