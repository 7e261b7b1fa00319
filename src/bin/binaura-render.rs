//! Offline render to WAV.
//!
//! ```text
//! binaura-render out.wav --stick 500,3500 --seconds 2 --mode tone-burst
//! ```
//!
//! Passthrough renders feed a test tone as the input so the interaural
//! delay and level difference are audible.

use binaura::prelude::*;
use binaura::Result;
use clap::{Parser, ValueEnum};
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "binaura-render",
    about = "Render a held stick position to a stereo WAV file"
)]
struct Cli {
    /// Output WAV path
    output: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Length of the render in seconds
    #[arg(long, default_value = "2.0", value_parser = parse_seconds)]
    seconds: f32,

    /// Stick position held for the whole render, as X,Y in 0..=4095
    #[arg(long, default_value = "500,3500", value_parser = parse_stick)]
    stick: StickReading,

    /// Frequency of the passthrough test tone in Hz
    #[arg(long = "tone", default_value = "500.0", value_parser = parse_tone)]
    tone_hz: f32,

    /// Override the configured synthesis mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Passthrough,
    ToneBurst,
}

impl From<Mode> for SynthMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Passthrough => SynthMode::Passthrough,
            Mode::ToneBurst => SynthMode::ToneBurst,
        }
    }
}

fn parse_stick(text: &str) -> std::result::Result<StickReading, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {text:?}"))?;
    let axis = |value: &str, name: &str| -> std::result::Result<u16, String> {
        let value: u16 = value
            .trim()
            .parse()
            .map_err(|e| format!("{name} axis: {e}"))?;
        if value > 4095 {
            return Err(format!("{name} axis {value} is above 4095"));
        }
        Ok(value)
    };
    Ok(StickReading::new(axis(x, "x")?, axis(y, "y")?))
}

fn parse_seconds(text: &str) -> std::result::Result<f32, String> {
    let seconds: f32 = text.parse().map_err(|e| format!("{e}"))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("must be a positive number of seconds, got {text}"));
    }
    Ok(seconds)
}

fn parse_tone(text: &str) -> std::result::Result<f32, String> {
    let hz: f32 = text.parse().map_err(|e| format!("{e}"))?;
    if !hz.is_finite() || hz <= 0.0 {
        return Err(format!("must be a positive frequency, got {text}"));
    }
    Ok(hz)
}

/// Sine at `hz` around mid-scale, 12-bit.
fn test_tone(hz: f32, tick_rate_hz: u32) -> impl SampleSource {
    let step = TAU * hz / tick_rate_hz as f32;
    let mut phase = 0.0f32;
    binaura::io::FnSource(move || {
        let sample = 2048.0 + 1500.0 * phase.sin();
        phase = (phase + step) % TAU;
        sample as u16
    })
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => BinauraConfig::load(path)?,
        None => BinauraConfig::default(),
    };
    if let Some(mode) = cli.mode {
        settings.engine.mode = mode.into();
    }
    let config = settings.engine;
    config.validate()?;

    let ticks = (cli.seconds * config.tick_rate_hz() as f32) as usize;
    let mut renderer = OfflineRenderer::new(&config)?
        .input(test_tone(cli.tone_hz, config.tick_rate_hz()))
        .stick(FixedStick(cli.stick));
    let result = renderer.render(ticks);

    result.save_wav(&cli.output)?;
    tracing::info!(
        "Wrote {} ticks ({:.2} s at {} Hz) facing {} to {}",
        result.len(),
        cli.seconds,
        result.tick_rate_hz,
        renderer.direction().name(),
        cli.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Render failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("binaura-render").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["out.wav"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("out.wav"));
        assert_eq!(cli.config, None);
        assert_eq!(cli.seconds, 2.0);
        assert_eq!(cli.stick, StickReading::new(500, 3500));
        assert_eq!(cli.tone_hz, 500.0);
        assert_eq!(cli.mode, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&[
            "out.wav",
            "--config",
            "binaura.toml",
            "--seconds",
            "0.5",
            "--stick",
            "3300, 3500",
            "--tone",
            "880",
            "--mode",
            "tone-burst",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("binaura.toml")));
        assert_eq!(cli.seconds, 0.5);
        assert_eq!(cli.stick, StickReading::new(3300, 3500));
        assert_eq!(cli.tone_hz, 880.0);
        assert_eq!(cli.mode.map(SynthMode::from), Some(SynthMode::ToneBurst));
    }

    #[test]
    fn test_output_is_required() {
        assert!(parse(&["--seconds", "1"]).is_err());
    }

    #[test]
    fn test_rejects_non_positive_seconds() {
        assert!(parse(&["out.wav", "--seconds", "0"]).is_err());
        assert!(parse(&["out.wav", "--seconds=-1"]).is_err());
        assert!(parse(&["out.wav", "--seconds", "inf"]).is_err());
    }

    #[test]
    fn test_rejects_bad_stick() {
        assert!(parse(&["out.wav", "--stick", "500"]).is_err());
        assert!(parse(&["out.wav", "--stick", "500,4096"]).is_err());
        assert!(parse(&["out.wav", "--stick", "left,3500"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(parse(&["out.wav", "--mode", "surround"]).is_err());
    }

    #[test]
    fn test_render_writes_requested_length() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("render.wav");
        let cli = Cli {
            output: output.clone(),
            config: None,
            seconds: 0.5,
            stick: StickReading::new(500, 3500),
            tone_hz: 500.0,
            mode: Some(Mode::Passthrough),
        };
        run(cli).unwrap();

        let reader = hound::WavReader::open(&output).unwrap();
        assert_eq!(reader.duration(), 20_000);
    }
}
