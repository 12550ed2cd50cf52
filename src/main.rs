use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use tuning_companion::io::{export_all, import_curve};
use tuning_companion::session::{load_session, save_session, SessionFile};
use tuning_companion::{
    crossover_mismatches, init_tracing, AppError, ChannelConfig, HouseCurveRegistry,
    THIRD_OCTAVE_HZ,
};

/// Derive per-channel crossover target curves from a house curve
#[derive(Debug, Parser)]
#[command(name = "tuning-companion", version)]
struct Cli {
    /// Session file (JSON) with channels and custom curves; defaults to the
    /// five-way startup layout
    #[arg(long)]
    session: Option<PathBuf>,

    /// Baseline curve to select (e.g. "House Curve", "Custom 1")
    #[arg(long)]
    house_curve: Option<String>,

    /// Load a REW/FRD file into a custom slot: NAME=FILE (repeatable)
    #[arg(long = "import", value_parser = parse_import)]
    imports: Vec<(String, PathBuf)>,

    /// Write REW files here instead of printing a table
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save the resulting session to this file
    #[arg(long)]
    save_session: Option<PathBuf>,
}

fn parse_import(s: &str) -> Result<(String, PathBuf), String> {
    let (name, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FILE, got '{s}'"))?;
    if name.trim().is_empty() || path.trim().is_empty() {
        return Err(format!("expected NAME=FILE, got '{s}'"));
    }
    Ok((name.trim().to_string(), PathBuf::from(path.trim())))
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut registry = HouseCurveRegistry::default();
    let session = match &cli.session {
        Some(path) => load_session(path)?,
        None => SessionFile::default(),
    };
    session.apply_to(&mut registry)?;

    for (name, path) in &cli.imports {
        registry.load_custom(name, import_curve(path)?)?;
    }
    if let Some(name) = &cli.house_curve {
        registry.set_selected(name)?;
    }

    let channels = &session.channels;
    for mismatch in crossover_mismatches(channels) {
        warn!("{mismatch}");
    }

    match cli.output.as_ref().or(session.output_folder.as_ref()) {
        Some(dir) => {
            let written = export_all(dir, &registry, channels)?;
            info!("wrote {} files to {}", written.len(), dir.display());
        }
        None => print_table(&registry, channels),
    }

    if let Some(path) = &cli.save_session {
        let mut out = SessionFile::capture(&registry, channels);
        out.output_folder = cli.output.clone().or(session.output_folder.clone());
        save_session(path, &out)?;
    }
    Ok(())
}

fn print_table(registry: &HouseCurveRegistry, channels: &[ChannelConfig]) {
    let house = registry.get_selected();
    let targets: Vec<(&str, _)> = channels
        .iter()
        .filter_map(|c| c.target_curve(registry).map(|curve| (c.name.as_str(), curve)))
        .collect();

    let mut header = format!("{:>10} {:>12}", "Freq(Hz)", registry.selected_name());
    for (name, _) in &targets {
        header.push_str(&format!(" {:>12}", name));
    }
    println!("{header}");

    for (i, f) in THIRD_OCTAVE_HZ.iter().enumerate() {
        let mut row = format!("{:>10.1} {:>12.2}", f, house[i]);
        for (_, curve) in &targets {
            row.push_str(&format!(" {:>12.2}", curve[i]));
        }
        println!("{row}");
    }
}
