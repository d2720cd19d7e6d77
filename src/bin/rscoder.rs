//! rscoder - Reed-Solomon encode/decode for files
//!
//! Codewords are stored as raw bytes, or as hex text with `--hex`.

use anyhow::{Context, Result};
use rscoder::experiment::{run_experiment, ExperimentConfig};
use rscoder::hex_text::{decode_hex_text, encode_hex_text};
use rscoder::reporters::{ConsoleExperimentReporter, SilentExperimentReporter};
use rscoder::{CoderConfig, ReedSolomonCoder};
use std::fs;
use std::io::Write;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = rscoder::build_cli().get_matches();

    match matches.subcommand() {
        Some(("encode", sub_matches)) => handle_encode(sub_matches),
        Some(("decode", sub_matches)) => handle_decode(sub_matches),
        Some(("experiment", sub_matches)) => handle_experiment(sub_matches),
        Some((cmd, _)) => anyhow::bail!("Unknown command: {}", cmd),
        None => anyhow::bail!("No command specified"),
    }
}

fn build_coder(matches: &clap::ArgMatches) -> Result<ReedSolomonCoder> {
    CoderConfig::from_args(matches)
        .build_coder()
        .context("Invalid coder configuration")
}

fn input_path(matches: &clap::ArgMatches) -> Result<&String> {
    matches
        .get_one::<String>("input")
        .context("Input file is required")
}

/// Read a codeword buffer, raw or as hex text
fn read_codeword(matches: &clap::ArgMatches) -> Result<Vec<u8>> {
    let path = input_path(matches)?;
    if matches.get_flag("hex") {
        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        decode_hex_text(&text).with_context(|| format!("Failed to parse hex text in {}", path))
    } else {
        fs::read(path).with_context(|| format!("Failed to read {}", path))
    }
}

fn write_output(matches: &clap::ArgMatches, bytes: &[u8]) -> Result<()> {
    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, bytes).with_context(|| format!("Failed to write {}", path)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn handle_encode(matches: &clap::ArgMatches) -> Result<()> {
    let coder = build_coder(matches)?;
    let path = input_path(matches)?;
    let message = fs::read(path).with_context(|| format!("Failed to read {}", path))?;

    let encoded = coder.encode(&message).context("Encoding failed")?;
    log::info!(
        "Encoded {} bytes into {} bytes ({} blocks)",
        message.len(),
        encoded.len(),
        encoded.len() / coder.codeword_length()
    );

    if matches.get_flag("hex") {
        write_output(matches, encode_hex_text(&encoded).as_bytes())
    } else {
        write_output(matches, &encoded)
    }
}

fn handle_decode(matches: &clap::ArgMatches) -> Result<()> {
    let coder = build_coder(matches)?;
    let codeword = read_codeword(matches)?;

    let report = coder.decode_report(&codeword);
    if report.is_success() {
        log::info!(
            "Decoded {} blocks, corrected {} symbols",
            report.block_count(),
            report.corrected_symbols()
        );
    } else {
        log::warn!(
            "{} of {} blocks could not be corrected",
            report.failed_count(),
            report.block_count()
        );
    }

    write_output(matches, &report.to_bytes(coder.failure_block()))
}

fn handle_experiment(matches: &clap::ArgMatches) -> Result<()> {
    let coder = build_coder(matches)?;
    let codeword = read_codeword(matches)?;
    let config = ExperimentConfig::from_args(matches);

    let results = if matches.get_flag("quiet") {
        run_experiment(&coder, &codeword, &config, &SilentExperimentReporter::new())
    } else {
        run_experiment(&coder, &codeword, &config, &ConsoleExperimentReporter::new())
    }
    .context("Experiment failed")?;

    if matches.get_flag("quiet") {
        for level in &results.levels {
            println!("{}\t{:.4}", level.errors_per_block, level.success_rate);
        }
    }
    Ok(())
}
