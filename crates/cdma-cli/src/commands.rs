use std::path::Path;

use anyhow::Context;
use cdma_codec::{Channel, ChipStream, CodeSet};
use colored::Colorize;
use serde::Serialize;

use crate::cli::*;
use crate::config::DriverConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = DriverConfig::load(cli.config.as_deref())?.with_size(cli.size);
    match cli.command {
        Command::Codes(_) => cmd_codes(&config, &cli.format),
        Command::Transmit(args) => cmd_transmit(&config, &cli.format, args),
        Command::Decode(args) => cmd_decode(&config, &cli.format, args),
        Command::Roundtrip(args) => cmd_roundtrip(&config, &cli.format, args),
    }
}

fn cmd_codes(config: &DriverConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let codes = config.codec.build_code_set()?;
    match format {
        OutputFormat::Text => {
            println!("Walsh codes for n = {}", codes.size().to_string().bold());
            for (i, row) in codes.rows().enumerate() {
                let chips: Vec<String> = row.iter().map(|c| format!("{c:>2}")).collect();
                println!("  {} {}", format!("#{i:<3}").yellow(), chips.join(" "));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<&[i8]> = codes.rows().collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

fn register_all(channel: &mut Channel, messages: &[String]) -> anyhow::Result<()> {
    for message in messages {
        let station = channel
            .register(message)
            .with_context(|| format!("registering station for '{message}'"))?;
        tracing::info!(%station, message = %message, "station registered");
    }
    Ok(())
}

fn cmd_transmit(
    config: &DriverConfig,
    format: &OutputFormat,
    args: TransmitArgs,
) -> anyhow::Result<()> {
    let messages = if args.messages.is_empty() { &config.messages } else { &args.messages };
    let mut channel = Channel::new(&config.codec)?;
    register_all(&mut channel, messages)?;
    let stream = channel.transmitter().send()?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string(&stream)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!(
            "{} Wrote {} chips for {} stations to {}",
            "✓".green().bold(),
            stream.len().to_string().bold(),
            messages.len(),
            path.display()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_stream(&stream, channel.code_set()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stream)?),
    }
    Ok(())
}

fn print_stream(stream: &ChipStream, codes: &CodeSet) {
    println!(
        "Chip stream: {} chips, {} characters × 8 bits × {} chips",
        stream.len().to_string().bold(),
        stream.message_length(),
        codes.size()
    );
    for (i, character) in stream.characters().enumerate() {
        println!("  {}", format!("char {i}").cyan());
        for block in character.chunks_exact(codes.size()) {
            let chips: Vec<String> = block.iter().map(|c| format!("{c:>3}")).collect();
            println!("    {}", chips.join(" "));
        }
    }
}

fn read_stream(path: &Path) -> anyhow::Result<ChipStream> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing chip stream {}", path.display()))
}

#[derive(Serialize)]
struct DecodedStation {
    station: usize,
    message: String,
}

fn cmd_decode(
    config: &DriverConfig,
    format: &OutputFormat,
    args: DecodeArgs,
) -> anyhow::Result<()> {
    let stream = read_stream(&args.input)?;
    let channel = Channel::new(&config.codec)?;
    let receiver = channel.receiver();

    let decoded: Vec<DecodedStation> = match args.station {
        Some(station) => vec![DecodedStation {
            station,
            message: receiver.decode_station(&stream, station)?,
        }],
        None => {
            let count = args.count.unwrap_or(config.codec.code_length);
            receiver
                .decode_many(&stream, count)?
                .into_iter()
                .enumerate()
                .map(|(station, message)| DecodedStation { station, message })
                .collect()
        }
    };

    match format {
        OutputFormat::Text => {
            for d in &decoded {
                println!("{} '{}'", format!("#{}", d.station).yellow(), d.message.escape_debug());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decoded)?),
    }
    Ok(())
}

#[derive(Serialize)]
struct StationReport {
    station: usize,
    expected: String,
    actual: String,
    ok: bool,
}

fn cmd_roundtrip(
    config: &DriverConfig,
    format: &OutputFormat,
    args: RoundtripArgs,
) -> anyhow::Result<()> {
    let messages = if args.messages.is_empty() { &config.messages } else { &args.messages };
    let mut channel = Channel::new(&config.codec)?;
    register_all(&mut channel, messages)?;
    let result = channel.round_trip()?;

    let reports: Vec<StationReport> = messages
        .iter()
        .zip(result.decoded)
        .enumerate()
        .map(|(station, (expected, actual))| StationReport {
            station,
            ok: *expected == actual,
            expected: expected.clone(),
            actual,
        })
        .collect();
    let failed = reports.iter().filter(|r| !r.ok).count();

    match format {
        OutputFormat::Text => {
            println!(
                "Stations: {}, code length: {}, chips: {}",
                messages.len().to_string().bold(),
                channel.code_set().size(),
                result.stream.len()
            );
            for r in &reports {
                if r.ok {
                    println!("  {} #{} '{}'", "✓".green(), r.station, r.actual);
                } else {
                    println!(
                        "  {} #{} expected '{}', but found '{}'",
                        "✗".red().bold(),
                        r.station,
                        r.expected,
                        r.actual.escape_debug()
                    );
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} stations did not round-trip", reports.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run(args: &[&str]) -> anyhow::Result<()> {
        run_command(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn roundtrip_with_default_fixtures() {
        run(&["cdma", "roundtrip"]).unwrap();
    }

    #[test]
    fn roundtrip_rejects_unequal_lengths() {
        let err = run(&["cdma", "roundtrip", "ab", "abc"]).unwrap_err();
        assert!(format!("{err:#}").contains("message is 3 characters"));
    }

    #[test]
    fn roundtrip_rejects_too_many_stations() {
        assert!(run(&["cdma", "-n", "2", "roundtrip", "a", "b", "c"]).is_err());
    }

    #[test]
    fn codes_rejects_bad_size() {
        assert!(run(&["cdma", "codes", "--size", "6"]).is_err());
    }

    #[test]
    fn transmit_then_decode_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        let path_str = path.to_str().unwrap();
        run(&["cdma", "-n", "4", "transmit", "ab", "cd", "-o", path_str]).unwrap();

        let stream = read_stream(&path).unwrap();
        assert_eq!(stream.len(), 2 * 8 * 4);
        run(&["cdma", "-n", "4", "decode", path_str, "--station", "1"]).unwrap();
        run(&["cdma", "-n", "4", "--format", "json", "decode", path_str]).unwrap();
    }

    #[test]
    fn decode_with_wrong_size_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stream.json");
        let path_str = path.to_str().unwrap();
        run(&["cdma", "-n", "4", "transmit", "ab", "-o", path_str]).unwrap();
        assert!(run(&["cdma", "-n", "8", "decode", path_str]).is_err());
    }
}
