//! linksim sender: drive the error-control pipeline and hand the frame to
//! a receiver over TCP.
//!
//! The binary is a thin wrapper: all coding logic lives in `linksim-core`.
//! This layer parses flags, prints the run summary the original sender
//! showed (bit views, checksum, block dimensions, clean vs. noisy frame),
//! and performs the single connect-and-send.

mod config;

use config::Config;
use linksim_core::frame::{CodeDetail, FrameBuilder, Noised};
use linksim_core::noise::NoiseChannel;
use std::io::Write;
use std::net::TcpStream;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = FrameBuilder::load_message(&config.message)?;

    println!("=== Sender Summary ===");
    println!("Message:     {}", config.message);
    println!("ASCII->bits: {}", group_every(loaded.bits().as_str(), 8));

    let encoded = loaded.encode(config.algorithm)?;
    match encoded.detail() {
        CodeDetail::Crc32 { value } => {
            println!("CRC32 (bin): {}", group_every(value.to_bits().as_str(), 4));
            println!("CRC32 (hex): {value}");
        }
        CodeDetail::Hamming { params, pad_bits } => {
            println!(
                "Hamming:     k={}, r={}, n={}, pad={}",
                params.k, params.r, params.n, pad_bits
            );
            println!(
                "Blocks:      {}",
                group_every(encoded.frame().as_str(), params.n)
            );
        }
    }
    println!(
        "Overhead:    {:.1}% of the frame",
        encoded.overhead_percent()
    );

    let mut channel = NoiseChannel::seeded(config.seed);
    let noised = encoded.add_noise(&mut channel, config.ber)?;

    println!("Clean frame: {}", group_every(noised.clean().as_str(), 8));
    println!("Noisy frame: {}", group_every(noised.noisy().as_str(), 8));
    println!("Noise:       ber={}, seed={}", config.ber, config.seed);
    print_flip_count(&noised);
    println!("Destination: {}:{}", config.host, config.port);
    println!();

    let record = noised.finish();
    let line = record.to_line()?;

    if config.no_send {
        println!("Send skipped (--no-send). Record line:");
        print!("{line}");
        return Ok(());
    }

    send_line(&config.host, config.port, &line)?;
    println!("Frame sent.");
    Ok(())
}

/// Report how many bits the channel actually flipped on this run.
fn print_flip_count(noised: &Noised) {
    let flips = noised
        .clean()
        .bits()
        .zip(noised.noisy().bits())
        .filter(|(clean, noisy)| clean != noisy)
        .count();
    let total = noised.clean().len();
    let percent = if total == 0 {
        0.0
    } else {
        100.0 * flips as f64 / total as f64
    };
    println!("Flips:       {flips} / {total} bits ({percent:.2}%)");
}

/// Insert a space every `n` symbols, for readable bit dumps.
fn group_every(s: &str, n: usize) -> String {
    if n == 0 {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + s.len() / n);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && i % n == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Connect to the receiver, send one record line, close.
///
/// No retries or partial-send recovery: a failure here is the transport's
/// to report, and the process exits non-zero.
fn send_line(host: &str, port: u16, line: &str) -> std::io::Result<()> {
    let mut stream = TcpStream::connect((host, port))?;
    stream.write_all(line.as_bytes())?;
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_every() {
        assert_eq!(group_every("01001000", 4), "0100 1000");
        assert_eq!(group_every("0100100", 4), "0100 100");
        assert_eq!(group_every("01", 4), "01");
        assert_eq!(group_every("", 4), "");
        assert_eq!(group_every("0101", 0), "0101");
    }
}
