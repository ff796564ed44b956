//! Configuration for the linksim sender binary.
//!
//! Handles parsing command-line arguments and filling in sensible defaults.
//! The original system prompted interactively for every parameter; here
//! everything is a flag so runs are scriptable, and the resolved seed is
//! printed so noisy runs stay reproducible.

use linksim_core::frame::Algorithm;

/// Default receiver address, matching the original sender.
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 50007;

/// Complete configuration for one frame send.
#[derive(Debug, Clone)]
pub struct Config {
    /// Message text to encode
    pub message: String,

    /// Selected error-control code (with Hamming block size if applicable)
    pub algorithm: Algorithm,

    /// Per-bit flip probability for the noisy channel
    pub ber: f64,

    /// Receiver address
    pub host: String,
    pub port: u16,

    /// Seed for the noise channel RNG
    pub seed: u64,

    /// Build and print the frame but skip the socket send
    pub no_send: bool,

    /// Whether to print the resolved configuration
    pub print_config: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// `--message` is required. `--algo hamming` additionally requires `--k`.
    /// If `--seed` is absent, a time-based seed is chosen (and printed by
    /// the run summary).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut message: Option<String> = None;
        let mut algo: Option<String> = None;
        let mut k: Option<usize> = None;
        let mut ber: Option<f64> = None;
        let mut host: Option<String> = None;
        let mut port: Option<u16> = None;
        let mut seed: Option<u64> = None;
        let mut no_send = false;
        let mut print_config = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--message" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--message requires text".to_string());
                    }
                    message = Some(args[i].clone());
                }
                "--algo" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--algo requires crc32 or hamming".to_string());
                    }
                    algo = Some(args[i].to_lowercase());
                }
                "--k" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--k requires a number".to_string());
                    }
                    k = Some(args[i].parse().map_err(|_| "invalid k")?);
                }
                "--ber" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--ber requires a probability".to_string());
                    }
                    ber = Some(args[i].parse().map_err(|_| "invalid ber")?);
                }
                "--host" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--host requires an address".to_string());
                    }
                    host = Some(args[i].clone());
                }
                "--port" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--port requires a number".to_string());
                    }
                    port = Some(args[i].parse().map_err(|_| "invalid port")?);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--no-send" => {
                    no_send = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let message = message.ok_or("--message is required")?;

        let algorithm = match algo.as_deref().unwrap_or("crc32") {
            "crc32" => {
                if k.is_some() {
                    return Err("--k only applies to --algo hamming".to_string());
                }
                Algorithm::Crc32
            }
            "hamming" => {
                let k = k.ok_or("--algo hamming requires --k")?;
                Algorithm::Hamming { k }
            }
            other => return Err(format!("unknown algorithm: {other}")),
        };

        // Explicit seed, or time-derived for casual runs
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            message,
            algorithm,
            ber: ber.unwrap_or(0.0),
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
            seed,
            no_send,
            print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Message: {:?}", self.message);
        match self.algorithm {
            Algorithm::Crc32 => println!("Algorithm: CRC32"),
            Algorithm::Hamming { k } => println!("Algorithm: HAMMING (k={k})"),
        }
        println!("Bit error rate: {}", self.ber);
        println!("Destination: {}:{}", self.host, self.port);
        println!("Seed: {}", self.seed);
        println!("Send: {}", if self.no_send { "disabled" } else { "enabled" });
        println!();
    }
}

fn print_help() {
    println!("linksim: link-layer error-control demo sender (CRC-32 / Hamming SEC)");
    println!();
    println!("USAGE:");
    println!("    linksim --message <TEXT> [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --message <TEXT>    Message to encode and send (required)");
    println!("    --algo <NAME>       crc32 or hamming (default: crc32)");
    println!("    --k <N>             Hamming data-block size, 1-64 (required for hamming)");
    println!("    --ber <P>           Per-bit flip probability 0.0-1.0 (default: 0.0)");
    println!();
    println!("    --host <IP>         Receiver address (default: 127.0.0.1)");
    println!("    --port <N>          Receiver port (default: 50007)");
    println!("    --seed <N>          RNG seed for the noise channel");
    println!();
    println!("    --no-send           Print the frame but skip the socket send");
    println!("    --print-config      Print resolved configuration");
    println!("    --help, -h          Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    linksim --message Hi                          # CRC32, noiseless");
    println!("    linksim --message Hola --algo hamming --k 4   # Hamming(7,4) blocks");
    println!("    linksim --message Hi --ber 0.01 --seed 42     # Reproducible noise");
    println!();
}
