//! Configuration for the link-sim application.
//!
//! Handles parsing command-line arguments and generating sensible defaults
//! (including randomized defaults that are reproducible with a seed).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments, using intelligent defaults.
//! All defaults are printed so runs are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Complete configuration for a demo run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Payload ===
    /// Message to transmit (None = generate sample)
    pub message: Option<String>,

    /// Length of the generated sample message, when used
    pub sample_len: usize,

    // === Channel ===
    /// Target bit-error rate [0.0, 1.0]
    pub ber: f64,

    /// Seed for all randomness (explicit or time-based)
    pub seed: u64,

    /// Trials for the aggregate channel analysis
    pub trials: usize,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the multi-trial channel statistics
    pub print_stats: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// If no arguments are provided, generates randomized defaults using a
    /// time-based seed. If --seed is provided, uses that seed for all
    /// randomness (fully deterministic).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut message: Option<String> = None;
        let mut sample_len: Option<usize> = None;
        let mut ber: Option<f64> = None;
        let mut seed: Option<u64> = None;
        let mut trials: Option<usize> = None;
        let mut print_config = false;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--message" | "-m" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--message requires a string".to_string());
                    }
                    message = Some(args[i].clone());
                }
                "--sample-len" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-len requires a number".to_string());
                    }
                    sample_len = Some(args[i].parse().map_err(|_| "invalid sample-len")?);
                }
                "--ber" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--ber requires a number".to_string());
                    }
                    let value: f64 = args[i].parse().map_err(|_| "invalid ber")?;
                    if !(0.0..=1.0).contains(&value) {
                        return Err(format!("ber {value} outside [0.0, 1.0]"));
                    }
                    ber = Some(value);
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--trials" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--trials requires a number".to_string());
                    }
                    let value: usize = args[i].parse().map_err(|_| "invalid trials")?;
                    if value == 0 {
                        return Err("trials must be > 0".to_string());
                    }
                    trials = Some(value);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-stats" => {
                    print_stats = false;
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

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default()
        });

        // Generate defaults using the seed
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let config = Config {
            message,
            sample_len: sample_len.unwrap_or(48),
            ber: ber.unwrap_or_else(|| {
                // Bias toward small error rates
                let r: f64 = rng.gen();
                (r * r * 0.05).min(0.05) // 0-5%, biased toward 0
            }),
            seed,
            trials: trials.unwrap_or(1000),
            print_config,
            print_stats,
        };

        Ok(config)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.message {
            Some(m) => println!("Message: {:?}", m),
            None => println!("Message: (generate sample, {} chars)", self.sample_len),
        }
        println!("Seed: {}", self.seed);
        println!("Target BER: {:.4} ({:.2}%)", self.ber, self.ber * 100.0);
        println!("Trials: {}", self.trials);
        println!();
    }
}

fn print_help() {
    println!("link-sim: frame, corrupt, and recover messages over a simulated noisy channel");
    println!();
    println!("USAGE:");
    println!("  link-sim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -m, --message <TEXT>   Message to transmit (default: generated sample)");
    println!("      --sample-len <N>   Length of the generated sample message (default: 48)");
    println!("      --ber <RATE>       Target bit-error rate in [0.0, 1.0] (default: randomized)");
    println!("      --seed <N>         Seed for reproducible runs (default: time-based)");
    println!("      --trials <N>       Trials for the channel analysis (default: 1000)");
    println!("      --print-config     Print the resolved configuration");
    println!("      --no-stats         Skip the multi-trial channel statistics");
    println!("  -h, --help             Show this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_with_explicit_seed() {
        let config = Config::from_args(&args(&["--seed", "7"])).unwrap();

        assert_eq!(config.seed, 7);
        assert!(config.message.is_none());
        assert!((0.0..=0.05).contains(&config.ber));
        assert_eq!(config.trials, 1000);
        assert!(config.print_stats);
    }

    #[test]
    fn test_defaults_are_reproducible() {
        let c1 = Config::from_args(&args(&["--seed", "99"])).unwrap();
        let c2 = Config::from_args(&args(&["--seed", "99"])).unwrap();
        assert_eq!(c1.ber, c2.ber);
    }

    #[test]
    fn test_explicit_values_win() {
        let config = Config::from_args(&args(&[
            "--seed", "1", "--ber", "0.25", "--trials", "10", "-m", "hi",
        ]))
        .unwrap();

        assert_eq!(config.ber, 0.25);
        assert_eq!(config.trials, 10);
        assert_eq!(config.message.as_deref(), Some("hi"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_args(&args(&["--ber", "1.5"])).is_err());
        assert!(Config::from_args(&args(&["--trials", "0"])).is_err());
        assert!(Config::from_args(&args(&["--bogus"])).is_err());
        assert!(Config::from_args(&args(&["--seed"])).is_err());
    }
}
