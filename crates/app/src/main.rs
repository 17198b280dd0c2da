//! link-sim demo: frame a message, push it through a noisy channel, and
//! show what CRC detection and Hamming(7,4) correction each buy you.
//!
//! The run has three stages:
//! 1. A raw (CRC-only) frame is transmitted through the channel; the
//!    receiver either accepts it or rejects it as corrupted.
//! 2. The same payload is Hamming-encoded and its coded bits take the
//!    same noisy path before framing; the decoder corrects what it can.
//! 3. The channel is replayed for many trials to show the achieved
//!    error-rate distribution against the target.

mod config;
mod input_gen;

use config::Config;
use link_sim_core::{
    bits::{bits_to_bytes, bytes_to_bits},
    channel::{ChannelSimulator, ChannelStats},
    frame,
};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Try --help for usage.");
            std::process::exit(1);
        }
    };

    if let Err(error) = run(&config) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> link_sim_core::Result<()> {
    if config.print_config {
        config.print();
    }

    let message = config
        .message
        .clone()
        .unwrap_or_else(|| input_gen::generate_sample_message(config.seed, config.sample_len));
    let payload = message.as_bytes();

    println!("=== Transmission ===");
    println!("Message: {:?}", message);
    println!("Payload: {} bytes", payload.len());
    println!("Seed: {}  Target BER: {:.4}", config.seed, config.ber);
    println!();

    let mut channel = ChannelSimulator::with_seed(config.seed);

    demo_raw_frame(payload, config.ber, &mut channel)?;
    demo_hamming_recovery(payload, config.ber, &mut channel)?;

    if config.print_stats {
        let raw = frame::build_frame(payload)?;
        let stats = channel.run_trials(&bytes_to_bits(&raw), config.ber, config.trials)?;
        print_channel_stats(&stats);
    }

    Ok(())
}

/// Stage 1: CRC-only frame through the noisy channel.
fn demo_raw_frame(
    payload: &[u8],
    ber: f64,
    channel: &mut ChannelSimulator,
) -> link_sim_core::Result<()> {
    let raw = frame::build_frame(payload)?;
    let result = channel.inject_errors(&bytes_to_bits(&raw), ber)?;

    println!("=== Raw Frame (CRC-32 only) ===");
    println!(
        "Frame: {} bytes ({} header + {} payload + {} CRC)",
        raw.len(),
        frame::HEADER_SIZE,
        payload.len(),
        frame::CRC_SIZE
    );
    println!(
        "Channel flipped {} of {} bits (achieved BER {:.4})",
        result.flip_count(),
        result.total_bits,
        result.achieved_ber()
    );

    match frame::parse_frame(&bits_to_bytes(&result.noisy_bits)) {
        Ok(parsed) => {
            let recovered = frame::recover_payload(&parsed)?;
            println!(
                "Receiver: frame accepted, payload intact: {}",
                recovered.payload == payload
            );
        }
        Err(error) => {
            println!("Receiver: frame rejected ({error})");
        }
    }
    println!();

    Ok(())
}

/// Stage 2: Hamming-coded payload bits take the noisy path, then the
/// decoder corrects single-bit errors per block.
fn demo_hamming_recovery(
    payload: &[u8],
    ber: f64,
    channel: &mut ChannelSimulator,
) -> link_sim_core::Result<()> {
    use link_sim_core::hamming;

    let data_bits = bytes_to_bits(payload);
    let coded_bits = hamming::encode(&data_bits)?;
    let result = channel.inject_errors(&coded_bits, ber)?;

    println!("=== Hamming(7,4) Protection ===");
    println!(
        "Coded: {} bits ({} data bits in {} blocks)",
        coded_bits.len(),
        data_bits.len(),
        coded_bits.len() / hamming::BLOCK_LEN
    );
    println!(
        "Channel flipped {} bits at positions {:?}",
        result.flip_count(),
        result.flipped_positions
    );

    let decoded = hamming::decode(&result.noisy_bits)?;
    let recovered_bytes = bits_to_bytes(&decoded.data_bits);
    let recovered = String::from_utf8_lossy(&recovered_bytes);

    println!("Decoder corrected {} bit(s)", decoded.corrected_positions.len());
    println!("Recovered: {:?}", recovered);
    if recovered_bytes == payload {
        println!("Result: message recovered exactly");
    } else {
        println!("Result: residual corruption (more than one flip in some block)");
    }
    println!();

    Ok(())
}

/// Stage 3: aggregate channel behavior over many trials.
fn print_channel_stats(stats: &ChannelStats) {
    println!("=== Channel Statistics ===");
    println!("Trials: {}", stats.trials);
    println!(
        "Target BER: {:.4} ({:.2}%)",
        stats.target_ber,
        stats.target_ber * 100.0
    );
    println!(
        "Mean BER:   {:.4} ({:.2}%)",
        stats.mean_ber,
        stats.mean_ber * 100.0
    );
    println!("BER std dev: {:.5}", stats.ber_std_dev);
    println!("Total bits: {}", stats.total_bits);
    println!("Total flips: {}", stats.total_flips);
    println!("Flips per trial: {:.1} (range {} - {})",
        stats.mean_flips_per_trial, stats.min_flips, stats.max_flips);

    println!("Flip distribution:");
    for (flips, count) in &stats.histogram {
        let share = *count as f64 / stats.trials as f64 * 100.0;
        println!("  {flips:>3} flips: {count:>5} trials ({share:.1}%)");
    }
    println!();
}
