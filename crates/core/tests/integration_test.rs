//! Integration tests for the full link-sim pipeline.
//!
//! These tests verify end-to-end behavior: payload -> frame -> bits ->
//! channel -> bits -> parse -> recover, with verification that the
//! recovered payload matches the input.

use link_sim_core::{
    bits::{bits_to_bytes, bytes_to_bits},
    channel::ChannelSimulator,
    error::{Error, FrameError},
    frame::{self, FrameType},
    hamming,
};

/// A clean channel (rate 0) delivers a raw frame intact end to end.
#[test]
fn test_full_pipeline_no_noise() {
    let payload = b"the quick brown fox jumps over the lazy dog";

    // Step 1: Build the frame
    let raw = frame::build_frame(payload).expect("frame build failed");

    // Step 2: Transmit as bits through a zero-noise channel
    let mut channel = ChannelSimulator::with_seed(42);
    let tx_bits = bytes_to_bits(&raw);
    let result = channel.inject_errors(&tx_bits, 0.0).expect("injection failed");
    assert_eq!(result.flip_count(), 0);

    // Step 3: Receive and verify
    let rx_bytes = bits_to_bytes(&result.noisy_bits);
    let parsed = frame::parse_frame(&rx_bytes).expect("parse failed");
    assert_eq!(parsed.frame_type, FrameType::Data);

    let recovered = frame::recover_payload(&parsed).expect("recover failed");
    assert_eq!(recovered.payload, payload);
}

/// Same pipeline with Hamming protection enabled.
#[test]
fn test_full_pipeline_hamming_no_noise() {
    let payload = b"protected message";

    let raw = frame::build_frame_with_hamming(payload).expect("frame build failed");

    let mut channel = ChannelSimulator::with_seed(42);
    let tx_bits = bytes_to_bits(&raw);
    let result = channel.inject_errors(&tx_bits, 0.0).expect("injection failed");

    let rx_bytes = bits_to_bytes(&result.noisy_bits);
    let parsed = frame::parse_frame(&rx_bytes).expect("parse failed");
    assert_eq!(parsed.frame_type, FrameType::DataHamming);

    let recovered = frame::recover_payload(&parsed).expect("recover failed");
    assert_eq!(recovered.payload, payload);
    assert!(recovered.corrected_positions.is_empty());
}

/// Flipping any single bit of a built frame gets the frame rejected.
///
/// Flips inside the length field surface as Truncated/TrailingBytes
/// (the byte count no longer matches the declared length); every other
/// flip surfaces as CrcMismatch.
#[test]
fn test_any_single_bit_flip_rejects_frame() {
    let raw = frame::build_frame(&[0x0A, 0x0B]).unwrap();

    for bit_index in 0..raw.len() * 8 {
        let mut corrupted = raw.clone();
        corrupted[bit_index / 8] ^= 0x80 >> (bit_index % 8);

        let result = frame::parse_frame(&corrupted);
        let in_length_field = (8..24).contains(&bit_index);

        match result {
            Err(Error::Frame(FrameError::CrcMismatch { .. })) => {
                assert!(!in_length_field, "bit {bit_index}: unexpected CRC error")
            }
            Err(Error::Frame(FrameError::Truncated { .. }))
            | Err(Error::Frame(FrameError::TrailingBytes { .. })) => {
                assert!(in_length_field, "bit {bit_index}: unexpected length error")
            }
            other => panic!("bit {bit_index}: frame accepted or odd error: {other:?}"),
        }
    }
}

/// Hamming repairs one flipped bit per coded block across a whole payload.
#[test]
fn test_hamming_corrects_one_flip_in_every_block() {
    let payload = b"hamming stress";
    let data_bits = bytes_to_bits(payload);
    let coded = hamming::encode(&data_bits).unwrap();

    // Flip a different position in each block
    let mut corrupted = coded.clone();
    let num_blocks = coded.len() / hamming::BLOCK_LEN;
    for block in 0..num_blocks {
        corrupted[block * hamming::BLOCK_LEN + (block % hamming::BLOCK_LEN)] ^= 1;
    }

    let decoded = hamming::decode(&corrupted).unwrap();
    assert_eq!(decoded.data_bits, data_bits);
    assert_eq!(decoded.corrected_positions.len(), num_blocks);
}

/// Concrete scenario: nibble 1011 -> 0110011.
#[test]
fn test_known_nibble_encoding() {
    let coded = hamming::encode(&[1, 0, 1, 1]).unwrap();
    assert_eq!(coded, vec![0, 1, 1, 0, 0, 1, 1]);
}

/// Concrete scenario: frame for [0x0A, 0x0B] is 9 bytes with a valid CRC.
#[test]
fn test_known_frame_shape() {
    let raw = frame::build_frame(&[0x0A, 0x0B]).unwrap();

    assert_eq!(raw.len(), 9);
    assert_eq!(raw[0], 0x01);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&raw[..5]);
    let expected = hasher.finalize();
    assert_eq!(u32::from_be_bytes(raw[5..9].try_into().unwrap()), expected);
}

/// Byte/bit conversion round-trips on arbitrary byte sequences.
#[test]
fn test_bit_conversion_round_trip() {
    let cases: Vec<Vec<u8>> = vec![
        vec![],
        vec![0x00],
        vec![0xFF; 33],
        (0..=255).collect(),
        b"mixed payload \x00\x01\xFE".to_vec(),
    ];

    for bytes in cases {
        assert_eq!(bits_to_bytes(&bytes_to_bits(&bytes)), bytes);
    }
}

/// Payloads at the length-field boundary: max size builds, one more fails.
#[test]
fn test_payload_boundary() {
    assert!(frame::build_frame(&vec![0; frame::MAX_PAYLOAD]).is_ok());

    let result = frame::build_frame(&vec![0; frame::MAX_PAYLOAD + 1]);
    assert!(matches!(
        result,
        Err(Error::Frame(FrameError::PayloadTooLarge { .. }))
    ));
}

/// Same seed, same inputs, same call order -> identical channel behavior.
#[test]
fn test_channel_determinism_end_to_end() {
    let raw = frame::build_frame(b"determinism probe").unwrap();
    let tx_bits = bytes_to_bits(&raw);

    let mut sim1 = ChannelSimulator::with_seed(2024);
    let mut sim2 = ChannelSimulator::with_seed(2024);

    for _ in 0..3 {
        let r1 = sim1.inject_errors(&tx_bits, 0.02).unwrap();
        let r2 = sim2.inject_errors(&tx_bits, 0.02).unwrap();
        assert_eq!(r1.flipped_positions, r2.flipped_positions);
        assert_eq!(r1.noisy_bits, r2.noisy_bits);
    }
}

/// A noisy transmission either parses clean or is rejected — corrupt
/// payloads never leak through CRC verification.
#[test]
fn test_noisy_transmissions_never_accept_corruption() {
    let payload = b"no silent corruption";
    let raw = frame::build_frame(payload).unwrap();
    let tx_bits = bytes_to_bits(&raw);

    let mut channel = ChannelSimulator::with_seed(7);
    let mut accepted = 0;
    let mut rejected = 0;

    for _ in 0..200 {
        let result = channel.inject_errors(&tx_bits, 0.005).unwrap();
        let rx_bytes = bits_to_bytes(&result.noisy_bits);

        match frame::parse_frame(&rx_bytes) {
            Ok(parsed) => {
                // Accepted frames must be the uncorrupted ones
                assert_eq!(result.flip_count(), 0);
                assert_eq!(parsed.payload, payload);
                accepted += 1;
            }
            Err(_) => {
                assert!(result.flip_count() > 0);
                rejected += 1;
            }
        }
    }

    // With 200 trials at 0.5% BER over ~216 bits, both outcomes occur
    assert!(accepted > 0, "expected some clean transmissions");
    assert!(rejected > 0, "expected some corrupted transmissions");
}

/// Trial aggregation over real frame bits stays internally consistent.
#[test]
fn test_trial_statistics_over_frame_bits() {
    let raw = frame::build_frame_with_hamming(b"stats input").unwrap();
    let tx_bits = bytes_to_bits(&raw);

    let mut channel = ChannelSimulator::with_seed(31);
    let stats = channel.run_trials(&tx_bits, 0.01, 500).unwrap();

    assert_eq!(stats.trials, 500);
    assert_eq!(stats.total_bits, tx_bits.len() * 500);
    assert_eq!(stats.histogram.values().sum::<usize>(), 500);
    assert!(stats.min_flips <= stats.max_flips);
    assert!(stats.mean_ber >= 0.0 && stats.mean_ber <= 1.0);

    // Mean should land near the target at this sample size
    assert!((stats.mean_ber - 0.01).abs() < 0.01, "mean {}", stats.mean_ber);
}
