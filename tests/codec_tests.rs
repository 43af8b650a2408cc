//! Tests for the codec abstraction
//!
//! These tests verify:
//! - Compress/decompress identity for all three codecs
//! - Logical size enforcement on decompression
//! - Null-byte scanner boundary behavior

use colstore::codec::{find_null, Codec};

const ALL_CODECS: [Codec; 3] = [Codec::Lz4, Codec::Snappy, Codec::Zstd];

/// Deterministic pseudo-random bytes, poorly compressible
fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xff) as u8
        })
        .collect()
}

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_empty() {
    for codec in ALL_CODECS {
        let compressed = codec.compress(&[]).unwrap();
        let out = codec.decompress(&compressed, 0).unwrap();
        assert!(out.is_empty(), "{} empty round trip", codec);
    }
}

#[test]
fn test_round_trip_all_null() {
    let input = vec![0u8; 4096];
    for codec in ALL_CODECS {
        let compressed = codec.compress(&input).unwrap();
        let out = codec.decompress(&compressed, input.len() as u64).unwrap();
        assert_eq!(out, input, "{} all-null round trip", codec);
    }
}

#[test]
fn test_round_trip_no_null() {
    let input: Vec<u8> = (0..4096).map(|i| (i % 255 + 1) as u8).collect();
    for codec in ALL_CODECS {
        let compressed = codec.compress(&input).unwrap();
        let out = codec.decompress(&compressed, input.len() as u64).unwrap();
        assert_eq!(out, input, "{} no-null round trip", codec);
    }
}

#[test]
fn test_round_trip_large_incompressible() {
    let input = noise(2 * 1024 * 1024);
    for codec in ALL_CODECS {
        let compressed = codec.compress(&input).unwrap();
        let out = codec.decompress(&compressed, input.len() as u64).unwrap();
        assert_eq!(out.len() as u64, input.len() as u64);
        assert_eq!(out, input, "{} large round trip", codec);
    }
}

#[test]
fn test_decompress_rejects_wrong_logical_size() {
    let input = b"the quick brown fox jumps over the lazy dog".repeat(32);
    for codec in ALL_CODECS {
        let compressed = codec.compress(&input).unwrap();
        let wrong = input.len() as u64 + 1;
        assert!(
            codec.decompress(&compressed, wrong).is_err(),
            "{} accepted wrong logical size",
            codec
        );
    }
}

// =============================================================================
// Codec Selection Tests
// =============================================================================

#[test]
fn test_codec_name_parsing() {
    for codec in ALL_CODECS {
        assert_eq!(codec.name().parse::<Codec>().unwrap(), codec);
    }
    assert!("gzip".parse::<Codec>().is_err());
}

// =============================================================================
// Null-Byte Scanner Tests
// =============================================================================

#[test]
fn test_find_null_matches_naive_scan() {
    let mut buf = noise(513);
    // Plant NULs at positions that exercise both the word probe and the
    // byte fallback; noise may contain stray zeros, which is fine since
    // every position is checked against the naive scan.
    for &pos in &[0usize, 7, 8, 15, 64, 511] {
        buf[pos] = 0;
    }

    let mut from = 0;
    loop {
        let naive = buf[from..].iter().position(|&b| b == 0).map(|p| p + from);
        assert_eq!(find_null(&buf, from), naive);
        match naive {
            Some(p) => from = p + 1,
            None => break,
        }
        if from >= buf.len() {
            break;
        }
    }
}

#[test]
fn test_value_length_exact_word_multiple() {
    // 16 non-null bytes, then the delimiter
    let mut buf = vec![1u8; 16];
    buf.push(0);
    assert_eq!(find_null(&buf, 0), Some(16));
}

#[test]
fn test_adjacent_values_without_interior_nulls() {
    let buf = b"alpha\0beta\0".to_vec();
    assert_eq!(find_null(&buf, 0), Some(5));
    assert_eq!(find_null(&buf, 6), Some(10));
}

#[test]
fn test_zero_length_value_delimiters() {
    let buf = vec![0u8, 0u8];
    assert_eq!(find_null(&buf, 0), Some(0));
    assert_eq!(find_null(&buf, 1), Some(1));
}

#[test]
fn test_find_null_short_buffer() {
    assert_eq!(find_null(b"abc", 0), None);
    assert_eq!(find_null(b"ab\0", 0), Some(2));
    assert_eq!(find_null(&[], 0), None);
}
