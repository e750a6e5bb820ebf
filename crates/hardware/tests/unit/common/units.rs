//! # Quantity Parsing Tests
//!
//! Covers memory size and frequency strings, their display form, and the tick conversion.

use rstest::rstest;
use simtopo_core::ConfigError;
use simtopo_core::common::units::{Frequency, MemorySize, TICKS_PER_SECOND};

#[rstest]
#[case("16KiB", 16 * 1024)]
#[case("16kB", 16 * 1024)]
#[case("256KiB", 256 * 1024)]
#[case("8GiB", 8 << 30)]
#[case("8GB", 8 << 30)]
#[case("2MiB", 2 << 20)]
#[case("1TiB", 1 << 40)]
#[case("64B", 64)]
#[case("4096", 4096)]
#[case(" 32 KiB ", 32 * 1024)]
fn size_strings(#[case] raw: &str, #[case] bytes: u64) {
    assert_eq!(MemorySize::parse(raw), Ok(MemorySize::from_bytes(bytes)));
}

#[rstest]
#[case("")]
#[case("KiB")]
#[case("16XB")]
#[case("1.5KiB")]
#[case("-4KiB")]
fn bad_size_strings(#[case] raw: &str) {
    assert!(matches!(
        MemorySize::parse(raw),
        Err(ConfigError::InvalidQuantity { .. })
    ));
}

#[test]
fn size_from_str_and_display() {
    let size: MemorySize = "256KiB".parse().unwrap();
    assert_eq!(size, MemorySize::kib(256));
    assert_eq!(size.to_string(), "256KiB");
    assert_eq!(MemorySize::gib(8).to_string(), "8GiB");
}

#[rstest]
#[case("3GHz", 3_000_000_000)]
#[case("1.5GHz", 1_500_000_000)]
#[case("800MHz", 800_000_000)]
#[case("100kHz", 100_000)]
#[case("1THz", 1_000_000_000_000)]
fn frequency_strings(#[case] raw: &str, #[case] hz: u64) {
    assert_eq!(Frequency::parse(raw), Ok(Frequency::from_hz(hz)));
}

#[rstest]
#[case("")]
#[case("fast")]
#[case("3")]
#[case("0GHz")]
#[case("3Ghz")]
fn bad_frequency_strings(#[case] raw: &str) {
    assert!(Frequency::parse(raw).is_err());
}

#[test]
fn clock_period_in_ticks() {
    assert_eq!(TICKS_PER_SECOND, 1_000_000_000_000);
    assert_eq!(Frequency::from_hz(1_000_000_000).period_ticks(), 1000);
    // 1e12 / 3e9 = 333.33..., rounded.
    assert_eq!(Frequency::parse("3GHz").unwrap().period_ticks(), 333);
}
