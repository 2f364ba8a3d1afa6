use chanscope::numeric::{format_compact, format_grouped, normalize, parse_percent, parse_score};

#[test]
fn normalizes_separators_and_suffixes() {
    assert_eq!(normalize("1,234"), 1_234);
    assert_eq!(normalize("1.2K"), 1_200);
    assert_eq!(normalize("3.4M"), 3_400_000);
    assert_eq!(normalize("2B"), 2_000_000_000);
    assert_eq!(normalize("45,600,000"), 45_600_000);
    assert_eq!(normalize("342"), 342);
}

#[test]
fn suffix_is_case_insensitive_and_tolerates_markup() {
    assert_eq!(normalize("1.5k"), 1_500);
    assert_eq!(normalize("**2.3m**"), 2_300_000);
    assert_eq!(normalize("  ~1.2M subscribers. "), 1_200_000);
    assert_eq!(normalize("3 million"), 3_000_000);
    assert_eq!(normalize("1.25 billion"), 1_250_000_000);
}

#[test]
fn fractional_suffix_values_round_to_nearest() {
    assert_eq!(normalize("1.2346K"), 1_235);
    assert_eq!(normalize("0.5K"), 500);
}

#[test]
fn plain_fraction_drops_decimal_part() {
    assert_eq!(normalize("4.9"), 4);
}

#[test]
fn word_starting_with_unit_letter_is_not_a_suffix() {
    assert_eq!(normalize("5 members"), 5);
    assert_eq!(normalize("12 books"), 12);
}

#[test]
fn unparseable_input_is_zero() {
    assert_eq!(normalize(""), 0);
    assert_eq!(normalize("N/A"), 0);
    assert_eq!(normalize("Unknown"), 0);
    assert_eq!(normalize("**"), 0);
}

#[test]
fn normalize_is_idempotent_on_its_output() {
    for s in ["1,234", "1.2K", "3.4M", "2B", "0", "garbage", "7.77m", "999,999,999"] {
        let n = normalize(s);
        assert_eq!(normalize(&n.to_string()), n, "input {s}");
    }
}

#[test]
fn compact_format_reads_back_through_normalize() {
    for n in [0u64, 999, 1_200, 3_400_000, 2_000_000_000, 15_000] {
        assert_eq!(normalize(&format_compact(n)), n, "n={n}");
    }
    assert_eq!(format_compact(1_234), "1.2K");
    assert_eq!(format_compact(2_000_000_000), "2B");
}

#[test]
fn grouped_format_round_trips_exactly() {
    for n in [0u64, 7, 1_234, 45_600_000, 1_000_000_000] {
        assert_eq!(normalize(&format_grouped(n)), n);
    }
    assert_eq!(format_grouped(45_600_000), "45,600,000");
}

#[test]
fn percent_and_score_parsing() {
    assert_eq!(parse_percent("4.5%"), Some(4.5));
    assert_eq!(parse_percent("**3%**"), Some(3.0));
    assert_eq!(parse_percent("N/A"), None);
    assert_eq!(parse_score("8.5/10"), Some(8.5));
    assert_eq!(parse_score("85/100"), Some(8.5));
    assert_eq!(parse_score("7"), Some(7.0));
    assert_eq!(parse_score("N/A"), None);
}

#[test]
fn compact_format_carries_into_next_unit() {
    assert_eq!(format_compact(999_940), "999.9K");
    assert_eq!(format_compact(999_960), "1M");
    assert_eq!(format_compact(999_999), "1M");
    assert_eq!(format_compact(999_999_999), "1B");
    assert_eq!(format_compact(1_000_000), "1M");
}
