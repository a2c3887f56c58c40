use humanize::{
    apnumber, fractional, intcomma, intcomma_str, intcomma_with, intword, intword_with, metric,
    natural_list, naturalsize, naturalsize_str, naturalsize_with, ordinal, scientific, Clamp,
    HumanizeError, Number, SizeOptions,
};

#[test]
fn test_number_round_up() {
    assert_eq!(intcomma(0), "0");
    assert_eq!(intcomma(999), "999");
    assert_eq!(intcomma(-1_000), "-1,000");
    assert_eq!(intcomma(u64::MAX), "18,446,744,073,709,551,615");
    assert_eq!(intcomma_with(1_234_567.891, Some(1)), "1,234,567.9");
    assert_eq!(intcomma(f64::NAN), "NaN");
    assert_eq!(intcomma(f64::INFINITY), "+Inf");

    assert_eq!(intword(1_000), "1.0 thousand");
    assert_eq!(intword(3_500_000_000u64), "3.5 billion");
    assert_eq!(intword_with(3_456_789, "%.3f").unwrap(), "3.457 million");
    assert!(matches!(
        intword_with(1, "%.1f %.1f"),
        Err(HumanizeError::InvalidFormat { .. })
    ));

    assert_eq!(ordinal(21), "21st");
    assert_eq!(ordinal(112), "112th");
    assert_eq!(apnumber(7), "seven");
    assert_eq!(fractional(2.75), "2 3/4");
    assert_eq!(scientific(0.000_25), "2.50 x 10⁻⁴");
    assert_eq!(metric(0.002, "g"), "2.00 mg");
    assert_eq!(Clamp::new().ceil(100.0).format(123.0, "%.0f").unwrap(), ">100");
}

#[test]
fn test_parse_from_text() {
    assert_eq!(intcomma_str("1234567.25", Some(2)).unwrap(), "1,234,567.25");
    assert_eq!(Number::parse_localized("12,345").unwrap(), Number::Int(12_345));
    assert!(matches!(
        intcomma_str("twelve", None),
        Err(HumanizeError::InvalidInput { .. })
    ));
}

#[test]
fn test_sizes() {
    assert_eq!(naturalsize(1_500), "1.5 kB");
    assert_eq!(
        naturalsize_with(1_500, &SizeOptions::binary()).unwrap(),
        "1.5 KiB"
    );
    assert_eq!(naturalsize(10_000_000_000u64), "10.0 GB");
    assert_eq!(
        naturalsize_with(10_000_000_000u64, &SizeOptions::gnu()).unwrap(),
        "9.3G"
    );
    assert_eq!(
        naturalsize_str("2048", &SizeOptions::binary().with_format("%.2f")).unwrap(),
        "2.00 KiB"
    );
}

#[test]
fn test_1500_bytes_lands_between_one_and_two_kilo() {
    for options in [SizeOptions::default(), SizeOptions::binary()] {
        let text = naturalsize_with(1_500, &options).unwrap();
        let value: f64 = text.split(' ').next().unwrap().parse().unwrap();
        assert!((1.0..2.0).contains(&value), "{} out of range", text);
    }
}

#[test]
fn test_natural_list() {
    assert_eq!(natural_list::<String>(&[]), "");
    assert_eq!(natural_list(&["one"]), "one");
    assert_eq!(natural_list(&["one", "two"]), "one and two");
    assert_eq!(natural_list(&["one", "two", "three"]), "one, two and three");
}
