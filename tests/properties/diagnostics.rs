//! Property tests for compiler error extraction.

use proptest::prelude::*;

use texview::extract_error_message;

fn output_line() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => proptest::string::string_regex("[A-Za-z0-9 .:\\\\{}]{0,30}").unwrap(),
        1 => proptest::string::string_regex("! [A-Za-z .]{0,20}").unwrap(),
    ]
}

fn plain_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 .:]{0,30}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Output without a marker line yields nothing.
    #[test]
    fn property_no_marker_means_empty(
        lines in proptest::collection::vec(plain_line(), 0..=20),
    ) {
        let output = lines.join("\n");
        prop_assert_eq!(extract_error_message(&output), "");
    }

    /// PROPERTY: Every marker line of the output appears in the message.
    #[test]
    fn property_every_marker_is_reported(
        lines in proptest::collection::vec(output_line(), 0..=20),
    ) {
        let output = lines.join("\n");
        let message = extract_error_message(&output);
        for marker in lines.iter().filter(|l| l.starts_with('!')) {
            prop_assert!(message.contains(marker.as_str()), "missing {:?}", marker);
        }
    }

    /// PROPERTY: The message starts at the first marker line.
    #[test]
    fn property_message_starts_at_first_marker(
        lines in proptest::collection::vec(output_line(), 1..=20),
    ) {
        let output = lines.join("\n");
        let message = extract_error_message(&output);
        match lines.iter().find(|l| l.starts_with('!')) {
            Some(first) => prop_assert!(message.starts_with(first.as_str())),
            None => prop_assert!(message.is_empty()),
        }
    }

    /// PROPERTY: One block per marker line, each at most three lines long.
    #[test]
    fn property_block_count_matches_markers(
        lines in proptest::collection::vec(output_line(), 0..=20),
    ) {
        let output = lines.join("\n");
        let markers = lines.iter().filter(|l| l.starts_with('!')).count();
        let message = extract_error_message(&output);

        let newlines = message.matches('\n').count();
        prop_assert!(newlines <= markers * 2);
    }
}
