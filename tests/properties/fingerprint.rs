//! Property tests for content fingerprints.

use proptest::prelude::*;

use texview::Fingerprint;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Equal content has an equal fingerprint.
    #[test]
    fn property_equal_bytes_equal_fingerprint(
        content in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let copy = content.clone();
        prop_assert_eq!(Fingerprint::of_bytes(&content), Fingerprint::of_bytes(&copy));
    }

    /// PROPERTY: Flipping any byte changes the fingerprint.
    #[test]
    fn property_changed_byte_changes_fingerprint(
        content in proptest::collection::vec(any::<u8>(), 1..512),
        index in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let mut changed = content.clone();
        let i = index.index(changed.len());
        changed[i] ^= flip;
        prop_assert_ne!(Fingerprint::of_bytes(&content), Fingerprint::of_bytes(&changed));
    }

    /// PROPERTY: The hex form is 64 lowercase hex digits.
    #[test]
    fn property_hex_is_sha256_sized(
        content in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let hex = Fingerprint::of_bytes(&content).hex();
        prop_assert_eq!(hex.len(), 64);
        prop_assert!(hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}
