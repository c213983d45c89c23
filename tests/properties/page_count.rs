//! Property tests for the page counter.

use proptest::prelude::*;

use texview::infrastructure::pdf::count_pages;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Never panics and never reports zero pages.
    #[test]
    fn property_at_least_one_page(
        content in proptest::collection::vec(any::<u8>(), 0..1024),
    ) {
        prop_assert!(count_pages(&content) >= 1);
    }

    /// PROPERTY: Each page object is counted, `/Pages` nodes are not.
    #[test]
    fn property_counts_page_objects(pages in 1usize..40) {
        let mut doc = String::from("%PDF-1.4\n1 0 obj << /Type /Pages /Count 0 >> endobj\n");
        for i in 0..pages {
            doc.push_str(&format!("{} 0 obj << /Type /Page >> endobj\n", i + 2));
        }
        prop_assert_eq!(count_pages(doc.as_bytes()), pages);
    }
}
