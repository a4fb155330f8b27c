#![no_main]

//! Fuzz target for repertoire parsing.
//!
//! Arbitrary bytes must never panic the code point parser, the document
//! deserializer, or the conversion into an in-memory repertoire.

use libfuzzer_sys::fuzz_target;
use lgrfix_domain::Repertoire;
use lgrfix_types::CodePoint;
use lgrfix_types::repertoire::RepertoireDocument;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(cp) = s.parse::<CodePoint>() {
        // Display and hex forms must parse back to the same value.
        assert_eq!(cp.to_hex().parse::<CodePoint>().ok(), Some(cp.clone()));
        assert_eq!(cp.to_string().parse::<CodePoint>().ok(), Some(cp));
    }

    if let Ok(doc) = serde_json::from_str::<RepertoireDocument>(s) {
        let _ = serde_json::to_string(&doc);
        if let Ok(rep) = Repertoire::from_document(doc.clone()) {
            let back = rep.into_document();
            assert_eq!(back.metadata, doc.metadata);
            assert_eq!(back.entries, doc.entries);
        }
    }
});
