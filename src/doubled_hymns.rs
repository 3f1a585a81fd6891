use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::app_config::Collection;

// @module: Registry of doubled hymns per collection

// Doubled hymns are transcribed with twice the meter's nominal line count:
// each notional poetic line is split across two transcript lines. These sets
// mark the hymns where the transcription is doubled even though the meter
// notation itself carries no doubling marker.

static DOUBLED_BOOK_ONE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "7.", "8.", "9.", "12.", "28.", "34.", "35.", "37.", "46.", "52.", "60.", "61.", "62.",
        "63.", "65.", "89.", "92.", "93.", "95.", "114.", "117.", "123.", "127.",
    ])
});

static DOUBLED_BOOK_TWO: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["41.", "67.", "79."]));

static DOUBLED_BOOK_THREE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "1.", "3.", "4.", "6.", "9.", "14.", "16.", "25.", "30.", "32.", "37.", "48.", "54.",
        "66.", "75.", "86.", "89.", "97.", "98.", "101.", "102.",
    ])
});

/// Whether a hymn's stanzas are transcribed doubled in the given collection
pub fn is_doubled(collection: Collection, hymn_number: &str) -> bool {
    match collection {
        Collection::BookOne => DOUBLED_BOOK_ONE.contains(hymn_number),
        Collection::BookTwo => DOUBLED_BOOK_TWO.contains(hymn_number),
        Collection::BookThree => DOUBLED_BOOK_THREE.contains(hymn_number),
    }
}
