//! # ECB Feed Parser
//!
//! The daily feed is a small XML document in which every rate is a single
//! self-closing element:
//!
//! ```text
//! <Cube currency="USD" rate="1.0876"/>
//! ```
//!
//! Rather than building a DOM, the parser scans the text once for that fixed
//! two-attribute pattern and records each pair in document order. The scan
//! never fails: text without a single match yields an empty mapping, and the
//! match counters on [`ParsedFeed`] let callers tell an empty feed from one
//! whose layout changed underneath us.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Currency code → rate (units of the currency per one reference currency).
pub type RateMap = BTreeMap<String, f64>;

static CUBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<Cube currency="(\w+)" rate="([0-9.]+)"/>"#).expect("static pattern compiles")
});

// Longest leading decimal, as a lenient float reader would take it: `1.2.3` reads as `1.2`.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").expect("static pattern compiles")
});

/// The outcome of one scan over a feed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFeed {
    /// Parsed rates. A currency seen more than once keeps its last value.
    pub rates: RateMap,
    /// Number of pattern hits, duplicates included.
    pub matches: usize,
    /// Hits whose numeral had no leading decimal at all (e.g. `.` or `..5`). These are skipped.
    pub rejected: usize,
}

impl ParsedFeed {
    /// True when the document had content but nothing in it looked like a rate.
    ///
    /// The scan itself treats this exactly like an empty feed; the flag only
    /// exists so the ingestor can log it.
    pub fn is_anomalous(&self, text: &str) -> bool {
        self.rates.is_empty() && !text.trim().is_empty()
    }
}

/// Scans `text` for every `<Cube currency=".." rate=".."/>` element.
pub fn parse_feed(text: &str) -> ParsedFeed {
    let mut parsed = ParsedFeed::default();

    for caps in CUBE_PATTERN.captures_iter(text) {
        parsed.matches += 1;
        let currency = &caps[1];
        match leading_decimal(&caps[2]) {
            Some(rate) => {
                // Sequential overwrite: the last occurrence of a code wins.
                parsed.rates.insert(currency.to_string(), rate);
            }
            None => parsed.rejected += 1,
        }
    }

    parsed
}

/// Reads the longest decimal prefix of `numeral`; trailing garbage is ignored.
fn leading_decimal(numeral: &str) -> Option<f64> {
    let prefix = NUMERIC_PREFIX.find(numeral)?.as_str();
    prefix.parse::<f64>().ok().filter(|rate| rate.is_finite())
}
