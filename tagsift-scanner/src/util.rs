use once_cell::sync::Lazy;
use regex::Regex;

/// Grouping key used when a utag file URL carries no numeric tag id.
pub const FALLBACK_TAG: &str = "utag";

static TAG_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"utag\.(\d+)").expect("tag id pattern"));

// Absolute HTTP(S), at least two characters after the scheme, no embedded
// whitespace. The first post-scheme character excludes `#`, so a candidate
// whose host position holds a placeholder token is rejected; placeholders in
// the path pass through untouched.
static ABSOLUTE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/$.?#]\S+$").expect("absolute url pattern"));

/// Extract the tag identifier from a utag file URL.
///
/// `https://tags.example.com/x/utag.111.js` yields `"111"`; URLs without a
/// numeric suffix (e.g. the root `utag.js`) yield [`FALLBACK_TAG`].
pub fn tag_id(url: &str) -> String {
    TAG_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| FALLBACK_TAG.to_string())
}

/// Syntactic check for an absolute HTTP(S) URL.
pub fn is_valid_url(candidate: &str) -> bool {
    ABSOLUTE_URL_RE.is_match(candidate)
}

/// Rewrite a protocol-relative `//host/path` value to `https://host/path`.
/// Anything else passes through unchanged.
pub fn normalize_protocol_relative(value: &str) -> String {
    if value.starts_with("//") {
        format!("https:{value}")
    } else {
        value.to_string()
    }
}
