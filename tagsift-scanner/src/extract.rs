use tracing::debug;

use crate::resolve::substitute_placeholders;
use crate::rules::ExtractionRules;
use crate::util::{is_valid_url, normalize_protocol_relative};

/// Extract the script URLs a utag file would cause to load.
///
/// Values are collected in document order with duplicates retained, rewritten
/// from protocol-relative form where needed, validated as absolute HTTP(S)
/// URLs, and finally placeholder-substituted against the same document.
///
/// Validation runs before substitution on purpose: a candidate is accepted
/// only if it is already well-formed aside from any `##...##` tokens, so
/// malformed text is rejected where it occurs rather than after expansion.
pub fn extract_script_urls(document: &str, rules: &ExtractionRules) -> Vec<String> {
    let assignment = rules.assignment_regex();
    let mut urls = Vec::new();

    for caps in assignment.captures_iter(document) {
        let normalized = normalize_protocol_relative(&caps[2]);

        if !is_valid_url(&normalized) {
            // Expected for non-URL matches; filtered, not an error.
            debug!("Discarding non-URL candidate: {}", normalized);
            continue;
        }

        urls.push(substitute_placeholders(document, &normalized, rules));
    }

    urls
}
