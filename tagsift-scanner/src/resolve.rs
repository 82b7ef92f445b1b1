use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::ExtractionRules;

// `##name##` template token. An optional `utag_` prefix is part of the token
// spelling, not of the variable name it refers to.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"##[A-Za-z0-9_]+##").expect("placeholder pattern"));

/// Look up the value assigned to `name` elsewhere in the document.
///
/// Returns the first textual occurrence only; utag files declare variables
/// before use, so later reassignments are ignored.
pub fn resolve_value(document: &str, name: &str, rules: &ExtractionRules) -> Option<String> {
    rules
        .value_regex(name)
        .captures(document)
        .map(|caps| caps[1].to_string())
}

/// Replace every `##name##` token in `candidate` with the value assigned to
/// `name` in `document`, leaving tokens without a matching assignment
/// verbatim.
///
/// Tokens are scanned left-to-right against the working string. Scanning
/// resumes after each substituted value, so a value that itself contains
/// token syntax is never re-expanded.
pub fn substitute_placeholders(document: &str, candidate: &str, rules: &ExtractionRules) -> String {
    let mut url = candidate.to_string();
    let mut pos = 0;

    while pos < url.len() {
        let Some(token) = PLACEHOLDER_RE.find_at(&url, pos) else {
            break;
        };
        let (start, end) = (token.start(), token.end());

        let name = url[start + 2..end - 2].to_string();
        let name = name.strip_prefix("utag_").unwrap_or(&name);

        match resolve_value(document, name, rules) {
            Some(value) => {
                url.replace_range(start..end, &value);
                pos = start + value.len();
            }
            None => pos = end,
        }
    }

    url
}
