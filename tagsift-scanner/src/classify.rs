use std::collections::HashSet;

/// Substring that marks a network request as a tag-management configuration
/// file. Matching is case-sensitive.
const UTAG_MARKER: &str = "utag";

/// Filter the requests observed during one site visit down to the utag
/// configuration files, dropping exact duplicates.
///
/// First-seen order is retained, but callers must not rely on ordering;
/// the result is a set.
pub fn classify_requests<S: AsRef<str>>(requests: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for request in requests {
        let url = request.as_ref();
        if url.contains(UTAG_MARKER) && seen.insert(url.to_string()) {
            files.push(url.to_string());
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_utag_requests() {
        let requests = [
            "https://x.example/utag.js",
            "https://x.example/analytics.js",
            "https://x.example/img/logo.png",
            "https://tags.tiqcdn.com/utag/acct/prod/utag.12.js",
        ];
        let files = classify_requests(&requests);
        assert_eq!(
            files,
            vec![
                "https://x.example/utag.js".to_string(),
                "https://tags.tiqcdn.com/utag/acct/prod/utag.12.js".to_string(),
            ]
        );
    }

    #[test]
    fn duplicates_are_removed() {
        let requests = ["https://x/utag.111.js", "https://x/utag.111.js"];
        let files = classify_requests(&requests);
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn marker_is_case_sensitive() {
        let requests = ["https://x.example/UTAG.js"];
        assert!(classify_requests(&requests).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_set() {
        let requests: [&str; 0] = [];
        assert!(classify_requests(&requests).is_empty());
    }
}
