use regex::Regex;

/// Assignment keys and separators recognized when scanning utag file text.
///
/// Utag files are free-form JavaScript, not a format with a grammar, so the
/// scan is a best-effort key/value extraction. A new vendor spelling is a
/// new alias here, not a new code path.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    key_aliases: Vec<String>,
    separators: Vec<char>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            key_aliases: vec![
                "base_url".to_string(),
                "base-url".to_string(),
                "src".to_string(),
            ],
            separators: vec!['=', ':'],
        }
    }
}

impl ExtractionRules {
    pub fn with_key_alias(mut self, alias: impl Into<String>) -> Self {
        self.key_aliases.push(alias.into());
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separators.push(separator);
        self
    }

    fn separator_class(&self) -> String {
        let mut class = String::from("[");
        for c in &self.separators {
            if c.is_ascii_punctuation() {
                class.push('\\');
            }
            class.push(*c);
        }
        class.push(']');
        class
    }

    /// Pattern matching one `key = "value"` / `key: 'value'` assignment for
    /// any recognized key alias, with optional quotes around the key.
    /// Capture 1 is the key, capture 2 the quoted value.
    pub(crate) fn assignment_regex(&self) -> Regex {
        let keys = self
            .key_aliases
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r#"['"]?({keys})['"]?\s*{seps}\s*['"]([^'"\s]+)['"]"#,
            seps = self.separator_class()
        );
        Regex::new(&pattern).expect("assignment pattern is built from escaped literals")
    }

    /// Pattern matching an assignment of the literal `name` to a quoted
    /// string. Capture 1 is the value.
    pub(crate) fn value_regex(&self, name: &str) -> Regex {
        let pattern = format!(
            r#"['"]?{name}['"]?\s*{seps}\s*['"]([^'"]+)['"]"#,
            name = regex::escape(name),
            seps = self.separator_class()
        );
        Regex::new(&pattern).expect("value pattern is built from escaped literals")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_match_all_key_aliases() {
        let re = ExtractionRules::default().assignment_regex();
        for doc in [
            r#"base_url = "https://a/b""#,
            r#"base-url: "https://a/b""#,
            r#""src": "https://a/b""#,
        ] {
            assert!(re.is_match(doc), "expected match for {doc}");
        }
    }

    #[test]
    fn unknown_keys_do_not_match() {
        let re = ExtractionRules::default().assignment_regex();
        assert!(!re.is_match(r#"href = "https://a/b""#));
    }

    #[test]
    fn custom_alias_extends_the_rule_list() {
        let rules = ExtractionRules::default().with_key_alias("script_src");
        let re = rules.assignment_regex();
        assert!(re.is_match(r#"script_src = "https://a/b""#));
    }

    #[test]
    fn value_regex_escapes_the_variable_name() {
        let rules = ExtractionRules::default();
        // A name with regex metacharacters must be treated literally.
        let re = rules.value_regex("a.b");
        assert!(re.is_match(r#"a.b = "v""#));
        assert!(!re.is_match(r#"axb = "v""#));
    }
}
