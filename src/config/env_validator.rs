//! Environment variable validation with typo suggestions
//!
//! Invalid values never abort a command: the validator prints a warning,
//! suggests the closest valid value, and falls back to the default.

use std::io::Write;

/// Validator for one enumerated environment variable
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Read the variable from the process environment.
    ///
    /// Unset → `default`; set but unparsable → warning on stderr and `default`.
    pub fn read<T, F>(&self, parser: F, default: T) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        match std::env::var(self.var_name) {
            Ok(value) => self.parse_with_writer(&value, parser, default, &mut std::io::stderr()),
            Err(_) => default,
        }
    }

    /// Parse with a custom writer for the warning (for testing)
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        if let Some(parsed) = parser(value) {
            return parsed;
        }
        let suggestion = self
            .closest(value)
            .map(|s| format!(". Did you mean '{}'?", s))
            .unwrap_or_default();
        let _ = writeln!(
            writer,
            "Warning: Invalid {} value '{}'{}",
            self.var_name, value, suggestion
        );
        let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
        default
    }

    /// Closest valid value within two edits
    fn closest(&self, value: &str) -> Option<&'a str> {
        let input = value.to_lowercase();
        self.valid_values
            .iter()
            .map(|valid| (*valid, levenshtein(&input, valid)))
            .filter(|(_, dist)| *dist > 0 && *dist <= 2)
            .min_by_key(|(_, dist)| *dist)
            .map(|(valid, _)| valid)
    }
}

/// Levenshtein edit distance over bytes
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.is_empty() {
        return b_bytes.len();
    }
    if b_bytes.is_empty() {
        return a_bytes.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_bytes.len() + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("name", "name"), 0);
        assert_eq!(levenshtein("route", "routes"), 1);
        assert_eq!(levenshtein("vars", "var"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kv_namespace", "kv_namespaces"), 1);
    }

    #[test]
    fn test_valid_value_is_parsed() {
        let validator = EnvVarValidator::new("EDGESHIP_LOG_FORMAT", &["compact", "json"]);
        let mut output = Vec::new();
        let result = validator.parse_with_writer(
            "json",
            |s| (s == "json").then_some(2),
            0,
            &mut output,
        );
        assert_eq!(result, 2);
        assert!(output.is_empty());
    }

    #[test]
    fn test_invalid_value_warns_and_suggests() {
        let validator = EnvVarValidator::new("EDGESHIP_LOG_FORMAT", &["compact", "json"]);
        let mut output = Vec::new();
        let result = validator.parse_with_writer("jsn", |_| None::<u8>, 7, &mut output);

        assert_eq!(result, 7);
        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Invalid EDGESHIP_LOG_FORMAT value 'jsn'"), "{msg}");
        assert!(msg.contains("Did you mean 'json'?"), "{msg}");
        assert!(msg.contains("Valid values: compact, json"), "{msg}");
    }

    #[test]
    fn test_no_suggestion_for_distant_value() {
        let validator = EnvVarValidator::new("EDGESHIP_LOG_FORMAT", &["compact", "json"]);
        let mut output = Vec::new();
        validator.parse_with_writer("xml-pretty-printed", |_| None::<u8>, 0, &mut output);
        let msg = String::from_utf8(output).unwrap();
        assert!(!msg.contains("Did you mean"), "{msg}");
    }
}
