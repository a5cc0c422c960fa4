//! Parsing of `[kind key]` sections and their `name = value` lines.
use crate::error::{ParseError, SchemaError};

/// A single `name = value` line of an entry.
///
/// Values may be empty and names may repeat within an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterPair {
    name: String,
    value: String,
}

impl ParameterPair {
    /// Create a new pair.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parameter name (left of the first `=`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter value (right of the first `=`), possibly empty.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One parsed `[kind key]` section with its parameters in file order.
///
/// # Examples
///
/// ```
/// use quicklinks::config::entry::parse_entries;
///
/// let entries = parse_entries("[prog backup]\nexe = /bin/echo\narg = hi\n").unwrap();
/// assert_eq!(entries[0].kind(), "prog");
/// assert_eq!(entries[0].key(), "backup");
/// assert_eq!(entries[0].values("arg"), ["hi"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: String,
    key: String,
    parameters: Vec<ParameterPair>,
}

impl Entry {
    /// Create an entry from already-parsed parts.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        key: impl Into<String>,
        parameters: Vec<ParameterPair>,
    ) -> Self {
        Self {
            kind: kind.into(),
            key: key.into(),
            parameters,
        }
    }

    /// Kind tag selecting the builder (e.g. `"rsync"`).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// User-facing key of the entry.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// All parameters in file order, duplicates included.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterPair] {
        &self.parameters
    }

    /// Whether at least one parameter has this name.
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p.name == name)
    }

    /// First value for `name`, or `""` when the parameter is absent.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map_or("", |p| p.value.as_str())
    }

    /// Every non-empty value for `name`, in file order.
    ///
    /// Empty values are skipped so that `flag =` never yields an empty
    /// command-line token.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| p.name == name && !p.value.is_empty())
            .map(|p| p.value.as_str())
            .collect()
    }

    /// Check the entry against a kind's parameter schema.
    ///
    /// Mandatory names are checked first, then every present name must be
    /// either mandatory or optional. When both rules are broken the
    /// missing parameter is reported.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingParameter`] for the first absent
    /// mandatory name, or [`SchemaError::UnexpectedParameter`] for the first
    /// unknown name in file order.
    pub fn check_params(&self, mandatory: &[&str], optional: &[&str]) -> Result<(), SchemaError> {
        if let Some(missing) = mandatory.iter().find(|name| !self.has_parameter(name)) {
            return Err(SchemaError::MissingParameter {
                kind: self.kind.clone(),
                name: (*missing).to_string(),
            });
        }

        if let Some(extra) = self
            .parameters
            .iter()
            .find(|p| !mandatory.contains(&p.name()) && !optional.contains(&p.name()))
        {
            return Err(SchemaError::UnexpectedParameter {
                kind: self.kind.clone(),
                name: extra.name.clone(),
            });
        }

        Ok(())
    }
}

/// Parse the configuration DSL into entries.
///
/// Format:
/// ```text
/// [rsync photos]
/// src = /home/me/photos
/// dst = nas:/backup
/// # comment
/// ```
///
/// Single forward pass; the first malformed line aborts parsing.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the line number and raw text of the
/// first malformed line.
pub fn parse_entries(content: &str) -> Result<Vec<Entry>, ParseError> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        let line_no = line_num + 1;

        if let Some(inner) = section_inner(trimmed) {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            current = Some(parse_header(inner, line_no, line)?);
        } else if trimmed.starts_with('#') || trimmed.is_empty() {
            continue;
        } else if let Some((name, value)) = trimmed.split_once('=') {
            let Some(entry) = current.as_mut() else {
                return Err(ParseError::NoEntryOpen {
                    line: line_no,
                    text: line.to_string(),
                });
            };
            entry
                .parameters
                .push(ParameterPair::new(name.trim(), value.trim()));
        } else {
            return Err(ParseError::Unrecognized {
                line: line_no,
                text: line.to_string(),
            });
        }
    }

    if let Some(entry) = current {
        entries.push(entry);
    }

    Ok(entries)
}

/// Return the trimmed text between `[` and `]`, if the line is a header.
fn section_inner(line: &str) -> Option<&str> {
    Some(line.strip_prefix('[')?.strip_suffix(']')?.trim())
}

/// Split header content on its first space into kind and key.
fn parse_header(inner: &str, line: usize, text: &str) -> Result<Entry, ParseError> {
    let Some((kind, key)) = inner.split_once(' ') else {
        return Err(ParseError::MissingKey {
            header: inner.to_string(),
            line,
            text: text.to_string(),
        });
    };

    let kind = kind.trim();
    let key = key.trim();
    if key.contains(' ') {
        return Err(ParseError::KeyContainsSpace {
            key: key.to_string(),
            line,
            text: text.to_string(),
        });
    }
    if kind.is_empty() {
        return Err(ParseError::MissingKind {
            line,
            text: text.to_string(),
        });
    }

    Ok(Entry::new(kind, key, Vec::new()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_header_without_parameters() {
        let entries = parse_entries("[unison docs]\n").expect("header should parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind(), "unison");
        assert_eq!(entries[0].key(), "docs");
        assert!(entries[0].parameters().is_empty());
    }

    #[test]
    fn parse_header_trims_inner_whitespace() {
        let entries = parse_entries("  [  prog   backup  ]  \n").expect("header should parse");
        assert_eq!(entries[0].kind(), "prog");
        assert_eq!(entries[0].key(), "backup");
    }

    #[test]
    fn parse_parameters_preserve_order_and_duplicates() {
        let content = "[prog backup]\nexe = /bin/echo\narg = hello\narg = world\n";
        let entries = parse_entries(content).expect("entry should parse");
        let names: Vec<&str> = entries[0].parameters().iter().map(ParameterPair::name).collect();
        assert_eq!(names, ["exe", "arg", "arg"]);
        assert_eq!(entries[0].values("arg"), ["hello", "world"]);
    }

    #[test]
    fn parse_splits_on_first_equals() {
        let entries = parse_entries("[prog x]\narg = --opt=value\n").expect("entry should parse");
        assert_eq!(entries[0].value("arg"), "--opt=value");
    }

    #[test]
    fn parse_keeps_empty_values() {
        let entries = parse_entries("[rsync x]\nsrcPrefix =\n").expect("entry should parse");
        assert!(entries[0].has_parameter("srcPrefix"));
        assert_eq!(entries[0].value("srcPrefix"), "");
    }

    #[test]
    fn parse_parameters_attach_to_latest_entry() {
        let content = "[prog a]\nexe = /bin/true\n\n[unison b]\nprofile = home\n";
        let entries = parse_entries(content).expect("entries should parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].parameters().len(), 1);
        assert_eq!(entries[1].value("profile"), "home");
    }

    #[test]
    fn parse_comments_and_blank_lines_ignored() {
        let content = "# leading comment\n\n[prog a]\n   # indented comment\nexe = /bin/true\n\n";
        let entries = parse_entries(content).expect("entries should parse");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].parameters().len(), 1);
    }

    #[test]
    fn parse_empty_input_yields_no_entries() {
        assert!(parse_entries("").expect("empty input should parse").is_empty());
    }

    #[test]
    fn parse_parameter_before_header_fails() {
        let err = parse_entries("exe = /bin/true\n[prog a]\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::NoEntryOpen {
                line: 1,
                text: "exe = /bin/true".to_string(),
            }
        );
    }

    #[test]
    fn parse_header_without_key_fails() {
        let err = parse_entries("[prog]\n").unwrap_err();
        assert!(
            matches!(err, ParseError::MissingKey { ref header, line: 1, .. } if header == "prog"),
            "got {err:?}"
        );
    }

    #[test]
    fn parse_key_with_space_fails() {
        let err = parse_entries("[prog my backup]\n").unwrap_err();
        assert!(
            matches!(err, ParseError::KeyContainsSpace { ref key, .. } if key == "my backup"),
            "got {err:?}"
        );
    }

    #[test]
    fn parse_unrecognized_line_fails_with_raw_text() {
        let err = parse_entries("[prog a]\n  just words  \n").unwrap_err();
        assert_eq!(
            err,
            ParseError::Unrecognized {
                line: 2,
                text: "  just words  ".to_string(),
            }
        );
    }

    #[test]
    fn value_of_absent_parameter_is_empty() {
        let entry = Entry::new("prog", "a", vec![]);
        assert_eq!(entry.value("exe"), "");
        assert!(entry.values("arg").is_empty());
    }

    #[test]
    fn values_skip_empty_entries() {
        let entry = Entry::new(
            "rsync",
            "a",
            vec![
                ParameterPair::new("flag", "-a"),
                ParameterPair::new("flag", ""),
                ParameterPair::new("flag", "-v"),
            ],
        );
        assert_eq!(entry.values("flag"), ["-a", "-v"]);
    }

    #[test]
    fn check_params_accepts_valid_entry() {
        let entry = Entry::new(
            "prog",
            "a",
            vec![ParameterPair::new("exe", "/bin/true"), ParameterPair::new("arg", "x")],
        );
        assert!(entry.check_params(&["exe"], &["arg"]).is_ok());
        // idempotent
        assert!(entry.check_params(&["exe"], &["arg"]).is_ok());
    }

    #[test]
    fn check_params_reports_missing_mandatory() {
        let entry = Entry::new("rsync", "a", vec![ParameterPair::new("src", "/x")]);
        assert_eq!(
            entry.check_params(&["src", "dst"], &[]),
            Err(SchemaError::MissingParameter {
                kind: "rsync".to_string(),
                name: "dst".to_string(),
            })
        );
    }

    #[test]
    fn check_params_reports_unexpected() {
        let entry = Entry::new(
            "unison",
            "a",
            vec![ParameterPair::new("profile", "p"), ParameterPair::new("arg", "x")],
        );
        assert_eq!(
            entry.check_params(&["profile"], &[]),
            Err(SchemaError::UnexpectedParameter {
                kind: "unison".to_string(),
                name: "arg".to_string(),
            })
        );
    }

    #[test]
    fn check_params_missing_wins_over_unexpected() {
        let entry = Entry::new("unison", "a", vec![ParameterPair::new("bogus", "x")]);
        assert!(matches!(
            entry.check_params(&["profile"], &[]),
            Err(SchemaError::MissingParameter { .. })
        ));
    }
}
