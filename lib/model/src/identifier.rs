use std::sync::LazyLock;

use regex::Regex;

/// The prefix under which Open Citation Identifiers are published.
pub const OCI_PREFIX: &str = "oci:";

/// Splits a token into the identifier and an optional extension made of lowercase letters.
static TOKEN_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^([^.]+)(?:\.([a-z]+))?$"));

/// Canonicalizes a user supplied identifier.
///
/// All whitespace is removed and any leading, case-insensitive `oci:` prefix is stripped. The
/// operation is idempotent: canonicalizing an already canonical identifier yields the same string.
///
/// ```
/// use oc_gateway_model::canonicalize_identifier;
///
/// assert_eq!(canonicalize_identifier(" OCI: 0210-3710 "), "0210-3710");
/// assert_eq!(canonicalize_identifier("0210-3710"), "0210-3710");
/// ```
pub fn canonicalize_identifier(raw: &str) -> String {
    let mut identifier: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    while let Some(rest) = strip_oci_prefix(&identifier) {
        identifier = rest.to_owned();
    }
    identifier
}

fn strip_oci_prefix(identifier: &str) -> Option<&str> {
    let prefix = identifier.get(..OCI_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(OCI_PREFIX) {
        identifier.get(OCI_PREFIX.len()..)
    } else {
        None
    }
}

/// An identifier-bearing path token of the form `<identifier>.<extension>`.
///
/// The token is trimmed and lower-cased before it is split. The identifier keeps every character
/// the router handed over, including a leading separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierToken {
    raw: String,
    canonical_id: String,
    extension: Option<String>,
}

impl IdentifierToken {
    /// Parses a path token. Returns [None] if the token is not of the form
    /// `<identifier>[.<extension>]`, e.g. because the identifier itself contains a dot.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        let pattern = TOKEN_PATTERN.as_ref().ok()?;
        let captures = pattern.captures(&normalized)?;
        let canonical_id = captures.get(1)?.as_str().to_owned();
        let extension = captures.get(2).map(|m| m.as_str().to_owned());
        Some(Self {
            raw: raw.to_owned(),
            canonical_id,
            extension,
        })
    }

    /// The token as it was received.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The lower-cased identifier without the extension.
    pub fn canonical_id(&self) -> &str {
        &self.canonical_id
    }

    /// The lower-cased extension without the leading dot.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Builds the `oci:` identifier used for citation-data lookups.
    ///
    /// The first character of the identifier is the separator already consumed by routing and is
    /// dropped before the remainder is canonicalized and re-prefixed.
    pub fn citation_identifier(&self) -> String {
        let mut chars = self.canonical_id.chars();
        chars.next();
        format!("{OCI_PREFIX}{}", canonicalize_identifier(chars.as_str()))
    }
}
