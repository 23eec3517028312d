use regex::Regex;
use spargebra::Update;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Resolves relative IRIs so that they do not hide an update from the parser.
const PARSE_BASE_IRI: &str = "http://localhost/";

/// Candidate prefix names, i.e. a name directly followed by `:`.
static PREFIX_NAME: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| {
        Regex::new(r"(?:^|[^A-Za-z0-9_.\-])([A-Za-z](?:[A-Za-z0-9_.\-]*[A-Za-z0-9_\-])?)?:")
    });

/// Result of inspecting a SPARQL text for update operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryClassification {
    pub is_update: bool,
    /// The text to forward upstream. Only meaningful if `is_update` is false, in which case it is
    /// the unmodified query.
    pub sanitized_text: String,
}

/// Drops every line whose first non-whitespace character is `#`, together with blank lines.
///
/// Lines that contain a `#` somewhere else are kept verbatim.
pub fn strip_comment_lines(query: &str) -> String {
    query
        .lines()
        .filter(|line| {
            let line = line.trim_start();
            !line.is_empty() && !line.starts_with('#')
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Declares every prefix name used in `query` ahead of it.
///
/// Triplestores commonly predeclare prefixes such as `rdf:`, so an update must not escape
/// detection only because its prefixes are undeclared. Declarations in the query itself come
/// later and take precedence.
fn with_declared_prefixes(query: &str) -> String {
    let mut names = BTreeSet::from([""]);
    if let Ok(pattern) = PREFIX_NAME.as_ref() {
        names.extend(
            pattern
                .captures_iter(query)
                .map(|captures| captures.get(1).map_or("", |name| name.as_str())),
        );
    }
    let prologue = names
        .into_iter()
        .map(|name| format!("PREFIX {name}: <{PARSE_BASE_IRI}prefix/{name}#>\n"))
        .collect::<String>();
    prologue + query
}

/// Decides whether `query` is a SPARQL Update.
///
/// The text is stripped of comment lines and handed to the SPARQL Update grammar. If it parses,
/// the request is an update. Relative IRIs are resolved and undeclared prefixes are declared
/// before parsing, so only the grammar decides. Any parse failure is taken as a sign of a
/// read-only query and the unmodified text is returned for forwarding.
pub fn classify_query(query: &str) -> QueryClassification {
    let stripped = strip_comment_lines(query);
    if Update::parse(&with_declared_prefixes(&stripped), Some(PARSE_BASE_IRI)).is_ok() {
        QueryClassification {
            is_update: true,
            sanitized_text: String::new(),
        }
    } else {
        QueryClassification {
            is_update: false,
            sanitized_text: query.to_owned(),
        }
    }
}
