use std::fmt::{Display, Formatter};

/// A serialization format in which citation data can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitationFormat {
    Csv,
    Json,
    Scholix,
    JsonLd,
    Turtle,
    NTriples,
    RdfXml,
}

impl CitationFormat {
    /// All supported citation formats.
    pub const ALL: [CitationFormat; 7] = [
        CitationFormat::Csv,
        CitationFormat::Json,
        CitationFormat::Scholix,
        CitationFormat::JsonLd,
        CitationFormat::Turtle,
        CitationFormat::NTriples,
        CitationFormat::RdfXml,
    ];

    /// Looks up a format by its (lower-case) extension without the leading dot.
    ///
    /// ```
    /// use oc_gateway_model::CitationFormat;
    ///
    /// assert_eq!(CitationFormat::from_extension("ttl"), Some(CitationFormat::Turtle));
    /// assert_eq!(CitationFormat::from_extension("rdf"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    /// The path extension selecting this format.
    pub fn extension(self) -> &'static str {
        match self {
            CitationFormat::Csv => "csv",
            CitationFormat::Json => "json",
            CitationFormat::Scholix => "scholix",
            CitationFormat::JsonLd => "jsonld",
            CitationFormat::Turtle => "ttl",
            CitationFormat::NTriples => "nt",
            CitationFormat::RdfXml => "xml",
        }
    }

    /// The content type with which data in this format is served.
    pub fn media_type(self) -> &'static str {
        match self {
            CitationFormat::Csv => "text/csv",
            CitationFormat::JsonLd => "application/ld+json",
            CitationFormat::Turtle => "text/turtle",
            CitationFormat::NTriples => "application/n-triples",
            CitationFormat::RdfXml => "application/rdf+xml",
            CitationFormat::Json | CitationFormat::Scholix => "application/json",
        }
    }
}

impl Display for CitationFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types() {
        let expected = [
            ("csv", "text/csv"),
            ("json", "application/json"),
            ("scholix", "application/json"),
            ("jsonld", "application/ld+json"),
            ("ttl", "text/turtle"),
            ("nt", "application/n-triples"),
            ("xml", "application/rdf+xml"),
        ];
        for (extension, media_type) in expected {
            let format = CitationFormat::from_extension(extension).unwrap();
            assert_eq!(format.media_type(), media_type);
            assert_eq!(format.to_string(), extension);
        }
    }

    #[test]
    fn unknown_extensions() {
        for extension in ["", "foo", "rdf", "html", "CSV"] {
            assert_eq!(CitationFormat::from_extension(extension), None);
        }
    }
}
