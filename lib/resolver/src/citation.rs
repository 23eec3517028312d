use crate::graph::{serialize_graph, GraphFormat};
use crate::ProviderError;
use oc_gateway_model::CitationFormat;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Literal, NamedNode, NamedNodeRef, Triple};
use serde::Serialize;
use serde_json::json;

const CITO: &str = "http://purl.org/spar/cito/";
const DOI_RESOLVER: &str = "https://doi.org/";
const CC0_LICENSE: &str = "https://creativecommons.org/publicdomain/zero/1.0/legalcode";

/// A single citation between two bibliographic entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    /// The IRI of the citation itself.
    pub iri: String,
    /// The identifier, including the `oci:` prefix.
    pub oci: String,
    pub citing: String,
    pub cited: String,
    /// Creation date of the citing entity (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub creation: Option<String>,
    /// Time between the publication of the cited and the citing entity, as an `xsd:duration`.
    pub timespan: Option<String>,
    pub journal_sc: bool,
    pub author_sc: bool,
}

#[derive(Serialize)]
struct CitationRecord<'a> {
    oci: &'a str,
    citing: &'a str,
    cited: &'a str,
    creation: &'a str,
    timespan: &'a str,
    journal_sc: &'a str,
    author_sc: &'a str,
}

impl Citation {
    /// Serializes the citation in `format`. `context` is referenced by JSON-LD documents.
    pub fn serialize(
        &self,
        format: CitationFormat,
        context: Option<&str>,
    ) -> Result<Vec<u8>, ProviderError> {
        match format {
            CitationFormat::Csv => self.to_csv(),
            CitationFormat::Json => to_json(&json!([self.record()])),
            CitationFormat::Scholix => to_json(&json!([self.scholix()])),
            CitationFormat::JsonLd => self.to_graph(GraphFormat::JsonLd, context),
            CitationFormat::Turtle => self.to_graph(GraphFormat::Turtle, context),
            CitationFormat::NTriples => self.to_graph(GraphFormat::NTriples, context),
            CitationFormat::RdfXml => self.to_graph(GraphFormat::RdfXml, context),
        }
    }

    fn record(&self) -> CitationRecord<'_> {
        CitationRecord {
            oci: &self.oci,
            citing: &self.citing,
            cited: &self.cited,
            creation: self.creation.as_deref().unwrap_or_default(),
            timespan: self.timespan.as_deref().unwrap_or_default(),
            journal_sc: yes_no(self.journal_sc),
            author_sc: yes_no(self.author_sc),
        }
    }

    fn to_csv(&self) -> Result<Vec<u8>, ProviderError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .serialize(self.record())
            .map_err(|error| ProviderError::Serialization(error.to_string()))?;
        writer
            .into_inner()
            .map_err(|error| ProviderError::Serialization(error.to_string()))
    }

    fn scholix(&self) -> serde_json::Value {
        json!({
            "LinkPublicationDate": self.creation,
            "LinkProvider": [{ "Name": "OpenCitations" }],
            "RelationshipType": { "Name": "References" },
            "LicenseURL": CC0_LICENSE,
            "Source": scholix_object(&self.citing),
            "Target": scholix_object(&self.cited),
        })
    }

    /// The citation as RDF, described with the CiTO vocabulary.
    pub fn triples(&self) -> Result<Vec<Triple>, ProviderError> {
        let subject = named_node(&self.iri)?;
        let mut triples = vec![
            Triple::new(subject.clone(), rdf::TYPE, cito("Citation")?),
            Triple::new(
                subject.clone(),
                cito("hasCitingEntity")?,
                named_node(&self.citing)?,
            ),
            Triple::new(
                subject.clone(),
                cito("hasCitedEntity")?,
                named_node(&self.cited)?,
            ),
        ];
        if let Some(creation) = &self.creation {
            triples.push(Triple::new(
                subject.clone(),
                cito("hasCitationCreationDate")?,
                Literal::new_typed_literal(creation, date_datatype(creation)),
            ));
        }
        if let Some(timespan) = &self.timespan {
            triples.push(Triple::new(
                subject.clone(),
                cito("hasCitationTimeSpan")?,
                Literal::new_typed_literal(timespan, xsd::DURATION),
            ));
        }
        if self.journal_sc {
            triples.push(Triple::new(
                subject.clone(),
                rdf::TYPE,
                cito("JournalSelfCitation")?,
            ));
        }
        if self.author_sc {
            triples.push(Triple::new(subject, rdf::TYPE, cito("AuthorSelfCitation")?));
        }
        Ok(triples)
    }

    fn to_graph(
        &self,
        format: GraphFormat,
        context: Option<&str>,
    ) -> Result<Vec<u8>, ProviderError> {
        serialize_graph(&self.triples()?, format, context)
            .map_err(|error| ProviderError::Serialization(error.to_string()))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn to_json(value: &serde_json::Value) -> Result<Vec<u8>, ProviderError> {
    serde_json::to_vec_pretty(value).map_err(|error| ProviderError::Serialization(error.to_string()))
}

fn scholix_object(entity: &str) -> serde_json::Value {
    let (id, scheme) = match entity.strip_prefix(DOI_RESOLVER) {
        Some(doi) => (doi, "doi"),
        None => (entity, "url"),
    };
    json!({
        "Identifier": { "ID": id, "IDScheme": scheme },
        "Type": { "Name": "literature" },
    })
}

fn date_datatype(date: &str) -> NamedNodeRef<'static> {
    match date.len() {
        4 => xsd::G_YEAR,
        7 => xsd::G_YEAR_MONTH,
        _ => xsd::DATE,
    }
}

fn named_node(iri: &str) -> Result<NamedNode, ProviderError> {
    NamedNode::new(iri).map_err(|_| ProviderError::InvalidIdentifier(iri.to_owned()))
}

fn cito(local_name: &str) -> Result<NamedNode, ProviderError> {
    named_node(&format!("{CITO}{local_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation() -> Citation {
        Citation {
            iri: "https://w3id.org/oc/index/ci/0610-0620".to_owned(),
            oci: "oci:0610-0620".to_owned(),
            citing: "https://doi.org/10.1/citing".to_owned(),
            cited: "https://doi.org/10.1/cited".to_owned(),
            creation: Some("2020-03".to_owned()),
            timespan: Some("P1Y2M".to_owned()),
            journal_sc: true,
            author_sc: false,
        }
    }

    #[test]
    fn csv_has_header_and_flags() {
        let body = citation().serialize(CitationFormat::Csv, None).unwrap();
        let body = String::from_utf8(body).unwrap();
        let mut lines = body.lines();
        assert_eq!(
            lines.next(),
            Some("oci,citing,cited,creation,timespan,journal_sc,author_sc")
        );
        assert_eq!(
            lines.next(),
            Some("oci:0610-0620,https://doi.org/10.1/citing,https://doi.org/10.1/cited,2020-03,P1Y2M,yes,no")
        );
    }

    #[test]
    fn json_is_an_array_of_records() {
        let body = citation().serialize(CitationFormat::Json, None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value[0]["oci"], "oci:0610-0620");
        assert_eq!(value[0]["journal_sc"], "yes");
    }

    #[test]
    fn scholix_uses_doi_scheme() {
        let body = citation().serialize(CitationFormat::Scholix, None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value[0]["Source"]["Identifier"]["ID"], "10.1/citing");
        assert_eq!(value[0]["Source"]["Identifier"]["IDScheme"], "doi");
        assert_eq!(value[0]["RelationshipType"]["Name"], "References");
    }

    #[test]
    fn triples_describe_the_citation() {
        let triples = citation().triples().unwrap();
        assert_eq!(triples.len(), 6);
        let ntriples = String::from_utf8(
            citation()
                .serialize(CitationFormat::NTriples, None)
                .unwrap(),
        )
        .unwrap();
        assert!(ntriples.contains("\"2020-03\"^^<http://www.w3.org/2001/XMLSchema#gYearMonth>"));
        assert!(ntriples.contains("<http://purl.org/spar/cito/JournalSelfCitation>"));
        assert!(!ntriples.contains("AuthorSelfCitation"));
    }

    #[test]
    fn invalid_iri_is_rejected() {
        let mut citation = citation();
        citation.citing = "not an iri".to_owned();
        assert!(matches!(
            citation.triples(),
            Err(ProviderError::InvalidIdentifier(_))
        ));
    }
}
