use headers_accept::Accept;
use mediatype::names::{APPLICATION, N_TRIPLES, TEXT, TURTLE};
use mediatype::{MediaType, Name};
use oc_gateway_model::CitationFormat;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Literal, Subject, Term, Triple};
use oxrdfio::{RdfFormat, RdfSerializer};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::io;

/// The RDF serializations in which resource descriptions are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    RdfXml,
    Turtle,
    NTriples,
    JsonLd,
}

const FORMATS: [GraphFormat; 4] = [
    GraphFormat::RdfXml,
    GraphFormat::Turtle,
    GraphFormat::NTriples,
    GraphFormat::JsonLd,
];

static MEDIA_TYPES: [MediaType<'static>; 4] = [
    MediaType::new(APPLICATION, Name::new_unchecked("rdf+xml")),
    MediaType::new(TEXT, TURTLE),
    MediaType::new(APPLICATION, N_TRIPLES),
    MediaType::new(APPLICATION, Name::new_unchecked("ld+json")),
];

impl GraphFormat {
    /// Looks up a format by a path extension without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "rdf" | "xml" => Some(Self::RdfXml),
            "ttl" => Some(Self::Turtle),
            "nt" => Some(Self::NTriples),
            "json" | "jsonld" => Some(Self::JsonLd),
            _ => None,
        }
    }

    /// Picks the format preferred by `accept`.
    ///
    /// Falls back to `default` if there is no header or none of its entries can be served.
    pub fn negotiate(accept: Option<&Accept>, default: Self) -> Self {
        let Some(accept) = accept else {
            return default;
        };
        accept
            .negotiate(&MEDIA_TYPES)
            .and_then(|media_type| MEDIA_TYPES.iter().position(|m| m == media_type))
            .and_then(|position| FORMATS.get(position).copied())
            .unwrap_or(default)
    }

    pub fn media_type(self) -> &'static str {
        self.citation_format().media_type()
    }

    /// The citation-data format producing the same serialization.
    pub fn citation_format(self) -> CitationFormat {
        match self {
            GraphFormat::RdfXml => CitationFormat::RdfXml,
            GraphFormat::Turtle => CitationFormat::Turtle,
            GraphFormat::NTriples => CitationFormat::NTriples,
            GraphFormat::JsonLd => CitationFormat::JsonLd,
        }
    }
}

/// Serializes `triples` in `format`.
///
/// JSON-LD is written in expanded form, one node object per subject, referencing `context` if
/// one is given.
pub fn serialize_graph(
    triples: &[Triple],
    format: GraphFormat,
    context: Option<&str>,
) -> io::Result<Vec<u8>> {
    let rdf_format = match format {
        GraphFormat::RdfXml => RdfFormat::RdfXml,
        GraphFormat::Turtle => RdfFormat::Turtle,
        GraphFormat::NTriples => RdfFormat::NTriples,
        GraphFormat::JsonLd => return serialize_json_ld(triples, context),
    };

    let mut serializer = RdfSerializer::from_format(rdf_format).for_writer(Vec::new());
    for triple in triples {
        serializer.serialize_triple(triple)?;
    }
    serializer.finish()
}

fn serialize_json_ld(triples: &[Triple], context: Option<&str>) -> io::Result<Vec<u8>> {
    let mut nodes: BTreeMap<String, Map<String, Value>> = BTreeMap::new();
    for triple in triples {
        let id = subject_id(&triple.subject);
        let node = nodes.entry(id.clone()).or_insert_with(|| {
            let mut node = Map::new();
            node.insert("@id".to_owned(), Value::String(id));
            node
        });

        let (key, value) = match &triple.object {
            Term::NamedNode(object) if triple.predicate.as_ref() == rdf::TYPE => {
                ("@type".to_owned(), Value::String(object.as_str().to_owned()))
            }
            object => (triple.predicate.as_str().to_owned(), object_value(object)),
        };
        match node.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
            Value::Array(values) => values.push(value),
            other => *other = Value::Array(vec![other.take(), value]),
        }
    }

    let graph: Vec<Value> = nodes.into_values().map(Value::Object).collect();
    let document = match context {
        Some(context) => json!({ "@context": context, "@graph": graph }),
        None => json!({ "@graph": graph }),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

fn subject_id(subject: &Subject) -> String {
    match subject {
        Subject::NamedNode(node) => node.as_str().to_owned(),
        Subject::BlankNode(node) => format!("_:{}", node.as_str()),
    }
}

fn object_value(object: &Term) -> Value {
    match object {
        Term::NamedNode(node) => json!({ "@id": node.as_str() }),
        Term::BlankNode(node) => json!({ "@id": format!("_:{}", node.as_str()) }),
        Term::Literal(literal) => literal_value(literal),
    }
}

fn literal_value(literal: &Literal) -> Value {
    if let Some(language) = literal.language() {
        json!({ "@value": literal.value(), "@language": language })
    } else if literal.datatype() == xsd::STRING {
        json!({ "@value": literal.value() })
    } else {
        json!({ "@value": literal.value(), "@type": literal.datatype().as_str() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::NamedNode;

    fn triples() -> Vec<Triple> {
        let subject = NamedNode::new_unchecked("https://w3id.org/oc/index/ci/0610-0620");
        vec![
            Triple::new(
                subject.clone(),
                rdf::TYPE,
                NamedNode::new_unchecked("http://purl.org/spar/cito/Citation"),
            ),
            Triple::new(
                subject,
                NamedNode::new_unchecked("http://purl.org/spar/cito/hasCitationCreationDate"),
                Literal::new_typed_literal("2020-01-02", xsd::DATE),
            ),
        ]
    }

    #[test]
    fn extensions() {
        assert_eq!(GraphFormat::from_extension("rdf"), Some(GraphFormat::RdfXml));
        assert_eq!(GraphFormat::from_extension("ttl"), Some(GraphFormat::Turtle));
        assert_eq!(GraphFormat::from_extension("nt"), Some(GraphFormat::NTriples));
        assert_eq!(GraphFormat::from_extension("json"), Some(GraphFormat::JsonLd));
        assert_eq!(GraphFormat::from_extension("html"), None);
    }

    #[test]
    fn negotiate_without_header_uses_default() {
        assert_eq!(
            GraphFormat::negotiate(None, GraphFormat::Turtle),
            GraphFormat::Turtle
        );
    }

    #[test]
    fn ntriples_serialization() {
        let body = serialize_graph(&triples(), GraphFormat::NTriples, None).unwrap();
        let body = String::from_utf8(body).unwrap();
        assert!(body.contains(
            "<https://w3id.org/oc/index/ci/0610-0620> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/spar/cito/Citation> ."
        ));
        assert_eq!(body.lines().count(), 2);
    }

    #[test]
    fn json_ld_serialization() {
        let body = serialize_graph(&triples(), GraphFormat::JsonLd, Some("https://w3id.org/oc/corpus/context.json"))
            .unwrap();
        let document: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            document["@context"],
            "https://w3id.org/oc/corpus/context.json"
        );
        let node = &document["@graph"][0];
        assert_eq!(node["@id"], "https://w3id.org/oc/index/ci/0610-0620");
        assert_eq!(node["@type"][0], "http://purl.org/spar/cito/Citation");
        assert_eq!(
            node["http://purl.org/spar/cito/hasCitationCreationDate"][0]["@type"],
            "http://www.w3.org/2001/XMLSchema#date"
        );
    }
}
