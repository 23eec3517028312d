use url::form_urlencoded;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const SPARQL_QUERY: &str = "application/sparql-query";

/// The HTTP method a SPARQL request arrived with. Upstream calls mirror it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Get,
    Post,
}

/// An incoming SPARQL protocol request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparqlRequest {
    /// The query string for GET requests, the decoded body for POST requests.
    pub raw_text: String,
    pub transport: Transport,
    pub content_type: Option<String>,
    pub accept: Option<String>,
}

/// How the text of a [SparqlRequest] has to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparqlPayload<'req> {
    /// Form-encoded key/value pairs that carry the query in the `query` parameter.
    QueryString(&'req str),
    /// The text is the query itself.
    Query(&'req str),
    /// POST with a content type that carries no SPARQL query.
    Unsupported,
}

impl SparqlRequest {
    pub fn get(query_string: impl Into<String>) -> Self {
        Self {
            raw_text: query_string.into(),
            transport: Transport::Get,
            content_type: None,
            accept: None,
        }
    }

    pub fn post(body: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            raw_text: body.into(),
            transport: Transport::Post,
            content_type: Some(content_type.into()),
            accept: None,
        }
    }

    #[must_use]
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Determines the payload kind from the transport and the content type.
    pub fn payload(&self) -> SparqlPayload<'_> {
        match self.transport {
            Transport::Get => SparqlPayload::QueryString(&self.raw_text),
            Transport::Post => {
                let content_type = self.content_type.as_deref().unwrap_or_default();
                if content_type.contains(FORM_URLENCODED) {
                    SparqlPayload::QueryString(&self.raw_text)
                } else if content_type.contains(SPARQL_QUERY) {
                    SparqlPayload::Query(&self.raw_text)
                } else {
                    SparqlPayload::Unsupported
                }
            }
        }
    }
}

/// The SPARQL protocol parameters of a form-encoded string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormParameters {
    /// Every non-empty value of the `query` parameter, in order.
    pub queries: Vec<String>,
    /// Whether an `update` parameter is present, whatever its value.
    pub has_update: bool,
}

impl FormParameters {
    pub fn parse(query_string: &str) -> Self {
        let mut parameters = Self::default();
        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            match key.as_ref() {
                "query" if !value.is_empty() => parameters.queries.push(value.into_owned()),
                "update" => parameters.has_update = true,
                _ => {}
            }
        }
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decodes_query() {
        let parameters =
            FormParameters::parse("query=SELECT%20*%20WHERE%20{?s%20?p%20?o}&limit=1");
        assert_eq!(parameters.queries, ["SELECT * WHERE {?s ?p ?o}"]);
        assert!(!parameters.has_update);
    }

    #[test]
    fn parse_decodes_plus_as_space() {
        let parameters = FormParameters::parse("query=ASK+{?s+?p+?o}");
        assert_eq!(parameters.queries, ["ASK {?s ?p ?o}"]);
    }

    #[test]
    fn parse_keeps_every_query_and_skips_blank_values() {
        assert_eq!(
            FormParameters::parse("query=&query=ASK{}&query=SELECT+*+{}").queries,
            ["ASK{}", "SELECT * {}"]
        );
        assert!(FormParameters::parse("query=").queries.is_empty());
        assert!(FormParameters::parse("q=ASK{}").queries.is_empty());
    }

    #[test]
    fn parse_notices_update_parameter() {
        assert!(FormParameters::parse("query=ASK{}&update=CLEAR+ALL").has_update);
        assert!(FormParameters::parse("update=").has_update);
        assert!(!FormParameters::parse("query=ASK{}&updated=1").has_update);
    }

    #[test]
    fn payload_by_content_type() {
        assert_eq!(
            SparqlRequest::get("query=x").payload(),
            SparqlPayload::QueryString("query=x")
        );
        assert_eq!(
            SparqlRequest::post("query=x", "application/x-www-form-urlencoded; charset=UTF-8")
                .payload(),
            SparqlPayload::QueryString("query=x")
        );
        assert_eq!(
            SparqlRequest::post("ASK {}", "application/sparql-query").payload(),
            SparqlPayload::Query("ASK {}")
        );
        assert_eq!(
            SparqlRequest::post("ASK {}", "text/plain").payload(),
            SparqlPayload::Unsupported
        );
    }
}
