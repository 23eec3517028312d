use crate::citation::Citation;
use crate::collaborators::{CitationDataProvider, ProviderError};
use async_trait::async_trait;
use oc_gateway_model::{CitationFormat, OCI_PREFIX};
use oc_gateway_sparql::{TriplestoreClient, SPARQL_RESULTS_JSON};
use oxrdf::{NamedNode, Term};
use sparesults::{
    QueryResultsFormat, QueryResultsParser, QuerySolution, ReaderQueryResultsParserOutput,
};
use tracing::debug;

/// Reads citations from the SPARQL endpoint of the index.
#[derive(Debug, Clone)]
pub struct TriplestoreCitationProvider {
    client: TriplestoreClient,
    citation_base_iri: String,
    context_path: Option<String>,
}

impl TriplestoreCitationProvider {
    /// Creates a provider that looks citations up as `<citation_base_iri><id>`.
    pub fn new(
        client: TriplestoreClient,
        citation_base_iri: impl Into<String>,
        context_path: Option<String>,
    ) -> Self {
        Self {
            client,
            citation_base_iri: citation_base_iri.into(),
            context_path,
        }
    }

    /// Fetches the citation identified by `identifier`. [None] if the index does not know it.
    pub async fn citation(&self, identifier: &str) -> Result<Option<Citation>, ProviderError> {
        let id = identifier.strip_prefix(OCI_PREFIX).unwrap_or(identifier);
        let iri = NamedNode::new(format!("{}{id}", self.citation_base_iri))
            .map_err(|_| ProviderError::InvalidIdentifier(identifier.to_owned()))?;

        debug!("Looking up {iri} at {}", self.client.endpoint());
        let response = self
            .client
            .query(&citation_query(&iri), SPARQL_RESULTS_JSON)
            .await?;
        if !response.is_ok() {
            return Err(ProviderError::Status(response.status));
        }

        let Some(solution) = first_solution(&response.body)? else {
            return Ok(None);
        };
        let (Some(citing), Some(cited)) = (solution.get("citing"), solution.get("cited")) else {
            return Ok(None);
        };
        Ok(Some(Citation {
            iri: iri.into_string(),
            oci: format!("{OCI_PREFIX}{id}"),
            citing: term_text(citing),
            cited: term_text(cited),
            creation: solution.get("creation").map(term_text),
            timespan: solution.get("timespan").map(term_text),
            journal_sc: solution.get("journal_sc").is_some_and(is_true),
            author_sc: solution.get("author_sc").is_some_and(is_true),
        }))
    }
}

#[async_trait]
impl CitationDataProvider for TriplestoreCitationProvider {
    async fn citation_data(
        &self,
        identifier: &str,
        format: CitationFormat,
    ) -> Result<Option<Vec<u8>>, ProviderError> {
        let Some(citation) = self.citation(identifier).await? else {
            return Ok(None);
        };
        citation
            .serialize(format, self.context_path.as_deref())
            .map(Some)
    }
}

fn citation_query(iri: &NamedNode) -> String {
    format!(
        "PREFIX cito: <http://purl.org/spar/cito/>
SELECT ?citing ?cited ?creation ?timespan ?journal_sc ?author_sc WHERE {{
  {iri} cito:hasCitingEntity ?citing ;
    cito:hasCitedEntity ?cited .
  OPTIONAL {{ {iri} cito:hasCitationCreationDate ?creation }}
  OPTIONAL {{ {iri} cito:hasCitationTimeSpan ?timespan }}
  BIND(EXISTS {{ {iri} a cito:JournalSelfCitation }} AS ?journal_sc)
  BIND(EXISTS {{ {iri} a cito:AuthorSelfCitation }} AS ?author_sc)
}}
LIMIT 1"
    )
}

fn first_solution(body: &[u8]) -> Result<Option<QuerySolution>, ProviderError> {
    let parser = QueryResultsParser::from_format(QueryResultsFormat::Json);
    let output = parser
        .for_reader(body)
        .map_err(|error| ProviderError::Results(error.to_string()))?;
    match output {
        ReaderQueryResultsParserOutput::Solutions(mut solutions) => solutions
            .next()
            .transpose()
            .map_err(|error| ProviderError::Results(error.to_string())),
        ReaderQueryResultsParserOutput::Boolean(_) => Err(ProviderError::Results(
            "expected solutions, got a boolean".to_owned(),
        )),
    }
}

fn term_text(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_owned(),
        Term::BlankNode(node) => node.as_str().to_owned(),
        Term::Literal(literal) => literal.value().to_owned(),
    }
}

fn is_true(term: &Term) -> bool {
    matches!(term, Term::Literal(literal) if matches!(literal.value(), "true" | "1"))
}
