/// Body of a successful resolution together with how it has to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    pub body: Vec<u8>,
    pub media_type: String,
    /// Whether the response must allow cross-origin access.
    pub cors: bool,
    /// A human-readable label for the represented resource, if one was derived.
    pub label: Option<String>,
}

impl Representation {
    pub fn new(body: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            media_type: media_type.into(),
            cors: false,
            label: None,
        }
    }

    #[must_use]
    pub fn with_cors(mut self) -> Self {
        self.cors = true;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The single output contract of the query classifier and of the identifier resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Content(Representation),
    Redirect(String),
    NotFound,
    Forbidden(String),
    BadRequest(String),
    UpstreamError {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
}

impl ResolutionOutcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect(location.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<Representation> for ResolutionOutcome {
    fn from(value: Representation) -> Self {
        Self::Content(value)
    }
}
