use crate::collaborators::PageRenderer;
use async_trait::async_trait;
use oc_gateway_model::Representation;
use std::path::PathBuf;
use tracing::warn;

const OCI_INDEX_PAGE: &str = "oci.html";

/// Serves pre-rendered HTML pages from a directory.
#[derive(Debug, Clone)]
pub struct FilePageRenderer {
    html_dir: PathBuf,
}

impl FilePageRenderer {
    pub fn new(html_dir: impl Into<PathBuf>) -> Self {
        Self {
            html_dir: html_dir.into(),
        }
    }
}

#[async_trait]
impl PageRenderer for FilePageRenderer {
    async fn oci_index(&self) -> Option<Representation> {
        let path = self.html_dir.join(OCI_INDEX_PAGE);
        match tokio::fs::read(&path).await {
            Ok(body) => Some(Representation::new(body, "text/html; charset=utf-8")),
            Err(error) => {
                warn!("Could not read page '{}': {error}", path.display());
                None
            }
        }
    }
}
