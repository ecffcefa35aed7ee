//! Loading message pages from JSON

use std::path::Path;

use crate::error::DatasetError;
use crate::record::{MessagePage, RawPage};

/// Sample page captured from `/api/messages?order=desc`
const BUNDLED_PAGE: &str = include_str!("../fixtures/messages.json");

impl MessagePage {
    /// The sample page compiled into the binary
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::parse(BUNDLED_PAGE, "bundled dataset")
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Self::parse(json, "string")
    }

    /// Load a page from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(json: &str, origin: &str) -> Result<Self, DatasetError> {
        let raw: RawPage = serde_json::from_str(json).map_err(|source| DatasetError::ParseJson {
            origin: origin.to_string(),
            source,
        })?;
        let page = MessagePage::try_from(raw)?;

        tracing::debug!(origin, records = page.len(), "Message page loaded");
        Ok(page)
    }
}
