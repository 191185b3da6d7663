//! Repository index (`repodata/repomd.xml`).

use super::ns;
use super::xml::{Element, QName};
use crate::{Error, Result};

const DATA: QName<'static> = QName::new(ns::REPO, "data");
const LOCATION: QName<'static> = QName::new(ns::REPO, "location");

/// Relative path of the repository index below the repository base URL.
pub const REPOMD_PATH: &str = "repodata/repomd.xml";

/// Parsed repository index document.
#[derive(Debug, Clone)]
pub struct RepoIndex {
    root: Element,
}

impl RepoIndex {
    /// Parses `repomd.xml` content.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Ok(Self {
            root: Element::parse(xml)?,
        })
    }

    /// Every `data` entry type declared by the index, in document order.
    pub fn data_types(&self) -> impl Iterator<Item = &str> {
        self.root
            .find_all(&[DATA])
            .into_iter()
            .filter_map(|data| data.attr("type"))
    }

    /// Location of the primary metadata document.
    ///
    /// Uses the first `data` element whose `type` is `primary`.
    pub fn primary_location(&self) -> Result<&str> {
        let data = self
            .root
            .find_all(&[DATA])
            .into_iter()
            .find(|data| data.attr("type") == Some("primary"))
            .ok_or(Error::MissingPrimary)?;

        let location = data.find(&[LOCATION]).ok_or_else(|| {
            Error::MalformedDocument("primary data entry has no location element".to_string())
        })?;

        location.attr("href").ok_or_else(|| {
            Error::MalformedDocument("primary location has no href attribute".to_string())
        })
    }
}
