//! Primary package metadata (`primary.xml.gz`).

use super::ns;
use super::xml::{Element, QName};
use crate::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::io::Read;

const PACKAGE: QName<'static> = QName::new(ns::COMMON, "package");
const LOCATION: QName<'static> = QName::new(ns::COMMON, "location");

/// Decompresses a gzip-encoded metadata body.
///
/// Every member of a multi-member stream is decoded, as produced by parallel
/// compressors such as `pigz`.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut xml = Vec::new();
    decoder
        .read_to_end(&mut xml)
        .map_err(|e| Error::Decompression(e.to_string()))?;
    Ok(xml)
}

/// Parsed primary metadata document.
#[derive(Debug, Clone)]
pub struct PrimaryMetadata {
    root: Element,
}

impl PrimaryMetadata {
    /// Parses decompressed `primary.xml` content.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Ok(Self {
            root: Element::parse(xml)?,
        })
    }

    /// Decompresses and parses a `primary.xml.gz` body.
    pub fn from_gzip(compressed: &[u8]) -> Result<Self> {
        Self::parse(&decompress(compressed)?)
    }

    /// Artifact location of every package, in document order.
    ///
    /// A `location` element without `href` makes the whole document invalid.
    pub fn package_locations(&self) -> Result<Vec<&str>> {
        self.root
            .find_all(&[PACKAGE, LOCATION])
            .into_iter()
            .map(|location| {
                location.attr("href").ok_or_else(|| {
                    Error::MalformedDocument("package location has no href attribute".to_string())
                })
            })
            .collect()
    }

    /// Number of `package` entries.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.root.find_all(&[PACKAGE]).len()
    }
}
