//! Repository metadata navigation.
//!
//! yum/rpm-md repositories publish a small index, `repodata/repomd.xml`, that
//! points at the other metadata files. The `primary` file is a gzip-compressed
//! XML document listing every package and the relative location of its
//! artifact.
//!
//! ```text
//! repomd.xml
//!   {repo}data[@type='primary']/{repo}location/@href  ──▶  primary.xml.gz
//! primary.xml
//!   {common}package/{common}location/@href            ──▶  Packages/foo.rpm
//! ```
//!
//! All element lookups are namespace-qualified using the constants in [`ns`].

pub mod primary;
pub mod repomd;
pub mod xml;

pub use primary::{PrimaryMetadata, decompress};
pub use repomd::RepoIndex;
pub use xml::{Element, QName};

/// XML namespaces of rpm-md repository metadata.
pub mod ns {
    /// Namespace of `repomd.xml` elements.
    pub const REPO: &str = "http://linux.duke.edu/metadata/repo";
    /// Namespace of `primary.xml` package elements.
    pub const COMMON: &str = "http://linux.duke.edu/metadata/common";
    /// Namespace of rpm-specific package details (`rpm:provides`, ...).
    ///
    /// Not needed to locate package artifacts.
    pub const RPM: &str = "http://linux.duke.edu/metadata/rpm";
}
