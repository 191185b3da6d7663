//! Minimal namespace-aware element tree.
//!
//! Built on `quick-xml`'s namespace resolver. Only element names, attributes
//! and children are kept; text content is discarded because repository
//! metadata navigation never needs it.
//!
//! Namespace URIs and names are interned per document, so the thousands of
//! `package` entries of a large `primary.xml` share one allocation per
//! distinct name.

use crate::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use std::collections::HashSet;
use std::sync::Arc;

/// A namespace-qualified name.
///
/// `ns` is `None` for names outside any namespace, which is where unprefixed
/// attributes always live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QName<'a> {
    /// Namespace URI.
    pub ns: Option<&'a str>,
    /// Local part of the name.
    pub local: &'a str,
}

impl<'a> QName<'a> {
    /// Name inside the given namespace.
    #[must_use]
    pub const fn new(ns: &'a str, local: &'a str) -> Self {
        Self {
            ns: Some(ns),
            local,
        }
    }

    /// Name without a namespace.
    #[must_use]
    pub const fn unqualified(local: &'a str) -> Self {
        Self { ns: None, local }
    }
}

impl std::fmt::Display for QName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ns {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(self.local),
        }
    }
}

/// Shared strings for the names of one document.
#[derive(Debug, Default)]
struct Names(HashSet<Arc<str>>);

impl Names {
    fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.0.get(name) {
            return Arc::clone(existing);
        }
        let name: Arc<str> = Arc::from(name);
        self.0.insert(Arc::clone(&name));
        name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    ns: Option<Arc<str>>,
    local: Arc<str>,
    value: String,
}

/// An element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    ns: Option<Arc<str>>,
    local: Arc<str>,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
}

impl Element {
    /// Parses a complete document and returns its root element.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = NsReader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut names = Names::default();
        let mut buf = Vec::new();
        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;

        loop {
            let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
            let ns = namespace_uri(ns, &mut names)?;

            match event {
                Event::Start(start) => {
                    let element = Self::from_start(&reader, &mut names, ns, &start)?;
                    stack.push(element);
                },
                Event::Empty(start) => {
                    let element = Self::from_start(&reader, &mut names, ns, &start)?;
                    attach(&mut stack, &mut root, element)?;
                },
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        Error::MalformedDocument("unexpected closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(Error::MalformedDocument(
                "unexpected end of document".to_string(),
            ));
        }
        root.ok_or_else(|| Error::MalformedDocument("document has no root element".to_string()))
    }

    fn from_start(
        reader: &NsReader<&[u8]>,
        names: &mut Names,
        ns: Option<Arc<str>>,
        start: &BytesStart<'_>,
    ) -> Result<Self> {
        let local = names.intern(utf8(start.local_name().as_ref())?);

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::MalformedDocument(e.to_string()))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let (attr_ns, attr_local) = reader.resolve_attribute(attr.key);
            attributes.push(Attribute {
                ns: namespace_uri(attr_ns, names)?,
                local: names.intern(utf8(attr_local.as_ref())?),
                value: attr.unescape_value()?.into_owned(),
            });
        }

        Ok(Self {
            ns,
            local,
            attributes,
            children: Vec::new(),
        })
    }

    /// Qualified name of this element.
    #[must_use]
    pub fn name(&self) -> QName<'_> {
        QName {
            ns: self.ns.as_deref(),
            local: &self.local,
        }
    }

    /// Returns `true` if this element has the given qualified name.
    #[must_use]
    pub fn is(&self, name: QName<'_>) -> bool {
        self.name() == name
    }

    /// Value of an unprefixed attribute.
    #[must_use]
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attr_qualified(QName::unqualified(local))
    }

    /// Value of an attribute by qualified name.
    #[must_use]
    pub fn attr_qualified(&self, name: QName<'_>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.ns.as_deref() == name.ns && &*a.local == name.local)
            .map(|a| a.value.as_str())
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// First descendant matching the path of qualified child names.
    #[must_use]
    pub fn find(&self, path: &[QName<'_>]) -> Option<&Self> {
        self.find_all(path).into_iter().next()
    }

    /// Every descendant matching the path of qualified child names, in
    /// document order.
    ///
    /// Each step only looks at direct children of the previous step's matches,
    /// so `[package, location]` selects `location` children of `package`
    /// children of `self`. An empty path selects `self`.
    #[must_use]
    pub fn find_all(&self, path: &[QName<'_>]) -> Vec<&Self> {
        let mut matches = vec![self];
        for step in path {
            matches = matches
                .into_iter()
                .flat_map(|element| element.children.iter().filter(|child| child.is(*step)))
                .collect();
        }
        matches
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::MalformedDocument(
            "document has more than one root element".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn namespace_uri(resolved: ResolveResult<'_>, names: &mut Names) -> Result<Option<Arc<str>>> {
    match resolved {
        ResolveResult::Bound(ns) => utf8(ns.as_ref()).map(|uri| Some(names.intern(uri))),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(Error::MalformedDocument(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| Error::MalformedDocument(format!("invalid UTF-8 in name: {e}")))
}
