//! Document loader
//!
//! Parses a pit file into an owned, navigable element tree. Only elements and
//! their attributes are kept; text nodes, comments, and processing
//! instructions are insignificant to a state model and are dropped during the
//! event scan.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use std::collections::HashMap;
use std::path::Path;

/// A single XML element with its resolved namespace, attributes, and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local tag name, without any prefix
    pub name: String,
    /// Resolved namespace URI, if the element is namespace-qualified
    pub namespace: Option<String>,
    /// Attribute name -> unescaped value
    pub attributes: HashMap<String, String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Typed attribute accessor: `None` when the attribute is absent
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether this element matches the given namespace URI and local name
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.name == local && self.namespace.as_deref() == Some(namespace)
    }

    /// Direct children matching the given namespace URI and local name.
    /// The filter strings only need to outlive the iterator, not the tree.
    pub fn children_named<'a, 'b>(
        &'a self,
        namespace: &'b str,
        local: &'b str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'b> {
        self.children.iter().filter(move |c| c.is(namespace, local))
    }

    /// All descendant elements (self included) in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Depth-first preorder traversal over an element subtree
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// A parsed pit document
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Element,
}

impl Document {
    /// Read and parse the pit file at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!("Read {} bytes from {:?}", contents.len(), path);
        parse(&contents).map_err(|msg| Error::xml(path, msg))
    }

    /// Parse an in-memory XML string
    pub fn parse_str(xml: &str) -> Result<Self> {
        parse(xml).map_err(|msg| Error::xml("<string>", msg))
    }
}

fn parse(xml: &str) -> std::result::Result<Document, String> {
    let mut reader = NsReader::from_str(xml);

    // (element under construction, children collected so far)
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                stack.push(open_element(&e, ns)?);
            }
            Ok((ns, Event::Empty(e))) => {
                let element = open_element(&e, ns)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok((_, Event::End(_))) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok((_, Event::Eof)) => break,
            // Text, CData, comments, declarations, PIs: not part of the model
            Ok(_) => {}
            Err(e) => return Err(format!("parse error: {}", e)),
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }
    let root = root.ok_or_else(|| "no root element found".to_string())?;
    Ok(Document { root })
}

fn open_element(
    e: &quick_xml::events::BytesStart<'_>,
    ns: ResolveResult<'_>,
) -> std::result::Result<Element, String> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let namespace = match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(format!(
                "unknown namespace prefix {:?} on element {}",
                String::from_utf8_lossy(&prefix),
                name
            ));
        }
    };

    let mut attributes = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| format!("bad attribute on element {}: {}", name, e))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad attribute value on element {}: {}", name, e))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(Element {
        name,
        namespace,
        attributes,
        children: Vec::new(),
    })
}

fn close_element(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> std::result::Result<(), String> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err("multiple root elements".to_string())
    }
}
