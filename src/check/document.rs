// SPDX-License-Identifier: MIT

//! Lenient markup parsing into an XPath-queryable document
//!
//! Markup goes through an HTML5 tree builder first, so unclosed tags, bad
//! nesting and stray end tags are repaired the way a browser would. The
//! repaired tree is then copied into an `sxd_document` package that the
//! XPath engine can walk.

use scraper::{Html, Node};
use sxd_document::dom::{Document, Element, Root};
use sxd_document::Package;

use crate::source::RawDocument;

/// Where a copied node gets attached in the target document
#[derive(Clone, Copy)]
enum Parent<'d> {
    Root(Root<'d>),
    Element(Element<'d>),
}

/// An in-memory document tree built once from a [`RawDocument`]
pub struct ParsedTree {
    package: Package,
    element_count: usize,
}

impl ParsedTree {
    /// Parse markup into a queryable tree.
    ///
    /// Never fails: malformed markup is recovered best-effort, and blank input
    /// cannot reach this point because [`RawDocument`] refuses it.
    pub fn parse(raw: &RawDocument) -> Self {
        let html = Html::parse_document(raw.text());

        if !html.errors.is_empty() {
            log::debug!(
                "Recovered from {} markup error(s) while parsing document from {}",
                html.errors.len(),
                raw.origin()
            );
            for error in &html.errors {
                log::trace!("markup error: {}", error);
            }
        }

        let package = Package::new();
        let element_count = copy_tree(&html, package.as_document());

        log::debug!("Parsed document with {} element(s)", element_count);

        Self {
            package,
            element_count,
        }
    }

    /// The document the XPath engine evaluates against
    pub fn document(&self) -> Document<'_> {
        self.package.as_document()
    }

    /// Number of element nodes in the tree
    pub fn element_count(&self) -> usize {
        self.element_count
    }
}

impl std::fmt::Debug for ParsedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedTree")
            .field("element_count", &self.element_count)
            .finish()
    }
}

/// Copy the html5ever tree into `doc`, returning the number of elements copied.
///
/// Walks with an explicit stack so deeply nested markup cannot overflow.
fn copy_tree(html: &Html, doc: Document<'_>) -> usize {
    let root = Parent::Root(doc.root());
    let mut stack: Vec<_> = html.tree.root().children().rev().map(|c| (c, root)).collect();
    let mut element_count = 0;

    while let Some((node, parent)) = stack.pop() {
        match node.value() {
            Node::Element(element) => {
                let copy = doc.create_element(element.name());
                for (name, value) in element.attrs() {
                    copy.set_attribute_value(name, value);
                }
                match parent {
                    Parent::Root(root) => root.append_child(copy),
                    Parent::Element(el) => el.append_child(copy),
                }
                element_count += 1;

                let parent = Parent::Element(copy);
                stack.extend(node.children().rev().map(|c| (c, parent)));
            }
            Node::Text(text) => {
                // Text directly under the root has no place in the target model
                if let Parent::Element(el) = parent {
                    el.append_child(doc.create_text(text));
                }
            }
            Node::Comment(comment) => {
                let copy = doc.create_comment(comment);
                match parent {
                    Parent::Root(root) => root.append_child(copy),
                    Parent::Element(el) => el.append_child(copy),
                }
            }
            Node::Fragment | Node::Document => {
                stack.extend(node.children().rev().map(|c| (c, parent)));
            }
            Node::Doctype(_) | Node::ProcessingInstruction(_) => {}
        }
    }

    element_count
}
