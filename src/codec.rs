//! Moves elements between markup and objects using their descriptors.
//!
//! Markup is first read into an [`ExtensionElement`] tree with `xml-rs`,
//! then lifted into typed elements by [`decode`]. Serialization runs the
//! other way: [`encode`] lowers a typed element into a tree which is written
//! out as events.

use std::collections::BTreeMap;

use xml::attribute::OwnedAttribute;
use xml::name::{Name, OwnedName};
use xml::namespace::{
    NS_EMPTY_URI, NS_NO_PREFIX, NS_XMLNS_PREFIX, NS_XMLNS_URI, NS_XML_PREFIX, NS_XML_URI,
};

use crate::element::{DsElement, ExtensionElement};
use crate::error::{Error, Result};
use crate::{DS_NAMESPACE, DS_PREFIX};

type Scope = BTreeMap<String, String>;

/// Bindings in scope before any element declares one.
fn document_scope() -> Scope {
    [
        (NS_NO_PREFIX, NS_EMPTY_URI),
        (NS_XML_PREFIX, NS_XML_URI),
        (NS_XMLNS_PREFIX, NS_XMLNS_URI),
    ]
    .iter()
    .map(|(prefix, uri)| (prefix.to_string(), uri.to_string()))
    .collect()
}

/// Character data made only of XML whitespace.
fn is_formatting(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Parses `source_xml` into a tree of generic elements.
pub fn parse_tree(source_xml: &str) -> Result<ExtensionElement> {
    let reader = xml::reader::EventReader::new_with_config(
        source_xml.as_bytes(),
        xml::ParserConfig::new()
            .ignore_comments(true)
            .trim_whitespace(false)
            .whitespace_to_characters(false)
            .cdata_to_characters(true)
            .coalesce_characters(true),
    );

    let mut stack: Vec<ExtensionElement> = vec![];
    let mut scopes = vec![document_scope()];
    let mut root = None;
    for evt in reader {
        match evt? {
            xml::reader::XmlEvent::StartElement {
                name,
                attributes,
                namespace,
            } => {
                let mut element = ExtensionElement::new(name);
                element.attributes = attributes;
                if let Some(parent) = scopes.last() {
                    element.namespaces = namespace
                        .0
                        .iter()
                        .filter(|&(prefix, uri)| parent.get(prefix) != Some(uri))
                        .map(|(prefix, uri)| (prefix.clone(), uri.clone()))
                        .collect();
                }
                scopes.push(namespace.0);
                stack.push(element);
            }
            xml::reader::XmlEvent::EndElement { .. } => {
                scopes.pop();
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
            }
            xml::reader::XmlEvent::Characters(text)
            | xml::reader::XmlEvent::CData(text)
            | xml::reader::XmlEvent::Whitespace(text) => {
                if let Some(element) = stack.last_mut() {
                    match element.children.last_mut() {
                        Some(child) => child.tail.push_str(&text),
                        None => element.text.push_str(&text),
                    }
                }
            }
            _ => {}
        }
    }

    root.ok_or(Error::EmptyDocument)
}

/// Parses `source_xml` into an element of type `T`.
///
/// The root element must be `T`'s namespace-qualified tag. Content the
/// descriptor does not recognize is kept in the extension slots.
pub fn from_str<T: DsElement>(source_xml: &str) -> Result<T> {
    let root = parse_tree(source_xml)?;
    let descriptor = T::descriptor();
    if !root.is(descriptor.namespace(), descriptor.tag()) {
        return Err(Error::UnexpectedRoot {
            expected: descriptor.qualified_name(),
            found: match &root.name.namespace {
                Some(ns) => format!("{{{}}}{}", ns, root.name.local_name),
                None => root.name.local_name.clone(),
            },
        });
    }
    Ok(decode(root))
}

/// Lifts a generic element into `T`.
///
/// The element's own name is not checked. Never fails: attributes and
/// children without a declared field, and surplus occurrences of
/// single-valued children, become extension content. Whitespace-only text
/// next to child elements is formatting and is dropped; text of a leaf
/// element and everything inside extension content is kept as is.
pub fn decode<T: DsElement>(node: ExtensionElement) -> T {
    let descriptor = T::descriptor();
    let mut element = T::default();

    for attr in node.attributes {
        let field = if attr.name.namespace.is_none() {
            descriptor.attribute_field(&attr.name.local_name)
        } else {
            None
        };
        match field {
            Some(field) => {
                if let Err(value) = element.set_attribute(field, attr.value) {
                    element
                        .extensible_mut()
                        .extension_attributes
                        .push(OwnedAttribute::new(attr.name, value));
                }
            }
            None => {
                log::trace!(
                    "keeping attribute {} on {} as an extension",
                    attr.name,
                    descriptor.tag()
                );
                element.extensible_mut().extension_attributes.push(attr);
            }
        }
    }

    let has_children = !node.children.is_empty();
    let extensible = element.extensible_mut();
    extensible.namespaces = node
        .namespaces
        .into_iter()
        .filter(|(prefix, uri)| prefix != DS_PREFIX && uri != DS_NAMESPACE)
        .collect();
    extensible.text = if has_children && is_formatting(&node.text) {
        String::new()
    } else {
        node.text
    };
    extensible.tail = node.tail;

    for mut child in node.children {
        if is_formatting(&child.tail) {
            child.tail.clear();
        }
        let declared = descriptor
            .child(child.name.namespace.as_deref(), &child.name.local_name)
            .map(|c| (c.field, c.cardinality));
        let child = match declared {
            Some((field, cardinality)) => match element.accept_child(field, child) {
                Ok(()) => continue,
                Err(child) => {
                    log::debug!(
                        "{} already holds its {:?} {}, keeping the extra occurrence as an extension",
                        descriptor.tag(),
                        cardinality,
                        child.name.local_name
                    );
                    child
                }
            },
            None => {
                log::trace!(
                    "keeping element {} in {} as an extension",
                    child.name,
                    descriptor.tag()
                );
                child
            }
        };
        element.extensible_mut().extension_elements.push(child);
    }

    element
}

/// Lowers `element` into a generic element in the `ds` prefix.
///
/// Declared attributes come first in descriptor order, then extension
/// attributes. Declared children follow the descriptor's child order and are
/// followed by extension elements.
pub fn encode<T: DsElement>(element: &T) -> ExtensionElement {
    let descriptor = T::descriptor();
    let mut node = ExtensionElement::new(OwnedName::qualified(
        descriptor.tag(),
        descriptor.namespace(),
        Some(DS_PREFIX),
    ));

    for (name, field) in descriptor.attributes() {
        if let Some(value) = element.attribute(field) {
            node.attributes
                .push(OwnedAttribute::new(OwnedName::local(name), value));
        }
    }
    let extensible = element.extensible();
    node.namespaces = extensible.namespaces.clone();
    node.attributes
        .extend(extensible.extension_attributes.iter().cloned());
    node.text = extensible.text.clone();
    node.tail = extensible.tail.clone();

    for field in descriptor.child_order() {
        node.children.extend(element.child_elements(field));
    }
    node.children
        .extend(extensible.extension_elements.iter().cloned());

    node
}

/// Adds `prefix -> uri` to the declarations of the element being written
/// unless it is already in scope. The first binding of a prefix on an
/// element wins.
fn declare(scope: &mut Scope, declarations: &mut Vec<(String, String)>, prefix: &str, uri: &str) {
    if scope.get(prefix).map(String::as_str) == Some(uri)
        || declarations.iter().any(|(p, _)| p == prefix)
    {
        return;
    }
    scope.insert(prefix.to_string(), uri.to_string());
    declarations.push((prefix.to_string(), uri.to_string()));
}

fn write_tree<W: std::io::Write>(
    writer: &mut xml::writer::EventWriter<W>,
    node: &ExtensionElement,
    parent_scope: &Scope,
) -> Result<()> {
    let mut scope = parent_scope.clone();
    let mut declarations = vec![];
    match (&node.name.prefix, &node.name.namespace) {
        (Some(prefix), Some(ns)) => declare(&mut scope, &mut declarations, prefix, ns),
        (None, ns) => declare(
            &mut scope,
            &mut declarations,
            NS_NO_PREFIX,
            ns.as_deref().unwrap_or(NS_EMPTY_URI),
        ),
        (Some(_), None) => {}
    }
    for (prefix, uri) in &node.namespaces {
        declare(&mut scope, &mut declarations, prefix, uri);
    }
    for attr in &node.attributes {
        if let (Some(prefix), Some(ns)) = (&attr.name.prefix, &attr.name.namespace) {
            declare(&mut scope, &mut declarations, prefix, ns);
        }
    }

    // Declarations are written as plain attributes: the emitter cannot
    // undeclare a default namespace.
    let mut start = xml::writer::XmlEvent::start_element(node.name.borrow());
    for (prefix, uri) in &declarations {
        start = if prefix.is_empty() {
            start.attr(Name::local(NS_XMLNS_PREFIX), uri)
        } else {
            start.attr(Name::prefixed(prefix, NS_XMLNS_PREFIX), uri)
        };
    }
    for attr in &node.attributes {
        start = start.attr(attr.name.borrow(), &attr.value);
    }
    writer.write(start)?;

    if !node.text.is_empty() {
        writer.write(xml::writer::XmlEvent::characters(&node.text))?;
    }
    for child in &node.children {
        write_tree(writer, child, &scope)?;
        if !child.tail.is_empty() {
            writer.write(xml::writer::XmlEvent::characters(&child.tail))?;
        }
    }

    writer.write(xml::writer::XmlEvent::end_element())?;
    Ok(())
}

/// Writes a generic element tree as markup, without an XML declaration.
///
/// The root's tail is not written.
pub fn tree_to_string(node: &ExtensionElement) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = xml::writer::EventWriter::new_with_config(
        &mut output,
        xml::writer::EmitterConfig::new()
            .perform_indent(false)
            .write_document_declaration(false)
            .normalize_empty_elements(true)
            .pad_self_closing(false),
    );
    write_tree(&mut writer, node, &document_scope())?;

    Ok(String::from_utf8_lossy(&output).to_string())
}

/// Serializes `element` as markup.
pub fn to_string<T: DsElement>(element: &T) -> Result<String> {
    tree_to_string(&encode(element))
}
