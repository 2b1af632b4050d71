//! Instance-side building blocks shared by every XML-DSig element type.

use std::fmt;

use xml::attribute::OwnedAttribute;
use xml::name::OwnedName;

use crate::codec;
use crate::descriptor::{registry, ElementDescriptor};
use crate::proto::ds::ElementType;

fn name_matches(name: &OwnedName, namespace: Option<&str>, local_name: &str) -> bool {
    name.local_name == local_name && name.namespace.as_deref() == namespace
}

/// An element kept as an opaque subtree.
///
/// Children that an element's descriptor does not recognize are stored in
/// this form so that they survive a parse/serialize cycle unchanged. The
/// codec also uses it as its intermediate tree between markup and typed
/// elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionElement {
    pub name: OwnedName,
    /// Namespace declarations made on this element, as `(prefix, uri)`. An
    /// empty prefix is the default namespace, an empty uri undeclares it.
    pub namespaces: Vec<(String, String)>,
    pub attributes: Vec<OwnedAttribute>,
    /// Character data before the first child.
    pub text: String,
    pub children: Vec<ExtensionElement>,
    /// Character data between this element's end tag and the next sibling.
    pub tail: String,
}

impl ExtensionElement {
    pub fn new(name: OwnedName) -> Self {
        ExtensionElement {
            name,
            namespaces: vec![],
            attributes: vec![],
            text: String::new(),
            children: vec![],
            tail: String::new(),
        }
    }

    /// Returns true if this element has the given namespace and local name.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        name_matches(&self.name, Some(namespace), local_name)
    }

    /// Value of an attribute without a namespace.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| name_matches(&a.name, None, local_name))
            .map(|a| a.value.as_str())
    }

    pub fn find_children<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a ExtensionElement> + 'a {
        self.children
            .iter()
            .filter(move |c| c.is(namespace, local_name))
    }
}

/// Content every element carries besides its declared attributes and
/// children: character data and anything the descriptor does not know about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensibleElement {
    /// Character data directly inside the element. Empty means none.
    pub text: String,
    /// Character data following the element inside its parent.
    pub tail: String,
    /// Namespace declarations other than the XML-DSig one, kept for prefixes
    /// used in content such as XPath expressions.
    pub namespaces: Vec<(String, String)>,
    pub extension_elements: Vec<ExtensionElement>,
    /// Unrecognized attributes, in the order they were seen or set.
    pub extension_attributes: Vec<OwnedAttribute>,
}

impl ExtensibleElement {
    pub fn extension_attribute(&self, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        self.extension_attributes
            .iter()
            .find(|a| name_matches(&a.name, namespace, local_name))
            .map(|a| a.value.as_str())
    }

    /// Sets an extension attribute, replacing an existing one with the same
    /// namespace and local name in place.
    pub fn set_extension_attribute<S: Into<String>>(&mut self, name: OwnedName, value: S) {
        let value = value.into();
        match self.extension_attributes.iter_mut().find(|a| {
            name_matches(&a.name, name.namespace.as_deref(), &name.local_name)
        }) {
            Some(existing) => existing.value = value,
            None => self
                .extension_attributes
                .push(OwnedAttribute::new(name, value)),
        }
    }

    pub fn remove_extension_attribute(
        &mut self,
        namespace: Option<&str>,
        local_name: &str,
    ) -> Option<String> {
        let i = self
            .extension_attributes
            .iter()
            .position(|a| name_matches(&a.name, namespace, local_name))?;
        Some(self.extension_attributes.remove(i).value)
    }

    pub fn find_extensions<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a ExtensionElement> + 'a {
        self.extension_elements
            .iter()
            .filter(move |e| e.is(namespace, local_name))
    }
}

/// Implemented once per XML-DSig element type by the `ds_elements!` table.
///
/// Attribute and child access goes through native field names so the codec
/// can walk any element using only its descriptor.
pub trait DsElement: fmt::Debug + Clone + Default + PartialEq {
    const TYPE: ElementType;

    fn extensible(&self) -> &ExtensibleElement;

    fn extensible_mut(&mut self) -> &mut ExtensibleElement;

    /// Value of the attribute stored in native field `field`.
    fn attribute(&self, field: &str) -> Option<&str>;

    /// Stores `value` in attribute field `field`, handing the value back if
    /// no such field exists.
    fn set_attribute(&mut self, field: &str, value: String) -> Result<(), String>;

    /// Decodes `node` into child field `field`. The node is handed back if
    /// the field does not exist or already holds its only allowed value.
    fn accept_child(&mut self, field: &str, node: ExtensionElement)
        -> Result<(), ExtensionElement>;

    /// Encoded values of child field `field`, in order.
    fn child_elements(&self, field: &str) -> Vec<ExtensionElement>;

    fn descriptor() -> &'static ElementDescriptor {
        registry().descriptor(Self::TYPE)
    }

    fn text(&self) -> &str {
        &self.extensible().text
    }

    fn with_text<S: Into<String>>(text: S) -> Self {
        let mut element = Self::default();
        element.extensible_mut().text = text.into();
        element
    }
}

/// Storage for one child field; the cardinality lives in the Rust type.
pub(crate) trait ChildSlot {
    fn accept(&mut self, node: ExtensionElement) -> Result<(), ExtensionElement>;

    fn elements(&self) -> Vec<ExtensionElement>;
}

impl<T: DsElement> ChildSlot for Option<T> {
    fn accept(&mut self, node: ExtensionElement) -> Result<(), ExtensionElement> {
        if self.is_some() {
            return Err(node);
        }
        *self = Some(codec::decode(node));
        Ok(())
    }

    fn elements(&self) -> Vec<ExtensionElement> {
        self.iter().map(codec::encode).collect()
    }
}

impl<T: DsElement> ChildSlot for Vec<T> {
    fn accept(&mut self, node: ExtensionElement) -> Result<(), ExtensionElement> {
        self.push(codec::decode(node));
        Ok(())
    }

    fn elements(&self) -> Vec<ExtensionElement> {
        self.iter().map(codec::encode).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_attributes_replace_in_place() {
        let mut ext = ExtensibleElement::default();
        ext.set_extension_attribute(OwnedName::local("a"), "1");
        ext.set_extension_attribute(
            OwnedName::qualified("b", "urn:example", Some("ex")),
            "2",
        );
        ext.set_extension_attribute(OwnedName::local("a"), "3");

        assert_eq!(ext.extension_attributes.len(), 2);
        assert_eq!(ext.extension_attribute(None, "a"), Some("3"));
        assert_eq!(ext.extension_attribute(Some("urn:example"), "b"), Some("2"));
        assert_eq!(ext.extension_attribute(None, "b"), None);
        assert_eq!(ext.extension_attributes[0].name.local_name, "a");

        assert_eq!(
            ext.remove_extension_attribute(Some("urn:example"), "b"),
            Some("2".to_string())
        );
        assert_eq!(ext.remove_extension_attribute(Some("urn:example"), "b"), None);
    }

    #[test]
    fn find_extensions_by_qualified_name() {
        let mut ext = ExtensibleElement::default();
        ext.extension_elements.push(ExtensionElement::new(OwnedName::qualified(
            "Hint",
            "urn:example",
            Some("ex"),
        )));
        ext.extension_elements
            .push(ExtensionElement::new(OwnedName::local("Hint")));

        assert_eq!(ext.find_extensions("urn:example", "Hint").count(), 1);
        assert_eq!(ext.find_extensions("urn:other", "Hint").count(), 0);
    }
}
