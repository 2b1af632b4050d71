//! Per-element metadata and the process-wide, read-only registry built from it.
//!
//! Every element type contributes one [`ElementSpec`] (a plain static table).
//! [`Registry::build`] resolves those tables into [`ElementDescriptor`]s with
//! precomputed lookup maps and rejects inconsistent tables.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::proto::ds::{ElementType, ELEMENT_SPECS};

/// How many values a child field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one occurrence in a conformant document.
    Single,
    /// Zero or one occurrence.
    Optional,
    /// Any number of occurrences, kept in document order.
    List,
}

#[derive(Debug)]
pub struct AttributeSpec {
    /// XML attribute name, e.g. `Algorithm`.
    pub name: &'static str,
    /// Native field name, e.g. `algorithm`.
    pub field: &'static str,
}

#[derive(Debug)]
pub struct ChildSpec {
    pub field: &'static str,
    pub cardinality: Cardinality,
    pub element: ElementType,
}

/// Static description of one element type, as declared in the element table.
#[derive(Debug)]
pub struct ElementSpec {
    pub element: ElementType,
    pub tag: &'static str,
    pub namespace: &'static str,
    pub attributes: &'static [AttributeSpec],
    pub children: &'static [ChildSpec],
    pub child_order: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDescriptor {
    pub namespace: &'static str,
    pub tag: &'static str,
    pub field: &'static str,
    pub cardinality: Cardinality,
    pub element: ElementType,
}

#[derive(Debug)]
pub struct ElementDescriptor {
    element: ElementType,
    tag: &'static str,
    namespace: &'static str,
    attributes: &'static [AttributeSpec],
    attribute_fields: HashMap<&'static str, &'static str>,
    field_attributes: HashMap<&'static str, &'static str>,
    children: HashMap<&'static str, ChildDescriptor>,
    child_fields: HashMap<&'static str, &'static str>,
    serialization_order: Vec<&'static str>,
}

impl ElementDescriptor {
    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The tag in `{namespace}tag` form.
    pub fn qualified_name(&self) -> String {
        format!("{{{}}}{}", self.namespace, self.tag)
    }

    /// Native field name for XML attribute `name`.
    pub fn attribute_field(&self, name: &str) -> Option<&'static str> {
        self.attribute_fields.get(name).copied()
    }

    /// XML attribute name for native field `field`.
    pub fn attribute_name(&self, field: &str) -> Option<&'static str> {
        self.field_attributes.get(field).copied()
    }

    /// `(xml name, field)` pairs in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.attributes.iter().map(|a| (a.name, a.field))
    }

    pub fn child(&self, namespace: Option<&str>, tag: &str) -> Option<&ChildDescriptor> {
        self.children
            .get(tag)
            .filter(|c| namespace == Some(c.namespace))
    }

    pub fn child_by_field(&self, field: &str) -> Option<&ChildDescriptor> {
        self.child_fields
            .get(field)
            .and_then(|tag| self.children.get(tag))
    }

    /// Child field names in the order they are serialized.
    pub fn child_order(&self) -> &[&'static str] {
        &self.serialization_order
    }
}

fn conflict(spec: &ElementSpec, reason: String) -> Error {
    Error::DescriptorConflict {
        element: spec.tag,
        reason,
    }
}

/// All known element descriptors, keyed by element type and by qualified tag.
#[derive(Debug)]
pub struct Registry {
    descriptors: HashMap<ElementType, ElementDescriptor>,
    by_tag: HashMap<&'static str, (&'static str, ElementType)>,
}

impl Registry {
    /// Resolves `specs` into descriptors, checking that no element repeats a
    /// field name and that every ordered child field is declared.
    pub fn build(specs: &[&'static ElementSpec]) -> Result<Registry> {
        let mut by_type: HashMap<ElementType, &'static ElementSpec> = HashMap::new();
        let mut by_tag = HashMap::new();
        for spec in specs {
            if by_type.insert(spec.element, *spec).is_some() {
                return Err(conflict(spec, format!("{:?} declared twice", spec.element)));
            }
            if by_tag
                .insert(spec.tag, (spec.namespace, spec.element))
                .is_some()
            {
                return Err(conflict(spec, format!("tag {} declared twice", spec.tag)));
            }
        }

        let mut descriptors = HashMap::new();
        for spec in specs {
            let mut attribute_fields = HashMap::new();
            let mut field_attributes = HashMap::new();
            for attr in spec.attributes {
                if attribute_fields.insert(attr.name, attr.field).is_some() {
                    return Err(conflict(
                        spec,
                        format!("attribute {} declared twice", attr.name),
                    ));
                }
                if field_attributes.insert(attr.field, attr.name).is_some() {
                    return Err(conflict(
                        spec,
                        format!("attribute field {} declared twice", attr.field),
                    ));
                }
            }

            let mut children = HashMap::new();
            let mut child_fields = HashMap::new();
            for child in spec.children {
                let child_spec = by_type.get(&child.element).ok_or_else(|| {
                    conflict(
                        spec,
                        format!("child {} refers to unregistered {:?}", child.field, child.element),
                    )
                })?;
                if field_attributes.contains_key(child.field)
                    || child_fields.insert(child.field, child_spec.tag).is_some()
                {
                    return Err(conflict(
                        spec,
                        format!("field {} declared twice", child.field),
                    ));
                }
                let descriptor = ChildDescriptor {
                    namespace: child_spec.namespace,
                    tag: child_spec.tag,
                    field: child.field,
                    cardinality: child.cardinality,
                    element: child.element,
                };
                if children.insert(child_spec.tag, descriptor).is_some() {
                    return Err(conflict(
                        spec,
                        format!("child element {} declared twice", child_spec.tag),
                    ));
                }
            }

            let mut seen = HashSet::new();
            for field in spec.child_order {
                if !child_fields.contains_key(field) {
                    return Err(conflict(
                        spec,
                        format!("child order names undeclared field {}", field),
                    ));
                }
                if !seen.insert(*field) {
                    return Err(conflict(
                        spec,
                        format!("child order names {} twice", field),
                    ));
                }
            }
            // Declared children missing from the order still get serialized, after it.
            let mut serialization_order = spec.child_order.to_vec();
            serialization_order.extend(
                spec.children
                    .iter()
                    .map(|c| c.field)
                    .filter(|f| !seen.contains(f)),
            );

            descriptors.insert(
                spec.element,
                ElementDescriptor {
                    element: spec.element,
                    tag: spec.tag,
                    namespace: spec.namespace,
                    attributes: spec.attributes,
                    attribute_fields,
                    field_attributes,
                    children,
                    child_fields,
                    serialization_order,
                },
            );
        }

        Ok(Registry {
            descriptors,
            by_tag,
        })
    }

    /// Descriptor for `element`.
    ///
    /// Panics if `element` is not part of this registry; the process-wide
    /// [`registry`] holds every [`ElementType`].
    pub fn descriptor(&self, element: ElementType) -> &ElementDescriptor {
        &self.descriptors[&element]
    }

    pub fn get(&self, element: ElementType) -> Option<&ElementDescriptor> {
        self.descriptors.get(&element)
    }

    /// Element type registered under a namespace-qualified tag.
    pub fn element_for(&self, namespace: Option<&str>, tag: &str) -> Option<ElementType> {
        self.by_tag
            .get(tag)
            .filter(|(ns, _)| namespace == Some(*ns))
            .map(|(_, element)| *element)
    }

    /// Child field of `parent` matching a namespace-qualified tag.
    pub fn child(
        &self,
        parent: ElementType,
        namespace: Option<&str>,
        tag: &str,
    ) -> Option<&ChildDescriptor> {
        self.get(parent).and_then(|d| d.child(namespace, tag))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The registry of every XML-DSig element type, built on first use.
///
/// Panics if the element tables are inconsistent.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| match Registry::build(ELEMENT_SPECS) {
        Ok(registry) => {
            log::debug!("built XML-DSig registry with {} element types", registry.len());
            registry
        }
        Err(e) => panic!("{}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DS_NAMESPACE;

    static DUPLICATE_FIELD: ElementSpec = ElementSpec {
        element: ElementType::Transforms,
        tag: "Transforms",
        namespace: DS_NAMESPACE,
        attributes: &[],
        children: &[
            ChildSpec {
                field: "transform",
                cardinality: Cardinality::List,
                element: ElementType::Transform,
            },
            ChildSpec {
                field: "transform",
                cardinality: Cardinality::Single,
                element: ElementType::XPath,
            },
        ],
        child_order: &["transform"],
    };

    static UNDECLARED_ORDER: ElementSpec = ElementSpec {
        element: ElementType::Transforms,
        tag: "Transforms",
        namespace: DS_NAMESPACE,
        attributes: &[],
        children: &[ChildSpec {
            field: "transform",
            cardinality: Cardinality::List,
            element: ElementType::Transform,
        }],
        child_order: &["transform", "xpath"],
    };

    static ATTRIBUTE_CLASH: ElementSpec = ElementSpec {
        element: ElementType::Transforms,
        tag: "Transforms",
        namespace: DS_NAMESPACE,
        attributes: &[AttributeSpec {
            name: "Transform",
            field: "transform",
        }],
        children: &[ChildSpec {
            field: "transform",
            cardinality: Cardinality::List,
            element: ElementType::Transform,
        }],
        child_order: &["transform"],
    };

    static PARTIAL_ORDER: ElementSpec = ElementSpec {
        element: ElementType::KeyValue,
        tag: "KeyValue",
        namespace: DS_NAMESPACE,
        attributes: &[],
        children: &[
            ChildSpec {
                field: "rsa_key_value",
                cardinality: Cardinality::Optional,
                element: ElementType::RSAKeyValue,
            },
            ChildSpec {
                field: "dsa_key_value",
                cardinality: Cardinality::Optional,
                element: ElementType::DSAKeyValue,
            },
        ],
        child_order: &["dsa_key_value"],
    };

    fn assert_conflict(result: Result<Registry>, expected_element: &str) {
        match result {
            Err(Error::DescriptorConflict { element, .. }) => {
                assert_eq!(element, expected_element)
            }
            other => panic!("expected descriptor conflict, got {:?}", other),
        }
    }

    #[test]
    fn registry_holds_every_element_type() {
        let _ = pretty_env_logger::try_init();

        let registry = registry();
        assert_eq!(registry.len(), ElementType::ALL.len());
        for element in ElementType::ALL {
            let descriptor = registry.descriptor(*element);
            assert_eq!(descriptor.element(), *element);
            assert_eq!(descriptor.namespace(), DS_NAMESPACE);
            assert_eq!(
                registry.element_for(Some(DS_NAMESPACE), descriptor.tag()),
                Some(*element)
            );
        }
    }

    #[test]
    fn child_lookup_by_qualified_tag() {
        let child = registry()
            .child(ElementType::Signature, Some(DS_NAMESPACE), "KeyInfo")
            .unwrap();
        assert_eq!(child.field, "key_info");
        assert_eq!(child.cardinality, Cardinality::Optional);
        assert_eq!(child.element, ElementType::KeyInfo);

        let object = registry()
            .child(ElementType::Signature, Some(DS_NAMESPACE), "Object")
            .unwrap();
        assert_eq!(object.cardinality, Cardinality::List);

        assert!(registry()
            .child(ElementType::Signature, Some("urn:other"), "KeyInfo")
            .is_none());
        assert!(registry()
            .child(ElementType::Signature, None, "KeyInfo")
            .is_none());
        assert!(registry()
            .child(ElementType::Signature, Some(DS_NAMESPACE), "Reference")
            .is_none());
    }

    #[test]
    fn attribute_names_map_both_ways() {
        let descriptor = registry().descriptor(ElementType::DigestMethod);
        assert_eq!(descriptor.attribute_field("Algorithm"), Some("algorithm"));
        assert_eq!(descriptor.attribute_name("algorithm"), Some("Algorithm"));
        assert_eq!(descriptor.attribute_field("algorithm"), None);

        let reference = registry().descriptor(ElementType::Reference);
        assert_eq!(
            reference.attributes().collect::<Vec<_>>(),
            vec![("Id", "id"), ("URI", "uri"), ("Type", "ref_type")]
        );
    }

    #[test]
    fn child_order_follows_schema() {
        let signature = registry().descriptor(ElementType::Signature);
        assert_eq!(
            signature.child_order(),
            &["signed_info", "signature_value", "key_info", "object"]
        );
        assert_eq!(
            signature.qualified_name(),
            "{http://www.w3.org/2000/09/xmldsig#}Signature"
        );

        let key_info = registry().descriptor(ElementType::KeyInfo);
        assert_eq!(
            key_info.child_order(),
            &[
                "key_name",
                "key_value",
                "retrieval_method",
                "x509_data",
                "pgp_data",
                "spki_data",
                "mgmt_data"
            ]
        );
        assert_eq!(
            key_info.child_by_field("x509_data").map(|c| c.tag),
            Some("X509Data")
        );
    }

    #[test]
    fn rejects_duplicate_child_field() {
        assert_conflict(
            Registry::build(&[
                &DUPLICATE_FIELD,
                ElementType::Transform.spec(),
                ElementType::XPath.spec(),
            ]),
            "Transforms",
        );
    }

    #[test]
    fn rejects_undeclared_child_order_field() {
        assert_conflict(
            Registry::build(&[
                &UNDECLARED_ORDER,
                ElementType::Transform.spec(),
                ElementType::XPath.spec(),
            ]),
            "Transforms",
        );
    }

    #[test]
    fn rejects_attribute_and_child_sharing_a_field() {
        assert_conflict(
            Registry::build(&[
                &ATTRIBUTE_CLASH,
                ElementType::Transform.spec(),
                ElementType::XPath.spec(),
            ]),
            "Transforms",
        );
    }

    #[test]
    fn rejects_unregistered_child_type() {
        assert_conflict(
            Registry::build(&[ElementType::Transforms.spec()]),
            "Transforms",
        );
    }

    #[test]
    fn rejects_duplicate_element_type() {
        assert_conflict(
            Registry::build(&[
                ElementType::XPath.spec(),
                ElementType::XPath.spec(),
            ]),
            "XPath",
        );
    }

    #[test]
    fn unordered_children_are_serialized_last() {
        let registry = Registry::build(&[
            &PARTIAL_ORDER,
            ElementType::RSAKeyValue.spec(),
            ElementType::Modulus.spec(),
            ElementType::Exponent.spec(),
            ElementType::DSAKeyValue.spec(),
            ElementType::DsaP.spec(),
            ElementType::DsaQ.spec(),
            ElementType::DsaG.spec(),
            ElementType::DsaY.spec(),
            ElementType::DsaJ.spec(),
            ElementType::Seed.spec(),
            ElementType::PgenCounter.spec(),
        ])
        .unwrap();
        assert_eq!(
            registry.descriptor(ElementType::KeyValue).child_order(),
            &["dsa_key_value", "rsa_key_value"]
        );
    }
}
