macro_rules! ds_child_type {
    (single $ty:ident) => { Option<$ty> };
    (optional $ty:ident) => { Option<$ty> };
    (list $ty:ident) => { Vec<$ty> };
}

macro_rules! ds_cardinality {
    (single) => {
        $crate::descriptor::Cardinality::Single
    };
    (optional) => {
        $crate::descriptor::Cardinality::Optional
    };
    (list) => {
        $crate::descriptor::Cardinality::List
    };
}

/// Declares the element table: one struct, one `ElementSpec` and one
/// `DsElement` impl per entry, plus the `ElementType` enum covering them all.
///
/// Children are listed in schema order, which is also their serialization
/// order.
macro_rules! ds_elements {
    ($(
        $(#[$meta:meta])*
        $name:ident = $tag:literal {
            attributes { $($attr:ident = $attr_name:literal),* $(,)? }
            children { $($child:ident : $card:ident $child_ty:ident),* $(,)? }
        }
    )*) => {
        /// Every element type in the XML-DSig namespace modelled by this crate.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ElementType {
            $($name),*
        }

        impl ElementType {
            pub const ALL: &'static [ElementType] = &[$(ElementType::$name),*];

            pub fn tag(self) -> &'static str {
                self.spec().tag
            }

            pub fn descriptor(self) -> &'static $crate::descriptor::ElementDescriptor {
                $crate::descriptor::registry().descriptor(self)
            }

            pub(crate) fn spec(self) -> &'static $crate::descriptor::ElementSpec {
                match self {
                    $(ElementType::$name => &$name::SPEC),*
                }
            }
        }

        pub(crate) static ELEMENT_SPECS: &[&$crate::descriptor::ElementSpec] =
            &[$(&$name::SPEC),*];

        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct $name {
                $(pub $attr: Option<String>,)*
                $(pub $child: ds_child_type!($card $child_ty),)*
                pub extensible: $crate::element::ExtensibleElement,
            }

            impl $name {
                const SPEC: $crate::descriptor::ElementSpec = $crate::descriptor::ElementSpec {
                    element: ElementType::$name,
                    tag: $tag,
                    namespace: $crate::DS_NAMESPACE,
                    attributes: &[$($crate::descriptor::AttributeSpec {
                        name: $attr_name,
                        field: stringify!($attr),
                    }),*],
                    children: &[$($crate::descriptor::ChildSpec {
                        field: stringify!($child),
                        cardinality: ds_cardinality!($card),
                        element: ElementType::$child_ty,
                    }),*],
                    child_order: &[$(stringify!($child)),*],
                };
            }

            impl $crate::element::DsElement for $name {
                const TYPE: ElementType = ElementType::$name;

                fn extensible(&self) -> &$crate::element::ExtensibleElement {
                    &self.extensible
                }

                fn extensible_mut(&mut self) -> &mut $crate::element::ExtensibleElement {
                    &mut self.extensible
                }

                fn attribute(&self, field: &str) -> Option<&str> {
                    match field {
                        $(stringify!($attr) => self.$attr.as_deref(),)*
                        _ => None,
                    }
                }

                fn set_attribute(&mut self, field: &str, value: String) -> Result<(), String> {
                    match field {
                        $(stringify!($attr) => {
                            self.$attr = Some(value);
                            Ok(())
                        })*
                        _ => Err(value),
                    }
                }

                fn accept_child(
                    &mut self,
                    field: &str,
                    node: $crate::element::ExtensionElement,
                ) -> Result<(), $crate::element::ExtensionElement> {
                    match field {
                        $(stringify!($child) => {
                            $crate::element::ChildSlot::accept(&mut self.$child, node)
                        })*
                        _ => Err(node),
                    }
                }

                fn child_elements(&self, field: &str) -> Vec<$crate::element::ExtensionElement> {
                    match field {
                        $(stringify!($child) => {
                            $crate::element::ChildSlot::elements(&self.$child)
                        })*
                        _ => vec![],
                    }
                }
            }
        )*
    };
}

pub mod ds;
