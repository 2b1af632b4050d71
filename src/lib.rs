//! Typed object model for XML-DSig elements.
//!
//! Elements are parsed with [`from_str`] and written with [`to_string`];
//! content the model does not know is kept and written back. Unsigned
//! signature templates come from [`build_empty_signature`], configured by an
//! [`AlgorithmSuite`]. The suite's XML configuration element
//! ([`AlgorithmSuite::from_xml`], [`AlgorithmSuite::to_xml`]) is a
//! convenience format of this crate, not part of XML-DSig.

#[macro_use]
extern crate serde_derive;

pub mod codec;
pub mod descriptor;
pub mod element;
pub mod error;
pub mod proto;
pub mod template;

pub use codec::{decode, encode, from_str, to_string};
pub use descriptor::{registry, Cardinality, ChildDescriptor, ElementDescriptor, Registry};
pub use element::{DsElement, ExtensibleElement, ExtensionElement};
pub use error::{Error, Result};
pub use proto::ds::ElementType;
pub use template::{build_empty_signature, AlgorithmSuite, SUITE_NAMESPACE};

pub const DS_NAMESPACE: &'static str = "http://www.w3.org/2000/09/xmldsig#";
pub const DS_PREFIX: &'static str = "ds";

pub const ENCODING_BASE64: &'static str = "http://www.w3.org/2000/09/xmldsig#base64";

pub const DIGEST_SHA1: &'static str = "http://www.w3.org/2000/09/xmldsig#sha1";
pub const DIGEST_SHA256: &'static str = "http://www.w3.org/2001/04/xmlenc#sha256";
pub const DIGEST_SHA224: &'static str = "http://www.w3.org/2001/04/xmldsig-more#sha224";
pub const DIGEST_SHA384: &'static str = "http://www.w3.org/2001/04/xmldsig-more#sha384";
pub const DIGEST_SHA512: &'static str = "http://www.w3.org/2001/04/xmlenc#sha512";

pub const TRANSFORM_ENVELOPED_SIGNATURE: &'static str =
    "http://www.w3.org/2000/09/xmldsig#enveloped-signature";
pub const TRANSFORM_XSLT: &'static str = "http://www.w3.org/TR/1999/REC-xslt-19991116";
pub const TRANSFORM_XPATH: &'static str = "http://www.w3.org/TR/1999/REC-xpath-19991116";

pub const CANONICAL_1_0: &'static str = "http://www.w3.org/TR/2001/REC-xml-c14n-20010315";
pub const CANONICAL_1_0_COMMENTS: &'static str =
    "http://www.w3.org/TR/2001/REC-xml-c14n-20010315#WithComments";
pub const CANONICAL_1_1: &'static str = "http://www.w3.org/2006/10/xml-c14n11";
pub const CANONICAL_1_1_COMMENTS: &'static str =
    "http://www.w3.org/2006/10/xml-c14n11#WithComments";
pub const CANONICAL_EXCLUSIVE_1_0: &'static str = "http://www.w3.org/2001/10/xml-exc-c14n#";
pub const CANONICAL_EXCLUSIVE_1_0_COMMENTS: &'static str =
    "http://www.w3.org/2001/10/xml-exc-c14n#WithComments";

pub const SIGNATURE_HMAC_SHA1: &'static str = "http://www.w3.org/2000/09/xmldsig#hmac-sha1";
pub const SIGNATURE_RSA_MD5: &'static str = "http://www.w3.org/2001/04/xmldsig-more#rsa-md5";
pub const SIGNATURE_RSA_SHA1: &'static str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
pub const SIGNATURE_RSA_SHA224: &'static str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha224";
pub const SIGNATURE_RSA_SHA256: &'static str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";
pub const SIGNATURE_RSA_SHA384: &'static str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";
pub const SIGNATURE_RSA_SHA512: &'static str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512";
pub const SIGNATURE_RSA_RIPEMD160: &'static str =
    "http://www.w3.org/2001/04/xmldsig-more#rsa-ripemd160";
pub const SIGNATURE_ECDSA_SHA1: &'static str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha1";
pub const SIGNATURE_ECDSA_SHA224: &'static str =
    "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha224";
pub const SIGNATURE_ECDSA_SHA256: &'static str =
    "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256";
pub const SIGNATURE_ECDSA_SHA384: &'static str =
    "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha384";
pub const SIGNATURE_ECDSA_SHA512: &'static str =
    "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha512";
pub const SIGNATURE_ECDSA_RIPEMD160: &'static str =
    "http://www.w3.org/2001/04/xmldsig-more#ecdsa-ripemd160";
pub const SIGNATURE_DSA_SHA1: &'static str = "http://www.w3.org/2000/09/xmldsig#dsa-sha1";
pub const SIGNATURE_DSA_SHA256: &'static str = "http://www.w3.org/2009/xmldsig11#dsa-sha256";
