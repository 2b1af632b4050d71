//! Unsigned `Signature` templates for a signer to fill in.

use xml::attribute::OwnedAttribute;
use xml::name::OwnedName;

use crate::codec;
use crate::element::ExtensionElement;
use crate::error::{Error, Result};
use crate::proto::ds::{
    CanonicalizationMethod, DigestMethod, DigestValue, KeyInfo, KeyValue, Reference, Signature,
    SignatureMethod, SignatureValue, SignedInfo, Transform, Transforms,
};
use crate::{CANONICAL_1_0_COMMENTS, DIGEST_SHA1, SIGNATURE_RSA_SHA1, TRANSFORM_ENVELOPED_SIGNATURE};

/// Namespace of the `AlgorithmSuite` configuration element.
pub const SUITE_NAMESPACE: &'static str = "urn:xmldsig-model:suite";

fn default_canonicalization() -> String {
    CANONICAL_1_0_COMMENTS.to_string()
}

fn default_signature() -> String {
    SIGNATURE_RSA_SHA1.to_string()
}

fn default_transform() -> String {
    TRANSFORM_ENVELOPED_SIGNATURE.to_string()
}

fn default_digest() -> String {
    DIGEST_SHA1.to_string()
}

/// The four algorithm identifiers a signature template carries.
///
/// `Default` gives the legacy identifiers (inclusive C14N with comments,
/// RSA-SHA1, enveloped signature, SHA1). SHA1 based algorithms are weak;
/// new signatures should set modern identifiers explicitly.
///
/// As a convenience for deployments that keep their algorithm choices in a
/// file, a suite can also be read from and written to a configuration
/// element of this crate's own making:
///
/// ```xml
/// <suite:AlgorithmSuite xmlns:suite="urn:xmldsig-model:suite"
///     Canonicalization="..." Signature="..." Transform="..." Digest="..."/>
/// ```
///
/// Omitted attributes keep their defaults. The format is not part of
/// XML-DSig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmSuite {
    #[serde(
        rename = "$attr:Canonicalization",
        default = "default_canonicalization"
    )]
    pub canonicalization: String,
    #[serde(rename = "$attr:Signature", default = "default_signature")]
    pub signature: String,
    #[serde(rename = "$attr:Transform", default = "default_transform")]
    pub transform: String,
    #[serde(rename = "$attr:Digest", default = "default_digest")]
    pub digest: String,
}

#[derive(Debug, Deserialize)]
struct SuiteDocument {
    #[serde(rename = "{urn:xmldsig-model:suite}suite:AlgorithmSuite")]
    suite: AlgorithmSuite,
}

impl Default for AlgorithmSuite {
    fn default() -> Self {
        AlgorithmSuite {
            canonicalization: default_canonicalization(),
            signature: default_signature(),
            transform: default_transform(),
            digest: default_digest(),
        }
    }
}

impl AlgorithmSuite {
    pub fn new<C, S, T, D>(canonicalization: C, signature: S, transform: T, digest: D) -> Self
    where
        C: Into<String>,
        S: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        AlgorithmSuite {
            canonicalization: canonicalization.into(),
            signature: signature.into(),
            transform: transform.into(),
            digest: digest.into(),
        }
    }

    pub fn with_canonicalization<S: Into<String>>(mut self, algorithm: S) -> Self {
        self.canonicalization = algorithm.into();
        self
    }

    pub fn with_signature<S: Into<String>>(mut self, algorithm: S) -> Self {
        self.signature = algorithm.into();
        self
    }

    pub fn with_transform<S: Into<String>>(mut self, algorithm: S) -> Self {
        self.transform = algorithm.into();
        self
    }

    pub fn with_digest<S: Into<String>>(mut self, algorithm: S) -> Self {
        self.digest = algorithm.into();
        self
    }

    /// Reads a suite from its configuration element.
    pub fn from_xml(source_xml: &str) -> Result<Self> {
        let events = xml::reader::EventReader::new_with_config(
            source_xml.as_bytes(),
            xml::ParserConfig::new()
                .ignore_comments(true)
                .trim_whitespace(true)
                .ignore_root_level_whitespace(true),
        )
        .into_iter()
        .filter(|e| {
            !matches!(
                e,
                Ok(xml::reader::XmlEvent::StartDocument { .. })
                    | Ok(xml::reader::XmlEvent::EndDocument)
            )
        })
        .collect::<Vec<_>>();
        if let Some(Err(e)) = events.iter().find(|e| e.is_err()) {
            return Err(Error::AlgorithmSuite(e.to_string()));
        }

        let document: SuiteDocument = match xml_serde::from_events(events.as_slice()) {
            Ok(d) => d,
            Err(e) => return Err(Error::AlgorithmSuite(e.to_string())),
        };
        Ok(document.suite)
    }

    /// Writes the suite as its configuration element.
    pub fn to_xml(&self) -> Result<String> {
        let mut node = ExtensionElement::new(OwnedName::qualified(
            "AlgorithmSuite",
            SUITE_NAMESPACE,
            Some("suite"),
        ));
        for (name, value) in [
            ("Canonicalization", &self.canonicalization),
            ("Signature", &self.signature),
            ("Transform", &self.transform),
            ("Digest", &self.digest),
        ] {
            node.attributes
                .push(OwnedAttribute::new(OwnedName::local(name), value.as_str()));
        }
        codec::tree_to_string(&node)
    }
}

/// Builds an unsigned `Signature` with one enveloped `Reference` to the
/// whole document (`URI=""`), empty `DigestValue` and `SignatureValue`, and
/// an empty `KeyValue` for the key material.
///
/// Only the four `Algorithm` attributes depend on `suite`; identifiers are
/// stored as given, without validation.
pub fn build_empty_signature(suite: &AlgorithmSuite) -> Signature {
    let reference = Reference {
        uri: Some(String::new()),
        transforms: Some(Transforms {
            transform: vec![Transform {
                algorithm: Some(suite.transform.clone()),
                ..Default::default()
            }],
            ..Default::default()
        }),
        digest_method: Some(DigestMethod {
            algorithm: Some(suite.digest.clone()),
            ..Default::default()
        }),
        digest_value: Some(DigestValue::default()),
        ..Default::default()
    };

    Signature {
        signed_info: Some(SignedInfo {
            canonicalization_method: Some(CanonicalizationMethod {
                algorithm: Some(suite.canonicalization.clone()),
                ..Default::default()
            }),
            signature_method: Some(SignatureMethod {
                algorithm: Some(suite.signature.clone()),
                ..Default::default()
            }),
            reference: vec![reference],
            ..Default::default()
        }),
        signature_value: Some(SignatureValue::default()),
        key_info: Some(KeyInfo {
            key_value: vec![KeyValue::default()],
            ..Default::default()
        }),
        ..Default::default()
    }
}
