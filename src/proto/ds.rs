//! The XML-DSig element types, `http://www.w3.org/2000/09/xmldsig#`.
//!
//! Cardinalities follow the W3C schema: `single` children are required by
//! the schema (but may still be absent on an instance), `optional` ones may
//! occur at most once, `list` ones any number of times.

ds_elements! {
    /// The `ds:Signature` element.
    Signature = "Signature" {
        attributes { id = "Id" }
        children {
            signed_info: single SignedInfo,
            signature_value: single SignatureValue,
            key_info: optional KeyInfo,
            object: list Object,
        }
    }

    /// The `ds:SignedInfo` element.
    SignedInfo = "SignedInfo" {
        attributes { id = "Id" }
        children {
            canonicalization_method: single CanonicalizationMethod,
            signature_method: single SignatureMethod,
            reference: list Reference,
        }
    }

    CanonicalizationMethod = "CanonicalizationMethod" {
        attributes { algorithm = "Algorithm" }
        children {}
    }

    SignatureMethod = "SignatureMethod" {
        attributes { algorithm = "Algorithm" }
        children { hmac_output_length: optional HMACOutputLength }
    }

    HMACOutputLength = "HMACOutputLength" {
        attributes {}
        children {}
    }

    /// The `ds:Reference` element.
    Reference = "Reference" {
        attributes { id = "Id", uri = "URI", ref_type = "Type" }
        children {
            transforms: optional Transforms,
            digest_method: single DigestMethod,
            digest_value: single DigestValue,
        }
    }

    Transforms = "Transforms" {
        attributes {}
        children { transform: list Transform }
    }

    Transform = "Transform" {
        attributes { algorithm = "Algorithm" }
        children { xpath: list XPath }
    }

    XPath = "XPath" {
        attributes {}
        children {}
    }

    DigestMethod = "DigestMethod" {
        attributes { algorithm = "Algorithm" }
        children {}
    }

    /// Base64 digest of the referenced data; empty in a template.
    DigestValue = "DigestValue" {
        attributes {}
        children {}
    }

    /// Base64 signature over the canonicalized `SignedInfo`; empty in a template.
    SignatureValue = "SignatureValue" {
        attributes { id = "Id" }
        children {}
    }

    /// The `ds:KeyInfo` element.
    KeyInfo = "KeyInfo" {
        attributes { id = "Id" }
        children {
            key_name: list KeyName,
            key_value: list KeyValue,
            retrieval_method: list RetrievalMethod,
            x509_data: list X509Data,
            pgp_data: list PGPData,
            spki_data: list SPKIData,
            mgmt_data: list MgmtData,
        }
    }

    KeyName = "KeyName" {
        attributes {}
        children {}
    }

    /// A single public key value. Key types outside this namespace, such as
    /// `dsig11:ECKeyValue`, are kept as extension elements.
    KeyValue = "KeyValue" {
        attributes {}
        children {
            rsa_key_value: optional RSAKeyValue,
            dsa_key_value: optional DSAKeyValue,
        }
    }

    RSAKeyValue = "RSAKeyValue" {
        attributes {}
        children {
            modulus: single Modulus,
            exponent: single Exponent,
        }
    }

    Modulus = "Modulus" {
        attributes {}
        children {}
    }

    Exponent = "Exponent" {
        attributes {}
        children {}
    }

    DSAKeyValue = "DSAKeyValue" {
        attributes {}
        children {
            p: optional DsaP,
            q: optional DsaQ,
            g: optional DsaG,
            y: single DsaY,
            j: optional DsaJ,
            seed: optional Seed,
            pgen_counter: optional PgenCounter,
        }
    }

    DsaP = "P" {
        attributes {}
        children {}
    }

    DsaQ = "Q" {
        attributes {}
        children {}
    }

    DsaG = "G" {
        attributes {}
        children {}
    }

    DsaY = "Y" {
        attributes {}
        children {}
    }

    DsaJ = "J" {
        attributes {}
        children {}
    }

    Seed = "Seed" {
        attributes {}
        children {}
    }

    PgenCounter = "PgenCounter" {
        attributes {}
        children {}
    }

    RetrievalMethod = "RetrievalMethod" {
        attributes { uri = "URI", retrieval_type = "Type" }
        children { transforms: optional Transforms }
    }

    X509Data = "X509Data" {
        attributes {}
        children {
            x509_issuer_serial: list X509IssuerSerial,
            x509_ski: list X509SKI,
            x509_subject_name: list X509SubjectName,
            x509_certificate: list X509Certificate,
            x509_crl: list X509CRL,
        }
    }

    X509IssuerSerial = "X509IssuerSerial" {
        attributes {}
        children {
            x509_issuer_name: single X509IssuerName,
            x509_serial_number: single X509SerialNumber,
        }
    }

    X509IssuerName = "X509IssuerName" {
        attributes {}
        children {}
    }

    X509SerialNumber = "X509SerialNumber" {
        attributes {}
        children {}
    }

    X509SKI = "X509SKI" {
        attributes {}
        children {}
    }

    X509SubjectName = "X509SubjectName" {
        attributes {}
        children {}
    }

    /// A base64 DER certificate.
    X509Certificate = "X509Certificate" {
        attributes {}
        children {}
    }

    X509CRL = "X509CRL" {
        attributes {}
        children {}
    }

    PGPData = "PGPData" {
        attributes {}
        children {
            pgp_key_id: optional PGPKeyID,
            pgp_key_packet: optional PGPKeyPacket,
        }
    }

    PGPKeyID = "PGPKeyID" {
        attributes {}
        children {}
    }

    PGPKeyPacket = "PGPKeyPacket" {
        attributes {}
        children {}
    }

    SPKIData = "SPKIData" {
        attributes {}
        children { spki_sexp: list SPKISexp }
    }

    SPKISexp = "SPKISexp" {
        attributes {}
        children {}
    }

    MgmtData = "MgmtData" {
        attributes {}
        children {}
    }

    /// Arbitrary signed content; anything inside it is kept as extension
    /// elements and text.
    Object = "Object" {
        attributes { id = "Id", mime_type = "MimeType", encoding = "Encoding" }
        children {}
    }
}
