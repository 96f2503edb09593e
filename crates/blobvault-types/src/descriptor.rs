use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::DescriptorError;

/// Metadata describing a blob held by the content store.
///
/// A descriptor is an immutable value: the digest is the blob's canonical
/// content address, `size` its byte length, and `media_type` the wire type
/// of its payload. Caches and stores treat the whole thing as opaque apart
/// from the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub media_type: String,
    pub size: u64,
    pub digest: Digest,
}

impl Descriptor {
    /// Create a descriptor.
    pub fn new(media_type: impl Into<String>, size: u64, digest: Digest) -> Self {
        Self {
            media_type: media_type.into(),
            size,
            digest,
        }
    }

    /// Check that the descriptor is well-formed: its digest must pass
    /// [`Digest::validate`] and the media type must be non-empty.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        self.digest.validate()?;
        if self.media_type.is_empty() {
            return Err(DescriptorError::EmptyMediaType);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Algorithm;
    use crate::error::DigestError;

    fn descriptor_for(content: &[u8]) -> Descriptor {
        Descriptor::new(
            "application/octet-stream",
            content.len() as u64,
            Algorithm::Sha256.digest(content),
        )
    }

    #[test]
    fn well_formed_descriptor_validates() {
        assert_eq!(descriptor_for(b"some blob").validate(), Ok(()));
    }

    #[test]
    fn empty_media_type_is_rejected() {
        let mut desc = descriptor_for(b"blob");
        desc.media_type.clear();
        assert_eq!(desc.validate(), Err(DescriptorError::EmptyMediaType));
    }

    #[test]
    fn malformed_digest_is_rejected() {
        let mut desc = descriptor_for(b"blob");
        desc.digest = Digest::new(Algorithm::Sha256, "nothex");
        assert!(matches!(
            desc.validate(),
            Err(DescriptorError::Digest(DigestError::WrongLength { .. }))
        ));
    }

    #[test]
    fn empty_digest_is_rejected() {
        let mut desc = descriptor_for(b"blob");
        desc.digest = Digest::new(Algorithm::Sha256, "");
        assert_eq!(
            desc.validate(),
            Err(DescriptorError::Digest(DigestError::Empty))
        );
    }

    #[test]
    fn serde_uses_wire_field_names() {
        let desc = descriptor_for(b"wire");
        let json = serde_json::to_value(&desc).unwrap();
        assert!(json.get("mediaType").is_some());
        assert!(json.get("size").is_some());
        assert_eq!(
            json.get("digest").unwrap().as_str().unwrap(),
            desc.digest.to_string()
        );

        let parsed: Descriptor = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, desc);
    }
}
