//! On-disk shape of one history entry in `registry.json`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use cs_core::{ClipboardContent, ClipboardEntry, MimeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PayloadEncoding {
    Base64,
}

/// Text entries are embedded; anything else is referenced by content hash
/// and its bytes live in a separate payload file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EntryRecord {
    pub mimetype: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<PayloadEncoding>,
}

/// How a record's bytes are recovered.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RecordBody {
    Inline(ClipboardContent),
    External { mime: MimeType, hash: String },
}

impl EntryRecord {
    pub fn from_entry(entry: &ClipboardEntry) -> Self {
        let content = entry.content();
        let mut record = Self {
            mimetype: content.mime.to_string(),
            favorite: entry.is_favorite(),
            contents: None,
            payload: None,
            encoding: None,
        };

        if content.is_text() {
            match std::str::from_utf8(&content.bytes) {
                Ok(text) => record.contents = Some(text.to_owned()),
                Err(_) => {
                    record.payload = Some(STANDARD.encode(&content.bytes));
                    record.encoding = Some(PayloadEncoding::Base64);
                }
            }
        } else {
            record.payload = Some(content.content_hash());
        }
        record
    }

    /// `None` for records that carry neither text nor a usable reference.
    pub fn body(&self) -> Option<RecordBody> {
        let mime = MimeType::from(self.mimetype.as_str());

        if let Some(text) = &self.contents {
            return Some(RecordBody::Inline(ClipboardContent::new(
                mime,
                text.clone().into_bytes(),
            )));
        }

        let payload = self.payload.as_ref()?;
        if self.encoding == Some(PayloadEncoding::Base64) {
            let bytes = STANDARD.decode(payload).ok()?;
            return Some(RecordBody::Inline(ClipboardContent::new(mime, bytes)));
        }

        is_content_hash(payload).then(|| RecordBody::External {
            mime,
            hash: payload.clone(),
        })
    }
}

/// A hex BLAKE3 digest, safe to use as a file name.
pub(crate) fn is_content_hash(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|b| b.is_ascii_hexdigit())
}
