use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MimeType(pub String);

impl MimeType {
    pub fn text_plain() -> Self {
        Self("text/plain".into())
    }
    pub fn text_html() -> Self {
        Self("text/html".into())
    }
    pub fn image_png() -> Self {
        Self("image/png".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `type/subtype` in lowercase, without parameters.
    pub fn essence(&self) -> String {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    pub fn is_text_plain(&self) -> bool {
        self.essence() == "text/plain"
    }

    pub fn is_image(&self) -> bool {
        self.essence().starts_with("image/")
    }

    /// A MIME type is well formed when it has a non-empty type and subtype
    /// and no whitespace in the essence.
    pub fn is_well_formed(&self) -> bool {
        let essence = self.essence();
        match essence.split_once('/') {
            Some((ty, subtype)) => {
                !ty.is_empty()
                    && !subtype.is_empty()
                    && !subtype.contains('/')
                    && !essence.chars().any(char::is_whitespace)
            }
            None => false,
        }
    }

    /// Probe order used when nothing else is configured: plain text first,
    /// then image formats, then rich text.
    pub fn default_priority() -> Vec<MimeType> {
        [
            "text/plain",
            "image/gif",
            "image/png",
            "image/jpg",
            "image/jpeg",
            "image/webp",
            "image/svg+xml",
            "text/html",
        ]
        .into_iter()
        .map(MimeType::from)
        .collect()
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MimeType {
    fn from(s: &str) -> Self {
        MimeType(s.to_string())
    }
}

impl FromStr for MimeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mime = MimeType(s.trim().to_string());
        if !mime.is_well_formed() {
            anyhow::bail!("invalid mime type: {s:?}");
        }
        Ok(mime)
    }
}
