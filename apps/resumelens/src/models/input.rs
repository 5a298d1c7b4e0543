use bytes::Bytes;

/// Resume payload as supplied by the user: pasted/decoded text, or the raw
/// bytes of a document the scoring service will read itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeContent {
    Text(String),
    Binary(Bytes),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeInput {
    pub content: ResumeContent,
    pub source_name: String,
}

impl ResumeInput {
    pub fn text(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            content: ResumeContent::Text(text.into()),
            source_name: source_name.into(),
        }
    }

    pub fn binary(source_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content: ResumeContent::Binary(bytes.into()),
            source_name: source_name.into(),
        }
    }

    /// Empty text (after trimming) or a zero-byte document.
    pub fn is_blank(&self) -> bool {
        match &self.content {
            ResumeContent::Text(text) => text.trim().is_empty(),
            ResumeContent::Binary(bytes) => bytes.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            ResumeContent::Text(text) => Some(text.as_str()),
            ResumeContent::Binary(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        match &self.content {
            ResumeContent::Text(text) => Bytes::from(text.clone()),
            ResumeContent::Binary(bytes) => bytes.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDescriptionInput {
    pub text: String,
}

impl JobDescriptionInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
