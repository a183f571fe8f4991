use serde::{ser::Serializer, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Extraction failed for {kind} in {class} ({member}): {reason}")]
    Extraction {
        kind: String,
        class: String,
        member: String,
        reason: String,
    },

    #[error("Generation failed for {descriptor}: {message}")]
    Generation { descriptor: String, message: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Invalid source declarations: {0}")]
    InvalidSource(String),
}

impl Error {
    pub(crate) fn extraction(
        kind: impl ToString,
        class: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::Extraction {
            kind: kind.to_string(),
            class: class.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
