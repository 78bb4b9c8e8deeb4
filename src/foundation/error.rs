/// Convenience result type used across beatline.
pub type BeatlineResult<T> = Result<T, BeatlineError>;

/// Top-level error taxonomy.
///
/// Everything except [`BeatlineError::Render`] is raised while a scene is being built or
/// scheduled, before any frame is produced.
#[derive(thiserror::Error, Debug)]
pub enum BeatlineError {
    /// Invalid geometric or style parameter, or an ownership violation in the element tree.
    #[error("construction error: {0}")]
    Construction(String),

    /// A layout call or animation step referred to an element (or scene) that does not exist.
    #[error("reference error: {0}")]
    Reference(String),

    /// Invalid beat or step (empty beat, negative duration, bad lag ratio).
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Failure reported while rasterizing or encoding frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeatlineError {
    /// Build a [`BeatlineError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`BeatlineError::Reference`] value.
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }

    /// Build a [`BeatlineError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`BeatlineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BeatlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
