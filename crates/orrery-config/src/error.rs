//! Error types for config and system-manifest persistence.

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read `config.ron` from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write `config.ron` to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}

/// Errors from loading, saving, or validating the system manifest.
///
/// Unlike [`ConfigError`], two of these are semantic: a manifest can be
/// well-formed RON and still describe an impossible hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// Failed to read `system.ron` from disk.
    #[error("failed to read system manifest: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write `system.ron` to disk.
    #[error("failed to write system manifest: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse system manifest: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize the manifest to RON.
    #[error("failed to serialize system manifest: {0}")]
    SerializeError(#[source] ron::Error),

    /// Two bodies share a name.
    #[error("duplicate body name: {0}")]
    DuplicateBody(String),

    /// A body names a parent that is not declared before it.
    #[error("body '{child}' orbits '{parent}', which must be declared first")]
    UndeclaredParent { child: String, parent: String },
}
