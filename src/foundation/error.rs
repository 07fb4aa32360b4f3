/// Crate-wide result alias.
pub type NglResult<T> = Result<T, NglError>;

/// Errors produced by the generator, the node/scene bindings and the player.
#[derive(thiserror::Error, Debug)]
pub enum NglError {
    /// The node specification document is malformed or incomplete.
    #[error("spec format error: {0}")]
    SpecFormat(String),

    /// A node name does not resolve in the fixed node type registry.
    #[error("unknown node type: {0}")]
    UnknownType(String),

    /// Two generated definitions map to the same type or file name.
    #[error("name collision: {0}")]
    NameCollision(String),

    /// A native node or scene call returned a non-zero status.
    #[error("native call error: '{key}' returned status {status}")]
    NativeCall {
        /// Field name (or operation name) passed to the native call.
        key: String,
        /// Raw status code returned by the engine.
        status: i32,
    },

    /// Renderer configuration was rejected.
    #[error("configure error: status {status}: {message}")]
    Configure {
        /// Raw status code returned by the renderer.
        status: i32,
        /// Human readable context.
        message: String,
    },

    /// Playback worker failure (worker gone, command queue closed).
    #[error("player error: {0}")]
    Player(String),

    /// Filesystem failure while reading specs or writing generated files.
    #[error("io error: {0}")]
    Io(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NglError {
    /// Build a [`NglError::SpecFormat`].
    pub fn spec_format(msg: impl Into<String>) -> Self {
        Self::SpecFormat(msg.into())
    }

    /// Build a [`NglError::UnknownType`].
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    /// Build a [`NglError::NameCollision`].
    pub fn name_collision(msg: impl Into<String>) -> Self {
        Self::NameCollision(msg.into())
    }

    /// Build a [`NglError::NativeCall`].
    pub fn native_call(key: impl Into<String>, status: i32) -> Self {
        Self::NativeCall {
            key: key.into(),
            status,
        }
    }

    /// Build a [`NglError::Configure`].
    pub fn configure(status: i32, msg: impl Into<String>) -> Self {
        Self::Configure {
            status,
            message: msg.into(),
        }
    }

    /// Build a [`NglError::Player`].
    pub fn player(msg: impl Into<String>) -> Self {
        Self::Player(msg.into())
    }

    /// Build a [`NglError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`NglError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Map a native status code to a result, `0` meaning success.
pub(crate) fn check_status(key: &str, status: i32) -> NglResult<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(NglError::native_call(key, status))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
