use std::fmt;
use std::path::PathBuf;

/// Boxed cause carried by [`Error::ResourceLoad`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the resource library and the state machine.
///
/// Every variant carries the offending resource name/type or state names so
/// embedders can log actionable diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No loader is registered for the requested resource type.
    #[error("no loader registered for resource type `{type_name}`")]
    NoLoaderRegistered { type_name: &'static str },

    /// None of the path-resolution candidates exists.
    #[error("resource `{name}` not found (tried {})", Candidates(.candidates))]
    ResourceNotFound {
        name: String,
        candidates: Vec<PathBuf>,
    },

    /// The type-specific load step failed.
    #[error("could not load `{type_name}` from `{}`", .path.display())]
    ResourceLoad {
        type_name: &'static str,
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// A state transition was refused.
    #[error("invalid state transition from `{from}` to `{to}`: {reason}")]
    InvalidStateTransition {
        from: String,
        to: String,
        reason: String,
    },
}

struct Candidates<'a>(&'a [PathBuf]);

impl fmt::Display for Candidates<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{}`", path.display())?;
        }
        Ok(())
    }
}
