use std::{io, path::PathBuf};

/// Every failure the encoder can run into.
///
/// All of them are I/O failures. End-of-stream is not an error:
/// it simply ends the [token sequence](crate::token::TokenIterator).
#[derive(Debug, thiserror::Error)]
pub enum LiteralError {
    #[error("could not open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not determine the size of {}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("write failed")]
    Write {
        #[source]
        source: io::Error,
    },
}

impl LiteralError {
    pub fn read(source: io::Error) -> Self {
        Self::Read { source }
    }

    pub fn write(source: io::Error) -> Self {
        Self::Write { source }
    }
}
