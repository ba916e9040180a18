//! Response definitions
//!
//! Represents the result of a successful command.

use std::fmt;

/// A response returned by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Command completed with nothing to report (`init`)
    Done,

    /// `step` appended this value
    Appended(u32),

    /// Full sequence contents (`getData`, `reset`)
    Data(Vec<u32>),
}

impl Response {
    /// The sequence carried by a `Data` response
    pub fn data(&self) -> Option<&[u32]> {
        match self {
            Response::Data(values) => Some(values),
            _ => None,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Done => f.write_str("OK"),
            Response::Appended(value) => write!(f, "OK {}", value),
            Response::Data(values) => write!(f, "{:?}", values),
        }
    }
}
