use std::fmt;

use crate::page::ElementId;

/// Failure reported by a page host while answering a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The handle does not name an element of the current page.
    UnknownElement(ElementId),
    /// Computed style could not be read for the element.
    StyleUnavailable {
        /// Element whose style read failed.
        element: ElementId,
        /// Host-supplied reason.
        reason: String,
    },
    /// The host could not enumerate the page at all.
    Unavailable(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "unknown element {id}"),
            Self::StyleUnavailable { element, reason } => {
                write!(f, "computed style unavailable for element {element}: {reason}")
            }
            Self::Unavailable(reason) => write!(f, "page host unavailable: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Whole-scan failure. No partial report accompanies it.
#[derive(Debug)]
pub enum ScanError {
    /// The page host failed before any element could be examined.
    Host(HostError),
    /// The async runtime backing a blocking scan could not be started.
    Runtime(std::io::Error),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(err) => write!(f, "scan failed: {err}"),
            Self::Runtime(err) => write!(f, "scan runtime error: {err}"),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

impl From<HostError> for ScanError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        Self::Runtime(err)
    }
}

impl From<ScanError> for napi::Error {
    fn from(err: ScanError) -> Self {
        napi::Error::new(napi::Status::GenericFailure, err.to_string())
    }
}
