use std::fmt;
use std::io;

/// An error produced while configuring or rendering a report.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Template(liquid::Error),
    Internal(String),
    MethodNotSupported(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Template(err) => Some(err),
            Error::Internal(_) => None,
            Error::MethodNotSupported(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "Report write failed: {}", err),
            Error::Json(err) => write!(f, "Report data serialization failed: {}", err),
            Error::Template(err) => write!(f, "Report template failed: {}", err),
            Error::Internal(err) => write!(f, "Internal reporter error: {}", err),
            Error::MethodNotSupported(method) => {
                write!(f, "Method '{}' not supported", method)
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<liquid::Error> for Error {
    fn from(err: liquid::Error) -> Self {
        Error::Template(err)
    }
}
