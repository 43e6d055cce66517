use std::fmt;

/// Error type for the configuration and batch layers.
/// The model client, guard, strategies and judge never produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Reading or writing a file failed
    Io(String)
  , /// JSON could not be parsed or produced
    Json(String)
  , /// Input file has the wrong shape
    InvalidInput(String)
  , /// Produced answers failed the output contract
    Validation(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Json(msg) => {
              write!(f, "JSON error: {}", msg)
            }
          , Error::InvalidInput(msg) => {
              write!(f, "Invalid input: {}", msg)
            }
          , Error::Validation(msg) => {
              write!(f, "Validation failed: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::Json(e.to_string())
    }
}
