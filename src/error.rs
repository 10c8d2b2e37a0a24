// SPDX-License-Identifier: MPL-2.0
use crate::diagnostics::ExportError;
use std::fmt;

/// Errors raised by the configuration, export and CLI layers.
///
/// Store operations never fail; this type only covers I/O around it.
#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Export(String),
    Cli(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
            Error::Cli(e) => write!(f, "CLI Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Cli(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn toml_parse_error_becomes_config_variant() {
        let parse_err = toml::from_str::<crate::config::Config>("max_visible = \"many\"")
            .expect_err("string is not a usize");
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn export_error_is_wrapped_with_its_message() {
        let export = ExportError::Io(std::io::Error::other("read-only"));
        let err: Error = export.into();
        match err {
            Error::Export(message) => assert!(message.contains("read-only")),
            _ => panic!("expected Export variant"),
        }
    }

    #[test]
    fn cli_error_from_pico_args() {
        let err: Error = pico_args::Error::MissingArgument.into();
        assert!(format!("{}", err).starts_with("CLI Error:"));
    }
}
