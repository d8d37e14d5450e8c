//! Miette-based error diagnostics for CLI error presentation.
//!
//! Crate errors are mapped to diagnostics with a stable code and a help
//! line. TOML syntax errors additionally carry the file content and a span
//! so miette can point at the offending location.

use std::path::Path;

use miette::{Diagnostic, Report, SourceSpan};
use thiserror::Error;

use crate::domain::PremiumError;
use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(kimchi::config::syntax))]
pub struct ConfigSyntaxError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

impl ConfigSyntaxError {
    #[must_use]
    pub fn new(message: impl Into<String>, src: impl Into<String>, span: (usize, usize)) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: span.into(),
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(kimchi::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Coin symbol with no reference market.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(kimchi::symbol),
    help("use the ticker listed on Upbit, e.g. BTC, ETH, XRP")
)]
pub struct SymbolDiagnostic {
    pub message: String,
}

/// Upstream API failure.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(
    code(kimchi::upstream),
    help("check your network connection; public APIs may also be rate limiting, try again shortly")
)]
pub struct UpstreamDiagnostic {
    pub message: String,
}

/// Convert a crate error into a rendered diagnostic.
///
/// `config_path` is used to attach source context to TOML syntax errors.
#[must_use]
pub fn report(err: Error, config_path: Option<&Path>) -> Report {
    match err {
        Error::Config(ConfigError::Parse(parse)) => {
            let message = format!("invalid configuration: {}", parse.message());
            let source = config_path.and_then(|path| std::fs::read_to_string(path).ok());
            match (source, parse.span()) {
                (Some(src), Some(span)) => Report::new(
                    ConfigSyntaxError::new(message, src, (span.start, span.len()))
                        .with_help("see the [logging], [alerts] and [upstream] sections"),
                ),
                _ => Report::new(ConfigDiagnostic {
                    message,
                    help: None,
                }),
            }
        }
        Error::Config(err) => {
            let help = match &err {
                ConfigError::ReadFile(_) => Some("pass --config with an existing file".to_string()),
                ConfigError::InvalidValue { field, .. } if field.starts_with("ALERT_") => {
                    Some(format!("check the {field} environment variable"))
                }
                _ => None,
            };
            Report::new(ConfigDiagnostic {
                message: err.to_string(),
                help,
            })
        }
        Error::Premium(err @ PremiumError::Unresolvable { .. }) => {
            Report::new(SymbolDiagnostic {
                message: err.to_string(),
            })
        }
        err @ Error::InvalidSymbol { .. } => Report::new(SymbolDiagnostic {
            message: err.to_string(),
        }),
        Error::Premium(err) => Report::new(UpstreamDiagnostic {
            message: err.to_string(),
        }),
        Error::MarketData(err) => Report::new(UpstreamDiagnostic {
            message: err.to_string(),
        }),
        other => Report::msg(other.to_string()),
    }
}
