// prdash: multi-backend pull request dashboard
//
// SPDX-FileCopyrightText: 2026 prdash contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             DashError (~24 bytes)
//!                     |
//!   +--------+-------+-------+--------+------+
//!   |        |       |       |        |      |
//!   v        v       v       v        v      v
//! Provider  Git     Net     Cfg    Process   Io
//!   Box     Box     Box     Box      Box     Box
//!
//! Sub-errors (unboxed internally):
//!   Provider  Configuration, Authentication, CapabilityUnavailable,
//!             NotInitialized, Initialization
//!   Network   Reqwest, HttpError (raw body), GraphQl, Decode
//!   Git       RepoNotFound, RemoteNotFound, CommandFailed, Gix
//!   Config    ParseError, InvalidValue
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit
//! ```
//!
//! URL classification never fails: an unrecognised remote resolves to the
//! "unknown" GitHub sentinel instead of an error.

use thiserror::Error;

use crate::provider::ProviderType;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`DashError`].
pub type DashResult<T> = std::result::Result<T, DashError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum DashError {
    /// Provider selection, setup or capability error.
    #[error("provider error: {0}")]
    Provider(#[from] Box<ProviderError>),

    /// Git repository inspection failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Transport failure talking to a platform API.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl DashError {
    /// Returns the provider error, if this is one.
    #[must_use]
    pub fn as_provider(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }

    /// True when the error means "this operation does not exist on this platform".
    #[must_use]
    pub fn is_capability_unavailable(&self) -> bool {
        matches!(
            self.as_provider(),
            Some(ProviderError::CapabilityUnavailable { .. })
        )
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for DashError {
                fn from(err: $error) -> Self {
                    DashError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProviderError => Provider,
    GitError => Git,
    NetworkError => Network,
    ConfigError => Config,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Provider Errors ---

/// Errors raised by the provider layer.
///
/// `Configuration` and `Authentication` are kept apart on purpose: the former is
/// a setup mistake, the latter is fixed by supplying a credential.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Required identifying fields (organization, project) are missing.
    #[error("{provider} configuration error: {message}")]
    Configuration {
        provider: ProviderType,
        message: String,
    },

    /// No credential, or the platform rejected it.
    #[error("{provider} authentication error: {message}")]
    Authentication {
        provider: ProviderType,
        message: String,
    },

    /// The platform does not offer this operation.
    #[error("{operation} is not available for {provider}")]
    CapabilityUnavailable {
        provider: ProviderType,
        operation: String,
    },

    /// Queried before any provider was successfully initialized.
    #[error("no provider initialized")]
    NotInitialized,

    /// Construction of the selected provider failed.
    #[error("failed to initialize {provider} provider: {source}")]
    Initialization {
        provider: ProviderType,
        #[source]
        source: Box<DashError>,
    },
}

impl ProviderError {
    /// Shorthand for a [`ProviderError::CapabilityUnavailable`].
    pub fn unavailable(provider: ProviderType, operation: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            provider,
            operation: operation.into(),
        }
    }
}

// --- Git Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),
}

/// Git inspection errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found at the specified path.
    #[error("repository not found: {path}")]
    RepoNotFound { path: String },

    /// Remote not configured.
    #[error("remote not found: {remote}")]
    RemoteNotFound { remote: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Network Errors ---

/// Transport errors talking to GitHub or Azure DevOps.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-200 response; the body is kept verbatim for diagnosis.
    #[error("http error {status}: {url}: {body}")]
    HttpError {
        status: u16,
        url: String,
        body: String,
    },

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("graphql error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// Response body did not match the expected shape.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Errors running a provider-built command line.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}
