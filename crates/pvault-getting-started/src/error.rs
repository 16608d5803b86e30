//! Driver errors.

use thiserror::Error;

/// Why the walkthrough stopped.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The vault could not be reached.
    #[error("Unable to connect to the Vault ({address}). Is it up?")]
    Unreachable {
        /// Address the driver tried.
        address: String,
        /// Underlying transport error.
        #[source]
        source: pvault_sdk::Error,
    },

    /// A health endpoint reported something other than `pass`.
    #[error("The vault {plane} plane is unhealthy: {status}")]
    Unhealthy {
        /// `control` or `data`.
        plane: &'static str,
        /// Reported status.
        status: String,
    },

    /// The vault already holds collections.
    #[error(
        "Bailing out due to existence of collections from previous runs. \
         Please clear or recreate the Vault from scratch."
    )]
    VaultNotEmpty {
        /// Names of the existing collections.
        collections: Vec<String>,
    },

    /// The vault answered, but not as documented.
    #[error("Unexpected vault behavior: {0}")]
    Expectation(String),

    /// A vault call failed.
    #[error(transparent)]
    Vault(#[from] pvault_sdk::Error),
}

impl DriverError {
    /// Creates an expectation failure.
    pub fn expectation(message: impl Into<String>) -> Self {
        Self::Expectation(message.into())
    }
}

/// Result type of the walkthrough.
pub type DriverResult<T> = Result<T, DriverError>;

/// Fails with [`DriverError::Expectation`] unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> DriverResult<()> {
    if condition {
        Ok(())
    } else {
        Err(DriverError::Expectation(message()))
    }
}
