use crate::errors::LedgerError;

/// Whether the current run has been unlocked with the shared passphrase.
/// Every process starts locked; nothing is remembered between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Session {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl Session {
    pub(crate) fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }

    /// A mismatch locks the session again, even if it was unlocked before.
    pub(crate) fn authenticate(&mut self, candidate: &str, expected: &str) -> Result<(), LedgerError> {
        if !expected.is_empty() && candidate == expected {
            *self = Self::Authenticated;
            tracing::info!("session unlocked");
            Ok(())
        } else {
            *self = Self::Unauthenticated;
            tracing::warn!("passphrase rejected");
            Err(LedgerError::AuthenticationFailed)
        }
    }
}
