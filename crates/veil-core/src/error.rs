use crate::platform::PlatformError;

/// Everything that can go wrong during a run.
///
/// Lookup and identity failures end the run. Mutation failures are
/// recorded in the [`MutationReport`](crate::present::MutationReport)
/// and the remaining steps still run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VeilError {
    #[error("window \"{title}\" not found after {attempts} attempt(s)")]
    WindowNotFound { title: String, attempts: u32 },

    #[error("window belongs to PID {actual}, expected PID {expected}")]
    OwnerMismatch { expected: u32, actual: u32 },

    #[error("could not determine the window's owning process: {0}")]
    OwnerQueryFailed(PlatformError),

    #[error("failed to set extended window style: {0}")]
    StyleMutationFailed(PlatformError),

    #[error("failed to set window opacity: {0}")]
    OpacityMutationFailed(PlatformError),

    #[error("failed to exclude window from capture: {0}")]
    CloakMutationFailed(PlatformError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl VeilError {
    /// Returns whether this error ends the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::StyleMutationFailed(_)
                | Self::OpacityMutationFailed(_)
                | Self::CloakMutationFailed(_)
        )
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { 1 } else { 0 }
    }

    /// The OS status code behind this error, if one was reported.
    pub fn platform_code(&self) -> Option<i32> {
        match self {
            Self::OwnerQueryFailed(e)
            | Self::StyleMutationFailed(e)
            | Self::OpacityMutationFailed(e)
            | Self::CloakMutationFailed(e) => Some(e.code),
            Self::WindowNotFound { .. } | Self::OwnerMismatch { .. } | Self::Config(_) => None,
        }
    }
}
