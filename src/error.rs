//! Runtime error surfaced by the exhibit.

use crate::device::{DeviceError, DeviceRole};

/// Fatal error while driving an exhibit.
///
/// Sensor failures never show up here: a failed read only skips one poll
/// cycle. A device that cannot commit, on the other hand, leaves the panel
/// in an unknown state, so it is propagated to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExhibitError {
    /// A device write or commit failed.
    Device {
        /// Which device failed.
        role: DeviceRole,
        /// Error reported by the driver.
        error: DeviceError,
    },
}

impl core::fmt::Display for ExhibitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ExhibitError::Device { role, error } => {
                write!(f, "{:?} failed: {}", role, error)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExhibitError {}

/// Tags a driver result with the role of the device that produced it.
pub(crate) trait DeviceResultExt<T> {
    fn on(self, role: DeviceRole) -> Result<T, ExhibitError>;
}

impl<T> DeviceResultExt<T> for Result<T, DeviceError> {
    #[inline]
    fn on(self, role: DeviceRole) -> Result<T, ExhibitError> {
        self.map_err(|error| ExhibitError::Device { role, error })
    }
}
