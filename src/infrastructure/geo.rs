//! Location resolution for the nearby screen.

use async_trait::async_trait;

use crate::domain::entity::GeoPoint;

/// Why a location request produced nothing. Rendered verbatim in the nearby
/// screen's alert, so the messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("Location access is disabled in the configuration")]
    Denied,
    #[error("No location is available")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<GeoPoint, GeoError>;
}

/// Provider backed by the config file. A terminal has no GPS, so the user
/// opts in by setting `share_location` and a fixed point.
#[derive(Debug, Clone, Default)]
pub struct ConfigLocationProvider {
    share_location: bool,
    location: Option<GeoPoint>,
}

impl ConfigLocationProvider {
    pub fn new(share_location: bool, location: Option<GeoPoint>) -> Self {
        Self {
            share_location,
            location,
        }
    }
}

#[async_trait]
impl LocationProvider for ConfigLocationProvider {
    async fn current_location(&self) -> Result<GeoPoint, GeoError> {
        if !self.share_location {
            return Err(GeoError::Denied);
        }
        self.location.clone().ok_or(GeoError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_denied_when_sharing_disabled() {
        let provider = ConfigLocationProvider::new(
            false,
            Some(GeoPoint {
                latitude: 1.0,
                longitude: 2.0,
            }),
        );

        assert_eq!(provider.current_location().await, Err(GeoError::Denied));
    }

    #[tokio::test]
    async fn test_unavailable_without_configured_point() {
        let provider = ConfigLocationProvider::new(true, None);

        assert_eq!(
            provider.current_location().await,
            Err(GeoError::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_resolves_configured_point() {
        let point = GeoPoint {
            latitude: 35.68,
            longitude: 139.69,
        };
        let provider = ConfigLocationProvider::new(true, Some(point.clone()));

        assert_eq!(provider.current_location().await, Ok(point));
    }
}
