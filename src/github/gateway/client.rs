//! Octocrab client construction for the listing gateway.

use std::time::Duration;

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::IntakeError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

use super::error_mapping::map_octocrab_error;

/// Connect and read timeout for every GitHub request.
const GITHUB_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds an authenticated client talking to the locator's API host.
///
/// Must be called inside a Tokio runtime; Octocrab spawns its service
/// buffer on construction.
///
/// # Errors
///
/// Returns `IntakeError::InvalidUrl` when the API base is not a valid URI
/// and `IntakeError::Api` when Octocrab rejects the configuration.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    locator: &RepositoryLocator,
) -> Result<Octocrab, IntakeError> {
    let base_uri = locator
        .api_base()
        .as_str()
        .parse::<Uri>()
        .map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.value())
        .set_connect_timeout(Some(GITHUB_TIMEOUT))
        .set_read_timeout(Some(GITHUB_TIMEOUT))
        .base_uri(base_uri)
        .map_err(|error| IntakeError::Api {
            message: format!("invalid GitHub API base: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build GitHub client", &error))
}
