//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use tracing::debug;

use crate::application::DeployUseCase;
use crate::config::UserSettings;
use crate::domain::ports::ControlPlane;
use crate::error::{EdgeshipError, EdgeshipResult};
use crate::infrastructure::{HttpControlPlane, PassthroughBundler};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<PassthroughBundler>;

/// Create a deploy use case with all dependencies wired up
///
/// `control_plane` is `None` for dry runs.
pub fn create_deploy_use_case(
    control_plane: Option<Arc<dyn ControlPlane>>,
) -> ConcreteDeployUseCase {
    DeployUseCase::new(PassthroughBundler::new(), control_plane)
}

/// Build the HTTP control plane from user settings.
///
/// Returns `Ok(None)` without an API token; the deploy then fails with a
/// credentials error naming the token. A token without an account id is an
/// error right away.
pub fn create_control_plane(
    settings: &UserSettings,
    manifest_account: Option<&str>,
) -> EdgeshipResult<Option<Arc<dyn ControlPlane>>> {
    let Some(token) = settings.api_token.as_deref() else {
        return Ok(None);
    };
    let account_id =
        settings
            .resolve_account_id(manifest_account)
            .ok_or(EdgeshipError::MissingCredentials {
                what: "account id",
                hint: "EDGESHIP_ACCOUNT_ID, account_id in edgeship.toml, or account_id in ~/.config/edgeship/config.toml",
            })?;
    debug!(base_url = settings.api_base_url(), account = %account_id, "control_plane.http");

    let control_plane = HttpControlPlane::new(settings.api_base_url(), account_id, token)
        .map_err(|source| EdgeshipError::DeployStep {
            step: "Client setup".to_string(),
            source,
        })?;
    Ok(Some(Arc::new(control_plane)))
}
