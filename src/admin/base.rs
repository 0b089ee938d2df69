use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::{http_admin_api::HttpAdminApi, no_admin_api::NoAdminApi};
use crate::config::AdminApiConfig;
use crate::models::{
    AdminApiData, AdminBannedData, FetchMemberDataByUuidResponse, MapDetails, PlayerReport,
};

#[derive(Error, Debug)]
pub enum AdminApiError {
    #[error("No admin backoffice set!")]
    NotConfigured,

    #[error("Invalid admin backoffice URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport failures and non-success statuses, as reported by the HTTP client.
    #[error("Admin backoffice request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The administrative backend, as seen by the pusher.
///
/// Implementations never retry and never reinterpret a remote failure.
#[async_trait]
pub trait AdminApi: Send + Sync {
    fn is_configured(&self) -> bool {
        true
    }

    async fn fetch_map_details(&self, play_uri: &str) -> Result<MapDetails, AdminApiError>;

    async fn fetch_member_data_by_uuid(
        &self,
        user_identifier: Option<&str>,
        room_id: &str,
        ip_address: &str,
    ) -> Result<FetchMemberDataByUuidResponse, AdminApiError>;

    async fn fetch_member_data_by_token(
        &self,
        organization_member_token: &str,
    ) -> Result<AdminApiData, AdminApiError>;

    async fn fetch_check_user_by_token(
        &self,
        organization_member_token: &str,
    ) -> Result<AdminApiData, AdminApiError>;

    async fn report_player(&self, report: &PlayerReport) -> Result<(), AdminApiError>;

    async fn verify_ban_user(
        &self,
        user_uuid: &str,
        ip_address: &str,
        room_url: &str,
    ) -> Result<AdminBannedData, AdminApiError>;

    async fn get_url_rooms_from_same_world(
        &self,
        room_url: &str,
    ) -> Result<Vec<String>, AdminApiError>;
}

/// Builds the HTTP client when a backend URL is configured, NoAdminApi otherwise.
pub fn create_admin_api(config: &AdminApiConfig) -> Result<Arc<dyn AdminApi>, AdminApiError> {
    match config.url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => {
            let api = HttpAdminApi::new(
                url,
                config.token.clone(),
                Duration::from_millis(config.timeout_in_ms),
            )?;
            info!("Admin backoffice configured at '{}'.", url);
            Ok(Arc::new(api))
        }
        None => {
            info!("No admin backoffice configured. Using NoAdminApi.");
            Ok(Arc::new(NoAdminApi::new()))
        }
    }
}
