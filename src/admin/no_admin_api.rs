use async_trait::async_trait;
use tracing::debug;

use super::{AdminApi, AdminApiError};
use crate::models::{
    AdminApiData, AdminBannedData, FetchMemberDataByUuidResponse, MapDetails, PlayerReport,
};

/// Stands in for the admin backend when no URL is configured.
/// Every call is rejected with `NotConfigured` without touching the network.
pub struct NoAdminApi;

impl NoAdminApi {
    pub fn new() -> Self {
        NoAdminApi
    }

    fn reject<T>(operation: &str) -> Result<T, AdminApiError> {
        debug!("Rejecting admin call '{}': no backoffice configured", operation);
        Err(AdminApiError::NotConfigured)
    }
}

impl Default for NoAdminApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminApi for NoAdminApi {
    fn is_configured(&self) -> bool {
        false
    }

    async fn fetch_map_details(&self, _play_uri: &str) -> Result<MapDetails, AdminApiError> {
        Self::reject("fetch_map_details")
    }

    async fn fetch_member_data_by_uuid(
        &self,
        _user_identifier: Option<&str>,
        _room_id: &str,
        _ip_address: &str,
    ) -> Result<FetchMemberDataByUuidResponse, AdminApiError> {
        Self::reject("fetch_member_data_by_uuid")
    }

    async fn fetch_member_data_by_token(
        &self,
        _organization_member_token: &str,
    ) -> Result<AdminApiData, AdminApiError> {
        Self::reject("fetch_member_data_by_token")
    }

    async fn fetch_check_user_by_token(
        &self,
        _organization_member_token: &str,
    ) -> Result<AdminApiData, AdminApiError> {
        Self::reject("fetch_check_user_by_token")
    }

    async fn report_player(&self, _report: &PlayerReport) -> Result<(), AdminApiError> {
        Self::reject("report_player")
    }

    async fn verify_ban_user(
        &self,
        _user_uuid: &str,
        _ip_address: &str,
        _room_url: &str,
    ) -> Result<AdminBannedData, AdminApiError> {
        Self::reject("verify_ban_user")
    }

    async fn get_url_rooms_from_same_world(
        &self,
        _room_url: &str,
    ) -> Result<Vec<String>, AdminApiError> {
        Self::reject("get_url_rooms_from_same_world")
    }
}
