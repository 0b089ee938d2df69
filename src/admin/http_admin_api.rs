use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{AdminApi, AdminApiError};
use crate::models::{
    AdminApiData, AdminBannedData, FetchMemberDataByUuidResponse, MapDetails, PlayerReport,
};

const NO_QUERY: [(&str, &str); 0] = [];

/// Talks to the admin backoffice over HTTP with a service-wide credential.
pub struct HttpAdminApi {
    base_url: Url,
    token: Option<String>,
    client: Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoomAccessQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_identifier: Option<&'a str>,
    room_id: &'a str,
    ip_address: &'a str,
}

impl HttpAdminApi {
    pub fn new(url: &str, token: Option<String>, timeout: Duration) -> Result<Self, AdminApiError> {
        let invalid = |reason: String| AdminApiError::InvalidUrl {
            url: url.to_string(),
            reason,
        };
        let base_url = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(HttpAdminApi {
            base_url,
            token,
            client,
        })
    }

    /// Appends `segments` (percent-encoded) to the base URL's path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token),
            None => request,
        }
    }

    /// Sends `request` and turns non-2xx statuses into errors. Only the static
    /// `route` is logged: some concrete paths carry membership tokens.
    async fn send(
        &self,
        route: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, AdminApiError> {
        debug!("Sending admin backoffice request: {}", route);

        let response = self
            .authorize(request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(
                    event_name = "admin_api.request.failed",
                    event_domain = "admin_api",
                    route,
                    status = e.status().map(|s| s.as_u16()),
                    "admin backoffice request failed"
                );
                e
            })?;

        Ok(response)
    }

    async fn get_json<T, Q>(
        &self,
        route: &'static str,
        segments: &[&str],
        query: &Q,
    ) -> Result<T, AdminApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.get(self.endpoint(segments)).query(query);
        let response = self.send(route, request).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn fetch_map_details(&self, play_uri: &str) -> Result<MapDetails, AdminApiError> {
        self.get_json("GET /api/map", &["api", "map"], &[("playUri", play_uri)])
            .await
    }

    async fn fetch_member_data_by_uuid(
        &self,
        user_identifier: Option<&str>,
        room_id: &str,
        ip_address: &str,
    ) -> Result<FetchMemberDataByUuidResponse, AdminApiError> {
        let query = RoomAccessQuery {
            user_identifier,
            room_id,
            ip_address,
        };
        self.get_json("GET /api/room/access", &["api", "room", "access"], &query)
            .await
    }

    async fn fetch_member_data_by_token(
        &self,
        organization_member_token: &str,
    ) -> Result<AdminApiData, AdminApiError> {
        self.get_json(
            "GET /api/login-url/{token}",
            &["api", "login-url", organization_member_token],
            &NO_QUERY,
        )
        .await
    }

    async fn fetch_check_user_by_token(
        &self,
        organization_member_token: &str,
    ) -> Result<AdminApiData, AdminApiError> {
        self.get_json(
            "GET /api/check-user/{token}",
            &["api", "check-user", organization_member_token],
            &NO_QUERY,
        )
        .await
    }

    async fn report_player(&self, report: &PlayerReport) -> Result<(), AdminApiError> {
        let url = self.endpoint(&["api", "report"]);
        debug!("Sending player report for world '{}'", report.report_world_slug);
        self.send("POST /api/report", self.client.post(url).json(report))
            .await?;
        Ok(())
    }

    async fn verify_ban_user(
        &self,
        user_uuid: &str,
        ip_address: &str,
        room_url: &str,
    ) -> Result<AdminBannedData, AdminApiError> {
        self.get_json(
            "GET /api/ban",
            &["api", "ban"],
            &[
                ("ipAddress", ip_address),
                ("token", user_uuid),
                ("roomUrl", room_url),
            ],
        )
        .await
    }

    async fn get_url_rooms_from_same_world(
        &self,
        room_url: &str,
    ) -> Result<Vec<String>, AdminApiError> {
        self.get_json(
            "GET /api/room/sameWorld",
            &["api", "room", "sameWorld"],
            &[("roomUrl", room_url)],
        )
        .await
    }
}
