//! Client for the administrative backoffice.

pub mod base;
pub mod http_admin_api;
pub mod no_admin_api;

pub use base::{create_admin_api, AdminApi, AdminApiError};
pub use http_admin_api::HttpAdminApi;
pub use no_admin_api::NoAdminApi;
