//! Admin gate middleware
//!
//! The dashboard stores `isAdminLoggedIn = "true"` after the browser-side
//! login and echoes it in the `x-admin-auth` header. This is a capability
//! check, not authentication.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

use crate::utils::AppError;

/// Header carrying the gate flag
pub const ADMIN_HEADER: &str = "x-admin-auth";

/// Marker set on the request and its response once the gate passed
#[derive(Debug, Clone, Copy)]
pub struct AdminGate;

/// Reject the request with 401 unless `x-admin-auth` is exactly `"true"`
pub async fn admin_gate(mut request: Request, next: Next) -> Result<Response, AppError> {
    let passed = request
        .headers()
        .get(ADMIN_HEADER)
        .and_then(|v| v.to_str().ok())
        == Some("true");

    if !passed {
        tracing::debug!(
            method = %request.method(),
            path = %request.uri().path(),
            "Admin gate rejected request"
        );
        return Err(AppError::not_authenticated());
    }

    request.extensions_mut().insert(AdminGate);
    let mut response = next.run(request).await;
    response.extensions_mut().insert(AdminGate);
    Ok(response)
}
