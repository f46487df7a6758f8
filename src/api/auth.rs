//! Bearer-token authentication.
//!
//! Every endpoint takes a [`Caller`], resolved from the `Authorization`
//! header against the token table in `access.yaml`.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::config::Role;
use crate::error::{XtrackError, XtrackResult};
use crate::models::EmployeeId;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The authenticated identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// The granted role.
    pub role: Role,
    /// The employee the token acts for, if any.
    pub employee_id: Option<EmployeeId>,
}

impl Caller {
    /// Returns true for HR administrators.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with [`XtrackError::Forbidden`] unless the caller is an admin.
    pub fn require_admin(&self) -> XtrackResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(XtrackError::Forbidden {
                message: "admin role required".to_string(),
            })
        }
    }

    /// Returns the caller's employee id, or [`XtrackError::Forbidden`] if the
    /// token does not act for an employee.
    pub fn require_employee(&self) -> XtrackResult<EmployeeId> {
        self.employee_id.ok_or_else(|| XtrackError::Forbidden {
            message: "token is not linked to an employee".to_string(),
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| XtrackError::Unauthorized {
                message: "missing bearer token".to_string(),
            })?;

        let entry = state.config().resolve_token(token).ok_or_else(|| {
            warn!(path = %parts.uri.path(), "Unknown bearer token");
            XtrackError::Unauthorized {
                message: "unknown bearer token".to_string(),
            }
        })?;

        Ok(Caller {
            role: entry.role,
            employee_id: entry.employee_id,
        })
    }
}
