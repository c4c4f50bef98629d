use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::errors::AppError;

/// Identity headers set by the authenticating reverse proxy. The service
/// trusts them as-is and never interprets identity beyond the user id.
pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

const ADMIN_ROLE: &str = "admin";

/// The authenticated caller, resolved from `X-User-Id`.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
}

fn resolve_user(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let raw = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    let id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;
    Ok(CurrentUser { id })
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_user(req))
    }
}

/// Marker extractor for administrator-only routes (`X-User-Role: admin`).
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

fn resolve_admin(req: &HttpRequest) -> Result<AdminUser, AppError> {
    let role = req
        .headers()
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Forbidden)?;
    if role != ADMIN_ROLE {
        return Err(AppError::Forbidden);
    }
    Ok(AdminUser)
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_admin(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn resolves_user_from_header() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        let user = resolve_user(&req).expect("should resolve");
        assert_eq!(user.id, id);
    }

    #[test]
    fn missing_user_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(resolve_user(&req), Err(AppError::Unauthorized)));
    }

    #[test]
    fn malformed_user_id_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();
        assert!(matches!(resolve_user(&req), Err(AppError::Unauthorized)));
    }

    #[test]
    fn admin_role_is_required() {
        let req = TestRequest::default()
            .insert_header((USER_ROLE_HEADER, "customer"))
            .to_http_request();
        assert!(matches!(resolve_admin(&req), Err(AppError::Forbidden)));

        let req = TestRequest::default()
            .insert_header((USER_ROLE_HEADER, "admin"))
            .to_http_request();
        assert!(resolve_admin(&req).is_ok());
    }
}
