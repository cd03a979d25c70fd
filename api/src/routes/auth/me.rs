use actix_web::HttpResponse;

use crate::dto::auth_dto::CurrentUserResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires a bearer access token; see [`crate::middleware::JwtAuth`].
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(CurrentUserResponse {
        user_id: auth.user_id,
        email: auth.email,
        role: auth.role,
        tenant_id: auth.tenant_id,
    })
}
