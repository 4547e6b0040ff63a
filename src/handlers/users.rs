//! # User Management HTTP Handlers
//!
//! 프로필 조회와 자격증명 연동 해제를 처리합니다.
//! 이 모듈의 핸들러들은 세션 가드 뒤에 배치되며,
//! 가드가 Request Extensions에 넣어 준 [`AuthenticatedUser`]를 사용합니다.

use actix_web::http::header;
use actix_web::{get, web, HttpMessage, HttpRequest, HttpResponse};

use crate::config::Provider;
use crate::domain::ProfileResponse;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::auth::{ReconciliationService, UnlinkTarget};

/// Request Extensions에서 가드가 복원해 둔 현재 사용자를 꺼냅니다.
fn authenticated_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::AuthenticationError("인증 정보가 없습니다".to_string()))
}

/// 프로필 조회 핸들러
///
/// 연동된 자격증명 현황을 포함한 현재 사용자 프로필을 반환합니다.
///
/// # Endpoint
/// `GET /profile` (세션 가드 필요)
#[get("")]
pub async fn profile(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let user = authenticated_user(&req)?.into_inner();

    Ok(HttpResponse::Ok().json(ProfileResponse::from(user)))
}

/// 로컬 자격증명 연동 해제 핸들러
///
/// 이메일과 패스워드 해시를 비우고 프로필로 돌아갑니다.
/// 계정 자체는 유지됩니다.
///
/// # Endpoint
/// `GET /unlink/local` (세션 가드 필요)
#[get("/local")]
pub async fn unlink_local(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let user = authenticated_user(&req)?.into_inner();

    let engine = ReconciliationService::instance();
    engine.unlink(user, UnlinkTarget::Local).await?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/profile"))
        .finish())
}

/// 프로바이더 자격증명 연동 해제 핸들러
///
/// 프로바이더의 id와 토큰만 비우고 프로필 정보는 유지합니다.
/// 사용자가 나중에 다시 연동하면 재연동으로 처리됩니다.
///
/// # Endpoint
/// `GET /unlink/{provider}` (세션 가드 필요)
#[get("/{provider}")]
pub async fn unlink_provider(
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = Provider::from_str(&path)?;
    let user = authenticated_user(&req)?.into_inner();

    let engine = ReconciliationService::instance();
    engine.unlink(user, UnlinkTarget::Provider(provider)).await?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/profile"))
        .finish())
}
