//! OAuth HTTP Handlers
//!
//! 프로바이더 인증/연동 플로우의 시작과 콜백을 처리합니다.
//!
//! `/auth/{provider}`와 `/connect/{provider}`는 같은 정합 로직을 공유합니다.
//! 차이는 세션 상태뿐입니다. 세션에 로그인된 사용자가 없으면
//! 로그인/가입 플로우가 되고, 있으면 현재 계정에 연동하는 플로우가 됩니다.
//!
//! 콜백의 거부(이미 다른 계정에 연동된 신원 등)는 에러 응답 대신
//! 플래시 메시지를 남기고 홈으로 리다이렉트합니다.

use actix_session::Session;
use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::{Provider, SessionConfig};
use crate::domain::{AuthResponse, OAuthCallbackQuery, ProfileResponse, SignupRequest};
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;
use crate::handlers::{establish_session, set_flash, take_flash};
use crate::middlewares::session_inner::resolve_session_user;
use crate::services::auth::{OAuthClientService, ReconciliationService};

/// 프로바이더 인증 시작 (로그인/가입 플로우)
///
/// # Endpoint
/// `GET /auth/{provider}`
#[get("/auth/{provider}")]
pub async fn auth_start(
    path: web::Path<String>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    begin_oauth(&path, &session)
}

/// 프로바이더 인증 콜백 (로그인/가입 플로우)
///
/// # Endpoint
/// `GET /auth/{provider}/callback?code={code}&state={state}`
#[get("/auth/{provider}/callback")]
pub async fn auth_callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    finish_oauth(&path, &query, &session).await
}

/// 프로바이더 연동 시작 (로그인 상태에서 계정 연동)
///
/// # Endpoint
/// `GET /connect/{provider}`
#[get("/connect/{provider}")]
pub async fn connect_start(
    path: web::Path<String>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    begin_oauth(&path, &session)
}

/// 프로바이더 연동 콜백
///
/// # Endpoint
/// `GET /connect/{provider}/callback?code={code}&state={state}`
#[get("/connect/{provider}/callback")]
pub async fn connect_callback(
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    finish_oauth(&path, &query, &session).await
}

/// 로컬 자격증명 연동 폼 엔드포인트
///
/// # Endpoint
/// `GET /connect/local`
#[get("/connect/local")]
pub async fn connect_local_form(session: Session) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": take_flash(&session)
    })))
}

/// 로컬 자격증명 연동 핸들러
///
/// 가입 핸들러와 동일한 정합 연산을 사용합니다.
/// 로그인된 상태로 제출되면 현재 계정에 로컬 자격증명이 연동됩니다.
///
/// # Endpoint
/// `POST /connect/local`
#[post("/connect/local")]
pub async fn connect_local(
    session: Session,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let current_user = resolve_session_user(&session).await?;
    let engine = ReconciliationService::instance();

    let user = engine
        .signup_local(current_user, &payload.email, &payload.password)
        .await?;

    establish_session(&session, &user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "로컬 자격증명 연동 성공".to_string(),
        user: ProfileResponse::from(user),
    }))
}

/// 인증 URL을 만들어 프로바이더로 리다이렉트
///
/// 생성된 state는 콜백 검증을 위해 세션에 보관합니다.
fn begin_oauth(provider_name: &str, session: &Session) -> Result<HttpResponse, AppError> {
    let provider = Provider::from_str(provider_name)?;
    let oauth = OAuthClientService::instance();

    let redirect = oauth.authorize_redirect(provider)?;

    session
        .insert(SessionConfig::OAUTH_STATE_KEY, redirect.state.clone())
        .map_err(|e| AppError::InternalError(format!("세션 쓰기 실패: {}", e)))?;

    log::debug!("{} OAuth 인증 시작", provider.as_str());

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, redirect.authorize_url))
        .finish())
}

/// 콜백 공통 처리
///
/// 성공하면 세션 주체를 기록하고 프로필로 리다이렉트합니다.
/// 예상된 거부는 플래시 메시지 + 홈 리다이렉트로 변환하고,
/// 저장소/외부 서비스 장애는 그대로 에러 응답으로 전파합니다.
async fn finish_oauth(
    provider_name: &str,
    query: &OAuthCallbackQuery,
    session: &Session,
) -> Result<HttpResponse, AppError> {
    let provider = Provider::from_str(provider_name)?;

    match run_callback(provider, query, session).await {
        Ok(user) => {
            establish_session(session, &user)?;

            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/profile"))
                .finish())
        }
        Err(err) if err.is_rejection() => {
            log::warn!("{} 콜백 거부: {}", provider.as_str(), err);
            set_flash(session, &err.to_string());

            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/"))
                .finish())
        }
        Err(err) => Err(err),
    }
}

/// state 검증 → 토큰 교환 → 프로필 조회 → 계정 정합
async fn run_callback(
    provider: Provider,
    query: &OAuthCallbackQuery,
    session: &Session,
) -> Result<User, AppError> {
    // 에러 체크 (사용자가 거부했거나 프로바이더 쪽 에러 발생)
    if let Some(error) = &query.error {
        let message = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("{} OAuth 에러: {} - {}", provider.as_str(), error, message);
        return Err(AppError::AuthenticationError(message.to_string()));
    }

    let oauth = OAuthClientService::instance();

    // 인증 시작 시 세션에 보관한 state와 일치해야 하며, 1회용으로 소비한다
    let expected_state = session
        .get::<String>(SessionConfig::OAUTH_STATE_KEY)
        .map_err(|e| AppError::InternalError(format!("세션 읽기 실패: {}", e)))?;
    let _ = session.remove(SessionConfig::OAUTH_STATE_KEY);

    oauth.verify_oauth_state(query.state.as_deref(), expected_state.as_deref())?;

    let code = query
        .code
        .as_deref()
        .ok_or_else(|| AppError::ValidationError("Authorization code가 필요합니다".to_string()))?;

    // Authorization Code는 수신 즉시 토큰으로 교환한다
    let token = oauth.exchange_code(provider, code).await?;
    let profile = oauth.fetch_profile(provider, &token.access_token).await?;

    let current_user = resolve_session_user(session).await?;

    ReconciliationService::instance()
        .reconcile_external_identity(current_user, provider, profile, &token.access_token)
        .await
}
