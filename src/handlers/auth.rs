//! Authentication HTTP Handlers
//!
//! 홈, 로컬 가입/로그인, 로그아웃과 세션 진단 엔드포인트를 처리합니다.
//! 폼을 렌더링하는 대신 폼에 해당하는 GET 엔드포인트가
//! 보류 중인 플래시 메시지를 JSON으로 내려줍니다.

use actix_session::Session;
use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::domain::{AuthResponse, LoginRequest, ProfileResponse, SignupRequest};
use crate::errors::errors::AppError;
use crate::handlers::{establish_session, take_flash};
use crate::middlewares::session_inner::resolve_session_user;
use crate::services::auth::ReconciliationService;

/// 홈 엔드포인트
///
/// 로그인된 사용자는 프로필로 리다이렉트하고,
/// 아니면 보류 중인 플래시 메시지와 진입점 목록을 내려줍니다.
///
/// # Endpoint
/// `GET /`
#[get("/")]
pub async fn home(session: Session) -> Result<HttpResponse, AppError> {
    if resolve_session_user(&session).await?.is_some() {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, "/profile"))
            .finish());
    }

    Ok(HttpResponse::Ok().json(json!({
        "service": "social_auth_backend",
        "message": take_flash(&session),
        "login": "/login",
        "signup": "/signup",
        "oauth": ["/auth/facebook", "/auth/github", "/auth/google"]
    })))
}

/// 로그인 폼 엔드포인트
///
/// 직전 로그인 시도의 거부 메시지(플래시)를 내려줍니다.
///
/// # Endpoint
/// `GET /login`
#[get("/login")]
pub async fn login_form(session: Session) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": take_flash(&session)
    })))
}

/// 로컬 로그인 핸들러
///
/// 이메일과 패스워드를 검증하고 성공 시 세션 주체를 기록합니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(
    session: Session,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let engine = ReconciliationService::instance();
    let user = engine.login_local(&payload.email, &payload.password).await?;

    establish_session(&session, &user)?;
    log::info!("로컬 로그인 성공: {}", payload.email);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "로그인 성공".to_string(),
        user: ProfileResponse::from(user),
    }))
}

/// 회원가입 폼 엔드포인트
///
/// # Endpoint
/// `GET /signup`
#[get("/signup")]
pub async fn signup_form(session: Session) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": take_flash(&session)
    })))
}

/// 로컬 회원가입 핸들러
///
/// 로그인되지 않은 상태면 새 계정을 생성하고,
/// 로그인된 상태면 현재 계정에 로컬 자격증명을 연동합니다.
///
/// # Endpoint
/// `POST /signup`
#[post("/signup")]
pub async fn signup(
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

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "회원가입 성공".to_string(),
        user: ProfileResponse::from(user),
    }))
}

/// 로그아웃 핸들러
///
/// 세션을 폐기하고 홈으로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /logout`
#[get("/logout")]
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();

    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// 세션 진단 엔드포인트
///
/// 요청 쿠키, 세션 내용, 복원된 사용자를 JSON으로 덤프합니다.
/// 세션 동작을 눈으로 확인하기 위한 개발용 엔드포인트입니다.
///
/// # Endpoint
/// `GET /example`
#[get("/example")]
pub async fn session_example(
    req: HttpRequest,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let mut cookies = serde_json::Map::new();
    if let Ok(request_cookies) = req.cookies() {
        for cookie in request_cookies.iter() {
            cookies.insert(cookie.name().to_string(), json!(cookie.value()));
        }
    }

    let user = resolve_session_user(&session).await?;

    Ok(HttpResponse::Ok().json(json!({
        "cookies": cookies,
        "session": {
            "user_id": session.get::<String>(crate::config::SessionConfig::USER_ID_KEY)
                .unwrap_or(None),
        },
        "user": user.map(ProfileResponse::from)
    })))
}
