//! API 라우트 설정 모듈
//!
//! 인증 플로우의 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//!
//! # Route Groups
//!
//! ## Public 라우트
//! - `GET /` - 홈 (로그인 시 프로필로 리다이렉트)
//! - `GET/POST /login`, `GET/POST /signup` - 로컬 인증
//! - `GET /auth/{provider}`, `GET /auth/{provider}/callback` - 소셜 로그인
//! - `GET/POST /connect/local`, `GET /connect/{provider}`,
//!   `GET /connect/{provider}/callback` - 계정 연동
//! - `GET /logout`, `GET /example`, `GET /health`
//!
//! ## Protected 라우트 (세션 가드)
//! - `GET /profile` - 프로필 조회
//! - `GET /unlink/local`, `GET /unlink/{provider}` - 자격증명 연동 해제
//!
//! 가드가 걸린 라우트에 세션 주체 없이 접근하면 홈으로 리다이렉트됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::SessionGuard;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_page_routes(cfg);
    configure_oauth_routes(cfg);
    configure_account_routes(cfg);
}

/// 홈/로컬 인증/세션 관련 라우트를 설정합니다
fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::auth::home)
        .service(handlers::auth::login_form)
        .service(handlers::auth::login)
        .service(handlers::auth::signup_form)
        .service(handlers::auth::signup)
        .service(handlers::auth::logout)
        .service(handlers::auth::session_example);
}

/// OAuth 인증/연동 라우트를 설정합니다
///
/// `/connect/local`은 `/connect/{provider}` 패턴보다 먼저 등록되어야
/// 리터럴 경로가 우선 매칭됩니다.
fn configure_oauth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::oauth::connect_local_form)
        .service(handlers::oauth::connect_local)
        .service(handlers::oauth::auth_start)
        .service(handlers::oauth::auth_callback)
        .service(handlers::oauth::connect_start)
        .service(handlers::oauth::connect_callback);
}

/// 세션 가드가 필요한 계정 라우트를 설정합니다
fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .wrap(SessionGuard::required())
            .service(handlers::users::profile),
    );

    cfg.service(
        web::scope("/unlink")
            .wrap(SessionGuard::required())
            .service(handlers::users::unlink_local)
            .service(handlers::users::unlink_provider),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "social_auth_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "sessions": "Signed cookie",
            "dependency_injection": "Singleton Macro"
        }
    }))
}
