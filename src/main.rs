//! 소셜 로그인 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 쿠키 세션 기반의 인증 플로우를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_session::{SessionMiddleware, config::PersistentSession, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use sha2::{Digest, Sha256};
use social_auth_backend::caching::redis::RedisClient;
use social_auth_backend::config::{Environment, OAuthSettings, ServerConfig, SessionConfig};
use social_auth_backend::core::registry::ServiceLocator;
use social_auth_backend::db::Database;
use social_auth_backend::repositories::users::{user_repo::UserRepository, user_store::UserStore};
use social_auth_backend::routes::configure_all_routes;
use social_auth_backend::services::auth::{OAuthClientService, ReconciliationService};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 소셜 로그인 인증 서비스 시작중...");

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await;

    // ServiceLocator에 인프라 컴포넌트 등록
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    // OAuth 설정은 기동 시점에 한 번 로드하여 명시적으로 주입
    let oauth_settings = Arc::new(OAuthSettings::from_env());
    ServiceLocator::set(oauth_settings.clone());

    // 매크로 기반 컴포넌트(리포지토리) 초기화
    ServiceLocator::initialize_all()
        .await
        .expect("서비스 초기화 실패");

    // 생성자 인자가 필요한 서비스는 수동 등록
    let user_repo = UserRepository::instance();
    let store: Arc<dyn UserStore> = user_repo.clone();
    ServiceLocator::set(Arc::new(ReconciliationService::new(store)));
    ServiceLocator::set(Arc::new(OAuthClientService::new(oauth_settings)));

    // unique sparse 인덱스로 이메일/외부 신원의 중복 소유를 저장소 차원에서 차단
    user_repo
        .create_indexes()
        .await
        .expect("사용자 인덱스 생성 실패");

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화, 쿠키 세션 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))

            // 기존 미들웨어들
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 쿠키 세션 (서명된 쿠키에 사용자 id만 저장)
            .wrap(build_session_middleware())

            // 라우트 설정
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(4) // 워커 스레드 수
        .run()
        .await
}

/// 쿠키 세션 미들웨어를 구성합니다
///
/// 세션 쿠키는 세션 비밀키에서 파생한 키로 서명되어 변조를 방지하며,
/// 만료 시간(기본 1시간)은 로그인 시점 기준으로 적용됩니다.
fn build_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    // 짧은 비밀키도 허용하도록 고정 길이 다이제스트에서 키를 파생
    let digest = Sha256::digest(SessionConfig::secret().as_bytes());
    let key = Key::derive_from(digest.as_slice());

    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SessionConfig::cookie_name())
        .cookie_secure(matches!(Environment::current(), Environment::Production))
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(CookieDuration::seconds(SessionConfig::ttl_seconds())),
        )
        .build()
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// 데이터베이스 연결을 설정하고 Arc로 래핑된 핸들을 반환합니다.
///
/// # Panics
///
/// * MongoDB 연결 실패 시
/// * Redis 연결 실패 시
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    // 데이터베이스 초기화
    let database = Arc::new(
        Database::new()
            .await
            .expect("데이터베이스 연결 실패")
    );

    info!("✅ MongoDB 연결 성공");

    // Redis 클라이언트 초기화
    let redis_client = Arc::new(
        RedisClient::new()
            .await
            .expect("Redis 연결 실패")
    );

    info!("✅ Redis 연결 성공");

    (database, redis_client)
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드와의 통신을 위한 CORS 설정입니다.
/// 쿠키 세션을 사용하므로 자격 증명 지원이 필수입니다.
fn configure_cors() -> Cors {
    Cors::default()
        // 허용할 Origin 설정
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")

        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])

        // 허용할 헤더
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])

        // 자격 증명(세션 쿠키) 지원
        .supports_credentials()

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
