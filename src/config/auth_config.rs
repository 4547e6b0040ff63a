//! # Authentication Configuration Module
//!
//! OAuth 프로바이더와 쿠키 세션 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 이메일/패스워드 기반 전통적인 인증
//! 2. **Facebook OAuth 2.0**: Facebook 계정을 통한 소셜 로그인
//! 3. **GitHub OAuth 2.0**: GitHub 계정을 통한 소셜 로그인
//! 4. **Google OAuth 2.0**: Google 계정을 통한 소셜 로그인
//!
//! 세 프로바이더의 콜백 처리 로직은 하나의 정합(reconciliation) 연산으로
//! 통합되어 있으며, 프로바이더별 차이는 [`Provider`]와
//! [`ProviderOAuthConfig`] 디스크립터 테이블로만 표현됩니다.
//!
//! ## 세션 설정
//!
//! ```bash
//! export SESSION_SECRET="your-session-secret"
//! export SESSION_COOKIE_NAME="auth-sid"
//! export SESSION_TTL_SECONDS="3600"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::errors::errors::AppError;

/// 지원하는 외부 인증 프로바이더
///
/// 세 프로바이더는 모두 OAuth 2.0 Authorization Code 플로우를 사용하며,
/// 사용자 문서의 프로바이더별 서브 도큐먼트와 1:1 대응됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Facebook OAuth 2.0 인증
    Facebook,
    /// GitHub OAuth 2.0 인증
    GitHub,
    /// Google OAuth 2.0 인증
    Google,
}

impl Provider {
    /// 지원하는 모든 프로바이더
    pub const ALL: [Provider; 3] = [Provider::Facebook, Provider::GitHub, Provider::Google];

    /// 문자열에서 Provider를 생성합니다 (대소문자 무관).
    ///
    /// URL 경로 세그먼트(`/auth/{provider}`)를 해석할 때 사용합니다.
    pub fn from_str(s: &str) -> Result<Self, AppError> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(Provider::Facebook),
            "github" => Ok(Provider::GitHub),
            "google" => Ok(Provider::Google),
            _ => Err(AppError::ValidationError(format!(
                "지원하지 않는 프로바이더입니다: {}",
                s
            ))),
        }
    }

    /// Provider를 소문자 문자열로 변환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Facebook => "facebook",
            Provider::GitHub => "github",
            Provider::Google => "google",
        }
    }

    /// MongoDB에서 외부 id 조회에 사용하는 필드 경로
    ///
    /// 사용자 문서의 프로바이더 서브 도큐먼트 구조와 일치해야 합니다.
    pub fn id_field(&self) -> &'static str {
        match self {
            Provider::Facebook => "facebook.id",
            Provider::GitHub => "github.id",
            Provider::Google => "google.id",
        }
    }
}

/// 프로바이더 하나에 대한 OAuth 2.0 엔드포인트/자격증명 디스크립터
///
/// Authorization Code 플로우에 필요한 모든 값을 담습니다.
/// 엔드포인트 URI들은 환경 변수로 재정의할 수 있으며,
/// 자격증명(client id/secret)은 필수입니다.
#[derive(Debug, Clone)]
pub struct ProviderOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// 사용자를 리다이렉트할 인증 페이지 엔드포인트
    pub auth_uri: String,
    /// Authorization Code를 액세스 토큰으로 교환하는 엔드포인트
    pub token_uri: String,
    /// 액세스 토큰으로 프로필을 조회하는 엔드포인트
    pub userinfo_uri: String,
    /// 요청할 권한 범위
    pub scope: String,
}

/// 전체 OAuth 설정
///
/// 기동 시점에 환경 변수에서 한 번 로드되어 `ServiceLocator`에 등록되고,
/// OAuth 클라이언트 서비스에 명시적으로 주입됩니다. 요청 처리 경로에서는
/// 환경 변수를 다시 읽지 않습니다.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub facebook: ProviderOAuthConfig,
    pub github: ProviderOAuthConfig,
    pub google: ProviderOAuthConfig,
    /// CSRF 방지용 state 파라미터 생성에 사용하는 비밀키
    pub state_secret: String,
}

impl OAuthSettings {
    /// 환경 변수에서 전체 OAuth 설정을 로드합니다.
    ///
    /// # Panics
    ///
    /// 프로바이더별 `*_CLIENT_ID`, `*_CLIENT_SECRET`, `*_REDIRECT_URI`
    /// 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    /// 누락된 설정은 기동 시점에 조기에 드러나야 합니다.
    pub fn from_env() -> Self {
        Self {
            facebook: ProviderOAuthConfig {
                client_id: require_env("FACEBOOK_CLIENT_ID"),
                client_secret: require_env("FACEBOOK_CLIENT_SECRET"),
                redirect_uri: require_env("FACEBOOK_REDIRECT_URI"),
                auth_uri: env_or(
                    "FACEBOOK_AUTH_URI",
                    "https://www.facebook.com/v12.0/dialog/oauth",
                ),
                token_uri: env_or(
                    "FACEBOOK_TOKEN_URI",
                    "https://graph.facebook.com/v12.0/oauth/access_token",
                ),
                userinfo_uri: env_or(
                    "FACEBOOK_USERINFO_URI",
                    "https://graph.facebook.com/v12.0/me",
                ),
                scope: env_or("FACEBOOK_SCOPE", "email"),
            },
            github: ProviderOAuthConfig {
                client_id: require_env("GITHUB_CLIENT_ID"),
                client_secret: require_env("GITHUB_CLIENT_SECRET"),
                redirect_uri: require_env("GITHUB_REDIRECT_URI"),
                auth_uri: env_or("GITHUB_AUTH_URI", "https://github.com/login/oauth/authorize"),
                token_uri: env_or(
                    "GITHUB_TOKEN_URI",
                    "https://github.com/login/oauth/access_token",
                ),
                userinfo_uri: env_or("GITHUB_USERINFO_URI", "https://api.github.com/user"),
                scope: env_or("GITHUB_SCOPE", "read:user user:email"),
            },
            google: ProviderOAuthConfig {
                client_id: require_env("GOOGLE_CLIENT_ID"),
                client_secret: require_env("GOOGLE_CLIENT_SECRET"),
                redirect_uri: require_env("GOOGLE_REDIRECT_URI"),
                auth_uri: env_or(
                    "GOOGLE_AUTH_URI",
                    "https://accounts.google.com/o/oauth2/auth",
                ),
                token_uri: env_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
                userinfo_uri: env_or(
                    "GOOGLE_USERINFO_URI",
                    "https://www.googleapis.com/oauth2/v2/userinfo",
                ),
                scope: env_or("GOOGLE_SCOPE", "openid email profile"),
            },
            state_secret: env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
                log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
                "oauth-state-secret".to_string()
            }),
        }
    }

    /// 프로바이더에 해당하는 디스크립터를 반환합니다.
    pub fn provider(&self, provider: Provider) -> &ProviderOAuthConfig {
        match provider {
            Provider::Facebook => &self.facebook,
            Provider::GitHub => &self.github,
            Provider::Google => &self.google,
        }
    }
}

fn require_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{} must be set", key))
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// 쿠키 세션 설정을 관리하는 구조체
///
/// 로그인 세션은 서명된 쿠키에 사용자 id만 담아 유지합니다.
/// 쿠키는 세션 비밀키로 서명되어 변조를 방지합니다.
pub struct SessionConfig;

impl SessionConfig {
    /// 세션에서 인증 주체(사용자 id)를 담는 키
    pub const USER_ID_KEY: &'static str = "user_id";
    /// OAuth 인증 진행 중 state 값을 보관하는 키
    pub const OAUTH_STATE_KEY: &'static str = "oauth_state";
    /// 리다이렉트 간 1회성 표시 메시지를 보관하는 키
    pub const FLASH_KEY: &'static str = "flash";

    /// 세션 쿠키 서명용 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 개발용 기본값을 사용하지만,
    /// 프로덕션에서는 경고 로그가 출력됩니다.
    pub fn secret() -> String {
        env::var("SESSION_SECRET").unwrap_or_else(|_| {
            log::warn!("SESSION_SECRET not set, using default (not secure for production!)");
            "ilovescotchscotchyscotchscotch".to_string()
        })
    }

    /// 세션 쿠키 이름을 반환합니다. 기본값: "auth-sid"
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "auth-sid".to_string())
    }

    /// 세션 쿠키 만료 시간을 초 단위로 반환합니다. 기본값: 3600 (1시간)
    ///
    /// 로그인/가입 성공 시 응답에 실리는 세션 쿠키의 max-age가 됩니다.
    pub fn ttl_seconds() -> i64 {
        env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_string() {
        assert_eq!(Provider::from_str("facebook").unwrap(), Provider::Facebook);
        assert_eq!(Provider::from_str("github").unwrap(), Provider::GitHub);
        assert_eq!(Provider::from_str("google").unwrap(), Provider::Google);

        // 대소문자 무관 테스트
        assert_eq!(Provider::from_str("GOOGLE").unwrap(), Provider::Google);
        assert_eq!(Provider::from_str("GitHub").unwrap(), Provider::GitHub);

        // 지원하지 않는 프로바이더 테스트
        assert!(Provider::from_str("twitter").is_err());
        assert!(Provider::from_str("local").is_err());
    }

    #[test]
    fn test_provider_roundtrip() {
        for provider in Provider::ALL {
            assert_eq!(Provider::from_str(provider.as_str()).unwrap(), provider);
        }
    }

    #[test]
    fn test_provider_id_field_matches_document_layout() {
        assert_eq!(Provider::Facebook.id_field(), "facebook.id");
        assert_eq!(Provider::GitHub.id_field(), "github.id");
        assert_eq!(Provider::Google.id_field(), "google.id");
    }

    #[test]
    fn test_provider_serialization() {
        let provider = Provider::GitHub;
        let json = serde_json::to_string(&provider).unwrap();
        assert_eq!(json, "\"github\"");

        let deserialized: Provider = serde_json::from_str(&json).unwrap();
        assert_eq!(provider, deserialized);
    }

    #[test]
    fn test_session_config_defaults() {
        if std::env::var("SESSION_COOKIE_NAME").is_err() {
            assert_eq!(SessionConfig::cookie_name(), "auth-sid");
        }

        if std::env::var("SESSION_TTL_SECONDS").is_err() {
            assert_eq!(SessionConfig::ttl_seconds(), 3600);
        }
    }
}
