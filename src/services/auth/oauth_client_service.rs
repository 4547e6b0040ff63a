//! # OAuth 2.0 클라이언트 서비스
//!
//! 세 프로바이더(Facebook, GitHub, Google)에 대한 OAuth 2.0
//! Authorization Code 플로우를 하나의 서비스로 처리합니다.
//! 프로바이더별 차이는 [`OAuthSettings`] 디스크립터 테이블과
//! userinfo 응답 역직렬화 분기에만 존재합니다.
//!
//! ## OAuth 2.0 Authorization Code Flow
//!
//! ```text
//! 1. GET /auth/{provider}            → authorize_redirect(): state 생성, 인증 URL 구성
//! 2. 302 → 프로바이더 인증 페이지       사용자가 프로바이더에서 인증
//! 3. GET /auth/{provider}/callback   → state 검증 (세션에 보관한 값과 일치 확인)
//! 4. exchange_code()                 → Authorization Code를 액세스 토큰으로 교환
//! 5. fetch_profile()                 → 토큰으로 프로필 조회, ProviderProfile로 정규화
//! 6. 계정 정합 엔진으로 전달            → 생성/로그인/연동/재연동 판정
//! ```
//!
//! ## 보안 특징
//!
//! - **State 파라미터**: 타임스탬프와 시크릿에서 파생한 값을 세션에 보관하고
//!   콜백에서 일치를 확인하여 CSRF를 방지합니다.
//! - **Code 즉시 교환**: Authorization Code는 수신 즉시 토큰으로 교환합니다.
//! - **Client Secret 보호**: 토큰 교환은 서버 사이드에서만 수행됩니다.

use std::sync::Arc;

use crate::config::{OAuthSettings, Provider};
use crate::core::registry::ServiceLocator;
use crate::domain::models::oauth::provider_profile::{AuthorizeRedirect, OAuthTokenResponse, ProviderProfile};
use crate::domain::models::oauth::provider_user::{FacebookUserInfo, GitHubUserInfo, GoogleUserInfo};
use crate::errors::errors::AppError;

/// OAuth 2.0 클라이언트 서비스
///
/// 기동 시점에 로드된 [`OAuthSettings`]를 주입받아
/// `ServiceLocator::set()`으로 수동 등록되는 싱글톤입니다.
pub struct OAuthClientService {
    /// 프로바이더별 엔드포인트/자격증명 디스크립터
    settings: Arc<OAuthSettings>,
    /// 토큰 교환과 프로필 조회에 사용하는 HTTP 클라이언트
    http: reqwest::Client,
}

impl OAuthClientService {
    /// 새 OAuth 클라이언트 서비스 생성
    pub fn new(settings: Arc<OAuthSettings>) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }

    /// 등록된 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 기동 시 `ServiceLocator::set()`으로 등록되어 있어야 합니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<OAuthClientService>()
    }

    /// 프로바이더 인증 페이지로의 리다이렉트 정보 생성
    ///
    /// Authorization Code Grant 플로우의 첫 단계입니다.
    /// 반환된 `state`는 세션에 보관했다가 콜백에서 검증해야 합니다.
    pub fn authorize_redirect(&self, provider: Provider) -> Result<AuthorizeRedirect, AppError> {
        let config = self.settings.provider(provider);
        let state = self.generate_oauth_state()?;

        let params = [
            ("client_id", config.client_id.clone()),
            ("redirect_uri", config.redirect_uri.clone()),
            ("scope", config.scope.clone()),
            ("response_type", "code".to_string()),
            ("state", state.clone()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let authorize_url = format!("{}?{}", config.auth_uri, query_string);

        Ok(AuthorizeRedirect {
            authorize_url,
            state,
        })
    }

    /// Authorization Code를 액세스 토큰으로 교환
    ///
    /// 프로바이더 토큰 엔드포인트에 `grant_type=authorization_code`
    /// 폼을 POST합니다. GitHub는 `Accept: application/json` 헤더가 없으면
    /// 폼 인코딩으로 응답하므로 항상 JSON을 명시합니다.
    pub async fn exchange_code(
        &self,
        provider: Provider,
        auth_code: &str,
    ) -> Result<OAuthTokenResponse, AppError> {
        let config = self.settings.provider(provider);

        let params = [
            ("code", auth_code),
            ("client_id", &config.client_id),
            ("client_secret", &config.client_secret),
            ("redirect_uri", &config.redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http
            .post(&config.token_uri)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "{} 토큰 요청 실패: {}",
                    provider.as_str(),
                    e
                ))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패: {}",
                provider.as_str(),
                error_text
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "{} 토큰 응답 파싱 실패: {}",
                    provider.as_str(),
                    e
                ))
            })
    }

    /// 액세스 토큰으로 프로바이더 프로필 조회
    ///
    /// 프로바이더별 userinfo 엔드포인트를 호출하고 응답을
    /// [`ProviderProfile`]로 정규화합니다. 프로바이더 분기는
    /// 이 메서드 아래로 내려가지 않습니다.
    pub async fn fetch_profile(
        &self,
        provider: Provider,
        access_token: &str,
    ) -> Result<ProviderProfile, AppError> {
        let config = self.settings.provider(provider);

        let mut request = self.http
            .get(&config.userinfo_uri)
            .bearer_auth(access_token);

        request = match provider {
            // Graph API는 원하는 필드를 명시해야 이메일이 내려온다
            Provider::Facebook => request.query(&[("fields", "id,name,email")]),
            // GitHub API는 User-Agent 헤더가 없는 요청을 거부한다
            Provider::GitHub => request
                .header(reqwest::header::USER_AGENT, "social_auth_backend")
                .header(reqwest::header::ACCEPT, "application/vnd.github+json"),
            Provider::Google => request,
        };

        let response = request.send().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "{} 사용자 정보 요청 실패: {}",
                provider.as_str(),
                e
            ))
        })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패: {}",
                provider.as_str(),
                error_text
            )));
        }

        let parse_error = |e: reqwest::Error| {
            AppError::ExternalServiceError(format!(
                "{} 사용자 정보 파싱 실패: {}",
                provider.as_str(),
                e
            ))
        };

        let profile = match provider {
            Provider::Facebook => response
                .json::<FacebookUserInfo>()
                .await
                .map_err(parse_error)?
                .into(),
            Provider::GitHub => response
                .json::<GitHubUserInfo>()
                .await
                .map_err(parse_error)?
                .into(),
            Provider::Google => response
                .json::<GoogleUserInfo>()
                .await
                .map_err(parse_error)?
                .into(),
        };

        Ok(profile)
    }

    /// OAuth State 파라미터 생성
    ///
    /// 타임스탬프와 state 시크릿을 결합해 해시한 값을 사용합니다.
    /// 생성된 값은 세션에 보관되어 콜백에서 일치 여부로 검증되므로
    /// 세션 바깥에서 재현 가능할 필요는 없습니다.
    fn generate_oauth_state(&self) -> Result<String, AppError> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::InternalError(format!("시간 계산 실패: {}", e)))?
            .as_nanos();

        let state_data = format!("{}:{}", timestamp, self.settings.state_secret);

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        state_data.hash(&mut hasher);

        Ok(format!("{:x}", hasher.finish()))
    }

    /// OAuth State 파라미터 검증
    ///
    /// 콜백에서 받은 state가 인증 시작 시 세션에 보관한 값과
    /// 일치하는지 확인하여 CSRF 공격을 방지합니다.
    ///
    /// # 인자
    ///
    /// * `received` - 콜백 쿼리로 받은 state
    /// * `expected` - 세션에 보관해 둔 state (없으면 검증 실패)
    pub fn verify_oauth_state(
        &self,
        received: Option<&str>,
        expected: Option<&str>,
    ) -> Result<(), AppError> {
        match (received, expected) {
            (Some(received), Some(expected))
                if !received.is_empty() && received == expected => Ok(()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 OAuth state 입니다".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderOAuthConfig;

    fn test_settings() -> Arc<OAuthSettings> {
        let provider_config = |prefix: &str| ProviderOAuthConfig {
            client_id: format!("{}-client-id", prefix),
            client_secret: format!("{}-client-secret", prefix),
            redirect_uri: format!("http://localhost:8080/auth/{}/callback", prefix),
            auth_uri: format!("https://{}.example.com/oauth/authorize", prefix),
            token_uri: format!("https://{}.example.com/oauth/token", prefix),
            userinfo_uri: format!("https://{}.example.com/user", prefix),
            scope: "email".to_string(),
        };

        Arc::new(OAuthSettings {
            facebook: provider_config("facebook"),
            github: provider_config("github"),
            google: provider_config("google"),
            state_secret: "test-state-secret".to_string(),
        })
    }

    #[test]
    fn test_authorize_redirect_contains_required_params() {
        let service = OAuthClientService::new(test_settings());
        let redirect = service.authorize_redirect(Provider::GitHub).unwrap();

        assert!(redirect.authorize_url.starts_with("https://github.example.com/oauth/authorize?"));
        assert!(redirect.authorize_url.contains("client_id=github-client-id"));
        assert!(redirect.authorize_url.contains("response_type=code"));
        assert!(redirect.authorize_url.contains(&format!("state={}", redirect.state)));
        // redirect_uri는 URL 인코딩되어야 한다
        assert!(redirect.authorize_url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fgithub%2Fcallback"));
    }

    #[test]
    fn test_authorize_redirect_states_are_unique_per_attempt() {
        let service = OAuthClientService::new(test_settings());
        let first = service.authorize_redirect(Provider::Google).unwrap();
        let second = service.authorize_redirect(Provider::Google).unwrap();

        assert_ne!(first.state, second.state);
    }

    #[test]
    fn test_verify_oauth_state() {
        let service = OAuthClientService::new(test_settings());

        assert!(service.verify_oauth_state(Some("abc"), Some("abc")).is_ok());
        assert!(service.verify_oauth_state(Some("abc"), Some("def")).is_err());
        assert!(service.verify_oauth_state(Some(""), Some("")).is_err());
        assert!(service.verify_oauth_state(None, Some("abc")).is_err());
        assert!(service.verify_oauth_state(Some("abc"), None).is_err());
    }

    #[test]
    fn test_state_mismatch_is_a_rejection() {
        let service = OAuthClientService::new(test_settings());
        let error = service.verify_oauth_state(None, None).unwrap_err();

        assert!(error.is_rejection());
    }
}
