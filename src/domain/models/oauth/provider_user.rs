//! # 프로바이더별 사용자 정보 모델
//!
//! 각 OAuth 프로바이더의 userinfo 엔드포인트 응답을 역직렬화하기 위한
//! 구조체들입니다. 프로바이더마다 필드 이름과 타입이 제각각이므로
//! (GitHub의 id는 숫자, 이메일은 비공개일 수 있음 등)
//! 원본 구조를 그대로 받은 뒤 [`ProviderProfile`]로 정규화합니다.
//!
//! | 프로바이더 | 엔드포인트 | 표시 이름 |
//! |------------|------------|-----------|
//! | Facebook | `graph.facebook.com/v12.0/me?fields=id,name,email` | `name` |
//! | GitHub | `api.github.com/user` | `name` (없으면 `login`) |
//! | Google | `www.googleapis.com/oauth2/v2/userinfo` | `name` |

use serde::Deserialize;

use crate::utils::string_utils::{clean_optional_string, normalize_email};
use super::provider_profile::ProviderProfile;

/// Facebook Graph API `/me` 응답
///
/// `fields=id,name,email` 쿼리로 요청합니다.
/// 이메일은 사용자가 허용하지 않으면 내려오지 않습니다.
#[derive(Debug, Deserialize)]
pub struct FacebookUserInfo {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl From<FacebookUserInfo> for ProviderProfile {
    fn from(info: FacebookUserInfo) -> Self {
        Self {
            external_id: info.id,
            display_name: info.name,
            email: clean_optional_string(info.email).map(|e| normalize_email(&e)),
        }
    }
}

/// GitHub `/user` 응답
///
/// `id`는 숫자이며, `name`은 설정하지 않은 사용자가 많고
/// `email`은 비공개 설정 시 null로 내려옵니다.
#[derive(Debug, Deserialize)]
pub struct GitHubUserInfo {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<GitHubUserInfo> for ProviderProfile {
    fn from(info: GitHubUserInfo) -> Self {
        let display_name = clean_optional_string(info.name).unwrap_or_else(|| info.login.clone());

        Self {
            external_id: info.id.to_string(),
            display_name,
            email: clean_optional_string(info.email).map(|e| normalize_email(&e)),
        }
    }
}

/// Google OAuth2 UserInfo 응답
///
/// `https://www.googleapis.com/oauth2/v2/userinfo` 엔드포인트와 호환됩니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub verified_email: bool,
    pub name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl From<GoogleUserInfo> for ProviderProfile {
    fn from(info: GoogleUserInfo) -> Self {
        Self {
            external_id: info.id,
            display_name: info.name,
            email: clean_optional_string(info.email).map(|e| normalize_email(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_profile_normalization() {
        let json = r#"{"id":"1234567890","name":"Juan Perez","email":"Juan.Perez@Example.COM"}"#;
        let info: FacebookUserInfo = serde_json::from_str(json).unwrap();
        let profile = ProviderProfile::from(info);

        assert_eq!(profile.external_id, "1234567890");
        assert_eq!(profile.display_name, "Juan Perez");
        assert_eq!(profile.email.as_deref(), Some("juan.perez@example.com"));
    }

    #[test]
    fn test_facebook_profile_without_email() {
        let json = r#"{"id":"42","name":"No Mail"}"#;
        let info: FacebookUserInfo = serde_json::from_str(json).unwrap();
        let profile = ProviderProfile::from(info);

        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_github_profile_falls_back_to_login() {
        let json = r#"{"id":583231,"login":"octocat","name":null,"email":null}"#;
        let info: GitHubUserInfo = serde_json::from_str(json).unwrap();
        let profile = ProviderProfile::from(info);

        assert_eq!(profile.external_id, "583231");
        assert_eq!(profile.display_name, "octocat");
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_github_profile_prefers_real_name() {
        let json = r#"{"id":583231,"login":"octocat","name":"The Octocat","email":"Octo@GitHub.com"}"#;
        let info: GitHubUserInfo = serde_json::from_str(json).unwrap();
        let profile = ProviderProfile::from(info);

        assert_eq!(profile.display_name, "The Octocat");
        assert_eq!(profile.email.as_deref(), Some("octo@github.com"));
    }

    #[test]
    fn test_google_profile_normalization() {
        let json = r#"{
            "id": "110248495921238986420",
            "email": "Aaron.Parecki@Gmail.com",
            "verified_email": true,
            "name": "Aaron Parecki",
            "given_name": "Aaron",
            "family_name": "Parecki",
            "picture": "https://lh4.googleusercontent.com/photo.jpg"
        }"#;
        let info: GoogleUserInfo = serde_json::from_str(json).unwrap();
        let profile = ProviderProfile::from(info);

        assert_eq!(profile.external_id, "110248495921238986420");
        assert_eq!(profile.display_name, "Aaron Parecki");
        assert_eq!(profile.email.as_deref(), Some("aaron.parecki@gmail.com"));
    }
}
