//! 사용자 응답 DTO
//!
//! 엔티티를 클라이언트에 노출 가능한 형태로 변환합니다.
//! 패스워드 해시와 프로바이더 액세스 토큰은 응답에서 제외됩니다.

use serde::{Deserialize, Serialize};
use mongodb::bson::DateTime;
use crate::domain::entities::users::user::{ProviderCredential, User};

/// 프로바이더 자격증명 요약
///
/// 연동 여부와 프로필 정보만 노출하며 토큰은 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub linked: bool,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<&ProviderCredential> for ProviderSummary {
    fn from(credential: &ProviderCredential) -> Self {
        Self {
            linked: credential.is_linked(),
            display_name: credential.display_name.clone(),
            email: credential.email.clone(),
        }
    }
}

/// 사용자 프로필 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    /// 로컬 자격증명의 이메일 (연동되지 않은 경우 None)
    pub email: Option<String>,
    pub has_local_credential: bool,
    pub facebook: ProviderSummary,
    pub github: ProviderSummary,
    pub google: ProviderSummary,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            email: user.local.email.clone(),
            has_local_credential: user.has_local_credential(),
            facebook: ProviderSummary::from(&user.facebook),
            github: ProviderSummary::from(&user.github),
            google: ProviderSummary::from(&user.google),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 인증 성공 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: ProfileResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;

    #[test]
    fn test_profile_response_hides_secrets() {
        let mut user = User::new_local("a@b.com".to_string(), "secret-hash".to_string());
        user.provider_mut(Provider::Google).id = Some("g-1".to_string());
        user.provider_mut(Provider::Google).token = Some("secret-token".to_string());
        user.provider_mut(Provider::Google).display_name = Some("A B".to_string());

        let response = ProfileResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(response.google.linked);
        assert!(!response.facebook.linked);
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("secret-token"));
    }
}
