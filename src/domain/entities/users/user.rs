//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 하나의 User 문서에 로컬 자격증명과 프로바이더별(Facebook, GitHub, Google)
//! 자격증명을 서브 도큐먼트로 함께 보관하는 통합 사용자 모델을 제공합니다.
//!
//! 자격증명 연동 해제는 서브 도큐먼트의 식별 필드만 비우며,
//! User 문서 자체는 삭제하지 않습니다. 사용자가 나중에 다시
//! 연동할 수 있도록 계정은 항상 유지됩니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use crate::config::Provider;

/// 로컬 이메일/패스워드 자격증명 서브 도큐먼트
///
/// 두 필드 모두 비어 있으면 로컬 자격증명이 연동되지 않은 상태입니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalCredential {
    /// 정규화(소문자)된 이메일. 로컬 자격증명 보유 사용자 간 unique
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// bcrypt 해시된 비밀번호
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

/// 외부 프로바이더 자격증명 서브 도큐먼트
///
/// `id`와 `token`이 식별 필드입니다. 연동 해제 시 이 둘만 비워지고
/// `display_name`/`email`은 남습니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderCredential {
    /// 프로바이더 쪽 사용자 고유 id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 프로바이더가 발급한 액세스 토큰
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// 프로바이더 프로필의 표시 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// 프로바이더 프로필의 이메일 (소문자 정규화)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProviderCredential {
    /// 식별 필드(id)가 채워진 연동 상태인지 확인
    pub fn is_linked(&self) -> bool {
        self.id.is_some()
    }
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 로컬 인증과 외부 프로바이더 인증을 모두 지원하며,
/// 하나의 계정에 여러 자격증명을 연동할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로컬 이메일/패스워드 자격증명
    #[serde(default)]
    pub local: LocalCredential,
    /// Facebook 자격증명
    #[serde(default)]
    pub facebook: ProviderCredential,
    /// GitHub 자격증명
    #[serde(default)]
    pub github: ProviderCredential,
    /// Google 자격증명
    #[serde(default)]
    pub google: ProviderCredential,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 자격증명이 하나도 없는 빈 사용자 생성
    fn blank() -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            local: LocalCredential::default(),
            facebook: ProviderCredential::default(),
            github: ProviderCredential::default(),
            google: ProviderCredential::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 새 로컬 사용자 생성 (이메일/패스워드)
    ///
    /// 이메일은 호출 전에 정규화되어 있어야 합니다.
    pub fn new_local(email: String, password_hash: String) -> Self {
        let mut user = Self::blank();
        user.local.email = Some(email);
        user.local.password_hash = Some(password_hash);
        user
    }

    /// 새 외부 프로바이더 사용자 생성
    ///
    /// 프로바이더 최초 로그인 시 해당 프로바이더의 자격증명만 채워진
    /// 사용자를 생성합니다.
    pub fn new_external(provider: Provider, credential: ProviderCredential) -> Self {
        let mut user = Self::blank();
        *user.provider_mut(provider) = credential;
        user
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 프로바이더에 해당하는 자격증명 서브 도큐먼트 참조
    pub fn provider(&self, provider: Provider) -> &ProviderCredential {
        match provider {
            Provider::Facebook => &self.facebook,
            Provider::GitHub => &self.github,
            Provider::Google => &self.google,
        }
    }

    /// 프로바이더에 해당하는 자격증명 서브 도큐먼트 가변 참조
    pub fn provider_mut(&mut self, provider: Provider) -> &mut ProviderCredential {
        match provider {
            Provider::Facebook => &mut self.facebook,
            Provider::GitHub => &mut self.github,
            Provider::Google => &mut self.google,
        }
    }

    /// 로컬 자격증명 보유 여부
    pub fn has_local_credential(&self) -> bool {
        self.local.email.is_some()
    }

    /// 비밀번호 인증이 가능한 사용자인지 확인
    pub fn can_authenticate_with_password(&self) -> bool {
        self.local.email.is_some() && self.local.password_hash.is_some()
    }

    /// 수정 시간 갱신
    ///
    /// 자격증명을 변경한 뒤 저장하기 전에 호출합니다.
    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user() {
        let user = User::new_local("a@b.com".to_string(), "hash".to_string());

        assert!(user.id.is_none());
        assert_eq!(user.local.email.as_deref(), Some("a@b.com"));
        assert_eq!(user.local.password_hash.as_deref(), Some("hash"));
        assert!(user.has_local_credential());
        assert!(user.can_authenticate_with_password());
        assert!(!user.facebook.is_linked());
        assert!(!user.github.is_linked());
        assert!(!user.google.is_linked());
    }

    #[test]
    fn test_new_external_user() {
        let credential = ProviderCredential {
            id: Some("gh-42".to_string()),
            token: Some("token".to_string()),
            display_name: Some("Octo Cat".to_string()),
            email: Some("octo@cat.com".to_string()),
        };
        let user = User::new_external(Provider::GitHub, credential);

        assert!(!user.has_local_credential());
        assert!(user.github.is_linked());
        assert_eq!(user.provider(Provider::GitHub).id.as_deref(), Some("gh-42"));
        assert!(!user.facebook.is_linked());
        assert!(!user.google.is_linked());
    }

    #[test]
    fn test_provider_accessor_mapping() {
        let mut user = User::new_local("a@b.com".to_string(), "hash".to_string());
        user.provider_mut(Provider::Facebook).id = Some("fb-1".to_string());

        assert_eq!(user.facebook.id.as_deref(), Some("fb-1"));
        assert!(user.provider(Provider::Facebook).is_linked());
        assert!(!user.provider(Provider::Google).is_linked());
    }

    #[test]
    fn test_unset_fields_are_skipped_in_bson() {
        // 연동되지 않은 자격증명 필드는 문서에 실리지 않아야
        // `facebook.id` 형태의 필터 조회가 빈 값에 매칭되지 않는다
        let user = User::new_local("a@b.com".to_string(), "hash".to_string());
        let doc = mongodb::bson::to_document(&user).unwrap();

        let facebook = doc.get_document("facebook").unwrap();
        assert!(!facebook.contains_key("id"));
        assert!(!facebook.contains_key("token"));
        assert!(!doc.contains_key("_id"));
    }
}
