//! # 계정 정합(Identity Reconciliation) 서비스
//!
//! 인증 시도 하나와 현재 세션의 로그인 상태를 입력으로 받아
//! 계정 생성 / 거부 / 연동 / 재연동 중 하나를 판정하고 결과를 저장하는
//! 이 서비스의 핵심 비즈니스 로직입니다.
//!
//! ## 판정 규칙
//!
//! ### 로컬 회원가입 (`signup_local`)
//!
//! ```text
//! 세션에 로그인된 사용자 없음
//!   ├─ 이메일 소유자 있음 ──► 거부 "That email is already taken."
//!   └─ 이메일 소유자 없음 ──► 새 User 생성 + 로컬 자격증명 저장
//! 세션에 로그인된 사용자 있음
//!   ├─ 로컬 자격증명 없음 ──► 현재 계정에 로컬 자격증명 연동
//!   └─ 로컬 자격증명 있음 ──► 무시 (현재 사용자 그대로 반환)
//! ```
//!
//! ### 외부 신원 정합 (`reconcile_external_identity`)
//!
//! ```text
//! 세션에 로그인된 사용자 없음
//!   ├─ (프로바이더, 외부 id) 소유자 있음
//!   │     ├─ 토큰 없음 ──► 재연동 (토큰/프로필 갱신)
//!   │     └─ 토큰 있음 ──► 그대로 반환 (재로그인)
//!   └─ 소유자 없음 ──────► 새 User 생성 (프로바이더 최초 가입)
//! 세션에 로그인된 사용자 있음 (연동 플로우)
//!   ├─ 다른 계정이 소유 ──► 거부 "That account is already linked to another user."
//!   └─ 소유자 없거나 본인 ─► 현재 계정의 프로바이더 자격증명 덮어쓰기
//! ```
//!
//! 하나의 외부 신원이 두 계정에 연동되는 것은 이 계층의 소유자 확인과
//! 저장소의 unique sparse 인덱스로 이중 차단됩니다.
//!
//! ## 동시성
//!
//! 같은 외부 신원에 대한 동시 정합 시도는 상호 배제되지 않습니다.
//! 두 요청이 동시에 "소유자 없음"을 관측하면 둘 다 계정을 생성할 수
//! 있으며, 이 간극은 회귀 테스트로 문서화되어 있고 프로덕션에서는
//! unique 인덱스가 한쪽 쓰기를 실패시킵니다.

use std::sync::Arc;

use crate::config::{PasswordConfig, Provider};
use crate::core::registry::ServiceLocator;
use crate::domain::entities::users::user::{ProviderCredential, User};
use crate::domain::models::oauth::provider_profile::ProviderProfile;
use crate::errors::errors::AppError;
use crate::repositories::users::user_store::UserStore;
use crate::utils::string_utils::normalize_email;

/// 연동 해제 대상 자격증명
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlinkTarget {
    /// 로컬 이메일/패스워드 자격증명
    Local,
    /// 외부 프로바이더 자격증명
    Provider(Provider),
}

/// 계정 정합 서비스
///
/// 저장소 추상화([`UserStore`])에만 의존하므로 MongoDB 없이도
/// 인메모리 구현으로 전체 판정 로직을 검증할 수 있습니다.
/// 기동 시점에 실제 리포지토리를 주입받아
/// `ServiceLocator::set()`으로 등록됩니다.
pub struct ReconciliationService {
    store: Arc<dyn UserStore>,
}

impl ReconciliationService {
    /// 새 정합 서비스 생성
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// 등록된 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 기동 시 `ServiceLocator::set()`으로 등록되어 있어야 합니다.
    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<ReconciliationService>()
    }

    /// 로컬 회원가입 또는 로컬 자격증명 연동
    ///
    /// 세션에 로그인된 사용자가 없으면 새 계정을 생성하고,
    /// 로그인된 상태면 현재 계정에 로컬 자격증명을 연동합니다.
    /// 이미 로컬 자격증명이 있는 경우에는 아무것도 하지 않습니다.
    ///
    /// # 인자
    ///
    /// * `current_user` - 세션에서 복원된 현재 사용자 (없을 수 있음)
    /// * `email` - 가입 폼의 이메일 (내부에서 소문자로 정규화)
    /// * `password` - 평문 비밀번호 (bcrypt로 해싱되어 저장)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성되었거나 연동된 사용자
    /// * `Err(AppError::ConflictError)` - 이미 사용 중인 이메일
    pub async fn signup_local(
        &self,
        current_user: Option<User>,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let email = normalize_email(email);

        match current_user {
            None => {
                // 이메일 소유자가 이미 있으면 가입 거부
                if self.store.find_by_local_email(&email).await?.is_some() {
                    return Err(AppError::ConflictError(
                        "That email is already taken.".to_string(),
                    ));
                }

                let password_hash = Self::hash_password(password)?;
                let user = self.store.save(User::new_local(email, password_hash)).await?;

                log::info!(
                    "새 로컬 사용자 등록: {}",
                    user.local.email.as_deref().unwrap_or_default()
                );
                Ok(user)
            }
            Some(mut user) if !user.has_local_credential() => {
                // 로그인 상태에서 가입 폼 제출: 현재 계정에 로컬 자격증명 연동
                user.local.email = Some(email);
                user.local.password_hash = Some(Self::hash_password(password)?);
                user.touch();

                let user = self.store.save(user).await?;
                log::info!(
                    "로컬 자격증명 연동: {}",
                    user.id_string().unwrap_or_default()
                );
                Ok(user)
            }
            Some(user) => {
                // 이미 로컬 자격증명이 있으면 조용히 무시한다
                Ok(user)
            }
        }
    }

    /// 로컬 이메일/패스워드 로그인
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 인증된 사용자
    /// * `Err(AppError::AuthenticationError)` - 사용자 없음 또는 비밀번호 불일치
    pub async fn login_local(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        let user = self.store
            .find_by_local_email(&email)
            .await?
            .ok_or_else(|| AppError::AuthenticationError("No user found.".to_string()))?;

        // 연동 해제된 계정은 이메일 조회에 걸리지 않지만, 해시가 비어 있는
        // 문서가 조회된 경우에도 같은 메시지로 거부한다
        let password_hash = user.local.password_hash.as_ref()
            .ok_or_else(|| AppError::AuthenticationError("No user found.".to_string()))?;

        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            return Err(AppError::AuthenticationError(
                "Oops! Wrong password.".to_string(),
            ));
        }

        Ok(user)
    }

    /// 외부 신원 정합
    ///
    /// OAuth 콜백에서 획득한 외부 신원을 현재 세션 상태에 따라
    /// 계정 생성 / 로그인 / 연동 / 재연동 중 하나로 판정합니다.
    ///
    /// # 인자
    ///
    /// * `current_user` - 세션에서 복원된 현재 사용자 (없으면 로그인 플로우)
    /// * `provider` - 외부 신원을 발급한 프로바이더
    /// * `profile` - 정규화된 프로바이더 프로필
    /// * `access_token` - 프로바이더가 발급한 액세스 토큰
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 판정 결과가 반영된 사용자
    /// * `Err(AppError::ConflictError)` - 외부 신원이 이미 다른 계정에 연동됨
    pub async fn reconcile_external_identity(
        &self,
        current_user: Option<User>,
        provider: Provider,
        profile: ProviderProfile,
        access_token: &str,
    ) -> Result<User, AppError> {
        match current_user {
            None => {
                match self.store.find_by_provider_id(provider, &profile.external_id).await? {
                    Some(mut user) => {
                        if user.provider(provider).token.is_none() {
                            // 과거에 연동했다가 해제된 계정: 토큰과 프로필을 다시 채운다
                            let credential = user.provider_mut(provider);
                            credential.token = Some(access_token.to_string());
                            credential.display_name = Some(profile.display_name);
                            credential.email = profile.email;
                            user.touch();

                            let user = self.store.save(user).await?;
                            log::info!(
                                "{} 자격증명 재연동: {}",
                                provider.as_str(),
                                user.id_string().unwrap_or_default()
                            );
                            Ok(user)
                        } else {
                            // 이미 연동된 계정의 재로그인. 저장된 액세스 토큰은
                            // 갱신하지 않으므로 시간이 지나면 만료된 토큰이 남는다.
                            // TODO: 재로그인 시 토큰/프로필을 갱신할지 제품 결정 필요
                            log::info!(
                                "{} 사용자 로그인: {}",
                                provider.as_str(),
                                user.id_string().unwrap_or_default()
                            );
                            Ok(user)
                        }
                    }
                    None => {
                        // 처음 보는 외부 신원: 새 계정 생성
                        let credential = ProviderCredential {
                            id: Some(profile.external_id.clone()),
                            token: Some(access_token.to_string()),
                            display_name: Some(profile.display_name),
                            email: profile.email,
                        };

                        let user = self.store.save(User::new_external(provider, credential)).await?;
                        log::info!(
                            "새 {} 사용자 등록: {}",
                            provider.as_str(),
                            user.id_string().unwrap_or_default()
                        );
                        Ok(user)
                    }
                }
            }
            Some(mut user) => {
                // 연동 플로우: 같은 외부 신원을 다른 계정이 소유하고 있으면 거부
                if let Some(owner) = self.store
                    .find_by_provider_id(provider, &profile.external_id)
                    .await?
                {
                    if owner.id != user.id {
                        return Err(AppError::ConflictError(
                            "That account is already linked to another user.".to_string(),
                        ));
                    }
                }

                let credential = user.provider_mut(provider);
                credential.id = Some(profile.external_id);
                credential.token = Some(access_token.to_string());
                credential.display_name = Some(profile.display_name);
                credential.email = profile.email;
                user.touch();

                let user = self.store.save(user).await?;
                log::info!(
                    "{} 자격증명 연동: {}",
                    provider.as_str(),
                    user.id_string().unwrap_or_default()
                );
                Ok(user)
            }
        }
    }

    /// 자격증명 연동 해제
    ///
    /// 로컬 자격증명은 이메일과 패스워드 해시를 비우고,
    /// 프로바이더 자격증명은 식별 필드(id, token)만 비웁니다.
    /// 프로필 정보(display_name, email)와 User 문서 자체는 유지되어
    /// 사용자가 나중에 다시 연동할 수 있습니다.
    pub async fn unlink(&self, mut user: User, target: UnlinkTarget) -> Result<User, AppError> {
        match target {
            UnlinkTarget::Local => {
                user.local.email = None;
                user.local.password_hash = None;
            }
            UnlinkTarget::Provider(provider) => {
                let credential = user.provider_mut(provider);
                credential.id = None;
                credential.token = None;
            }
        }
        user.touch();

        let user = self.store.save(user).await?;
        log::info!(
            "자격증명 연동 해제: {} ({:?})",
            user.id_string().unwrap_or_default(),
            target
        );
        Ok(user)
    }

    /// 비밀번호 해싱 (환경별 bcrypt cost 사용)
    fn hash_password(password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;

    /// 인메모리 사용자 저장소 테스트 더블
    ///
    /// `yield_in_lookup`을 켜면 조회 결과를 계산한 뒤 한 번 양보하여,
    /// 조회와 저장 사이에 다른 태스크가 끼어드는 동시 실행 시나리오를
    /// 결정적으로 재현할 수 있다.
    struct MemoryUserStore {
        users: Mutex<Vec<User>>,
        yield_in_lookup: bool,
    }

    impl MemoryUserStore {
        fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
                yield_in_lookup: false,
            }
        }

        fn with_lookup_yield() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
                yield_in_lookup: true,
            }
        }

        fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        fn count_by_provider_id(&self, provider: Provider, external_id: &str) -> usize {
            self.users
                .lock()
                .unwrap()
                .iter()
                .filter(|u| u.provider(provider).id.as_deref() == Some(external_id))
                .count()
        }

        fn insert_raw(&self, mut user: User) -> User {
            let mut users = self.users.lock().unwrap();
            user.id = Some(ObjectId::new());
            users.push(user.clone());
            user
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|u| u.id_string().as_deref() == Some(id))
                .cloned())
        }

        async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
            let found = {
                let users = self.users.lock().unwrap();
                users
                    .iter()
                    .find(|u| u.local.email.as_deref() == Some(email))
                    .cloned()
            };

            if self.yield_in_lookup {
                actix_web::rt::task::yield_now().await;
            }

            Ok(found)
        }

        async fn find_by_provider_id(
            &self,
            provider: Provider,
            external_id: &str,
        ) -> Result<Option<User>, AppError> {
            let found = {
                let users = self.users.lock().unwrap();
                users
                    .iter()
                    .find(|u| u.provider(provider).id.as_deref() == Some(external_id))
                    .cloned()
            };

            if self.yield_in_lookup {
                actix_web::rt::task::yield_now().await;
            }

            Ok(found)
        }

        async fn save(&self, mut user: User) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();

            match user.id {
                None => {
                    user.id = Some(ObjectId::new());
                    users.push(user.clone());
                }
                Some(id) => {
                    if let Some(existing) = users.iter_mut().find(|u| u.id == Some(id)) {
                        *existing = user.clone();
                    } else {
                        users.push(user.clone());
                    }
                }
            }

            Ok(user)
        }
    }

    fn engine_with(store: &Arc<MemoryUserStore>) -> ReconciliationService {
        let store: Arc<dyn UserStore> = store.clone();
        ReconciliationService::new(store)
    }

    fn sample_profile(external_id: &str) -> ProviderProfile {
        ProviderProfile {
            external_id: external_id.to_string(),
            display_name: "The Octocat".to_string(),
            email: Some("octo@github.com".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_signup_creates_user_with_normalized_email() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let user = engine
            .signup_local(None, "Test@Mail.com", "secret")
            .await
            .unwrap();

        assert!(user.id.is_some());
        assert_eq!(user.local.email.as_deref(), Some("test@mail.com"));
        assert_eq!(store.user_count(), 1);

        // 저장된 해시로 원본 비밀번호가 검증되어야 한다
        let hash = user.local.password_hash.as_deref().unwrap();
        assert!(bcrypt::verify("secret", hash).unwrap());
        assert!(!bcrypt::verify("wrong", hash).unwrap());
    }

    #[actix_web::test]
    async fn test_signup_rejects_duplicate_email_case_insensitively() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        engine.signup_local(None, "a@b.com", "secret").await.unwrap();

        let error = engine
            .signup_local(None, "A@B.COM", "other")
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "That email is already taken.");
        assert!(error.is_rejection());
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_signup_links_local_credential_to_current_user() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        // 프로바이더로 먼저 가입한 사용자
        let user = engine
            .reconcile_external_identity(None, Provider::GitHub, sample_profile("gh-1"), "token")
            .await
            .unwrap();
        assert!(!user.has_local_credential());

        // 로그인된 상태로 가입 폼 제출 → 같은 계정에 로컬 자격증명 연동
        let linked = engine
            .signup_local(Some(user.clone()), "Octo@Cat.com", "secret")
            .await
            .unwrap();

        assert_eq!(linked.id, user.id);
        assert_eq!(linked.local.email.as_deref(), Some("octo@cat.com"));
        assert!(linked.github.is_linked());
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_signup_is_noop_when_local_credential_exists() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let user = engine.signup_local(None, "a@b.com", "secret").await.unwrap();

        // 로그인 상태에서 다른 이메일로 다시 가입을 시도해도 무시된다
        let unchanged = engine
            .signup_local(Some(user.clone()), "other@mail.com", "other")
            .await
            .unwrap();

        assert_eq!(unchanged.id, user.id);
        assert_eq!(unchanged.local.email.as_deref(), Some("a@b.com"));
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_login_succeeds_with_mixed_case_email() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let created = engine.signup_local(None, "a@b.com", "secret").await.unwrap();

        let user = engine.login_local("A@B.com", "secret").await.unwrap();
        assert_eq!(user.id, created.id);
    }

    #[actix_web::test]
    async fn test_login_rejections() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        engine
            .signup_local(None, "test@mail.com", "secret")
            .await
            .unwrap();

        let wrong_password = engine
            .login_local("test@mail.com", "wrong")
            .await
            .unwrap_err();
        assert_eq!(wrong_password.to_string(), "Oops! Wrong password.");

        let unknown = engine
            .login_local("nobody@mail.com", "secret")
            .await
            .unwrap_err();
        assert_eq!(unknown.to_string(), "No user found.");
    }

    #[actix_web::test]
    async fn test_reconcile_twice_returns_same_user() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let first = engine
            .reconcile_external_identity(None, Provider::Google, sample_profile("g-1"), "token-1")
            .await
            .unwrap();
        let second = engine
            .reconcile_external_identity(None, Provider::Google, sample_profile("g-1"), "token-2")
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.count_by_provider_id(Provider::Google, "g-1"), 1);

        // 재로그인 시 저장된 토큰은 갱신되지 않는다 (알려진 동작)
        assert_eq!(second.google.token.as_deref(), Some("token-1"));
    }

    /// 같은 외부 신원에 대한 동시 첫 로그인은 상호 배제되지 않아
    /// 계정이 중복 생성될 수 있음을 문서화하는 회귀 테스트.
    /// 저장소가 조회와 저장 사이에서 양보하도록 하여
    /// 두 태스크 모두 "소유자 없음"을 관측하는 교차 실행을 재현한다.
    #[actix_web::test]
    async fn test_concurrent_first_logins_duplicate_account() {
        let store = Arc::new(MemoryUserStore::with_lookup_yield());
        let engine = engine_with(&store);

        let first = engine.reconcile_external_identity(
            None,
            Provider::GitHub,
            sample_profile("race-1"),
            "token-a",
        );
        let second = engine.reconcile_external_identity(
            None,
            Provider::GitHub,
            sample_profile("race-1"),
            "token-b",
        );

        let (first, second) = futures_util::future::join(first, second).await;
        first.unwrap();
        second.unwrap();

        // 직렬화 장치가 없으므로 한 외부 신원에 두 계정이 생긴다.
        // 프로덕션에서는 unique sparse 인덱스가 한쪽 쓰기를 실패시킨다.
        assert_eq!(store.count_by_provider_id(Provider::GitHub, "race-1"), 2);
    }

    #[actix_web::test]
    async fn test_link_rejects_identity_owned_by_another_user() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        // 사용자 A가 외부 신원을 소유
        engine
            .reconcile_external_identity(None, Provider::Facebook, sample_profile("fb-1"), "token")
            .await
            .unwrap();

        // 사용자 B가 로그인된 상태에서 같은 신원을 연동 시도
        let other = engine.signup_local(None, "b@mail.com", "secret").await.unwrap();
        let error = engine
            .reconcile_external_identity(
                Some(other),
                Provider::Facebook,
                sample_profile("fb-1"),
                "token-2",
            )
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "That account is already linked to another user."
        );
        assert_eq!(store.count_by_provider_id(Provider::Facebook, "fb-1"), 1);
    }

    #[actix_web::test]
    async fn test_link_overwrites_own_credential() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let user = engine
            .reconcile_external_identity(None, Provider::GitHub, sample_profile("gh-9"), "old-token")
            .await
            .unwrap();

        // 본인 소유 신원의 재연동은 허용되며 토큰이 갱신된다
        let relinked = engine
            .reconcile_external_identity(
                Some(user.clone()),
                Provider::GitHub,
                sample_profile("gh-9"),
                "new-token",
            )
            .await
            .unwrap();

        assert_eq!(relinked.id, user.id);
        assert_eq!(relinked.github.token.as_deref(), Some("new-token"));
    }

    #[actix_web::test]
    async fn test_relink_restores_unlinked_credential() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        // 과거에 연동되었다가 토큰만 비워진 상태의 문서
        let mut stale = User::new_local("old@mail.com".to_string(), "hash".to_string());
        stale.provider_mut(Provider::Google).id = Some("g-77".to_string());
        stale.provider_mut(Provider::Google).display_name = Some("Old Name".to_string());
        let stale = store.insert_raw(stale);

        let relinked = engine
            .reconcile_external_identity(
                None,
                Provider::Google,
                ProviderProfile {
                    external_id: "g-77".to_string(),
                    display_name: "New Name".to_string(),
                    email: Some("new@mail.com".to_string()),
                },
                "fresh-token",
            )
            .await
            .unwrap();

        assert_eq!(relinked.id, stale.id);
        assert_eq!(relinked.google.token.as_deref(), Some("fresh-token"));
        assert_eq!(relinked.google.display_name.as_deref(), Some("New Name"));
        assert_eq!(relinked.google.email.as_deref(), Some("new@mail.com"));
        assert_eq!(store.user_count(), 1);
    }

    #[actix_web::test]
    async fn test_unlink_local_then_login_fails() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let user = engine
            .signup_local(None, "test@mail.com", "secret")
            .await
            .unwrap();

        let unlinked = engine.unlink(user, UnlinkTarget::Local).await.unwrap();
        assert!(!unlinked.has_local_credential());
        assert!(unlinked.local.password_hash.is_none());

        // 계정 자체는 유지된다
        assert_eq!(store.user_count(), 1);

        let error = engine
            .login_local("test@mail.com", "secret")
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "No user found.");
    }

    #[actix_web::test]
    async fn test_unlink_provider_clears_identifying_fields_only() {
        let store = Arc::new(MemoryUserStore::new());
        let engine = engine_with(&store);

        let user = engine
            .reconcile_external_identity(None, Provider::GitHub, sample_profile("gh-3"), "token")
            .await
            .unwrap();

        let unlinked = engine
            .unlink(user, UnlinkTarget::Provider(Provider::GitHub))
            .await
            .unwrap();

        assert!(unlinked.github.id.is_none());
        assert!(unlinked.github.token.is_none());
        // 프로필 정보는 남는다
        assert_eq!(unlinked.github.display_name.as_deref(), Some("The Octocat"));
        assert_eq!(store.user_count(), 1);
    }
}
