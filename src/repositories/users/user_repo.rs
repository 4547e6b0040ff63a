//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB를 주 저장소로 사용하고, Redis를 통한 캐싱을 지원합니다.
//!
//! ## 특징
//!
//! - **하이브리드 스토리지**: MongoDB + Redis 캐싱
//! - **자동 의존성 주입**: 싱글톤 매크로를 통한 DI
//! - **데이터 무결성**: 로컬 이메일과 프로바이더 id에 unique sparse 인덱스
//!
//! ## 캐싱 전략
//!
//! - 개별 사용자: `user:{user_id}`, TTL 600초
//! - 이메일 조회: `user:email:{email}`, TTL 600초
//! - 프로바이더 id 조회는 콜백 플로우에서만 사용되므로 캐싱하지 않습니다.
//!
//! 문서 교체 시 이전 문서의 이메일 키까지 함께 무효화하여
//! 자격증명 해제 직후의 stale 조회를 방지합니다.

use std::sync::Arc;
use async_trait::async_trait;
use mongodb::{bson::{Document, doc, oid::ObjectId}, options::IndexOptions, IndexModel};
use crate::{
    caching::redis::RedisClient,
    config::Provider,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
    repositories::users::user_store::UserStore,
};
use singleton_macro::repository;
use crate::errors::errors::AppError;

/// 사용자 데이터 액세스 리포지토리
///
/// 사용자 문서의 조회/저장 연산을 담당하며,
/// MongoDB 컬렉션과 Redis 캐시를 통합하여 제공합니다.
///
/// ## 에러 처리
///
/// 모든 메서드는 `Result<T, AppError>`를 반환합니다.
///
/// - **DatabaseError**: MongoDB 연결/쿼리 오류
/// - **ValidationError**: 잘못된 ObjectId 형식 등 입력값 오류
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    ///
    /// 자동 주입되는 데이터베이스 컴포넌트입니다.
    /// `users` 컬렉션에 대한 모든 MongoDB 연산을 담당합니다.
    db: Arc<Database>,

    /// Redis 캐시 클라이언트
    ///
    /// 자동 주입되는 Redis 클라이언트입니다.
    /// 조회 성능 향상을 위한 캐싱 레이어를 제공합니다.
    redis: Arc<RedisClient>,
}

impl UserRepository {
    /// ID로 사용자 조회
    ///
    /// 세션 주체 재수화에 사용되는 가장 빈번한 조회 패턴이므로
    /// 캐시 우선 조회를 적용합니다.
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        let cache_key = self.cache_key(id);

        // 캐시 확인
        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        // DB 조회
        let user = self.collection::<User>()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장 (10분)
        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// 정규화된 로컬 이메일로 사용자 조회
    ///
    /// 이메일은 호출 전에 소문자로 정규화되어 있어야 합니다.
    /// 캐시 우선 조회를 적용합니다.
    pub async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "local.email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, 600)
                .await;
        }

        Ok(user)
    }

    /// `(프로바이더, 외부 id)` 쌍으로 사용자 조회
    ///
    /// OAuth 콜백 플로우에서만 사용되므로 캐싱하지 않습니다.
    /// 필터 필드는 [`Provider::id_field`] 디스크립터에서 가져옵니다.
    pub async fn find_by_provider_id(
        &self,
        provider: Provider,
        external_id: &str,
    ) -> Result<Option<User>, AppError> {
        let mut filter = Document::new();
        filter.insert(provider.id_field(), external_id);

        self.collection::<User>()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자 저장 (삽입 또는 전체 교체)
    ///
    /// id가 없으면 새 문서를 삽입하고 생성된 id를 채워 반환합니다.
    /// id가 있으면 문서를 통째로 교체하고, 해당 사용자의 id 캐시와
    /// 이전/현재 이메일 캐시를 무효화합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 저장된 사용자 (id 포함)
    /// * `Err(AppError::DatabaseError)` - 저장 실패 (unique 인덱스 위반 포함)
    pub async fn save(&self, mut user: User) -> Result<User, AppError> {
        match user.id {
            None => {
                let result = self.collection::<User>()
                    .insert_one(&user)
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

                user.id = result.inserted_id.as_object_id();

                // 컬렉션 캐시 무효화
                let _ = self.invalidate_collection_cache(None).await;

                Ok(user)
            }
            Some(object_id) => {
                // 이메일이 바뀌거나 비워진 경우를 위해 이전 문서의 캐시 키를 확보
                let previous = self.collection::<User>()
                    .find_one(doc! { "_id": object_id })
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

                self.collection::<User>()
                    .replace_one(doc! { "_id": object_id }, &user)
                    .await
                    .map_err(|e| AppError::DatabaseError(e.to_string()))?;

                // 캐시 무효화
                let _ = self.invalidate_cache(&object_id.to_hex()).await;

                let mut email_keys: Vec<String> = Vec::new();
                if let Some(previous_email) = previous.and_then(|p| p.local.email) {
                    email_keys.push(Self::email_cache_key(&previous_email));
                }
                if let Some(ref email) = user.local.email {
                    email_keys.push(Self::email_cache_key(email));
                }
                let _ = self.redis.del_multiple(&email_keys).await;

                Ok(user)
            }
        }
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `local.email` - unique + sparse. 로컬 자격증명 이메일 중복 방지
    /// 2. `facebook.id` / `github.id` / `google.id` - unique + sparse.
    ///    하나의 외부 신원이 두 계정에 연동되는 것을 저장소 차원에서 차단
    ///
    /// sparse 속성으로 해당 자격증명이 없는 문서는 인덱스에서 제외됩니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection::<User>();

        let mut indexes = vec![
            IndexModel::builder()
                .keys(doc! { "local.email": 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("local_email_unique".to_string())
                    .build())
                .build(),
        ];

        for provider in Provider::ALL {
            let mut keys = Document::new();
            keys.insert(provider.id_field(), 1);

            indexes.push(
                IndexModel::builder()
                    .keys(keys)
                    .options(IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .name(format!("{}_id_unique", provider.as_str()))
                        .build())
                    .build(),
            );
        }

        collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// 이메일 조회 캐시 키
    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        UserRepository::find_by_id(self, id).await
    }

    async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError> {
        UserRepository::find_by_local_email(self, email).await
    }

    async fn find_by_provider_id(
        &self,
        provider: Provider,
        external_id: &str,
    ) -> Result<Option<User>, AppError> {
        UserRepository::find_by_provider_id(self, provider, external_id).await
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        UserRepository::save(self, user).await
    }
}
