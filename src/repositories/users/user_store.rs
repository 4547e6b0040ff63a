//! # 사용자 저장소 인터페이스
//!
//! 계정 정합(reconciliation) 로직이 의존하는 저장소 추상화입니다.
//! 프로덕션에서는 MongoDB 기반 [`super::user_repo::UserRepository`]가
//! 이 trait을 구현하고, 테스트에서는 인메모리 구현을 사용합니다.

use async_trait::async_trait;

use crate::config::Provider;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;

/// 사용자 저장소 추상화
///
/// 단일 문서 단위의 읽기/쓰기만 요구합니다.
/// 쓰기의 원자성은 저장소 구현이 보장한다고 가정하며,
/// 이 계층은 별도의 잠금을 수행하지 않습니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// id(16진수 ObjectId 문자열)로 사용자를 조회합니다.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// 정규화된 로컬 이메일로 사용자를 조회합니다.
    async fn find_by_local_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// `(프로바이더, 외부 id)` 쌍으로 사용자를 조회합니다.
    async fn find_by_provider_id(
        &self,
        provider: Provider,
        external_id: &str,
    ) -> Result<Option<User>, AppError>;

    /// 사용자를 저장합니다.
    ///
    /// id가 없으면 새 문서를 삽입하고 id가 채워진 사용자를 반환하며,
    /// id가 있으면 기존 문서를 통째로 교체합니다.
    async fn save(&self, user: User) -> Result<User, AppError>;
}
