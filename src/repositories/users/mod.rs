//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈

pub mod user_store;
pub mod user_repo;

pub use user_store::*;
pub use user_repo::*;
