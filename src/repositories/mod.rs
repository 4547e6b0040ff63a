//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로를 사용하여 싱글톤으로 관리되는 리포지토리들과
//! 상위 계층이 저장소 구현에 의존하지 않도록 하는 [`users::UserStore`]
//! trait을 제공합니다.

pub mod users;
