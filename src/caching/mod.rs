//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시 클라이언트를 제공합니다.
//! 리포지토리 계층의 사용자 조회 성능 최적화에 사용됩니다.

pub mod redis;
