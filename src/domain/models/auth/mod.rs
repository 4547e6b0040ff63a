//! 인증 주체 모델 모듈

pub mod authenticated_user;

pub use authenticated_user::*;
