//! # Configuration Module
//!
//! 인증 백엔드의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 환경 관련 설정
//! - [`auth_config`] - OAuth 프로바이더, 세션 관련 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공합니다.
//! - OAuth 클라이언트 자격증명은 기동 시점에 [`auth_config::OAuthSettings`]
//!   구조체로 한 번 로드되어 명시적으로 주입됩니다. 요청 처리 중에
//!   전역 가변 상태를 읽지 않습니다.
//! - 기본값은 개발 환경에서만 안전하며, 누락된 필수 설정은 기동 시 패닉으로
//!   조기에 드러납니다.
//!
//! ## 필수 환경 변수 (OAuth 사용 시)
//!
//! ```bash
//! export FACEBOOK_CLIENT_ID="..."
//! export FACEBOOK_CLIENT_SECRET="..."
//! export FACEBOOK_REDIRECT_URI="http://localhost:8080/auth/facebook/callback"
//!
//! export GITHUB_CLIENT_ID="..."
//! export GITHUB_CLIENT_SECRET="..."
//! export GITHUB_REDIRECT_URI="http://localhost:8080/auth/github/callback"
//!
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/auth/google/callback"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
