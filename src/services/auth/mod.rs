//! 인증 서비스 모듈
//!
//! 로컬/소셜 인증 시도를 하나의 계정으로 정합하는 엔진과
//! OAuth 2.0 핸드셰이크를 담당하는 클라이언트를 제공합니다.
//!
//! # Features
//!
//! - 로컬 회원가입/로그인 및 계정 연동
//! - 외부 신원(Facebook, GitHub, Google)의 생성/연동/재연동 판정
//! - 자격증명 연동 해제
//! - Authorization Code 교환 및 프로필 정규화
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - CSRF 방지 (OAuth state 파라미터, 세션 왕복 검증)
//! - 외부 신원의 중복 소유 차단
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{ReconciliationService, OAuthClientService};
//!
//! // 콜백 처리: 토큰 교환 → 프로필 조회 → 계정 정합
//! let oauth = OAuthClientService::instance();
//! let token = oauth.exchange_code(provider, &code).await?;
//! let profile = oauth.fetch_profile(provider, &token.access_token).await?;
//!
//! let engine = ReconciliationService::instance();
//! let user = engine
//!     .reconcile_external_identity(current, provider, profile, &token.access_token)
//!     .await?;
//! ```

pub mod reconcile_service;
pub mod oauth_client_service;

pub use reconcile_service::*;
pub use oauth_client_service::*;
