//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 검증과 세션 관리만 담당하고,
//! 계정 판정은 모두 서비스 계층에 위임합니다.
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 홈, 로컬 가입/로그인, 로그아웃, 세션 진단 엔드포인트
//! - [`oauth`] - OAuth 인증/연동 시작과 콜백 처리
//! - [`users`] - 프로필 조회와 자격증명 연동 해제 (세션 가드 필요)
//!
//! ## 세션 헬퍼
//!
//! 로그인 성공 시 세션에는 사용자 id만 기록되며([`establish_session`]),
//! 거부 메시지는 플래시 슬롯을 통해 리다이렉트 너머로 전달됩니다
//! ([`set_flash`]/[`take_flash`]).

pub mod auth;
pub mod oauth;
pub mod users;

use actix_session::Session;

use crate::config::SessionConfig;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;

/// 세션에 인증 주체를 기록합니다.
///
/// 저장된 사용자의 id만 세션에 남기고 세션 키를 재발급합니다.
/// 세션 쿠키의 만료(1시간)는 세션 미들웨어 설정이 담당합니다.
pub(crate) fn establish_session(session: &Session, user: &User) -> Result<(), AppError> {
    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("저장된 사용자에 id가 없습니다".to_string()))?;

    session
        .insert(SessionConfig::USER_ID_KEY, user_id)
        .map_err(|e| AppError::InternalError(format!("세션 쓰기 실패: {}", e)))?;

    // 인증 상태 변경 시 세션 고정(fixation) 방지를 위해 키 재발급
    session.renew();
    Ok(())
}

/// 다음 요청에서 한 번 표시될 메시지를 세션에 기록합니다.
pub(crate) fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(SessionConfig::FLASH_KEY, message.to_string());
}

/// 플래시 메시지를 꺼내고 세션에서 제거합니다.
pub(crate) fn take_flash(session: &Session) -> Option<String> {
    let message = session
        .get::<String>(SessionConfig::FLASH_KEY)
        .ok()
        .flatten();

    if message.is_some() {
        let _ = session.remove(SessionConfig::FLASH_KEY);
    }

    message
}
