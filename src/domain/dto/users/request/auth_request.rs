//! 인증 요청관련 DTO
//!
//! 인증을 요청하는 사용자들의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 회원가입 요청 구조체
///
/// 이미 로그인된 상태로 제출하면 회원가입이 아니라
/// 현재 계정에 로컬 자격증명을 연동하는 요청으로 처리됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub password: String,
}

/// 로컬 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 인증을 거부한 경우 `code`/`state` 없이
/// `error`만 내려올 수 있으므로 모든 필드가 선택적입니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}
