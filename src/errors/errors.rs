//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! - **거부(Rejection)**: 사용자에게 그대로 보여줄 수 있는 예상된 실패입니다.
//!   이메일 중복, 존재하지 않는 사용자, 잘못된 비밀번호, 이미 다른 계정에
//!   연동된 소셜 계정 등이 해당하며 `ConflictError`/`AuthenticationError`로
//!   표현됩니다. 리다이렉트 플로우에서는 플래시 메시지로 변환됩니다.
//! - **저장소 에러**: MongoDB/Redis 장애는 `DatabaseError`/`RedisError`로
//!   전파되며 클라이언트에는 일반 실패 응답만 노출됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! async fn find_owner(email: &str) -> Result<User, AppError> {
//!     user_repo.find_by_local_email(email).await?
//!         .ok_or_else(|| AppError::AuthenticationError("No user found.".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 인증 백엔드에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 충돌/중복 에러 (409 Conflict)
    ///
    /// 이미 사용 중인 이메일, 이미 다른 계정에 연동된 소셜 계정 등
    /// 사용자에게 표시 가능한 거부 사유를 담습니다.
    #[error("{0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    ///
    /// 존재하지 않는 사용자, 잘못된 비밀번호, OAuth state 불일치 등
    /// 사용자에게 표시 가능한 거부 사유를 담습니다.
    #[error("{0}")]
    AuthenticationError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 사용자에게 메시지를 그대로 노출해도 되는 예상된 거부인지 여부
    ///
    /// 리다이렉트 기반 핸들러는 거부를 에러 응답 대신
    /// 세션 플래시 메시지 + 리다이렉트로 변환합니다.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::ConflictError(_) | AppError::AuthenticationError(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("That email is already taken.".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Oops! Wrong password.".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_database_error_response() {
        let error = AppError::DatabaseError("connection refused".to_string());
        let response = error.error_response();

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejection_classification() {
        assert!(AppError::ConflictError("dup".to_string()).is_rejection());
        assert!(AppError::AuthenticationError("bad".to_string()).is_rejection());
        assert!(!AppError::DatabaseError("down".to_string()).is_rejection());
        assert!(!AppError::InternalError("boom".to_string()).is_rejection());
    }

    #[test]
    fn test_rejection_message_is_displayed_verbatim() {
        // 거부 메시지는 접두어 없이 그대로 노출된다
        let error = AppError::AuthenticationError("No user found.".to_string());
        assert_eq!(error.to_string(), "No user found.");
    }
}
