//! 세션 가드 미들웨어
//!
//! 보호된 라우트(`/profile`, `/unlink/*`)에 세션 주체 없이 접근하는
//! 요청을 홈(`/`)으로 리다이렉트합니다. 세션 주체가 있으면 저장소에서
//! 전체 User 문서로 복원하여 Request Extensions에 저장합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::session_inner::SessionGuardService;

/// 세션 기반 인증 가드
///
/// ```rust,ignore
/// cfg.service(
///     web::scope("/profile")
///         .wrap(SessionGuard::required())
///         .service(handlers::users::profile)
/// );
/// ```
pub struct SessionGuard;

impl SessionGuard {
    /// 인증이 필수인 가드 생성
    ///
    /// 세션 주체가 없거나 저장소에서 복원되지 않으면
    /// 요청을 홈으로 리다이렉트합니다.
    pub fn required() -> Self {
        Self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardService {
            service: Rc::new(service),
        }))
    }
}
