//! SessionGuard 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_session::{Session, SessionExt};
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::config::SessionConfig;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;
use crate::repositories::users::user_repo::UserRepository;

/// 실제 세션 검증 로직을 수행하는 서비스
pub struct SessionGuardService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let session = req.get_session();

            match resolve_session_user(&session).await {
                // 세션 주체 복원 성공: 사용자 정보를 Request Extensions에 저장
                Ok(Some(user)) => {
                    log::debug!(
                        "세션 인증 성공: 사용자 ID {}",
                        user.id_string().unwrap_or_default()
                    );
                    req.extensions_mut().insert(AuthenticatedUser::new(user));

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                // 세션 주체 없음 (또는 더 이상 존재하지 않는 사용자): 홈으로 리다이렉트
                Ok(None) => {
                    log::debug!("세션 주체 없음, 홈으로 리다이렉트");
                    let response = HttpResponse::Found()
                        .insert_header((header::LOCATION, "/"))
                        .finish();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    Ok(res)
                }
                // 저장소 장애: 일반 실패 응답
                Err(err) => {
                    log::error!("세션 주체 복원 실패: {}", err);
                    let response = HttpResponse::InternalServerError()
                        .json(serde_json::json!({
                            "error": "세션 처리 중 오류가 발생했습니다"
                        }));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    Ok(res)
                }
            }
        })
    }
}

/// 세션에서 현재 사용자를 복원
///
/// 세션 쿠키에는 사용자 id만 저장되므로 요청마다 저장소에서
/// 전체 User 문서로 재수화합니다. 세션에 주체가 없거나
/// 해당 사용자가 더 이상 존재하지 않으면 `None`을 반환합니다.
///
/// 가드가 걸리지 않은 라우트(가입, OAuth 콜백 등)에서도
/// "로그인되어 있으면 연동 플로우"를 판별하기 위해 직접 호출됩니다.
pub async fn resolve_session_user(session: &Session) -> Result<Option<User>, AppError> {
    let user_id = session
        .get::<String>(SessionConfig::USER_ID_KEY)
        .map_err(|e| AppError::InternalError(format!("세션 읽기 실패: {}", e)))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    match UserRepository::instance().find_by_id(&user_id).await {
        Ok(user) => Ok(user),
        // 형식이 깨진 id가 세션에 남아 있으면 미인증으로 처리
        Err(AppError::ValidationError(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
