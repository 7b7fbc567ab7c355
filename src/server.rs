use crate::db;
use crate::error::ApiError;
use crate::routes;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::{from_fn, Next};
use actix_web::{error, web, HttpRequest, ResponseError};
use sqlx::PgPool;

/// Gate for the `/api/admin` scope: the `admin_session_token` cookie must
/// name a session row. Rejections short-circuit before the handler runs and
/// render the 401 payload directly, so the service itself never errors on an
/// unauthorized request.
async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
    let token = match req.cookie(routes::login::SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_owned(),
        None => return Ok(req.into_response(ApiError::Unauthorized.error_response())),
    };

    let pool = req
        .app_data::<web::Data<PgPool>>()
        .cloned()
        .ok_or_else(|| error::ErrorInternalServerError("database pool not configured"))?;

    let session = db::admin::session_by_token(&pool, &token)
        .await
        .map_err(ApiError::from)?;
    if session.is_none() {
        return Ok(req.into_response(ApiError::Unauthorized.error_response()));
    }

    next.call(req)
        .await
        .map(|res| res.map_into_boxed_body())
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/admin")
                        .wrap(from_fn(require_admin))
                        .route("/results", web::get().to(routes::results::results)),
                )
                .route("/login", web::post().to(routes::login::login))
                .route("/vote", web::post().to(routes::vote::vote))
                .route("/members", web::get().to(routes::members::members))
                .route(
                    "/validate_password",
                    web::get().to(routes::validate::validate_password),
                )
                .route(
                    "/validate_student",
                    web::get().to(routes::validate::validate_student),
                ),
        );
}
