//! JWT extraction middleware for experimenter routes.
//!
//! Verifies the bearer token, enforces the email allowlist (an unset list
//! admits nobody) and stores `BackendClaims` in the request extensions for
//! `CurrentUser`. Rejections
//! are rendered here as Problem Details so they carry the request's trace id.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::BackendClaims;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

/// Token from `Authorization: Bearer <token>`.
pub fn bearer_token(value: Option<&header::HeaderValue>) -> Result<String, AppError> {
    let raw = value
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

fn authorize(req: &ServiceRequest) -> Result<BackendClaims, AppError> {
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let token = bearer_token(req.headers().get(header::AUTHORIZATION))?;
    let claims = verify_access_token(&token, &app_state.security)?;

    // A token minted before the allowlist changed stops working here.
    match &app_state.email_allowlist {
        Some(allowlist) if allowlist.is_allowed(&claims.email) => {}
        _ => return Err(AppError::email_not_allowed()),
    }

    Ok(claims.into())
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => {
                // Log and render inside the returned future so the trace id scope is active.
                Box::pin(async move {
                    security::access_denied(req.path(), err.code().as_str());
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                })
            }
        }
    }
}
