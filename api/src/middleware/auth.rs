//! JWT session authentication middleware.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! through the auth service (signature, expiry, blacklist, live account
//! state) and injects the resolved [`CurrentUser`] into the request.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, HttpResponse};
use futures_util::future::{BoxFuture, LocalBoxFuture};

use su_core::domain::value_objects::CurrentUser;
use su_core::errors::DomainError;
use su_core::repositories::{RevokedTokenRepository, UserRepository};
use su_core::services::auth::AuthService;
use su_core::services::guard::LoginAttemptStore;
use su_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::error_response_for;
use crate::i18n::{missing_token_message, Language};

/// Object-safe token verification used by the middleware.
///
/// The middleware holds a `dyn TokenVerifier` so routes do not have to
/// repeat the service's generic parameters.
pub trait TokenVerifier: Send + Sync {
    /// Verifies a bearer token and resolves the live account behind it
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<CurrentUser, DomainError>>;
}

impl<U, S, B> TokenVerifier for AuthService<U, S, B>
where
    U: UserRepository,
    S: LoginAttemptStore,
    B: RevokedTokenRepository,
{
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<CurrentUser, DomainError>> {
        Box::pin(self.verify_token(token))
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let token = match extract_bearer_token(req.headers()) {
                Some(token) => token,
                None => {
                    let response = missing_token_response(req.request());
                    return Err(InternalError::from_response(
                        "missing bearer token".to_string(),
                        response,
                    )
                    .into());
                }
            };

            let user = match verifier.verify(&token).await {
                Ok(user) => user,
                Err(error) => {
                    let response =
                        error_response_for(&error, Language::from_request(req.request()));
                    return Err(InternalError::from_response(error, response).into());
                }
            };

            req.extensions_mut().insert(user);

            service.call(req).await
        })
    }
}

/// Extracts Bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

pub(crate) fn missing_token_response(req: &HttpRequest) -> HttpResponse {
    let lang = Language::from_request(req);
    let body = ErrorResponse::new(error_codes::UNAUTHORIZED, missing_token_message(lang));
    HttpResponse::Unauthorized().json(body)
}

/// Extractor for the authenticated user injected by [`JwtAuth`]
pub struct Authenticated(pub CurrentUser);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => Ok(Authenticated(user)),
            None => {
                let response = missing_token_response(req);
                Err(InternalError::from_response("route not wrapped in JwtAuth".to_string(), response)
                    .into())
            }
        };

        ready(result)
    }
}
