//! Security middleware for Actix Web.
//!
//! # Spring Equivalent
//! `SecurityFilterChain` / `FilterChainProxy`

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::config::{Authentication, Authenticator, Authorizer, Decision};

/// Security middleware factory.
///
/// Takes already-built authenticator and authorizer values; each worker gets
/// its own clone, sharing the underlying policy.
///
/// # Example
/// ```ignore
/// let policy = SecurityPolicy::from_settings(&settings)?;
///
/// HttpServer::new(move || {
///     App::new().wrap(policy.transform())
/// })
/// ```
#[derive(Clone)]
pub struct SecurityTransform<Auth, Autho> {
    authenticator: Auth,
    authorizer: Autho,
}

impl<Auth, Autho> SecurityTransform<Auth, Autho> {
    pub fn new(authenticator: Auth, authorizer: Autho) -> Self {
        SecurityTransform {
            authenticator,
            authorizer,
        }
    }
}

impl<S, B, Auth, Autho> Transform<S, ServiceRequest> for SecurityTransform<Auth, Autho>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + Clone + 'static,
    Autho: Authorizer + Clone + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SecurityService<Auth, Autho, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            authenticator: self.authenticator.clone(),
            authorizer: self.authorizer.clone(),
            service,
        })
    }
}

/// Security middleware service.
///
/// # Spring Equivalent
/// `FilterChainProxy`
pub struct SecurityService<Auth, Autho, S> {
    authenticator: Auth,
    authorizer: Autho,
    service: S,
}

impl<Auth, Autho, S, B> Service<ServiceRequest> for SecurityService<Auth, Autho, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
    Autho: Authorizer,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authentication = self.authenticator.authenticate(&req);

        match self.authorizer.decide(&req, &authentication) {
            Decision::Permit => {
                if let Authentication::Authenticated(user) = authentication {
                    req.extensions_mut().insert(user);
                }
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Decision::Reject(response) => {
                let res = req.into_response(response.map_into_right_body());
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
