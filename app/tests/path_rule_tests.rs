//! Path rules as declared, slashless patterns included.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{call_service, read_body, TestRequest};

use bank_security_app::security_config::project_security_config;
use bank_security_core::http::security::authorizer::Access;
use bank_security_core::http::security::SecuritySettings;
use bank_security_core::http::security::SecurityPolicy;
use common::{basic_auth, corrected_policy, create_app_with_policy, create_test_app};

#[actix_web::test]
async fn test_notices_is_not_public_as_declared() {
    let app = create_test_app().await;

    for path in ["/notices", "/contact"] {
        let req = TestRequest::get().uri(path).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[actix_web::test]
async fn test_notices_reachable_when_authenticated() {
    let app = create_test_app().await;

    let req = TestRequest::get()
        .uri("/notices")
        .insert_header(("Authorization", basic_auth("user", "12345")))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("Hello, user."));
}

#[actix_web::test]
async fn test_slashless_protected_paths_still_protected() {
    let app = create_test_app().await;

    for path in ["/myLoans", "/myBalance", "/myCards"] {
        let req = TestRequest::get().uri(path).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[actix_web::test]
async fn test_unmatched_path_fails_closed() {
    let app = create_test_app().await;

    let req = TestRequest::get().uri("/admin").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_corrected_patterns_make_notices_public() {
    let app = create_app_with_policy(corrected_policy()).await;

    let req = TestRequest::get().uri("/notices").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/contact").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/myLoans").to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_declared_policy_matches_default_settings() {
    let declared = project_security_config().unwrap();
    let from_settings = SecurityPolicy::from_settings(&SecuritySettings::default()).unwrap();

    for path in [
        "/myAccount",
        "/myLoans",
        "/myBalance",
        "/myCards",
        "/notices",
        "/contact",
        "/",
        "/login",
    ] {
        assert_eq!(declared.evaluate(path), from_settings.evaluate(path), "{}", path);
        assert_eq!(declared.evaluate(path), declared.evaluate(path));
    }
    assert_eq!(declared.evaluate("/notices"), Access::Authenticated);
}

#[test]
fn test_declared_identities() {
    let policy = project_security_config().unwrap();

    let admin = policy.find_user("admin").unwrap();
    assert!(admin.has_role("admin"));
    assert!(policy.verify("12345", admin.get_password()));

    let user = policy.find_user("user").unwrap();
    assert_eq!(user.get_roles(), ["read".to_string()]);
    assert_eq!(policy.password_encoder().name(), "noop");
}
