//! End-to-end scenarios for principal binding.
//!
//! The first group mirrors routes which don't authenticate but use
//! principal injection and thus might be affected by authentication logic:
//! handlers must receive a principal value either way, with or without a
//! marker on the binding site. The second group covers guarded routes.

use janus_core::{IdentityContext, PrincipalError, PrincipalResult, PrincipalVariant, SecurityPolicy};
use janus_resolve::{
    BindingSite, HandlerBinder, PrincipalResolver, RequestSnapshot, StaticAuthenticator,
};
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("janus_resolve=debug")
        .try_init();
}

/// Drives one request through the pipeline the way the dispatch layer
/// would: context creation, resolution, binding, then the handler, whose
/// plain-text response is the principal's name.
fn dispatch(
    resolver: &PrincipalResolver,
    request: &RequestSnapshot,
    policy: SecurityPolicy,
    site: &BindingSite,
) -> PrincipalResult<String> {
    let mut ctx = IdentityContext::new(site.variant());
    resolver.resolve(request, policy, &mut ctx)?;
    let principal = HandlerBinder::new().bind(&mut ctx, site)?;
    Ok(principal.name().to_string())
}

fn json_entity_request() -> RequestSnapshot {
    RequestSnapshot::builder()
        .uri("/no-auth-test/json-principal-entity")
        .header("content-type", "application/json")
        .body(r#"{"name":"alice"}"#)
        .build()
}

fn null_entity_request() -> RequestSnapshot {
    RequestSnapshot::builder()
        .uri("/no-auth-test/null-principal-entity")
        .header("content-type", "application/json")
        .body("{}")
        .build()
}

#[test]
fn json_principal_entity_without_auth() {
    init_tracing();
    let resolver = PrincipalResolver::new();

    let body = dispatch(
        &resolver,
        &json_entity_request(),
        SecurityPolicy::Open,
        &BindingSite::new(PrincipalVariant::Json),
    )
    .unwrap();

    assert_eq!(body, "alice");
}

#[test]
fn null_principal_entity_without_auth() {
    init_tracing();
    let resolver = PrincipalResolver::new();

    let body = dispatch(
        &resolver,
        &null_entity_request(),
        SecurityPolicy::Open,
        &BindingSite::new(PrincipalVariant::Null),
    )
    .unwrap();

    assert_eq!(body, "null");
}

#[test]
fn annotated_json_principal_entity_without_auth() {
    init_tracing();
    let resolver = PrincipalResolver::new();
    let request = json_entity_request();

    let plain = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Open,
        &BindingSite::new(PrincipalVariant::Json),
    )
    .unwrap();
    let annotated = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Open,
        &BindingSite::new(PrincipalVariant::Json).with_marker("dummy"),
    )
    .unwrap();

    assert_eq!(annotated, "alice");
    assert_eq!(plain, annotated);
}

#[test]
fn annotated_null_principal_entity_without_auth() {
    init_tracing();
    let resolver = PrincipalResolver::new();
    let request = null_entity_request();

    let plain = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Open,
        &BindingSite::new(PrincipalVariant::Null),
    )
    .unwrap();
    let annotated = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Open,
        &BindingSite::new(PrincipalVariant::Null).with_marker("dummy"),
    )
    .unwrap();

    assert_eq!(annotated, "null");
    assert_eq!(plain, annotated);
}

fn guarded_resolver() -> PrincipalResolver {
    PrincipalResolver::new()
        .with_authenticator(Arc::new(StaticAuthenticator::new().with_token("t-1", "bob")))
}

#[test]
fn guarded_route_accepts_valid_token() {
    init_tracing();
    let resolver = guarded_resolver();
    let request = RequestSnapshot::builder()
        .uri("/guarded/json-principal-entity")
        .header("authorization", "Bearer t-1")
        .build();

    let body = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Required,
        &BindingSite::new(PrincipalVariant::Json),
    )
    .unwrap();

    assert_eq!(body, "bob");
}

#[test]
fn guarded_route_rejects_missing_credentials() {
    init_tracing();
    let resolver = guarded_resolver();
    let request = RequestSnapshot::builder()
        .uri("/guarded/json-principal-entity")
        .build();

    let err = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Required,
        &BindingSite::new(PrincipalVariant::Json),
    )
    .unwrap_err();

    assert!(matches!(err, PrincipalError::AuthenticationRequired { .. }));
    assert_eq!(err.status_code(), http::StatusCode::UNAUTHORIZED);
}

#[test]
fn guarded_route_rejects_invalid_credentials() {
    init_tracing();
    let resolver = guarded_resolver();
    let request = RequestSnapshot::builder()
        .uri("/guarded/json-principal-entity")
        .header("authorization", "Bearer wrong")
        .build();

    let err = dispatch(
        &resolver,
        &request,
        SecurityPolicy::Required,
        &BindingSite::new(PrincipalVariant::Json),
    )
    .unwrap_err();

    assert!(matches!(err, PrincipalError::AuthenticationRequired { .. }));
}

#[test]
fn binding_without_resolution_short_circuits() {
    init_tracing();
    let mut ctx = IdentityContext::new(PrincipalVariant::Json);

    let err = HandlerBinder::new()
        .bind(&mut ctx, &BindingSite::new(PrincipalVariant::Json))
        .unwrap_err();

    assert!(matches!(err, PrincipalError::UnresolvedPrincipal));
}

#[test]
fn second_resolution_is_rejected() {
    init_tracing();
    let resolver = PrincipalResolver::new();
    let request = null_entity_request();
    let mut ctx = IdentityContext::new(PrincipalVariant::Null);

    resolver
        .resolve(&request, SecurityPolicy::Open, &mut ctx)
        .unwrap();
    let err = resolver
        .resolve(&request, SecurityPolicy::Open, &mut ctx)
        .unwrap_err();

    assert!(matches!(err, PrincipalError::DoubleResolution { .. }));
}
