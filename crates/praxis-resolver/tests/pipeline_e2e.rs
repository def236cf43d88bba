//! End-to-end pipeline integration tests.
//!
//! These exercise the full definition surface the way an embedding
//! application would: schema validation through both engines, context
//! derivation from ambient data, handler helpers, and every configured
//! failure semantic, down to the serialized JSON the client sees.

use praxis_core::{
    AmbientArgs, DomainError, ErrorCode, ErrorKind, Events, HandlerError, IssueShape, Outcome,
};
use praxis_resolver::Resolver;
use praxis_schema::{combinator, Constraint};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("praxis=debug")
        .with_test_writer()
        .try_init();
}

#[derive(serde::Deserialize)]
struct SignupInput {
    name: String,
    email: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Session {
    token: Option<String>,
}

fn signup_resolver() -> Resolver<SignupInput, Session, Value> {
    Resolver::builder(
        |input: SignupInput, ctx: Session, ev: Events| async move {
            match ctx.token {
                Some(_) => Ok::<_, HandlerError>(ev.success_with(
                    json!({ "name": input.name, "email": input.email }),
                    ErrorCode::Created,
                )),
                None => Ok(ev.fail(json!({ "message": "no token" }), ErrorCode::Unauthorized)),
            }
        },
    )
    .schema(
        combinator::object()
            .field("name", combinator::string().min(1))
            .field("email", combinator::string().pattern("^[^@]+@[^@]+$")),
    )
    .context(|args: AmbientArgs| async move {
        let token = args
            .request()
            .and_then(|request| request.headers().get("authorization"))
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        Ok::<_, HandlerError>(Session { token })
    })
    .build()
}

#[tokio::test]
async fn signup_succeeds_with_derived_context() {
    init_tracing();
    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri("/signup")
        .header("authorization", "Bearer abc")
        .body(bytes::Bytes::new())
        .expect("request builds");

    let outcome = signup_resolver()
        .invoke_with(
            json!({ "name": "John", "email": "johnny@mail.com" }),
            AmbientArgs::new().with_request(request),
        )
        .await
        .expect("nothing unexpected");

    assert_eq!(outcome.status(), 201);
    let json = serde_json::to_value(&outcome).expect("serializes");
    assert_eq!(json["success"], json!(true));
    assert_eq!(json["data"]["name"], json!("John"));
}

#[tokio::test]
async fn signup_rejects_without_token() {
    init_tracing();
    let outcome = signup_resolver()
        .invoke(json!({ "name": "John", "email": "johnny@mail.com" }))
        .await
        .expect("discriminated failure");

    let failure = outcome.error().expect("failure");
    assert_eq!(failure.status, 401);
    assert_eq!(failure.payload, Some(json!({ "message": "no token" })));
}

#[tokio::test]
async fn invalid_signup_never_reaches_context_or_handler() {
    init_tracing();
    let outcome = signup_resolver()
        .invoke(json!({ "name": "", "email": "not-an-email" }))
        .await
        .expect("discriminated failure");

    let failure = outcome.error().expect("failure");
    assert_eq!(failure.kind, ErrorKind::Validation);
    assert_eq!(failure.status, 400);
    assert_eq!(failure.issues.as_ref().map(|i| i.len()), Some(2));

    let json = serde_json::to_value(Outcome::<Value>::Failure(failure.clone()))
        .expect("serializes");
    assert_eq!(json["success"], json!(false));
    assert_eq!(json["error"]["status"], json!(400));
}

#[tokio::test]
async fn flattened_issues_partition_field_and_form_errors() {
    init_tracing();
    let resolver = Resolver::<Value, (), ()>::builder(
        |_input: Value, _ctx: (), _ev: Events| async move { Ok::<_, HandlerError>(()) },
    )
    .schema(
        Constraint::object(vec![
            ("name", Constraint::string()),
            ("age", Constraint::integer()),
        ])
        .deny_unknown(),
    )
    .issue_shape(IssueShape::Flattened)
    .build();

    let outcome = resolver
        .invoke(json!({ "name": 7, "age": "x", "extra": true }))
        .await
        .expect("discriminated failure");
    let json = serde_json::to_value(outcome.error().expect("failure").issues.as_ref())
        .expect("serializes");
    assert_eq!(json["fieldErrors"]["name"], json!(["Expected string, received number"]));
    assert_eq!(json["fieldErrors"]["age"], json!(["Expected integer, received string"]));
    assert_eq!(json["formErrors"], json!(["Unrecognized key: 'extra'"]));
}

#[tokio::test]
async fn throw_on_fail_raises_the_typed_error() {
    init_tracing();
    let resolver = Resolver::<Value, (), ()>::builder(
        |_input: Value, _ctx: (), _ev: Events| async move {
            Err::<(), _>(HandlerError::from(DomainError::new(
                "Resolver failed",
                ErrorCode::Forbidden,
            )))
        },
    )
    .throw_on_fail(true)
    .build();

    let err = resolver.invoke(json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.status(), 403);
}

#[tokio::test]
async fn safe_mode_wins_over_throw_on_fail() {
    init_tracing();
    let resolver = Resolver::<Value, (), ()>::builder(
        |_input: Value, _ctx: (), _ev: Events| async move {
            Err::<(), _>(HandlerError::unexpected(anyhow::anyhow!("db offline")))
        },
    )
    .throw_on_fail(true)
    .safe_mode(true)
    .build();

    let outcome = resolver.invoke(json!({})).await.expect("captured");
    let failure = outcome.error().expect("failure");
    assert_eq!(failure.status, 500);
    assert!(failure.cause.is_some());
}

#[tokio::test]
async fn context_factory_domain_failure_is_normalized() {
    init_tracing();
    let resolver = Resolver::<Value, Session, ()>::builder(
        |_input: Value, _ctx: Session, _ev: Events| async move { Ok::<_, HandlerError>(()) },
    )
    .context(|_args: AmbientArgs| async move {
        Err::<Session, _>(HandlerError::from(DomainError::new(
            "not signed in",
            ErrorCode::Unauthorized,
        )))
    })
    .build();

    let outcome = resolver.invoke(json!({})).await.expect("discriminated");
    let failure = outcome.error().expect("failure");
    assert_eq!(failure.kind, ErrorKind::Domain);
    assert_eq!(failure.status, 401);
    assert_eq!(failure.message, "not signed in");
}

#[tokio::test]
async fn concurrent_invocations_share_one_definition() {
    init_tracing();
    let resolver = std::sync::Arc::new(
        Resolver::<Value, (), Value>::builder(
            |input: Value, _ctx: (), _ev: Events| async move { Ok::<_, HandlerError>(input) },
        )
        .schema(combinator::object().field("n", combinator::integer()))
        .build(),
    );

    let handles: Vec<_> = (0..16)
        .map(|n| {
            let resolver = std::sync::Arc::clone(&resolver);
            tokio::spawn(async move { resolver.invoke(json!({ "n": n })).await })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let outcome = handle.await.expect("task").expect("success");
        assert_eq!(outcome.into_data(), Some(json!({ "n": n })));
    }
}
