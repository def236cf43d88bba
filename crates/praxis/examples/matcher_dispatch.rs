//! Dispatching several bound resolvers through a matcher, the way a form
//! action with an `intent` field would.
//!
//! Run with: `cargo run --example matcher_dispatch`

use praxis::prelude::*;
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let add = Resolver::<Vec<f64>, (), f64>::builder(
        |values: Vec<f64>, _ctx: (), _ev: Events| async move {
            Ok::<_, HandlerError>(values.iter().sum::<f64>())
        },
    )
    .schema(combinator::array(combinator::number()))
    .build();

    let say_hello = Resolver::<String, (), String>::builder(
        |text: String, _ctx: (), _ev: Events| async move {
            Ok::<_, HandlerError>(format!("hello {text}"))
        },
    )
    .schema(combinator::string())
    .build();

    let add_for_matcher = add.clone();
    let hello_for_matcher = say_hello.clone();
    let matcher = Matcher::builder()
        .entry("add", move || {
            let add = add_for_matcher.clone();
            async move {
                add.invoke(json!([20, 30, 50]))
                    .await?
                    .into_json()
                    .map_err(ResolverError::unexpected)
            }
        })
        .entry("sayHello", move || {
            let say_hello = hello_for_matcher.clone();
            async move {
                say_hello
                    .invoke(json!("world"))
                    .await?
                    .into_json()
                    .map_err(ResolverError::unexpected)
            }
        })
        .entry("default", || async { Ok(Outcome::success(json!({}))) })
        .build();

    let intent = matcher.validate_key("sayHello").expect("declared intent");
    let outcome = matcher.match_key(intent).await.expect("dispatch succeeds");
    println!("{}", serde_json::to_string_pretty(&outcome).expect("serializes"));

    let response = matcher.match_response("add").await.expect("dispatch succeeds");
    println!(
        "HTTP {} -> {}",
        response.status(),
        String::from_utf8_lossy(response.body())
    );
}
