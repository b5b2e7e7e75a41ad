use microroute::app::Application;
use microroute::context::RequestInput;
use microroute::dispatcher::{Argument, HandlerRegistry, HandlerSignature};
use microroute::error::DispatchError;
use microroute::router::Router;
use microroute::runtime_config::RuntimeConfig;
use microroute::session::{login_redirect, MemorySession, SessionStore};
use microroute::table::RouteTable;
use serde_json::json;
use std::sync::Arc;

mod common;
use common::fixtures::{sample_registry, sample_table, ROUTES_YAML};
use common::temp_files::create_temp_yaml;

fn app() -> Application {
    Application::new(
        Router::new(&sample_table()).unwrap(),
        sample_registry(),
        RuntimeConfig::default(),
    )
}

fn handle(app: &Application, uri: &str) -> Result<microroute::DispatchOutcome, DispatchError> {
    app.handle(&RequestInput::new(uri, "/index.php"))
}

#[test]
fn test_home_and_user_scenario() {
    let app = app();

    let home = handle(&app, "/index.php").unwrap();
    assert_eq!(home.output, "Home::index");

    let user = handle(&app, "/index.php/user/42").unwrap();
    assert_eq!(user.output, "User::show(42)");
    assert_eq!(user.arguments.get(0), Some(&Argument::Segment("42".to_string())));
}

#[test]
fn test_api_indirection_scenario() {
    let outcome = handle(&app(), "/index.php/api/users/list").unwrap();
    assert_eq!(outcome.controller, "Api");
    assert_eq!(outcome.method, "users");
    assert_eq!(outcome.output, "Api::users(list)");

    let outcome = handle(&app(), "/index.php/api/users").unwrap();
    assert_eq!(outcome.output, "Api::users(index)");
}

#[test]
fn test_default_argument_scenario() {
    let outcome = handle(&app(), "/calc/add/7").unwrap();
    assert_eq!(outcome.output, "12");
    assert_eq!(outcome.arguments.get(1), Some(&Argument::Default(json!(5))));

    let err = handle(&app(), "/calc/add").unwrap_err();
    assert!(matches!(
        err,
        DispatchError::MissingRequiredArgument { position: 0, .. }
    ));
}

#[test]
fn test_error_kinds_map_to_status() {
    let app = app();
    let cases = [
        ("/nothing", "route_not_found", 404),
        ("/blog/show", "handler_not_found", 404),
        ("/User/delete", "handler_method_not_found", 404),
        ("/calc/fail", "handler_failed", 500),
    ];
    for (uri, kind, status) in cases {
        let err = handle(&app, uri).unwrap_err();
        assert_eq!(err.kind(), kind, "uri {uri}");
        assert_eq!(err.status_code(), status, "uri {uri}");
    }
}

#[test]
fn test_request_id_from_upstream_header() {
    let mut input = RequestInput::new("/user/1", "/index.php");
    input.request_id = Some("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string());
    let outcome = app().handle(&input).unwrap();
    assert_eq!(outcome.request_id.to_string(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
}

#[test]
fn test_from_config_loads_route_file() {
    let file = create_temp_yaml(ROUTES_YAML);
    let config = RuntimeConfig {
        routes_path: file.path().to_path_buf(),
        ..RuntimeConfig::default()
    };
    let app = Application::from_config(config, sample_registry()).unwrap();
    assert_eq!(handle(&app, "/user/9").unwrap().output, "User::show(9)");
}

#[test]
fn test_from_config_rejects_invalid_table() {
    let file = create_temp_yaml(
        "routes:\n  - pattern: \"a//(:int)\"\n    controller: A\n    method: b\n",
    );
    let config = RuntimeConfig {
        routes_path: file.path().to_path_buf(),
        ..RuntimeConfig::default()
    };
    assert!(Application::from_config(config, sample_registry()).is_err());
}

#[test]
fn test_login_redirect_from_handler() {
    let mut registry = HandlerRegistry::new();
    registry
        .controller("Account", |_ctx| ())
        .method("settings", HandlerSignature::new(), |_c, _args, ctx| {
            match login_redirect(ctx, "user_id") {
                Some(url) => ctx.write(&format!("redirect {url}")),
                None => ctx.write("settings"),
            }
            Ok(())
        })
        .register();

    let table = RouteTable::new().route("(:string)/(:string)", "@1", "@2");
    let session = Arc::new(MemorySession::new());
    let app = Application::new(Router::new(&table).unwrap(), registry, RuntimeConfig::default())
        .with_session(Arc::clone(&session) as Arc<dyn SessionStore>);

    let input = RequestInput::new("/Account/settings", "/index.php")
        .with_host("example.com")
        .with_server("example.com", 8080);
    let outcome = app.handle(&input).unwrap();
    assert_eq!(
        outcome.output,
        "redirect http://example.com/login?redirect=http%3A%2F%2Fexample.com%3A8080%2FAccount%2Fsettings"
    );

    session.set("user_id", json!(7));
    assert_eq!(app.handle(&input).unwrap().output, "settings");
}

#[test]
fn test_path_segments_reach_handlers_ignoring_case() {
    let app = app();
    assert_eq!(handle(&app, "/calc/add/1").unwrap().output, "6");
    assert_eq!(handle(&app, "/CALC/Add/1/2").unwrap().output, "3");
    assert_eq!(handle(&app, "/home/INDEX").unwrap().output, "Home::index");
}
