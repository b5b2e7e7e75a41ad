#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Unit tests for CLI commands

use crate::cli::{execute, Cli, Commands};
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

const ROUTES: &str = r#"
routes:
  - pattern: "/"
    controller: Home
    method: index
  - pattern: "user/(:int)"
    controller: User
    method: show
  - pattern: "api/(:string)"
    controller: Api
    method: "@1"
"#;

fn route_file(content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(".yaml").expect("create temp file");
    temp.write_all(content.as_bytes()).expect("write routes");
    temp.flush().expect("flush");
    temp
}

fn run(args: &[&str]) -> (anyhow::Result<()>, String) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    let result = execute(&cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "microroute",
        "lint",
        "--routes",
        "routes.yaml",
        "--fail-on-error",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            routes,
            fail_on_error,
        } => {
            assert_eq!(routes.to_string_lossy(), "routes.yaml");
            assert!(fail_on_error);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_resolve_defaults() {
    let cli = Cli::try_parse_from([
        "microroute",
        "resolve",
        "--routes",
        "routes.yaml",
        "--uri",
        "/user/1",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            script_name,
            strict,
            ..
        } => {
            assert_eq!(script_name, "/index.php");
            assert!(!strict);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_resolve_requires_uri() {
    assert!(Cli::try_parse_from(["microroute", "resolve", "--routes", "routes.yaml"]).is_err());
}

#[test]
fn test_routes_lists_in_declaration_order() {
    let file = route_file(ROUTES);
    let (result, out) = run(&["microroute", "routes", "--routes", file.path().to_str().unwrap()]);
    result.unwrap();

    assert!(out.starts_with("[routes] count=2 root=true"));
    let user = out.find("user/(:int) -> User::show").unwrap();
    let api = out.find("api/(:string) -> Api::@1").unwrap();
    assert!(user < api);
}

#[test]
fn test_resolve_prints_target_and_arguments() {
    let file = route_file(ROUTES);
    let (result, out) = run(&[
        "microroute",
        "resolve",
        "--routes",
        file.path().to_str().unwrap(),
        "--uri",
        "/index.php/api/users/list",
    ]);
    result.unwrap();

    assert!(out.contains("pattern:    api/(:string)"));
    assert!(out.contains("controller: Api"));
    assert!(out.contains("method:     users"));
    assert!(out.contains(r#"arguments:  ["list"]"#));
}

#[test]
fn test_resolve_unmatched_uri_fails() {
    let file = route_file(ROUTES);
    let (result, _) = run(&[
        "microroute",
        "resolve",
        "--routes",
        file.path().to_str().unwrap(),
        "--uri",
        "/nowhere",
    ]);
    assert!(result.unwrap_err().to_string().contains("nowhere"));
}

#[test]
fn test_lint_fail_on_error() {
    let file = route_file(
        r#"
routes:
  - pattern: "api/(:string)"
    controller: Api
    method: "@3"
"#,
    );
    let path = file.path().to_str().unwrap();

    let (result, out) = run(&["microroute", "lint", "--routes", path]);
    result.unwrap();
    assert!(out.contains("indirection_out_of_range"));

    let (result, _) = run(&["microroute", "lint", "--routes", path, "--fail-on-error"]);
    assert!(result.is_err());
}
