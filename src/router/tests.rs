use super::{compile_rule, resolve_target, Compiled, MatchedRule, PlaceholderTable, Router};
use crate::path::{normalize, NormalizedPath};
use crate::table::{RouteRule, RouteTable, RouteTarget};

fn compile(pattern: &str) -> Compiled {
    let rule = RouteRule::new(pattern, RouteTarget::new("C", "m"));
    compile_rule(&rule, &PlaceholderTable::default()).unwrap()
}

fn path(raw: &str) -> NormalizedPath {
    normalize(raw, "/index.php")
}

#[test]
fn test_root_pattern_is_not_compiled() {
    assert!(matches!(compile("/"), Compiled::Root(_)));
    assert!(matches!(compile(""), Compiled::Root(_)));
}

#[test]
fn test_placeholder_becomes_group() {
    let Compiled::Rule(rule) = compile("user/(:int)") else {
        panic!("expected compiled rule");
    };
    assert_eq!(rule.matcher.as_str(), "^user/([0-9]+)(?:/.*)?$");
    assert_eq!(rule.capture_segments, vec![1]);
    assert_eq!(rule.first_placeholder(), 1);
}

#[test]
fn test_literal_segments_are_escaped() {
    let Compiled::Rule(rule) = compile("files/v1.0/(:string)") else {
        panic!("expected compiled rule");
    };
    assert!(rule.matcher.is_match("files/v1.0/readme"));
    assert!(!rule.matcher.is_match("files/v1x0/readme"));
}

#[test]
fn test_token_inside_segment_is_literal() {
    let Compiled::Rule(rule) = compile("page(:int)") else {
        panic!("expected compiled rule");
    };
    assert_eq!(rule.capture_count(), 0);
    assert!(rule.matcher.is_match("page(:int)"));
}

#[test]
fn test_empty_segment_is_rejected() {
    let rule = RouteRule::new("user//show", RouteTarget::new("User", "show"));
    let err = compile_rule(&rule, &PlaceholderTable::default()).unwrap_err();
    assert_eq!(err.kind(), "invalid_pattern");
}

#[test]
fn test_match_ends_on_segment_boundary() {
    let table = RouteTable::new().route("user/(:int)", "User", "show");
    let router = Router::new(&table).unwrap();
    assert!(router.route(&path("/user/42")).is_ok());
    assert!(router.route(&path("/user/42/extra")).is_ok());
    assert!(router.route(&path("/user/42abc")).is_err());
    assert!(router.route(&path("/xuser/42")).is_err());
}

#[test]
fn test_rule_without_placeholder_never_matches() {
    let table = RouteTable::new().route("about", "Page", "about");
    let router = Router::new(&table).unwrap();
    let err = router.route(&path("/about")).unwrap_err();
    assert_eq!(err.kind(), "route_not_found");
}

#[test]
fn test_first_declared_rule_wins() {
    let table = RouteTable::new()
        .route("(:string)/(:string)", "Generic", "handle")
        .route("user/(:int)", "User", "show");
    let router = Router::new(&table).unwrap();
    let matched = router.route(&path("/user/42")).unwrap();
    assert_eq!(matched.rule, MatchedRule::Index(0));
    assert_eq!(matched.pattern, "(:string)/(:string)");
}

#[test]
fn test_root_bypasses_matching() {
    let table = RouteTable::new()
        .route("(:string)", "Any", "thing")
        .route("/", "Home", "index");
    let router = Router::new(&table).unwrap();
    let matched = router.route(&path("/")).unwrap();
    assert_eq!(matched.rule, MatchedRule::Root);
    assert_eq!(matched.target, RouteTarget::new("Home", "index"));
    assert!(matched.captures.is_empty());
}

#[test]
fn test_root_without_rule_is_not_found() {
    let table = RouteTable::new().route("user/(:int)", "User", "show");
    let router = Router::new(&table).unwrap();
    assert_eq!(router.route(&path("/")).unwrap_err().kind(), "route_not_found");
}

#[test]
fn test_captures_are_numbered_left_to_right() {
    let table = RouteTable::new().route("(:string)/(:int)/(:string)", "@1", "@3");
    let router = Router::new(&table).unwrap();
    let matched = router.route(&path("/blog/7/edit")).unwrap();
    assert_eq!(matched.capture(0), Some("blog/7/edit"));
    assert_eq!(matched.capture(1), Some("blog"));
    assert_eq!(matched.capture(2), Some("7"));
    assert_eq!(matched.capture(3), Some("edit"));
    assert_eq!(matched.capture_count(), 3);
}

#[test]
fn test_resolve_literal_target_starts_at_first_placeholder() {
    let table = RouteTable::new().route("user/(:int)", "User", "show");
    let router = Router::new(&table).unwrap();
    let resolved = resolve_target(&router.route(&path("/user/42")).unwrap()).unwrap();
    assert_eq!(resolved.controller, "User");
    assert_eq!(resolved.method, "show");
    assert_eq!(resolved.arg_start, 1);
}

#[test]
fn test_resolve_method_indirection() {
    let table = RouteTable::new().route("api/(:string)", "Api", "@1");
    let router = Router::new(&table).unwrap();
    let p = path("/api/users/list");
    let resolved = resolve_target(&router.route(&p).unwrap()).unwrap();
    assert_eq!(resolved.method, "users");
    assert_eq!(resolved.arg_start, 2);
    assert_eq!(p.segment(resolved.arg_start), Some("list"));
}

#[test]
fn test_resolve_uses_furthest_indirection() {
    let table = RouteTable::new().route("(:string)/(:string)", "@2", "@1");
    let router = Router::new(&table).unwrap();
    let resolved = resolve_target(&router.route(&path("/show/Blog/9")).unwrap()).unwrap();
    assert_eq!(resolved.controller, "Blog");
    assert_eq!(resolved.method, "show");
    assert_eq!(resolved.arg_start, 2);
}

#[test]
fn test_resolve_out_of_range_indirection() {
    let table = RouteTable::new().route("api/(:string)", "Api", "@2");
    let router = Router::new(&table).unwrap();
    let err = resolve_target(&router.route(&path("/api/users")).unwrap()).unwrap_err();
    assert_eq!(err.kind(), "indirection_out_of_range");
    assert!(err.to_string().starts_with("@2 not found"));
}

#[test]
fn test_resolve_zero_and_garbage_indirection() {
    for descriptor in ["@0", "@abc"] {
        let table = RouteTable::new().route("api/(:string)", descriptor, "index");
        let router = Router::new(&table).unwrap();
        let err = resolve_target(&router.route(&path("/api/users")).unwrap()).unwrap_err();
        assert_eq!(err.kind(), "indirection_out_of_range");
    }
}

#[test]
fn test_declared_placeholder_is_used() {
    let table: RouteTable = crate::table::parse_table(
        r#"
routes:
  - pattern: "post/(:slug)"
    controller: Post
    method: show
placeholders:
  - token: "(:slug)"
    regex: "[a-z0-9-]+"
"#,
    )
    .unwrap();
    let router = Router::new(&table).unwrap();
    assert!(router.route(&path("/post/hello-world")).is_ok());
    assert!(router.route(&path("/post/Hello")).is_err());
}

#[test]
fn test_multi_segment_placeholder_moves_arg_start() {
    let placeholders = PlaceholderTable::default().with("(:any)", ".+").unwrap();
    let table = RouteTable::new().route("(:any)/(:string)", "Files", "@2");
    let router = Router::with_placeholders(&table, &placeholders).unwrap();

    let p = path("/a/b/c/d");
    let matched = router.route(&p).unwrap();
    assert_eq!(matched.capture(1), Some("a/b/c"));
    assert_eq!(matched.capture_segments.as_slice(), &[2, 3]);

    let resolved = resolve_target(&matched).unwrap();
    assert_eq!(resolved.method, "d");
    assert_eq!(resolved.arg_start, 4);
    assert_eq!(p.segment(resolved.arg_start), None);
}

#[test]
fn test_literal_target_after_multi_segment_prefix() {
    let placeholders = PlaceholderTable::default().with("(:any)", ".+").unwrap();
    let table = RouteTable::new().route("docs/(:any)", "Docs", "show");
    let router = Router::with_placeholders(&table, &placeholders).unwrap();

    let matched = router.route(&path("/docs/guide/intro")).unwrap();
    assert_eq!(matched.first_placeholder, 1);
    assert_eq!(resolve_target(&matched).unwrap().arg_start, 1);
}

#[test]
fn test_dump_routes_lists_root_then_rules() {
    let table = RouteTable::new()
        .route("/", "Home", "index")
        .route("user/(:int)", "User", "show");
    let router = Router::new(&table).unwrap();

    let mut out = Vec::new();
    router.dump_routes(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "[routes] count=1 root=true");
    assert_eq!(lines[1], "[route] / -> Home::index");
    assert!(lines[2].starts_with("[route] user/(:int) -> User::show (regex: ^user/"));
}
