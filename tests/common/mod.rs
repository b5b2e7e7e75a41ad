#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a fresh temporary file ending in `.{ext}`.
    ///
    /// The file is removed when the returned handle is dropped.
    pub fn create_temp_routes(content: &str, ext: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(format!(".{ext}")).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_routes(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_routes(content, "json")
    }
}

pub mod fixtures {
    use microroute::dispatcher::{HandlerRegistry, HandlerSignature};
    use microroute::table::RouteTable;

    /// Route file used across the integration tests.
    pub const ROUTES_YAML: &str = r#"
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
  - pattern: "(:string)/(:string)"
    controller: "@1"
    method: "@2"
"#;

    pub fn sample_table() -> RouteTable {
        RouteTable::new()
            .route("/", "Home", "index")
            .route("user/(:int)", "User", "show")
            .route("api/(:string)", "Api", "@1")
            .route("(:string)/(:string)", "@1", "@2")
    }

    /// Handlers that echo what they were called with into the output buffer.
    pub fn sample_registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry
            .controller("Home", |_ctx| ())
            .method("index", HandlerSignature::new(), |_c, _args, ctx| {
                ctx.write("Home::index");
                Ok(())
            })
            .register();
        registry
            .controller("User", |_ctx| ())
            .method("show", HandlerSignature::new().required("id"), |_c, args, ctx| {
                ctx.write(&format!("User::show({})", args.str(0).unwrap_or_default()));
                Ok(())
            })
            .register();
        registry
            .controller("Api", |_ctx| ())
            .method(
                "users",
                HandlerSignature::new().optional("action", "index"),
                |_c, args, ctx| {
                    ctx.write(&format!("Api::users({})", args.str(0).unwrap_or_default()));
                    Ok(())
                },
            )
            .register();
        registry
            .controller("Calc", |_ctx| ())
            .method(
                "add",
                HandlerSignature::new().required("a").optional("b", 5),
                |_c, args, ctx| {
                    let a = args.get(0).and_then(|a| a.as_i64()).unwrap_or_default();
                    let b = args.get(1).and_then(|b| b.as_i64()).unwrap_or_default();
                    ctx.write(&(a + b).to_string());
                    Ok(())
                },
            )
            .method("fail", HandlerSignature::new(), |_c, _args, _ctx| {
                anyhow::bail!("division by zero")
            })
            .register();
        registry
    }
}
