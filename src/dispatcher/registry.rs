use super::binder::{BoundArguments, HandlerSignature};
use crate::context::RequestContext;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// What a handler method returns. The value carries no response contract;
/// an `Err` is surfaced as [`DispatchError::Handler`](crate::error::DispatchError::Handler).
pub type HandlerResult = anyhow::Result<()>;

type MethodFn<C> =
    Arc<dyn Fn(&mut C, &BoundArguments, &mut RequestContext) -> HandlerResult + Send + Sync>;
type FactoryFn<C> = Arc<dyn Fn(&RequestContext) -> C + Send + Sync>;

struct MethodEntry<C> {
    name: String,
    signature: HandlerSignature,
    call: MethodFn<C>,
}

/// Controller and method names are matched ASCII case-insensitively, so a
/// path segment `user` reaches a controller registered as `User`.
fn lookup_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// One method of a live controller: its declared signature and the call
/// bound to that instance.
pub struct MethodHandle<'s> {
    signature: &'s HandlerSignature,
    call: Box<dyn FnOnce(&BoundArguments, &mut RequestContext) -> HandlerResult + 's>,
}

impl MethodHandle<'_> {
    #[must_use]
    pub fn signature(&self) -> &HandlerSignature {
        self.signature
    }

    /// Run the method; consumes the handle.
    pub fn call(self, args: &BoundArguments, ctx: &mut RequestContext) -> HandlerResult {
        (self.call)(args, ctx)
    }
}

/// A live controller instance, created for exactly one request.
pub trait ControllerInstance {
    /// Handle for `method`, or `None` if the controller has no such method
    fn method(&mut self, method: &str) -> Option<MethodHandle<'_>>;
}

/// Type-erased registered controller.
pub trait ControllerFactory: Send + Sync {
    /// Name the controller was registered under
    fn name(&self) -> &str;
    /// Build a fresh instance for this request
    fn instantiate<'a>(&'a self, ctx: &RequestContext) -> Box<dyn ControllerInstance + 'a>;
    /// Declared signature of `method`, without instantiating anything
    fn signature(&self, method: &str) -> Option<&HandlerSignature>;
    /// Registered method names, unordered
    fn methods(&self) -> Vec<&str>;
}

struct TypedController<C> {
    name: String,
    factory: FactoryFn<C>,
    methods: HashMap<String, MethodEntry<C>>,
}

struct TypedInstance<'a, C> {
    controller: C,
    methods: &'a HashMap<String, MethodEntry<C>>,
}

impl<C: 'static> ControllerInstance for TypedInstance<'_, C> {
    fn method(&mut self, method: &str) -> Option<MethodHandle<'_>> {
        let entry = self.methods.get(&lookup_key(method))?;
        let controller = &mut self.controller;
        Some(MethodHandle {
            signature: &entry.signature,
            call: Box::new(move |args: &BoundArguments, ctx: &mut RequestContext| {
                (entry.call)(controller, args, ctx)
            }),
        })
    }
}

impl<C: 'static> ControllerFactory for TypedController<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn instantiate<'a>(&'a self, ctx: &RequestContext) -> Box<dyn ControllerInstance + 'a> {
        Box::new(TypedInstance {
            controller: (self.factory)(ctx),
            methods: &self.methods,
        })
    }

    fn signature(&self, method: &str) -> Option<&HandlerSignature> {
        self.methods.get(&lookup_key(method)).map(|m| &m.signature)
    }

    fn methods(&self) -> Vec<&str> {
        self.methods.values().map(|m| m.name.as_str()).collect()
    }
}

/// Explicit map from controller name to factory and declared method signatures.
///
/// Populated at startup; dispatch only ever looks names up here.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    controllers: HashMap<String, Arc<dyn ControllerFactory>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start registering a controller built by `factory` for every request.
    ///
    /// ```rust
    /// use microroute::dispatcher::{HandlerRegistry, HandlerSignature};
    ///
    /// #[derive(Default)]
    /// struct UserController;
    ///
    /// let mut registry = HandlerRegistry::new();
    /// registry
    ///     .controller("User", |_ctx| UserController)
    ///     .method("show", HandlerSignature::new().required("id"), |_c, args, ctx| {
    ///         ctx.write(&format!("user {}", args.str(0).unwrap_or_default()));
    ///         Ok(())
    ///     })
    ///     .register();
    /// assert!(registry.signature("User", "show").is_some());
    /// ```
    pub fn controller<C, F>(&mut self, name: &str, factory: F) -> ControllerBuilder<'_, C>
    where
        C: 'static,
        F: Fn(&RequestContext) -> C + Send + Sync + 'static,
    {
        ControllerBuilder {
            registry: self,
            controller: TypedController {
                name: name.to_string(),
                factory: Arc::new(factory),
                methods: HashMap::new(),
            },
        }
    }

    fn insert(&mut self, controller: Arc<dyn ControllerFactory>) {
        let name = controller.name().to_string();
        let methods = controller.methods().len();
        if self.controllers.insert(lookup_key(&name), controller).is_some() {
            warn!(
                controller = %name,
                total_controllers = self.controllers.len(),
                "Replaced existing controller registration"
            );
        }
        info!(
            controller = %name,
            methods = methods,
            total_controllers = self.controllers.len(),
            "Controller registered"
        );
    }

    /// Registered controller by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, controller: &str) -> Option<&Arc<dyn ControllerFactory>> {
        self.controllers.get(&lookup_key(controller))
    }

    /// Declared signature for `(controller, method)`.
    #[must_use]
    pub fn signature(&self, controller: &str, method: &str) -> Option<&HandlerSignature> {
        self.get(controller)?.signature(method)
    }

    /// Registered controller names as declared, sorted.
    #[must_use]
    pub fn controller_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.controllers.values().map(|c| c.name()).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// Collects the methods of one controller; [`register`](Self::register) commits it.
#[must_use = "a controller is only registered once `register()` is called"]
pub struct ControllerBuilder<'r, C> {
    registry: &'r mut HandlerRegistry,
    controller: TypedController<C>,
}

impl<'r, C: 'static> ControllerBuilder<'r, C> {
    /// Declare a method, its parameter list and the code it runs.
    pub fn method<F>(mut self, name: &str, signature: HandlerSignature, call: F) -> Self
    where
        F: Fn(&mut C, &BoundArguments, &mut RequestContext) -> HandlerResult
            + Send
            + Sync
            + 'static,
    {
        self.controller.methods.insert(
            lookup_key(name),
            MethodEntry {
                name: name.to_string(),
                signature,
                call: Arc::new(call),
            },
        );
        self
    }

    pub fn register(self) -> &'r mut HandlerRegistry {
        let ControllerBuilder {
            registry,
            controller,
        } = self;
        registry.insert(Arc::new(controller));
        registry
    }
}
