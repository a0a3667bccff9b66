//! Application wiring example for binding-registry.
//!
//! Demonstrates:
//! - Binding configuration and services as singletons
//! - Binding per-call values as transients
//! - Factories that resolve their own dependencies
//! - Handling a missing dependency
//!
//! Run with: `cargo run --example wiring`

use binding_registry::{args, Args, BoxError, Injector, Key, Registry, RegistryError};
use std::sync::Arc;

#[derive(Debug)]
struct AppConfig {
    name: String,
    debug_mode: bool,
}

#[derive(Debug)]
struct Greeter {
    app_name: String,
}

impl Greeter {
    fn greet(&self, who: &str) -> String {
        format!("{} says hello to {who}", self.app_name)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("binding_registry=debug"))
        .init();

    println!("=== binding-registry: Application Wiring ===\n");

    let registry = Arc::new(Registry::new());
    registry.set_trace_callback(|event| println!("   [trace] {event}"));

    // -------------------------------------------------------------------------
    // 1. Bind configuration and services
    // -------------------------------------------------------------------------
    println!("1. Binding...");

    let weak = Arc::downgrade(&registry);
    registry
        .bind_singleton(Key::of::<AppConfig>(), |args: &Args| {
            Ok::<_, RegistryError>(AppConfig {
                name: args.arg::<&str>(0)?.to_string(),
                debug_mode: *args.arg::<bool>(1)?,
            })
        })
        .bind_singleton(Key::of::<Greeter>(), move |_: &Args| {
            let registry = weak.upgrade().ok_or("registry dropped")?;
            let config = registry.resolve::<AppConfig>(Key::of::<AppConfig>(), Args::new())?;
            Ok::<_, BoxError>(Greeter {
                app_name: config.name.clone(),
            })
        })
        .bind("greeting", |args: &Args| {
            Ok::<_, RegistryError>(format!("message #{}", args.arg::<u32>(0)?))
        });

    // -------------------------------------------------------------------------
    // 2. Materialize configuration with its arguments
    // -------------------------------------------------------------------------
    println!("\n2. Resolving configuration...");

    let config = registry.must_resolve::<AppConfig>(Key::of::<AppConfig>(), args!["demo", true]);
    println!("   {config:?}");

    // -------------------------------------------------------------------------
    // 3. Resolve a service that depends on the configuration
    // -------------------------------------------------------------------------
    println!("\n3. Resolving greeter...");

    let greeter = registry.must_resolve::<Greeter>(Key::of::<Greeter>(), Args::new());
    println!("   {}", greeter.greet("world"));
    println!("   debug mode: {}", config.debug_mode);

    // -------------------------------------------------------------------------
    // 4. Transient values
    // -------------------------------------------------------------------------
    println!("\n4. Resolving transients...");

    for i in 1..=2u32 {
        let message = registry.must_resolve::<String>("greeting", args![i]);
        println!("   {message}");
    }

    // -------------------------------------------------------------------------
    // 5. Missing dependency
    // -------------------------------------------------------------------------
    println!("\n5. Resolving a missing key...");

    match registry.make("database", Args::new()) {
        Ok(_) => println!("   unexpected value"),
        Err(err) if err.is_not_found() => println!("   {err}"),
        Err(err) => println!("   other failure: {err}"),
    }

    println!("\n=== Example completed successfully! ===");
}
