//! Integration tests for advanced usage patterns.
//!
//! This test demonstrates wiring an application graph: configuration bound once,
//! services that resolve their own dependencies inside their factories, and
//! per-call values built from arguments.

use binding_registry::{args, Args, BoxError, Injector, Key, Registry, RegistryError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, Weak};

#[derive(Clone, Debug, PartialEq)]
struct AppConfig {
    database_url: String,
    max_connections: u32,
}

#[derive(Debug)]
struct DatabaseService {
    connection_string: String,
    pool_size: u32,
}

#[derive(Debug)]
struct UserRepository {
    db: Arc<DatabaseService>,
}

#[derive(Debug, PartialEq)]
struct User {
    name: String,
    id: u32,
}

fn wire(registry: &Arc<Registry>) {
    let config = AppConfig {
        database_url: "postgresql://localhost/mydb".to_string(),
        max_connections: 100,
    };

    let weak: Weak<Registry> = Arc::downgrade(registry);
    let db_registry = weak.clone();
    let repo_registry = weak;
    let next_id = Arc::new(AtomicU32::new(0));

    registry
        .bind_singleton(Key::of::<AppConfig>(), move |_: &Args| {
            Ok::<_, RegistryError>(config.clone())
        })
        .bind_singleton(Key::of::<DatabaseService>(), move |_: &Args| {
            let registry = db_registry.upgrade().ok_or("registry dropped")?;
            let config = registry.resolve::<AppConfig>(Key::of::<AppConfig>(), Args::new())?;
            Ok::<_, BoxError>(DatabaseService {
                connection_string: config.database_url.clone(),
                pool_size: config.max_connections,
            })
        })
        .bind(Key::of::<UserRepository>(), move |_: &Args| {
            let registry = repo_registry.upgrade().ok_or("registry dropped")?;
            let db = registry.resolve(Key::of::<DatabaseService>(), Args::new())?;
            Ok::<_, BoxError>(UserRepository { db })
        })
        .bind("user", move |args: &Args| {
            let name = args.arg::<&str>(0)?;
            Ok::<_, RegistryError>(User {
                name: name.to_string(),
                id: next_id.fetch_add(1, Ordering::SeqCst) + 1,
            })
        });
}

#[test]
fn test_configuration_pattern() {
    let registry = Arc::new(Registry::new());
    wire(&registry);

    let config = registry.must_resolve::<AppConfig>(Key::of::<AppConfig>(), Args::new());
    assert_eq!(config.database_url, "postgresql://localhost/mydb");
    assert_eq!(config.max_connections, 100);
}

#[test]
fn test_service_graph_shares_singletons() {
    let registry = Arc::new(Registry::new());
    wire(&registry);

    let repo_a =
        registry.must_resolve::<UserRepository>(Key::of::<UserRepository>(), Args::new());
    let repo_b =
        registry.must_resolve::<UserRepository>(Key::of::<UserRepository>(), Args::new());

    // Transient repositories, one shared database service.
    assert!(!Arc::ptr_eq(&repo_a, &repo_b));
    assert!(Arc::ptr_eq(&repo_a.db, &repo_b.db));
    assert_eq!(repo_a.db.connection_string, "postgresql://localhost/mydb");
    assert_eq!(repo_a.db.pool_size, 100);
}

#[test]
fn test_factory_pattern() {
    let registry = Arc::new(Registry::new());
    wire(&registry);

    let alice = registry.must_resolve::<User>("user", args!["Alice"]);
    let bob = registry.must_resolve::<User>("user", args!["Bob"]);

    assert_eq!(
        *alice,
        User {
            name: "Alice".to_string(),
            id: 1
        }
    );
    assert_eq!(bob.id, 2);
}

#[test]
fn test_missing_dependency_surfaces_from_nested_factory() {
    let registry = Arc::new(Registry::new());
    let weak = Arc::downgrade(&registry);

    registry.bind(Key::of::<UserRepository>(), move |_: &Args| {
        let registry = weak.upgrade().ok_or("registry dropped")?;
        let db = registry.resolve(Key::of::<DatabaseService>(), Args::new())?;
        Ok::<_, BoxError>(UserRepository { db })
    });

    let err = registry
        .resolve::<UserRepository>(Key::of::<UserRepository>(), Args::new())
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.key(), Some(&Key::of::<DatabaseService>()));
}

#[test]
fn test_shared_state_pattern() {
    let registry = Registry::new();
    registry.bind_singleton("counter", |_: &Args| Ok::<_, RegistryError>(Mutex::new(0)));

    *registry
        .must_resolve::<Mutex<i32>>("counter", Args::new())
        .lock()
        .unwrap() += 10;
    *registry
        .must_resolve::<Mutex<i32>>("counter", Args::new())
        .lock()
        .unwrap() += 32;

    let counter = registry.must_resolve::<Mutex<i32>>("counter", Args::new());
    assert_eq!(*counter.lock().unwrap(), 42);
}

#[test]
fn test_channel_communication_pattern() {
    use std::sync::mpsc;

    let (tx, rx) = mpsc::channel::<String>();
    let tx = Mutex::new(tx);

    let registry = Registry::new();
    registry.bind("events", move |_: &Args| {
        let sender = tx.lock().map_err(|_| "sender poisoned")?.clone();
        Ok::<_, BoxError>(Mutex::new(sender))
    });

    let sender = registry.must_resolve::<Mutex<mpsc::Sender<String>>>("events", Args::new());
    sender.lock().unwrap().send("Event 1".to_string()).unwrap();
    sender.lock().unwrap().send("Event 2".to_string()).unwrap();

    assert_eq!(rx.recv().unwrap(), "Event 1");
    assert_eq!(rx.recv().unwrap(), "Event 2");
}
