//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod buffered_change_notifier;
mod change_event_envelope;
mod console_change_notifier;
mod in_memory_permission_repository;
mod postgres_permission_repository;
mod redis_change_notifier;
mod webhook_change_notifier;

pub use buffered_change_notifier::BufferedChangeNotifier;
pub use change_event_envelope::ChangeEventEnvelope;
pub use console_change_notifier::ConsoleChangeNotifier;
pub use in_memory_permission_repository::InMemoryPermissionRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use redis_change_notifier::RedisChangeNotifier;
pub use webhook_change_notifier::WebhookChangeNotifier;
