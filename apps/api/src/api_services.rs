mod database;
mod notifier;
mod redis;
mod state_builder;
mod store;

pub use database::connect_and_migrate;
pub use notifier::build_change_notifier;
pub use state_builder::build_app_state;
pub use store::{StoreHandles, build_store};
