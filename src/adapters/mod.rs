// Adapters layer: concrete implementations of the domain ports.

pub mod notify;
pub mod storage;

pub use notify::{ConsoleNotifier, NoopNotifier, TracingNotifier};
pub use storage::{LocalStorage, MemoryStore};
