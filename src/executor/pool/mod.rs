mod context;
mod core;
mod injector;
mod queue;
mod worker;

pub use self::core::Pool;
