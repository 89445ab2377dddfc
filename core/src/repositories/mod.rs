pub mod counter;
pub mod session;

pub use counter::CounterStore;
pub use session::SessionRepository;

#[cfg(test)]
pub use counter::MockCounterStore;
#[cfg(test)]
pub use session::MockSessionRepository;
