pub mod daemon;
pub mod engine;
pub mod lease;
pub mod netdev;
pub mod notify;
pub mod sampler;

pub use daemon::{Daemon, DaemonConfig};
pub use engine::{DecisionEngine, InhibitionState, Transition};
pub use netdev::{InterfaceCounters, InterfaceSnapshot, MetricsSource, ProcNetDev};
