// modulo raiz de crossroads
// semaforo de cuatro vias: un solo verde a la vez, rotando en orden fijo

pub mod log;
pub mod error;
pub mod model;
pub mod board;
pub mod observer;
pub mod cycler;
pub mod display;
pub mod traffic;
pub mod config;
pub mod interrupt;

// reexports comodos
pub use board::{BoardSnapshot, SignalBoard};
pub use config::{CycleConfig, TrafficConfig};
pub use cycler::{CycleReport, CyclerHandle, Driver, SignalCycler};
pub use display::ConsoleDisplay;
pub use error::{ConfigError, CyclerError, DisplayError};
pub use model::*;
pub use observer::*;
pub use turnlock::StopSignal;
