//! turnlock: token exclusivo que se entrega por turnos
//! primitivas minimas para que n hilos se turnen una seccion critica en orden fijo

pub mod error;
pub mod signals;
pub mod token;

pub use error::TurnError;
pub use signals::{StopSignal, TurnSignal};
pub use token::{ExclusiveToken, TurnGuard};
