//! errores del token de turnos

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("token sin posiciones")]
    EmptyOrder,
    #[error("posicion {position} fuera de rango (turnos: {len})")]
    PositionOutOfRange { position: usize, len: usize },
    // el token se cerro mientras el hilo esperaba su turno
    #[error("token cerrado")]
    Closed,
}
