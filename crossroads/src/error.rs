// crossroads/src/error.rs
// Errores del ciclador, de los observadores y de la configuracion

use crate::model::Direction;
use thiserror::Error;
use turnlock::TurnError;

/// Falla de quien dibuja el estado. El ciclador no se recupera de esto.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display: {0}")]
pub struct DisplayError(pub String);

impl DisplayError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum CyclerError {
    #[error("orden de rotacion invalido: {0}")]
    InvalidOrder(String),

    #[error("el intervalo debe ser mayor a cero")]
    ZeroInterval,

    /// Cero o mas de un semaforo en verde durante la rotacion. Es un bug, no un caso de runtime.
    #[error("invariante violado: {active} semaforos activos")]
    InvariantViolation { active: usize },

    #[error(transparent)]
    Display(#[from] DisplayError),

    #[error("token: {0}")]
    Turn(#[from] TurnError),

    #[error("el hilo del semaforo {0} hizo panic")]
    WorkerPanicked(Direction),

    #[error("el hilo del ciclador hizo panic")]
    SchedulerPanicked,

    #[error("no se pudo lanzar el hilo: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("no se pudo instalar el manejador de Ctrl+C: {0}")]
    Interrupt(#[from] ctrlc::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no se pudo leer la configuracion: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuracion mal formada: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] CyclerError),

    #[error("nivel de log desconocido: {0}")]
    LogLevel(String),

    #[error("trafico: {0}")]
    Traffic(String),
}
