//! senales cooperativas entre los hilos y quien los coordina

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lo que un hilo decide al terminar su turno.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnSignal {
    Continue, // sigue rotando, el siguiente turno le llega despues de los demas
    Stop,     // se pidio parada, el hilo cierra el token y sale
    Exit,     // el hilo completo todos sus turnos
}

/// Bandera de parada compartida. Se revisa entre turnos, nunca interrumpe uno.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    // pide la parada, es idempotente
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    // deja la bandera lista para otra corrida
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_is_shared_between_clones() {
        let a = StopSignal::new();
        let b = a.clone();
        assert!(!b.is_stopped());

        a.stop();
        assert!(b.is_stopped());

        b.reset();
        assert!(!a.is_stopped());
    }
}
