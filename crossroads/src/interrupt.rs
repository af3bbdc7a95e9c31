// Ctrl+C pide la parada cooperativa en lugar de matar el proceso.
// El semaforo activo termina su intervalo y el ciclador reporta Cancelled.

use crate::error::CyclerError;
use log::info;
use turnlock::StopSignal;

/// Instala el manejador de Ctrl+C. Solo se puede instalar uno por proceso.
pub fn stop_on_ctrl_c(stop: StopSignal) -> Result<(), CyclerError> {
    ctrlc::set_handler(move || {
        if !stop.is_stopped() {
            info!("Ctrl+C: parada pedida");
        }
        stop.stop();
    })?;
    Ok(())
}
