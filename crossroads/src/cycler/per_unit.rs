// un hilo por semaforo, como en la version con threads del curso
// los cuatro hilos solo se coordinan con el token de turnos

use super::{CycleReport, Run, SignalCycler};
use crate::error::CyclerError;
use crate::model::{CycleOrder, Direction};
use crate::observer::HaltReason;
use log::{debug, info, warn};
use std::thread;
use std::time::Duration;
use turnlock::TurnSignal;

impl SignalCycler {
    /// Misma rotacion que `start`, pero cada semaforo corre en su propio hilo
    /// y espera su turno en el `ExclusiveToken`.
    pub fn start_per_unit(
        &self,
        order: CycleOrder,
        interval: Duration,
        cycles: Option<u32>,
    ) -> Result<CycleReport, CyclerError> {
        let run = Run::new(order, interval)?;
        info!(
            "rotacion (un hilo por semaforo): orden {:?}, intervalo {:?}, ciclos {:?}",
            order.as_slice(),
            interval,
            cycles
        );

        if cycles == Some(0) {
            return self.finish(&run, HaltReason::CyclesExhausted);
        }

        let results: Vec<(Direction, thread::Result<Result<TurnSignal, CyclerError>>)> =
            thread::scope(|s| {
                let handles: Vec<_> = order
                    .iter()
                    .enumerate()
                    .map(|(position, direction)| {
                        let run = &run;
                        let handle = s.spawn(move || self.unit_loop(run, position, cycles));
                        (direction, handle)
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|(direction, h)| (direction, h.join()))
                    .collect()
            });

        let mut cancelled = false;
        for (direction, result) in results {
            match result {
                Err(_) => return Err(CyclerError::WorkerPanicked(direction)),
                Ok(Err(e)) => return Err(e),
                Ok(Ok(TurnSignal::Stop)) => cancelled = true,
                Ok(Ok(_)) => {}
            }
        }

        let reason = if cancelled {
            HaltReason::Cancelled
        } else {
            HaltReason::CyclesExhausted
        };
        self.finish(&run, reason)
    }

    // ciclo de vida de un semaforo: esperar turno, dar verde, soltar, repetir
    fn unit_loop(
        &self,
        run: &Run,
        position: usize,
        cycles: Option<u32>,
    ) -> Result<TurnSignal, CyclerError> {
        let direction = run.order.get(position);
        debug!("[{}] hilo listo en la posicion {}", direction, position);

        let mut cycle = 0u32;
        while cycles.map_or(true, |c| cycle < c) {
            match self.take_turn(run, position, cycle) {
                Ok(TurnSignal::Continue) => cycle += 1,
                Ok(signal) => {
                    debug!("[{}] sale tras {} turnos", direction, cycle);
                    return Ok(signal);
                }
                Err(e) => {
                    warn!("[{}] fallo: {}", direction, e);
                    return Err(e);
                }
            }
        }
        Ok(TurnSignal::Exit)
    }
}
