// un solo hilo mueve la rotacion: maquina de estados con timer

use super::{CycleReport, Run, SignalCycler};
use crate::error::CyclerError;
use crate::model::CycleOrder;
use crate::observer::HaltReason;
use log::info;
use std::time::Duration;
use turnlock::TurnSignal;

impl SignalCycler {
    /// Rota el verde en `order`, `interval` cada uno, bloqueando el hilo actual.
    ///
    /// Con `cycles = None` corre hasta que se pida parada con el `StopSignal`.
    /// Con `Some(c)` hace exactamente `4 * c` transiciones y deja todo en rojo.
    pub fn start(
        &self,
        order: CycleOrder,
        interval: Duration,
        cycles: Option<u32>,
    ) -> Result<CycleReport, CyclerError> {
        let run = Run::new(order, interval)?;
        info!(
            "rotacion (scheduler): orden {:?}, intervalo {:?}, ciclos {:?}",
            order.as_slice(),
            interval,
            cycles
        );

        if cycles == Some(0) {
            return self.finish(&run, HaltReason::CyclesExhausted);
        }

        let mut position = 0;
        let mut cycle = 0u32;
        loop {
            match self.take_turn(&run, position, cycle)? {
                TurnSignal::Continue => {}
                TurnSignal::Stop | TurnSignal::Exit => {
                    return self.finish(&run, HaltReason::Cancelled)
                }
            }

            position = (position + 1) % order.len();
            if position == 0 {
                cycle += 1;
                if cycles.is_some_and(|c| cycle >= c) {
                    return self.finish(&run, HaltReason::CyclesExhausted);
                }
            }
        }
    }
}
