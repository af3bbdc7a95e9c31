// Ciclador de semaforos: un solo verde a la vez, rotando en orden fijo
//
// Hay dos formas de mover la rotacion y ambas pasan por el mismo turno:
// - scheduler: un solo hilo recorre las posiciones (start)
// - per_unit: un hilo por semaforo, coordinados solo por el token (start_per_unit)

mod per_unit;
mod scheduler;

use crate::board::SignalBoard;
use crate::error::{CyclerError, DisplayError};
use crate::model::{CycleOrder, Direction};
use crate::observer::{Halt, HaltReason, SignalObserver, Transition};
use log::{debug, info};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use turnlock::{ExclusiveToken, StopSignal, TurnError, TurnSignal};

/// Como se mueve la rotacion
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    #[default]
    Scheduler,
    PerUnit,
}

/// Resumen de una corrida
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub transitions: u64,
    pub completed_cycles: u32,
    pub reason: HaltReason,
    pub final_active: Option<Direction>,
}

pub struct SignalCycler {
    board: Arc<SignalBoard>,
    observer: Arc<dyn SignalObserver>,
    stop: StopSignal,
    amber: Duration,
}

// estado de una corrida compartido por el o los hilos que la mueven
struct Run {
    order: CycleOrder,
    interval: Duration,
    token: ExclusiveToken,
    transitions: AtomicU64,
}

impl Run {
    fn new(order: CycleOrder, interval: Duration) -> Result<Self, CyclerError> {
        if interval.is_zero() {
            return Err(CyclerError::ZeroInterval);
        }
        Ok(Self {
            order,
            interval,
            token: ExclusiveToken::new(order.len())?,
            transitions: AtomicU64::new(0),
        })
    }

    fn transitions(&self) -> u64 {
        self.transitions.load(Ordering::SeqCst)
    }
}

// vueltas completas; se satura en lugar de truncar
fn completed_cycles(transitions: u64, len: usize) -> u32 {
    u32::try_from(transitions / len as u64).unwrap_or(u32::MAX)
}

// si el turno termina en panic cierra el token antes de soltarlo,
// asi ningun otro semaforo toma el verde ni espera un turno que no va a llegar
struct CloseOnPanic<'a>(&'a ExclusiveToken);

impl Drop for CloseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.close();
        }
    }
}

impl SignalCycler {
    pub fn new(observer: Arc<dyn SignalObserver>) -> Self {
        Self {
            board: Arc::new(SignalBoard::new()),
            observer,
            stop: StopSignal::new(),
            amber: Duration::ZERO,
        }
    }

    /// Agrega una fase amarilla al final de cada verde. El semaforo conserva el paso.
    pub fn with_amber(mut self, amber: Duration) -> Self {
        self.amber = amber;
        self
    }

    /// Usa un tablero externo, por ejemplo para compartirlo con la cola de carros
    pub fn with_board(mut self, board: Arc<SignalBoard>) -> Self {
        self.board = board;
        self
    }

    pub fn board(&self) -> Arc<SignalBoard> {
        self.board.clone()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn run(
        &self,
        driver: Driver,
        order: CycleOrder,
        interval: Duration,
        cycles: Option<u32>,
    ) -> Result<CycleReport, CyclerError> {
        match driver {
            Driver::Scheduler => self.start(order, interval, cycles),
            Driver::PerUnit => self.start_per_unit(order, interval, cycles),
        }
    }

    /// Corre la rotacion en un hilo aparte
    pub fn spawn(
        self,
        driver: Driver,
        order: CycleOrder,
        interval: Duration,
        cycles: Option<u32>,
    ) -> Result<CyclerHandle, CyclerError> {
        let stop = self.stop.clone();
        let board = self.board.clone();
        let handle = thread::Builder::new()
            .name("signal-cycler".into())
            .spawn(move || self.run(driver, order, interval, cycles))?;

        Ok(CyclerHandle {
            stop,
            board,
            handle,
        })
    }

    // Un turno completo de la posicion `position`: toma el token, da el paso,
    // lo sostiene el intervalo y revisa si se pidio parada antes de soltarlo.
    fn take_turn(&self, run: &Run, position: usize, cycle: u32) -> Result<TurnSignal, CyclerError> {
        let guard = match run.token.acquire(position) {
            Ok(guard) => guard,
            Err(TurnError::Closed) => return Ok(TurnSignal::Stop),
            Err(e) => return Err(e.into()),
        };
        let _close = CloseOnPanic(&run.token);

        if self.stop.is_stopped() {
            run.token.close();
            return Ok(TurnSignal::Stop);
        }

        let to = run.order.get(position);
        let from = self.board.activate(to);
        let step = run.transitions.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("paso {}: {:?} -> {} (ciclo {})", step, from, to, cycle);

        let transition = Transition { from, to, step, cycle };
        if let Err(e) = self.notify_and_hold(&transition, run.interval) {
            run.token.close();
            return Err(e.into());
        }

        if self.stop.is_stopped() {
            info!("parada pedida, {} conserva el verde", to);
            run.token.close();
            return Ok(TurnSignal::Stop);
        }

        drop(guard);
        Ok(TurnSignal::Continue)
    }

    fn notify_and_hold(&self, transition: &Transition, interval: Duration) -> Result<(), DisplayError> {
        self.observer.on_transition(transition)?;
        thread::sleep(interval);
        if !self.amber.is_zero() {
            self.board.begin_amber(transition.to);
            self.observer.on_amber(transition.to)?;
            thread::sleep(self.amber);
        }
        Ok(())
    }

    // cierra la corrida: si se agotaron los ciclos todos quedan en rojo
    fn finish(&self, run: &Run, reason: HaltReason) -> Result<CycleReport, CyclerError> {
        if reason == HaltReason::CyclesExhausted {
            self.board.clear();
        }
        let transitions = run.transitions();
        let halt = Halt {
            reason,
            active: self.board.active(),
            transitions,
        };
        info!(
            "rotacion terminada ({:?}): {} transiciones, activo: {:?}",
            reason, transitions, halt.active
        );
        self.observer.on_halt(&halt)?;

        Ok(CycleReport {
            transitions,
            completed_cycles: completed_cycles(transitions, run.order.len()),
            reason,
            final_active: halt.active,
        })
    }
}

/// Control de un ciclador corriendo en otro hilo
pub struct CyclerHandle {
    stop: StopSignal,
    board: Arc<SignalBoard>,
    handle: JoinHandle<Result<CycleReport, CyclerError>>,
}

impl CyclerHandle {
    /// Pide la parada; el semaforo activo termina su intervalo
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn board(&self) -> Arc<SignalBoard> {
        self.board.clone()
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn join(self) -> Result<CycleReport, CyclerError> {
        self.handle
            .join()
            .map_err(|_| CyclerError::SchedulerPanicked)?
    }
}
