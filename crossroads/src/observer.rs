// crossroads/src/observer.rs
// Punto de extension para quien muestra el cruce (consola, ventana, otro hilo)

use crate::error::DisplayError;
use crate::model::{Direction, LightColor};
use std::sync::mpsc;
use std::sync::Mutex;

/// Un cambio de paso: `from` pasa a rojo y `to` a verde en el mismo instante
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Option<Direction>,
    pub to: Direction,
    pub step: u64,  // transiciones hechas, contando esta (empieza en 1)
    pub cycle: u32, // vuelta completa en curso (empieza en 0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// Se pidio parada; el ultimo semaforo sigue en verde
    Cancelled,
    /// Se completaron los ciclos pedidos; todos quedan en rojo
    CyclesExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Halt {
    pub reason: HaltReason,
    pub active: Option<Direction>,
    pub transitions: u64,
}

/// Evento plano para mandar por canal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalEvent {
    Light { direction: Direction, color: LightColor },
    Halted(Halt),
}

/// Recibe los cambios del ciclador. Si retorna error el ciclador se detiene.
pub trait SignalObserver: Send + Sync {
    fn on_transition(&self, transition: &Transition) -> Result<(), DisplayError>;

    // el semaforo activo entra en amarillo, todavia tiene el paso
    fn on_amber(&self, _direction: Direction) -> Result<(), DisplayError> {
        Ok(())
    }

    fn on_halt(&self, _halt: &Halt) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// No muestra nada
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SignalObserver for NullObserver {
    fn on_transition(&self, _transition: &Transition) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// Traduce cada cambio a eventos de color y los manda por un canal
pub struct ChannelObserver {
    tx: Mutex<mpsc::Sender<SignalEvent>>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::Receiver<SignalEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: Mutex::new(tx) }, rx)
    }

    fn send(&self, event: SignalEvent) -> Result<(), DisplayError> {
        self.tx
            .lock()
            .unwrap()
            .send(event)
            .map_err(|_| DisplayError::new("el receptor del canal se cerro"))
    }
}

impl SignalObserver for ChannelObserver {
    fn on_transition(&self, transition: &Transition) -> Result<(), DisplayError> {
        if let Some(prev) = transition.from {
            self.send(SignalEvent::Light {
                direction: prev,
                color: LightColor::Red,
            })?;
        }
        self.send(SignalEvent::Light {
            direction: transition.to,
            color: LightColor::Green,
        })
    }

    fn on_amber(&self, direction: Direction) -> Result<(), DisplayError> {
        self.send(SignalEvent::Light {
            direction,
            color: LightColor::Yellow,
        })
    }

    // al agotar los ciclos todos quedan en rojo, igual que en la consola
    fn on_halt(&self, halt: &Halt) -> Result<(), DisplayError> {
        if halt.reason == HaltReason::CyclesExhausted {
            for direction in Direction::ALL {
                self.send(SignalEvent::Light {
                    direction,
                    color: LightColor::Red,
                })?;
            }
        }
        self.send(SignalEvent::Halted(*halt))
    }
}
