// turnlock/src/token.rs
// Token exclusivo con turnos: un solo dueño a la vez y el permiso rota en orden fijo

use crate::error::TurnError;
use std::marker::PhantomData;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct TurnState {
    turn: usize,   // posicion a la que le toca
    held: bool,    // alguien tiene el token
    closed: bool,  // nadie mas lo puede tomar
}

/// Permiso binario que se entrega por turnos entre `len` posiciones.
///
/// A diferencia de un mutex normal, el orden de adquisicion esta fijado:
/// la posicion `p` solo puede tomarlo cuando el turno vale `p` y nadie lo tiene.
/// Al soltar el `TurnGuard` el turno avanza a `p + 1` (modulo `len`).
#[derive(Debug)]
pub struct ExclusiveToken {
    len: usize,
    state: Mutex<TurnState>,
    turn_changed: Condvar,
}

impl ExclusiveToken {
    /// Crea un token para `len` posiciones, el primer turno es la posicion 0
    pub fn new(len: usize) -> Result<Self, TurnError> {
        if len == 0 {
            return Err(TurnError::EmptyOrder);
        }
        Ok(Self {
            len,
            state: Mutex::new(TurnState {
                turn: 0,
                held: false,
                closed: false,
            }),
            turn_changed: Condvar::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adquiere el token para `position`, bloqueando hasta que sea su turno.
    ///
    /// Retorna `TurnError::Closed` si el token se cierra mientras espera.
    pub fn acquire(&self, position: usize) -> Result<TurnGuard<'_>, TurnError> {
        self.check(position)?;

        let mut state = self.lock_state();
        loop {
            if state.closed {
                return Err(TurnError::Closed);
            }
            if !state.held && state.turn == position {
                state.held = true;
                break;
            }
            state = self
                .turn_changed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        Ok(TurnGuard {
            token: self,
            position,
            _no_send: PhantomData,
        })
    }

    /// Intenta adquirir sin bloquearse
    /// Retorna None si no es el turno, si esta tomado o si el token esta cerrado
    pub fn try_acquire(&self, position: usize) -> Option<TurnGuard<'_>> {
        if position >= self.len {
            return None;
        }
        let mut state = self.lock_state();
        if state.closed || state.held || state.turn != position {
            return None;
        }
        state.held = true;
        Some(TurnGuard {
            token: self,
            position,
            _no_send: PhantomData,
        })
    }

    /// Cierra el token y despierta a todos los que esperan.
    ///
    /// Quien tenga el guard lo conserva hasta soltarlo; nadie mas lo obtiene.
    pub fn close(&self) {
        let mut state = self.lock_state();
        state.closed = true;
        drop(state);
        self.turn_changed.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    // posicion a la que le toca el siguiente turno
    pub fn turn(&self) -> usize {
        self.lock_state().turn
    }

    pub fn is_held(&self) -> bool {
        self.lock_state().held
    }

    fn check(&self, position: usize) -> Result<(), TurnError> {
        if position >= self.len {
            return Err(TurnError::PositionOutOfRange {
                position,
                len: self.len,
            });
        }
        Ok(())
    }

    // un panic con el guard tomado no deja el estado a medias, se puede seguir usando
    fn lock_state(&self) -> MutexGuard<'_, TurnState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, position: usize) {
        let mut state = self.lock_state();
        state.held = false;
        state.turn = (position + 1) % self.len;
        drop(state);
        self.turn_changed.notify_all();
    }
}

/// Guard del token. Al hacer drop libera el token y pasa el turno.
#[derive(Debug)]
pub struct TurnGuard<'a> {
    token: &'a ExclusiveToken,
    position: usize,
    _no_send: PhantomData<*const ()>, // el guard no cambia de hilo
}

impl TurnGuard<'_> {
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.token.release(self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_rejected() {
        assert_eq!(ExclusiveToken::new(0).unwrap_err(), TurnError::EmptyOrder);
    }

    #[test]
    fn test_turn_advances_on_drop() {
        let token = ExclusiveToken::new(3).unwrap();
        assert_eq!(token.turn(), 0);

        let guard = token.acquire(0).expect("primer turno");
        assert!(token.is_held());
        assert!(token.try_acquire(1).is_none(), "no puede haber dos dueños");
        drop(guard);

        assert!(!token.is_held());
        assert_eq!(token.turn(), 1);
    }

    #[test]
    fn test_try_acquire_respects_turn() {
        let token = ExclusiveToken::new(2).unwrap();
        assert!(token.try_acquire(1).is_none());
        assert!(token.try_acquire(7).is_none());

        let guard = token.try_acquire(0).expect("turno de la posicion 0");
        assert_eq!(guard.position(), 0);
    }

    #[test]
    fn test_wraps_after_last_position() {
        let token = ExclusiveToken::new(2).unwrap();
        drop(token.acquire(0).unwrap());
        drop(token.acquire(1).unwrap());
        assert_eq!(token.turn(), 0);
    }

    #[test]
    fn test_out_of_range_position() {
        let token = ExclusiveToken::new(4).unwrap();
        assert_eq!(
            token.acquire(4).unwrap_err(),
            TurnError::PositionOutOfRange { position: 4, len: 4 }
        );
    }

    #[test]
    fn test_closed_token_refuses_acquire() {
        let token = ExclusiveToken::new(1).unwrap();
        token.close();
        assert!(token.is_closed());
        assert_eq!(token.acquire(0).unwrap_err(), TurnError::Closed);
        assert!(token.try_acquire(0).is_none());
    }
}
