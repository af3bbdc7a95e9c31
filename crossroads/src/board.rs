// crossroads/src/board.rs
// Tablero compartido: cual semaforo tiene el paso en este instante.
//
// El estado completo del cruce vive en una sola palabra atomica. Cambiar de un
// semaforo al siguiente es un swap, asi que ningun lector puede ver dos verdes
// ni ver al anterior apagado antes de que el siguiente encienda.
// Solo el ciclador escribe; hacia afuera el tablero es de lectura.

use crate::error::CyclerError;
use crate::model::{Direction, LightColor, SignalState, SignalUnit};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

const NONE: usize = usize::MAX;
// bit que marca la fase amarilla del semaforo activo, junto al indice
const AMBER: usize = 1 << 4;

fn decode(word: usize) -> (Option<Direction>, bool) {
    if word == NONE {
        return (None, false);
    }
    (Direction::from_index(word & !AMBER), word & AMBER != 0)
}

/// Quien tiene el paso. Desde afuera del crate solo se puede leer:
///
/// ```compile_fail
/// let board = crossroads::SignalBoard::new();
/// board.activate(crossroads::Direction::West);
/// ```
///
/// ```compile_fail
/// let board = crossroads::SignalBoard::new();
/// board.clear();
/// ```
#[derive(Debug)]
pub struct SignalBoard {
    active: AtomicUsize,
    transitions: AtomicU64,
}

impl Default for SignalBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalBoard {
    /// Tablero con todos en rojo
    pub fn new() -> Self {
        Self {
            active: AtomicUsize::new(NONE),
            transitions: AtomicU64::new(0),
        }
    }

    /// Da el paso a `direction` y se lo quita al que lo tenia, en un solo paso.
    /// Retorna quien lo tenia antes.
    pub(crate) fn activate(&self, direction: Direction) -> Option<Direction> {
        let prev = self.active.swap(direction.index(), Ordering::AcqRel);
        self.transitions.fetch_add(1, Ordering::AcqRel);
        decode(prev).0
    }

    /// El activo pasa a amarillo. Sigue teniendo el paso pero ya no entran carros.
    /// Retorna false si `direction` no era el activo.
    pub(crate) fn begin_amber(&self, direction: Direction) -> bool {
        self.active
            .compare_exchange(
                direction.index(),
                direction.index() | AMBER,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Todos a rojo. Solo al terminar los ciclos.
    pub(crate) fn clear(&self) -> Option<Direction> {
        decode(self.active.swap(NONE, Ordering::AcqRel)).0
    }

    pub fn active(&self) -> Option<Direction> {
        decode(self.active.load(Ordering::Acquire)).0
    }

    /// El activo, solo si esta en verde (no en amarillo)
    pub fn green(&self) -> Option<Direction> {
        match decode(self.active.load(Ordering::Acquire)) {
            (Some(d), false) => Some(d),
            _ => None,
        }
    }

    pub fn color_of(&self, direction: Direction) -> LightColor {
        self.snapshot().color(direction)
    }

    pub fn state_of(&self, direction: Direction) -> SignalState {
        if self.active() == Some(direction) {
            SignalState::Active
        } else {
            SignalState::Inactive
        }
    }

    pub fn transitions(&self) -> u64 {
        self.transitions.load(Ordering::Acquire)
    }

    /// Foto consistente de los cuatro semaforos (una sola lectura atomica)
    pub fn snapshot(&self) -> BoardSnapshot {
        let (active, amber) = decode(self.active.load(Ordering::Acquire));
        let units = Direction::ALL.map(|d| {
            let state = if active == Some(d) {
                SignalState::Active
            } else {
                SignalState::Inactive
            };
            SignalUnit::new(d, state)
        });
        BoardSnapshot { units, amber }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub units: [SignalUnit; 4],
    pub amber: bool, // el activo esta en su fase amarilla
}

impl BoardSnapshot {
    pub fn active_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_active()).count()
    }

    pub fn active(&self) -> Option<Direction> {
        self.units.iter().find(|u| u.is_active()).map(|u| u.direction)
    }

    /// Durante la rotacion debe haber exactamente un verde
    pub fn single_active(&self) -> Result<Direction, CyclerError> {
        match self.active_count() {
            1 => self.active().ok_or(CyclerError::InvariantViolation { active: 0 }),
            n => Err(CyclerError::InvariantViolation { active: n }),
        }
    }

    pub fn unit(&self, direction: Direction) -> SignalUnit {
        self.units[direction.index()]
    }

    pub fn color(&self, direction: Direction) -> LightColor {
        match (self.unit(direction).is_active(), self.amber) {
            (false, _) => LightColor::Red,
            (true, false) => LightColor::Green,
            (true, true) => LightColor::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_all_red() {
        let board = SignalBoard::new();
        let snap = board.snapshot();
        assert_eq!(snap.active_count(), 0);
        assert!(matches!(
            snap.single_active(),
            Err(CyclerError::InvariantViolation { active: 0 })
        ));
    }

    #[test]
    fn test_activate_hands_over() {
        let board = SignalBoard::new();
        assert_eq!(board.activate(Direction::North), None);
        assert_eq!(board.activate(Direction::East), Some(Direction::North));

        let snap = board.snapshot();
        assert_eq!(snap.single_active().unwrap(), Direction::East);
        assert_eq!(snap.unit(Direction::North).state, SignalState::Inactive);
        assert_eq!(board.state_of(Direction::East), SignalState::Active);
        assert_eq!(board.transitions(), 2);
    }

    #[test]
    fn test_clear_turns_everything_red() {
        let board = SignalBoard::new();
        board.activate(Direction::West);
        assert_eq!(board.clear(), Some(Direction::West));
        assert_eq!(board.active(), None);
        // clear no cuenta como transicion
        assert_eq!(board.transitions(), 1);
    }

    #[test]
    fn test_amber_keeps_the_unit_active() {
        let board = SignalBoard::new();
        assert!(!board.begin_amber(Direction::North), "nadie activo todavia");

        board.activate(Direction::North);
        assert_eq!(board.green(), Some(Direction::North));
        assert!(!board.begin_amber(Direction::East), "East no tiene el paso");
        assert!(board.begin_amber(Direction::North));

        let snap = board.snapshot();
        assert_eq!(snap.single_active().unwrap(), Direction::North);
        assert_eq!(snap.color(Direction::North), LightColor::Yellow);
        assert_eq!(board.active(), Some(Direction::North));
        assert_eq!(board.green(), None, "en amarillo ya no es verde");

        // el siguiente recibe el paso en verde y el anterior vuelve sin marca
        assert_eq!(board.activate(Direction::East), Some(Direction::North));
        assert_eq!(board.color_of(Direction::East), LightColor::Green);
        assert_eq!(board.color_of(Direction::North), LightColor::Red);
    }
}
