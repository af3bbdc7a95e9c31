// orden fijo de rotacion

use super::Direction;
use crate::error::CyclerError;

/// Secuencia inmutable de las cuatro direcciones. Define a quien le toca despues de quien.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleOrder([Direction; 4]);

impl CycleOrder {
    /// Valida que `dirs` sea una permutacion de las cuatro direcciones
    pub fn new(dirs: &[Direction]) -> Result<Self, CyclerError> {
        if dirs.len() != Direction::ALL.len() {
            return Err(CyclerError::InvalidOrder(format!(
                "se esperaban 4 direcciones, llegaron {}",
                dirs.len()
            )));
        }

        let mut seen = [false; 4];
        for d in dirs {
            if seen[d.index()] {
                return Err(CyclerError::InvalidOrder(format!("{} repetida", d)));
            }
            seen[d.index()] = true;
        }

        let mut out = [Direction::North; 4];
        out.copy_from_slice(dirs);
        Ok(Self(out))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, position: usize) -> Direction {
        self.0[position % self.0.len()]
    }

    pub fn position_of(&self, direction: Direction) -> usize {
        // toda direccion esta en el orden, por construccion
        self.0.iter().position(|d| *d == direction).unwrap_or(0)
    }

    /// Sucesor inmediato de `direction`, volviendo al inicio despues del ultimo
    pub fn successor(&self, direction: Direction) -> Direction {
        self.get(self.position_of(direction) + 1)
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.iter().copied()
    }
}

impl Default for CycleOrder {
    // el orden del cruce original: Norte, Este, Sur, Oeste
    fn default() -> Self {
        Self([
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction::*;

    #[test]
    fn test_default_order() {
        let order = CycleOrder::default();
        assert_eq!(order.as_slice(), &[North, East, South, West]);
    }

    #[test]
    fn test_successor_wraps() {
        let order = CycleOrder::default();
        assert_eq!(order.successor(North), East);
        assert_eq!(order.successor(West), North);
    }

    #[test]
    fn test_rejects_duplicates_and_missing() {
        assert!(CycleOrder::new(&[North, North, South, West]).is_err());
        assert!(CycleOrder::new(&[North, East, South]).is_err());
        assert!(CycleOrder::new(&[]).is_err());
    }

    #[test]
    fn test_accepts_any_permutation() {
        let order = CycleOrder::new(&[West, South, East, North]).unwrap();
        assert_eq!(order.get(0), West);
        assert_eq!(order.position_of(North), 3);
    }
}
