// estados de cada semaforo

use super::Direction;

/// Estado logico de un semaforo: tiene el paso o no
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalState {
    Active,
    Inactive,
}

/// Color que se muestra. Amarillo sigue siendo Active: el semaforo no ha soltado el paso.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightColor {
    Green,
    Yellow,
    Red,
}

impl LightColor {
    pub fn state(self) -> SignalState {
        match self {
            LightColor::Green | LightColor::Yellow => SignalState::Active,
            LightColor::Red => SignalState::Inactive,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightColor::Green => "GREEN",
            LightColor::Yellow => "YELLOW",
            LightColor::Red => "RED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalUnit {
    pub direction: Direction,
    pub state: SignalState,
}

impl SignalUnit {
    pub fn new(direction: Direction, state: SignalState) -> Self {
        Self { direction, state }
    }

    pub fn is_active(&self) -> bool {
        self.state == SignalState::Active
    }
}
