// reune las piezas del modelo

mod direction;
mod light;
mod order;

pub use direction::Direction;
pub use light::{LightColor, SignalState, SignalUnit};
pub use order::CycleOrder;
