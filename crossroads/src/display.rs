// crossroads/src/display.rs
// Salida de consola: imprime cada cambio de luz como lo hacia el simulador del curso

use crate::cr_log;
use crate::error::DisplayError;
use crate::model::{Direction, LightColor};
use crate::observer::{Halt, HaltReason, SignalObserver, Transition};
use crate::traffic::Intersection;
use colored::Colorize;
use std::sync::Arc;

pub struct ConsoleDisplay {
    colored: bool,
    queues: Option<(Arc<Intersection>, u32)>,
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self {
            colored: true,
            queues: None,
        }
    }

    /// Sin codigos de color, para logs a archivo
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Agrega el conteo de carros en espera a cada cambio de luz
    pub fn with_queues(mut self, intersection: Arc<Intersection>, max_shown: u32) -> Self {
        self.queues = Some((intersection, max_shown));
        self
    }

    /// "North light is GREEN"
    pub fn light_line(&self, direction: Direction, color: LightColor) -> String {
        let label = color.label();
        if !self.colored {
            return format!("{} light is {}", direction, label);
        }
        let painted = match color {
            LightColor::Green => label.green().bold(),
            LightColor::Yellow => label.yellow().bold(),
            LightColor::Red => label.red(),
        };
        format!("{} light is {}", direction, painted)
    }

    fn print_light(&self, direction: Direction, color: LightColor) {
        cr_log!("{}", self.light_line(direction, color));
    }

    fn print_queues(&self) {
        if let Some((intersection, max_shown)) = &self.queues {
            cr_log!("   🚗 {}", intersection.summary(*max_shown));
        }
    }
}

impl SignalObserver for ConsoleDisplay {
    fn on_transition(&self, transition: &Transition) -> Result<(), DisplayError> {
        if let Some(prev) = transition.from {
            self.print_light(prev, LightColor::Red);
        }
        self.print_light(transition.to, LightColor::Green);
        self.print_queues();
        Ok(())
    }

    fn on_amber(&self, direction: Direction) -> Result<(), DisplayError> {
        self.print_light(direction, LightColor::Yellow);
        Ok(())
    }

    fn on_halt(&self, halt: &Halt) -> Result<(), DisplayError> {
        match halt.reason {
            HaltReason::Cancelled => {
                cr_log!("\nSimulation stopped by user.");
                if let Some(d) = halt.active {
                    cr_log!("   {} conserva el verde", d);
                }
            }
            HaltReason::CyclesExhausted => {
                for d in Direction::ALL {
                    self.print_light(d, LightColor::Red);
                }
                cr_log!("\n✅ Ciclos completos ({} transiciones)", halt.transitions);
            }
        }
        Ok(())
    }
}
