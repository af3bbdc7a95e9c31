// Colas de carros del cruce: llegan al azar y solo pasa la direccion en verde

mod intersection;
mod spawner;

pub use intersection::Intersection;
pub use spawner::{Arrival, VehicleSpawner};

use crate::board::SignalBoard;
use crate::config::TrafficConfig;
use crate::cr_log;
use crate::error::ConfigError;
use crate::model::Direction;
use log::debug;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use turnlock::StopSignal;

// espera del original cuando la cola en verde esta vacia
const IDLE_POLL: Duration = Duration::from_millis(250);
const STOP_POLL: Duration = Duration::from_millis(50);

/// Deja pasar un carro de la direccion que tiene el verde. Lee el tablero sin lock.
/// En amarillo no pasa nadie, aunque el semaforo conserve el paso.
pub fn drain_active(board: &SignalBoard, intersection: &Intersection) -> Option<Direction> {
    let direction = board.green()?;
    intersection.pass_one(direction).then_some(direction)
}

// duerme `total` pero despierta antes si se pide parada
fn sleep_unless_stopped(stop: &StopSignal, total: Duration) {
    let deadline = Instant::now() + total;
    while !stop.is_stopped() {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::sleep((deadline - now).min(STOP_POLL));
    }
}

/// Hilos de llegada y de paso de carros
pub struct TrafficWorkers {
    spawner: JoinHandle<u32>,
    drainer: JoinHandle<u64>,
}

impl TrafficWorkers {
    /// Espera a que terminen; retorna (carros generados, carros que pasaron)
    pub fn join(self) -> (u32, u64) {
        let spawned = self.spawner.join().unwrap_or(0);
        let passed = self.drainer.join().unwrap_or(0);
        (spawned, passed)
    }
}

/// Lanza el generador de carros y el que los deja pasar. Ambos salen con `stop`.
pub fn run_traffic(
    board: Arc<SignalBoard>,
    intersection: Arc<Intersection>,
    cfg: &TrafficConfig,
    stop: StopSignal,
) -> Result<TrafficWorkers, ConfigError> {
    // se valida aqui para fallar antes de lanzar hilos; cada hilo arma su propio rng
    VehicleSpawner::new(cfg)?;

    let spawner = {
        let cfg = cfg.clone();
        let intersection = intersection.clone();
        let stop = stop.clone();
        thread::Builder::new()
            .name("traffic-spawner".into())
            .spawn(move || {
                let Ok(mut spawner) = VehicleSpawner::new(&cfg) else {
                    return 0;
                };
                while !stop.is_stopped() {
                    let arrival = spawner.spawn_into(&intersection);
                    if arrival.cars > 0 {
                        debug!("llegan {} carros por {}", arrival.cars, arrival.direction);
                    }
                    let delay = spawner.next_delay();
                    sleep_unless_stopped(&stop, delay);
                }
                spawner.vehicles_spawned
            })?
    };

    let drainer = {
        let pass_interval = Duration::from_millis(cfg.pass_interval_ms);
        thread::Builder::new()
            .name("traffic-drainer".into())
            .spawn(move || {
                let mut passed = 0u64;
                while !stop.is_stopped() {
                    match drain_active(&board, &intersection) {
                        Some(direction) => {
                            passed += 1;
                            cr_log!("   🚙 {} passing car...", direction);
                            sleep_unless_stopped(&stop, pass_interval);
                        }
                        None => sleep_unless_stopped(&stop, IDLE_POLL),
                    }
                }
                passed
            })?
    };

    Ok(TrafficWorkers { spawner, drainer })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_green_direction_drains() {
        let board = SignalBoard::new();
        let cross = Intersection::new();
        cross.arrive(Direction::North, 2);
        cross.arrive(Direction::East, 3);

        // todo en rojo: nadie pasa
        assert_eq!(drain_active(&board, &cross), None);

        board.activate(Direction::East);
        assert_eq!(drain_active(&board, &cross), Some(Direction::East));
        assert_eq!(cross.waiting(Direction::East), 2);
        assert_eq!(cross.waiting(Direction::North), 2, "North sigue en rojo");

        board.activate(Direction::South);
        assert_eq!(drain_active(&board, &cross), None, "cola de South vacia");
    }

    #[test]
    fn test_amber_holds_the_queue() {
        let board = SignalBoard::new();
        let cross = Intersection::new();
        cross.arrive(Direction::West, 4);

        board.activate(Direction::West);
        assert_eq!(drain_active(&board, &cross), Some(Direction::West));

        board.begin_amber(Direction::West);
        assert_eq!(drain_active(&board, &cross), None, "en amarillo no pasa nadie");
        assert_eq!(cross.waiting(Direction::West), 3);
    }
}
