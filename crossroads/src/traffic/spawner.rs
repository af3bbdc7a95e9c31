// Generador de llegadas de carros

use super::Intersection;
use crate::config::TrafficConfig;
use crate::error::ConfigError;
use crate::model::Direction;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use std::time::Duration;

// el retraso entre llegadas nunca baja de esto
const MIN_DELAY_SECS: f64 = 0.2;

/// Una llegada: `cars` carros se forman en la cola de `direction`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub direction: Direction,
    pub cars: u32,
}

pub struct VehicleSpawner<R: Rng = ThreadRng> {
    rng: R,
    poisson: Option<Poisson<f64>>,
    base_interval: Duration,
    pub vehicles_spawned: u32,
    pub arrivals: u32,
}

impl VehicleSpawner<ThreadRng> {
    pub fn new(cfg: &TrafficConfig) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, rand::rng())
    }
}

impl VehicleSpawner<StdRng> {
    /// Generador reproducible, para pruebas
    pub fn seeded(cfg: &TrafficConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VehicleSpawner<R> {
    pub fn with_rng(cfg: &TrafficConfig, rng: R) -> Result<Self, ConfigError> {
        let poisson = match cfg.poisson_mean {
            Some(mean) => Some(
                Poisson::new(mean)
                    .map_err(|e| ConfigError::Traffic(format!("poisson({}): {}", mean, e)))?,
            ),
            None => None,
        };
        Ok(Self {
            rng,
            poisson,
            base_interval: Duration::from_millis(cfg.spawn_interval_ms),
            vehicles_spawned: 0,
            arrivals: 0,
        })
    }

    /// Elige direccion al azar y cuantos carros llegan.
    /// Sin Poisson: 0, 1 o 2 con pesos 0.4 / 0.45 / 0.15.
    pub fn next_arrival(&mut self) -> Arrival {
        let direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
        let cars = match &self.poisson {
            Some(poisson) => poisson.sample(&mut self.rng) as u32,
            None => {
                let roll: f64 = self.rng.random();
                if roll < 0.4 {
                    0
                } else if roll < 0.85 {
                    1
                } else {
                    2
                }
            }
        };
        self.arrivals += 1;
        self.vehicles_spawned += cars;
        Arrival { direction, cars }
    }

    /// Genera una llegada y la forma en la cola
    pub fn spawn_into(&mut self, intersection: &Intersection) -> Arrival {
        let arrival = self.next_arrival();
        if arrival.cars > 0 {
            intersection.arrive(arrival.direction, arrival.cars);
        }
        arrival
    }

    /// Espera hasta la proxima llegada: intervalo base con ruido en [-0.4 s, 0.8 s]
    pub fn next_delay(&mut self) -> Duration {
        let jitter: f64 = self.rng.random_range(-0.4..0.8);
        let secs = (self.base_interval.as_secs_f64() + jitter).max(MIN_DELAY_SECS);
        Duration::from_secs_f64(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_arrivals_stay_in_range() {
        let mut spawner = VehicleSpawner::seeded(&TrafficConfig::default(), 7).unwrap();
        let mut counts = [0u32; 3];
        for _ in 0..500 {
            let a = spawner.next_arrival();
            assert!(a.cars <= 2);
            counts[a.cars as usize] += 1;
        }
        // con 500 muestras todas las opciones aparecen
        assert!(counts.iter().all(|c| *c > 0), "conteos: {:?}", counts);
        assert_eq!(spawner.arrivals, 500);
    }

    #[test]
    fn test_delay_has_floor() {
        let cfg = TrafficConfig {
            spawn_interval_ms: 1,
            ..TrafficConfig::default()
        };
        let mut spawner = VehicleSpawner::seeded(&cfg, 1).unwrap();
        for _ in 0..100 {
            let d = spawner.next_delay();
            assert!(d >= Duration::from_secs_f64(MIN_DELAY_SECS));
            assert!(d < Duration::from_millis(900));
        }
    }

    #[test]
    fn test_invalid_poisson_mean() {
        let cfg = TrafficConfig {
            poisson_mean: Some(-1.0),
            ..TrafficConfig::default()
        };
        assert!(VehicleSpawner::seeded(&cfg, 1).is_err());
    }
}
