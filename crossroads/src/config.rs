// crossroads/src/config.rs
// Parametros de la corrida. Los valores por defecto son los del simulador del curso.

use crate::cr_log;
use crate::cycler::Driver;
use crate::error::{ConfigError, CyclerError};
use crate::model::{CycleOrder, Direction};
use log::LevelFilter;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuracion del ciclador
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CycleConfig {
    pub order: Vec<Direction>,
    pub green_ms: u64,
    pub amber_ms: u64,
    pub cycles: Option<u32>,
    pub driver: Driver,
    pub log_level: String,
    pub traffic: TrafficConfig,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            order: CycleOrder::default().as_slice().to_vec(),
            green_ms: 3_000,
            amber_ms: 1_000,
            cycles: None,
            driver: Driver::Scheduler,
            log_level: "info".into(),
            traffic: TrafficConfig::default(),
        }
    }
}

/// Llegada y paso de carros en el cruce
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrafficConfig {
    pub spawn_interval_ms: u64,
    pub pass_interval_ms: u64,
    pub max_queue_show: u32,
    // si viene, la cantidad de carros por llegada sale de una Poisson con esta media
    pub poisson_mean: Option<f64>,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 2_000,
            pass_interval_ms: 600,
            max_queue_show: 20,
            poisson_mean: None,
        }
    }
}

impl CycleConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: CycleConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Sin ruta usa los valores por defecto
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cycle_order()?;
        self.interval()?;
        self.log_filter()?;
        if self.traffic.pass_interval_ms == 0 || self.traffic.spawn_interval_ms == 0 {
            return Err(CyclerError::ZeroInterval.into());
        }
        if let Some(mean) = self.traffic.poisson_mean {
            if !(mean > 0.0 && mean.is_finite()) {
                return Err(ConfigError::Traffic(format!("poisson_mean invalida: {}", mean)));
            }
        }
        Ok(())
    }

    pub fn cycle_order(&self) -> Result<CycleOrder, CyclerError> {
        CycleOrder::new(&self.order)
    }

    pub fn interval(&self) -> Result<Duration, CyclerError> {
        if self.green_ms == 0 {
            return Err(CyclerError::ZeroInterval);
        }
        Ok(Duration::from_millis(self.green_ms))
    }

    pub fn amber(&self) -> Duration {
        Duration::from_millis(self.amber_ms)
    }

    pub fn log_filter(&self) -> Result<LevelFilter, ConfigError> {
        crate::log::parse_level(&self.log_level)
            .ok_or_else(|| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// Banner con la configuracion efectiva
    pub fn describe(&self) {
        cr_log!("\n╔════════════════════════════════════════════════════════════╗");
        cr_log!("║              Cruce de cuatro vias                          ║");
        cr_log!("╚════════════════════════════════════════════════════════════╝");
        cr_log!("🚦 Orden: {:?}", self.order);
        cr_log!("🟢 Verde: {} ms, 🟡 Amarillo: {} ms", self.green_ms, self.amber_ms);
        match self.cycles {
            Some(c) => cr_log!("🔁 Ciclos: {}", c),
            None => cr_log!("🔁 Ciclos: sin limite (Ctrl+C para salir)"),
        }
        cr_log!("🧵 Driver: {:?}\n", self.driver);
    }
}
