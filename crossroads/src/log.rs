// crossroads/src/log.rs
// Logger minimo con sink intercambiable. Por defecto imprime a consola.
// Se puede redirigir con set_sink(fn(&str)) antes de correr el ciclador.
// Tambien sirve de backend para el facade `log`, asi los debug!/info! de la libreria
// terminan en el mismo sink que los mensajes de cr_log!.

use core::sync::atomic::{AtomicPtr, Ordering};
use ::log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

pub type LogFn = fn(&str);

fn default_sink(s: &str) {
    println!("{}", s);
}

// Almacena un puntero a funcion; sin Mutex. Se asume set_sink() se llama antes de uso concurrente.
static SINK_PTR: AtomicPtr<()> = AtomicPtr::new(default_sink as *mut ());

static INSTALLED: OnceCell<()> = OnceCell::new();
static SINK_LOGGER: SinkLogger = SinkLogger;

#[inline]
pub fn set_sink(f: LogFn) {
    SINK_PTR.store(f as *mut (), Ordering::Release);
}

#[inline]
pub fn log_str(s: &str) {
    let p = SINK_PTR.load(Ordering::Acquire);
    // SAFETY: SINK_PTR solo guarda punteros que vienen de un LogFn
    let f: LogFn = unsafe { core::mem::transmute::<*mut (), LogFn>(p) };
    f(s);
}

/// Backend de `log` que escribe en el sink actual
struct SinkLogger;

impl Log for SinkLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= ::log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        log_str(&format!(
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        ));
    }

    fn flush(&self) {}
}

/// Instala el backend una sola vez y ajusta el nivel. Llamarlo de nuevo solo cambia el nivel.
pub fn init(level: LevelFilter) {
    INSTALLED.get_or_init(|| {
        // si otro logger ya esta instalado (por ejemplo en tests) se respeta
        let _ = ::log::set_logger(&SINK_LOGGER);
    });
    ::log::set_max_level(level);
}

/// Traduce el nivel de la configuracion
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[macro_export]
macro_rules! cr_log {
    ($($arg:tt)*) => {{
        $crate::log::log_str(&format!($($arg)*));
    }};
}
