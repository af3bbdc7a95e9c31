// ============================================================================
// intersection.rs - Cruce con colas de carros
// ============================================================================
//
// Los carros llegan al azar a las cuatro colas y solo avanzan los de la direccion
// en verde. El ciclador corre en su propio hilo; el generador y el que deja pasar
// carros leen el mismo tablero. Ctrl+C detiene todo y muestra el resumen.
//
// Uso: intersection [config.toml]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crossroads::interrupt::stop_on_ctrl_c;
use crossroads::traffic::{run_traffic, Intersection};
use crossroads::{cr_log, ConsoleDisplay, CycleConfig, SignalCycler};

fn main() -> ExitCode {
    if let Err(e) = run() {
        cr_log!("❌ {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = CycleConfig::load_or_default(path.as_deref())?;
    crossroads::log::init(cfg.log_filter()?);
    cfg.describe();

    let intersection = Arc::new(Intersection::new());
    let display = ConsoleDisplay::new().with_queues(intersection.clone(), cfg.traffic.max_queue_show);
    let cycler = SignalCycler::new(Arc::new(display)).with_amber(cfg.amber());

    let board = cycler.board();
    let stop = cycler.stop_signal();
    let handle = cycler.spawn(
        cfg.driver,
        cfg.cycle_order()?,
        cfg.interval()?,
        cfg.cycles,
    )?;
    // el boton de parar: Ctrl+C detiene ciclador y trafico con la misma senal
    stop_on_ctrl_c(stop.clone())?;
    let traffic = run_traffic(board, intersection.clone(), &cfg.traffic, stop.clone())?;

    let report = handle.join();
    // el ciclador termino, los hilos de trafico salen con la misma senal
    stop.stop();
    let (spawned, passed) = traffic.join();
    let report = report?;

    cr_log!("\n╔════════════════════════════════════════════════════════════╗");
    cr_log!("║           Simulacion Finalizada                            ║");
    cr_log!("╠════════════════════════════════════════════════════════════╣");
    cr_log!("║ Transiciones: {:>44} ║", report.transitions);
    cr_log!("║ Ciclos completos: {:>40} ║", report.completed_cycles);
    cr_log!("║ Carros generados: {:>40} ║", spawned);
    cr_log!("║ Carros que pasaron: {:>38} ║", passed);
    cr_log!("║ Carros en espera: {:>40} ║", intersection.total_waiting());
    cr_log!("╚════════════════════════════════════════════════════════════╝\n");
    Ok(())
}
