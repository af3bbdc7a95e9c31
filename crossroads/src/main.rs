// ============================================================================
// main.rs - Cruce de cuatro vias: un solo verde, rotacion round robin
// ============================================================================
//
// Uso: crossroads [config.toml]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crossroads::interrupt::stop_on_ctrl_c;
use crossroads::{cr_log, ConsoleDisplay, CycleConfig, CycleReport, SignalCycler};

fn main() -> ExitCode {
    match run() {
        Ok(report) => {
            cr_log!(
                "🏁 {} transiciones, {} ciclos completos, fin: {:?}",
                report.transitions,
                report.completed_cycles,
                report.reason
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            cr_log!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<CycleReport, Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = CycleConfig::load_or_default(path.as_deref())?;
    crossroads::log::init(cfg.log_filter()?);
    cfg.describe();

    let cycler = SignalCycler::new(Arc::new(ConsoleDisplay::new())).with_amber(cfg.amber());
    let handle = cycler.spawn(
        cfg.driver,
        cfg.cycle_order()?,
        cfg.interval()?,
        cfg.cycles,
    )?;
    // Ctrl+C no mata el proceso: pide la parada y se espera el reporte
    stop_on_ctrl_c(handle.stop_signal())?;
    Ok(handle.join()?)
}
