// crossroads/tests/interrupt_tests.rs
//
// Ctrl+C detiene la rotacion de forma cooperativa.
// Un solo test en este archivo: el manejador se instala una vez por proceso.

#![cfg(unix)]

use crossroads::interrupt::stop_on_ctrl_c;
use crossroads::*;

use std::process::{self, Command};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_ctrl_c_cancels_the_rotation() {
    println!("\n=== TEST: SIGINT pide la parada ===");

    let cycler = SignalCycler::new(Arc::new(NullObserver));
    let handle = cycler
        .spawn(Driver::Scheduler, CycleOrder::default(), Duration::from_millis(5), None)
        .unwrap();
    stop_on_ctrl_c(handle.stop_signal()).expect("primer manejador");

    thread::sleep(Duration::from_millis(20));
    let status = Command::new("kill")
        .args(["-INT", &process::id().to_string()])
        .status()
        .expect("kill");
    assert!(status.success());

    let board = handle.board();
    let report = handle.join().unwrap();
    println!("  Reporte: {:?}", report);
    assert_eq!(report.reason, HaltReason::Cancelled);
    assert!(report.transitions >= 1);
    assert_eq!(board.active(), report.final_active);
    assert!(report.final_active.is_some(), "el ultimo conserva el verde");

    // un segundo manejador se rechaza
    assert!(matches!(
        stop_on_ctrl_c(StopSignal::new()),
        Err(CyclerError::Interrupt(_))
    ));
}
