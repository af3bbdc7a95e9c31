// turnlock/tests/token_tests.rs
//
// Tests de integracion del token de turnos con hilos reales.
//
// Ejecutar con: cargo test -p turnlock -- --nocapture

use turnlock::{ExclusiveToken, StopSignal, TurnError};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════
#[test]
fn test_threads_take_turns_in_order() {
    println!("\n=== TEST: los hilos se turnan en orden fijo ===");

    const POSITIONS: usize = 4;
    const ROUNDS: usize = 5;

    let token = Arc::new(ExclusiveToken::new(POSITIONS).unwrap());
    let visits = Arc::new(Mutex::new(Vec::new()));

    // se lanzan en orden inverso para que el orden de arranque no ayude
    let handles: Vec<_> = (0..POSITIONS)
        .rev()
        .map(|pos| {
            let token = token.clone();
            let visits = visits.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    let guard = token.acquire(pos).expect("turno");
                    visits.lock().unwrap().push(guard.position());
                    thread::sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let visits = visits.lock().unwrap();
    println!("  Visitas: {:?}", *visits);
    assert_eq!(visits.len(), POSITIONS * ROUNDS);
    for (i, pos) in visits.iter().enumerate() {
        assert_eq!(*pos, i % POSITIONS, "turno {} fuera de orden", i);
    }
    println!("  ✓ orden respetado\n");
}

// ═══════════════════════════════════════════════════════════════════════════
#[test]
fn test_never_two_holders() {
    println!("\n=== TEST: nunca hay dos dueños del token ===");

    let token = Arc::new(ExclusiveToken::new(3).unwrap());
    let inside = Arc::new(AtomicUsize::new(0));
    let max_inside = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..3)
        .map(|pos| {
            let token = token.clone();
            let inside = inside.clone();
            let max_inside = max_inside.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    let _guard = token.acquire(pos).unwrap();
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::yield_now();
                    inside.fetch_sub(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    println!("  ✓ exclusion mutua respetada\n");
}

// ═══════════════════════════════════════════════════════════════════════════
#[test]
fn test_close_wakes_waiters() {
    println!("\n=== TEST: cerrar el token despierta a los que esperan ===");

    let token = Arc::new(ExclusiveToken::new(3).unwrap());
    let holder = token.acquire(0).unwrap();

    let waiters: Vec<_> = (1..3)
        .map(|pos| {
            let token = token.clone();
            thread::spawn(move || token.acquire(pos).map(|g| g.position()))
        })
        .collect();

    thread::sleep(Duration::from_millis(20));
    token.close();
    drop(holder);

    for w in waiters {
        assert_eq!(w.join().unwrap(), Err(TurnError::Closed));
    }
    println!("  ✓ todos los hilos salieron con Closed\n");
}

// ═══════════════════════════════════════════════════════════════════════════
#[test]
fn test_stop_signal_ends_rotation_between_turns() {
    println!("\n=== TEST: la parada se revisa entre turnos ===");

    let token = Arc::new(ExclusiveToken::new(2).unwrap());
    let stop = StopSignal::new();
    let turns = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..2)
        .map(|pos| {
            let token = token.clone();
            let stop = stop.clone();
            let turns = turns.clone();
            thread::spawn(move || loop {
                let Ok(guard) = token.acquire(pos) else {
                    return;
                };
                turns.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(2));
                if stop.is_stopped() {
                    token.close();
                    drop(guard);
                    return;
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(30));
    stop.stop();

    for h in handles {
        h.join().unwrap();
    }

    let seen = turns.load(Ordering::SeqCst);
    println!("  Turnos completados: {}", seen);
    assert!(seen >= 1);
    assert!(token.is_closed());
    assert!(!token.is_held());
    println!("  ✓ rotacion detenida\n");
}
