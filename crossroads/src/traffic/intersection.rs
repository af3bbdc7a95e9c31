// colas de espera por direccion, protegidas por un solo mutex

use crate::model::Direction;
use std::sync::Mutex;

// orden en que se listan las colas, igual que las etiquetas del cruce
const LISTING: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

#[derive(Debug, Default)]
struct Queues {
    waiting: [u32; 4],
    passed: [u64; 4],
}

#[derive(Debug, Default)]
pub struct Intersection {
    queues: Mutex<Queues>,
}

impl Intersection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Llegan `cars` carros por `direction`
    pub fn arrive(&self, direction: Direction, cars: u32) {
        let mut q = self.queues.lock().unwrap();
        q.waiting[direction.index()] = q.waiting[direction.index()].saturating_add(cars);
    }

    /// Pasa un carro si hay alguno esperando
    pub fn pass_one(&self, direction: Direction) -> bool {
        let mut q = self.queues.lock().unwrap();
        let idx = direction.index();
        if q.waiting[idx] == 0 {
            return false;
        }
        q.waiting[idx] -= 1;
        q.passed[idx] += 1;
        true
    }

    pub fn waiting(&self, direction: Direction) -> u32 {
        self.queues.lock().unwrap().waiting[direction.index()]
    }

    pub fn passed(&self, direction: Direction) -> u64 {
        self.queues.lock().unwrap().passed[direction.index()]
    }

    pub fn total_waiting(&self) -> u32 {
        self.queues
            .lock()
            .unwrap()
            .waiting
            .iter()
            .fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    pub fn total_passed(&self) -> u64 {
        self.queues.lock().unwrap().passed.iter().sum()
    }

    /// Copia de las colas indexada por `Direction::index`
    pub fn snapshot(&self) -> [u32; 4] {
        self.queues.lock().unwrap().waiting
    }

    /// "North: 3 | East: 20+ | South: 0 | West: 1"; arriba de `max_shown` se recorta
    pub fn summary(&self, max_shown: u32) -> String {
        let waiting = self.snapshot();
        LISTING
            .iter()
            .map(|d| {
                let count = waiting[d.index()];
                if count > max_shown {
                    format!("{}: {}+", d, max_shown)
                } else {
                    format!("{}: {}", d, count)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
