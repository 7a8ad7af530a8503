use coffee_truck::simulation::{Ending, GameEvent, OrderAction, SpawnRejection};
use log::info;

/// Statistics collected from the event stream of a headless run
#[derive(Debug, Default)]
pub struct RunStats {
    pub sessions: u32,
    pub total_customers_spawned: u32,
    pub total_customers_left: u32,
    pub spawns_rejected_full: u32,
    pub spawns_rejected_event: u32,
    pub total_lured: u32,
    pub sold: u32,
    pub given: u32,
    pub refused: u32,
    pub mood_changes: u32,
    pub endings: Vec<Ending>,
    pub elapsed_time: f32,
}

impl RunStats {
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted => self.sessions += 1,
            GameEvent::CustomerSpawned { .. } => self.total_customers_spawned += 1,
            GameEvent::CustomerLeft(_) => self.total_customers_left += 1,
            GameEvent::SpawnRejected(SpawnRejection::WanderersFull) => {
                self.spawns_rejected_full += 1
            }
            GameEvent::SpawnRejected(SpawnRejection::SpecialEvent) => {
                self.spawns_rejected_event += 1
            }
            GameEvent::CustomerLured { .. } => self.total_lured += 1,
            GameEvent::OrderResolved { action, .. } => match action {
                OrderAction::Sell => self.sold += 1,
                OrderAction::Give => self.given += 1,
                OrderAction::Refuse => self.refused += 1,
            },
            GameEvent::MoodChanged { .. } => self.mood_changes += 1,
            GameEvent::SessionEnded(ending) => self.endings.push(*ending),
            _ => {}
        }
    }

    pub fn orders_resolved(&self) -> u32 {
        self.sold + self.given + self.refused
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed time: {:.2}s", self.elapsed_time);
        info!("Sessions played: {}", self.sessions);
        info!("Total customers spawned: {}", self.total_customers_spawned);
        info!("Total customers lured: {}", self.total_lured);
        info!(
            "Spawns rejected: {} (street full), {} (special event)",
            self.spawns_rejected_full, self.spawns_rejected_event
        );
        info!(
            "Orders resolved: {} (sold {}, given {}, refused {})",
            self.orders_resolved(),
            self.sold,
            self.given,
            self.refused
        );
        info!("Mood changes: {}", self.mood_changes);
        let endings: Vec<&str> = self.endings.iter().map(|ending| ending.label()).collect();
        info!(
            "Endings: {}",
            if endings.is_empty() {
                "none".to_string()
            } else {
                endings.join(", ")
            }
        );
        info!(
            "Service rate: {:.1}%",
            if self.total_customers_spawned > 0 {
                (self.orders_resolved() as f32 / self.total_customers_spawned as f32) * 100.0
            } else {
                0.0
            }
        );
    }
}
