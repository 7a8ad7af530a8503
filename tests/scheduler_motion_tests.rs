//! Timer and tween services

use coffee_truck::simulation::{
    CustomerId, MotionKind, MotionService, Mover, Position, Scheduler, SimId, TimerEvent,
};

fn customer(n: usize) -> CustomerId {
    CustomerId(SimId(n))
}

#[test]
fn test_one_shot_timer_fires_once() {
    let mut scheduler = Scheduler::new();
    let handle = scheduler.after(0.5, TimerEvent::SpawnAttempt);

    assert!(scheduler.advance(0.4).is_empty());
    let fired = scheduler.advance(0.2);
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].handle, handle);
    assert_eq!(fired[0].event, TimerEvent::SpawnAttempt);

    assert!(scheduler.advance(5.0).is_empty());
    assert!(!scheduler.is_pending(handle));
}

#[test]
fn test_cancel_is_idempotent() {
    let mut scheduler = Scheduler::new();
    let handle = scheduler.after(1.0, TimerEvent::CheckQueueSpacing);

    assert!(scheduler.cancel(handle));
    assert!(!scheduler.cancel(handle));
    assert!(scheduler.advance(2.0).is_empty());
}

#[test]
fn test_repeating_timer_keeps_firing() {
    let mut scheduler = Scheduler::new();
    scheduler.every(1.0, TimerEvent::CheckQueueSpacing);

    let fired = scheduler.advance(3.5);
    assert_eq!(fired.len(), 3);
    assert_eq!(scheduler.pending_count(), 1);
}

#[test]
fn test_timers_fire_in_due_order() {
    let mut scheduler = Scheduler::new();
    scheduler.after(0.3, TimerEvent::ReleaseCustomer(customer(1)));
    scheduler.after(0.1, TimerEvent::ResumeWander(customer(2)));
    scheduler.after(0.3, TimerEvent::ReleaseCustomer(customer(3)));

    let events: Vec<TimerEvent> = scheduler
        .advance(1.0)
        .into_iter()
        .map(|fired| fired.event)
        .collect();
    assert_eq!(
        events,
        vec![
            TimerEvent::ResumeWander(customer(2)),
            TimerEvent::ReleaseCustomer(customer(1)),
            TimerEvent::ReleaseCustomer(customer(3)),
        ]
    );
}

#[test]
fn test_cancelling_a_later_timer_mid_tick() {
    let mut scheduler = Scheduler::new();
    scheduler.after(0.1, TimerEvent::SpawnAttempt);
    let later = scheduler.after(0.2, TimerEvent::ReleaseCustomer(customer(1)));

    let first = scheduler.pop_due(1.0).unwrap();
    assert_eq!(first.event, TimerEvent::SpawnAttempt);
    assert!((scheduler.now() - 0.1).abs() < 1e-6);

    scheduler.cancel(later);
    assert!(scheduler.pop_due(1.0).is_none());
}

#[test]
fn test_clear_drops_everything_and_bumps_generation() {
    let mut scheduler = Scheduler::new();
    scheduler.after(0.5, TimerEvent::SpawnAttempt);
    scheduler.every(1.0, TimerEvent::CheckQueueSpacing);
    let generation = scheduler.generation();

    scheduler.clear();
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.generation(), generation + 1);
    assert!(scheduler.advance(10.0).is_empty());
}

#[test]
fn test_tween_reports_progress_then_completion_once() {
    let mut motion = MotionService::new();
    let handle = motion.animate(
        Mover::Customer(customer(1)),
        Position::new(0.0, 0.0),
        Position::new(100.0, 0.0),
        2.0,
        MotionKind::Approach,
        None,
    );
    assert_eq!(motion.target(handle), Some(Position::new(100.0, 0.0)));

    let steps = motion.advance(1.0);
    assert_eq!(steps.len(), 1);
    assert!(!steps[0].finished);
    assert!((steps[0].position.x - 50.0).abs() < 1e-4);

    let steps = motion.advance(1.5);
    assert_eq!(steps.len(), 1);
    assert!(steps[0].finished);
    assert_eq!(steps[0].position, Position::new(100.0, 0.0));

    assert!(motion.advance(1.0).is_empty());
    assert!(!motion.is_active(handle));
}

#[test]
fn test_cancelled_tween_never_completes() {
    let mut motion = MotionService::new();
    let handle = motion.animate(
        Mover::Customer(customer(1)),
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        0.5,
        MotionKind::WanderLeg,
        None,
    );

    assert!(motion.cancel(handle));
    assert!(!motion.cancel(handle));
    assert!(motion.advance(1.0).is_empty());
    assert_eq!(motion.active_count(), 0);
}
