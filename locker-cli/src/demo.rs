//! Scripted walkthrough of the engine on a hand-driven clock.

use locker_core::clock::ManualClock;
use locker_core::config::EngineConfig;
use locker_core::service::LockerService;
use locker_core::types::SizeClass;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Locker Allocation Demo ===");

    let clock = ManualClock::new(1000);
    let service = LockerService::new(EngineConfig::default(), clock.clone())?;

    println!("\n[Action] Deposit SMALL package");
    let first = service.deposit(SizeClass::Small)?;
    println!("Received ticket {} ({})", first.code, first.locker_id);

    for _ in 0..9 {
        service.deposit(SizeClass::Small)?;
    }

    println!("\n[Action] Deposit SMALL package with every SMALL locker taken");
    let spill = service.deposit(SizeClass::Small)?;
    println!("Received ticket {} ({}), a MEDIUM locker", spill.code, spill.locker_id);

    println!("\n[Action] Pick up first ticket");
    println!("{}", service.pickup(&first.code)?.message());

    println!("\n[Action] Deposit LARGE package, then let 4 days pass");
    let large = service.deposit(SizeClass::Large)?;
    println!("Deposited {} ({})", large.code, large.locker_id);
    clock.advance(4 * DAY_MS);

    println!("[Action] Running sweep");
    for locker in service.sweep() {
        println!("Expired package removed from {}", locker);
    }

    let status = service.status();
    println!(
        "\nFree lockers: SMALL={} MEDIUM={} LARGE={}, active tickets: {}",
        status.free_small, status.free_medium, status.free_large, status.active_tickets
    );
    println!("Demo completed.");
    Ok(())
}
