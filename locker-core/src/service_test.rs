#[cfg(test)]
mod tests {
    use crate::clock::{ManualClock, TimeSource};
    use crate::code::CodeScheme;
    use crate::config::{DEFAULT_RETENTION_MS, EngineConfig, InventorySpec};
    use crate::error::{ConfigError, LockerError};
    use crate::infrastructure_in_memory::InMemoryLockerStore;
    use crate::service::LockerService;
    use crate::types::{LockerId, SizeClass};
    use std::collections::HashSet;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    fn create_service(small: usize, medium: usize, large: usize) -> (LockerService<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1000);
        let config = EngineConfig::with_inventory(InventorySpec::Counts { small, medium, large });
        let service = LockerService::new(config, clock.clone()).expect("valid config");
        (service, clock)
    }

    fn ids(lockers: &[LockerId]) -> Vec<&str> {
        lockers.iter().map(LockerId::as_str).collect()
    }

    #[test]
    fn test_two_small_lockers_scenario() {
        let (service, _) = create_service(2, 0, 0);

        let first = service.deposit(SizeClass::Small).unwrap();
        let second = service.deposit(SizeClass::Small).unwrap();
        assert_eq!(first.locker_id.as_str(), "S-0");
        assert_eq!(second.locker_id.as_str(), "S-1");

        assert_eq!(
            service.deposit(SizeClass::Small),
            Err(LockerError::NoCapacity(SizeClass::Small))
        );

        let confirmation = service.pickup(&first.code).unwrap();
        assert_eq!(confirmation.locker_id.as_str(), "S-0");
        assert_eq!(confirmation.message(), "Locker S-0 opened. Package retrieved.");

        let again = service.deposit(SizeClass::Small).unwrap();
        assert_eq!(again.locker_id.as_str(), "S-0");
    }

    #[test]
    fn test_best_fit_upward_prefers_medium_over_large() {
        let (service, _) = create_service(1, 2, 2);
        service.deposit(SizeClass::Small).unwrap();

        let a = service.deposit(SizeClass::Small).unwrap();
        let b = service.deposit(SizeClass::Small).unwrap();
        assert_eq!(a.locker_id.size_class(), SizeClass::Medium);
        assert_eq!(b.locker_id.size_class(), SizeClass::Medium);

        let c = service.deposit(SizeClass::Small).unwrap();
        assert_eq!(c.locker_id.size_class(), SizeClass::Large);
    }

    #[test]
    fn test_no_downward_fallback() {
        let (service, _) = create_service(5, 5, 1);
        service.deposit(SizeClass::Large).unwrap();
        let before = service.status();

        assert_eq!(
            service.deposit(SizeClass::Large),
            Err(LockerError::NoCapacity(SizeClass::Large))
        );
        assert_eq!(
            service.deposit(SizeClass::Large).unwrap_err().to_string(),
            "No locker available for size LARGE"
        );
        assert_eq!(service.status(), before);
    }

    #[test]
    fn test_deposit_then_pickup_restores_inventory() {
        let (service, _) = create_service(3, 3, 3);
        let before = service.status();

        let ticket = service.deposit(SizeClass::Medium).unwrap();
        assert_eq!(service.status().free_medium, 2);

        service.pickup(&ticket.code).unwrap();
        assert_eq!(service.status(), before);
        assert_eq!(ids(&service.free_lockers(SizeClass::Medium)), vec!["M-1", "M-2", "M-0"]);
    }

    #[test]
    fn test_invalid_code_rejected() {
        let (service, _) = create_service(2, 2, 2);
        let ticket = service.deposit(SizeClass::Small).unwrap();
        let before = service.status();
        let tickets_before = service.active_tickets();

        assert_eq!(
            service.pickup("S-0-0000-NEVER"),
            Err(LockerError::InvalidCode("S-0-0000-NEVER".to_string()))
        );
        assert_eq!(service.status(), before);
        assert_eq!(service.active_tickets(), tickets_before);

        service.pickup(&ticket.code).unwrap();
        let after = service.status();
        assert!(matches!(service.pickup(&ticket.code), Err(LockerError::InvalidCode(_))));
        assert_eq!(service.status(), after);
    }

    #[test]
    fn test_expiry_boundary() {
        let (service, clock) = create_service(1, 1, 1);
        let created = clock.now_ms();
        let ticket = service.deposit(SizeClass::Large).unwrap();
        assert_eq!(ticket.created_at, created);

        clock.set(created + DEFAULT_RETENTION_MS - 1);
        assert!(service.sweep().is_empty());

        // Exactly at the window the ticket is still valid
        clock.set(created + DEFAULT_RETENTION_MS);
        assert!(service.sweep().is_empty());
        assert_eq!(service.status().active_tickets, 1);

        clock.set(created + DEFAULT_RETENTION_MS + 1);
        let reclaimed = service.sweep();
        assert_eq!(ids(&reclaimed), vec!["L-0"]);
        assert_eq!(service.status().free_large, 1);
        assert!(matches!(service.pickup(&ticket.code), Err(LockerError::InvalidCode(_))));
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let (service, clock) = create_service(3, 0, 0);
        service.deposit(SizeClass::Small).unwrap();
        service.deposit(SizeClass::Small).unwrap();

        clock.advance(4 * DAY_MS);
        assert_eq!(service.sweep().len(), 2);
        assert!(service.sweep().is_empty());
        assert_eq!(service.status().free_small, 3);
    }

    #[test]
    fn test_sweep_leaves_fresh_tickets() {
        let (service, clock) = create_service(2, 0, 0);
        let old = service.deposit(SizeClass::Small).unwrap();
        clock.advance(2 * DAY_MS);
        let fresh = service.deposit(SizeClass::Small).unwrap();
        clock.advance(2 * DAY_MS);

        assert_eq!(service.sweep(), vec![old.locker_id]);
        assert!(service.pickup(&fresh.code).is_ok());
    }

    #[test]
    fn test_demo_walkthrough() {
        let (service, clock) = create_service(10, 10, 10);

        let first = service.deposit(SizeClass::Small).unwrap();
        for _ in 0..9 {
            service.deposit(SizeClass::Small).unwrap();
        }
        let spill = service.deposit(SizeClass::Small).unwrap();
        assert_eq!(spill.locker_id.as_str(), "M-0");

        service.pickup(&first.code).unwrap();

        let large = service.deposit(SizeClass::Large).unwrap();
        clock.advance(4 * DAY_MS);
        let reclaimed = service.sweep();

        // Every remaining deposit is now four days old
        assert_eq!(reclaimed.len(), 11);
        assert!(reclaimed.contains(&large.locker_id));
        assert_eq!(service.status().active_tickets, 0);
        assert_eq!(service.status().total(), 30);
    }

    #[test]
    fn test_same_tick_deposits_get_distinct_codes() {
        for scheme in [CodeScheme::Random, CodeScheme::Sequential] {
            let clock = ManualClock::new(5);
            let config = EngineConfig {
                inventory: InventorySpec::Counts { small: 50, medium: 0, large: 0 },
                code_scheme: scheme,
                ..EngineConfig::default()
            };
            let service = LockerService::new(config, clock).unwrap();

            let mut codes = HashSet::new();
            for _ in 0..50 {
                assert!(codes.insert(service.deposit(SizeClass::Small).unwrap().code));
            }
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = EngineConfig::with_inventory(InventorySpec::Explicit(vec!["Z-9".into()]));
        assert!(matches!(
            LockerService::new(config, ManualClock::default()),
            Err(ConfigError::InvalidLockerId(_))
        ));
    }

    #[test]
    fn test_prebuilt_store_requires_retention_window() {
        let store = InMemoryLockerStore::new(&InventorySpec::default(), CodeScheme::Sequential).unwrap();
        assert!(matches!(
            LockerService::with_store(store, ManualClock::new(1000), 0),
            Err(ConfigError::ZeroRetention)
        ));

        let store = InMemoryLockerStore::new(&InventorySpec::default(), CodeScheme::Sequential).unwrap();
        let service = LockerService::with_store(store, ManualClock::new(1000), 10).unwrap();
        service.deposit(SizeClass::Small).unwrap();
        assert!(service.sweep().is_empty());
    }

    #[test]
    fn test_conservation_under_concurrency() {
        let (service, clock) = create_service(4, 4, 4);
        let total = service.status().total();

        std::thread::scope(|s| {
            for worker in 0..8 {
                let service = &service;
                let clock = &clock;
                s.spawn(move || {
                    let mut held = Vec::new();
                    for round in 0..200 {
                        let size = SizeClass::ALL[(worker + round) % 3];
                        match service.deposit(size) {
                            Ok(ticket) => held.push(ticket.code),
                            Err(LockerError::NoCapacity(got)) => assert_eq!(got, size),
                            Err(e) => panic!("unexpected error: {e}"),
                        }
                        if round % 3 == 0 {
                            if let Some(code) = held.pop() {
                                // A concurrent sweep may already have reclaimed it
                                let _ = service.pickup(&code);
                            }
                        }
                        if worker == 0 && round % 50 == 0 {
                            clock.advance(DAY_MS);
                            service.sweep();
                        }
                        assert_eq!(service.status().total(), total);
                    }
                });
            }
        });

        assert_eq!(service.status().total(), total);

        let mut seen = HashSet::new();
        for size in SizeClass::ALL {
            for locker in service.free_lockers(size) {
                assert!(seen.insert(locker));
            }
        }
        for ticket in service.active_tickets() {
            assert!(seen.insert(ticket.locker_id));
        }
        assert_eq!(seen.len(), total);
    }
}
