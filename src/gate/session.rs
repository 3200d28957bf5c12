//! Gate session: the state machine plus its persisted completion flag
//!
//! Persistence is best-effort. A failed read counts as "not completed" and a
//! failed write is logged; the visit still proceeds to the destination.

use super::machine::{AccessGate, Channel, GateEffect};
use crate::platform::KeyValueStore;
use crate::settings::GateConfig;

/// Stored value meaning "gate completed"
const COMPLETED: &str = "true";

/// Whether a previous visit completed the gate
pub fn is_completed(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.get(key) {
        Ok(value) => value.as_deref() == Some(COMPLETED),
        Err(e) => {
            log::warn!("Could not read completion flag: {}", e);
            false
        }
    }
}

/// Record completion; returns false if the write failed
pub fn mark_completed(store: &mut dyn KeyValueStore, key: &str) -> bool {
    match store.set(key, COMPLETED) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not persist completion flag: {}", e);
            false
        }
    }
}

/// Outcome of page load
pub enum Boot {
    /// Already completed: go straight to the destination
    Redirect(String),
    /// Run the gate
    Run(GateSession),
}

/// Gate state machine bound to a store
pub struct GateSession {
    gate: AccessGate,
    store: Box<dyn KeyValueStore>,
    storage_key: String,
}

impl GateSession {
    /// Check the completion flag and either redirect or start a fresh gate
    pub fn boot(config: &GateConfig, store: Box<dyn KeyValueStore>) -> Boot {
        if is_completed(store.as_ref(), &config.storage_key) {
            log::info!("Gate already completed, redirecting to {}", config.destination);
            return Boot::Redirect(config.destination.clone());
        }

        log::info!("Gate locked, waiting for both channels");
        Boot::Run(GateSession {
            gate: AccessGate::new(config),
            store,
            storage_key: config.storage_key.clone(),
        })
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn join(&mut self, channel: Channel) -> Vec<GateEffect> {
        let effects = self.gate.join(channel);
        if effects.contains(&GateEffect::EnableAction) {
            log::info!("Both channels joined, access enabled");
        }
        self.apply_storage(effects)
    }

    pub fn request_access(&mut self) -> Vec<GateEffect> {
        let effects = self.gate.request_access();
        if !effects.is_empty() {
            log::info!("Access requested, starting verification countdown");
        }
        self.apply_storage(effects)
    }

    pub fn tick(&mut self) -> Vec<GateEffect> {
        let effects = self.gate.tick();
        if let Some(GateEffect::ShowStatus(msg)) = effects.first() {
            log::info!("{}", msg);
        }
        self.apply_storage(effects)
    }

    /// Handle `PersistCompletion` here; pass everything else to the driver
    fn apply_storage(&mut self, effects: Vec<GateEffect>) -> Vec<GateEffect> {
        effects
            .into_iter()
            .filter(|effect| {
                if *effect == GateEffect::PersistCompletion {
                    if mark_completed(self.store.as_mut(), &self.storage_key) {
                        log::info!("Countdown complete, completion saved");
                    }
                    return false;
                }
                true
            })
            .collect()
    }

    /// Whether the completion flag is currently stored
    pub fn completed(&self) -> bool {
        is_completed(self.store.as_ref(), &self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GatePhase;
    use crate::platform::MemoryStore;
    use crate::platform::storage::BrokenStore;

    fn run(config: &GateConfig, store: Box<dyn KeyValueStore>) -> GateSession {
        match GateSession::boot(config, store) {
            Boot::Run(session) => session,
            Boot::Redirect(to) => panic!("unexpected redirect to {}", to),
        }
    }

    #[test]
    fn test_boot_redirects_when_completed() {
        let mut store = MemoryStore::new();
        store.set("accessed", "true").unwrap();
        match GateSession::boot(&GateConfig::default(), Box::new(store)) {
            Boot::Redirect(to) => assert_eq!(to, "main/index.html"),
            Boot::Run(_) => panic!("gate should not run"),
        }
    }

    #[test]
    fn test_boot_ignores_other_values() {
        let mut store = MemoryStore::new();
        store.set("accessed", "false").unwrap();
        let session = run(&GateConfig::default(), Box::new(store));
        assert_eq!(session.gate().phase(), GatePhase::Locked);
    }

    #[test]
    fn test_full_visit_persists_and_navigates_once() {
        let config = GateConfig::default();
        let mut session = run(&config, Box::new(MemoryStore::new()));

        session.join(Channel::First);
        session.join(Channel::Second);
        session.request_access();
        assert!(!session.completed());

        let mut effects = Vec::new();
        for _ in 0..5 {
            effects.extend(session.tick());
        }

        let navigations = effects
            .iter()
            .filter(|e| matches!(e, GateEffect::Navigate(_)))
            .count();
        let cancels = effects
            .iter()
            .filter(|e| **e == GateEffect::CancelTimer)
            .count();
        assert_eq!(navigations, 1);
        assert_eq!(cancels, 1);
        assert!(!effects.contains(&GateEffect::PersistCompletion));
        assert!(session.completed());
    }

    #[test]
    fn test_second_visit_after_completion_redirects() {
        // Same backing store across two "page loads"
        let config = GateConfig::default();
        let mut store = MemoryStore::new();
        {
            let mut gate = AccessGate::new(&config);
            gate.join(Channel::First);
            gate.join(Channel::Second);
            gate.request_access();
            for _ in 0..3 {
                if gate.tick().contains(&GateEffect::PersistCompletion) {
                    assert!(mark_completed(&mut store, &config.storage_key));
                }
            }
        }
        assert!(matches!(
            GateSession::boot(&config, Box::new(store)),
            Boot::Redirect(_)
        ));
    }

    #[test]
    fn test_broken_storage_still_navigates() {
        let config = GateConfig::default();
        let mut session = run(&config, Box::new(BrokenStore));

        session.join(Channel::First);
        session.join(Channel::Second);
        session.request_access();
        session.tick();
        session.tick();
        let last = session.tick();
        assert_eq!(
            last,
            vec![
                GateEffect::CancelTimer,
                GateEffect::Navigate("main/index.html".into())
            ]
        );
        assert!(!session.completed());
    }

    #[test]
    fn test_custom_storage_key() {
        let config = GateConfig {
            storage_key: "gate_done".into(),
            countdown_start: 1,
            ..GateConfig::default()
        };
        let mut session = run(&config, Box::new(MemoryStore::new()));
        session.join(Channel::Second);
        session.join(Channel::First);
        session.request_access();
        session.tick();
        assert!(session.completed());
    }
}
