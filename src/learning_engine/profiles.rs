//! The two alternating learner profiles and their persisted ledgers.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::learning_engine::{
    ledger::Ledger,
    models::Profile,
    store::{ledger_key, load_json, save_json, ProgressStore},
};

#[derive(Debug, Clone)]
pub struct Profiles {
    active: Profile,
    first: Ledger,
    second: Ledger,
    names: [String; 2],
}

impl Profiles {
    /// Load both ledgers, apply the configured daily goal and the day
    /// rollover to each.
    pub fn load<S: ProgressStore + ?Sized>(
        store: &S,
        active: Profile,
        names: [String; 2],
        daily_goal: u32,
        today: NaiveDate,
    ) -> Result<Self, StoreError> {
        let load_one = |profile: Profile| -> Result<Ledger, StoreError> {
            let mut ledger = load_json::<Ledger, S>(store, &ledger_key(profile))?
                .unwrap_or_else(|| Ledger::new(daily_goal, today));
            ledger.daily_goal = daily_goal;
            ledger.roll_over(today);
            Ok(ledger)
        };
        Ok(Profiles {
            active,
            first: load_one(Profile::First)?,
            second: load_one(Profile::Second)?,
            names,
        })
    }

    pub fn active(&self) -> Profile {
        self.active
    }

    pub fn display_name(&self, profile: Profile) -> &str {
        match profile {
            Profile::First  => &self.names[0],
            Profile::Second => &self.names[1],
        }
    }

    pub fn ledger(&self) -> &Ledger {
        match self.active {
            Profile::First  => &self.first,
            Profile::Second => &self.second,
        }
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        match self.active {
            Profile::First  => &mut self.first,
            Profile::Second => &mut self.second,
        }
    }

    /// Toggle to the other profile and return it.
    pub fn switch(&mut self) -> Profile {
        self.active = self.active.other();
        info!(profile = %self.display_name(self.active), "switched profile");
        self.active
    }

    /// Persist both ledgers.
    pub fn save<S: ProgressStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, &ledger_key(Profile::First), &self.first)?;
        save_json(store, &ledger_key(Profile::Second), &self.second)
    }

    /// Wipe the active profile after `confirm` agrees.
    ///
    /// `confirm` receives the profile's display name. Returns whether the
    /// reset happened.
    pub fn reset_active<S, F>(
        &mut self, store: &mut S, today: NaiveDate, confirm: F,
    ) -> Result<bool, StoreError>
    where
        S: ProgressStore + ?Sized,
        F: FnOnce(&str) -> bool,
    {
        let name = self.display_name(self.active).to_string();
        if !confirm(&name) {
            return Ok(false);
        }
        self.ledger_mut().clear(today);
        store.remove(&ledger_key(self.active))?;
        warn!(profile = %name, "progress reset");
        Ok(true)
    }
}
