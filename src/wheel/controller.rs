//! Session transitions
//!
//! Each UI message maps to one transition. Transitions whose precondition
//! does not hold (the matching control is disabled) are ignored.

use rand::Rng;

use super::animation::SpinAnimation;
use super::bet::normalize_bet;
use super::state::{ActiveSpin, Controls, Session, SpinPhase, WheelEvent, WheelInput};
use crate::normalize_degrees;

impl Session {
    /// Apply one UI message and return the effects to render
    pub fn handle(&mut self, input: WheelInput) -> Vec<WheelEvent> {
        match input {
            WheelInput::BetChanged(raw) => self.set_bet(&raw),
            WheelInput::StartSpin => self.start_spin(),
            WheelInput::SpinComplete => self.on_spin_complete(),
            WheelInput::Tick { elapsed_ms } => self.tick(elapsed_ms),
            WheelInput::Withdraw => self.withdraw(),
        }
    }

    /// Bet field changed: normalize to `0..=balance` and gate the start button
    pub fn set_bet(&mut self, raw: &str) -> Vec<WheelEvent> {
        if self.is_spinning() || !self.controls.bet_input_enabled {
            log::debug!("Bet input ignored while locked");
            return Vec::new();
        }

        self.bet = normalize_bet(raw, self.balance);
        self.controls.start_enabled = self.bet > 0;
        log::debug!("Bet set to {} from {:?}", self.bet, raw);

        vec![
            WheelEvent::BetChanged(self.bet),
            WheelEvent::ControlsChanged(self.controls),
        ]
    }

    /// Start a spin toward a randomly sampled rotation
    pub fn start_spin(&mut self) -> Vec<WheelEvent> {
        if !self.can_start() {
            log::debug!("Spin start ignored (phase {:?}, bet {})", self.phase, self.bet);
            return Vec::new();
        }
        let target = self
            .rng
            .random_range(self.settings.spin_min_deg..self.settings.spin_max_deg);
        self.begin_spin(target)
    }

    /// Start a spin toward a chosen rotation instead of a sampled one
    pub fn start_spin_to(&mut self, target_deg: u32) -> Vec<WheelEvent> {
        if !self.can_start() {
            log::debug!("Spin start ignored (phase {:?}, bet {})", self.phase, self.bet);
            return Vec::new();
        }
        self.begin_spin(target_deg)
    }

    fn can_start(&self) -> bool {
        self.phase == SpinPhase::Idle && self.bet > 0 && self.controls.start_enabled
    }

    fn begin_spin(&mut self, target_deg: u32) -> Vec<WheelEvent> {
        let mut events = Vec::with_capacity(4);

        // A stake entered through the open bet field comes off the balance.
        // Re-spinning locked winnings does not charge them again.
        let fresh_stake = self.controls.bet_input_enabled;
        if fresh_stake {
            self.balance = self.balance.saturating_sub(self.bet);
            events.push(WheelEvent::BalanceChanged(self.balance));
        }

        self.controls = Controls {
            start_enabled: false,
            withdraw_enabled: false,
            bet_input_enabled: false,
        };
        events.push(WheelEvent::ControlsChanged(self.controls));

        let duration_ms = self.settings.spin_duration_ms;
        self.spin = Some(ActiveSpin {
            animation: SpinAnimation::new(f64::from(target_deg), duration_ms),
            target_deg,
            last_tick_deg: 0.0,
            fresh_stake,
        });
        self.last_rotation_deg = Some(target_deg);
        self.phase = SpinPhase::Spinning;

        log::info!(
            "Spin started: bet {}, target {} deg{}",
            self.bet,
            target_deg,
            if fresh_stake { "" } else { " (riding winnings)" }
        );
        events.push(WheelEvent::SpinStarted {
            target_deg,
            duration_ms,
        });
        events
    }

    /// Wheel finished animating: resolve the landing segment and pay out
    pub fn on_spin_complete(&mut self) -> Vec<WheelEvent> {
        let Some(spin) = self.spin.take() else {
            log::debug!("Spin completion ignored while idle");
            return Vec::new();
        };
        self.phase = SpinPhase::Idle;

        let rest_deg = normalize_degrees(f64::from(spin.target_deg));
        let (segment, multiplier) = self.table.resolve(rest_deg);
        self.bet = self.bet.saturating_mul(u64::from(multiplier));
        self.last_multiplier = Some(multiplier);

        let mut events = vec![WheelEvent::SpinResolved {
            rest_deg,
            segment,
            multiplier,
            bet: self.bet,
        }];

        if self.bet == 0 {
            self.controls = Controls {
                start_enabled: false,
                withdraw_enabled: false,
                bet_input_enabled: true,
            };
            events.push(WheelEvent::BetInputReset);
            log::info!("Spin lost on segment {} (balance {})", segment, self.balance);
        } else {
            self.controls = Controls {
                start_enabled: true,
                withdraw_enabled: true,
                bet_input_enabled: false,
            };
            log::info!(
                "Spin won x{} on segment {}: bet now {}",
                multiplier,
                segment,
                self.bet
            );
        }

        events.push(WheelEvent::BetChanged(self.bet));
        events.push(WheelEvent::ControlsChanged(self.controls));
        events
    }

    /// Animation frame while spinning: emit a tick cue every `tick_step_deg`
    pub fn tick(&mut self, elapsed_ms: f64) -> Vec<WheelEvent> {
        let step = self.settings.tick_step_deg;
        let Some(spin) = self.spin.as_mut() else {
            return Vec::new();
        };

        let current = normalize_degrees(spin.animation.angle_at(elapsed_ms));
        // Falling below the last cue means the wheel passed 360 since then
        if current - spin.last_tick_deg >= step || current < spin.last_tick_deg {
            spin.last_tick_deg = current;
            vec![WheelEvent::TickCue]
        } else {
            Vec::new()
        }
    }

    /// Bank the current bet into the balance
    pub fn withdraw(&mut self) -> Vec<WheelEvent> {
        if self.is_spinning() || self.bet == 0 || !self.controls.withdraw_enabled {
            log::debug!("Withdraw ignored (bet {})", self.bet);
            return Vec::new();
        }

        self.balance = self.balance.saturating_add(self.bet);
        log::info!("Withdrew {}: balance {}", self.bet, self.balance);
        self.bet = 0;
        self.controls = Controls {
            start_enabled: false,
            withdraw_enabled: false,
            bet_input_enabled: true,
        };

        vec![
            WheelEvent::BalanceChanged(self.balance),
            WheelEvent::BetInputReset,
            WheelEvent::BetChanged(0),
            WheelEvent::ControlsChanged(self.controls),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    /// 14 full turns plus 70 degrees: segment 4, multiplier 5
    const LAND_X5: u32 = 5110;
    /// 14 full turns plus 20 degrees: segment 1, multiplier 0
    const LAND_X0: u32 = 5060;
    /// 14 full turns plus 180 degrees: segment 10, multiplier 10
    const LAND_X10: u32 = 5220;

    fn spin_to(session: &mut Session, target: u32) -> Vec<WheelEvent> {
        let started = session.start_spin_to(target);
        assert!(!started.is_empty(), "spin did not start");
        session.handle(WheelInput::SpinComplete)
    }

    #[test]
    fn test_win_then_withdraw() {
        let mut session = Session::new(7);
        session.handle(WheelInput::BetChanged("100".into()));
        assert!(session.controls().start_enabled);

        spin_to(&mut session, LAND_X5);
        assert_eq!(session.bet(), 500);
        assert_eq!(session.balance(), 4900);
        assert_eq!(session.last_multiplier(), Some(5));
        let controls = session.controls();
        assert!(controls.withdraw_enabled);
        assert!(controls.start_enabled);
        assert!(!controls.bet_input_enabled);

        let events = session.handle(WheelInput::Withdraw);
        assert_eq!(session.balance(), 5400);
        assert_eq!(session.bet(), 0);
        assert!(events.contains(&WheelEvent::BetInputReset));
        assert_eq!(session.balance_text(), "Balance: R5400");
        let controls = session.controls();
        assert!(!controls.withdraw_enabled);
        assert!(!controls.start_enabled);
        assert!(controls.bet_input_enabled);
    }

    #[test]
    fn test_loss_reopens_bet_input() {
        let mut session = Session::new(7);
        session.set_bet("100");
        let events = spin_to(&mut session, LAND_X0);

        assert_eq!(session.bet(), 0);
        assert_eq!(session.balance(), 4900);
        assert!(events.contains(&WheelEvent::BetInputReset));
        assert_eq!(
            session.controls(),
            Controls {
                start_enabled: false,
                withdraw_enabled: false,
                bet_input_enabled: true,
            }
        );
        assert!(session.withdraw().is_empty());
    }

    #[test]
    fn test_start_requires_bet() {
        let mut session = Session::new(7);
        assert!(session.handle(WheelInput::StartSpin).is_empty());
        session.set_bet("0");
        assert!(!session.controls().start_enabled);
        assert!(session.handle(WheelInput::StartSpin).is_empty());
        assert_eq!(session.phase(), SpinPhase::Idle);
    }

    #[test]
    fn test_start_spin_samples_in_range() {
        let mut session = Session::new(42);
        session.set_bet("10");
        let events = session.handle(WheelInput::StartSpin);
        let Some(WheelEvent::SpinStarted {
            target_deg,
            duration_ms,
        }) = events.last().cloned()
        else {
            panic!("expected SpinStarted, got {:?}", events);
        };
        assert!((5000..10000).contains(&target_deg));
        assert_eq!(duration_ms, 5000.0);
        assert_eq!(session.phase(), SpinPhase::Spinning);
        assert_eq!(session.balance(), 4990);
        assert_eq!(session.last_rotation_deg(), Some(target_deg));
    }

    #[test]
    fn test_same_seed_same_spins() {
        let mut a = Session::new(99);
        let mut b = Session::new(99);
        for _ in 0..5 {
            a.set_bet("1");
            b.set_bet("1");
            assert_eq!(a.start_spin(), b.start_spin());
            assert_eq!(a.on_spin_complete(), b.on_spin_complete());
            a.withdraw();
            b.withdraw();
        }
        assert_eq!(a.balance(), b.balance());
    }

    #[test]
    fn test_inputs_locked_while_spinning() {
        let mut session = Session::new(7);
        session.set_bet("100");
        session.start_spin_to(LAND_X5);

        assert!(session.set_bet("300").is_empty());
        assert!(session.start_spin().is_empty());
        assert!(session.withdraw().is_empty());
        assert_eq!(session.bet(), 100);
        assert_eq!(session.balance(), 4900);
    }

    #[test]
    fn test_duplicate_completion_is_ignored() {
        let mut session = Session::new(7);
        session.set_bet("100");
        spin_to(&mut session, LAND_X5);
        assert!(session.on_spin_complete().is_empty());
        assert_eq!(session.bet(), 500);
    }

    #[test]
    fn test_riding_winnings_does_not_charge_again() {
        let mut session = Session::new(7);
        session.set_bet("100");
        spin_to(&mut session, LAND_X5);
        assert_eq!((session.balance(), session.bet()), (4900, 500));

        let events = session.start_spin_to(LAND_X10);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, WheelEvent::BalanceChanged(_)))
        );
        assert_eq!(session.active_spin().map(|s| s.fresh_stake), Some(false));
        assert_eq!(session.balance(), 4900);

        session.on_spin_complete();
        assert_eq!(session.bet(), 5000);
        session.withdraw();
        assert_eq!(session.balance(), 9900);
    }

    #[test]
    fn test_bet_input_locked_after_win() {
        let mut session = Session::new(7);
        session.set_bet("100");
        spin_to(&mut session, LAND_X5);
        assert!(session.set_bet("1").is_empty());
        assert_eq!(session.bet(), 500);
    }

    #[test]
    fn test_all_in_loss_leaves_nothing_to_bet() {
        let mut session = Session::new(7);
        session.set_bet("999999");
        assert_eq!(session.bet(), 5000);
        spin_to(&mut session, LAND_X0);
        assert_eq!(session.balance(), 0);
        session.set_bet("10");
        assert_eq!(session.bet(), 0);
        assert!(!session.controls().start_enabled);
    }

    #[test]
    fn test_tick_cues_every_step_and_on_wrap() {
        let settings = Settings {
            spin_duration_ms: 1000.0,
            ..Default::default()
        };
        let mut session = Session::with_settings(settings, 7);
        session.set_bet("10");
        session.start_spin_to(LAND_X5);

        // Early frames: the wheel has barely moved
        assert!(session.tick(0.0).is_empty());
        assert!(session.tick(0.001).is_empty());

        let mut cues = 0;
        for frame in 0..=60 {
            let elapsed = frame as f64 * 1000.0 / 60.0;
            cues += session
                .tick(elapsed)
                .iter()
                .filter(|e| **e == WheelEvent::TickCue)
                .count();
        }
        // Sampling at 60 fps cannot fire more than once per frame, and a
        // 5110 degree spin passes at least one wrap per turn
        assert!(cues >= 14, "only {} cues", cues);
        assert!(cues <= 61);

        session.on_spin_complete();
        assert!(session.tick(500.0).is_empty());
    }

    #[test]
    fn test_tick_step_threshold() {
        let settings = Settings {
            spin_duration_ms: 1000.0,
            ..Default::default()
        };
        let mut session = Session::with_settings(settings, 7);
        session.set_bet("10");
        session.start_spin_to(LAND_X5);

        let spin = session.active_spin().copied().unwrap();
        // Find an elapsed time whose rendered angle is just under one step
        let mut t = 0.0;
        while spin.animation.angle_at(t + 0.01) < 99.0 {
            t += 0.01;
        }
        assert!(session.tick(t).is_empty());
        while spin.animation.angle_at(t) < 101.0 {
            t += 0.01;
        }
        assert_eq!(session.tick(t), vec![WheelEvent::TickCue]);
        assert!(session.tick(t).is_empty());
    }

    #[test]
    fn test_spin_with_saturated_range() {
        let settings = Settings {
            spin_min_deg: u32::MAX,
            spin_max_deg: u32::MAX,
            ..Default::default()
        };
        let mut session = Session::with_settings(settings, 7);
        session.set_bet("10");
        let events = session.start_spin();
        assert!(events.contains(&WheelEvent::SpinStarted {
            target_deg: u32::MAX - 1,
            duration_ms: 5000.0,
        }));
    }

    proptest! {
        #[test]
        fn payout_is_bet_times_multiplier(bet in 1u64..=5000, rest in 0u32..360) {
            let mut session = Session::new(3);
            session.set_bet(&bet.to_string());
            let target = 5040 + rest;
            let (_, multiplier) = session.table().resolve(f64::from(target));

            session.start_spin_to(target);
            session.on_spin_complete();

            prop_assert_eq!(session.bet(), bet * u64::from(multiplier));
            prop_assert_eq!(session.balance(), 5000 - bet);
            prop_assert_eq!(session.controls().withdraw_enabled, multiplier > 0);

            let prior = session.bet();
            session.withdraw();
            prop_assert_eq!(session.bet(), 0);
            prop_assert_eq!(session.balance(), 5000 - bet + prior);
        }

        #[test]
        fn entered_bet_never_exceeds_balance(raw in "[-+ ]?[0-9]{0,8}[a-z.]?") {
            let mut session = Session::new(3);
            session.set_bet(&raw);
            prop_assert!(session.bet() <= session.balance());
            prop_assert_eq!(session.controls().start_enabled, session.bet() > 0);
        }
    }
}
