//! Role-keyed timer slots.
//!
//! Each [`TimerRole`] owns at most one armed timer. Arming a role cancels the
//! previous timer of that role first, and every armed timer carries a fresh
//! [`TimerToken`]; a firing whose token no longer matches the slot is stale and
//! is dropped. Chains such as "close, wait, advance" are armed as a single
//! [`DelayedAction`] so the whole chain is cancelled as a unit.

use std::{collections::VecDeque, fmt, time::Duration};

use shared::domain::TimerRole;

use crate::effect::TourEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerStep {
    EnterFrontHotspots,
    OpenDetail { index: usize },
    CloseDetail,
    AdvanceHotspot,
    EnterBackHotspots,
    BeginSlideshow,
    AdvanceSlide,
    AdvanceCarousel,
}

/// A sequence of delayed steps that runs and cancels as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DelayedAction {
    steps: VecDeque<(Duration, TimerStep)>,
}

impl DelayedAction {
    pub(crate) fn after(delay: Duration, step: TimerStep) -> Self {
        Self {
            steps: VecDeque::from([(delay, step)]),
        }
    }

    pub(crate) fn then(mut self, delay: Duration, step: TimerStep) -> Self {
        self.steps.push_back((delay, step));
        self
    }

    fn pop(&mut self) -> Option<(Duration, TimerStep)> {
        self.steps.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug)]
struct ArmedTimer {
    token: TimerToken,
    step: TimerStep,
    rest: DelayedAction,
}

/// The step that fired plus whatever remains of its chain.
#[derive(Debug)]
pub(crate) struct DueStep {
    pub(crate) step: TimerStep,
    pub(crate) rest: Option<DelayedAction>,
}

#[derive(Debug, Default)]
pub(crate) struct TimerSlots {
    slots: [Option<ArmedTimer>; 3],
    next_token: u64,
}

impl TimerSlots {
    pub(crate) fn arm(
        &mut self,
        role: TimerRole,
        mut action: DelayedAction,
        effects: &mut Vec<TourEffect>,
    ) {
        self.cancel(role, effects);

        let Some((delay, step)) = action.pop() else {
            return;
        };

        self.next_token += 1;
        let token = TimerToken(self.next_token);
        tracing::debug!(role = ?role, token = token.0, ?step, delay_ms = delay.as_millis() as u64, "arming timer");
        self.slots[role.index()] = Some(ArmedTimer {
            token,
            step,
            rest: action,
        });
        effects.push(TourEffect::ArmTimer { role, token, delay });
    }

    pub(crate) fn cancel(&mut self, role: TimerRole, effects: &mut Vec<TourEffect>) {
        if let Some(armed) = self.slots[role.index()].take() {
            tracing::debug!(role = ?role, token = armed.token.0, step = ?armed.step, "cancelling timer");
            effects.push(TourEffect::CancelTimer {
                role,
                token: armed.token,
            });
        }
    }

    pub(crate) fn cancel_all(&mut self, effects: &mut Vec<TourEffect>) {
        for role in TimerRole::ALL {
            self.cancel(role, effects);
        }
    }

    /// Claims the timer for `role` if `token` is the live one.
    pub(crate) fn take_due(&mut self, role: TimerRole, token: TimerToken) -> Option<DueStep> {
        let slot = &mut self.slots[role.index()];
        match slot {
            Some(armed) if armed.token == token => {}
            _ => return None,
        }

        let armed = slot.take()?;
        let rest = (!armed.rest.is_empty()).then_some(armed.rest);
        Some(DueStep {
            step: armed.step,
            rest,
        })
    }

    pub(crate) fn is_armed(&self, role: TimerRole) -> bool {
        self.slots[role.index()].is_some()
    }

    pub(crate) fn pending_step(&self, role: TimerRole) -> Option<TimerStep> {
        self.slots[role.index()].as_ref().map(|armed| armed.step)
    }

    pub(crate) fn token(&self, role: TimerRole) -> Option<TimerToken> {
        self.slots[role.index()].as_ref().map(|armed| armed.token)
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_a_role_cancels_the_previous_timer_first() {
        let mut slots = TimerSlots::default();
        let mut effects = Vec::new();

        slots.arm(
            TimerRole::Advance,
            DelayedAction::after(Duration::from_secs(1), TimerStep::AdvanceHotspot),
            &mut effects,
        );
        let first = slots.token(TimerRole::Advance).expect("armed");
        slots.arm(
            TimerRole::Advance,
            DelayedAction::after(Duration::from_secs(2), TimerStep::EnterBackHotspots),
            &mut effects,
        );
        let second = slots.token(TimerRole::Advance).expect("armed");

        assert_ne!(first, second);
        assert_eq!(
            effects[1],
            TourEffect::CancelTimer {
                role: TimerRole::Advance,
                token: first
            }
        );
        assert_eq!(slots.live_count(), 1);
        assert!(slots.take_due(TimerRole::Advance, first).is_none());
        assert!(slots.take_due(TimerRole::Advance, second).is_some());
        assert!(!slots.is_armed(TimerRole::Advance));
    }

    #[test]
    fn chained_action_hands_back_the_remainder() {
        let mut slots = TimerSlots::default();
        let mut effects = Vec::new();
        slots.arm(
            TimerRole::Advance,
            DelayedAction::after(Duration::from_secs(7), TimerStep::CloseDetail)
                .then(Duration::from_millis(2500), TimerStep::AdvanceHotspot),
            &mut effects,
        );

        let token = slots.token(TimerRole::Advance).expect("armed");
        let due = slots.take_due(TimerRole::Advance, token).expect("due");
        assert_eq!(due.step, TimerStep::CloseDetail);
        let mut rest = due.rest.expect("remaining chain");
        assert_eq!(
            rest.pop(),
            Some((Duration::from_millis(2500), TimerStep::AdvanceHotspot))
        );
    }

    #[test]
    fn roles_are_independent() {
        let mut slots = TimerSlots::default();
        let mut effects = Vec::new();
        slots.arm(
            TimerRole::OpenDetail,
            DelayedAction::after(Duration::from_secs(2), TimerStep::OpenDetail { index: 0 }),
            &mut effects,
        );
        slots.arm(
            TimerRole::Sequence,
            DelayedAction::after(Duration::from_secs(5), TimerStep::AdvanceSlide),
            &mut effects,
        );
        assert_eq!(slots.live_count(), 2);

        slots.cancel_all(&mut effects);
        assert_eq!(slots.live_count(), 0);
        let cancels = effects
            .iter()
            .filter(|e| matches!(e, TourEffect::CancelTimer { .. }))
            .count();
        assert_eq!(cancels, 2);
    }
}
