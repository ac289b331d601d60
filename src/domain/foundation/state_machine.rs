//! Transition tables for status enums.

use super::ValidationError;

/// A status enum whose legal moves are listed in [`StateMachine::TRANSITIONS`].
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug + 'static {
    /// Every allowed `(from, to)` pair.
    const TRANSITIONS: &'static [(Self, Self)];

    fn can_transition_to(&self, target: &Self) -> bool {
        Self::TRANSITIONS
            .iter()
            .any(|(from, to)| from == self && to == target)
    }

    /// States reachable in one step.
    fn successors(&self) -> impl Iterator<Item = Self> + '_ {
        Self::TRANSITIONS
            .iter()
            .filter(move |(from, _)| from == self)
            .map(|(_, to)| *to)
    }

    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("cannot move from {:?} to {:?}", self, target),
            ))
        }
    }

    fn is_terminal(&self) -> bool {
        self.successors().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Irrigation {
        Scheduled,
        Running,
        Finished,
        Skipped,
    }

    impl StateMachine for Irrigation {
        const TRANSITIONS: &'static [(Self, Self)] = &[
            (Irrigation::Scheduled, Irrigation::Running),
            (Irrigation::Scheduled, Irrigation::Skipped),
            (Irrigation::Running, Irrigation::Finished),
        ];
    }

    #[test]
    fn listed_pairs_are_allowed() {
        assert_eq!(
            Irrigation::Scheduled.transition_to(Irrigation::Running),
            Ok(Irrigation::Running)
        );
        assert!(Irrigation::Running.can_transition_to(&Irrigation::Finished));
    }

    #[test]
    fn unlisted_pairs_are_rejected_with_both_states_named() {
        let err = Irrigation::Finished
            .transition_to(Irrigation::Running)
            .unwrap_err();
        assert!(err.to_string().contains("Finished"));
        assert!(err.to_string().contains("Running"));
    }

    #[test]
    fn successors_follow_the_table() {
        let next: Vec<_> = Irrigation::Scheduled.successors().collect();
        assert_eq!(next, vec![Irrigation::Running, Irrigation::Skipped]);
        assert!(Irrigation::Skipped.is_terminal());
        assert!(!Irrigation::Running.is_terminal());
    }
}
