use crate::models::{Plan, UsageAction, UsageCounters, UsageLimits};
use thiserror::Error;

/// Errors raised by the usage quota check
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuotaError {
    #[error("Free plan limit reached for {action}: {used}/{limit}")]
    Exceeded {
        action: &'static str,
        used: u32,
        limit: u32,
    },
}

/// Limits that apply to a plan, `None` meaning unlimited
#[inline]
pub fn limits_for(plan: Plan, free_limits: &UsageLimits) -> Option<UsageLimits> {
    match plan {
        Plan::Free => Some(*free_limits),
        Plan::Premium => None,
    }
}

/// Remaining uses of `action`, `None` when the plan is unlimited
///
/// `Some(0)` means the next `action` is refused.
pub fn remaining(
    plan: Plan,
    usage: &UsageCounters,
    free_limits: &UsageLimits,
    action: UsageAction,
) -> Option<u32> {
    limits_for(plan, free_limits).map(|limits| limits.get(action).saturating_sub(usage.get(action)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_plan_under_limit() {
        let usage = UsageCounters {
            trips_created: 2,
            trips_joined: 0,
        };
        let limits = UsageLimits::default();

        assert_eq!(remaining(Plan::Free, &usage, &limits, UsageAction::CreateTrip), Some(1));
    }

    #[test]
    fn test_free_plan_at_limit() {
        let limits = UsageLimits {
            max_trips_created: 3,
            max_trips_joined: 1,
        };
        let usage = UsageCounters {
            trips_created: 0,
            trips_joined: 1,
        };

        assert_eq!(remaining(Plan::Free, &usage, &limits, UsageAction::JoinTrip), Some(0));
        assert_eq!(remaining(Plan::Free, &usage, &limits, UsageAction::CreateTrip), Some(3));
    }

    #[test]
    fn test_usage_over_lowered_limit_saturates() {
        let limits = UsageLimits {
            max_trips_created: 1,
            max_trips_joined: 1,
        };
        let usage = UsageCounters {
            trips_created: 4,
            trips_joined: 0,
        };

        assert_eq!(remaining(Plan::Free, &usage, &limits, UsageAction::CreateTrip), Some(0));
    }

    #[test]
    fn test_exceeded_message() {
        let err = QuotaError::Exceeded {
            action: UsageAction::JoinTrip.as_str(),
            used: 5,
            limit: 5,
        };

        assert_eq!(err.to_string(), "Free plan limit reached for join_trip: 5/5");
    }

    #[test]
    fn test_premium_unlimited() {
        let usage = UsageCounters {
            trips_created: 1000,
            trips_joined: 1000,
        };
        let limits = UsageLimits::default();

        assert_eq!(remaining(Plan::Premium, &usage, &limits, UsageAction::CreateTrip), None);
        assert_eq!(remaining(Plan::Premium, &usage, &limits, UsageAction::JoinTrip), None);
    }
}
