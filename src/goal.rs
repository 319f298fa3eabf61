use rust_decimal::Decimal;

use crate::error::Error;

/// A monthly monetary sales target. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Goal(Decimal);

impl Goal {
    pub fn new(amount: Decimal) -> Result<Self, Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidConfiguration(format!(
                "goal must be greater than zero, got {}",
                amount
            )));
        }
        Ok(Goal(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Progress bands used to colour the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalTier {
    Low,
    Medium,
    High,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalResult {
    pub goal: Decimal,
    /// Progress in percent, clamped to `[0, 100]`.
    pub percent_capped: Decimal,
    /// Progress in percent, may go past 100.
    pub percent_uncapped: Decimal,
    pub attained: bool,
    /// How much is still missing, zero once attained.
    pub shortfall: Decimal,
}

impl GoalResult {
    /// Strictly above the goal.
    pub fn exceeded(&self) -> bool {
        self.percent_uncapped > Decimal::ONE_HUNDRED
    }

    pub fn tier(&self) -> GoalTier {
        if self.percent_uncapped >= Decimal::ONE_HUNDRED {
            GoalTier::Exceeded
        } else if self.percent_capped >= Decimal::from(80) {
            GoalTier::High
        } else if self.percent_capped >= Decimal::from(50) {
            GoalTier::Medium
        } else {
            GoalTier::Low
        }
    }
}

/// Evaluate an installed value against a goal. No rounding is applied here.
///
/// Percentages too large for a `Decimal` saturate at `Decimal::MAX`.
pub fn evaluate_goal(installed_value: Decimal, goal: Goal) -> GoalResult {
    let goal = goal.amount();
    let percent_uncapped = installed_value
        .checked_div(goal)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if installed_value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
    let percent_capped = percent_uncapped
        .min(Decimal::ONE_HUNDRED)
        .max(Decimal::ZERO);
    let attained = installed_value >= goal;
    let shortfall = if attained {
        Decimal::ZERO
    } else {
        goal.checked_sub(installed_value).unwrap_or(Decimal::MAX)
    };

    GoalResult {
        goal,
        percent_capped,
        percent_uncapped,
        attained,
        shortfall,
    }
}
