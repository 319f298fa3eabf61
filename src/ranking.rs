use itertools::Itertools;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::{
    config::{Roster, RosterEntry},
    date::{belongs_to_period, is_registration_relevant},
    goal::{evaluate_goal, GoalResult},
    period::Period,
    transaction::SaleRecord,
};

/// A sale activated in the target period.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledSale {
    pub customer: String,
    pub value: Decimal,
    pub activation_date: String,
    pub plan: String,
}

/// Performance of one salesperson over the period.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    pub key: String,
    pub display_name: String,
    pub registered_count: usize,
    pub installed_count: usize,
    pub total_installed_value: Decimal,
    pub goal: GoalResult,
    pub installed: Vec<InstalledSale>,
}

/// Receives a notification once each salesperson is aggregated.
pub trait Progress {
    fn salesperson_done(&mut self, index: usize, total: usize, result: &AggregatedResult);
}

impl Progress for () {
    fn salesperson_done(&mut self, _index: usize, _total: usize, _result: &AggregatedResult) {}
}

/// Aggregate the records attributed to `entry` for the period.
///
/// Records are attributed by exact, case-sensitive match on the display name.
pub fn aggregate_for_person(
    records: &[SaleRecord],
    entry: &RosterEntry,
    period: &Period,
) -> AggregatedResult {
    let (month, year) = (period.month(), period.year());
    let own: Vec<&SaleRecord> = records
        .iter()
        .filter(|r| r.salesperson == entry.display_name)
        .collect();

    let registered_count = own
        .iter()
        .filter(|r| is_registration_relevant(r, month, year))
        .count();

    let installed: Vec<InstalledSale> = own
        .iter()
        .filter(|r| belongs_to_period(&r.activation_date, month, year))
        .map(|r| {
            if r.parsed_value().is_none() {
                debug!(
                    salesperson = %entry.key,
                    customer = %r.customer,
                    value = %r.final_value,
                    "unparsable sale value counted as zero"
                );
            }
            InstalledSale {
                customer: r.customer.clone(),
                value: r.value(),
                activation_date: r.activation_date.clone(),
                plan: r.plan.clone(),
            }
        })
        .collect();

    let total_installed_value = installed.iter().fold(Decimal::ZERO, |total, sale| {
        total.checked_add(sale.value).unwrap_or_else(|| {
            warn!(
                salesperson = %entry.key,
                customer = %sale.customer,
                value = %sale.value,
                "sale value overflows the total and is left out"
            );
            total
        })
    });
    let goal = evaluate_goal(total_installed_value, entry.goal);

    AggregatedResult {
        key: entry.key.clone(),
        display_name: entry.display_name.clone(),
        registered_count,
        installed_count: installed.len(),
        total_installed_value,
        goal,
        installed,
    }
}

/// Goal statistics over a whole ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalStatistics {
    pub salespeople: usize,
    pub attained: usize,
    pub exceeded: usize,
}

impl GoalStatistics {
    fn share(&self, count: usize) -> Decimal {
        if self.salespeople == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(count) / Decimal::from(self.salespeople) * Decimal::ONE_HUNDRED
    }

    pub fn attained_percent(&self) -> Decimal {
        self.share(self.attained)
    }

    pub fn exceeded_percent(&self) -> Decimal {
        self.share(self.exceeded)
    }
}

/// Salespeople ordered by installed value, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub period: Period,
    pub entries: Vec<AggregatedResult>,
}

impl Ranking {
    /// Position (1-based) and result of a salesperson, by key or display name.
    pub fn get(&self, name: &str) -> Option<(usize, &AggregatedResult)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, r)| r.key == name || r.display_name == name)
            .map(|(i, r)| (i + 1, r))
    }

    pub fn statistics(&self) -> GoalStatistics {
        GoalStatistics {
            salespeople: self.entries.len(),
            attained: self.entries.iter().filter(|r| r.goal.attained).count(),
            exceeded: self.entries.iter().filter(|r| r.goal.exceeded()).count(),
        }
    }
}

/// Aggregate every roster entry and rank by installed value, descending.
///
/// Ties keep roster order.
pub fn build_ranking<P: Progress + ?Sized>(
    records: &[SaleRecord],
    roster: &Roster,
    period: &Period,
    progress: &mut P,
) -> Ranking {
    let total = roster.entries().len();
    let results: Vec<AggregatedResult> = roster
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let result = aggregate_for_person(records, entry, period);
            debug!(
                salesperson = %result.key,
                installed = result.installed_count,
                value = %result.total_installed_value,
                "salesperson aggregated"
            );
            progress.salesperson_done(index, total, &result);
            result
        })
        .collect();

    Ranking {
        period: period.clone(),
        entries: results
            .into_iter()
            .sorted_by(|a, b| b.total_installed_value.cmp(&a.total_installed_value))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::config::{Roster, RosterEntry};
    use crate::goal::Goal;
    use crate::period::{MonthStyle, Period};
    use crate::ranking::{aggregate_for_person, build_ranking, AggregatedResult, Progress};
    use crate::transaction::SaleRecord;

    fn july() -> Period {
        Period::new(7, "25", MonthStyle::Numeric).unwrap()
    }

    fn entry(key: &str, name: &str, goal: Decimal) -> RosterEntry {
        RosterEntry {
            key: key.to_string(),
            display_name: name.to_string(),
            goal: Goal::new(goal).unwrap(),
        }
    }

    fn roster(entries: Vec<RosterEntry>) -> Roster {
        Roster::new(entries)
    }

    fn sale(salesperson: &str, value: &str, registration: &str, activation: &str) -> SaleRecord {
        SaleRecord {
            salesperson: salesperson.to_string(),
            customer: format!("customer of {}", salesperson),
            final_value: value.to_string(),
            plan: "Basic".to_string(),
            registration_date: registration.to_string(),
            activation_date: activation.to_string(),
        }
    }

    mod aggregation {
        use super::*;

        #[test]
        fn no_records() {
            let result =
                aggregate_for_person(&[], &entry("A", "A Full", dec!(18000)), &july());
            assert_eq!(result.total_installed_value, dec!(0));
            assert!(result.installed.is_empty());
            assert_eq!(result.registered_count, 0);
            assert!(!result.goal.attained);
        }

        #[test]
        fn counts_and_sums_only_own_records_of_the_period() {
            let records = vec![
                sale("A Full", "1000", "01-07-25", "03-07-25"),
                sale("A Full", "250.50", "20-06-25", "02-07-25"),
                sale("A Full", "999", "01-06-25", "10-06-25"),
                sale("A Full", "500", "28-07-25", "  -   -  "),
                sale("a full", "5000", "01-07-25", "05-07-25"),
                sale("B Full", "7000", "01-07-25", "05-07-25"),
            ];
            let result =
                aggregate_for_person(&records, &entry("A", "A Full", dec!(18000)), &july());
            assert_eq!(result.installed_count, 2);
            assert_eq!(result.total_installed_value, dec!(1250.50));
            // registered in July, plus the pending one
            assert_eq!(result.registered_count, 2);
            assert_eq!(result.goal.shortfall, dec!(16749.50));
        }

        #[test]
        fn pending_sale_from_earlier_period_is_registered() {
            let records = vec![sale("A Full", "100", "01-03-25", "")];
            let result =
                aggregate_for_person(&records, &entry("A", "A Full", dec!(18000)), &july());
            assert_eq!(result.registered_count, 1);
            assert_eq!(result.installed_count, 0);
        }

        #[test]
        fn unparsable_values_count_as_zero() {
            let records = vec![
                sale("A Full", "abc", "01-07-25", "03-07-25"),
                sale("A Full", "", "01-07-25", "04-07-25"),
                sale("A Full", "300", "01-07-25", "05-07-25"),
            ];
            let result =
                aggregate_for_person(&records, &entry("A", "A Full", dec!(18000)), &july());
            assert_eq!(result.installed_count, 3);
            assert_eq!(result.total_installed_value, dec!(300));
            assert_eq!(result.installed[0].value, dec!(0));
        }

        #[test]
        fn overflowing_values_are_left_out_of_the_total() {
            let records = vec![
                sale("A Full", "79228162514264337593543950335", "01-07-25", "03-07-25"),
                sale("A Full", "79228162514264337593543950335", "01-07-25", "04-07-25"),
            ];
            let result =
                aggregate_for_person(&records, &entry("A", "A Full", dec!(0.01)), &july());
            assert_eq!(result.installed_count, 2);
            assert_eq!(result.total_installed_value, Decimal::MAX);
            assert!(result.goal.attained);
            assert_eq!(result.goal.percent_uncapped, Decimal::MAX);
        }

        #[test]
        fn details_keep_source_order() {
            let records = vec![
                sale("A Full", "1", "01-07-25", "09-07-25"),
                sale("A Full", "2", "01-07-25", "02-07-25"),
            ];
            let result =
                aggregate_for_person(&records, &entry("A", "A Full", dec!(18000)), &july());
            let dates: Vec<&str> = result
                .installed
                .iter()
                .map(|s| s.activation_date.as_str())
                .collect();
            assert_eq!(dates, vec!["09-07-25", "02-07-25"]);
            assert_eq!(result.installed[0].plan, "Basic");
        }
    }

    mod ranking {
        use super::*;

        #[test]
        fn two_salespeople() {
            let records = vec![
                sale("A Full", "10000", "01-07-25", "05-07-25"),
                sale("B Full", "20000", "01-07-25", "10-07-25"),
            ];
            let roster = roster(vec![
                entry("A", "A Full", dec!(18000)),
                entry("B", "B Full", dec!(18000)),
            ]);
            let ranking = build_ranking(&records, &roster, &july(), &mut ());

            let b = &ranking.entries[0];
            assert_eq!(b.key, "B");
            assert_eq!(b.total_installed_value, dec!(20000));
            assert!(b.goal.attained);
            assert_eq!(b.goal.shortfall, dec!(0));
            assert_eq!(b.goal.percent_uncapped.round_dp(1), dec!(111.1));

            let a = &ranking.entries[1];
            assert_eq!(a.key, "A");
            assert_eq!(a.total_installed_value, dec!(10000));
            assert!(!a.goal.attained);
            assert_eq!(a.goal.shortfall, dec!(8000));
            assert_eq!(a.goal.percent_uncapped.round_dp(1), dec!(55.6));
        }

        #[test]
        fn sorted_descending_and_stable_on_ties() {
            let records = vec![
                sale("C", "500", "01-07-25", "05-07-25"),
                sale("D", "900", "01-07-25", "05-07-25"),
                sale("E", "500", "01-07-25", "05-07-25"),
            ];
            let roster = roster(vec![
                entry("A", "A", dec!(1000)),
                entry("C", "C", dec!(1000)),
                entry("B", "B", dec!(1000)),
                entry("D", "D", dec!(1000)),
                entry("E", "E", dec!(1000)),
            ]);
            let ranking = build_ranking(&records, &roster, &july(), &mut ());
            let keys: Vec<&str> = ranking.entries.iter().map(|r| r.key.as_str()).collect();
            assert_eq!(keys, vec!["D", "C", "E", "A", "B"]);
            for pair in ranking.entries.windows(2) {
                assert!(pair[0].total_installed_value >= pair[1].total_installed_value);
            }
        }

        #[test]
        fn idempotent() {
            let records = vec![
                sale("A Full", "10000", "01-07-25", "05-07-25"),
                sale("B Full", "x", "01-07-25", "10-07-25"),
            ];
            let roster = roster(vec![
                entry("A", "A Full", dec!(18000)),
                entry("B", "B Full", dec!(18000)),
            ]);
            assert_eq!(
                build_ranking(&records, &roster, &july(), &mut ()),
                build_ranking(&records, &roster, &july(), &mut ())
            );
        }

        #[test]
        fn progress_is_reported_per_salesperson() {
            struct Recorder(Vec<(usize, usize, String)>);
            impl Progress for Recorder {
                fn salesperson_done(
                    &mut self,
                    index: usize,
                    total: usize,
                    result: &AggregatedResult,
                ) {
                    self.0.push((index, total, result.key.clone()));
                }
            }

            let roster = roster(vec![
                entry("A", "A Full", dec!(18000)),
                entry("B", "B Full", dec!(18000)),
            ]);
            let mut recorder = Recorder(vec![]);
            build_ranking(&[], &roster, &july(), &mut recorder);
            assert_eq!(
                recorder.0,
                vec![(0, 2, "A".to_string()), (1, 2, "B".to_string())]
            );
        }

        #[test]
        fn lookups_and_statistics() {
            let records = vec![
                sale("A Full", "10000", "01-07-25", "05-07-25"),
                sale("B Full", "20000", "01-07-25", "10-07-25"),
                sale("C Full", "18000", "01-07-25", "10-07-25"),
            ];
            let roster = roster(vec![
                entry("A", "A Full", dec!(18000)),
                entry("B", "B Full", dec!(18000)),
                entry("C", "C Full", dec!(18000)),
                entry("D", "D Full", dec!(18000)),
            ]);
            let ranking = build_ranking(&records, &roster, &july(), &mut ());

            let (position, a) = ranking.get("A").unwrap();
            assert_eq!(position, 3);
            assert_eq!(a.display_name, "A Full");
            assert_eq!(ranking.get("B Full").map(|(p, _)| p), Some(1));
            assert!(ranking.get("Z").is_none());

            let stats = ranking.statistics();
            assert_eq!(stats.salespeople, 4);
            assert_eq!(stats.attained, 2);
            assert_eq!(stats.exceeded, 1);
            assert_eq!(stats.attained_percent(), dec!(50));
            assert_eq!(stats.exceeded_percent(), dec!(25));
        }
    }
}
