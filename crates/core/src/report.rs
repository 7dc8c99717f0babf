//! Aggregation over persisted sale records.
//!
//! Reports are always recomputed from the rows handed in; nothing here
//! caches across calls.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::sale::{Path, SaleRecord};

/// Sums of the four computed money fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total: Decimal,
    pub commission: Decimal,
    pub loyalty_bonus: Decimal,
    pub forge_bonus: Decimal,
}

impl SummaryTotals {
    fn absorb(&mut self, record: &SaleRecord) {
        self.total += record.total;
        self.commission += record.commission;
        self.loyalty_bonus += record.loyalty_bonus;
        self.forge_bonus += record.forge_bonus;
    }
}

/// One (employee, path) group of the performance dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathGroup {
    pub employee: String,
    pub path: Path,
    pub totals: SummaryTotals,
}

/// Groups records by (employee, path) and sorts descending by summed total.
/// The sort is stable, so groups with equal totals keep discovery order.
pub fn aggregate_by_employee_and_path(records: &[SaleRecord]) -> Vec<PathGroup> {
    let mut groups: Vec<PathGroup> = Vec::new();
    let mut index: HashMap<(String, Path), usize> = HashMap::new();

    for record in records {
        let key = (record.employee.clone(), record.path);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(PathGroup {
                employee: record.employee.clone(),
                path: record.path,
                totals: SummaryTotals::default(),
            });
            groups.len() - 1
        });
        groups[slot].totals.absorb(record);
    }

    groups.sort_by(|a, b| b.totals.total.cmp(&a.totals.total));
    groups
}

/// Sums the computed fields across one employee's records only.
pub fn individual_summary(records: &[SaleRecord], employee: &str) -> SummaryTotals {
    let mut totals = SummaryTotals::default();
    for record in records.iter().filter(|record| record.employee == employee) {
        totals.absorb(record);
    }
    totals
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{aggregate_by_employee_and_path, individual_summary};
    use crate::domain::month::Month;
    use crate::domain::sale::{Path, SaleFigures, SaleRecord};
    use crate::engine;

    fn dec(value: &str) -> Decimal {
        value.parse().expect("decimal literal")
    }

    fn record(id: i64, employee: &str, month: Month, figures: SaleFigures) -> SaleRecord {
        let computed = engine::evaluate(&figures, 0).expect("valid figures");
        SaleRecord {
            id,
            employee: employee.to_string(),
            month,
            rochas: computed.figures.rochas,
            decorativos: computed.figures.decorativos,
            itens: computed.figures.itens,
            total: computed.total,
            path: computed.path,
            commission: computed.commission,
            loyalty_bonus: computed.loyalty_bonus,
            forge_bonus: computed.forge_bonus,
        }
    }

    fn figures(rochas: &str, decorativos: &str, itens: &str) -> SaleFigures {
        SaleFigures { rochas: dec(rochas), decorativos: dec(decorativos), itens: dec(itens) }
    }

    #[test]
    fn splits_one_employee_across_distinct_paths() {
        let records = vec![
            record(1, "Ana", Month::Jan, figures("1000", "0", "1600")),
            record(2, "Ana", Month::Jan, figures("2000", "0", "4000")),
        ];

        let groups = aggregate_by_employee_and_path(&records);
        assert_eq!(groups.len(), 2, "path A and path C form separate groups");

        let group_c = groups.iter().find(|g| g.path == Path::C).expect("path C group");
        assert_eq!(group_c.employee, "Ana");
        assert_eq!(group_c.totals.total, dec("6000"));
        assert_eq!(group_c.totals.commission, dec("75"), "2000 * 0.0375");

        let group_a = groups.iter().find(|g| g.path == Path::A).expect("path A group");
        assert_eq!(group_a.totals.total, dec("2600"));
    }

    #[test]
    fn groups_sort_descending_by_total_with_stable_ties() {
        let records = vec![
            record(1, "Bia", Month::Fev, figures("100", "0", "1500")),
            record(2, "Ana", Month::Fev, figures("3000", "0", "4000")),
            record(3, "Caio", Month::Fev, figures("100", "0", "1500")),
        ];

        let groups = aggregate_by_employee_and_path(&records);
        assert_eq!(groups[0].employee, "Ana");
        // Bia and Caio tie at 1600; Bia was discovered first.
        assert_eq!(groups[1].employee, "Bia");
        assert_eq!(groups[2].employee, "Caio");
    }

    #[test]
    fn accumulates_same_group_rows() {
        let records = vec![
            record(1, "Ana", Month::Jan, figures("1000", "0", "1600")),
            record(2, "Ana", Month::Mar, figures("500", "100", "1700")),
        ];

        let groups = aggregate_by_employee_and_path(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].totals.total, dec("4900"));
    }

    #[test]
    fn individual_summary_ignores_other_employees() {
        let records = vec![
            record(1, "Ana", Month::Jan, figures("1000", "0", "1600")),
            record(2, "Bia", Month::Jan, figures("9000", "9000", "9000")),
        ];

        let totals = individual_summary(&records, "Ana");
        assert_eq!(totals.total, dec("2600"));
        assert_eq!(totals.commission, dec("20"), "1000 * 0.02");

        let absent = individual_summary(&records, "Nina");
        assert_eq!(absent.total, Decimal::ZERO);
    }
}
