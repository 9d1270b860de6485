use std::cmp::Ordering;

use derive_more::{Display, IsVariant};
use num_rational::BigRational;
use num_traits::Signed;
use ratio_extension::{BigRationalExt, RatioExt};

use super::{Direction, PivotCell, Tableau};

/// How the entering column and, on ratio ties, the leaving row are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IsVariant)]
pub enum PivotRule {
    /// Largest improving coefficient, lowest column on ties. Ratio ties go to the first row.
    /// Can cycle on degenerate tableaus.
    #[default]
    Dantzig,
    /// Lowest-index improving column. Ratio ties go to the row whose basic variable has the
    /// lowest column index. Never cycles.
    Bland,
}

#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Selection {
    Pivot(PivotCell),
    /// No improving column: the basis is optimal for this direction.
    Optimal,
    /// `column` improves the objective but no constraint row limits it.
    Unbounded { column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PivotSelector {
    rule: PivotRule,
}

impl PivotSelector {
    pub const fn new(rule: PivotRule) -> Self {
        Self { rule }
    }

    pub const fn rule(&self) -> PivotRule {
        self.rule
    }

    /// `basis[row]` is the column of the variable basic in `row`; only Bland's rule reads it.
    pub fn select(&self, tableau: &Tableau, basis: &[usize], direction: Direction) -> Selection {
        let Some(column) = self.entering_column(tableau, direction) else {
            log::debug!("No improving column for {direction}");
            return Selection::Optimal;
        };
        log::debug!("Pivot column: {column}");

        match self.leaving_row(tableau, basis, column) {
            Some(row) => {
                log::debug!("Pivot row: {row}");
                Selection::Pivot(PivotCell::new(row, column))
            }
            None => {
                log::debug!("Column {column} has no positive entry in any constraint row");
                Selection::Unbounded { column }
            }
        }
    }

    pub fn entering_column(&self, tableau: &Tableau, direction: Direction) -> Option<usize> {
        let mut improving = tableau
            .reduced_costs()
            .filter(|(_, cost)| improves(direction, cost));

        match self.rule {
            PivotRule::Dantzig => improving
                .fold(None, |best: Option<(usize, &BigRational)>, (column, cost)| {
                    match best {
                        Some((_, best_cost)) if !steeper(direction, cost, best_cost) => best,
                        _ => Some((column, cost)),
                    }
                })
                .map(|(column, _)| column),
            PivotRule::Bland => improving.next().map(|(column, _)| column),
        }
    }

    /// Minimum-ratio test over the rows with a strictly positive entry in `column`.
    pub fn leaving_row(&self, tableau: &Tableau, basis: &[usize], column: usize) -> Option<usize> {
        let mut bound = BigRationalExt::Inf;
        let mut leaving: Option<usize> = None;

        for row in 0..tableau.n_constraints() {
            let coefficient = tableau.get(row, column);
            if !coefficient.is_positive() {
                continue;
            }
            let ratio = RatioExt::Finite(tableau.rhs(row) / coefficient);
            let replace = match ratio.cmp(&bound) {
                Ordering::Less => true,
                Ordering::Equal => {
                    self.rule.is_bland()
                        && leaving.map_or(false, |current| basis[row] < basis[current])
                }
                Ordering::Greater => false,
            };
            if replace {
                bound = ratio;
                leaving = Some(row);
            }
        }

        leaving
    }
}

fn improves(direction: Direction, cost: &BigRational) -> bool {
    match direction {
        Direction::Maximize => cost.is_positive(),
        Direction::Minimize => cost.is_negative(),
    }
}

fn steeper(direction: Direction, cost: &BigRational, than: &BigRational) -> bool {
    match direction {
        Direction::Maximize => cost > than,
        Direction::Minimize => cost < than,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use ratio_extension::IntoRatio;

    use super::*;
    use crate::simplex::pivot;

    fn tableau(data: &[&[i64]]) -> Tableau {
        Tableau::from_rows(
            data.iter()
                .map(|row| row.iter().map(|&el| el.into_ratio()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn dantzig_takes_largest_coefficient_and_smallest_ratio() {
        let t = tableau(&[&[2, 4, 1, 0, 16], &[3, 2, 0, 1, 12], &[7, 6, 0, 0, 0]]);
        let selector = PivotSelector::default();

        assert_eq!(
            selector.select(&t, &[2, 3], Direction::Maximize),
            Selection::Pivot(PivotCell::new(1, 0))
        );
    }

    #[test]
    fn minimize_takes_most_negative_coefficient() {
        let t = tableau(&[&[1, 1, 1, 0, 2], &[1, 2, 0, 1, 5], &[-1, -3, 0, 0, -5]]);

        assert_eq!(
            PivotSelector::default().select(&t, &[2, 3], Direction::Minimize),
            Selection::Pivot(PivotCell::new(0, 1))
        );
    }

    #[test]
    fn entering_ties_go_to_the_lowest_column() {
        let t = tableau(&[&[1, 1, 1, 0, 4], &[1, 1, 0, 1, 6], &[5, 5, 0, 0, 0]]);

        assert_eq!(
            PivotSelector::default().entering_column(&t, Direction::Maximize),
            Some(0)
        );
    }

    #[test]
    fn ratio_ties_go_to_the_first_row_under_dantzig() {
        // both rows allow x1 = 2
        let t = tableau(&[&[1, 0, 1, 2], &[2, 1, 0, 4], &[1, 0, 0, 0]]);

        assert_eq!(
            PivotSelector::new(PivotRule::Dantzig).leaving_row(&t, &[2, 1], 0),
            Some(0)
        );
    }

    #[test]
    fn ratio_ties_go_to_the_lowest_basic_variable_under_bland() {
        let t = tableau(&[&[1, 0, 1, 2], &[2, 1, 0, 4], &[1, 0, 0, 0]]);

        assert_eq!(
            PivotSelector::new(PivotRule::Bland).leaving_row(&t, &[2, 1], 0),
            Some(1)
        );
    }

    #[test]
    fn bland_takes_the_first_improving_column() {
        let t = tableau(&[&[1, 1, 1, 0, 4], &[1, 3, 0, 1, 6], &[1, 9, 0, 0, 0]]);

        assert_eq!(
            PivotSelector::new(PivotRule::Bland).select(&t, &[2, 3], Direction::Maximize),
            Selection::Pivot(PivotCell::new(0, 0))
        );
    }

    #[test]
    fn no_improving_column_is_optimal() {
        let t = tableau(&[&[1, 1, 1, 0, 4], &[1, 3, 0, 1, 6], &[-1, 0, 0, 0, -3]]);

        assert_eq!(
            PivotSelector::default().select(&t, &[2, 3], Direction::Maximize),
            Selection::Optimal
        );
        assert_eq!(
            PivotSelector::default().select(&t, &[2, 3], Direction::Minimize),
            Selection::Pivot(PivotCell::new(0, 0))
        );
    }

    #[test]
    fn improving_column_without_positive_entries_is_unbounded() {
        let t = tableau(&[&[1, -1, 1, 1], &[0, 1, 0, 0]]);

        assert_eq!(
            PivotSelector::default().select(&t, &[2], Direction::Maximize),
            Selection::Unbounded { column: 1 }
        );
    }

    #[test]
    fn zero_coefficients_do_not_bound_the_ratio_test() {
        let t = tableau(&[&[0, 1, 0, 5], &[3, 0, 1, 9], &[2, 0, 0, 0]]);

        assert_eq!(PivotSelector::default().leaving_row(&t, &[1, 2], 0), Some(1));
    }

    proptest! {
        #[test]
        fn optimal_signal_is_idempotent(
            costs in prop::collection::vec(-5i64..=0, 3),
            rhs in prop::collection::vec(0i64..=9, 2),
        ) {
            let t = tableau(&[
                &[1, 2, 1, 1, 0, rhs[0]],
                &[3, 1, 0, 0, 1, rhs[1]],
                &[costs[0], costs[1], costs[2], 0, 0, 0],
            ]);
            let selector = PivotSelector::default();

            prop_assert_eq!(selector.select(&t, &[3, 4], Direction::Maximize), Selection::Optimal);
            prop_assert_eq!(selector.select(&t, &[3, 4], Direction::Maximize), Selection::Optimal);
        }

        #[test]
        fn ratio_test_keeps_rhs_non_negative(
            cells in prop::collection::vec(-4i64..=6, 6),
            rhs in prop::collection::vec(0i64..=12, 2),
            costs in prop::collection::vec(-3i64..=5, 3),
        ) {
            let mut t = tableau(&[
                &[cells[0], cells[1], cells[2], 1, 0, rhs[0]],
                &[cells[3], cells[4], cells[5], 0, 1, rhs[1]],
                &[costs[0], costs[1], costs[2], 0, 0, 0],
            ]);
            let mut basis = vec![3, 4];
            let selector = PivotSelector::default();

            for _ in 0..8 {
                let Selection::Pivot(cell) = selector.select(&t, &basis, Direction::Maximize) else {
                    break;
                };
                pivot(&mut t, cell).unwrap();
                basis[cell.row] = cell.column;
                for row in 0..t.n_constraints() {
                    prop_assert!(!t.rhs(row).is_negative());
                }
            }
        }
    }
}
