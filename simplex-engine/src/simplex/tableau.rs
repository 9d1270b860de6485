use std::fmt;

use nalgebra::DMatrix;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::ProblemError;

/// Dense simplex tableau.
///
/// The first `n_constraints()` rows are constraint rows, the last row is the objective row.
/// The first `n_variables()` columns belong to variables, the last column is the right-hand side.
///
/// The objective row stores the objective coefficients as given, so after pivoting it holds the
/// reduced costs, and its right-hand side holds the negated objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    matrix: DMatrix<BigRational>,
}

impl Tableau {
    pub fn from_rows(rows: Vec<Vec<BigRational>>) -> Result<Self, ProblemError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        if nrows < 2 {
            return Err(ProblemError::NoConstraints);
        }
        if ncols < 2 {
            return Err(ProblemError::NoVariables);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != ncols)
        {
            return Err(ProblemError::RaggedRow {
                row,
                expected: ncols,
                found,
            });
        }

        Ok(Self {
            matrix: DMatrix::from_row_iterator(nrows, ncols, rows.into_iter().flatten()),
        })
    }

    pub fn n_constraints(&self) -> usize {
        self.matrix.nrows() - 1
    }

    pub fn n_variables(&self) -> usize {
        self.matrix.ncols() - 1
    }

    pub fn objective_row_index(&self) -> usize {
        self.matrix.nrows() - 1
    }

    pub fn rhs_column_index(&self) -> usize {
        self.matrix.ncols() - 1
    }

    pub fn get(&self, row: usize, column: usize) -> &BigRational {
        &self.matrix[(row, column)]
    }

    pub fn rhs(&self, row: usize) -> &BigRational {
        &self.matrix[(row, self.rhs_column_index())]
    }

    /// Objective row entries of the variable columns, paired with their column index.
    pub fn reduced_costs(&self) -> impl Iterator<Item = (usize, &BigRational)> + '_ {
        let row = self.objective_row_index();
        (0..self.n_variables()).map(move |column| (column, &self.matrix[(row, column)]))
    }

    pub fn objective_rhs(&self) -> &BigRational {
        &self.matrix[(self.objective_row_index(), self.rhs_column_index())]
    }

    /// Current objective value, `-(objective row RHS)`.
    pub fn objective_value(&self) -> BigRational {
        -self.objective_rhs().to_owned()
    }

    pub fn row(&self, row: usize) -> Vec<BigRational> {
        self.matrix.row(row).iter().cloned().collect()
    }

    pub fn rows(&self) -> Vec<Vec<BigRational>> {
        (0..self.matrix.nrows()).map(|row| self.row(row)).collect()
    }

    /// Whether `column` is the unit vector with its 1 in `row`, objective row included.
    pub fn is_unit_column(&self, column: usize, row: usize) -> bool {
        self.matrix.column(column).iter().enumerate().all(|(i, el)| {
            if i == row {
                el.is_one()
            } else {
                el.is_zero()
            }
        })
    }

    pub(crate) fn matrix_mut(&mut self) -> &mut DMatrix<BigRational> {
        &mut self.matrix
    }

    /// Replaces the objective row with `coefficients` (one per variable column) and a zero RHS.
    pub(crate) fn set_objective_row(&mut self, coefficients: Vec<BigRational>) {
        debug_assert_eq!(coefficients.len(), self.n_variables());
        let row = self.objective_row_index();
        let rhs = self.rhs_column_index();
        for (column, coefficient) in coefficients.into_iter().enumerate() {
            self.matrix[(row, column)] = coefficient;
        }
        self.matrix[(row, rhs)] = Zero::zero();
    }

    /// Drops the given variable columns. The RHS column is always kept.
    pub(crate) fn remove_columns(&mut self, columns: &[usize]) {
        let kept = (0..self.matrix.ncols())
            .filter(|column| !columns.contains(column))
            .collect::<Vec<_>>();
        self.matrix = DMatrix::from_fn(self.matrix.nrows(), kept.len(), |row, column| {
            self.matrix[(row, kept[column])].to_owned()
        });
    }

    pub(crate) fn remove_constraint_row(&mut self, removed: usize) {
        debug_assert!(removed < self.n_constraints());
        let kept = (0..self.matrix.nrows())
            .filter(|row| *row != removed)
            .collect::<Vec<_>>();
        self.matrix = DMatrix::from_fn(kept.len(), self.matrix.ncols(), |row, column| {
            self.matrix[(kept[row], column)].to_owned()
        });
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratio_extension::IntoRatio;

    use super::*;

    fn rows(data: &[&[i64]]) -> Vec<Vec<BigRational>> {
        data.iter()
            .map(|row| row.iter().map(|&el| el.into_ratio()).collect())
            .collect()
    }

    #[test]
    fn layout_of_constraint_and_objective_rows() {
        let tableau =
            Tableau::from_rows(rows(&[&[2, 4, 1, 0, 16], &[3, 2, 0, 1, 12], &[7, 6, 0, 0, 0]]))
                .unwrap();

        assert_eq!(tableau.n_constraints(), 2);
        assert_eq!(tableau.n_variables(), 4);
        assert_eq!(tableau.rhs(1), &12i64.into_ratio());
        assert_eq!(
            tableau.reduced_costs().map(|(_, c)| c.clone()).collect::<Vec<_>>(),
            rows(&[&[7, 6, 0, 0]]).remove(0)
        );
        assert!(tableau.is_unit_column(2, 0));
        assert!(!tableau.is_unit_column(0, 0));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            Tableau::from_rows(rows(&[&[1, 0, 1], &[1, 1], &[0, 0, 0]])),
            Err(ProblemError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Tableau::from_rows(rows(&[&[0, 0, 0]])),
            Err(ProblemError::NoConstraints)
        );
    }

    #[test]
    fn objective_value_is_negated_rhs() {
        let mut tableau = Tableau::from_rows(rows(&[&[1, 1, 4], &[0, 5, -32]])).unwrap();
        assert_eq!(tableau.objective_value(), 32i64.into_ratio());

        tableau.set_objective_row(vec![3i64.into_ratio(), 1i64.into_ratio()]);
        assert_eq!(tableau.row(1), rows(&[&[3, 1, 0]]).remove(0));
    }

    #[test]
    fn remove_columns_and_rows() {
        let mut tableau = Tableau::from_rows(rows(&[
            &[1, 2, 3, 4, 10],
            &[5, 6, 7, 8, 20],
            &[9, 10, 11, 12, 30],
        ]))
        .unwrap();

        tableau.remove_columns(&[1, 3]);
        assert_eq!(
            tableau.rows(),
            rows(&[&[1, 3, 10], &[5, 7, 20], &[9, 11, 30]])
        );

        tableau.remove_constraint_row(0);
        assert_eq!(tableau.rows(), rows(&[&[5, 7, 20], &[9, 11, 30]]));
        assert_eq!(tableau.n_constraints(), 1);
    }
}
