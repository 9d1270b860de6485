use derive_more::Display;
use derive_new::new;
use num_traits::Zero;

use super::{SimplexError, Tableau};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, new)]
#[display(fmt = "({}, {})", row, column)]
pub struct PivotCell {
    pub row: usize,
    pub column: usize,
}

/// Gauss-Jordan elimination around `cell`.
///
/// Afterwards the pivot column is the unit vector with its 1 in the pivot row, objective row
/// included. Keeping the basis in sync is the caller's job.
pub fn pivot(tableau: &mut Tableau, cell: PivotCell) -> Result<(), SimplexError> {
    let PivotCell {
        row: pivot_row,
        column: pivot_col,
    } = cell;
    if pivot_row >= tableau.n_constraints() || pivot_col >= tableau.n_variables() {
        return Err(SimplexError::InvalidPivot {
            cell,
            reason: "outside the constraint block",
        });
    }

    let pivot_el = tableau.get(pivot_row, pivot_col).to_owned();
    if pivot_el.is_zero() {
        return Err(SimplexError::InvalidPivot {
            cell,
            reason: "pivot element is zero",
        });
    }
    log::debug!("Pivot element at {cell}: {pivot_el}");

    let matrix = tableau.matrix_mut();

    // divide all elements in the pivot row by the pivot element
    matrix
        .row_mut(pivot_row)
        .apply(|el| *el = &*el / &pivot_el);

    // subtract the pivot row from the other rows till every other element of the pivot column is zero
    let pivot_row_values = matrix.row(pivot_row).into_owned();
    for i in (0..matrix.nrows()).filter(|i| i != &pivot_row) {
        let multiplier = matrix[(i, pivot_col)].to_owned();
        if multiplier.is_zero() {
            continue;
        }
        matrix
            .row_mut(i)
            .zip_apply(&pivot_row_values, |tableau_row_el, pivot_row_el| {
                *tableau_row_el -= pivot_row_el * &multiplier
            });
    }

    Ok(())
}
