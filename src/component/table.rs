use std::fmt;

use simplex_engine::simplex::Snapshot;

use super::Rational;

/// Tableau of one snapshot, with variable names over the columns and the basic variable of every
/// constraint row on the left. The objective row is labelled `F`.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    pub snapshot: &'a Snapshot,
}

impl<'a> Table<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    fn cells(&self) -> Vec<Vec<String>> {
        let snapshot = self.snapshot;
        let tableau = snapshot.tableau();

        let mut header = vec!["Basis".to_owned()];
        header.extend(snapshot.variables().iter().cloned());
        header.push("RHS".to_owned());

        let mut rows = vec![header];
        rows.extend(tableau.rows().iter().enumerate().map(|(i, row)| {
            let label = snapshot
                .basis()
                .get(i)
                .cloned()
                .unwrap_or_else(|| "F".to_owned());
            std::iter::once(label)
                .chain(row.iter().map(|el| Rational::new(el).to_string()))
                .collect()
        }));
        rows
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.cells();
        let widths = (0..cells[0].len())
            .map(|column| cells.iter().map(|row| row[column].len()).max().unwrap_or(0))
            .collect::<Vec<_>>();

        writeln!(f, "{}", self.snapshot.step())?;
        for row in &cells {
            let line = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(column, (cell, &width))| {
                    if column == 0 {
                        format!("{cell:<width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use simplex_engine::simplex::Problem;

    use super::*;

    #[test]
    fn renders_header_and_basis_labels() {
        let report = Problem::builder()
            .decision("x1")
            .decision("x2")
            .slack("E1")
            .slack("E2")
            .row([2, 4, 1, 0], 16)
            .row([3, 2, 0, 1], 12)
            .basis(["E1", "E2"])
            .maximize([("x1", 7), ("x2", 6)])
            .build()
            .unwrap()
            .solve()
            .unwrap();

        let last = report.trace().last().unwrap();
        assert_eq!(
            Table::new(last).to_string(),
            "Phase 2: x2 enters, E1 leaves at (0, 1)\n\
             Basis | x1 | x2 |   E1 |   E2 | RHS\n\
             x2    |  0 |  1 |  3/8 | -1/4 |   3\n\
             x1    |  1 |  0 | -1/4 |  1/2 |   2\n\
             F     |  0 |  0 | -1/2 |   -2 | -32\n"
        );
    }
}
