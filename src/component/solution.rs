use std::fmt;

use num_traits::{One, Signed};
use simplex_engine::simplex::{Report, Solution as Outcome};

use super::Rational;

/// Outcome of a run: status, iteration count, and either the assignment with the objective value
/// or the diagnostics of an infeasible problem.
#[derive(Debug, Clone, Copy)]
pub struct Solution<'a> {
    pub report: &'a Report,
}

impl<'a> Solution<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "Status: {}", report.status())?;
        writeln!(f, "Iterations: {}", report.iterations())?;

        match report.solution() {
            Outcome::Finite {
                variables,
                function_value,
            } => {
                let width = variables
                    .iter()
                    .map(|(variable, _)| variable.name().len())
                    .max()
                    .unwrap_or(0);
                for (variable, value) in variables.iter() {
                    write!(f, "{:<width$} = {}", variable.name(), Rational::new(value))?;
                    if !value.is_integer() && value.abs() > One::one() {
                        write!(f, " ({})", Rational::mixed(value))?;
                    }
                    writeln!(f)?;
                }
                writeln!(f, "F = {}", Rational::new(function_value))
            }
            Outcome::Infinite => writeln!(f, "The objective function is unbounded"),
            Outcome::Absent => {
                writeln!(f, "No feasible solution")?;
                match report.artificial_sum() {
                    Some(sum) => writeln!(f, "Artificial sum: {}", Rational::new(sum)),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use simplex_engine::simplex::Problem;

    use super::*;

    #[test]
    fn optimal_with_fractions() {
        let report = Problem::builder()
            .decision("x1")
            .decision("x2")
            .surplus("E1")
            .slack("E2")
            .artificial("a1")
            .row([2, -1, -1, 0, 1], 15)
            .row([1, 1, 0, 0, 0], 10)
            .row([2, -1, 0, 1, 0], 20)
            .basis(["a1", "x2", "E2"])
            .minimize([("x1", 4), ("x2", 3)])
            .build()
            .unwrap()
            .solve()
            .unwrap();

        let text = Solution::new(&report).to_string();
        assert!(text.starts_with("Status: OPTIMAL\n"), "{text}");
        assert!(text.contains("x1 = 25/3 (8 1/3)\n"), "{text}");
        assert!(text.contains("x2 = 5/3 (1 2/3)\n"), "{text}");
        assert!(text.contains("E1 = 0\n"), "{text}");
        assert!(text.ends_with("F = 115/3\n"), "{text}");
    }

    #[test]
    fn infeasible_reports_artificial_sum() {
        let report = Problem::builder()
            .decision("x1")
            .decision("x2")
            .slack("E1")
            .surplus("E2")
            .artificial("a1")
            .row([1, 1, 1, 0, 0], 2)
            .row([1, 1, 0, -1, 1], 5)
            .basis(["E1", "a1"])
            .maximize([("x1", 1), ("x2", 1)])
            .build()
            .unwrap()
            .solve()
            .unwrap();

        assert_eq!(
            Solution::new(&report).to_string(),
            "Status: INFEASIBLE\nIterations: 1\nNo feasible solution\nArtificial sum: 3\n"
        );
    }

    #[test]
    fn unbounded() {
        let report = Problem::builder()
            .decision("x1")
            .decision("x2")
            .slack("E1")
            .row([1, -1, 1], 1)
            .basis(["E1"])
            .maximize([("x2", 1)])
            .build()
            .unwrap()
            .solve()
            .unwrap();

        assert_eq!(
            Solution::new(&report).to_string(),
            "Status: UNBOUNDED\nIterations: 0\nThe objective function is unbounded\n"
        );
    }
}
