use derive_more::{Display, IsVariant};
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::dbg_display;

use super::{
    pivot, problem::artificial_columns, Assignment, Direction, Objective, PivotCell, PivotRule,
    PivotSelector, Problem, Report, Selection, SimplexError, Snapshot, Solution, Step, Tableau,
    Trace, Variable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum Phase {
    #[display(fmt = "Phase 1")]
    One,
    #[display(fmt = "Phase 2")]
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant)]
pub enum State {
    Init,
    Phase1Running,
    /// Terminal: the minimized artificial sum stayed positive.
    Phase1Infeasible,
    Transition,
    Phase2Running,
    /// Terminal.
    Optimal,
    /// Terminal.
    Unbounded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Pivots allowed over both phases before the run fails with [`SimplexError::Stalled`].
    pub max_iterations: usize,
    pub pivot_rule: PivotRule,
    pub record_trace: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            pivot_rule: PivotRule::default(),
            record_trace: true,
        }
    }
}

impl SolverConfig {
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_pivot_rule(mut self, rule: PivotRule) -> Self {
        self.pivot_rule = rule;
        self
    }

    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }
}

/// How a phase stopped.
enum Converged {
    Optimal,
    Unbounded { column: usize },
}

/// Two-phase simplex over one exclusively owned tableau.
#[derive(Debug, Clone)]
pub struct TwoPhaseSimplex {
    tableau: Tableau,
    variables: Vec<Variable>,
    /// Column index of the basic variable of each constraint row
    basis: Vec<usize>,
    objective: Objective,
    config: SolverConfig,
    selector: PivotSelector,
    state: State,
    iterations: usize,
    trace: Trace,
}

impl TwoPhaseSimplex {
    pub fn new(problem: Problem, config: SolverConfig) -> Self {
        let Problem {
            tableau,
            variables,
            basis,
            objective,
        } = problem;
        Self {
            tableau,
            variables,
            basis,
            objective,
            selector: PivotSelector::new(config.pivot_rule),
            config,
            state: State::Init,
            iterations: 0,
            trace: Trace::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn basis_names(&self) -> Vec<&str> {
        self.basis
            .iter()
            .map(|&column| self.variables[column].name())
            .collect()
    }

    pub fn solve(mut self) -> Result<Report, SimplexError> {
        log::info!(
            "Solving {} constraints over {} variables",
            self.tableau.n_constraints(),
            self.tableau.n_variables()
        );
        let artificial = artificial_columns(&self.variables);

        if !artificial.is_empty() {
            let phase_one_row = (0..self.tableau.n_variables())
                .map(|column| {
                    if artificial.contains(&column) {
                        BigRational::one()
                    } else {
                        BigRational::zero()
                    }
                })
                .collect();
            self.tableau.set_objective_row(phase_one_row);
        }
        self.restore_basis()?;
        self.record(Step::Start);

        if artificial.is_empty() {
            log::info!("No artificial variables, skipping phase 1");
        } else {
            self.enter(State::Phase1Running);
            if let Converged::Unbounded { column } = self.run_phase(Phase::One, Direction::Minimize)? {
                log::warn!(
                    "Phase 1 reported column {} unbounded, the input is not in standard form",
                    self.variables[column]
                );
                self.enter(State::Unbounded);
                return Ok(self.into_report(Solution::Infinite, None));
            }

            if !self.tableau.objective_rhs().is_zero() {
                let artificial_sum = dbg_display!(self.tableau.objective_value());
                log::info!("Artificial sum stays at {artificial_sum}, no feasible solution");
                self.enter(State::Phase1Infeasible);
                return Ok(self.into_report(Solution::Absent, Some(artificial_sum)));
            }
        }

        self.enter(State::Transition);
        self.transition(&artificial)?;

        self.enter(State::Phase2Running);
        let direction = self.objective.direction();
        match self.run_phase(Phase::Two, direction)? {
            Converged::Optimal => {
                self.enter(State::Optimal);
                let solution = Solution::Finite {
                    variables: self.assignment(),
                    function_value: self.tableau.objective_value(),
                };
                log::info!("Optimal solution was found:\n{}", solution.as_str());
                Ok(self.into_report(solution, None))
            }
            Converged::Unbounded { column } => {
                log::info!("{} can grow without bound", self.variables[column]);
                self.enter(State::Unbounded);
                Ok(self.into_report(Solution::Infinite, None))
            }
        }
    }

    fn enter(&mut self, state: State) {
        log::info!("{} -> {}", self.state, state);
        self.state = state;
    }

    fn run_phase(&mut self, phase: Phase, direction: Direction) -> Result<Converged, SimplexError> {
        log::info!("{phase}: {direction}");
        loop {
            log::debug!("Tableau:{}", self.tableau);
            match self.selector.select(&self.tableau, &self.basis, direction) {
                Selection::Optimal => return Ok(Converged::Optimal),
                Selection::Unbounded { column } => return Ok(Converged::Unbounded { column }),
                Selection::Pivot(cell) => {
                    if self.iterations >= self.config.max_iterations {
                        log::error!("{phase} stalled after {} iterations", self.iterations);
                        return Err(SimplexError::Stalled {
                            phase,
                            iterations: self.iterations,
                        });
                    }
                    self.iterations += 1;
                    log::info!("Iteration: {}", self.iterations);

                    let leaving = self.basis[cell.row];
                    pivot(&mut self.tableau, cell)?;
                    self.basis[cell.row] = cell.column;
                    self.record(Step::Pivot {
                        phase,
                        cell,
                        entering: self.variables[cell.column].name().to_owned(),
                        leaving: self.variables[leaving].name().to_owned(),
                    });
                }
            }
        }
    }

    /// Pivots every basic variable into its own row, in basis order, so that the basis columns
    /// form an identity with the current objective row.
    fn restore_basis(&mut self) -> Result<(), SimplexError> {
        for row in 0..self.basis.len() {
            pivot(&mut self.tableau, PivotCell::new(row, self.basis[row]))?;
        }
        Ok(())
    }

    /// Drops the artificial columns and installs the real objective row.
    fn transition(&mut self, artificial: &[usize]) -> Result<(), SimplexError> {
        if !artificial.is_empty() {
            self.drive_out_artificials(artificial)?;

            self.tableau.remove_columns(artificial);
            self.variables = std::mem::take(&mut self.variables)
                .into_iter()
                .enumerate()
                .filter_map(|(column, variable)| (!artificial.contains(&column)).then_some(variable))
                .collect();
            for column in self.basis.iter_mut() {
                *column -= artificial.iter().filter(|&&a| a < *column).count();
            }
        }

        let objective_row = self
            .variables
            .iter()
            .map(|variable| {
                self.objective
                    .coefficient(variable.name())
                    .cloned()
                    .unwrap_or_else(BigRational::zero)
            })
            .collect();
        self.tableau.set_objective_row(objective_row);
        log::info!("Phase 2 objective: {}", self.objective);

        self.restore_basis()?;
        self.record(Step::Phase2Start);
        Ok(())
    }

    /// Artificial variables still basic after a feasible Phase 1 sit at zero. Each is replaced by
    /// the first non-artificial column with a nonzero entry in its row; a row without one is a
    /// linear combination of the others and is removed.
    fn drive_out_artificials(&mut self, artificial: &[usize]) -> Result<(), SimplexError> {
        let mut row = 0;
        while row < self.basis.len() {
            let basic = self.basis[row];
            if !artificial.contains(&basic) {
                row += 1;
                continue;
            }

            let replacement = (0..self.tableau.n_variables())
                .filter(|column| !artificial.contains(column))
                .find(|&column| !self.tableau.get(row, column).is_zero());
            match replacement {
                Some(column) => {
                    log::warn!(
                        "Artificial {} is basic at zero, replacing it with {}",
                        self.variables[basic],
                        self.variables[column]
                    );
                    let cell = PivotCell::new(row, column);
                    pivot(&mut self.tableau, cell)?;
                    self.basis[row] = column;
                    self.record(Step::DriveOut {
                        cell,
                        entering: self.variables[column].name().to_owned(),
                        leaving: self.variables[basic].name().to_owned(),
                    });
                    row += 1;
                }
                None => {
                    log::warn!(
                        "Row {row} of artificial {} is redundant, removing it",
                        self.variables[basic]
                    );
                    self.tableau.remove_constraint_row(row);
                    self.basis.remove(row);
                    self.record(Step::DropRedundantRow {
                        row,
                        artificial: self.variables[basic].name().to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Basic variables take their row's RHS, the others are zero.
    fn assignment(&self) -> Assignment {
        Assignment::new(
            self.variables
                .iter()
                .enumerate()
                .map(|(column, variable)| {
                    let value = self
                        .basis
                        .iter()
                        .position(|&basic| basic == column)
                        .map_or_else(BigRational::zero, |row| self.tableau.rhs(row).to_owned());
                    (variable.clone(), value)
                })
                .collect(),
        )
    }

    fn record(&mut self, step: Step) {
        log::debug!("{step}");
        if !self.config.record_trace {
            return;
        }
        let snapshot = Snapshot::new(
            step,
            self.variables.iter().map(|v| v.name().to_owned()).collect(),
            self.basis_names().into_iter().map(str::to_owned).collect(),
            self.tableau.clone(),
        );
        self.trace.push(snapshot);
    }

    fn into_report(self, solution: Solution, artificial_sum: Option<BigRational>) -> Report {
        Report {
            solution,
            state: self.state,
            iterations: self.iterations,
            artificial_sum,
            trace: self.trace,
        }
    }
}
