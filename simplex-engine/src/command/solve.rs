use std::collections::BTreeMap;

use derive_more::{Display, Error, From};
use ratio_extension::ExactRatio;
use serde::{Deserialize, Serialize};

use crate::{
    ensure_eq,
    simplex::{
        Direction, Objective, Problem, ProblemError, Report, Role, SimplexError, SolverConfig,
        Variable,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Serialized problem description: the full tableau (last row is the objective row, last column
/// the right-hand side), the variable of every column, the initial basis and the real objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSpec {
    pub variables: Vec<VariableSpec>,
    pub rows: Vec<Vec<ExactRatio>>,
    pub basis: Vec<String>,
    #[serde(default)]
    pub objective: BTreeMap<String, ExactRatio>,
    #[serde(default)]
    pub direction: Direction,
}

impl ProblemSpec {
    pub fn from_json(json: &str) -> Result<Self, CommandError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Display, Error, From)]
pub enum CommandError {
    #[display(fmt = "malformed problem: {}", _0)]
    Shape(#[error(not(source))] String),
    #[display(fmt = "cannot read problem: {}", _0)]
    Json(serde_json::Error),
    #[display(fmt = "invalid problem: {}", _0)]
    Problem(ProblemError),
    #[display(fmt = "solver failed: {}", _0)]
    Simplex(SimplexError),
}

/// Checks the shape of `spec` and turns it into a validated [`Problem`].
pub fn build(spec: ProblemSpec) -> Result<Problem, CommandError> {
    let ProblemSpec {
        variables,
        rows,
        basis,
        objective,
        direction,
    } = spec;
    log::info!(
        "Received problem: {} variables, {} rows, basis [{}]",
        variables.len(),
        rows.len(),
        basis.join(", ")
    );

    let width = variables.len() + 1;
    ensure_eq!(rows.len(), basis.len() + 1);
    for row in &rows {
        ensure_eq!(row.len(), width);
    }
    log::info!("Shape assertions passed");

    let problem = Problem::from_tableau(
        rows.into_iter()
            .map(|row| row.into_iter().map(ExactRatio::into_inner).collect())
            .collect(),
        variables
            .into_iter()
            .map(|VariableSpec { name, role }| Variable::new(name, role))
            .collect(),
        basis,
        Objective::new(direction).with_terms(
            objective
                .into_iter()
                .map(|(name, coefficient)| (name, coefficient.into_inner())),
        ),
    )?;
    log::info!("Problem formed: {problem}");

    Ok(problem)
}

pub fn solve(spec: ProblemSpec, config: SolverConfig) -> Result<Report, CommandError> {
    let report = build(spec)?.solve_with(config)?;
    log::info!("{}:\n{}", report.status(), report.solution().as_str());
    Ok(report)
}
