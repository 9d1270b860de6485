use derive_more::{Display, IsVariant};
use derive_new::new;

use super::{Phase, PivotCell, Tableau};

/// What produced a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Display, IsVariant)]
pub enum Step {
    /// Tableau after every declared basic variable was pivoted into its row.
    #[display(fmt = "initial basis")]
    Start,
    #[display(fmt = "{}: {} enters, {} leaves at {}", phase, entering, leaving, cell)]
    Pivot {
        phase: Phase,
        cell: PivotCell,
        entering: String,
        leaving: String,
    },
    /// Degenerate pivot that replaces an artificial variable left in the basis at value zero.
    #[display(fmt = "{} replaces artificial {} at {}", entering, leaving, cell)]
    DriveOut {
        cell: PivotCell,
        entering: String,
        leaving: String,
    },
    #[display(fmt = "row {} of artificial {} is redundant and was removed", row, artificial)]
    DropRedundantRow { row: usize, artificial: String },
    /// Artificial columns dropped and the real objective row installed.
    #[display(fmt = "phase 2 objective")]
    Phase2Start,
}

/// Immutable picture of the tableau after one step.
#[derive(Debug, Clone, PartialEq, new)]
pub struct Snapshot {
    step: Step,
    variables: Vec<String>,
    basis: Vec<String>,
    tableau: Tableau,
}

impl Snapshot {
    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Column headers, in column order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Basic variable of each constraint row.
    pub fn basis(&self) -> &[String] {
        &self.basis
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }
}

/// Ordered record of a run, for reporting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    snapshots: Vec<Snapshot>,
}

impl Trace {
    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.snapshots.iter().map(Snapshot::step)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
