use thiserror::Error;

// Row activities are compared against their right-hand side with a small,
// magnitude-relative slack so that sums of prices like 0.1 + 0.2 do not
// spuriously exceed a budget of 0.3.
const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// The sense of a linear constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Σ aᵢxᵢ ≤ b
    LessEq,
    /// Σ aᵢxᵢ = b
    Eq,
    /// Σ aᵢxᵢ ≥ b
    GreaterEq,
}

/// A linear constraint over the binary decision variables of a program.
///
/// Terms are sparse `(variable index, coefficient)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    terms: Vec<(usize, f64)>,
    relation: Relation,
    rhs: f64,
}

impl Constraint {
    /// Σ terms ≤ rhs
    pub fn leq<I: IntoIterator<Item = (usize, f64)>>(terms: I, rhs: f64) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            relation: Relation::LessEq,
            rhs,
        }
    }

    /// Σ terms = rhs
    pub fn eq<I: IntoIterator<Item = (usize, f64)>>(terms: I, rhs: f64) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            relation: Relation::Eq,
            rhs,
        }
    }

    /// Σ terms ≥ rhs
    pub fn geq<I: IntoIterator<Item = (usize, f64)>>(terms: I, rhs: f64) -> Self {
        Self {
            terms: terms.into_iter().collect(),
            relation: Relation::GreaterEq,
            rhs,
        }
    }

    /// The sparse coefficients
    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    /// The constraint sense
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The right-hand side
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// The left-hand side evaluated at a 0/1 assignment
    pub fn activity(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(idx, _)| values[*idx])
            .map(|(_, coef)| coef)
            .sum()
    }

    /// Whether the 0/1 assignment satisfies this constraint
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        self.is_satisfied_by(self.activity(values))
    }

    /// Whether a given activity level satisfies this constraint
    pub fn is_satisfied_by(&self, activity: f64) -> bool {
        match self.relation {
            Relation::LessEq => self.within_bound(activity),
            Relation::Eq => (activity - self.rhs).abs() <= self.slack(),
            Relation::GreaterEq => activity >= self.rhs - self.slack(),
        }
    }

    /// Whether an activity level does not exceed the right-hand side.
    ///
    /// A `≥` row has no upper bound, so any activity is within it.
    pub fn within_bound(&self, activity: f64) -> bool {
        self.relation == Relation::GreaterEq || activity <= self.rhs + self.slack()
    }

    fn slack(&self) -> f64 {
        FEASIBILITY_TOLERANCE * self.rhs.abs().max(1.0)
    }
}

/// A maximization problem over binary decision variables.
///
/// maximize Σ cᵢxᵢ subject to the linear constraints, with xᵢ ∈ {0, 1}.
/// This is the whole of what a solver needs to know; what the variables mean
/// stays with whoever built the program.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryProgram {
    objective: Vec<f64>,
    constraints: Vec<Constraint>,
}

impl BinaryProgram {
    /// Create an unconstrained program with one variable per objective coefficient
    pub fn new(objective: Vec<f64>) -> Result<Self, ProgramError> {
        if let Some(idx) = objective.iter().position(|c| !c.is_finite()) {
            return Err(ProgramError::NonFiniteObjective(idx));
        }
        Ok(Self {
            objective,
            constraints: Vec::new(),
        })
    }

    /// Append a constraint, checking it refers only to existing variables
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<(), ProgramError> {
        let row = self.constraints.len();
        if !constraint.rhs.is_finite() {
            return Err(ProgramError::NonFiniteConstraint(row));
        }
        for &(idx, coef) in constraint.terms.iter() {
            if idx >= self.objective.len() {
                return Err(ProgramError::UnknownVariable { row, variable: idx });
            }
            if !coef.is_finite() {
                return Err(ProgramError::NonFiniteConstraint(row));
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// The number of decision variables
    pub fn len(&self) -> usize {
        self.objective.len()
    }

    /// Whether the program has no decision variables
    pub fn is_empty(&self) -> bool {
        self.objective.is_empty()
    }

    /// The objective coefficients, indexed by variable
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// The constraints, in insertion order
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The objective value of a 0/1 assignment
    pub fn evaluate(&self, values: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .filter(|(_, selected)| **selected)
            .map(|(coef, _)| coef)
            .sum()
    }

    /// Whether a 0/1 assignment satisfies every constraint
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.len()
            && self
                .constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(values))
    }
}

/// The ways a program can be malformed
#[derive(Debug, Error, PartialEq)]
pub enum ProgramError {
    /// An objective coefficient is NaN or infinite
    #[error("objective coefficient {0} is not finite")]
    NonFiniteObjective(usize),
    /// A constraint coefficient or right-hand side is NaN or infinite
    #[error("constraint {0} has a non-finite coefficient or bound")]
    NonFiniteConstraint(usize),
    /// A constraint references a variable past the end of the objective
    #[error("constraint {row} references unknown variable {variable}")]
    UnknownVariable {
        /// The offending constraint
        row: usize,
        /// The out-of-range variable index
        variable: usize,
    },
}

/// A 0/1 assignment returned by a solver, with its objective value
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    values: Vec<bool>,
    objective: f64,
}

impl Selection {
    /// Record an assignment for `program`, computing its objective value
    pub fn new(program: &BinaryProgram, values: Vec<bool>) -> Self {
        let objective = program.evaluate(&values);
        Self { values, objective }
    }

    /// Whether variable `idx` is set to 1
    pub fn is_selected(&self, idx: usize) -> bool {
        self.values.get(idx).copied().unwrap_or(false)
    }

    /// The indices of the variables set to 1, ascending
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, &value)| value.then_some(idx))
    }

    /// The raw assignment, indexed by variable
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// The objective value of the assignment
    pub fn objective(&self) -> f64 {
        self.objective
    }
}
