//! Validated problem instances for the four supported kinds.
//!
//! Every payload is checked once at construction, so strategy and verifier
//! code can index freely without re-validating.

use crate::error::EngineError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Default dimension count of the candidate space.
pub const DEFAULT_DIMENSIONS: usize = 11;

// ============================================================================
// ProblemKind
// ============================================================================

/// Problem kind tag. Cache keys and result consumers switch on this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// Closed tour through planar cities.
    Tour,
    /// Proper vertex coloring with a color budget.
    Coloring,
    /// Boolean clause satisfaction (CNF).
    Satisfaction,
    /// Subset whose sum hits a target.
    SubsetSelection,
}

impl ProblemKind {
    /// All kinds in a fixed order.
    pub const ALL: [Self; 4] = [
        Self::Tour,
        Self::Coloring,
        Self::Satisfaction,
        Self::SubsetSelection,
    ];

    /// Short lowercase name used by the CLI and in log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tour => "tour",
            Self::Coloring => "coloring",
            Self::Satisfaction => "sat",
            Self::SubsetSelection => "subset",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProblemKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tour" | "tsp" => Ok(Self::Tour),
            "coloring" | "colouring" | "graph" => Ok(Self::Coloring),
            "sat" | "satisfaction" => Ok(Self::Satisfaction),
            "subset" | "subset-sum" | "subset_selection" => Ok(Self::SubsetSelection),
            _ => Err(EngineError::UnsupportedKind(s.to_string())),
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// A city in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct City {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Tour payload: at least one city, all coordinates finite.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TourProblem {
    cities: Vec<City>,
}

impl TourProblem {
    /// Validates and wraps a city list.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInstance`] for an empty list or non-finite coordinates.
    pub fn new(cities: Vec<City>) -> Result<Self, EngineError> {
        if cities.is_empty() {
            return Err(EngineError::invalid("tour", "no cities"));
        }
        if let Some(i) = cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(EngineError::invalid(
                "tour",
                format!("city {i} has a non-finite coordinate"),
            ));
        }
        Ok(Self { cities })
    }

    /// The cities, in input order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }
}

/// Coloring payload: symmetric adjacency lists without self-loops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColoringProblem {
    adjacency: Vec<Vec<usize>>,
    max_colors: usize,
}

impl ColoringProblem {
    /// Validates adjacency lists and a color budget.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInstance`] if the graph is empty, the budget is zero,
    /// or the adjacency is out of range, self-looped, duplicated or asymmetric.
    pub fn new(adjacency: Vec<Vec<usize>>, max_colors: usize) -> Result<Self, EngineError> {
        let n = adjacency.len();
        if n == 0 {
            return Err(EngineError::invalid("coloring", "no nodes"));
        }
        if max_colors == 0 {
            return Err(EngineError::invalid("coloring", "color budget is zero"));
        }
        for (u, neighbors) in adjacency.iter().enumerate() {
            for (pos, &v) in neighbors.iter().enumerate() {
                if v >= n {
                    return Err(EngineError::invalid(
                        "coloring",
                        format!("node {u} lists out-of-range neighbor {v}"),
                    ));
                }
                if v == u {
                    return Err(EngineError::invalid("coloring", format!("self-loop at node {u}")));
                }
                if neighbors[..pos].contains(&v) {
                    return Err(EngineError::invalid(
                        "coloring",
                        format!("node {u} lists neighbor {v} twice"),
                    ));
                }
                if !adjacency[v].contains(&u) {
                    return Err(EngineError::invalid(
                        "coloring",
                        format!("adjacency is not symmetric at ({u},{v})"),
                    ));
                }
            }
        }
        Ok(Self {
            adjacency,
            max_colors,
        })
    }

    /// Builds adjacency lists from an undirected edge list on `n` nodes.
    ///
    /// # Errors
    /// Same conditions as [`ColoringProblem::new`].
    pub fn from_edges(
        n: usize,
        edges: &[(usize, usize)],
        max_colors: usize,
    ) -> Result<Self, EngineError> {
        let mut adjacency = vec![Vec::new(); n];
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(EngineError::invalid(
                    "coloring",
                    format!("edge ({u},{v}) is out of range for {n} nodes"),
                ));
            }
            if u != v && adjacency[u].contains(&v) {
                continue;
            }
            adjacency[u].push(v);
            if u != v {
                adjacency[v].push(u);
            }
        }
        Self::new(adjacency, max_colors)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of `node`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Color budget; valid colors are `0..max_colors`.
    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Each undirected edge once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, ns)| ns.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
    }
}

/// CNF payload with DIMACS-style literals (`+v` / `-v`, 1-based).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SatisfactionProblem {
    variables: usize,
    clauses: Vec<Vec<i32>>,
}

impl SatisfactionProblem {
    /// Validates a clause list over `variables` variables.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInstance`] for zero variables, an empty clause,
    /// a zero literal or a literal naming a variable past `variables`.
    pub fn new(variables: usize, clauses: Vec<Vec<i32>>) -> Result<Self, EngineError> {
        if variables == 0 {
            return Err(EngineError::invalid("sat", "no variables"));
        }
        for (c, clause) in clauses.iter().enumerate() {
            if clause.is_empty() {
                return Err(EngineError::invalid("sat", format!("clause {c} is empty")));
            }
            for &lit in clause {
                let var = lit.unsigned_abs() as usize;
                if var == 0 || var > variables {
                    return Err(EngineError::invalid(
                        "sat",
                        format!("clause {c} has literal {lit} outside 1..={variables}"),
                    ));
                }
            }
        }
        Ok(Self { variables, clauses })
    }

    /// Number of variables.
    pub fn variables(&self) -> usize {
        self.variables
    }

    /// The clauses.
    pub fn clauses(&self) -> &[Vec<i32>] {
        &self.clauses
    }
}

/// Subset-sum payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubsetProblem {
    numbers: Vec<u64>,
    target: u64,
}

impl SubsetProblem {
    /// Validates a number list and target.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidInstance`] for an empty list, or when the
    /// numbers sum past `u64::MAX`.
    pub fn new(numbers: Vec<u64>, target: u64) -> Result<Self, EngineError> {
        if numbers.is_empty() {
            return Err(EngineError::invalid("subset", "no numbers"));
        }
        if numbers.iter().try_fold(0u64, |acc, &x| acc.checked_add(x)).is_none() {
            return Err(EngineError::invalid("subset", "numbers overflow u64 when summed"));
        }
        Ok(Self { numbers, target })
    }

    /// The numbers.
    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    /// The target sum.
    pub fn target(&self) -> u64 {
        self.target
    }
}

// ============================================================================
// Instance
// ============================================================================

/// One payload per problem kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    /// Tour construction.
    Tour(TourProblem),
    /// Vertex coloring.
    Coloring(ColoringProblem),
    /// Clause satisfaction.
    Satisfaction(SatisfactionProblem),
    /// Subset summation.
    SubsetSelection(SubsetProblem),
}

/// A validated problem plus the dimension count of its candidate space.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Instance {
    problem: Problem,
    dimensions: usize,
}

impl Instance {
    /// Wraps a problem with the default dimension count.
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Overrides the dimension count. Zero is rejected later by the sampler.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Tour instance.
    ///
    /// # Errors
    /// See [`TourProblem::new`].
    pub fn tour(cities: Vec<City>) -> Result<Self, EngineError> {
        Ok(Self::new(Problem::Tour(TourProblem::new(cities)?)))
    }

    /// Coloring instance from an edge list.
    ///
    /// # Errors
    /// See [`ColoringProblem::from_edges`].
    pub fn coloring(
        nodes: usize,
        edges: &[(usize, usize)],
        max_colors: usize,
    ) -> Result<Self, EngineError> {
        Ok(Self::new(Problem::Coloring(ColoringProblem::from_edges(
            nodes, edges, max_colors,
        )?)))
    }

    /// Satisfaction instance.
    ///
    /// # Errors
    /// See [`SatisfactionProblem::new`].
    pub fn satisfaction(variables: usize, clauses: Vec<Vec<i32>>) -> Result<Self, EngineError> {
        Ok(Self::new(Problem::Satisfaction(SatisfactionProblem::new(
            variables, clauses,
        )?)))
    }

    /// Subset-selection instance.
    ///
    /// # Errors
    /// See [`SubsetProblem::new`].
    pub fn subset(numbers: Vec<u64>, target: u64) -> Result<Self, EngineError> {
        Ok(Self::new(Problem::SubsetSelection(SubsetProblem::new(
            numbers, target,
        )?)))
    }

    /// The problem payload.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The problem kind tag.
    pub fn kind(&self) -> ProblemKind {
        match self.problem {
            Problem::Tour(_) => ProblemKind::Tour,
            Problem::Coloring(_) => ProblemKind::Coloring,
            Problem::Satisfaction(_) => ProblemKind::Satisfaction,
            Problem::SubsetSelection(_) => ProblemKind::SubsetSelection,
        }
    }

    /// Scale of the instance: cities, nodes, variables or numbers.
    pub fn size(&self) -> usize {
        match &self.problem {
            Problem::Tour(p) => p.cities.len(),
            Problem::Coloring(p) => p.node_count(),
            Problem::Satisfaction(p) => p.variables,
            Problem::SubsetSelection(p) => p.numbers.len(),
        }
    }

    /// Dimension count of the candidate space.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ============================================================================
// Tests
// ============================================================================
