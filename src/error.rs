//! Error types.
//!
//! Only structurally invalid input is an error. Everything else (bad
//! preference tokens, unknown codes, unsatisfiable constraints) degrades into
//! a lower fitness score instead.

use thiserror::Error;

/// Which input table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// The course table.
    Courses,
    /// The lecturer table.
    Lecturers,
    /// The class-section table.
    Classes,
    /// The room table.
    Rooms,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Table::Courses => "courses",
            Table::Lecturers => "lecturers",
            Table::Classes => "classes",
            Table::Rooms => "rooms",
        };
        f.write_str(name)
    }
}

/// Errors raised while building a [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The course table is empty.
    #[error("course table is empty: nothing to schedule")]
    NoCourses,

    /// The room table is empty.
    #[error("room table is empty: no room can host a course")]
    NoRooms,

    /// The time grid has no days or no sessions.
    #[error("time grid must contain at least one day and one session")]
    EmptyTimeGrid,

    /// A code appears twice within one table.
    #[error("duplicate code `{code}` in {table} table")]
    DuplicateCode {
        /// Table containing the duplicate.
        table: Table,
        /// The repeated code.
        code: String,
    },

    /// A course omits a reference and the referenced table is empty.
    #[error("course `{course}` has no {table} code and the {table} table is empty")]
    UnassignedCourse {
        /// Code of the course.
        course: String,
        /// Table the missing reference points into.
        table: Table,
    },
}

/// Errors raised by [`GaConfig::validate`](crate::ga::GaConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Population too small to pick two distinct parents.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// No generations requested.
    #[error("generations must be at least 1")]
    ZeroGenerations,

    /// Elites would fill the whole population.
    #[error("elite_count ({elite_count}) must be smaller than population_size ({population_size})")]
    EliteTooLarge {
        /// Requested elite carryover.
        elite_count: usize,
        /// Requested population size.
        population_size: usize,
    },

    /// Tournament of size zero.
    #[error("tournament_size must be at least 1")]
    ZeroTournament,
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid input tables.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid run parameters.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
