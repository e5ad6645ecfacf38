//! Process rank discovery.
//!
//! Generation is parallelised across processes, never inside one. Each
//! process needs its own 0-based rank so that it can seed an independent
//! random stream. The rank is only ever used for seeding.

use crate::types::ParameterError;

/// Environment variables holding the rank, in lookup order
/// (Open MPI, MPICH/Intel MPI, Slurm).
pub const RANK_VARIABLES: [&str; 3] = ["OMPI_COMM_WORLD_RANK", "PMI_RANK", "SLURM_PROCID"];

/// Environment variables holding the world size, paired with [`RANK_VARIABLES`].
pub const SIZE_VARIABLES: [&str; 3] = ["OMPI_COMM_WORLD_SIZE", "PMI_SIZE", "SLURM_NTASKS"];

/// Source of the current process's rank among its cooperating processes.
pub trait RankSource {
    /// 0-based rank of this process.
    fn rank(&self) -> usize;

    /// Number of cooperating processes.
    fn size(&self) -> usize;
}

/// A lone process: rank 0 of 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleProcess;

impl RankSource for SingleProcess {
    #[inline]
    fn rank(&self) -> usize {
        0
    }

    #[inline]
    fn size(&self) -> usize {
        1
    }
}

/// An explicitly assigned rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRank {
    rank: usize,
    size: usize,
}

impl FixedRank {
    /// Creates a fixed rank.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidRank`] unless `rank < size`.
    pub fn new(rank: usize, size: usize) -> Result<Self, ParameterError> {
        if rank >= size {
            return Err(ParameterError::InvalidRank { rank, size });
        }
        Ok(Self { rank, size })
    }
}

impl RankSource for FixedRank {
    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    fn size(&self) -> usize {
        self.size
    }
}

/// Rank detected from the variables set by common MPI launchers and Slurm.
///
/// Falls back to rank 0 of 1 when no launcher variable is present or
/// parseable.
///
/// # Examples
///
/// ```
/// use bunch_core::traits::{EnvironmentRank, RankSource};
///
/// let rank = EnvironmentRank::from_lookup(|key| match key {
///     "PMI_RANK" => Some("3".to_string()),
///     "PMI_SIZE" => Some("8".to_string()),
///     _ => None,
/// });
/// assert_eq!((rank.rank(), rank.size()), (3, 8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvironmentRank {
    rank: usize,
    size: usize,
}

impl EnvironmentRank {
    /// Reads the rank from the process environment.
    pub fn detect() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the rank through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());

        for (rank_var, size_var) in RANK_VARIABLES.iter().zip(SIZE_VARIABLES.iter()) {
            if let Some(rank) = parse(*rank_var) {
                let min_size = rank.saturating_add(1);
                let size = parse(*size_var).unwrap_or(min_size).max(min_size);
                return Self { rank, size };
            }
        }
        Self { rank: 0, size: 1 }
    }
}

impl RankSource for EnvironmentRank {
    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    fn size(&self) -> usize {
        self.size
    }
}
