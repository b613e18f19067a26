//! Physical relations used by the burst pipeline.
//!
//! - Seawater equation of state (UNESCO EOS-80)
//! - Linear dispersion relation for surface gravity waves
//! - Linear-theory wave height and near-bed orbital velocity

pub mod dispersion;
pub mod equation_of_state;
pub mod linear_wave;

pub use dispersion::{DispersionSolution, DispersionSolver, solve_dispersion};
pub use equation_of_state::EquationOfState;
pub use linear_wave::{WaveStatistics, WaveStatisticsInput, wave_statistics};
