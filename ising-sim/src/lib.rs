pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

mod parallel;

pub use config::{SimConfig, SweepConfig, SweepMode, MAX_TEMPERATURES};
pub use error::{Result, SimError};
pub use geometry::{Direction, Lattice};
pub use simulation::{
    run_ising, run_ising_seeded, run_temperature_sweep, summarize, temperature_range,
    ObservableSeries, Realization, TemperatureOutcome, TemperatureStats,
};
pub use spins::{Hamiltonian, SpinLattice};
pub use statistics::Statistics;
