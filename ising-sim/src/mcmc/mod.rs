pub mod sweep;

pub use sweep::{gibbs_sweep, metropolis_sweep, n_proposals, SweepOutcome};
