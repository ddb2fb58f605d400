pub mod energy;
pub mod lattice;

pub use energy::Hamiltonian;
pub use lattice::SpinLattice;
