use super::lattice::SpinLattice;

/// Nearest-neighbor Ising Hamiltonian with uniform coupling and external field:
///
/// `H = -J * sum_<ij> s_i s_j - B * sum_i s_i`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hamiltonian {
    /// Coupling strength `J`.
    pub coupling: f64,
    /// External field `B`.
    pub field: f64,
}

impl Hamiltonian {
    pub fn new(coupling: f64, field: f64) -> Self {
        Self { coupling, field }
    }

    /// Energy change from flipping a spin with value `spin` whose four
    /// neighbors sum to `neighbor_sum`: `2 s (J h + B)`.
    #[inline]
    pub fn flip_energy_delta(&self, spin: i8, neighbor_sum: i32) -> f64 {
        2.0 * spin as f64 * (self.coupling * neighbor_sum as f64 + self.field)
    }

    /// Total energy, counting each bond once through the forward neighbors.
    pub fn total_energy(&self, spins: &SpinLattice) -> f64 {
        let lattice = spins.lattice();
        let s = spins.spins();
        let mut bonds = 0i64;
        let mut mag = 0i64;

        for i in 0..lattice.n_spins {
            let si = s[i] as i64;
            mag += si;
            for d in 0..lattice.n_neighbors {
                bonds += si * s[lattice.neighbor(i, d, true)] as i64;
            }
        }

        -self.coupling * bonds as f64 - self.field * mag as f64
    }
}
