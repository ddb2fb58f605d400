use crate::spins::{Hamiltonian, SpinLattice};
use rand::Rng;

/// Changes produced by one sweep, applied by the caller to its running totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepOutcome {
    pub proposed: usize,
    pub accepted: usize,
    pub delta_magnetization: i64,
    pub delta_energy: f64,
}

/// Number of flip proposals per sweep: `ceil(flip_proportion * n_spins)`.
///
/// Products that land within rounding error of an integer are not bumped up,
/// so `0.1 * 100` gives 10 proposals.
pub fn n_proposals(n_spins: usize, flip_proportion: f64) -> usize {
    let raw = flip_proportion * n_spins as f64;
    let nearest = raw.round();
    let n = if (raw - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest
    } else {
        raw.ceil()
    };
    (n as usize).clamp(1, n_spins)
}

/// Single-spin-flip sweep with a generic acceptance rule.
///
/// Sites are drawn uniformly with replacement and flips are applied as they
/// are accepted, so later proposals see earlier flips of the same sweep.
/// `accept_fn(rng, delta_e, temp)` decides each proposal.
fn sweep_generic<R: Rng + ?Sized>(
    spins: &mut SpinLattice,
    hamiltonian: &Hamiltonian,
    temperature: f64,
    n_proposals: usize,
    rng: &mut R,
    accept_fn: impl Fn(&mut R, f64, f64) -> bool,
) -> SweepOutcome {
    let n_spins = spins.n_spins();
    let mut outcome = SweepOutcome {
        proposed: n_proposals,
        ..SweepOutcome::default()
    };

    for _ in 0..n_proposals {
        let site = rng.gen_range(0..n_spins);
        let si = spins.spin(site);
        let eng_change = hamiltonian.flip_energy_delta(si, spins.neighbor_sum_at(site));
        if accept_fn(&mut *rng, eng_change, temperature) {
            spins.flip(site);
            outcome.accepted += 1;
            outcome.delta_magnetization -= 2 * si as i64;
            outcome.delta_energy += eng_change;
        }
    }

    outcome
}

/// Metropolis sweep: accept when `dE <= 0`, otherwise with probability `exp(-dE / T)`.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_sweep<R: Rng + ?Sized>(
    spins: &mut SpinLattice,
    hamiltonian: &Hamiltonian,
    temperature: f64,
    n_proposals: usize,
    rng: &mut R,
) -> SweepOutcome {
    sweep_generic(
        spins,
        hamiltonian,
        temperature,
        n_proposals,
        rng,
        |rng, eng_change, temp| {
            eng_change <= 0.0 || rng.gen::<f64>() < (-eng_change / temp).exp()
        },
    )
}

/// Heat-bath sweep: accept with probability `1 / (1 + exp(dE / T))`.
#[cfg_attr(feature = "profile", inline(never))]
pub fn gibbs_sweep<R: Rng + ?Sized>(
    spins: &mut SpinLattice,
    hamiltonian: &Hamiltonian,
    temperature: f64,
    n_proposals: usize,
    rng: &mut R,
) -> SweepOutcome {
    sweep_generic(
        spins,
        hamiltonian,
        temperature,
        n_proposals,
        rng,
        |rng, eng_change, temp| rng.gen::<f64>() < 1.0 / (1.0 + (eng_change / temp).exp()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_n_proposals() {
        assert_eq!(n_proposals(100, 0.1), 10);
        assert_eq!(n_proposals(16, 0.1), 2);
        assert_eq!(n_proposals(16, 1.0), 16);
        assert_eq!(n_proposals(9, 0.3), 3);
        assert_eq!(n_proposals(4, 1e-6), 1);
    }

    #[test]
    fn test_outcome_tracks_lattice() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let h = Hamiltonian::new(1.0, 0.2);
        let mut spins = SpinLattice::random(8, &mut rng).unwrap();
        let mut mag = spins.total_magnetization();
        let mut energy = h.total_energy(&spins);

        for _ in 0..50 {
            let out = metropolis_sweep(&mut spins, &h, 2.0, 32, &mut rng);
            assert_eq!(out.proposed, 32);
            mag += out.delta_magnetization;
            energy += out.delta_energy;
        }

        assert_eq!(mag, spins.total_magnetization());
        assert!((energy - h.total_energy(&spins)).abs() < 1e-9);
    }

    #[test]
    fn test_downhill_moves_always_accepted() {
        // lone minority spin in an aligned background: flipping it lowers energy
        let mut spins = vec![1i8; 9];
        spins[4] = -1;
        let mut lat = SpinLattice::from_spins(3, spins).unwrap();
        let h = Hamiltonian::new(1.0, 0.0);
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);

        // at tiny T only the minority spin can flip
        for _ in 0..200 {
            metropolis_sweep(&mut lat, &h, 1e-6, 1, &mut rng);
        }
        assert_eq!(lat.total_magnetization(), 9);
    }

    #[test]
    fn test_uphill_rejected_at_zero_temperature() {
        let mut lat = SpinLattice::uniform(4, 1).unwrap();
        let h = Hamiltonian::new(1.0, 0.0);
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let out = metropolis_sweep(&mut lat, &h, 1e-3, 1000, &mut rng);
        assert_eq!(out.accepted, 0);
        assert_eq!(lat.total_magnetization(), 16);
    }

    #[test]
    fn test_zero_hamiltonian_accepts_everything() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);
        let mut lat = SpinLattice::random(5, &mut rng).unwrap();
        let h = Hamiltonian::new(0.0, 0.0);
        let out = metropolis_sweep(&mut lat, &h, 0.5, 25, &mut rng);
        assert_eq!(out.accepted, 25);
        assert_eq!(out.delta_energy, 0.0);
    }

    #[test]
    fn test_gibbs_tracks_lattice() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let h = Hamiltonian::new(1.0, -0.4);
        let mut spins = SpinLattice::random(6, &mut rng).unwrap();
        let start_e = h.total_energy(&spins);
        let out = gibbs_sweep(&mut spins, &h, 3.0, 36, &mut rng);
        assert!(out.accepted <= 36);
        assert!((start_e + out.delta_energy - h.total_energy(&spins)).abs() < 1e-9);
    }
}
