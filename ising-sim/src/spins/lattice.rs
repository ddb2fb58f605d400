use crate::error::{Result, SimError};
use crate::geometry::Lattice;
use rand::Rng;

/// Spin configuration on a periodic square lattice.
///
/// Spins are stored as `i8` values (+1/−1) in the lattice's row-major order.
/// The only mutation is [`SpinLattice::flip`], so no other value is reachable.
pub struct SpinLattice {
    lattice: Lattice,
    spins: Vec<i8>,
}

impl SpinLattice {
    /// Independent uniform ±1 assignment for each of the `size * size` sites.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let lattice = Lattice::square(size)?;
        let spins = (0..lattice.n_spins)
            .map(|_| if rng.gen::<f64>() < 0.5 { -1 } else { 1 })
            .collect();
        Ok(Self { lattice, spins })
    }

    /// Every site set to `spin`.
    pub fn uniform(size: usize, spin: i8) -> Result<Self> {
        let lattice = Lattice::square(size)?;
        let spins = vec![spin; lattice.n_spins];
        Self::from_parts(lattice, spins)
    }

    /// Build from an explicit row-major configuration.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Result<Self> {
        let lattice = Lattice::square(size)?;
        Self::from_parts(lattice, spins)
    }

    fn from_parts(lattice: Lattice, spins: Vec<i8>) -> Result<Self> {
        if spins.len() != lattice.n_spins {
            return Err(SimError::InvalidParameter(format!(
                "expected {} spins, got {}",
                lattice.n_spins,
                spins.len()
            )));
        }
        if let Some(bad) = spins.iter().find(|&&s| s != 1 && s != -1) {
            return Err(SimError::InvalidParameter(format!(
                "spin values must be +1 or -1, got {bad}"
            )));
        }
        Ok(Self { lattice, spins })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn size(&self) -> usize {
        self.lattice.size
    }

    pub fn n_spins(&self) -> usize {
        self.lattice.n_spins
    }

    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    #[inline]
    pub fn spin(&self, site: usize) -> i8 {
        self.spins[site]
    }

    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.spins[self.lattice.index(row, col)]
    }

    #[inline]
    pub fn flip(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// Sum of the four toroidal neighbors of `site`.
    #[inline]
    pub fn neighbor_sum_at(&self, site: usize) -> i32 {
        let mut h = 0i32;
        for d in 0..self.lattice.n_neighbors {
            h += self.spins[self.lattice.neighbor(site, d, true)] as i32;
            h += self.spins[self.lattice.neighbor(site, d, false)] as i32;
        }
        h
    }

    pub fn neighbor_sum(&self, row: usize, col: usize) -> i32 {
        self.neighbor_sum_at(self.lattice.index(row, col))
    }

    pub fn total_magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }
}
