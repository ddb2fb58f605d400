use crate::error::{Result, SimError};

/// The four axis directions on the square lattice.
///
/// Rows run along dimension 0 and columns along dimension 1, so `Down`
/// increases the row index and `Right` increases the column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[inline]
    fn axis(self) -> (usize, bool) {
        match self {
            Self::Up => (0, false),
            Self::Down => (0, true),
            Self::Left => (1, false),
            Self::Right => (1, true),
        }
    }
}

/// Periodic `L x L` square lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order, `site = i * L + j`.
pub struct Lattice {
    /// Linear extent `L`.
    pub size: usize,
    /// Row-major strides: `[L, 1]`.
    pub strides: [usize; 2],
    /// Total number of sites (`L * L`).
    pub n_spins: usize,
    /// Number of forward neighbor directions per site (2 on the square lattice).
    pub n_neighbors: usize,
    /// Precomputed neighbor table, length `n_spins * n_neighbors * 2`.
    /// Layout: `neighbors[(i * n_neighbors + d) * 2 + dir]` where `dir = 0`
    /// is forward and `dir = 1` is backward.
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Create a toroidal `size x size` lattice.
    pub fn square(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SimError::InvalidSize(size));
        }
        let n_spins = size
            .checked_mul(size)
            .filter(|&n| n <= u32::MAX as usize)
            .ok_or(SimError::InvalidSize(size))?;

        // one unit vector per dimension
        let offsets = [[1isize, 0], [0, 1]];
        let n_neighbors = offsets.len();
        let shape = [size, size];
        let strides = [size, 1];

        let mut neighbors = vec![0u32; n_spins * n_neighbors * 2];

        for i in 0..n_spins {
            let coords = [i / size, i % size];

            for (d, off) in offsets.iter().enumerate() {
                for (dir, sign) in [(0, 1isize), (1, -1isize)] {
                    let mut flat = 0usize;
                    for dim in 0..2 {
                        let c = (coords[dim] as isize + sign * off[dim])
                            .rem_euclid(shape[dim] as isize) as usize;
                        flat += c * strides[dim];
                    }
                    neighbors[(i * n_neighbors + d) * 2 + dir] = flat as u32;
                }
            }
        }

        Ok(Self {
            size,
            strides,
            n_spins,
            n_neighbors,
            neighbors,
        })
    }

    /// Return the neighbor of site `flat_idx` along dimension `dim`.
    /// `forward = true` means +1, `forward = false` means -1 (with wraparound).
    #[inline]
    pub fn neighbor(&self, flat_idx: usize, dim: usize, forward: bool) -> usize {
        self.neighbors[(flat_idx * self.n_neighbors + dim) * 2 + (!forward as usize)] as usize
    }

    #[inline]
    pub fn step(&self, flat_idx: usize, direction: Direction) -> usize {
        let (dim, forward) = direction.axis();
        self.neighbor(flat_idx, dim, forward)
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.strides[0] + col
    }

    #[inline]
    pub fn coords(&self, flat_idx: usize) -> (usize, usize) {
        (flat_idx / self.size, flat_idx % self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_neighbors() {
        let lat = Lattice::square(4).unwrap();
        assert_eq!(lat.n_spins, 16);
        assert_eq!(lat.strides, [4, 1]);

        // Site 0 = (0,0): forward in dim 0 -> (1,0)=4, forward in dim 1 -> (0,1)=1
        assert_eq!(lat.neighbor(0, 0, true), 4);
        assert_eq!(lat.neighbor(0, 1, true), 1);

        // backward wraps: (3,0)=12 and (0,3)=3
        assert_eq!(lat.neighbor(0, 0, false), 12);
        assert_eq!(lat.neighbor(0, 1, false), 3);

        // Site 15 = (3,3): forward neighbors wrap to (0,3)=3 and (3,0)=12
        assert_eq!(lat.neighbor(15, 0, true), 3);
        assert_eq!(lat.neighbor(15, 1, true), 12);
    }

    #[test]
    fn test_directions() {
        let lat = Lattice::square(3).unwrap();
        let site = lat.index(1, 1);
        assert_eq!(lat.coords(lat.step(site, Direction::Up)), (0, 1));
        assert_eq!(lat.coords(lat.step(site, Direction::Down)), (2, 1));
        assert_eq!(lat.coords(lat.step(site, Direction::Left)), (1, 0));
        assert_eq!(lat.coords(lat.step(site, Direction::Right)), (1, 2));
    }

    #[test]
    fn test_opposite_round_trip() {
        for size in [1, 2, 5] {
            let lat = Lattice::square(size).unwrap();
            for site in 0..lat.n_spins {
                for dir in Direction::ALL {
                    let there = lat.step(site, dir);
                    assert_eq!(lat.step(there, dir.opposite()), site);
                }
            }
        }
    }

    #[test]
    fn test_single_site_is_its_own_neighbor() {
        let lat = Lattice::square(1).unwrap();
        for dir in Direction::ALL {
            assert_eq!(lat.step(0, dir), 0);
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Lattice::square(0).err(), Some(SimError::InvalidSize(0)));
    }
}
