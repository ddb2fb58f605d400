use rayon::prelude::*;

/// Map `body` over temperatures, optionally in parallel.
///
/// The closure receives `(temp_id, temperature)` and results come back in
/// temperature order either way. Each call owns whatever state it builds, so
/// there is nothing shared between tasks.
///
/// When `sequential` is true, temperatures are processed on the current
/// thread (no rayon overhead, and a single progress line when the caller is
/// already parallel at a higher level).
pub fn par_over_temperatures<T, F>(temperatures: &[f64], sequential: bool, body: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, f64) -> T + Send + Sync,
{
    let work = |(temp_id, &temp): (usize, &f64)| body(temp_id, temp);

    if sequential {
        temperatures.iter().enumerate().map(work).collect()
    } else {
        temperatures.par_iter().enumerate().map(work).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let temps: Vec<f64> = (0..64).map(|i| i as f64 * 0.5).collect();
        let seq = par_over_temperatures(&temps, true, |i, t| (i, t * 2.0));
        let par = par_over_temperatures(&temps, false, |i, t| (i, t * 2.0));
        assert_eq!(seq, par);
        assert_eq!(par[10], (10, 10.0));
    }
}
