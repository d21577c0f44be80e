/// Xorshift32 stream used wherever the harness needs reproducible
/// randomness. Deterministic per seed across platforms.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            // xorshift sticks at zero, remap to a fixed non-zero state
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    pub fn next_int(&mut self, max: u32) -> u32 {
        self.next() % max
    }

    pub fn next_range(&mut self, min: i32, max_exclusive: i32) -> i32 {
        debug_assert!(max_exclusive > min);
        let span = (max_exclusive - min) as u32;
        min + self.next_int(span) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_the_same_stream() {
        let mut a = SeededRng::new(0x5EED_0001);
        let mut b = SeededRng::new(0x5EED_0001);
        for _ in 0..64 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::new(1);
        let mut b = SeededRng::new(2);
        assert_ne!(a.next(), b.next());
    }

    #[test]
    fn zero_seed_is_remapped_and_still_advances() {
        let mut rng = SeededRng::new(0);
        assert_ne!(rng.state(), 0);
        let first = rng.next();
        assert_ne!(first, 0);
        assert_ne!(rng.next(), first);
    }

    #[test]
    fn next_range_stays_in_bounds() {
        let mut rng = SeededRng::new(7);
        for _ in 0..256 {
            let value = rng.next_range(-5, 13);
            assert!((-5..13).contains(&value));
        }
    }
}
