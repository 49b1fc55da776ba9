use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::RandomSource;

/// Системный RNG (thread_rng) для боевого запуска.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut rand::thread_rng());
    }

    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же партии при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// RNG для сервера: системный или детерминированный, если задан seed в конфиге.
#[derive(Clone, Debug)]
pub enum ConfiguredRng {
    System(SystemRng),
    Seeded(DeterministicRng),
}

impl ConfiguredRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => ConfiguredRng::Seeded(DeterministicRng::from_u64(seed)),
            None => ConfiguredRng::System(SystemRng),
        }
    }
}

impl RandomSource for ConfiguredRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            ConfiguredRng::System(rng) => rng.shuffle(slice),
            ConfiguredRng::Seeded(rng) => rng.shuffle(slice),
        }
    }

    fn pick_index(&mut self, len: usize) -> usize {
        match self {
            ConfiguredRng::System(rng) => rng.pick_index(len),
            ConfiguredRng::Seeded(rng) => rng.pick_index(len),
        }
    }
}
