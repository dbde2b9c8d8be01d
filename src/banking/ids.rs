use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Account numbers are 5 digits
pub const ACCOUNT_ID_RANGE: std::ops::RangeInclusive<u32> = 10000..=99999;

/// PINs are 4 digits
pub const CREDENTIAL_RANGE: std::ops::RangeInclusive<u32> = 1000..=9999;

/// Source of new account numbers and PINs
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator {
    /// Draw a 5-digit account number
    fn account_id(&mut self) -> String;

    /// Draw a 4-digit PIN
    fn credential(&mut self) -> String;
}

/// Uniform draws from the account number and PIN ranges
pub struct RandomIdGenerator<R = StdRng> {
    rng: R,
}

impl RandomIdGenerator<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, for tests and demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> IdGenerator for RandomIdGenerator<R> {
    fn account_id(&mut self) -> String {
        self.rng.gen_range(ACCOUNT_ID_RANGE).to_string()
    }

    fn credential(&mut self) -> String {
        self.rng.gen_range(CREDENTIAL_RANGE).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_formats() {
        let mut ids = RandomIdGenerator::seeded(7);
        for _ in 0..200 {
            let id = ids.account_id();
            assert_eq!(id.len(), 5);
            assert!(id.chars().all(|c| c.is_ascii_digit()));
            assert!(!id.starts_with('0'));

            let pin = ids.credential();
            assert_eq!(pin.len(), 4);
            assert!(pin.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut first = RandomIdGenerator::seeded(42);
        let mut second = RandomIdGenerator::seeded(42);
        assert_eq!(first.account_id(), second.account_id());
        assert_eq!(first.credential(), second.credential());
    }
}
