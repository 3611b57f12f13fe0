//! Order number generation.

use jiff::Timestamp;
use rand::Rng;

/// Widest random suffix, exclusive.
const SUFFIX_SPACE: u32 = 1_000_000;

/// Mints a candidate order number: the UTC date plus a six-digit random
/// suffix, e.g. `20260827-041377`. Uniqueness is the caller's problem;
/// collisions are retried with a fresh suffix.
pub(crate) fn order_number(now: Timestamp, rng: &mut impl Rng) -> String {
    let date = now.strftime("%Y%m%d");
    let suffix = rng.gen_range(0..SUFFIX_SPACE);

    format!("{date}-{suffix:06}")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn number_has_date_prefix_and_six_digit_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Timestamp::UNIX_EPOCH;

        let number = order_number(now, &mut rng);

        let (date, suffix) = number.split_once('-').expect("number should contain a dash");
        assert_eq!(date, "19700101");
        assert_eq!(suffix.len(), 6, "suffix should be zero-padded to six digits");
        assert!(suffix.chars().all(|c| c.is_ascii_digit()), "suffix should be digits");
    }

    #[test]
    fn fresh_rng_draws_differ() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Timestamp::UNIX_EPOCH;

        let first = order_number(now, &mut rng);
        let second = order_number(now, &mut rng);

        assert_ne!(first, second, "consecutive draws should differ");
    }
}
