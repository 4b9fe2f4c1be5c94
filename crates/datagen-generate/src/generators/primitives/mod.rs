use chrono::NaiveDate;
use rand::distr::{Distribution, Uniform};
use rand::{Rng, RngCore};

const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Alphanumeric text of exactly `length` characters.
pub fn random_text(length: usize, rng: &mut dyn RngCore) -> String {
    let chars: Vec<char> = DEFAULT_CHARSET.chars().collect();
    let mut value = String::with_capacity(length);
    for _ in 0..length {
        let idx = rng.random_range(0..chars.len());
        value.push(chars[idx]);
    }
    value
}

pub fn random_int(min: i64, max: i64, rng: &mut dyn RngCore) -> i64 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Uniform decimal in `[min, max]`; ranges that cannot be sampled yield `min`.
pub fn random_decimal(min: f64, max: f64, rng: &mut dyn RngCore) -> f64 {
    if min >= max {
        return min;
    }
    match Uniform::new_inclusive(min, max) {
        Ok(range) => range.sample(rng),
        Err(_) => min,
    }
}

pub fn random_date(min: NaiveDate, max: NaiveDate, rng: &mut dyn RngCore) -> NaiveDate {
    let span = (max - min).num_days().max(0);
    let offset = rng.random_range(0..=span);
    min + chrono::Duration::days(offset)
}

pub fn random_bool(rng: &mut dyn RngCore) -> bool {
    rng.random_bool(0.5)
}

/// Version 4 UUID built from the supplied generator so seeded runs repeat.
pub fn random_uuid(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    uuid::Uuid::from_bytes(bytes).to_string()
}

pub fn pick<'a>(values: &[&'a str], rng: &mut dyn RngCore) -> &'a str {
    if values.is_empty() {
        return "";
    }
    values[rng.random_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn degenerate_ranges_return_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(random_int(5, 5, &mut rng), 5);
        assert_eq!(random_decimal(2.5, 2.5, &mut rng), 2.5);
        let day = NaiveDate::from_ymd_opt(1970, 1, 1).expect("date");
        assert_eq!(random_date(day, day, &mut rng), day);
    }

    #[test]
    fn unsampleable_decimal_ranges_return_min() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(random_decimal(-1.0e308, 1.0e308, &mut rng), -1.0e308);
        assert_eq!(random_decimal(0.0, f64::INFINITY, &mut rng), 0.0);
        assert!(random_decimal(f64::NAN, 1.0, &mut rng).is_nan());
    }

    #[test]
    fn decimal_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let value = random_decimal(-2.5, 7.25, &mut rng);
            assert!((-2.5..=7.25).contains(&value));
        }
    }

    #[test]
    fn uuid_is_version_4() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let value = random_uuid(&mut rng);
        let parsed = uuid::Uuid::parse_str(&value).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn seeded_output_repeats() {
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(random_text(16, &mut a), random_text(16, &mut b));
        assert_eq!(pick(&["x", "y", "z"], &mut a), pick(&["x", "y", "z"], &mut b));
    }
}
