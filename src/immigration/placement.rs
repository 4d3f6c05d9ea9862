//! Age placement of arriving cohorts
//!
//! Each category has a truncated-normal target age distribution. The
//! deterministic mode discretizes the density over the supported ages,
//! normalizes it to the exact arrival count, and reconciles the rounding
//! remainder at the mean age; it drives all simulation paths. The sampling
//! mode draws individual ages via Box-Muller with rejection outside the
//! supported range and exists only for illustrative population pyramids.

use super::integration::ImmigrantProfile;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Expected age distribution for `count` arrivals
///
/// Returns (age, persons) pairs whose counts sum exactly to `round(count)`.
pub fn expected_distribution(count: f64, profile: &ImmigrantProfile) -> Vec<(u8, f64)> {
    let total = count.round();
    if total <= 0.0 {
        return Vec::new();
    }

    // Discretized normal density over the supported ages
    let mut density = Vec::with_capacity((profile.age_max - profile.age_min + 1) as usize);
    let mut density_sum = 0.0;
    for age in profile.age_min..=profile.age_max {
        let z = (age as f64 - profile.age_mean) / profile.age_sd;
        let weight = (-0.5 * z * z).exp();
        density.push((age, weight));
        density_sum += weight;
    }

    let mut placed = Vec::with_capacity(density.len());
    let mut placed_sum = 0.0;
    for (age, weight) in density {
        let persons = (total * weight / density_sum).round();
        if persons > 0.0 {
            placed.push((age, persons));
            placed_sum += persons;
        }
    }

    // Reconcile the rounding remainder at the mean age
    let remainder = total - placed_sum;
    if remainder != 0.0 {
        let mean_age = (profile.age_mean.round() as u8).clamp(profile.age_min, profile.age_max);
        if let Some(entry) = placed.iter_mut().find(|(age, _)| *age == mean_age) {
            entry.1 = (entry.1 + remainder).max(0.0);
        } else if remainder > 0.0 {
            placed.push((mean_age, remainder));
        }
    }

    placed.retain(|(_, persons)| *persons > 0.0);
    placed
}

/// Sample individual arrival ages (illustrative mode)
///
/// Box-Muller normal draws, rejecting samples outside the supported age
/// range. A seed makes the pyramid reproducible.
pub fn sample_ages(count: usize, profile: &ImmigrantProfile, seed: Option<u64>) -> Vec<u8> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut ages = Vec::with_capacity(count);
    while ages.len() < count {
        // Box-Muller transform on two uniform draws
        let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
        let u2: f64 = rng.gen_range(0.0..1.0);
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        let age = profile.age_mean + z * profile.age_sd;

        if age < profile.age_min as f64 || age > profile.age_max as f64 {
            continue;
        }
        ages.push(age.round() as u8);
    }
    ages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::ImmigrantType;

    #[test]
    fn test_expected_distribution_sums_to_count() {
        for kind in ImmigrantType::ALL {
            let profile = ImmigrantProfile::for_type(kind);
            for count in [17.0, 1_000.0, 23_456.0] {
                let placed = expected_distribution(count, profile);
                let sum: f64 = placed.iter().map(|(_, n)| n).sum();
                assert_eq!(sum, count.round(), "kind {:?} count {}", kind, count);
            }
        }
    }

    #[test]
    fn test_distribution_peaks_near_mean() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Work);
        let placed = expected_distribution(10_000.0, profile);
        let (peak_age, _) = placed
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
            .unwrap();
        assert!((peak_age as f64 - profile.age_mean).abs() <= 2.0);
    }

    #[test]
    fn test_distribution_respects_bounds() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Work);
        let placed = expected_distribution(50_000.0, profile);
        for (age, _) in placed {
            assert!(age >= profile.age_min && age <= profile.age_max);
        }
    }

    #[test]
    fn test_zero_count_places_nobody() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Family);
        assert!(expected_distribution(0.0, profile).is_empty());
        assert!(expected_distribution(0.4, profile).is_empty());
    }

    #[test]
    fn test_sampling_respects_bounds() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Humanitarian);
        let ages = sample_ages(500, profile, Some(7));
        assert_eq!(ages.len(), 500);
        for age in &ages {
            assert!(*age >= profile.age_min && *age <= profile.age_max);
        }
    }

    #[test]
    fn test_sampling_is_seed_reproducible() {
        let profile = ImmigrantProfile::for_type(ImmigrantType::Work);
        let first = sample_ages(200, profile, Some(42));
        let second = sample_ages(200, profile, Some(42));
        assert_eq!(first, second);
    }
}
