//! Name-based gender guess used when a family member has no explicit gender.
//!
//! Unlisted names get a coin flip from the caller's random source, so the
//! same unknown name can yield different answers across calls.

use super::catalog::Gender;
use crate::utils::random::RandomSource;

const FEMALE_NAMES: &[&str] = &[
    "priya", "kamala", "ananya", "maya", "sita", "rita", "meera", "kavya", "asha", "suma",
];

const MALE_NAMES: &[&str] = &[
    "arjun", "rohan", "raj", "amit", "vikram", "suresh", "ravi", "kiran", "dev", "anil",
];

/// Deterministic part of the guess: `None` when neither list matches.
///
/// Only the first space-separated token is inspected, and a list entry
/// matches when it is contained anywhere in that token.
pub fn known_gender(name: &str) -> Option<Gender> {
    let lower = name.to_lowercase();
    let first_name = lower.split(' ').next().unwrap_or_default();

    if FEMALE_NAMES.iter().any(|n| first_name.contains(n)) {
        Some(Gender::Female)
    } else if MALE_NAMES.iter().any(|n| first_name.contains(n)) {
        Some(Gender::Male)
    } else {
        None
    }
}

pub fn infer_gender(name: &str, rng: &mut dyn RandomSource) -> Gender {
    known_gender(name).unwrap_or_else(|| {
        let guess = if rng.next_bool() {
            Gender::Female
        } else {
            Gender::Male
        };
        tracing::debug!(name, ?guess, "unlisted name, guessing gender");
        guess
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::random::{SequenceRandom, ThreadRandom};

    #[test]
    fn listed_names_resolve() {
        let mut rng = ThreadRandom;
        assert_eq!(infer_gender("Priya Sharma", &mut rng), Gender::Female);
        assert_eq!(infer_gender("Arjun Sharma", &mut rng), Gender::Male);
        assert_eq!(infer_gender("KAMALA Patel", &mut rng), Gender::Female);
    }

    #[test]
    fn only_first_token_counts() {
        // "ravi" appears in the surname only
        assert_eq!(known_gender("Zed Ravindran"), None);
    }

    #[test]
    fn containment_not_equality() {
        assert_eq!(known_gender("Devika"), Some(Gender::Male));
        assert_eq!(known_gender("Rajesh Kumar"), Some(Gender::Male));
    }

    #[test]
    fn female_list_checked_first() {
        // contains both "maya" and "raj"
        assert_eq!(known_gender("Rajmaya"), Some(Gender::Female));
    }

    #[test]
    fn unlisted_name_uses_random_source() {
        let mut rng = SequenceRandom::new(vec![1, 0]);
        assert_eq!(infer_gender("Zzyzx Qor", &mut rng), Gender::Female);
        assert_eq!(infer_gender("Zzyzx Qor", &mut rng), Gender::Male);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn listed_name_consumes_no_randomness() {
        let mut rng = SequenceRandom::new(vec![1]);
        infer_gender("Meera", &mut rng);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn empty_name_does_not_panic() {
        let mut rng = ThreadRandom;
        let g = infer_gender("", &mut rng);
        assert!(Gender::ALL.contains(&g));
    }
}
