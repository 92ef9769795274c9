use std::sync::Arc;

use super::catalog::{PersonProfile, PhotoCatalog};
use super::gender::infer_gender;
use super::{Ethnicity, Gender};
use crate::utils::random::{RandomSource, ThreadRandom};

/// Pick one photo for the profile: bucket by age, look up (bucket, gender)
/// with the middle-aged fallback, then draw uniformly among the candidates.
pub fn select_photo<'a>(
    catalog: &'a PhotoCatalog,
    profile: &PersonProfile,
    rng: &mut dyn RandomSource,
) -> &'a str {
    let bucket = profile.bucket();
    let candidates = catalog.candidates(bucket, profile.gender);
    if candidates.is_empty() {
        return "";
    }
    let choice = &candidates[rng.next_index(candidates.len())];
    tracing::debug!(
        age = profile.age,
        gender = %profile.gender,
        %bucket,
        photo = %choice,
        "selected photo"
    );
    choice
}

/// Catalog plus random source, owned by whoever renders photos.
pub struct PhotoSelector<R: RandomSource = ThreadRandom> {
    catalog: Arc<PhotoCatalog>,
    rng: R,
}

impl Default for PhotoSelector<ThreadRandom> {
    fn default() -> Self {
        Self::new(PhotoCatalog::builtin(), ThreadRandom)
    }
}

impl<R: RandomSource> PhotoSelector<R> {
    pub fn new(catalog: Arc<PhotoCatalog>, rng: R) -> Self {
        Self { catalog, rng }
    }

    pub fn catalog(&self) -> &PhotoCatalog {
        &self.catalog
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn select(&mut self, profile: &PersonProfile) -> String {
        select_photo(&self.catalog, profile, &mut self.rng).to_string()
    }

    pub fn infer_gender(&mut self, name: &str) -> Gender {
        infer_gender(name, &mut self.rng)
    }

    /// Photo for a family member known only by name and age.
    pub fn photo_for_person(&mut self, name: &str, age: i32) -> String {
        let gender = self.infer_gender(name);
        let profile = PersonProfile::new(age, gender).with_ethnicity(Ethnicity::Indian);
        self.select(&profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::AgeBucket;
    use crate::utils::random::{SeededRandom, SequenceRandom};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn pinned_index_picks_that_candidate() {
        let catalog = PhotoCatalog::builtin();
        let mut rng = SequenceRandom::new(vec![2]);
        let photo = select_photo(&catalog, &PersonProfile::new(80, Gender::Female), &mut rng);
        assert_eq!(photo, catalog.get(AgeBucket::Elderly, Gender::Female).unwrap()[2]);
    }

    #[test]
    fn absent_pair_draws_from_middle_aged() {
        let catalog = PhotoCatalog::new([
            ((AgeBucket::MiddleAged, Gender::Male), vec!["m1".into(), "m2".into()]),
            ((AgeBucket::MiddleAged, Gender::Female), vec!["f1".into()]),
        ])
        .unwrap();
        let mut rng = SeededRandom::new(3);
        for age in [0, 15, 30, 60, 90] {
            let photo = select_photo(&catalog, &PersonProfile::new(age, Gender::Male), &mut rng);
            assert!(photo == "m1" || photo == "m2");
            let photo = select_photo(&catalog, &PersonProfile::new(age, Gender::Female), &mut rng);
            assert_eq!(photo, "f1");
        }
    }

    #[test]
    fn repeated_draws_cover_every_candidate() {
        let mut selector: PhotoSelector = PhotoSelector::default();
        let profile = PersonProfile::new(45, Gender::Male);
        let expected: HashSet<String> = selector
            .catalog()
            .candidates(AgeBucket::MiddleAged, Gender::Male)
            .iter()
            .cloned()
            .collect();

        let seen: HashSet<String> = (0..300).map(|_| selector.select(&profile)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn ethnicity_does_not_change_selection() {
        let catalog = PhotoCatalog::builtin();
        for ethnicity in Ethnicity::ALL {
            let mut rng = SequenceRandom::new(vec![1]);
            let profile = PersonProfile::new(30, Gender::Female).with_ethnicity(ethnicity);
            assert_eq!(
                select_photo(&catalog, &profile, &mut rng),
                catalog.get(AgeBucket::YoungAdult, Gender::Female).unwrap()[1]
            );
        }
    }

    #[test]
    fn person_photo_matches_inferred_gender() {
        let mut selector = PhotoSelector::new(PhotoCatalog::builtin(), SequenceRandom::new(vec![0]));
        let photo = selector.photo_for_person("Rohan Sharma", 9);
        assert_eq!(
            photo,
            selector.catalog().get(AgeBucket::Child, Gender::Male).unwrap()[0]
        );
    }

    proptest! {
        #[test]
        fn selection_is_member_of_pair(age in -20i32..=200, female in any::<bool>(), seed in any::<u64>()) {
            let gender = if female { Gender::Female } else { Gender::Male };
            let catalog = PhotoCatalog::builtin();
            let mut rng = SeededRandom::new(seed);
            let photo = select_photo(&catalog, &PersonProfile::new(age, gender), &mut rng);
            let list = catalog.get(AgeBucket::of(age), gender).unwrap();
            prop_assert!(list.iter().any(|p| p == photo));
        }
    }
}
