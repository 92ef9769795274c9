//! "Smart photo generator" flow: a short loading state, then a catalog pick.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::catalog::{AgeBucket, Ethnicity, Gender, PersonProfile};
use super::selector::PhotoSelector;
use crate::config::PhotoConfig;
use crate::utils::random::{RandomSource, ThreadRandom};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPhoto {
    pub photo_url: String,
    pub profile: PersonProfile,
    pub bucket: AgeBucket,
    /// e.g. "Young Adult"
    pub category: &'static str,
}

pub struct PhotoGenerator<R: RandomSource = ThreadRandom> {
    selector: PhotoSelector<R>,
    loading_delay: Duration,
    generating: Arc<AtomicBool>,
    last: Option<GeneratedPhoto>,
}

impl Default for PhotoGenerator<ThreadRandom> {
    fn default() -> Self {
        Self::new(PhotoSelector::default(), &PhotoConfig::default())
    }
}

impl<R: RandomSource> PhotoGenerator<R> {
    pub fn new(selector: PhotoSelector<R>, config: &PhotoConfig) -> Self {
        Self {
            selector,
            loading_delay: Duration::from_millis(config.loading_delay_ms),
            generating: Arc::new(AtomicBool::new(false)),
            last: None,
        }
    }

    /// Shared flag the presentation layer can poll for a loading spinner.
    pub fn generating_flag(&self) -> Arc<AtomicBool> {
        self.generating.clone()
    }

    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<&GeneratedPhoto> {
        self.last.as_ref()
    }

    pub async fn generate(&mut self, profile: PersonProfile) -> GeneratedPhoto {
        self.generating.store(true, Ordering::SeqCst);
        if !self.loading_delay.is_zero() {
            tokio::time::sleep(self.loading_delay).await;
        }

        let bucket = profile.bucket();
        let photo = GeneratedPhoto {
            photo_url: self.selector.select(&profile),
            profile,
            bucket,
            category: bucket.label(),
        };
        self.generating.store(false, Ordering::SeqCst);

        tracing::info!(age = profile.age, category = photo.category, "generated photo");
        self.last = Some(photo.clone());
        photo
    }

    /// Random profile: age 5..=84, any gender, any ethnicity.
    pub fn randomize_profile(&mut self) -> PersonProfile {
        let rng = self.selector.rng_mut();
        let age = rng.next_in_range(5, 84);
        let gender = if rng.next_bool() {
            Gender::Male
        } else {
            Gender::Female
        };
        let ethnicity = Ethnicity::ALL[rng.next_index(Ethnicity::ALL.len())];
        PersonProfile::new(age, gender).with_ethnicity(ethnicity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::PhotoCatalog;
    use crate::utils::random::SequenceRandom;

    fn instant_generator(values: Vec<usize>) -> PhotoGenerator<SequenceRandom> {
        PhotoGenerator::new(
            PhotoSelector::new(PhotoCatalog::builtin(), SequenceRandom::new(values)),
            &PhotoConfig { loading_delay_ms: 0 },
        )
    }

    #[tokio::test]
    async fn generate_reports_category() {
        let mut generator = instant_generator(vec![0]);
        let photo = generator.generate(PersonProfile::new(30, Gender::Female)).await;
        assert_eq!(photo.bucket, AgeBucket::YoungAdult);
        assert_eq!(photo.category, "Young Adult");
        assert!(photo.photo_url.starts_with("https://images.unsplash.com/"));
        assert_eq!(generator.last(), Some(&photo));
        assert!(!generator.is_generating());
    }

    #[tokio::test]
    async fn flag_is_raised_during_loading_delay() {
        let mut generator = PhotoGenerator::new(
            PhotoSelector::new(PhotoCatalog::builtin(), SequenceRandom::new(vec![0])),
            &PhotoConfig { loading_delay_ms: 20 },
        );
        let flag = generator.generating_flag();

        let (_, seen_during) = tokio::join!(
            generator.generate(PersonProfile::new(70, Gender::Male)),
            async {
                tokio::task::yield_now().await;
                flag.load(Ordering::SeqCst)
            }
        );
        assert!(seen_during);
        assert!(!generator.is_generating());
    }

    #[test]
    fn randomized_profile_uses_rng_in_order() {
        // age index 10 -> 15, 1 -> male, 4 -> indian
        let mut generator = instant_generator(vec![10, 1, 4]);
        let profile = generator.randomize_profile();
        assert_eq!(profile.age, 15);
        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.ethnicity, Ethnicity::Indian);
    }
}
