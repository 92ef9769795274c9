use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

// ── Error Types ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("empty candidate list for {bucket} / {gender}")]
    EmptyCandidates { bucket: AgeBucket, gender: Gender },
    #[error("catalog has no middle-aged fallback for {0}")]
    MissingFallback(Gender),
}

// ── Person Profile ─────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Carried for forward compatibility; does not influence selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ethnicity {
    Caucasian,
    Asian,
    African,
    Hispanic,
    Indian,
    #[default]
    Mixed,
}

impl Ethnicity {
    pub const ALL: [Ethnicity; 6] = [
        Ethnicity::Caucasian,
        Ethnicity::Asian,
        Ethnicity::African,
        Ethnicity::Hispanic,
        Ethnicity::Indian,
        Ethnicity::Mixed,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub age: i32,
    pub gender: Gender,
    #[serde(default)]
    pub ethnicity: Ethnicity,
}

impl PersonProfile {
    pub fn new(age: i32, gender: Gender) -> Self {
        Self {
            age,
            gender,
            ethnicity: Ethnicity::default(),
        }
    }

    pub fn with_ethnicity(mut self, ethnicity: Ethnicity) -> Self {
        self.ethnicity = ethnicity;
        self
    }

    pub fn bucket(&self) -> AgeBucket {
        AgeBucket::of(self.age)
    }
}

// ── Age Buckets ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeBucket {
    Child,
    Teenager,
    YoungAdult,
    MiddleAged,
    Senior,
    Elderly,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 6] = [
        AgeBucket::Child,
        AgeBucket::Teenager,
        AgeBucket::YoungAdult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
        AgeBucket::Elderly,
    ];

    /// Inclusive upper bounds: 12, 19, 35, 55, 70. Negative ages are children.
    pub fn of(age: i32) -> Self {
        match age {
            i32::MIN..=12 => AgeBucket::Child,
            13..=19 => AgeBucket::Teenager,
            20..=35 => AgeBucket::YoungAdult,
            36..=55 => AgeBucket::MiddleAged,
            56..=70 => AgeBucket::Senior,
            _ => AgeBucket::Elderly,
        }
    }

    pub fn contains(self, age: i32) -> bool {
        Self::of(age) == self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgeBucket::Child => "child",
            AgeBucket::Teenager => "teenager",
            AgeBucket::YoungAdult => "young-adult",
            AgeBucket::MiddleAged => "middle-aged",
            AgeBucket::Senior => "senior",
            AgeBucket::Elderly => "elderly",
        }
    }

    /// Display label shown next to a generated photo.
    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Child => "Child",
            AgeBucket::Teenager => "Teenager",
            AgeBucket::YoungAdult => "Young Adult",
            AgeBucket::MiddleAged => "Middle-aged",
            AgeBucket::Senior => "Senior",
            AgeBucket::Elderly => "Elderly",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Catalog ────────────────────────────────────────────

const BUILTIN_PHOTOS: &[(AgeBucket, Gender, &[&str])] = &[
    (
        AgeBucket::Child,
        Gender::Male,
        &[
            "https://images.unsplash.com/photo-1649972904349-6e44c42644a7?w=400",
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400",
            "https://images.unsplash.com/photo-1568822617270-2c1579f8dfe2?w=400",
        ],
    ),
    (
        AgeBucket::Child,
        Gender::Female,
        &[
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400",
            "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400",
            "https://images.unsplash.com/photo-1518295751549-6b4b96c8ac2c?w=400",
        ],
    ),
    (
        AgeBucket::Teenager,
        Gender::Male,
        &[
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400",
            "https://images.unsplash.com/photo-1618077360395-f3068be8e001?w=400",
            "https://images.unsplash.com/photo-1568602471122-7832951cc4c5?w=400",
        ],
    ),
    (
        AgeBucket::Teenager,
        Gender::Female,
        &[
            "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400",
            "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400",
        ],
    ),
    (
        AgeBucket::YoungAdult,
        Gender::Male,
        &[
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400",
            "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400",
        ],
    ),
    (
        AgeBucket::YoungAdult,
        Gender::Female,
        &[
            "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400",
            "https://images.unsplash.com/photo-1517841905240-472988babdf9?w=400",
        ],
    ),
    (
        AgeBucket::MiddleAged,
        Gender::Male,
        &[
            "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400",
            "https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?w=400",
        ],
    ),
    (
        AgeBucket::MiddleAged,
        Gender::Female,
        &[
            "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400",
            "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?w=400",
            "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=400",
        ],
    ),
    (
        AgeBucket::Senior,
        Gender::Male,
        &[
            "https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?w=400",
            "https://images.unsplash.com/photo-1582750433449-648ed127bb54?w=400",
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400",
        ],
    ),
    (
        AgeBucket::Senior,
        Gender::Female,
        &[
            "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=400",
            "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?w=400",
            "https://images.unsplash.com/photo-1609220136736-443140cffec6?w=400",
        ],
    ),
    (
        AgeBucket::Elderly,
        Gender::Male,
        &[
            "https://images.unsplash.com/photo-1582750433449-648ed127bb54?w=400",
            "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400",
            "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=400",
        ],
    ),
    (
        AgeBucket::Elderly,
        Gender::Female,
        &[
            "https://images.unsplash.com/photo-1609220136736-443140cffec6?w=400",
            "https://images.unsplash.com/photo-1551836022-d5d88e9218df?w=400",
            "https://images.unsplash.com/photo-1594736797933-d0f06ba09f4b?w=400",
        ],
    ),
];

/// Read-only table of candidate photo URLs keyed by (bucket, gender).
///
/// Every stored list is non-empty and every gender has a middle-aged entry,
/// so [`PhotoCatalog::candidates`] never returns an empty slice.
#[derive(Debug, Clone)]
pub struct PhotoCatalog {
    entries: HashMap<(AgeBucket, Gender), Vec<String>>,
}

impl PhotoCatalog {
    pub fn new<I>(entries: I) -> Result<Self, PhotoError>
    where
        I: IntoIterator<Item = ((AgeBucket, Gender), Vec<String>)>,
    {
        let entries: HashMap<_, _> = entries.into_iter().collect();

        if let Some(((bucket, gender), _)) = entries.iter().find(|(_, list)| list.is_empty()) {
            return Err(PhotoError::EmptyCandidates {
                bucket: *bucket,
                gender: *gender,
            });
        }
        for gender in Gender::ALL {
            if !entries.contains_key(&(AgeBucket::MiddleAged, gender)) {
                return Err(PhotoError::MissingFallback(gender));
            }
        }

        Ok(Self { entries })
    }

    /// The process-wide built-in catalog, initialized on first use.
    pub fn builtin() -> Arc<PhotoCatalog> {
        static BUILTIN: OnceLock<Arc<PhotoCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let entries = BUILTIN_PHOTOS
                    .iter()
                    .map(|(bucket, gender, urls)| {
                        ((*bucket, *gender), urls.iter().map(|u| u.to_string()).collect())
                    })
                    .collect();
                Arc::new(PhotoCatalog { entries })
            })
            .clone()
    }

    /// Exact (bucket, gender) list, without fallback.
    pub fn get(&self, bucket: AgeBucket, gender: Gender) -> Option<&[String]> {
        self.entries.get(&(bucket, gender)).map(Vec::as_slice)
    }

    /// Candidate list for the pair, falling back to (middle-aged, gender).
    pub fn candidates(&self, bucket: AgeBucket, gender: Gender) -> &[String] {
        self.get(bucket, gender)
            .or_else(|| self.get(AgeBucket::MiddleAged, gender))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_split_exactly() {
        let cases = [
            (12, AgeBucket::Child),
            (13, AgeBucket::Teenager),
            (19, AgeBucket::Teenager),
            (20, AgeBucket::YoungAdult),
            (35, AgeBucket::YoungAdult),
            (36, AgeBucket::MiddleAged),
            (55, AgeBucket::MiddleAged),
            (56, AgeBucket::Senior),
            (70, AgeBucket::Senior),
            (71, AgeBucket::Elderly),
        ];
        for (age, bucket) in cases {
            assert_eq!(AgeBucket::of(age), bucket, "age {age}");
        }
    }

    #[test]
    fn negative_age_is_child() {
        assert_eq!(AgeBucket::of(-5), AgeBucket::Child);
        assert_eq!(AgeBucket::of(i32::MIN), AgeBucket::Child);
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = PhotoCatalog::builtin();
        assert_eq!(catalog.len(), 12);
        for bucket in AgeBucket::ALL {
            for gender in Gender::ALL {
                let list = catalog.get(bucket, gender).expect("pair present");
                assert_eq!(list.len(), 3);
            }
        }
        // Same validation a hand-built catalog gets.
        let rebuilt = PhotoCatalog::new(
            BUILTIN_PHOTOS.iter().map(|(b, g, urls)| {
                ((*b, *g), urls.iter().map(|u| u.to_string()).collect())
            }),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn missing_pair_falls_back_to_middle_aged() {
        let catalog = PhotoCatalog::new([
            ((AgeBucket::MiddleAged, Gender::Male), vec!["m".to_string()]),
            ((AgeBucket::MiddleAged, Gender::Female), vec!["f".to_string()]),
            ((AgeBucket::Child, Gender::Female), vec!["kid".to_string()]),
        ])
        .unwrap();
        assert_eq!(catalog.candidates(AgeBucket::Elderly, Gender::Male), ["m"]);
        assert_eq!(catalog.candidates(AgeBucket::Child, Gender::Male), ["m"]);
        assert_eq!(catalog.candidates(AgeBucket::Child, Gender::Female), ["kid"]);
    }

    #[test]
    fn catalog_without_fallback_is_rejected() {
        let err = PhotoCatalog::new([(
            (AgeBucket::MiddleAged, Gender::Male),
            vec!["m".to_string()],
        )])
        .unwrap_err();
        assert_eq!(err, PhotoError::MissingFallback(Gender::Female));
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = PhotoCatalog::new([
            ((AgeBucket::MiddleAged, Gender::Male), vec!["m".to_string()]),
            ((AgeBucket::MiddleAged, Gender::Female), vec!["f".to_string()]),
            ((AgeBucket::Senior, Gender::Male), vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, PhotoError::EmptyCandidates { .. }));
    }

    #[test]
    fn profile_serde_defaults_ethnicity() {
        let p: PersonProfile = serde_json::from_str(r#"{"age":45,"gender":"female"}"#).unwrap();
        assert_eq!(p.ethnicity, Ethnicity::Mixed);
        assert_eq!(p.bucket(), AgeBucket::MiddleAged);
        assert_eq!(serde_json::to_string(&AgeBucket::YoungAdult).unwrap(), "\"young-adult\"");
    }

    proptest! {
        #[test]
        fn buckets_partition_ages(age in 0i32..=200) {
            let hits = AgeBucket::ALL.iter().filter(|b| b.contains(age)).count();
            prop_assert_eq!(hits, 1);
        }

        #[test]
        fn buckets_are_monotonic(a in -50i32..=250, b in -50i32..=250) {
            if a <= b {
                prop_assert!(AgeBucket::of(a) <= AgeBucket::of(b));
            }
        }
    }
}
