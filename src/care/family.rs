use serde::{Deserialize, Serialize};

use super::CareError;
use crate::photo::PhotoSelector;
use crate::utils::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub photo: String,
    pub age: i32,
    pub birthday: String,
    pub phone: Option<String>,
    pub notes: String,
    pub last_contact: Option<String>,
}

/// Partial edit from the member editor; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FamilyUpdate {
    pub name: Option<String>,
    pub relationship: Option<String>,
    /// An uploaded photo wins over automatic re-selection.
    pub photo: Option<String>,
    pub age: Option<i32>,
    pub birthday: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub last_contact: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FamilyDirectory {
    members: Vec<FamilyMember>,
}

struct Seed {
    id: &'static str,
    name: &'static str,
    relationship: &'static str,
    age: i32,
    birthday: &'static str,
    phone: Option<&'static str>,
    notes: &'static str,
    last_contact: &'static str,
}

const SAMPLE_FAMILY: &[Seed] = &[
    Seed {
        id: "1",
        name: "Priya Sharma",
        relationship: "Daughter",
        age: 45,
        birthday: "March 15",
        phone: Some("+91 98765 43210"),
        notes: "Lives in Mumbai, works as a teacher. Loves gardening and classical music.",
        last_contact: "Yesterday",
    },
    Seed {
        id: "2",
        name: "Arjun Sharma",
        relationship: "Son",
        age: 42,
        birthday: "July 22",
        phone: Some("+91 98765 43211"),
        notes: "Lives nearby, has two kids - Ananya and Rohan. Software engineer at Tech Mahindra.",
        last_contact: "3 days ago",
    },
    Seed {
        id: "3",
        name: "Ananya Sharma",
        relationship: "Granddaughter",
        age: 12,
        birthday: "September 8",
        phone: None,
        notes: "Arjun's daughter. Loves cricket and Bharatanatyam dance. In 7th grade.",
        last_contact: "Last week",
    },
    Seed {
        id: "4",
        name: "Rohan Sharma",
        relationship: "Grandson",
        age: 9,
        birthday: "December 3",
        phone: None,
        notes: "Arjun's son. Loves cricket and playing tabla. In 4th grade.",
        last_contact: "Last week",
    },
    Seed {
        id: "5",
        name: "Kamala Patel",
        relationship: "Sister",
        age: 78,
        birthday: "May 10",
        phone: Some("+91 98765 43212"),
        notes: "Lives in Pune. Retired nurse from KEM Hospital. Calls every Sunday.",
        last_contact: "Sunday",
    },
];

impl FamilyDirectory {
    pub fn new(members: Vec<FamilyMember>) -> Self {
        Self { members }
    }

    /// Sample family with photos matched to each member's age and name.
    pub fn sample<R: RandomSource>(selector: &mut PhotoSelector<R>) -> Self {
        Self::new(
            SAMPLE_FAMILY
                .iter()
                .map(|s| FamilyMember {
                    id: s.id.to_string(),
                    name: s.name.to_string(),
                    relationship: s.relationship.to_string(),
                    photo: selector.photo_for_person(s.name, s.age),
                    age: s.age,
                    birthday: s.birthday.to_string(),
                    phone: s.phone.map(str::to_string),
                    notes: s.notes.to_string(),
                    last_contact: Some(s.last_contact.to_string()),
                })
                .collect(),
        )
    }

    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    pub fn get(&self, id: &str) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.id == id)
    }

    fn require(&self, id: &str) -> Result<&FamilyMember, CareError> {
        self.get(id)
            .ok_or_else(|| CareError::UnknownFamilyMember(id.to_string()))
    }

    /// Apply an edit in place. A new name or age re-selects the photo unless
    /// the edit carries its own.
    ///
    /// The web editor sent every field on save and so always regenerated the
    /// photo; here an uploaded photo is kept and untouched fields stay as they are.
    pub fn update<R: RandomSource>(
        &mut self,
        id: &str,
        update: FamilyUpdate,
        selector: &mut PhotoSelector<R>,
    ) -> Result<&FamilyMember, CareError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CareError::UnknownFamilyMember(id.to_string()))?;

        let reselect = (update.name.is_some() || update.age.is_some()) && update.photo.is_none();

        if let Some(name) = update.name {
            member.name = name;
        }
        if let Some(relationship) = update.relationship {
            member.relationship = relationship;
        }
        if let Some(photo) = update.photo {
            member.photo = photo;
        }
        if let Some(age) = update.age {
            member.age = age;
        }
        if let Some(birthday) = update.birthday {
            member.birthday = birthday;
        }
        if let Some(phone) = update.phone {
            member.phone = Some(phone).filter(|p| !p.is_empty());
        }
        if let Some(notes) = update.notes {
            member.notes = notes;
        }
        if let Some(last_contact) = update.last_contact {
            member.last_contact = Some(last_contact).filter(|c| !c.is_empty());
        }

        if reselect {
            member.photo = selector.photo_for_person(&member.name, member.age);
        }
        tracing::info!(member = %member.name, reselect, "family member updated");
        Ok(&*member)
    }

    /// Spoken introduction of a family member.
    pub fn describe(&self, id: &str) -> Result<String, CareError> {
        let m = self.require(id)?;
        let mut text = format!(
            "This is {}, your {}. {} Their birthday is {}.",
            m.name, m.relationship, m.notes, m.birthday
        );
        if let Some(last) = &m.last_contact {
            text.push_str(&format!(" You last spoke {}.", last));
        }
        Ok(text)
    }

    /// Spoken call announcement; `None` when no phone number is stored.
    pub fn call_announcement(&self, id: &str) -> Result<Option<String>, CareError> {
        let m = self.require(id)?;
        Ok(m
            .phone
            .as_ref()
            .map(|phone| format!("Calling {} at {}", m.name, phone)))
    }
}
