use serde::{Deserialize, Serialize};

use crate::model::animal::{Animal, AnimalError, Roster};
use crate::model::clip::ClipRef;

/// Serialized shape for one roster entry.
///
/// This mirrors the domain `Animal` so a custom roster file can be
/// deserialized without leaking file-format concerns into the domain layer.
/// `audio` holds either a file path or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub name: String,
    pub sound: String,
    #[serde(default)]
    pub emoji: String,
    pub audio: String,
}

impl AnimalRecord {
    #[must_use]
    pub fn from_animal(animal: &Animal) -> Self {
        Self {
            name: animal.name().to_owned(),
            sound: animal.sound().to_owned(),
            emoji: animal.emoji().to_owned(),
            audio: animal.clip().describe(),
        }
    }

    /// Convert the record back into a domain `Animal`.
    ///
    /// # Errors
    ///
    /// Returns `AnimalError` if any field fails validation.
    pub fn into_animal(self) -> Result<Animal, AnimalError> {
        let clip = if self.audio.starts_with("http://") || self.audio.starts_with("https://") {
            ClipRef::from_url(&self.audio)?
        } else {
            ClipRef::from_file(&self.audio)?
        };
        Animal::new(self.name, self.sound, self.emoji, clip)
    }
}

/// Build a roster from deserialized records, failing on the first bad entry.
///
/// # Errors
///
/// Returns `AnimalError` for the first record that fails validation.
pub fn roster_from_records(records: Vec<AnimalRecord>) -> Result<Roster, AnimalError> {
    let animals = records
        .into_iter()
        .map(AnimalRecord::into_animal)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Roster::new(animals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips_through_domain() {
        let record = AnimalRecord {
            name: "Cow".to_owned(),
            sound: "moo".to_owned(),
            emoji: "🐄".to_owned(),
            audio: "audios/animals/cow.mp3".to_owned(),
        };

        let animal = record.clone().into_animal().unwrap();
        assert_eq!(AnimalRecord::from_animal(&animal), record);
    }

    #[test]
    fn url_audio_becomes_url_clip() {
        let record = AnimalRecord {
            name: "Lion".to_owned(),
            sound: "roar".to_owned(),
            emoji: String::new(),
            audio: "https://example.org/lion.mp3".to_owned(),
        };

        let animal = record.into_animal().unwrap();
        assert!(animal.clip().as_url().is_some());
    }

    #[test]
    fn bad_record_fails_roster_build() {
        let records = vec![AnimalRecord {
            name: String::new(),
            sound: "moo".to_owned(),
            emoji: String::new(),
            audio: "cow.mp3".to_owned(),
        }];
        assert!(roster_from_records(records).is_err());
    }
}
