use thiserror::Error;

use crate::model::clip::{ClipError, ClipRef};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnimalError {
    #[error("animal name cannot be empty")]
    EmptyName,

    #[error("animal sound cannot be empty")]
    EmptySound,

    #[error(transparent)]
    Clip(#[from] ClipError),
}

//
// ─── ANIMAL ────────────────────────────────────────────────────────────────────
//

/// One entry in the learning roster: a name to say, a sound word to hear,
/// an emoji to show, and the clip to play.
///
/// Entries are immutable once constructed. `name` doubles as the list key;
/// uniqueness is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    name: String,
    sound: String,
    emoji: String,
    clip: ClipRef,
}

impl Animal {
    /// # Errors
    ///
    /// Returns `AnimalError` when name or sound is blank.
    pub fn new(
        name: impl Into<String>,
        sound: impl Into<String>,
        emoji: impl Into<String>,
        clip: ClipRef,
    ) -> Result<Self, AnimalError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AnimalError::EmptyName);
        }
        let sound = sound.into();
        if sound.trim().is_empty() {
            return Err(AnimalError::EmptySound);
        }
        Ok(Self {
            name,
            sound,
            emoji: emoji.into(),
            clip,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sound(&self) -> &str {
        &self.sound
    }

    #[must_use]
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    #[must_use]
    pub fn clip(&self) -> &ClipRef {
        &self.clip
    }
}

//
// ─── ROSTER ────────────────────────────────────────────────────────────────────
//

/// The fixed list of animals a session walks through, loaded once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    animals: Vec<Animal>,
}

impl Roster {
    #[must_use]
    pub fn new(animals: Vec<Animal>) -> Self {
        Self { animals }
    }

    /// The ten animals the app ships with.
    ///
    /// # Panics
    ///
    /// Panics only if the built-in table is malformed, which is a programming
    /// error caught by tests.
    #[must_use]
    pub fn builtin() -> Self {
        const TABLE: [(&str, &str, &str, &str); 10] = [
            ("Lion", "roar", "🦁", "audios/animals/lion.mp3"),
            ("Elephant", "trumpet", "🐘", "audios/animals/elephant.mp3"),
            ("Monkey", "chatter", "🐵", "audios/animals/monkey.mp3"),
            ("Cow", "moo", "🐄", "audios/animals/cow.mp3"),
            ("Cat", "meow", "🐱", "audios/animals/cat.mp3"),
            ("Dog", "bark", "🐶", "audios/animals/dog.mp3"),
            ("Bear", "growl", "🐻", "audios/animals/bear.mp3"),
            ("Frog", "croak", "🐸", "audios/animals/frog.mp3"),
            ("Mouse", "squeak", "🐭", "audios/animals/mouse.mp3"),
            ("Chicken", "cluck", "🐔", "audios/animals/chicken.mp3"),
        ];

        let animals = TABLE
            .iter()
            .map(|(name, sound, emoji, clip)| {
                let clip = ClipRef::from_file(*clip).expect("builtin clip path");
                Animal::new(*name, *sound, *emoji, clip).expect("builtin animal entry")
            })
            .collect();
        Self { animals }
    }

    #[must_use]
    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Animal> {
        self.animals.get(index)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let clip = ClipRef::from_file("cow.mp3").unwrap();
        let err = Animal::new("  ", "moo", "🐄", clip).unwrap_err();
        assert_eq!(err, AnimalError::EmptyName);
    }

    #[test]
    fn blank_sound_is_rejected() {
        let clip = ClipRef::from_file("cow.mp3").unwrap();
        let err = Animal::new("Cow", "", "🐄", clip).unwrap_err();
        assert_eq!(err, AnimalError::EmptySound);
    }

    #[test]
    fn builtin_roster_has_ten_entries() {
        let roster = Roster::builtin();
        assert_eq!(roster.len(), 10);
        assert_eq!(roster.get(0).unwrap().name(), "Lion");
        assert_eq!(roster.get(9).unwrap().sound(), "cluck");
    }
}
