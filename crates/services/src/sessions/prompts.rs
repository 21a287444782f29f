use speech::RecognitionError;
use zoo_core::model::Animal;

/// Spoken copy for one session mode.
///
/// Templates may reference `{name}` and `{sound}`; `fill` substitutes the
/// current animal. Strings live here rather than in the UI because they are
/// spoken, not rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    instruction: String,
    listening: String,
    success: String,
    retry: String,
    skip: String,
    unsupported: String,
    permission_denied: String,
    no_speech: String,
    other_error: String,
}

impl Prompts {
    /// Free practice: invitation to play and speak at leisure.
    #[must_use]
    pub fn practice() -> Self {
        Self {
            instruction: "Listen to the sound. What animal is it?".to_owned(),
            listening: "Say {name} into your microphone!".to_owned(),
            success: "Great job! It's the {name}!".to_owned(),
            retry: "Not quite. Press play and try again!".to_owned(),
            skip: "Okay, it was the {name}.".to_owned(),
            unsupported: "Voice play is not available here, but you can still practice out loud!"
                .to_owned(),
            permission_denied: "I need the microphone to hear you. Try again when it's on!"
                .to_owned(),
            no_speech: "I didn't hear anything. Say it loud and clear!".to_owned(),
            other_error: "Something went wrong with listening. Let's try again!".to_owned(),
        }
    }

    /// Guided slideshow: narrated tour, no questions asked.
    #[must_use]
    pub fn slideshow() -> Self {
        Self {
            instruction: "The {name} says {sound}!".to_owned(),
            listening: String::new(),
            success: String::new(),
            retry: String::new(),
            skip: String::new(),
            unsupported: "Voice play is not available here.".to_owned(),
            permission_denied: String::new(),
            no_speech: String::new(),
            other_error: String::new(),
        }
    }

    /// Oral exam: tighter copy, and a hint about the escape word.
    #[must_use]
    pub fn exam() -> Self {
        Self {
            instruction: "Question time! Listen closely. What animal makes this sound?".to_owned(),
            listening: "Which animal is it? Say the name now!".to_owned(),
            success: "Correct! It's the {name}!".to_owned(),
            retry: "Hmm, not that one. Listen one more time!".to_owned(),
            skip: "Okay, moving on. It was the {name}.".to_owned(),
            unsupported: "Voice answers are not available here, so this one counts as a retry."
                .to_owned(),
            permission_denied: "I can't hear you without the microphone. Let's try again!"
                .to_owned(),
            no_speech: "I didn't hear an answer. Say the animal's name!".to_owned(),
            other_error: "Listening went wrong. Let's try that question again!".to_owned(),
        }
    }

    #[must_use]
    pub fn instruction(&self, animal: &Animal) -> String {
        fill(&self.instruction, animal)
    }

    #[must_use]
    pub fn listening(&self, animal: &Animal) -> String {
        fill(&self.listening, animal)
    }

    #[must_use]
    pub fn success(&self, animal: &Animal) -> String {
        fill(&self.success, animal)
    }

    #[must_use]
    pub fn retry(&self) -> String {
        self.retry.clone()
    }

    #[must_use]
    pub fn skip(&self, animal: &Animal) -> String {
        fill(&self.skip, animal)
    }

    /// The spoken message for an absorbed recognition failure.
    #[must_use]
    pub fn recognition_error(&self, error: &RecognitionError) -> String {
        match error {
            RecognitionError::Unsupported => self.unsupported.clone(),
            RecognitionError::PermissionDenied => self.permission_denied.clone(),
            RecognitionError::NoSpeech => self.no_speech.clone(),
            _ => self.other_error.clone(),
        }
    }
}

fn fill(template: &str, animal: &Animal) -> String {
    template
        .replace("{name}", animal.name())
        .replace("{sound}", animal.sound())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use zoo_core::model::ClipRef;

    fn cow() -> Animal {
        let clip = ClipRef::from_file("cow.mp3").unwrap();
        Animal::new("Cow", "moo", "🐄", clip).unwrap()
    }

    #[test]
    fn templates_substitute_name_and_sound() {
        let prompts = Prompts::slideshow();
        assert_eq!(prompts.instruction(&cow()), "The Cow says moo!");

        let prompts = Prompts::practice();
        assert_eq!(prompts.listening(&cow()), "Say Cow into your microphone!");
    }

    #[test]
    fn every_error_code_has_a_spoken_message_in_exam_mode() {
        let prompts = Prompts::exam();
        for error in [
            RecognitionError::Unsupported,
            RecognitionError::PermissionDenied,
            RecognitionError::NoSpeech,
            RecognitionError::Other("boom".to_owned()),
        ] {
            assert!(!prompts.recognition_error(&error).is_empty());
        }
    }
}
