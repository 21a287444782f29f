use std::time::Duration;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("announce rate must be in (0.25, 4.0]")]
    InvalidAnnounceRate,

    #[error("announce estimate must be between 200ms and 10s")]
    InvalidAnnounceEstimate,

    #[error("audio fallback duration must be between 200ms and 60s")]
    InvalidAudioFallback,

    #[error("retry cap must be > 0 when set")]
    InvalidRetryCap,

    #[error("recognizer locale cannot be empty")]
    EmptyLocale,

    #[error("max alternatives must be > 0")]
    InvalidMaxAlternatives,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunables for one session mode.
///
/// The three mode constructors encode the shipped behavior; `new` exists for
/// callers that need a custom profile and validates every knob.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    announce_rate: f32,
    announce_estimate: Duration,
    audio_fallback: Duration,
    inter_item_pause: Duration,
    advance_delay: Duration,
    retry_cap: Option<u32>,
    recognition_enabled: bool,
    locale: String,
    interim_results: bool,
    max_alternatives: u8,
}

impl SessionSettings {
    /// Free practice: manual buttons, unlimited attempts, recognition on.
    #[must_use]
    pub fn default_for_practice() -> Self {
        Self {
            announce_rate: 0.9,
            announce_estimate: Duration::from_millis(1_500),
            audio_fallback: Duration::from_secs(2),
            inter_item_pause: Duration::ZERO,
            advance_delay: Duration::ZERO,
            retry_cap: None,
            recognition_enabled: true,
            locale: "en-US".to_owned(),
            interim_results: false,
            max_alternatives: 1,
        }
    }

    /// Guided slideshow: no recognition, 2s pause between animals.
    #[must_use]
    pub fn default_for_slideshow() -> Self {
        Self {
            announce_rate: 0.9,
            announce_estimate: Duration::from_millis(1_800),
            audio_fallback: Duration::from_secs(2),
            inter_item_pause: Duration::from_secs(2),
            advance_delay: Duration::ZERO,
            retry_cap: None,
            recognition_enabled: false,
            locale: "en-US".to_owned(),
            interim_results: false,
            max_alternatives: 1,
        }
    }

    /// Oral exam: recognition required, three attempts, 1.8s advance delay.
    #[must_use]
    pub fn default_for_exam() -> Self {
        Self {
            announce_rate: 0.9,
            announce_estimate: Duration::from_millis(1_500),
            audio_fallback: Duration::from_secs(2),
            inter_item_pause: Duration::ZERO,
            advance_delay: Duration::from_millis(1_800),
            retry_cap: Some(3),
            recognition_enabled: true,
            locale: "en-US".to_owned(),
            interim_results: false,
            max_alternatives: 1,
        }
    }

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` for any out-of-range knob.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        announce_rate: f32,
        announce_estimate: Duration,
        audio_fallback: Duration,
        inter_item_pause: Duration,
        advance_delay: Duration,
        retry_cap: Option<u32>,
        recognition_enabled: bool,
        locale: impl Into<String>,
        interim_results: bool,
        max_alternatives: u8,
    ) -> Result<Self, SettingsError> {
        if !(announce_rate > 0.25 && announce_rate <= 4.0) {
            return Err(SettingsError::InvalidAnnounceRate);
        }
        if announce_estimate < Duration::from_millis(200)
            || announce_estimate > Duration::from_secs(10)
        {
            return Err(SettingsError::InvalidAnnounceEstimate);
        }
        if audio_fallback < Duration::from_millis(200) || audio_fallback > Duration::from_secs(60)
        {
            return Err(SettingsError::InvalidAudioFallback);
        }
        if retry_cap == Some(0) {
            return Err(SettingsError::InvalidRetryCap);
        }
        let locale = locale.into();
        if locale.trim().is_empty() {
            return Err(SettingsError::EmptyLocale);
        }
        if max_alternatives == 0 {
            return Err(SettingsError::InvalidMaxAlternatives);
        }

        Ok(Self {
            announce_rate,
            announce_estimate,
            audio_fallback,
            inter_item_pause,
            advance_delay,
            retry_cap,
            recognition_enabled,
            locale,
            interim_results,
            max_alternatives,
        })
    }

    /// Same settings with a different recognizer locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Same settings with a different announcement rate.
    #[must_use]
    pub fn with_announce_rate(mut self, rate: f32) -> Self {
        self.announce_rate = rate;
        self
    }

    #[must_use]
    pub fn announce_rate(&self) -> f32 {
        self.announce_rate
    }

    #[must_use]
    pub fn announce_estimate(&self) -> Duration {
        self.announce_estimate
    }

    #[must_use]
    pub fn audio_fallback(&self) -> Duration {
        self.audio_fallback
    }

    #[must_use]
    pub fn inter_item_pause(&self) -> Duration {
        self.inter_item_pause
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    #[must_use]
    pub fn retry_cap(&self) -> Option<u32> {
        self.retry_cap
    }

    #[must_use]
    pub fn recognition_enabled(&self) -> bool {
        self.recognition_enabled
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn interim_results(&self) -> bool {
        self.interim_results
    }

    #[must_use]
    pub fn max_alternatives(&self) -> u8 {
        self.max_alternatives
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_match_shipped_behavior() {
        let practice = SessionSettings::default_for_practice();
        assert!(practice.recognition_enabled());
        assert_eq!(practice.retry_cap(), None);

        let slideshow = SessionSettings::default_for_slideshow();
        assert!(!slideshow.recognition_enabled());
        assert_eq!(slideshow.inter_item_pause(), Duration::from_secs(2));

        let exam = SessionSettings::default_for_exam();
        assert_eq!(exam.retry_cap(), Some(3));
        assert_eq!(exam.advance_delay(), Duration::from_millis(1_800));
        assert!(!exam.interim_results());
        assert_eq!(exam.max_alternatives(), 1);
    }

    #[test]
    fn zero_retry_cap_is_rejected() {
        let err = SessionSettings::new(
            1.0,
            Duration::from_millis(1_500),
            Duration::from_secs(2),
            Duration::ZERO,
            Duration::ZERO,
            Some(0),
            true,
            "en-US",
            false,
            1,
        )
        .unwrap_err();
        assert_eq!(err, SettingsError::InvalidRetryCap);
    }

    #[test]
    fn blank_locale_is_rejected() {
        let err = SessionSettings::new(
            1.0,
            Duration::from_millis(1_500),
            Duration::from_secs(2),
            Duration::ZERO,
            Duration::ZERO,
            None,
            true,
            " ",
            false,
            1,
        )
        .unwrap_err();
        assert_eq!(err, SettingsError::EmptyLocale);
    }
}
