//! Language detection and hint resolution

use thiserror::Error;
use whatlang::{Detector, Lang};

/// Language used when no hint is given and detection is inconclusive
pub const DEFAULT_LANGUAGE: &str = "es";

/// Detection could not settle on a language
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionFailure {
    /// Nothing to detect from
    #[error("no text to detect language from")]
    EmptyInput,

    /// The text carries no recognisable language signal
    #[error("language could not be determined")]
    Undetectable,

    /// A candidate was found but with too little confidence
    #[error("ambiguous language (best guess {candidate})")]
    Ambiguous { candidate: String },
}

/// Produces a best-guess language code for a piece of text
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `text`
    ///
    /// # Errors
    ///
    /// Returns [`DetectionFailure`] if the input is empty or inconclusive
    fn detect(&self, text: &str) -> Result<String, DetectionFailure>;
}

/// Languages the detector chooses between
pub const CANDIDATE_LANGUAGES: [Lang; 3] = [Lang::Spa, Lang::Eng, Lang::Fra];

/// Trigram-based detector backed by `whatlang`
#[derive(Debug, Clone, Copy)]
pub struct WhatlangDetector {
    min_confidence: f64,
}

impl WhatlangDetector {
    /// Confidence below which a guess counts as ambiguous
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.25;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_confidence: Self::DEFAULT_MIN_CONFIDENCE,
        }
    }

    /// Override the minimum confidence (clamped to `0.0..=1.0`)
    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence.clamp(0.0, 1.0);
        self
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<String, DetectionFailure> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DetectionFailure::EmptyInput);
        }

        let info = Detector::with_allowlist(CANDIDATE_LANGUAGES.to_vec())
            .detect(text)
            .ok_or(DetectionFailure::Undetectable)?;
        let code = iso_639_1(info.lang());

        if info.confidence() < self.min_confidence {
            return Err(DetectionFailure::Ambiguous {
                candidate: code.to_string(),
            });
        }

        Ok(code.to_string())
    }
}

/// Two-letter code for common languages, ISO 639-3 otherwise
fn iso_639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Spa => "es",
        Lang::Eng => "en",
        Lang::Fra => "fr",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Deu => "de",
        Lang::Nld => "nl",
        Lang::Cat => "ca",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        other => other.code(),
    }
}

/// Where a resolved language came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    /// Caller-supplied hint
    Hint,
    /// Detected from the text
    Detected,
    /// Detection failed and the default was substituted
    Fallback,
}

/// Language chosen for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLanguage {
    pub code: String,
    pub source: LanguageSource,
}

/// Resolve the response language: hint, then detection, then [`DEFAULT_LANGUAGE`]
///
/// Blank hints count as absent. Detection failure never propagates.
pub fn resolve_language(
    hint: Option<&str>,
    text: &str,
    detector: &dyn LanguageDetector,
) -> ResolvedLanguage {
    if let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) {
        return ResolvedLanguage {
            code: hint.to_string(),
            source: LanguageSource::Hint,
        };
    }

    match detector.detect(text) {
        Ok(code) => ResolvedLanguage {
            code,
            source: LanguageSource::Detected,
        },
        Err(e) => {
            tracing::warn!(error = %e, fallback = DEFAULT_LANGUAGE, "language detection failed");
            ResolvedLanguage {
                code: DEFAULT_LANGUAGE.to_string(),
                source: LanguageSource::Fallback,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<&'static str, DetectionFailure>);

    impl LanguageDetector for Fixed {
        fn detect(&self, _text: &str) -> Result<String, DetectionFailure> {
            self.0.clone().map(ToString::to_string)
        }
    }

    #[test]
    fn detects_spanish() {
        let detector = WhatlangDetector::new();
        let code = detector
            .detect(
                "¿Cuál es la tasa del impuesto sobre la transferencia de bienes industrializados y \
                 servicios en la República Dominicana y quiénes están obligados a pagarlo cada mes?",
            )
            .unwrap();
        assert_eq!(code, "es");
    }

    #[test]
    fn detects_english() {
        let detector = WhatlangDetector::new();
        let code = detector
            .detect(
                "What is the current rate of the tax on the transfer of industrialized goods and \
                 services in the Dominican Republic, and who is required to file the monthly return?",
            )
            .unwrap();
        assert_eq!(code, "en");
    }

    #[test]
    fn short_english_question_is_not_portuguese() {
        let detector = WhatlangDetector::new().with_min_confidence(0.0);
        assert_eq!(detector.detect("How do I register my company?").unwrap(), "en");
    }

    #[test]
    fn only_candidate_languages_are_reported() {
        let detector = WhatlangDetector::new().with_min_confidence(0.0);
        let code = detector
            .detect("Como faço para registrar minha empresa no Brasil e pagar os impostos?")
            .unwrap();
        assert!(["es", "en", "fr"].contains(&code.as_str()), "{code}");
    }

    #[test]
    fn min_confidence_is_clamped() {
        assert!((WhatlangDetector::new().with_min_confidence(7.5).min_confidence - 1.0).abs() < f64::EPSILON);
        assert!(WhatlangDetector::new().with_min_confidence(-1.0).min_confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_fails() {
        let detector = WhatlangDetector::new();
        assert_eq!(detector.detect("   "), Err(DetectionFailure::EmptyInput));
    }

    #[test]
    fn digits_only_fail() {
        let detector = WhatlangDetector::new();
        assert!(detector.detect("1234 5678 90").is_err());
    }

    #[test]
    fn hint_wins_over_detection() {
        let resolved = resolve_language(Some("en"), "texto en español", &Fixed(Ok("es")));
        assert_eq!(resolved.code, "en");
        assert_eq!(resolved.source, LanguageSource::Hint);
    }

    #[test]
    fn blank_hint_is_ignored() {
        let resolved = resolve_language(Some("  "), "some text", &Fixed(Ok("fr")));
        assert_eq!(resolved.code, "fr");
        assert_eq!(resolved.source, LanguageSource::Detected);
    }

    #[test]
    fn detection_failure_falls_back_to_spanish() {
        let resolved = resolve_language(None, "42", &Fixed(Err(DetectionFailure::Undetectable)));
        assert_eq!(resolved.code, DEFAULT_LANGUAGE);
        assert_eq!(resolved.source, LanguageSource::Fallback);
    }
}
