use serde::Serialize;
use tracing::{debug, warn};

use super::phrases::PhraseDictionary;
use super::remote::RemoteTranslator;
use crate::error::ResolveError;
use crate::model::history::TranslationSource;
use crate::model::language::Language;

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub translation: String,
    pub source: TranslationSource,
    /// Set for online results: the caller may offer to keep the pair in the dictionary.
    pub offer_save: bool,
}

/// Dictionary first, remote translator on a miss.
pub struct Resolver {
    remote: Box<dyn RemoteTranslator>,
}

impl Resolver {
    pub fn new(remote: Box<dyn RemoteTranslator>) -> Self {
        Self { remote }
    }

    /// `Ok(None)` means the online lookup failed. The dictionary is never modified here.
    pub fn resolve(
        &self,
        phrases: &PhraseDictionary,
        text: &str,
        target: Language,
    ) -> Result<Option<Resolution>, ResolveError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ResolveError::EmptyText);
        }

        if let Some(hit) = phrases.lookup(text) {
            debug!(target_lang = target.code(), "dictionary hit");
            return Ok(Some(Resolution {
                text: text.to_string(),
                translation: hit.to_string(),
                source: TranslationSource::Local,
                offer_save: false,
            }));
        }

        match self.remote.translate(text, target.opposite(), target) {
            Ok(translation) => Ok(Some(Resolution {
                text: text.to_string(),
                translation,
                source: TranslationSource::Online,
                offer_save: true,
            })),
            Err(e) => {
                warn!(target_lang = target.code(), error = %e, "online translation failed");
                Ok(None)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeRemote;
    use super::*;

    #[test]
    fn test_dictionary_hit_skips_network() {
        let remote = FakeRemote::answering("unused");
        let resolver = Resolver::new(Box::new(remote.clone()));
        let mut phrases = PhraseDictionary::default();
        phrases.insert("кот", "cat");

        let r = resolver.resolve(&phrases, "кот", Language::En).unwrap().unwrap();

        assert_eq!(r.translation, "cat");
        assert_eq!(r.source, TranslationSource::Local);
        assert!(!r.offer_save);
        assert_eq!(remote.call_count(), 0);
    }

    #[test]
    fn test_input_is_trimmed_before_lookup() {
        let remote = FakeRemote::failing();
        let resolver = Resolver::new(Box::new(remote.clone()));
        let mut phrases = PhraseDictionary::default();
        phrases.insert("dog", "собака");

        let r = resolver.resolve(&phrases, "  dog\n", Language::Ru).unwrap().unwrap();
        assert_eq!(r.text, "dog");
        assert_eq!(r.translation, "собака");
        assert_eq!(remote.call_count(), 0);
    }

    #[test]
    fn test_miss_goes_online_once() {
        let remote = FakeRemote::answering("дом");
        let resolver = Resolver::new(Box::new(remote.clone()));
        let phrases = PhraseDictionary::default();

        let r = resolver.resolve(&phrases, "house", Language::Ru).unwrap().unwrap();

        assert_eq!(r.translation, "дом");
        assert_eq!(r.source, TranslationSource::Online);
        assert!(r.offer_save);

        let calls = remote.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("house".to_string(), Language::En, Language::Ru));
        assert!(phrases.is_empty());
    }

    #[test]
    fn test_failed_lookup_is_absent_and_pure() {
        let remote = FakeRemote::failing();
        let resolver = Resolver::new(Box::new(remote.clone()));
        let mut phrases = PhraseDictionary::default();
        phrases.insert("sun", "солнце");

        let r = resolver.resolve(&phrases, "moon", Language::Ru).unwrap();

        assert!(r.is_none());
        assert_eq!(remote.call_count(), 1);
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases.lookup("moon"), None);
    }

    #[test]
    fn test_empty_text_rejected_before_lookup() {
        let remote = FakeRemote::answering("x");
        let resolver = Resolver::new(Box::new(remote.clone()));
        let mut phrases = PhraseDictionary::default();
        phrases.insert("", "empty key");

        assert_eq!(
            resolver.resolve(&phrases, "   ", Language::En),
            Err(ResolveError::EmptyText)
        );
        assert_eq!(remote.call_count(), 0);
    }
}
