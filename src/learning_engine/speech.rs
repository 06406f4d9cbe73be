//! Pronunciation playback.
//!
//! [`SpeechService`] is an explicit object with an `open`/`close` lifecycle
//! that views receive by injection. Requests are fire-and-forget: each new
//! utterance cancels whatever is still playing, nothing is queued.

use tracing::{debug, info};

pub const DEFAULT_LANG: &str = "th-TH";
pub const DEFAULT_RATE: f32 = 0.9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    pub lang: String,
    pub rate: f32,
}

/// Something that can actually produce speech.
pub trait SpeechBackend {
    fn voices(&self) -> Vec<Voice>;
    fn speak(&mut self, utterance: &Utterance);
    fn cancel(&mut self);
}

/// Best voice for Thai: exact `th-TH`, then any `th*`, then whatever is first.
pub fn pick_voice(voices: &[Voice]) -> Option<&Voice> {
    voices
        .iter()
        .find(|v| v.lang.eq_ignore_ascii_case(DEFAULT_LANG))
        .or_else(|| voices.iter().find(|v| v.lang.to_ascii_lowercase().starts_with("th")))
        .or_else(|| voices.first())
}

pub struct SpeechService<B: SpeechBackend> {
    backend: B,
    rate: f32,
    open: bool,
    voice: Option<Voice>,
}

impl<B: SpeechBackend> SpeechService<B> {
    pub fn new(backend: B, rate: f32) -> Self {
        SpeechService { backend, rate, open: false, voice: None }
    }

    /// Load the voice list and pick a voice. Idempotent.
    pub fn open(&mut self) {
        if self.open {
            return;
        }
        let voices = self.backend.voices();
        self.voice = pick_voice(&voices).cloned();
        self.open = true;
        debug!(voices = voices.len(), voice = self.voice.as_ref().map(|v| v.name.as_str()), "speech opened");
    }

    /// Stop anything in flight and release the backend.
    pub fn close(&mut self) {
        if self.open {
            self.backend.cancel();
            self.open = false;
            debug!("speech closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Speak `text`, cancelling the previous utterance. No-op while closed.
    pub fn speak(&mut self, text: &str) {
        if !self.open {
            info!(text, "speech requested while closed, ignoring");
            return;
        }
        let lang = self
            .voice
            .as_ref()
            .map(|v| v.lang.clone())
            .unwrap_or_else(|| DEFAULT_LANG.to_string());
        let utterance = Utterance {
            text: text.to_string(),
            voice: self.voice.clone(),
            lang,
            rate: self.rate,
        };
        self.backend.cancel();
        self.backend.speak(&utterance);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SpeechBackend> Drop for SpeechService<B> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Terminal backend: no audio, the utterance is written to the log.
#[derive(Debug, Default)]
pub struct LogBackend;

impl SpeechBackend for LogBackend {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, utterance: &Utterance) {
        info!(text = %utterance.text, lang = %utterance.lang, rate = utterance.rate, "speak");
    }

    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        voices: Vec<Voice>,
        spoken: Vec<Utterance>,
        cancels: usize,
    }

    impl SpeechBackend for Recorder {
        fn voices(&self) -> Vec<Voice> {
            self.voices.clone()
        }
        fn speak(&mut self, utterance: &Utterance) {
            self.spoken.push(utterance.clone());
        }
        fn cancel(&mut self) {
            self.cancels += 1;
        }
    }

    fn voice(name: &str, lang: &str) -> Voice {
        Voice { name: name.into(), lang: lang.into() }
    }

    #[test]
    fn voice_preference_order() {
        let vs = vec![voice("en", "en-US"), voice("th", "th"), voice("kanya", "TH-th")];
        assert_eq!(pick_voice(&vs).map(|v| v.name.as_str()), Some("kanya"));
        let vs = vec![voice("en", "en-US"), voice("th", "th")];
        assert_eq!(pick_voice(&vs).map(|v| v.name.as_str()), Some("th"));
        let vs = vec![voice("en", "en-US")];
        assert_eq!(pick_voice(&vs).map(|v| v.name.as_str()), Some("en"));
        assert!(pick_voice(&[]).is_none());
    }

    #[test]
    fn closed_service_stays_silent() {
        let mut svc = SpeechService::new(Recorder::default(), DEFAULT_RATE);
        svc.speak("สวัสดี");
        assert!(svc.backend().spoken.is_empty());
    }

    #[test]
    fn each_request_cancels_the_previous() {
        let backend = Recorder { voices: vec![voice("kanya", "th-TH")], ..Recorder::default() };
        let mut svc = SpeechService::new(backend, 0.8);
        svc.open();
        svc.speak("หนึ่ง");
        svc.speak("สอง");
        let b = svc.backend();
        assert_eq!(b.spoken.len(), 2);
        assert_eq!(b.cancels, 2);
        assert_eq!(b.spoken[1].text, "สอง");
        assert_eq!(b.spoken[1].lang, "th-TH");
        assert_eq!(b.spoken[1].rate, 0.8);
    }

    #[test]
    fn no_voice_falls_back_to_thai_lang() {
        let mut svc = SpeechService::new(Recorder::default(), DEFAULT_RATE);
        svc.open();
        svc.speak("น้ำ");
        let u = &svc.backend().spoken[0];
        assert!(u.voice.is_none());
        assert_eq!(u.lang, DEFAULT_LANG);
    }

    #[test]
    fn close_cancels_and_reopen_works() {
        let mut svc = SpeechService::new(Recorder::default(), DEFAULT_RATE);
        svc.open();
        svc.close();
        assert!(!svc.is_open());
        assert_eq!(svc.backend().cancels, 1);
        svc.open();
        svc.speak("ข้าว");
        assert_eq!(svc.backend().spoken.len(), 1);
    }
}
