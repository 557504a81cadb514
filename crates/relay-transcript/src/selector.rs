// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caption track choice by language preference.
//!
//! Selection walks an ordered list of tiers and returns the first track
//! matching the first tier that matches anything.

use relay_core::types::CaptionTrack;

/// Language used when the caller asks for none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One step of the preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier<'a> {
    /// Manual track in exactly this language.
    Manual(&'a str),
    /// Generated track in exactly this language.
    Generated(&'a str),
    /// Any manual track.
    AnyManual,
    /// Any generated track.
    AnyGenerated,
}

impl Tier<'_> {
    pub fn matches(&self, track: &CaptionTrack) -> bool {
        match *self {
            Tier::Manual(lang) => !track.is_generated && track.language_code == lang,
            Tier::Generated(lang) => track.is_generated && track.language_code == lang,
            Tier::AnyManual => !track.is_generated,
            Tier::AnyGenerated => track.is_generated,
        }
    }
}

/// Preference order for `language`.
///
/// A requested language never falls back to another one. Without a request
/// English is preferred, then whatever manual track comes first, then any
/// generated one. An empty string counts as no request.
pub fn tiers(language: Option<&str>) -> Vec<Tier<'_>> {
    match language.filter(|l| !l.is_empty()) {
        Some(lang) => vec![Tier::Manual(lang), Tier::Generated(lang)],
        None => vec![
            Tier::Manual(DEFAULT_LANGUAGE),
            Tier::Generated(DEFAULT_LANGUAGE),
            Tier::AnyManual,
            Tier::AnyGenerated,
        ],
    }
}

/// Pick the track to transcribe, or `None` when no tier matches.
pub fn select<'t>(tracks: &'t [CaptionTrack], language: Option<&str>) -> Option<&'t CaptionTrack> {
    tiers(language)
        .into_iter()
        .find_map(|tier| tracks.iter().find(|track| tier.matches(track)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: lang.to_string(),
            name: lang.to_string(),
            is_generated: generated,
            handle: format!("{lang}-{generated}"),
        }
    }

    fn picked(tracks: &[CaptionTrack], language: Option<&str>) -> Option<(String, bool)> {
        select(tracks, language).map(|t| (t.language_code.clone(), t.is_generated))
    }

    #[test]
    fn requested_language_prefers_manual() {
        let tracks = [track("es", true), track("es", false), track("en", false)];
        assert_eq!(picked(&tracks, Some("es")), Some(("es".into(), false)));
    }

    #[test]
    fn requested_language_falls_back_to_generated() {
        let tracks = [track("en", false), track("es", true)];
        assert_eq!(picked(&tracks, Some("es")), Some(("es".into(), true)));
    }

    #[test]
    fn requested_language_never_substitutes_another() {
        let tracks = [track("en", false), track("fr", true)];
        assert_eq!(picked(&tracks, Some("de")), None);
    }

    #[test]
    fn default_prefers_manual_english() {
        let tracks = [track("fr", false), track("en", true), track("en", false)];
        assert_eq!(picked(&tracks, None), Some(("en".into(), false)));
    }

    #[test]
    fn default_takes_generated_english_over_other_manual() {
        let tracks = [track("fr", false), track("en", true)];
        assert_eq!(picked(&tracks, None), Some(("en".into(), true)));
    }

    #[test]
    fn default_takes_first_manual_then_first_generated() {
        let tracks = [track("ja", true), track("fr", false), track("de", false)];
        assert_eq!(picked(&tracks, None), Some(("fr".into(), false)));

        let tracks = [track("ja", true), track("ko", true)];
        assert_eq!(picked(&tracks, None), Some(("ja".into(), true)));
    }

    #[test]
    fn empty_language_counts_as_none() {
        let tracks = [track("en", false)];
        assert_eq!(picked(&tracks, Some("")), Some(("en".into(), false)));
    }

    #[test]
    fn no_tracks_selects_nothing() {
        assert_eq!(picked(&[], None), None);
        assert_eq!(picked(&[], Some("en")), None);
    }

    #[test]
    fn tier_order_is_explicit() {
        assert_eq!(
            tiers(None),
            vec![
                Tier::Manual("en"),
                Tier::Generated("en"),
                Tier::AnyManual,
                Tier::AnyGenerated
            ]
        );
        assert_eq!(tiers(Some("pt")), vec![Tier::Manual("pt"), Tier::Generated("pt")]);
    }
}
