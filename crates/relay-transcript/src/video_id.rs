// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Video id extraction from the accepted URL shapes.

use url::Url;

/// Extract the video id from a watch, embed, shorts, or `youtu.be` URL.
///
/// Returns `None` for anything else, including URLs without a host.
pub fn parse_video_id(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    let id = if host == "youtu.be" || host == "www.youtu.be" {
        url.path().trim_start_matches('/').to_string()
    } else if host.contains("youtube.com") {
        let path = url.path();
        if path == "/watch" {
            url.query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?
        } else if let Some(rest) = path
            .strip_prefix("/embed/")
            .or_else(|| path.strip_prefix("/shorts/"))
        {
            rest.to_string()
        } else {
            return None;
        }
    } else {
        return None;
    };

    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_supported_shape() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://youtube.com/watch?feature=share&v=abc123", "abc123"),
            ("https://m.youtube.com/watch?v=mobile1", "mobile1"),
            ("https://www.youtube.com/embed/emb42", "emb42"),
            ("https://www.youtube.com/shorts/short9", "short9"),
            ("https://youtu.be/tiny7", "tiny7"),
            ("https://www.youtu.be/tiny8", "tiny8"),
            ("  https://YOUTU.BE/Case9  ", "Case9"),
        ];
        for (url, id) in cases {
            assert_eq!(parse_video_id(url).as_deref(), Some(id), "{url}");
        }
    }

    #[test]
    fn rejects_other_urls() {
        let cases = [
            "",
            "dQw4w9WgXcQ",
            "youtube.com/watch?v=abc",
            "https://www.youtube.com/",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/watch?v=",
            "https://www.youtube.com/embed/",
            "https://www.youtube.com/channel/xyz",
            "https://youtu.be/",
            "https://vimeo.com/12345",
            "https://example.com/watch?v=abc",
        ];
        for url in cases {
            assert_eq!(parse_video_id(url), None, "{url}");
        }
    }
}
