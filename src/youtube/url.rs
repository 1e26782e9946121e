use url::{ParseError, Url};

use super::YouTubeError;

pub fn extract_video_id(link: &str) -> Result<String, YouTubeError> {
    let parsed = parse_link(link.trim()).ok_or(YouTubeError::InvalidUrl)?;
    parsed
        .query_pairs()
        .find(|(key, value)| key == "v" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or(YouTubeError::InvalidUrl)
}

// Links pasted without a scheme (`www.youtube.com/watch?v=...`) still count.
fn parse_link(link: &str) -> Option<Url> {
    match Url::parse(link) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) if !link.is_empty() => {
            Url::parse(&format!("https://{link}")).ok()
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_v_parameter() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?feature=share&v=abc123&t=42s").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_video_id("www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("youtube.com/watch?v=xyz789&t=10").unwrap(),
            "xyz789"
        );
    }

    #[test]
    fn first_non_empty_value_wins() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=&v=second").unwrap(),
            "second"
        );
    }

    #[test]
    fn rejects_links_without_id() {
        for link in [
            "https://www.youtube.com/watch",
            "https://www.youtube.com/watch?list=PL123",
            "https://www.youtube.com/watch?v=",
            "not a url",
            "",
        ] {
            assert!(
                matches!(extract_video_id(link), Err(YouTubeError::InvalidUrl)),
                "link: {link:?}"
            );
        }
    }
}
