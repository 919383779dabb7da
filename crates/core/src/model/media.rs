use url::Url;

//
// ─── MEDIA SOURCE ──────────────────────────────────────────────────────────────
//

/// How a track's media URL should be handed to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// A YouTube video, played through the embeddable iframe player.
    YouTube { video_id: String },
    /// Any other absolute URL, played directly.
    Direct(Url),
    /// Not a URL the player can do anything with.
    Unsupported,
}

impl MediaSource {
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let Ok(url) = Url::parse(raw) else {
            return Self::Unsupported;
        };
        if !matches!(url.scheme(), "http" | "https") {
            return Self::Unsupported;
        }

        youtube_video_id(&url).map_or(Self::Direct(url), |video_id| Self::YouTube { video_id })
    }

    /// URL to put into the page: an embed URL for YouTube, the URL itself otherwise.
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        match self {
            Self::YouTube { video_id } => Some(format!(
                "https://www.youtube.com/embed/{video_id}?enablejsapi=1"
            )),
            Self::Direct(url) => Some(url.to_string()),
            Self::Unsupported => None,
        }
    }

    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::YouTube { .. })
    }
}

fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("embed" | "shorts" | "live") => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    (!id.is_empty()).then_some(id)
}
