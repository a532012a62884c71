//! Page content: artist copy, releases and outbound links.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::playback::SourceRef;

const SITE_JSON: &str = include_str!("../assets/site.json");

static SITE: Lazy<SiteContent> = Lazy::new(|| match serde_json::from_str(SITE_JSON) {
    Ok(content) => content,
    Err(err) => {
        warn!(%err, "site.json is malformed, using built-in content");
        SiteContent::default()
    }
});

pub fn site() -> &'static SiteContent {
    &SITE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub artist: String,
    pub first_name: String,
    pub last_name: String,
    pub tagline: String,
    pub hero_blurb: String,
    pub artist_link: String,
    pub music_blurb: String,
    #[serde(default)]
    pub releases: Vec<Release>,
    pub about: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub contact_email: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    #[serde(default = "default_easter_egg_path")]
    pub easter_egg_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub title: String,
    pub year: String,
    pub kind: String,
    pub cover: String,
    #[serde(default = "default_track_count")]
    pub tracks: u32,
    pub external_link: String,
    #[serde(default)]
    pub audio_src: Option<String>,
    #[serde(default)]
    pub released: bool,
}

impl Release {
    /// The preview source, if the release has one. Blank strings mean "no preview yet".
    pub fn preview_source(&self) -> Option<SourceRef> {
        self.audio_src.clone().and_then(SourceRef::parse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    Spotify,
    Linktree,
    Tiktok,
}

impl SocialKind {
    pub fn icon(self) -> &'static str {
        match self {
            SocialKind::Spotify => "spotify",
            SocialKind::Linktree => "linktree",
            SocialKind::Tiktok => "tiktok",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SocialKind::Spotify => "Spotify",
            SocialKind::Linktree => "Linktree",
            SocialKind::Tiktok => "TikTok",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: String,
}

fn default_track_count() -> u32 {
    1
}

fn default_easter_egg_path() -> String {
    "/easter-egg".to_string()
}

impl Default for SiteContent {
    fn default() -> Self {
        let artist_link = "https://open.spotify.com/artist/0XjlW7rVoesijuDqWWCRu3".to_string();
        Self {
            artist: "Mauro Nelson".to_string(),
            first_name: "mauro".to_string(),
            last_name: "nelson".to_string(),
            tagline: "Singer • Songwriter • Storyteller".to_string(),
            hero_blurb: "Crafting melodies that speak to the soul, weaving stories through song"
                .to_string(),
            artist_link: artist_link.clone(),
            music_blurb: "A collection of stories told through melody and verse".to_string(),
            releases: vec![Release {
                title: "Last Night in the Field".to_string(),
                year: "2025".to_string(),
                kind: "Single".to_string(),
                cover: "/covers/last-night-in-the-field.svg".to_string(),
                tracks: 1,
                external_link: "https://open.spotify.com/track/1HOwQgkDw6BGRFhodlqc3j"
                    .to_string(),
                audio_src: Some(String::new()),
                released: true,
            }],
            about: "I'm a starting artist from Belgium pouring my heart into creating amazing hits. \
                    I'm chasing big dreams and doing my best every day to share my music with the \
                    world. Thanks for being part of the journey!"
                .to_string(),
            genres: ["Folk", "Indie Rock", "Alternative", "Singer-Songwriter", "Acoustic"]
                .into_iter()
                .map(String::from)
                .collect(),
            contact_email: "hello@mauronelson.com".to_string(),
            socials: vec![
                SocialLink {
                    kind: SocialKind::Spotify,
                    url: artist_link,
                },
                SocialLink {
                    kind: SocialKind::Linktree,
                    url: "https://linktr.ee/mauronelson".to_string(),
                },
                SocialLink {
                    kind: SocialKind::Tiktok,
                    url: "https://www.tiktok.com/@mauronelsonbe".to_string(),
                },
            ],
            easter_egg_path: default_easter_egg_path(),
        }
    }
}
