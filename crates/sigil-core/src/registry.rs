//! Read-only registry of asset templates and teams.
//!
//! Template images live at `teams/<prefix>/<filename>` relative to the
//! asset root; the registry only knows their names and pixel sizes.

use serde::{Deserialize, Serialize};

/// A kind of exportable asset. Each kind has a fixed template size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    ProfilePicture,
    DiscordBanner,
    TwitterBanner,
    YoutubeBanner,
    TwitchBanner,
    DesktopBackground,
    Sticker,
    StickerShadow,
}

/// Size and naming of one asset template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetTemplate {
    pub width: u32,
    pub height: u32,
    pub display_name: &'static str,
    pub filename: &'static str,
}

impl AssetKind {
    pub const ALL: [AssetKind; 8] = [
        AssetKind::ProfilePicture,
        AssetKind::DiscordBanner,
        AssetKind::TwitterBanner,
        AssetKind::YoutubeBanner,
        AssetKind::TwitchBanner,
        AssetKind::DesktopBackground,
        AssetKind::Sticker,
        AssetKind::StickerShadow,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::ProfilePicture => "ProfilePicture",
            Self::DiscordBanner => "DiscordBanner",
            Self::TwitterBanner => "TwitterBanner",
            Self::YoutubeBanner => "YoutubeBanner",
            Self::TwitchBanner => "TwitchBanner",
            Self::DesktopBackground => "DesktopBackground",
            Self::Sticker => "Sticker",
            Self::StickerShadow => "StickerShadow",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn template(self) -> AssetTemplate {
        let (width, height, display_name, filename) = match self {
            Self::ProfilePicture => (512, 512, "Profile Picture", "ProfilePicture.png"),
            Self::DiscordBanner => (1200, 480, "Discord Banner", "DiscordBanner.png"),
            Self::TwitterBanner => (1500, 500, "Twitter/X Banner", "TwitterBanner.png"),
            Self::YoutubeBanner => (2560, 1440, "YouTube Banner", "YoutubeBanner.png"),
            Self::TwitchBanner => (1920, 480, "Twitch Banner", "TwitchBanner.png"),
            Self::DesktopBackground => (1920, 1080, "Desktop Background", "DesktopBackground.png"),
            Self::Sticker => (512, 512, "Sticker", "Sticker.png"),
            Self::StickerShadow => (512, 512, "Sticker Shadow", "Sticker Shadow.png"),
        };
        AssetTemplate {
            width,
            height,
            display_name,
            filename,
        }
    }

    /// Sticker-class kinds support a synthesized background behind the
    /// template image.
    pub fn is_sticker(self) -> bool {
        matches!(self, Self::Sticker | Self::StickerShadow)
    }

    /// Dropdown label, e.g. `Sticker (512x512)`.
    pub fn label(self) -> String {
        let t = self.template();
        format!("{} ({}x{})", t.display_name, t.width, t.height)
    }
}

/// A team (franchise) whose template folder can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub id: &'static str,
    pub prefix: &'static str,
    pub name: &'static str,
}

impl Team {
    /// Dropdown label, e.g. `Atlantis (ATL)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.prefix)
    }
}

const TEAMS: &[Team] = &[
    Team { id: "24", prefix: "ACA", name: "The Academics" },
    Team { id: "19", prefix: "ATL", name: "Atlantis" },
    Team { id: "11", prefix: "ATO", name: "Automata" },
    Team { id: "12", prefix: "AVI", name: "The Aviary" },
    Team { id: "10", prefix: "BS", name: "Big Slime" },
    Team { id: "20", prefix: "COW", name: "What Do You Beef" },
    Team { id: "0", prefix: "CSC", name: "CSC" },
    Team { id: "29", prefix: "dB", name: "Dead Beats" },
    Team { id: "30", prefix: "DRG", name: "Pact of Embers" },
    Team { id: "25", prefix: "FRG", name: "The Toad-em Pole" },
    Team { id: "55", prefix: "GF", name: "Gone Fishin'" },
    Team { id: "49", prefix: "GRN", name: "The Greenhouse" },
    Team { id: "13", prefix: "H4K", name: "H4ck3r H4v3n" },
    Team { id: "3", prefix: "HG", name: "Headhunter's Guild" },
    Team { id: "48", prefix: "HR", name: "The High Rollers" },
    Team { id: "4", prefix: "NAN", name: "NAdes" },
    Team { id: "6", prefix: "OS", name: "Order of the Samurai" },
    Team { id: "9", prefix: "SAV", name: "The Savanna" },
    Team { id: "54", prefix: "TEE", name: "The 19th Hole" },
    Team { id: "52", prefix: "TSC", name: "The Starling Corporation" },
    Team { id: "14", prefix: "UPS", name: "Upsetti Spaghetti" },
    Team { id: "56", prefix: "WIZ", name: "Counter-Spell" },
];

/// All teams, sorted by display name (case-insensitive).
pub fn teams() -> Vec<Team> {
    let mut sorted = TEAMS.to_vec();
    sorted.sort_by_key(|t| t.name.to_lowercase());
    sorted
}

pub fn team_by_prefix(prefix: &str) -> Option<Team> {
    TEAMS.iter().copied().find(|t| t.prefix == prefix)
}

/// Relative path of a team's template image.
pub fn template_path(team: &Team, kind: AssetKind) -> String {
    format!("teams/{}/{}", team.prefix, kind.template().filename)
}

/// Export file name: `<prefix>_<team name>_<asset key>_<date>.<ext>`.
///
/// The team name is lower-cased and every character outside `[a-z0-9]` is
/// replaced with `_`. `date` is passed through as given (`YYYY-MM-DD`).
pub fn export_filename(team: &Team, kind: AssetKind, date: &str, extension: &str) -> String {
    let safe_name: String = team
        .name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}_{}_{}.{}", team.prefix, safe_name, kind.key(), date, extension)
}
