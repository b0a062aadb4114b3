//! `[display]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[display]` section in talkboard.toml - knobs for the display fragments.
///
/// # Example
/// ```toml
/// [display]
/// recent = 4
/// thumbnail = "images/talk.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// How many past talks the aggregate keeps as "recent".
    #[serde(default = "defaults::display::recent")]
    #[educe(Default = defaults::display::recent())]
    pub recent: usize,

    /// Thumbnail used by talk cards when a talk has none.
    #[serde(default = "defaults::display::thumbnail")]
    #[educe(Default = defaults::display::thumbnail())]
    pub thumbnail: String,
}
