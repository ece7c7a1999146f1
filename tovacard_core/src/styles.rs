use std::fmt;

/// Decorative frame styles the user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameStyle {
    Childish,
    Festive,
    Natural,
    Nostalgic,
    Floral,
    Sketch,
}

impl FrameStyle {
    /// Used whenever a key does not name a known style.
    pub const DEFAULT: FrameStyle = FrameStyle::Festive;

    pub const ALL: [FrameStyle; 6] = [
        FrameStyle::Childish,
        FrameStyle::Festive,
        FrameStyle::Natural,
        FrameStyle::Nostalgic,
        FrameStyle::Floral,
        FrameStyle::Sketch,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FrameStyle::Childish => "childish",
            FrameStyle::Festive => "festive",
            FrameStyle::Natural => "natural",
            FrameStyle::Nostalgic => "nostalgic",
            FrameStyle::Floral => "floral",
            FrameStyle::Sketch => "sketch",
        }
    }

    pub fn from_key(key: &str) -> Option<FrameStyle> {
        let key = key.trim();
        FrameStyle::ALL
            .into_iter()
            .find(|style| style.key().eq_ignore_ascii_case(key))
    }

    /// Total lookup: unknown keys resolve to [`FrameStyle::DEFAULT`].
    pub fn resolve(key: &str) -> FrameStyle {
        match FrameStyle::from_key(key) {
            Some(style) => style,
            None => {
                tracing::warn!(key, fallback = FrameStyle::DEFAULT.key(), "unknown frame style");
                FrameStyle::DEFAULT
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FrameStyle::Childish => "Childish",
            FrameStyle::Festive => "Festive",
            FrameStyle::Natural => "Natural",
            FrameStyle::Nostalgic => "Nostalgic",
            FrameStyle::Floral => "Floral",
            FrameStyle::Sketch => "Sketch",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FrameStyle::Childish => "🖍",
            FrameStyle::Festive => "🍎",
            FrameStyle::Natural => "🌿",
            FrameStyle::Nostalgic => "📷",
            FrameStyle::Floral => "🌸",
            FrameStyle::Sketch => "✏",
        }
    }

    /// Instruction sent to the image model together with the photo.
    pub fn prompt(self) -> &'static str {
        match self {
            FrameStyle::Childish => {
                "Add a playful, hand-drawn frame around this photo in the style of a child's \
                 crayon drawing for Rosh Hashanah: apples, honey jars, pomegranates and a smiling \
                 sun in bright primary colors. Keep the people and the scene in the photo exactly \
                 as they are and leave no text in the image."
            }
            FrameStyle::Festive => {
                "Turn this photo into a festive Rosh Hashanah greeting card by surrounding it with \
                 an elegant decorative frame of red apples, golden honey, pomegranates and a shofar, \
                 with warm celebratory lighting. Keep the original photo content unchanged in the \
                 center and do not add any text."
            }
            FrameStyle::Natural => {
                "Frame this photo with a natural autumn border of olive branches, wheat, figs, \
                 grapes and pomegranates in soft earthy tones, as a calm Rosh Hashanah greeting. \
                 Preserve the original photo exactly and do not write any text."
            }
            FrameStyle::Nostalgic => {
                "Give this photo a nostalgic vintage look, like an old family holiday postcard, \
                 with a worn ornamental paper frame decorated with apples, honey and pomegranates \
                 in faded sepia and muted colors. Keep the faces and scene recognizable and add no \
                 text."
            }
            FrameStyle::Floral => {
                "Surround this photo with a lush floral frame of roses, anemones and pomegranate \
                 blossoms with a few apples and honey jars tucked in, for a Rosh Hashanah greeting. \
                 Keep the photo itself unchanged and add no text."
            }
            FrameStyle::Sketch => {
                "Redraw the frame of this photo as a delicate pencil and ink sketch with apples, \
                 honey, pomegranates and a shofar, lightly tinted with watercolor, while keeping the \
                 photo in the center recognizable. Do not add any text."
            }
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
