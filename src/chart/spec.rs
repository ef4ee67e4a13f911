use std::fmt;
use std::str::FromStr;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Alpha – point transparency
// ---------------------------------------------------------------------------

/// Opacity in `[0, 1]`. Construction rejects anything else, NaN included.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Alpha(f32);

impl Alpha {
    pub const OPAQUE: Alpha = Alpha(1.0);
    /// Raw points under the trend line.
    pub const TREND_POINTS: Alpha = Alpha(0.5);

    pub fn new(value: f64) -> Result<Self, AnalysisError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Alpha(value as f32))
        } else {
            Err(AnalysisError::InvalidAlpha(value))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Alpha::OPAQUE
    }
}

impl TryFrom<f64> for Alpha {
    type Error = AnalysisError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Alpha::new(value)
    }
}

// ---------------------------------------------------------------------------
// Palette – named colour sets
// ---------------------------------------------------------------------------

/// Named palettes accepted by the shot chart.
///
/// The qualitative sets hold ten colours each; `Hls` generates as many
/// evenly spaced hues as there are categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    #[default]
    Deep,
    Muted,
    Pastel,
    Bright,
    Dark,
    Colorblind,
    Hls,
}

impl Palette {
    pub const ALL: [Palette; 7] = [
        Palette::Deep,
        Palette::Muted,
        Palette::Pastel,
        Palette::Bright,
        Palette::Dark,
        Palette::Colorblind,
        Palette::Hls,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Deep => "deep",
            Palette::Muted => "muted",
            Palette::Pastel => "pastel",
            Palette::Bright => "bright",
            Palette::Dark => "dark",
            Palette::Colorblind => "colorblind",
            Palette::Hls => "hls",
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "husl" {
            return Ok(Palette::Hls);
        }
        Palette::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| AnalysisError::UnknownPalette(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ChartSpec – resolved parameters of one shot chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub x: String,
    pub y: String,
    pub hue: Option<String>,
    pub palette: Palette,
    pub alpha: Alpha,
}

impl ChartSpec {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        ChartSpec {
            x: x.into(),
            y: y.into(),
            hue: None,
            palette: Palette::default(),
            alpha: Alpha::default(),
        }
    }

    pub fn hue(mut self, column: impl Into<String>) -> Self {
        self.hue = Some(column.into());
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn alpha(mut self, alpha: Alpha) -> Self {
        self.alpha = alpha;
        self
    }

    /// Build a hue-coloured shot chart spec from unvalidated arguments.
    pub fn shot_chart(
        x: &str,
        y: &str,
        hue: &str,
        palette: &str,
        alpha: f64,
    ) -> Result<Self, AnalysisError> {
        Ok(ChartSpec::new(x, y)
            .hue(hue)
            .palette(palette.parse()?)
            .alpha(Alpha::new(alpha)?))
    }
}
