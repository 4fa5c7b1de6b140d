//! The preset registry (`spec.md` §4.8): a read-only mapping from platform
//! name to parameter bundle, merged with caller overrides.

use std::fmt;
use std::str::FromStr;

use crate::config::QimConfig;
use crate::error::ProtoError;

/// The closed set of distribution-channel presets (`spec.md` §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetName {
    /// No platform-specific resize/recompression; the generic baseline.
    Original,
    /// Facebook's re-encode characteristics.
    Facebook,
    /// Instagram's re-encode characteristics.
    Instagram,
    /// WhatsApp's re-encode characteristics.
    Whatsapp,
    /// X (Twitter)'s re-encode characteristics.
    XTwitter,
}

impl PresetName {
    /// All preset names, in registry iteration order.
    pub const ALL: [Self; 5] =
        [Self::Original, Self::Facebook, Self::Instagram, Self::Whatsapp, Self::XTwitter];

    /// The canonical lowercase name, as used in `original_source`'s
    /// `PRESETS`/`VIDEO_PRESETS` keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Whatsapp => "whatsapp",
            Self::XTwitter => "x_twitter",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            "whatsapp" => Ok(Self::Whatsapp),
            "x_twitter" | "twitter" | "x" => Ok(Self::XTwitter),
            other => Err(ProtoError::UnknownPreset(other.to_string())),
        }
    }
}

/// An immutable named bundle of embedder and encoder parameters.
///
/// Mirrors `original_source`'s `PRESETS` (image) and `VIDEO_PRESETS` (video)
/// tables, unified into one bundle since a single Rust preset now drives both
/// the image codec and the video pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Resize the long edge to this many pixels before embedding, if set.
    pub long_edge: Option<u32>,
    /// JPEG re-encode quality used by image pre-normalization, if set.
    pub jpeg_quality: Option<u8>,
    /// Target frame rate for video pre-normalization, if set.
    pub target_fps: Option<u32>,
    /// libx264 CRF for the final video re-encode.
    pub crf: u8,
    /// libx264 preset name (`"medium"`, `"faster"`, ...).
    pub x264_preset: &'static str,
    /// QIM quantization step.
    pub qim_step: f32,
    /// Requested repetition factor.
    pub repetition: u32,
    /// Reed-Solomon parity byte count.
    pub ecc_parity_bytes: u8,
    /// Whether to embed into the Y channel of a color image (vs. grayscale).
    pub use_y_channel: bool,
    /// Embed every Nth video frame.
    pub frame_step: u32,
}

impl Preset {
    /// The literal baseline used when no preset and no override supplies a
    /// field (`spec.md` §4.8): `qim_step=18.0, repetition=120, parity=32,
    /// use_y=true`.
    pub const BASELINE: Self = Self {
        long_edge: None,
        jpeg_quality: None,
        target_fps: None,
        crf: 23,
        x264_preset: "medium",
        qim_step: 18.0,
        repetition: 120,
        ecc_parity_bytes: 32,
        use_y_channel: true,
        frame_step: 1,
    };

    /// Looks up the immutable bundle for a preset name.
    #[must_use]
    pub fn for_name(name: PresetName) -> Self {
        match name {
            PresetName::Original => Self::BASELINE,
            PresetName::Facebook => Self {
                long_edge: Some(2048),
                jpeg_quality: Some(85),
                target_fps: Some(30),
                crf: 22,
                x264_preset: "faster",
                qim_step: 24.0,
                repetition: 160,
                ecc_parity_bytes: 64,
                use_y_channel: true,
                frame_step: 2,
            },
            PresetName::Instagram => Self {
                long_edge: Some(1080),
                jpeg_quality: Some(85),
                target_fps: Some(30),
                crf: 22,
                x264_preset: "faster",
                qim_step: 24.0,
                repetition: 160,
                ecc_parity_bytes: 64,
                use_y_channel: true,
                frame_step: 2,
            },
            PresetName::Whatsapp => Self {
                long_edge: Some(1280),
                jpeg_quality: Some(85),
                target_fps: Some(30),
                crf: 23,
                x264_preset: "faster",
                qim_step: 24.0,
                repetition: 160,
                ecc_parity_bytes: 64,
                use_y_channel: true,
                frame_step: 2,
            },
            PresetName::XTwitter => Self {
                long_edge: Some(2048),
                jpeg_quality: Some(85),
                target_fps: Some(30),
                crf: 23,
                x264_preset: "faster",
                qim_step: 24.0,
                repetition: 160,
                ecc_parity_bytes: 64,
                use_y_channel: true,
                frame_step: 2,
            },
        }
    }

    /// The `QimConfig` half of this preset, validated.
    pub fn qim_config(self) -> Result<QimConfig, ProtoError> {
        QimConfig::new(self.qim_step, self.repetition)
    }
}

/// Caller-supplied overrides layered on top of a [`Preset`]'s defaults
/// (`spec.md` §4.8: "Overrides from the caller are merged on top of preset
/// defaults; absent fields fall back to built-in baseline").
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresetOverrides {
    /// Override for [`Preset::long_edge`].
    pub long_edge: Option<u32>,
    /// Override for [`Preset::jpeg_quality`].
    pub jpeg_quality: Option<u8>,
    /// Override for [`Preset::target_fps`].
    pub target_fps: Option<u32>,
    /// Override for [`Preset::crf`].
    pub crf: Option<u8>,
    /// Override for [`Preset::x264_preset`].
    pub x264_preset: Option<&'static str>,
    /// Override for [`Preset::qim_step`].
    pub qim_step: Option<f32>,
    /// Override for [`Preset::repetition`].
    pub repetition: Option<u32>,
    /// Override for [`Preset::ecc_parity_bytes`].
    pub ecc_parity_bytes: Option<u8>,
    /// Override for [`Preset::use_y_channel`].
    pub use_y_channel: Option<bool>,
    /// Override for [`Preset::frame_step`].
    pub frame_step: Option<u32>,
}

impl PresetOverrides {
    /// Merges these overrides onto `base`. Idempotent: applying the same
    /// overrides twice yields the same result (`spec.md` §8).
    #[must_use]
    pub fn apply(self, base: Preset) -> Preset {
        Preset {
            long_edge: self.long_edge.or(base.long_edge),
            jpeg_quality: self.jpeg_quality.or(base.jpeg_quality),
            target_fps: self.target_fps.or(base.target_fps),
            crf: self.crf.unwrap_or(base.crf),
            x264_preset: self.x264_preset.unwrap_or(base.x264_preset),
            qim_step: self.qim_step.unwrap_or(base.qim_step),
            repetition: self.repetition.unwrap_or(base.repetition),
            ecc_parity_bytes: self.ecc_parity_bytes.unwrap_or(base.ecc_parity_bytes),
            use_y_channel: self.use_y_channel.unwrap_or(base.use_y_channel),
            frame_step: self.frame_step.unwrap_or(base.frame_step),
        }
    }
}

/// Resolves a preset name (or `None` for the baseline) plus overrides into a
/// concrete [`Preset`], rejecting unknown names (`spec.md` §4.8).
pub fn resolve(name: Option<&str>, overrides: PresetOverrides) -> Result<Preset, ProtoError> {
    let base = match name {
        Some(n) => Preset::for_name(PresetName::from_str(n)?),
        None => Preset::BASELINE,
    };
    Ok(overrides.apply(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_name_round_trips_through_display() {
        for name in PresetName::ALL {
            assert_eq!(PresetName::from_str(name.as_str()).unwrap(), name);
        }
    }

    #[test]
    fn unknown_preset_name_is_rejected() {
        assert!(PresetName::from_str("myspace").is_err());
    }

    #[test]
    fn baseline_matches_spec_literal() {
        let p = Preset::BASELINE;
        assert_eq!(p.qim_step, 18.0);
        assert_eq!(p.repetition, 120);
        assert_eq!(p.ecc_parity_bytes, 32);
        assert!(p.use_y_channel);
    }

    #[test]
    fn override_merge_is_idempotent() {
        let overrides = PresetOverrides { qim_step: Some(30.0), ..Default::default() };
        let once = overrides.apply(Preset::BASELINE);
        let twice = overrides.apply(once);
        assert_eq!(once, twice);
    }

    #[test]
    fn resolve_rejects_unknown_name() {
        assert!(resolve(Some("bogus"), PresetOverrides::default()).is_err());
    }

    #[test]
    fn resolve_with_no_name_uses_baseline() {
        let resolved = resolve(None, PresetOverrides::default()).unwrap();
        assert_eq!(resolved, Preset::BASELINE);
    }
}
