//! Named configuration values.
//!
//! Configuration arrives already merged from an outer layer, usually as
//! strings (`"nearest-edge"`, `"auto"`, `"120%"`). Strict parsing goes through
//! `FromStr`; the layout core itself uses the lenient forms, which log a
//! warning and fall back to the documented default.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseError;

/// Declare a string-named configuration enum.
///
/// Generates the enum with its `Default`, `as_str`, `from_name`,
/// `from_name_lenient`, `Display`, `FromStr`, and (with the `serde` feature)
/// string (de)serialization that falls back to the default on unknown input.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $canonical:literal $(| $alias:literal)*
            ),+ $(,)?
        }
        default $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical configuration name.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $canonical,)+
                }
            }

            /// Parse a name (case-insensitive, surrounding whitespace ignored).
            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.trim();
                $(
                    if name.eq_ignore_ascii_case($canonical)
                        $(|| name.eq_ignore_ascii_case($alias))*
                    {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            /// Parse a name, falling back to the default when unrecognized.
            pub fn from_name_lenient(name: &str) -> Self {
                Self::from_name(name).unwrap_or_else(|| {
                    log::warn!(
                        "unrecognized {} {:?}, using {:?}",
                        $kind,
                        name,
                        Self::$default.as_str()
                    );
                    Self::$default
                })
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::error::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| $crate::error::ParseError::new($kind, s))
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = <alloc::string::String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_name_lenient(&name))
            }
        }
    };
}

pub(crate) use named_enum;

// ============================================================================
// "auto" or a count
// ============================================================================

/// A count that is either resolved automatically or fixed by configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoCount {
    /// Derive from image count and container size.
    #[default]
    Auto,
    /// Use exactly this many (values below 1 are treated as 1).
    Fixed(usize),
}

impl AutoCount {
    /// The fixed value, if any, floored at 1.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Self::Auto => None,
            Self::Fixed(n) => Some(n.max(1)),
        }
    }

    /// Resolve with `auto` computed lazily, flooring the result at 1.
    pub fn resolve_with(self, auto: impl FnOnce() -> usize) -> usize {
        self.fixed().unwrap_or_else(|| auto().max(1))
    }
}

impl fmt::Display for AutoCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Fixed(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for AutoCount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse::<usize>()
            .map(Self::Fixed)
            .map_err(|_| ParseError::new("count", s))
    }
}

// ============================================================================
// Pixel-or-percent length
// ============================================================================

/// A length given either in pixels or as a percentage of a reference length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Length {
    /// Absolute CSS pixels.
    Pixels(f64),
    /// Percentage (`120.0` means 120%) of a caller-chosen reference.
    Percent(f64),
}

impl Length {
    /// Resolve against `reference` (used only for percentages).
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Pixels(px) => px,
            Self::Percent(pct) => reference * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ParseError;

    /// Accepts `"120%"`, `"300px"`, or a bare number of pixels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let parsed = if let Some(pct) = t.strip_suffix('%') {
            pct.trim().parse::<f64>().ok().map(Self::Percent)
        } else {
            t.trim_end_matches("px")
                .trim()
                .parse::<f64>()
                .ok()
                .map(Self::Pixels)
        };
        parsed
            .filter(|l| match *l {
                Self::Pixels(v) | Self::Percent(v) => v.is_finite(),
            })
            .ok_or_else(|| ParseError::new("length", s))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{AutoCount, Length};
    use alloc::string::ToString;
    use core::fmt;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for AutoCount {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Auto => serializer.serialize_str("auto"),
                Self::Fixed(n) => serializer.serialize_u64(*n as u64),
            }
        }
    }

    struct AutoCountVisitor;

    impl Visitor<'_> for AutoCountVisitor {
        type Value = AutoCount;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("\"auto\" or a non-negative integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<AutoCount, E> {
            Ok(AutoCount::Fixed(v as usize))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<AutoCount, E> {
            Ok(AutoCount::Fixed(v.max(0) as usize))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<AutoCount, E> {
            if v.is_finite() && v >= 0.0 {
                Ok(AutoCount::Fixed(v as usize))
            } else {
                Ok(AutoCount::Auto)
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<AutoCount, E> {
            Ok(v.parse().unwrap_or_else(|_| {
                log::warn!("unrecognized count {v:?}, using \"auto\"");
                AutoCount::Auto
            }))
        }
    }

    impl<'de> Deserialize<'de> for AutoCount {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(AutoCountVisitor)
        }
    }

    impl Serialize for Length {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Pixels(px) => serializer.serialize_f64(*px),
                Self::Percent(_) => serializer.serialize_str(&self.to_string()),
            }
        }
    }

    struct LengthVisitor;

    impl Visitor<'_> for LengthVisitor {
        type Value = Length;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a pixel number or a percentage string like \"120%\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Length, E> {
            Ok(Length::Pixels(v as f64))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Length, E> {
            Ok(Length::Pixels(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Length, E> {
            Ok(Length::Pixels(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Length, E> {
            v.parse().map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Length {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(LengthVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    named_enum! {
        /// Test fixture.
        enum Flavor ("flavor") {
            Sweet = "sweet" | "sugary",
            Sour = "sour",
        }
        default Sour;
    }

    // ── named_enum ──────────────────────────────────────────────────────

    #[test]
    fn names_and_aliases() {
        assert_eq!(Flavor::from_name("sweet"), Some(Flavor::Sweet));
        assert_eq!(Flavor::from_name(" SUGARY "), Some(Flavor::Sweet));
        assert_eq!(Flavor::from_name("bitter"), None);
        assert_eq!(Flavor::Sweet.as_str(), "sweet");
        assert_eq!(Flavor::ALL.len(), 2);
    }

    #[test]
    fn lenient_falls_back_to_default() {
        assert_eq!(Flavor::from_name_lenient("bitter"), Flavor::Sour);
        assert_eq!(Flavor::default(), Flavor::Sour);
    }

    #[test]
    fn strict_parse_reports_kind() {
        let err = "bitter".parse::<Flavor>().unwrap_err();
        assert_eq!(err.kind, "flavor");
        assert_eq!(err.value, "bitter");
    }

    // ── AutoCount ───────────────────────────────────────────────────────

    #[test]
    fn auto_count_parse_and_resolve() {
        assert_eq!("auto".parse::<AutoCount>().unwrap(), AutoCount::Auto);
        assert_eq!("4".parse::<AutoCount>().unwrap(), AutoCount::Fixed(4));
        assert!("four".parse::<AutoCount>().is_err());
        assert_eq!(AutoCount::Fixed(0).resolve_with(|| 9), 1);
        assert_eq!(AutoCount::Auto.resolve_with(|| 0), 1);
        assert_eq!(AutoCount::Auto.resolve_with(|| 6), 6);
    }

    // ── Length ──────────────────────────────────────────────────────────

    #[test]
    fn length_parse() {
        assert_eq!("120%".parse::<Length>().unwrap(), Length::Percent(120.0));
        assert_eq!("300px".parse::<Length>().unwrap(), Length::Pixels(300.0));
        assert_eq!("42".parse::<Length>().unwrap(), Length::Pixels(42.0));
        assert!("wide".parse::<Length>().is_err());
        assert!("NaN".parse::<Length>().is_err());
    }

    #[test]
    fn length_resolve() {
        assert_eq!(Length::Percent(50.0).resolve(300.0), 150.0);
        assert_eq!(Length::Pixels(12.0).resolve(300.0), 12.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_forms() {
        let c: AutoCount = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(c, AutoCount::Auto);
        let c: AutoCount = serde_json::from_str("3").unwrap();
        assert_eq!(c, AutoCount::Fixed(3));
        let l: Length = serde_json::from_str("\"80%\"").unwrap();
        assert_eq!(l, Length::Percent(80.0));
        let l: Length = serde_json::from_str("250").unwrap();
        assert_eq!(l, Length::Pixels(250.0));
        let f: Flavor = serde_json::from_str("\"nope\"").unwrap();
        assert_eq!(f, Flavor::Sour);
    }
}
