#![forbid(unsafe_code)]

//! Bidirectional character classes (UAX #9 table 4) as a bit-packed mask.
//!
//! Each of the 23 classes occupies a single bit so that the sets used
//! throughout the resolver — `STRONG`, `NEUTRAL_ISOLATES`, `BN_LIKE`,
//! `TRAILING`, `ISOLATE_INITIATORS` — reduce to a bitwise AND.

use bitflags::bitflags;

bitflags! {
    /// A UAX #9 bidirectional character class, or a union of several.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharType: u32 {
        /// Left-to-right strong.
        const L   = 1 << 0;
        /// Right-to-left strong.
        const R   = 1 << 1;
        /// Right-to-left Arabic.
        const AL  = 1 << 2;
        /// European number.
        const EN  = 1 << 3;
        /// European separator.
        const ES  = 1 << 4;
        /// European terminator.
        const ET  = 1 << 5;
        /// Arabic number.
        const AN  = 1 << 6;
        /// Common separator.
        const CS  = 1 << 7;
        /// Nonspacing mark.
        const NSM = 1 << 8;
        /// Boundary neutral.
        const BN  = 1 << 9;
        /// Paragraph separator.
        const B   = 1 << 10;
        /// Segment separator.
        const S   = 1 << 11;
        /// Whitespace.
        const WS  = 1 << 12;
        /// Other neutral.
        const ON  = 1 << 13;
        /// Left-to-right embedding.
        const LRE = 1 << 14;
        /// Left-to-right override.
        const LRO = 1 << 15;
        /// Right-to-left embedding.
        const RLE = 1 << 16;
        /// Right-to-left override.
        const RLO = 1 << 17;
        /// Pop directional formatting.
        const PDF = 1 << 18;
        /// Left-to-right isolate.
        const LRI = 1 << 19;
        /// Right-to-left isolate.
        const RLI = 1 << 20;
        /// First-strong isolate.
        const FSI = 1 << 21;
        /// Pop directional isolate.
        const PDI = 1 << 22;

        /// Strong directional classes.
        const STRONG = Self::L.bits() | Self::R.bits() | Self::AL.bits();
        /// Classes that open an isolated scope.
        const ISOLATE_INITIATORS = Self::LRI.bits() | Self::RLI.bits() | Self::FSI.bits();
        /// Classes N1/N2 treat as part of a neutral-or-isolate run.
        const NEUTRAL_ISOLATES = Self::B.bits() | Self::S.bits() | Self::WS.bits()
            | Self::ON.bits() | Self::FSI.bits() | Self::LRI.bits() | Self::RLI.bits()
            | Self::PDI.bits();
        /// Invisible formatting classes rule 5.2 treats uniformly.
        const BN_LIKE = Self::BN.bits() | Self::RLE.bits() | Self::LRE.bits()
            | Self::RLO.bits() | Self::LRO.bits() | Self::PDF.bits();
        /// Classes L1 resets to the paragraph level when trailing.
        const TRAILING = Self::WS.bits() | Self::ISOLATE_INITIATORS.bits()
            | Self::PDI.bits() | Self::S.bits() | Self::B.bits();
    }
}

impl CharType {
    /// Short UAX #9 abbreviation for this single class (e.g. `"ON"`, `"AL"`).
    ///
    /// Returns `"?"` for a value that is not exactly one of the 23 classes
    /// (a union, or empty).
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::R => "R",
            Self::AL => "AL",
            Self::EN => "EN",
            Self::ES => "ES",
            Self::ET => "ET",
            Self::AN => "AN",
            Self::CS => "CS",
            Self::NSM => "NSM",
            Self::BN => "BN",
            Self::B => "B",
            Self::S => "S",
            Self::WS => "WS",
            Self::ON => "ON",
            Self::LRE => "LRE",
            Self::LRO => "LRO",
            Self::RLE => "RLE",
            Self::RLO => "RLO",
            Self::PDF => "PDF",
            Self::LRI => "LRI",
            Self::RLI => "RLI",
            Self::FSI => "FSI",
            Self::PDI => "PDI",
            _ => "?",
        }
    }

    /// Whether this class is one of the three strong directional types.
    #[must_use]
    #[inline]
    pub fn is_strong(self) -> bool {
        self.intersects(Self::STRONG)
    }

    /// Whether this class is one of the isolate-initiator types.
    #[must_use]
    #[inline]
    pub fn is_isolate_initiator(self) -> bool {
        self.intersects(Self::ISOLATE_INITIATORS)
    }

    /// Whether this class is in the BN-like (invisible formatting) set.
    #[must_use]
    #[inline]
    pub fn is_bn_like(self) -> bool {
        self.intersects(Self::BN_LIKE)
    }
}
