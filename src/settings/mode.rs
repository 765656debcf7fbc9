use std::fmt;

/// Alignment mode selected by a preset token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignmentMode {
    Subreads,
    Ccs,
    IsoSeq,
    Unrolled,
}

/// Seeding parameters used when building the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedingParameters {
    pub kmer_size: i32,
    pub minimizer_window_size: i32,
    pub homopolymer_compressed: bool,
}

impl AlignmentMode {
    pub const ALL: [AlignmentMode; 4] = [
        AlignmentMode::Subreads,
        AlignmentMode::Ccs,
        AlignmentMode::IsoSeq,
        AlignmentMode::Unrolled,
    ];

    /// Exact, case-sensitive lookup of a preset token.
    pub fn from_preset(token: &str) -> Option<Self> {
        match token {
            "SUBREAD" => Some(AlignmentMode::Subreads),
            "CCS" => Some(AlignmentMode::Ccs),
            "ISOSEQ" => Some(AlignmentMode::IsoSeq),
            "UNROLLED" => Some(AlignmentMode::Unrolled),
            _ => None,
        }
    }

    /// Token that selects this mode.
    pub fn preset_token(self) -> &'static str {
        match self {
            AlignmentMode::Subreads => "SUBREAD",
            AlignmentMode::Ccs => "CCS",
            AlignmentMode::IsoSeq => "ISOSEQ",
            AlignmentMode::Unrolled => "UNROLLED",
        }
    }

    /// Seeding defaults bundled with the preset.
    pub fn preset(self) -> SeedingParameters {
        let (kmer_size, minimizer_window_size, homopolymer_compressed) = match self {
            AlignmentMode::Subreads => (19, 10, true),
            AlignmentMode::Ccs => (19, 10, false),
            AlignmentMode::IsoSeq => (15, 5, false),
            AlignmentMode::Unrolled => (15, 15, true),
        };
        SeedingParameters {
            kmer_size,
            minimizer_window_size,
            homopolymer_compressed,
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlignmentMode::Subreads => "SUBREADS",
            AlignmentMode::Ccs => "CCS",
            AlignmentMode::IsoSeq => "ISOSEQ",
            AlignmentMode::Unrolled => "UNROLLED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, ids};

    #[test]
    fn preset_mapping_is_exact() {
        assert_eq!(AlignmentMode::from_preset("SUBREAD"), Some(AlignmentMode::Subreads));
        assert_eq!(AlignmentMode::from_preset("CCS"), Some(AlignmentMode::Ccs));
        assert_eq!(AlignmentMode::from_preset("ISOSEQ"), Some(AlignmentMode::IsoSeq));
        assert_eq!(AlignmentMode::from_preset("UNROLLED"), Some(AlignmentMode::Unrolled));

        assert_eq!(AlignmentMode::from_preset("SUBREADS"), None);
        assert_eq!(AlignmentMode::from_preset("ccs"), None);
        assert_eq!(AlignmentMode::from_preset(""), None);
    }

    #[test]
    fn every_mode_round_trips_through_its_token() {
        for mode in AlignmentMode::ALL {
            assert_eq!(AlignmentMode::from_preset(mode.preset_token()), Some(mode));
        }
    }

    #[test]
    fn catalog_allows_exactly_the_preset_tokens() {
        let allowed = catalog()
            .find(ids::ALIGN_MODE)
            .map(|def| def.kind.allowed_values())
            .unwrap_or_default();
        let tokens: Vec<_> = AlignmentMode::ALL.iter().map(|m| m.preset_token()).collect();
        assert_eq!(allowed, tokens.as_slice());
    }

    #[test]
    fn preset_bundles() {
        let ccs = AlignmentMode::Ccs.preset();
        assert_eq!((ccs.kmer_size, ccs.minimizer_window_size), (19, 10));
        assert!(!ccs.homopolymer_compressed);

        let isoseq = AlignmentMode::IsoSeq.preset();
        assert_eq!((isoseq.kmer_size, isoseq.minimizer_window_size), (15, 5));

        assert!(AlignmentMode::Subreads.preset().homopolymer_compressed);
        assert!(AlignmentMode::Unrolled.preset().homopolymer_compressed);
    }
}
