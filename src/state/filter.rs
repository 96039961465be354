/// Part-of-speech filter
///
/// The tag set is the universal dependency POS inventory used by the
/// analysis backend, plus `ALL` for "no filter".

/// One selectable filter category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PosFilter {
    #[default]
    All,
    Adjective,
    Adposition,
    Adverb,
    Auxiliary,
    Conjunction,
    CoordinatingConjunction,
    Determiner,
    Interjection,
    Noun,
    Numeral,
    Particle,
    Pronoun,
    ProperNoun,
    Punctuation,
    SubordinatingConjunction,
    Symbol,
    Verb,
    Other,
}

impl PosFilter {
    pub const ALL: [PosFilter; 19] = [
        PosFilter::All,
        PosFilter::Adjective,
        PosFilter::Adposition,
        PosFilter::Adverb,
        PosFilter::Auxiliary,
        PosFilter::Conjunction,
        PosFilter::CoordinatingConjunction,
        PosFilter::Determiner,
        PosFilter::Interjection,
        PosFilter::Noun,
        PosFilter::Numeral,
        PosFilter::Particle,
        PosFilter::Pronoun,
        PosFilter::ProperNoun,
        PosFilter::Punctuation,
        PosFilter::SubordinatingConjunction,
        PosFilter::Symbol,
        PosFilter::Verb,
        PosFilter::Other,
    ];

    /// Backend tag, as it appears after the last `_` of a frequency line
    pub fn tag(self) -> &'static str {
        match self {
            PosFilter::All => "ALL",
            PosFilter::Adjective => "ADJ",
            PosFilter::Adposition => "ADP",
            PosFilter::Adverb => "ADV",
            PosFilter::Auxiliary => "AUX",
            PosFilter::Conjunction => "CONJ",
            PosFilter::CoordinatingConjunction => "CCONJ",
            PosFilter::Determiner => "DET",
            PosFilter::Interjection => "INTJ",
            PosFilter::Noun => "NOUN",
            PosFilter::Numeral => "NUM",
            PosFilter::Particle => "PART",
            PosFilter::Pronoun => "PRON",
            PosFilter::ProperNoun => "PROPN",
            PosFilter::Punctuation => "PUNCT",
            PosFilter::SubordinatingConjunction => "SCONJ",
            PosFilter::Symbol => "SYM",
            PosFilter::Verb => "VERB",
            PosFilter::Other => "X",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PosFilter::All => "No Filter",
            PosFilter::Adjective => "Adjective",
            PosFilter::Adposition => "Adposition",
            PosFilter::Adverb => "Adverb",
            PosFilter::Auxiliary => "Auxiliary",
            PosFilter::Conjunction => "Conjunction",
            PosFilter::CoordinatingConjunction => "Coordinating Conjunction",
            PosFilter::Determiner => "Determiner",
            PosFilter::Interjection => "Interjection",
            PosFilter::Noun => "Noun",
            PosFilter::Numeral => "Numeral",
            PosFilter::Particle => "Particle",
            PosFilter::Pronoun => "Pronoun",
            PosFilter::ProperNoun => "Proper Noun",
            PosFilter::Punctuation => "Punctuation",
            PosFilter::SubordinatingConjunction => "Subordinating Conjunction",
            PosFilter::Symbol => "Symbol",
            PosFilter::Verb => "Verb",
            PosFilter::Other => "Other",
        }
    }

    /// Rarely used categories, hidden behind "Show More..."
    pub fn is_more(self) -> bool {
        !matches!(
            self,
            PosFilter::All
                | PosFilter::Adjective
                | PosFilter::Adverb
                | PosFilter::Noun
                | PosFilter::ProperNoun
                | PosFilter::Verb
        )
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|filter| filter.tag() == tag)
    }

    /// Whether an entry tagged `part` passes this filter
    pub fn matches(self, part: &str) -> bool {
        self == PosFilter::All || self.tag() == part
    }

    /// Human name of a backend tag; unknown tags are shown as-is
    pub fn name_for_tag(tag: &str) -> &str {
        match Self::from_tag(tag) {
            Some(filter) => filter.name(),
            None => tag,
        }
    }
}

impl std::fmt::Display for PosFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
