//! Label lookup tables. Unknown codes pass through unchanged.

use crate::ephemeris::types::{BodyId, HOUSE_CODES};
use crate::ephemeris::zodiac::SIGN_CODES;
use crate::rendering::ChartKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report and chart label language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    FR,
    EN,
    ES,
    IT,
    DE,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FR" => Ok(Language::FR),
            "EN" => Ok(Language::EN),
            "ES" => Ok(Language::ES),
            "IT" => Ok(Language::IT),
            "DE" => Ok(Language::DE),
            other => Err(format!("unsupported language {other:?} (expected FR, EN, ES, IT or DE)")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Language::FR => "FR",
            Language::EN => "EN",
            Language::ES => "ES",
            Language::IT => "IT",
            Language::DE => "DE",
        };
        f.write_str(code)
    }
}

struct LabelTable {
    bodies: [&'static str; 14],
    signs: [&'static str; 12],
    houses: [&'static str; 12],
    unknown: &'static str,
}

const FR: LabelTable = LabelTable {
    bodies: [
        "Soleil", "Lune", "Mercure", "Vénus", "Mars", "Jupiter", "Saturne", "Uranus", "Neptune",
        "Pluton", "Nœud Nord", "Nœud Nord Vrai", "Chiron", "Lilith",
    ],
    signs: [
        "Bélier", "Taureau", "Gémeaux", "Cancer", "Lion", "Vierge", "Balance", "Scorpion",
        "Sagittaire", "Capricorne", "Verseau", "Poissons",
    ],
    houses: [
        "Maison 1 (Ascendant)", "Maison 2", "Maison 3", "Maison 4", "Maison 5", "Maison 6",
        "Maison 7 (Descendant)", "Maison 8", "Maison 9", "Maison 10 (MC)", "Maison 11", "Maison 12",
    ],
    unknown: "Inconnu",
};

const EN: LabelTable = LabelTable {
    bodies: [
        "Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
        "Pluto", "North Node", "True North Node", "Chiron", "Lilith",
    ],
    signs: [
        "Aries", "Taurus", "Gemini", "Cancer", "Leo", "Virgo", "Libra", "Scorpio", "Sagittarius",
        "Capricorn", "Aquarius", "Pisces",
    ],
    houses: [
        "House 1 (Ascendant)", "House 2", "House 3", "House 4", "House 5", "House 6",
        "House 7 (Descendant)", "House 8", "House 9", "House 10 (MC)", "House 11", "House 12",
    ],
    unknown: "Unknown",
};

impl Language {
    fn is_french(&self) -> bool {
        matches!(self, Language::FR)
    }

    fn table(&self) -> &'static LabelTable {
        if self.is_french() {
            &FR
        } else {
            &EN
        }
    }

    pub fn body(&self, body: BodyId) -> &'static str {
        self.table().bodies[body as usize]
    }

    /// Sign label for an engine code ("Ari"); unknown codes are returned as given.
    pub fn sign<'a>(&self, code: &'a str) -> &'a str {
        match SIGN_CODES.iter().position(|c| *c == code) {
            Some(idx) => self.table().signs[idx],
            None => code,
        }
    }

    /// House label for an engine code ("First_House"); unknown codes are returned as given.
    pub fn house<'a>(&self, code: &'a str) -> &'a str {
        match HOUSE_CODES.iter().position(|c| *c == code) {
            Some(idx) => self.table().houses[idx],
            None => code,
        }
    }

    pub fn unknown(&self) -> &'static str {
        self.table().unknown
    }

    pub fn placement_sentence(&self, body: &str, sign: &str, position: f64, house: &str) -> String {
        if self.is_french() {
            format!("Le {body} en {sign} à {position:.2}° dans la {house}")
        } else {
            format!("{body} in {sign} at {position:.2}° in {house}")
        }
    }

    pub fn unreadable_body(&self, body: BodyId) -> String {
        if self.is_french() {
            format!("Impossible de lire les données de {}", body.key())
        } else {
            format!("Unable to read data for {}", body.key())
        }
    }

    pub fn sun_sign_headline(&self, sign: &str) -> String {
        if self.is_french() {
            format!("Signe solaire: {sign}")
        } else {
            format!("Sun sign: {sign}")
        }
    }

    pub fn moon_sign_headline(&self, sign: &str) -> String {
        if self.is_french() {
            format!("Signe lunaire: {sign}")
        } else {
            format!("Moon sign: {sign}")
        }
    }

    pub fn ascendant_headline(&self, sign: &str) -> String {
        format!("Ascendant: {sign}")
    }

    /// Placeholder text; element distribution is not analysed.
    pub fn dominant_element_placeholder(&self) -> &'static str {
        if self.is_french() {
            "Analyse des éléments dominants..."
        } else {
            "Dominant element analysis..."
        }
    }

    pub fn personality_summary(&self, sun: &str, moon: &str) -> String {
        if self.is_french() {
            format!("Personnalité marquée par le {sun} avec une lune en {moon}")
        } else {
            format!("Personality shaped by {sun} with the moon in {moon}")
        }
    }

    pub fn synastry_summary(&self, first: &str, second: &str) -> String {
        if self.is_french() {
            format!("Analyse de compatibilité entre {first} et {second}")
        } else {
            format!("Compatibility analysis between {first} and {second}")
        }
    }

    pub fn composite_summary(&self, first: &str, second: &str) -> String {
        if self.is_french() {
            format!("Carte composite de {first} et {second}")
        } else {
            format!("Composite chart of {first} and {second}")
        }
    }

    /// `date` is already formatted as "dd/mm/yyyy".
    pub fn transit_summary(&self, date: &str, name: &str) -> String {
        if self.is_french() {
            format!("Transits du {date} pour {name}")
        } else {
            format!("Transits of {date} for {name}")
        }
    }

    pub fn chart_title(&self, kind: ChartKind, name: &str) -> String {
        let label = match (self.is_french(), kind) {
            (true, ChartKind::Natal) => "Thème natal",
            (true, ChartKind::Synastry) => "Synastrie",
            (true, ChartKind::Transit) => "Transits",
            (true, ChartKind::Composite) => "Carte composite",
            (false, ChartKind::Natal) => "Natal Chart",
            (false, ChartKind::Synastry) => "Synastry",
            (false, ChartKind::Transit) => "Transits",
            (false, ChartKind::Composite) => "Composite Chart",
        };
        format!("{label} - {name}")
    }
}

/// Longer readings for the interpretations endpoint, by theme.
pub(crate) struct DetailedPhrases {
    pub sun: &'static str,
    pub moon: &'static str,
    pub ascendant: &'static str,
    pub dominant_element: &'static str,
    pub tenth_house: &'static str,
    pub saturn: &'static str,
    pub seventh_house: &'static str,
    pub venus: &'static str,
    pub ninth_house: &'static str,
    pub jupiter: &'static str,
}

impl Language {
    pub(crate) fn detailed(&self) -> DetailedPhrases {
        if self.is_french() {
            DetailedPhrases {
                sun: "Signe solaire en {} - Personnalité de base",
                moon: "Signe lunaire en {} - Émotions et instincts",
                ascendant: "Ascendant en {} - Image extérieure",
                dominant_element: "Analyse des éléments dominants dans le thème",
                tenth_house: "MC en {} - Carrière et réputation",
                saturn: "Saturne en {} - Structure et responsabilités",
                seventh_house: "Descendant en {} - Relations",
                venus: "Vénus en {} - Amour et valeurs",
                ninth_house: "Maison 9 en {} - Philosophie et spiritualité",
                jupiter: "Jupiter en {} - Expansion et sagesse",
            }
        } else {
            DetailedPhrases {
                sun: "Sun sign in {} - Core personality",
                moon: "Moon sign in {} - Emotions and instincts",
                ascendant: "Ascendant in {} - Outer image",
                dominant_element: "Analysis of the dominant elements in the chart",
                tenth_house: "MC in {} - Career and reputation",
                saturn: "Saturn in {} - Structure and responsibilities",
                seventh_house: "Descendant in {} - Relationships",
                venus: "Venus in {} - Love and values",
                ninth_house: "House 9 in {} - Philosophy and spirituality",
                jupiter: "Jupiter in {} - Expansion and wisdom",
            }
        }
    }
}

/// Fills the single `{}` slot of a phrase.
pub(crate) fn fill(phrase: &str, value: &str) -> String {
    phrase.replacen("{}", value, 1)
}
