//! Static company directory backing the sentiment search suggestions.
//!
//! Suggestions are filtered entirely client-side; the backend only ever sees
//! the resolved symbol (or the raw input when nothing matches).

/// A company known to the suggestion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub name: &'static str,
    pub symbol: &'static str,
}

impl Company {
    /// Display form used in the suggestion dropdown: `Name (SYMBOL)`.
    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

pub const DIRECTORY: &[Company] = &[
    Company { name: "Reliance Industries", symbol: "RELIANCE" },
    Company { name: "Tata Consultancy Services", symbol: "TCS" },
    Company { name: "Infosys", symbol: "INFY" },
    Company { name: "HDFC Bank", symbol: "HDFCBANK" },
    Company { name: "ICICI Bank", symbol: "ICICIBANK" },
    Company { name: "State Bank of India", symbol: "SBIN" },
    Company { name: "Tata Motors", symbol: "TATAMOTORS" },
    Company { name: "Bharti Airtel", symbol: "BHARTIARTL" },
    Company { name: "Adani Enterprises", symbol: "ADANIENT" },
    Company { name: "Wipro", symbol: "WIPRO" },
    Company { name: "Apple", symbol: "AAPL" },
    Company { name: "Microsoft", symbol: "MSFT" },
    Company { name: "Tesla", symbol: "TSLA" },
    Company { name: "Amazon", symbol: "AMZN" },
    Company { name: "Alphabet", symbol: "GOOGL" },
    Company { name: "Nvidia", symbol: "NVDA" },
    Company { name: "Meta Platforms", symbol: "META" },
    Company { name: "JPMorgan Chase", symbol: "JPM" },
];

/// Case-insensitive substring match on name or symbol. Inputs shorter than
/// two characters produce no suggestions.
pub fn suggest(input: &str) -> Vec<&'static Company> {
    let needle = input.trim().to_lowercase();
    if needle.len() < 2 {
        return Vec::new();
    }
    DIRECTORY
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.symbol.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Resolve free-form input to a query symbol.
///
/// A trailing `(SYM)` — the dropdown display form — yields the symbol;
/// anything else is passed through trimmed.
pub fn resolve(input: &str) -> &str {
    let trimmed = input.trim();
    if let Some(rest) = trimmed.strip_suffix(')') {
        if let Some(open) = rest.rfind('(') {
            let symbol = rest[open + 1..].trim();
            if !symbol.is_empty() {
                return symbol;
            }
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_yields_nothing() {
        assert!(suggest("").is_empty());
        assert!(suggest("t").is_empty());
        assert!(suggest(" a ").is_empty());
    }

    #[test]
    fn matches_name_and_symbol() {
        let by_name = suggest("tata");
        assert!(by_name.iter().any(|c| c.symbol == "TCS"));
        assert!(by_name.iter().any(|c| c.symbol == "TATAMOTORS"));

        let by_symbol = suggest("tsla");
        assert_eq!(by_symbol.len(), 1);
        assert_eq!(by_symbol[0].name, "Tesla");
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(suggest("RELIANCE").len(), suggest("reliance").len());
        assert!(!suggest("InFoSy").is_empty());
    }

    #[test]
    fn resolve_extracts_trailing_symbol() {
        assert_eq!(resolve("Tesla (TSLA)"), "TSLA");
        assert_eq!(resolve("  HDFC Bank (HDFCBANK)  "), "HDFCBANK");
        // No dropdown form: pass through as typed
        assert_eq!(resolve("  Zomato "), "Zomato");
        assert_eq!(resolve("weird ()"), "weird ()");
    }

    #[test]
    fn display_roundtrips_through_resolve() {
        for c in DIRECTORY {
            assert_eq!(resolve(&c.display()), c.symbol);
        }
    }
}
