// ==========================================
// CRM Core - Brazilian state codes
// ==========================================
// Free-text state name → two-letter code (UF).
// Unrecognized names map to an empty code.
// ==========================================

const STATES: [(&str, &str); 27] = [
    ("acre", "AC"),
    ("alagoas", "AL"),
    ("amapa", "AP"),
    ("amazonas", "AM"),
    ("bahia", "BA"),
    ("ceara", "CE"),
    ("distrito federal", "DF"),
    ("espirito santo", "ES"),
    ("goias", "GO"),
    ("maranhao", "MA"),
    ("mato grosso", "MT"),
    ("mato grosso do sul", "MS"),
    ("minas gerais", "MG"),
    ("para", "PA"),
    ("paraiba", "PB"),
    ("parana", "PR"),
    ("pernambuco", "PE"),
    ("piaui", "PI"),
    ("rio de janeiro", "RJ"),
    ("rio grande do norte", "RN"),
    ("rio grande do sul", "RS"),
    ("rondonia", "RO"),
    ("roraima", "RR"),
    ("santa catarina", "SC"),
    ("sao paulo", "SP"),
    ("sergipe", "SE"),
    ("tocantins", "TO"),
];

/// Maps a state name (any case, with or without accents) or an existing
/// two-letter code to the canonical code.
pub fn state_code(raw: &str) -> &'static str {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return "";
    }

    if normalized.len() == 2 {
        let upper = normalized.to_ascii_uppercase();
        if let Some((_, code)) = STATES.iter().find(|(_, code)| *code == upper) {
            return *code;
        }
    }

    STATES
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, code)| *code)
        .unwrap_or("")
}

// lowercase, accents folded, inner whitespace collapsed
fn normalize(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'ü' | 'Ú' | 'Ü' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_with_and_without_accents() {
        assert_eq!(state_code("São Paulo"), "SP");
        assert_eq!(state_code("sao paulo"), "SP");
        assert_eq!(state_code("  PARANÁ "), "PR");
        assert_eq!(state_code("Pará"), "PA");
        assert_eq!(state_code("Mato  Grosso do Sul"), "MS");
    }

    #[test]
    fn test_codes_pass_through() {
        assert_eq!(state_code("rj"), "RJ");
        assert_eq!(state_code("DF"), "DF");
    }

    #[test]
    fn test_unknown_is_empty() {
        assert_eq!(state_code("Atlantis"), "");
        assert_eq!(state_code("XX"), "");
        assert_eq!(state_code(""), "");
    }
}
