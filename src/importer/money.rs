// ==========================================
// CRM Core - Currency parsing
// ==========================================
// The only place locale-formatted monetary cells are parsed.
// Empty cell → 0; non-empty unparseable cell → error.
// ==========================================

/// Separator convention of a company's value columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberConvention {
    /// `1,234.56`: comma groups thousands, dot is the decimal mark
    CommaThousands,
    /// `1.234,56`: dot groups thousands, comma is the decimal mark
    CommaDecimal,
}

/// Parses a monetary cell.
///
/// A leading currency symbol (`R$`, `$`) and inner spaces are ignored.
///
/// # Returns
/// - Ok(0.0) for an empty cell
/// - Err(original text) when the cell is not a number in `convention`
pub fn parse_money(raw: &str, convention: NumberConvention) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let cleaned: String = trimmed
        .trim_start_matches("R$")
        .trim_start_matches('$')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = match convention {
        NumberConvention::CommaThousands => cleaned.replace(',', ""),
        NumberConvention::CommaDecimal => cleaned.replace('.', "").replace(',', "."),
    };

    if normalized.is_empty()
        || !normalized
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(raw.to_string());
    }

    let value = normalized.parse::<f64>().map_err(|_| raw.to_string())?;
    if !value.is_finite() {
        return Err(raw.to_string());
    }
    Ok(value)
}
