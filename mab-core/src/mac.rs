/// Normalize MAC address text to lowercase colon-separated octets.
///
/// Cisco dotted (`001e.0b41.7afd`), colon and dash forms all become
/// `00:1e:0b:41:7a:fd`. Text that does not clean up to exactly 12 characters
/// is returned lowercased with separators removed, never rejected.
pub fn normalize_mac(raw: &str) -> String {
    let cleaned: Vec<char> = raw
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ':' | '-'))
        .collect();

    if cleaned.len() != 12 {
        return cleaned.into_iter().collect();
    }

    cleaned
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}

/// Whether `raw` normalizes to six hexadecimal octets.
pub fn is_canonical_mac(raw: &str) -> bool {
    let normalized = normalize_mac(raw);
    normalized.len() == 17
        && normalized
            .split(':')
            .all(|octet| octet.len() == 2 && octet.chars().all(|c| c.is_ascii_hexdigit()))
}
