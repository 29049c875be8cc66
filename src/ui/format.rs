//! Text formatting for amounts and balance gauges.

/// Satoshis with thousands separators, e.g. `-1,234,567`.
pub fn sats(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Local share of a channel as a bar plus percentage, e.g. `[|||       ] 30%`.
pub fn gauge(local: i64, capacity: i64, width: usize) -> String {
    let percent = if capacity > 0 {
        (local.clamp(0, capacity) * 100 / capacity) as usize
    } else {
        0
    };
    let filled = percent * width / 100;
    format!(
        "[{}{}] {:>3}%",
        "|".repeat(filled),
        " ".repeat(width - filled),
        percent
    )
}

/// First and last `keep` characters of a long identifier.
pub fn abbreviate(text: &str, keep: usize) -> String {
    let count = text.chars().count();
    if count <= keep * 2 + 1 {
        return text.to_string();
    }
    let head: String = text.chars().take(keep).collect();
    let tail: String = text.chars().skip(count - keep).collect();
    format!("{head}…{tail}")
}
