//! Display masking for personal data.

const MASK: char = '*';

/// Keeps the first `keep_start` and last `keep_end` characters and stars out
/// the rest. Text too short to leave anything hidden is masked entirely.
pub fn mask_string(text: &str, keep_start: usize, keep_end: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    if len <= keep_start.saturating_add(keep_end) {
        return MASK.to_string().repeat(len);
    }

    let mut masked = String::with_capacity(text.len());
    masked.extend(&chars[..keep_start]);
    masked.extend(std::iter::repeat(MASK).take(len - keep_start - keep_end));
    masked.extend(&chars[len - keep_end..]);
    masked
}

/// `admin@nagari.id` becomes `a***n@nagari.id`; the domain stays readable.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return mask_string(email, 1, 1);
    };
    let mut chars = local.chars();
    let masked_local = match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if local.chars().count() > 2 => format!("{first}***{last}"),
        (Some(first), _) => format!("{first}***"),
        (None, _) => "***".to_string(),
    };
    format!("{masked_local}@{domain}")
}
