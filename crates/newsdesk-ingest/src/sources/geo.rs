/// Characters that would break out of the quoted OR expression.
const STRIPPED: &[char] = &['(', ')', '"', '\u{201c}', '\u{201d}', '\u{2018}', '\u{2019}'];

fn clean(part: &str) -> String {
    part.chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Location query for the `local` category.
///
/// Returns an empty string when both inputs are blank after cleaning, in
/// which case no search should be issued.
#[must_use]
pub fn build_geo_query(city: &str, state: &str) -> String {
    let city = clean(city);
    let state = clean(state);

    let mut terms = Vec::new();
    if !city.is_empty() && !state.is_empty() {
        terms.push(format!("\"{city}, {state}\""));
        terms.push(format!("\"{city} {state}\""));
    }
    if !city.is_empty() {
        terms.push(format!("\"{city}\""));
    }
    if !state.is_empty() {
        terms.push(format!("\"{state}\""));
    }

    if terms.is_empty() {
        return String::new();
    }
    format!("({})", terms.join(" OR "))
}
