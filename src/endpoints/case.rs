//! Case conversions between call names, category keys and URI segments.

/// Lower-cases the first character: `ProductsAll` -> `productsAll`.
pub(crate) fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Upper-cases the first character: `images` -> `Images`.
pub(crate) fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Converts a lowerCamelCase key into its URI segment:
/// `smartCollections` -> `smart_collections`. Keys without interior capitals
/// are returned unchanged.
pub(crate) fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts a snake_case body key into lowerCamelCase:
/// `smart_collection` -> `smartCollection`.
pub(crate) fn to_camel_case(key: &str) -> String {
    let mut parts = key.split('_').filter(|p| !p.is_empty());
    let Some(first) = parts.next() else {
        return String::new();
    };
    parts.fold(first.to_string(), |mut acc, part| {
        acc.push_str(&upper_first(part));
        acc
    })
}

/// Best-effort English singular of a plural resource key.
///
/// `products` -> `product`, `policies` -> `policy`, `addresses` -> `address`.
/// Keys that do not end in `s` are returned unchanged.
pub(crate) fn singular(key: &str) -> String {
    if let Some(stem) = key.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "ches", "shes"] {
        if key.ends_with(suffix) {
            return key[..key.len() - 2].to_string();
        }
    }
    match key.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => key.to_string(),
    }
}

/// Byte offsets of every interior uppercase ASCII letter.
pub(crate) fn pascal_boundaries(s: &str) -> impl Iterator<Item = usize> + '_ {
    s.char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_ascii_uppercase())
        .map(|(i, _)| i)
}

/// Returns `true` if `rest` is empty or begins a new PascalCase word.
pub(crate) fn at_word_boundary(rest: &str) -> bool {
    rest.chars().next().map_or(true, |c| c.is_ascii_uppercase())
}
