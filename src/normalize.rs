use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::Field;

/// Lowercase region code to display name.
pub static REGION_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ap", "Andhra Pradesh"),
        ("ar", "Arunachal Pradesh"),
        ("as", "Assam"),
        ("br", "Bihar"),
        ("cg", "Chhattisgarh"),
        ("ga", "Goa"),
        ("gj", "Gujarat"),
        ("hr", "Haryana"),
        ("hp", "Himachal Pradesh"),
        ("jh", "Jharkhand"),
        ("ka", "Karnataka"),
        ("kl", "Kerala"),
        ("mp", "Madhya Pradesh"),
        ("mh", "Maharashtra"),
        ("mn", "Manipur"),
        ("ml", "Meghalaya"),
        ("mz", "Mizoram"),
        ("nl", "Nagaland"),
        ("od", "Odisha"),
        ("pb", "Punjab"),
        ("rj", "Rajasthan"),
        ("sk", "Sikkim"),
        ("tn", "Tamil Nadu"),
        ("ts", "Telangana"),
        ("tr", "Tripura"),
        ("up", "Uttar Pradesh"),
        ("uk", "Uttarakhand"),
        ("wb", "West Bengal"),
        ("dl", "Delhi"),
        ("jk", "Jammu and Kashmir"),
        ("la", "Ladakh"),
        ("py", "Puducherry"),
        ("ch", "Chandigarh"),
    ])
});

/// Lookup table for a field, if it has one. Only regions are mapped.
pub fn lookup_table(field: Field) -> Option<&'static HashMap<&'static str, &'static str>> {
    match field {
        Field::State => Some(&*REGION_CODES),
        Field::Study | Field::Interests => None,
    }
}

/// Maps `raw` through `table` by its lowercase form, passing unknown
/// values through untouched.
pub fn normalize<'a>(raw: &'a str, table: Option<&HashMap<&'static str, &'static str>>) -> &'a str {
    match table.and_then(|table| table.get(raw.to_lowercase().as_str())) {
        Some(name) => *name,
        None => raw,
    }
}

pub fn normalize_field(field: Field, raw: &str) -> &str {
    normalize(raw, lookup_table(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_maps_in_any_case() {
        for (code, name) in REGION_CODES.iter() {
            assert_eq!(normalize_field(Field::State, code), *name);
            assert_eq!(normalize_field(Field::State, &code.to_uppercase()), *name);

            let mut mixed = code.to_uppercase();
            mixed.replace_range(1.., &code[1..]);
            assert_eq!(normalize_field(Field::State, &mixed), *name);
        }
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(normalize_field(Field::State, "Karnataka"), "Karnataka");
        assert_eq!(normalize_field(Field::State, "zz"), "zz");
        assert_eq!(normalize_field(Field::State, ""), "");
    }

    #[test]
    fn study_and_interests_are_not_mapped() {
        assert_eq!(normalize_field(Field::Study, "ap"), "ap");
        assert_eq!(normalize_field(Field::Interests, "KA"), "KA");
    }
}
