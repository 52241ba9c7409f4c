//! Case conversion shared by the name variants and the template helpers.
//! A name is split into lowercase words once; every case is built from
//! that word list so all conversions agree on word boundaries.

use cruet::Inflector;

#[derive(Clone, Copy, PartialEq)]
enum Kind {
    Lower,
    Upper,
    Digit,
    Other,
}

fn kind(c: char) -> Kind {
    if c.is_numeric() {
        Kind::Digit
    } else if c.is_uppercase() {
        Kind::Upper
    } else if c.is_alphabetic() {
        Kind::Lower
    } else {
        Kind::Other
    }
}

/// Splits `value` into lowercase words.
///
/// Words end at non-alphanumeric characters, before an uppercase letter that
/// follows a lowercase one, at the end of an acronym (`HTMLParser` gives
/// `html`, `parser`) and between letters and digits.
pub fn words(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let this = kind(c);
        if this == Kind::Other {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|j| chars.get(j)) {
            let prev = kind(prev);
            let next = chars.get(i + 1).map(|&n| kind(n));
            let boundary = match (prev, this) {
                (Kind::Lower, Kind::Upper) => true,
                (Kind::Upper, Kind::Upper) => next == Some(Kind::Lower),
                (Kind::Digit, Kind::Lower | Kind::Upper) => true,
                (Kind::Lower | Kind::Upper, Kind::Digit) => true,
                _ => false,
            };
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `my-thing` → `myThing`
pub fn camel_case(value: &str) -> String {
    let words = words(value);
    let mut result = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            result.push_str(word);
        } else {
            result.push_str(&word.to_pascal_case());
        }
    }
    result
}

/// `my-thing` → `MyThing`
pub fn pascal_case(value: &str) -> String {
    words(value).iter().map(|word| word.to_pascal_case()).collect()
}

/// `MyThing` → `my-thing`
pub fn slug_case(value: &str) -> String {
    words(value).join("-")
}

/// `MyThing` → `my_thing`
pub fn snake_case(value: &str) -> String {
    words(value).join("_")
}
