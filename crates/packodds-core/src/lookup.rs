//! Display-name lookup for cards and packets

use std::borrow::Cow;
use std::collections::HashMap;

/// Maps an identifier (card name, packet name) to the text shown to the user
pub trait TextLookup {
    fn text<'a>(&'a self, key: &'a str) -> Cow<'a, str>;
}

/// Shows identifiers as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl TextLookup for Verbatim {
    fn text<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(key)
    }
}

/// Table lookup, falling back to the identifier for missing keys
impl TextLookup for HashMap<String, String> {
    fn text<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.get(key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key),
        }
    }
}

impl<T: TextLookup + ?Sized> TextLookup for &T {
    fn text<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        (**self).text(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim() {
        assert_eq!(Verbatim.text("Pikachu ex"), "Pikachu ex");
    }

    #[test]
    fn test_table_fallback() {
        let mut names = HashMap::new();
        names.insert("Pikachu ex".to_string(), "皮卡丘ex".to_string());

        assert_eq!(names.text("Pikachu ex"), "皮卡丘ex");
        assert_eq!(names.text("Mew ex"), "Mew ex");
    }
}
