//! Character variety section - checks for uppercase, lowercase, numbers, special chars.

use secrecy::{ExposeSecret, SecretString};

const CLASS_POINTS: i32 = 15;

/// Character classes present in a password.
///
/// Letters and digits are ASCII only; anything else counts as special.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub special: bool,
}

impl CharacterClasses {
    /// 15 points per class present.
    pub fn points(&self) -> i32 {
        [self.uppercase, self.lowercase, self.digits, self.special]
            .iter()
            .filter(|&&b| b)
            .count() as i32
            * CLASS_POINTS
    }

    /// Size of the alphabet an attacker would have to search.
    pub fn charset_size(&self) -> u32 {
        let mut size = 0;
        if self.lowercase {
            size += 26;
        }
        if self.uppercase {
            size += 26;
        }
        if self.digits {
            size += 10;
        }
        if self.special {
            size += 32;
        }
        size
    }
}

pub fn character_variety_section(password: &SecretString) -> CharacterClasses {
    let pwd = password.expose_secret();
    CharacterClasses {
        uppercase: pwd.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: pwd.chars().any(|c| c.is_ascii_lowercase()),
        digits: pwd.chars().any(|c| c.is_ascii_digit()),
        special: pwd.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(pwd: &str) -> CharacterClasses {
        character_variety_section(&SecretString::new(pwd.to_string().into()))
    }

    #[test]
    fn test_variety_section_missing_uppercase() {
        let c = classes("lowercase123!");
        assert!(!c.uppercase);
        assert!(c.lowercase && c.digits && c.special);
        assert_eq!(c.points(), 45);
    }

    #[test]
    fn test_variety_section_all_categories() {
        let c = classes("HasAll123!@#");
        assert_eq!(c.points(), 60);
        assert_eq!(c.charset_size(), 94);
    }

    #[test]
    fn test_variety_section_non_ascii_is_special() {
        let c = classes("ÄÖÜ");
        assert!(!c.uppercase);
        assert!(c.special);
        assert_eq!(c.charset_size(), 32);
    }

    #[test]
    fn test_variety_section_empty() {
        let c = classes("");
        assert_eq!(c, CharacterClasses::default());
        assert_eq!(c.points(), 0);
        assert_eq!(c.charset_size(), 0);
    }
}
