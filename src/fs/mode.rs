//! Permission Engine
//!
//! Modes are nine bits: owner, group and other triplets, each ordered
//! read(4) / write(2) / execute(1). Bits are descriptive metadata and are
//! never consulted to grant or deny access.

use lazy_static::lazy_static;
use regex_lite::Regex;
use thiserror::Error;

use super::types::MODE_MASK;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("invalid mode: '{0}'")]
    InvalidMode(String),
}

lazy_static! {
    static ref CLAUSE: Regex = Regex::new(r"^([ugoa]*)([+\-=])([rwx]*)$").unwrap();
}

const SYMBOLIC_CHARS: &str = "ugoa+-=rwx,";

/// Parse a numeric mode of three or four octal digits.
///
/// A leading fourth digit (special bits) is accepted and dropped.
pub fn set_octal(mode_str: &str) -> Result<u32, ModeError> {
    let valid_len = (3..=4).contains(&mode_str.len());
    if !valid_len || !mode_str.chars().all(|c| ('0'..='7').contains(&c)) {
        return Err(ModeError::InvalidMode(mode_str.to_string()));
    }
    u32::from_str_radix(mode_str, 8)
        .map(|m| m & MODE_MASK)
        .map_err(|_| ModeError::InvalidMode(mode_str.to_string()))
}

/// Apply comma-separated `<who><op><perms>` clauses to `current`.
///
/// Clauses that do not match the grammar are skipped.
pub fn set_symbolic(clauses: &str, current: u32) -> u32 {
    let mut mode = current & MODE_MASK;
    for clause in clauses.split(',') {
        let caps = match CLAUSE.captures(clause) {
            Some(caps) => caps,
            None => continue,
        };
        let who = caps.get(1).map_or("", |m| m.as_str());
        let op = caps.get(2).map_or("", |m| m.as_str());
        let perms = caps.get(3).map_or("", |m| m.as_str());

        let mut bits = 0;
        if perms.contains('r') {
            bits |= 4;
        }
        if perms.contains('w') {
            bits |= 2;
        }
        if perms.contains('x') {
            bits |= 1;
        }

        let who = if who.is_empty() || who.contains('a') { "ugo" } else { who };
        for role in who.chars() {
            let shift = match role {
                'u' => 6,
                'g' => 3,
                'o' => 0,
                _ => continue,
            };
            let mask = bits << shift;
            match op {
                "+" => mode |= mask,
                "-" => mode &= !mask,
                "=" => mode = (mode & !(0o7 << shift)) | mask,
                _ => {}
            }
        }
    }
    mode
}

/// Parse a chmod argument: octal when it is all digits, symbolic otherwise.
///
/// Characters outside the symbolic alphabet make the whole argument invalid;
/// within the alphabet, malformed clauses are skipped.
pub fn parse_mode(arg: &str, current: u32) -> Result<u32, ModeError> {
    if arg.is_empty() {
        return Err(ModeError::InvalidMode(arg.to_string()));
    }
    if arg.chars().all(|c| c.is_ascii_digit()) {
        return set_octal(arg);
    }
    if arg.chars().all(|c| SYMBOLIC_CHARS.contains(c)) {
        return Ok(set_symbolic(arg, current));
    }
    Err(ModeError::InvalidMode(arg.to_string()))
}

/// Render a mode as a type glyph followed by nine `rwx` characters.
pub fn render(glyph: char, mode: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(glyph);
    for shift in [6, 3, 0] {
        let triplet = (mode >> shift) & 0o7;
        out.push(if triplet & 4 != 0 { 'r' } else { '-' });
        out.push(if triplet & 2 != 0 { 'w' } else { '-' });
        out.push(if triplet & 1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octal() {
        assert_eq!(set_octal("755").unwrap(), 0o755);
        assert_eq!(set_octal("0644").unwrap(), 0o644);
        assert_eq!(set_octal("4755").unwrap(), 0o755);
        assert!(set_octal("75").is_err());
        assert!(set_octal("789").is_err());
        assert!(set_octal("12345").is_err());
    }

    #[test]
    fn test_symbolic_plus_minus_equals() {
        assert_eq!(set_symbolic("u+x", 0o644), 0o744);
        assert_eq!(set_symbolic("a+x", 0o644), 0o755);
        assert_eq!(set_symbolic("+x", 0o644), 0o755);
        assert_eq!(set_symbolic("g-w", 0o664), 0o644);
        assert_eq!(set_symbolic("u=rwx", 0o644), 0o744);
        assert_eq!(set_symbolic("o=", 0o777), 0o770);
        assert_eq!(set_symbolic("ug+w,o-r", 0o444), 0o660);
    }

    #[test]
    fn test_malformed_clauses_are_skipped() {
        assert_eq!(set_symbolic("ux+,u+x", 0o644), 0o744);
        assert_eq!(set_symbolic("+-", 0o600), 0o600);
        assert_eq!(set_symbolic("", 0o600), 0o600);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755", 0o644).unwrap(), 0o755);
        assert_eq!(parse_mode("u+x", 0o644).unwrap(), 0o744);
        assert_eq!(parse_mode("999", 0o644), Err(ModeError::InvalidMode("999".to_string())));
        assert!(parse_mode("xyz", 0o644).is_err());
        assert!(parse_mode("u+s", 0o644).is_err());
        assert!(parse_mode("", 0o644).is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(render('-', 0o644), "-rw-r--r--");
        assert_eq!(render('d', 0o755), "drwxr-xr-x");
        assert_eq!(render('l', 0o777), "lrwxrwxrwx");
        assert_eq!(render('h', 0o000), "h---------");
    }
}
