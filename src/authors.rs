//! Author name heuristics.
//!
//! Exports write author names in several shapes (`Lastname, First`,
//! `Lastname F.`, `First Lastname`) without saying which one they use.
//! [`guess_lastname`] picks the family name by looking at punctuation and
//! capitalization. It is a best-effort guess and will get some names wrong,
//! which is acceptable because it only feeds comparison keys.

/// Guess the family name in an author string.
///
/// Rules, in order:
/// 1. With a comma, the lastname is everything before the first comma
///    (`"Leela, T."`).
/// 2. Ending in a period or an uppercase letter, the lastname is the first
///    space-separated token (`"Zoidberg J.A."`, `"Conrad H"`).
/// 3. Otherwise it is the last space-separated token
///    (`"Bender Bending Rodríguez"`).
///
/// # Examples
///
/// ```
/// use refmatch::authors::guess_lastname;
///
/// assert_eq!(guess_lastname("Leela, T."), "Leela");
/// assert_eq!(guess_lastname("Zoidberg J.A."), "Zoidberg");
/// assert_eq!(guess_lastname("Fansworth H"), "Fansworth");
/// assert_eq!(guess_lastname("Bender Bending Rodríguez"), "Rodríguez");
/// ```
#[must_use]
pub fn guess_lastname(author: &str) -> &str {
    let Some(last) = author.chars().last() else {
        return author;
    };

    if let Some((lastname, _)) = author.split_once(',') {
        lastname
    } else if last == '.' || last.is_uppercase() {
        author.split(' ').next().unwrap_or(author)
    } else {
        author.rsplit(' ').next().unwrap_or(author)
    }
}

/// Apply [`guess_lastname`] to every author, keeping order.
#[must_use]
pub fn lastnames<'a, I>(authors: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    authors.into_iter().map(guess_lastname).collect()
}
