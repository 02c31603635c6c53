use strum::AsRefStr;

/// Entity kind, encoded as the first character of every id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum IdKind {
    #[strum(serialize = "g")]
    Goal,
    #[strum(serialize = "h")]
    Habit,
    #[strum(serialize = "t")]
    Task,
}

/// Generate a 9-character id: a kind prefix followed by 8 alphanumerics.
/// Alphanumeric only (no dashes or underscores) so ids never look like CLI flags.
pub fn generate_id(kind: IdKind) -> String {
    const ALPHABET: [char; 62] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H',
        'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
        'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
        's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    ];

    format!("{}{}", kind.as_ref(), nanoid::nanoid!(8, &ALPHABET))
}
