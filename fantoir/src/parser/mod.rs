//! Parsers ligne à ligne des fichiers FANTOIR
//!
//! Les enregistrements sont à largeur fixe: les champs sont découpés par
//! plage d'octets puis décodés en ISO-8859-15 (Latin-9, encodage des
//! extraits FANTOIR).

pub mod communes;
pub mod voies;

use encoding_rs::ISO_8859_15;

/// Décode une plage d'octets d'un enregistrement, sans le padding
///
/// La plage est tronquée à la longueur de la ligne; une plage entièrement
/// au-delà de la fin donne une chaîne vide.
pub(crate) fn field(line: &[u8], start: usize, end: usize) -> String {
    let end = end.min(line.len());
    if start >= end {
        return String::new();
    }

    let (decoded, _, _) = ISO_8859_15.decode(&line[start..end]);
    decoded.trim().to_string()
}

/// Itère sur les lignes non vides d'un contenu brut, numérotées depuis 1
pub(crate) fn lines(data: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    data.split(|&b| b == b'\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix(b"\r").unwrap_or(line)))
        .filter(|(_, line)| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_trims_padding() {
        let line = b"75W056     PARIS                 ";
        assert_eq!(field(line, 11, 33), "PARIS");
        assert_eq!(field(line, 0, 2), "75");
    }

    #[test]
    fn test_field_latin9() {
        // "ALLÉE" en ISO-8859-15 (0xC9 = É)
        let line = b"ALL\xC9E";
        assert_eq!(field(line, 0, 5), "ALL\u{c9}E");
    }

    #[test]
    fn test_field_past_end_is_empty() {
        let line = b"court";
        assert_eq!(field(line, 10, 20), "");
        assert_eq!(field(line, 2, 20), "urt");
    }

    #[test]
    fn test_lines_skips_blank_and_strips_cr() {
        let data = b"un\r\n\ndeux\n";
        let collected: Vec<(usize, &[u8])> = lines(data).collect();

        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0], (1, b"un".as_slice()));
        assert_eq!(collected[1], (3, b"deux".as_slice()));
    }
}
