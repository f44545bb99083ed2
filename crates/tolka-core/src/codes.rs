//! Detector-label to translator-code mapping

/// Known detector locale tags and the 2-letter codes the translator expects
const KNOWN_CODES: &[(&str, &str)] = &[
    ("eng_Latn", "en"),
    ("nld_Latn", "nl"),
    ("spa_Latn", "es"),
    ("fra_Latn", "fr"),
    ("deu_Latn", "de"),
    ("ita_Latn", "it"),
    ("por_Latn", "pt"),
    ("rus_Cyrl", "ru"),
    ("jpn_Jpan", "ja"),
    ("kor_Hang", "ko"),
    ("zho_Hans", "zh"),
    ("arb_Arab", "ar"),
    ("hin_Deva", "hi"),
    ("pol_Latn", "pl"),
    ("tur_Latn", "tr"),
    ("ces_Latn", "cs"),
    ("ron_Latn", "ro"),
    ("ukr_Cyrl", "uk"),
    ("hye_Armn", "hy"),
    ("bul_Cyrl", "bg"),
    ("slk_Latn", "sk"),
    ("slv_Latn", "sl"),
    ("hrv_Latn", "hr"),
    ("bos_Latn", "bs"),
    ("srp_Cyrl", "sr"),
    ("mkd_Cyrl", "mk"),
    ("kat_Geor", "ka"),
    ("eus_Latn", "eu"),
    ("cat_Latn", "ca"),
    ("glg_Latn", "gl"),
];

/// Map a detector output label to a 2-letter translator code.
///
/// Pure and total: a bare 2-character code passes through, known locale tags
/// use the fixed table, and anything else degrades to a best-effort prefix
/// (the segment before the first underscore, or the label itself, truncated
/// to 2 characters). Labels outside the table can map to a wrong guess; that
/// is accepted behavior, not an error.
pub fn to_short_code(label: &str) -> String {
    if label.chars().count() == 2 {
        return label.to_string();
    }

    if let Some((_, short)) = KNOWN_CODES.iter().find(|(tag, _)| *tag == label) {
        return (*short).to_string();
    }

    if let Some((head, _)) = label.split_once('_') {
        return head.chars().take(2).collect();
    }

    label.chars().take(2).collect()
}
