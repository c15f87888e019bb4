//! Text normalization applied to search queries and catalog labels.
//!
//! Two steps, always in this order: a kana-leveling transliteration that
//! collapses script variation into hiragana, then [`NORMALIZATION_TABLE`].

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Symbol mapping applied after transliteration. Characters mapped to `""`
/// are removed.
pub const NORMALIZATION_TABLE: &[(char, &str)] = &[
    (' ', ""),
    ('\u{3000}', ""),
    ('＆', "&"),
    ('！', "!"),
    ('（', "("),
    ('）', ")"),
    ('＊', "∗"),
    ('＃', "#"),
    ('-', ""),
    ('‐', ""),
    ('―', ""),
    ('＝', "="),
    ('／', ""),
    ('/', ""),
    // hiragana because the table runs after kana-leveling
    ('㌍', "かろりー"),
    ('［', "["),
    ('］', "]"),
    (';', ""),
];

/// Swappable kana-leveling strategy.
pub trait Transliterator {
    fn level(&self, text: &str) -> String;
}

impl<F> Transliterator for F
where
    F: Fn(&str) -> String,
{
    fn level(&self, text: &str) -> String {
        self(text)
    }
}

/// Default leveler: NFKC-folds width variants (full-width letters, half-width
/// katakana, ligatures), lowercases ASCII, folds katakana to hiragana and
/// spells romaji runs in hiragana. Kanji are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaLeveler;

impl Transliterator for KanaLeveler {
    fn level(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut run: Vec<char> = Vec::new();
        for ch in fold_width(text).chars().map(fold_char) {
            if ch.is_ascii_lowercase() {
                run.push(ch);
                continue;
            }
            if !run.is_empty() {
                romaji_to_hiragana(&run, &mut out);
                run.clear();
            }
            out.push(ch);
        }
        if !run.is_empty() {
            romaji_to_hiragana(&run, &mut out);
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer<T = KanaLeveler> {
    leveler: T,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transliterator> Normalizer<T> {
    pub fn with_transliterator(leveler: T) -> Self {
        Self { leveler }
    }

    pub fn normalize(&self, text: &str) -> String {
        apply_table(&self.leveler.level(text))
    }
}

/// Normalizes with the default [`KanaLeveler`].
pub fn normalize(text: &str) -> String {
    apply_table(&KanaLeveler.level(text))
}

pub fn apply_table(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match NORMALIZATION_TABLE.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }
    out
}

/// Table keys NFKC would rewrite to something other than their table value.
const KEPT_FROM_NFKC: &[(char, char)] = &[('＊', '∗')];

// Marks NFKC could not compose onto their base are dropped, so removing a
// space later never lets a mark compose on the next pass.
fn fold_width(text: &str) -> String {
    text.chars()
        .map(|ch| {
            KEPT_FROM_NFKC
                .iter()
                .find(|(from, _)| *from == ch)
                .map_or(ch, |(_, to)| *to)
        })
        .nfkc()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

fn fold_char(ch: char) -> char {
    match ch {
        'A'..='Z' => ch.to_ascii_lowercase(),
        // katakana ァ..ヶ and the iteration marks ヽヾ
        '\u{30A1}'..='\u{30F6}' | '\u{30FD}' | '\u{30FE}' => {
            char::from_u32(ch as u32 - 0x60).unwrap_or(ch)
        }
        _ => ch,
    }
}

const ROMAJI: &[(&str, &str)] = &[
    ("a", "あ"), ("i", "い"), ("u", "う"), ("e", "え"), ("o", "お"),
    ("ka", "か"), ("ki", "き"), ("ku", "く"), ("ke", "け"), ("ko", "こ"),
    ("kya", "きゃ"), ("kyu", "きゅ"), ("kyo", "きょ"),
    ("ga", "が"), ("gi", "ぎ"), ("gu", "ぐ"), ("ge", "げ"), ("go", "ご"),
    ("gya", "ぎゃ"), ("gyu", "ぎゅ"), ("gyo", "ぎょ"),
    ("sa", "さ"), ("si", "し"), ("shi", "し"), ("su", "す"), ("se", "せ"), ("so", "そ"),
    ("sha", "しゃ"), ("shu", "しゅ"), ("she", "しぇ"), ("sho", "しょ"),
    ("sya", "しゃ"), ("syu", "しゅ"), ("syo", "しょ"),
    ("za", "ざ"), ("zi", "じ"), ("zu", "ず"), ("ze", "ぜ"), ("zo", "ぞ"),
    ("ja", "じゃ"), ("ji", "じ"), ("ju", "じゅ"), ("je", "じぇ"), ("jo", "じょ"),
    ("zya", "じゃ"), ("zyu", "じゅ"), ("zyo", "じょ"),
    ("jya", "じゃ"), ("jyu", "じゅ"), ("jyo", "じょ"),
    ("ta", "た"), ("ti", "ち"), ("chi", "ち"), ("tu", "つ"), ("tsu", "つ"), ("te", "て"), ("to", "と"),
    ("cha", "ちゃ"), ("chu", "ちゅ"), ("che", "ちぇ"), ("cho", "ちょ"),
    ("tya", "ちゃ"), ("tyu", "ちゅ"), ("tyo", "ちょ"),
    ("da", "だ"), ("di", "ぢ"), ("du", "づ"), ("de", "で"), ("do", "ど"),
    ("na", "な"), ("ni", "に"), ("nu", "ぬ"), ("ne", "ね"), ("no", "の"),
    ("nya", "にゃ"), ("nyu", "にゅ"), ("nyo", "にょ"), ("nn", "ん"),
    ("ha", "は"), ("hi", "ひ"), ("hu", "ふ"), ("fu", "ふ"), ("he", "へ"), ("ho", "ほ"),
    ("hya", "ひゃ"), ("hyu", "ひゅ"), ("hyo", "ひょ"),
    ("fa", "ふぁ"), ("fi", "ふぃ"), ("fe", "ふぇ"), ("fo", "ふぉ"),
    ("ba", "ば"), ("bi", "び"), ("bu", "ぶ"), ("be", "べ"), ("bo", "ぼ"),
    ("bya", "びゃ"), ("byu", "びゅ"), ("byo", "びょ"),
    ("pa", "ぱ"), ("pi", "ぴ"), ("pu", "ぷ"), ("pe", "ぺ"), ("po", "ぽ"),
    ("pya", "ぴゃ"), ("pyu", "ぴゅ"), ("pyo", "ぴょ"),
    ("ma", "ま"), ("mi", "み"), ("mu", "む"), ("me", "め"), ("mo", "も"),
    ("mya", "みゃ"), ("myu", "みゅ"), ("myo", "みょ"),
    ("ya", "や"), ("yu", "ゆ"), ("yo", "よ"),
    ("ra", "ら"), ("ri", "り"), ("ru", "る"), ("re", "れ"), ("ro", "ろ"),
    ("rya", "りゃ"), ("ryu", "りゅ"), ("ryo", "りょ"),
    ("wa", "わ"), ("wi", "うぃ"), ("we", "うぇ"), ("wo", "を"),
    ("va", "ゔぁ"), ("vi", "ゔぃ"), ("vu", "ゔ"), ("ve", "ゔぇ"), ("vo", "ゔぉ"),
    ("xa", "ぁ"), ("xi", "ぃ"), ("xu", "ぅ"), ("xe", "ぇ"), ("xo", "ぉ"),
    ("la", "ぁ"), ("li", "ぃ"), ("lu", "ぅ"), ("le", "ぇ"), ("lo", "ぉ"),
    ("xya", "ゃ"), ("xyu", "ゅ"), ("xyo", "ょ"),
    ("lya", "ゃ"), ("lyu", "ゅ"), ("lyo", "ょ"),
    ("xtu", "っ"), ("ltu", "っ"), ("xtsu", "っ"), ("ltsu", "っ"),
];

const LONGEST_ROMAJI: usize = 4;

fn romaji_at(run: &[char], start: usize) -> Option<(&'static str, usize)> {
    let max = LONGEST_ROMAJI.min(run.len() - start);
    (1..=max).rev().find_map(|len| {
        let key: String = run[start..start + len].iter().collect();
        ROMAJI
            .iter()
            .find(|(romaji, _)| *romaji == key)
            .map(|(_, kana)| (*kana, len))
    })
}

// Every table entry contains a vowel or is "nn", and a lone `n` always
// becomes ん, so letters left over after one pass never convert on a later
// pass. The doubled-consonant rule only fires in front of a syllable for the
// same reason.
fn romaji_to_hiragana(run: &[char], out: &mut String) {
    let mut idx = 0usize;
    while idx < run.len() {
        if let Some((kana, len)) = romaji_at(run, idx) {
            out.push_str(kana);
            idx += len;
            continue;
        }
        let ch = run[idx];
        // `tch` is the doubled spelling of `ch`
        let doubles = run.get(idx + 1) == Some(&ch)
            || (ch == 't' && run.get(idx + 1) == Some(&'c') && run.get(idx + 2) == Some(&'h'));
        let doubled = doubles
            && !matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o' | 'n')
            && romaji_at(run, idx + 1).is_some();
        if doubled {
            out.push('っ');
        } else if ch == 'n' {
            out.push('ん');
        } else {
            out.push(ch);
        }
        idx += 1;
    }
}
