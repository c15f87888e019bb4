use crate::normalize::{KanaLeveler, Normalizer, Transliterator};
use crate::CompassError;
use strsim::jaro_winkler;

/// Entities that expose the labels a user may type to find them.
pub trait Searchable {
    fn search_labels(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Fuzzy(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub index: usize,
    pub kind: MatchKind,
}

/// Maps free text onto exactly one catalog entry.
///
/// Query and labels go through the same [`Normalizer`]. The first candidate
/// in catalog order holding the normalized query as one of its labels wins
/// outright. Otherwise every candidate scores the best Jaro-Winkler
/// similarity over its labels, and the first candidate reaching the global
/// maximum wins. A candidate without labels scores 0.
#[derive(Debug, Clone, Default)]
pub struct EntityResolver<T = KanaLeveler> {
    normalizer: Normalizer<T>,
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transliterator> EntityResolver<T> {
    pub fn with_transliterator(leveler: T) -> Self {
        Self {
            normalizer: Normalizer::with_transliterator(leveler),
        }
    }

    pub fn resolve_match<E, F, L>(
        &self,
        query: &str,
        candidates: &[E],
        label_fn: F,
    ) -> Result<Resolution, CompassError>
    where
        F: Fn(&E) -> L,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        if candidates.is_empty() {
            return Err(CompassError::EmptyCandidateSet);
        }
        let query = self.normalizer.normalize(query);
        let labels: Vec<Vec<String>> = candidates
            .iter()
            .map(|candidate| {
                label_fn(candidate)
                    .into_iter()
                    .map(|label| self.normalizer.normalize(label.as_ref()))
                    .collect()
            })
            .collect();

        if let Some(index) = labels.iter().position(|own| own.contains(&query)) {
            return Ok(Resolution {
                index,
                kind: MatchKind::Exact,
            });
        }

        let mut best_index = 0usize;
        let mut best_score = f64::NEG_INFINITY;
        for (index, own) in labels.iter().enumerate() {
            let score = own
                .iter()
                .map(|label| jaro_winkler(&query, label))
                .fold(0.0_f64, f64::max);
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }
        Ok(Resolution {
            index: best_index,
            kind: MatchKind::Fuzzy(best_score),
        })
    }

    pub fn resolve<'a, E, F, L>(
        &self,
        query: &str,
        candidates: &'a [E],
        label_fn: F,
    ) -> Result<&'a E, CompassError>
    where
        F: Fn(&E) -> L,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let resolution = self.resolve_match(query, candidates, label_fn)?;
        Ok(&candidates[resolution.index])
    }
}

/// [`EntityResolver::resolve`] with the default kana leveler.
pub fn resolve<'a, E, F, L>(
    query: &str,
    candidates: &'a [E],
    label_fn: F,
) -> Result<&'a E, CompassError>
where
    F: Fn(&E) -> L,
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    EntityResolver::new().resolve(query, candidates, label_fn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named {
        name: &'static str,
        labels: Vec<&'static str>,
    }

    fn alto_pair() -> Vec<Named> {
        vec![
            Named {
                name: "alto",
                labels: vec!["アルト", "ALT"],
            },
            Named {
                name: "alto-beta",
                labels: vec!["アルトβ"],
            },
        ]
    }

    fn labels(entity: &Named) -> Vec<&'static str> {
        entity.labels.clone()
    }

    #[test]
    fn exact_abbreviation_wins() {
        let candidates = alto_pair();
        let found = resolve("ALT", &candidates, labels).expect("resolve");
        assert_eq!(found.name, "alto");
    }

    #[test]
    fn hiragana_query_levels_onto_katakana_label() {
        let candidates = alto_pair();
        let resolver = EntityResolver::new();
        let resolution = resolver
            .resolve_match("あると", &candidates, labels)
            .expect("resolve");
        assert_eq!(resolution.index, 0);
        assert_eq!(resolution.kind, MatchKind::Exact);
    }

    #[test]
    fn full_width_query_takes_the_exact_path() {
        let candidates = alto_pair();
        let resolution = EntityResolver::new()
            .resolve_match("　ＡＬＴ　", &candidates, labels)
            .expect("resolve");
        assert_eq!(resolution, Resolution { index: 0, kind: MatchKind::Exact });
    }

    #[test]
    fn empty_candidates_are_rejected() {
        let candidates: Vec<Named> = Vec::new();
        let err = resolve("ALT", &candidates, labels).expect_err("empty");
        assert_eq!(err, CompassError::EmptyCandidateSet);
    }

    #[test]
    fn exact_match_beats_higher_fuzzy_score_later_in_catalog() {
        let candidates = vec![
            Named {
                name: "short",
                labels: vec!["ab"],
            },
            Named {
                name: "long",
                labels: vec!["abc"],
            },
        ];
        let found = resolve("AB", &candidates, labels).expect("resolve");
        assert_eq!(found.name, "short");
    }

    #[test]
    fn fuzzy_picks_the_closest_label() {
        let candidates = vec![
            Named {
                name: "marcos",
                labels: vec!["マルコス"],
            },
            Named {
                name: "jeanne",
                labels: vec!["ジャンヌダルク", "ジャンヌ"],
            },
        ];
        let resolution = EntityResolver::new()
            .resolve_match("じゃんぬだる", &candidates, labels)
            .expect("resolve");
        assert_eq!(resolution.index, 1);
        assert!(matches!(resolution.kind, MatchKind::Fuzzy(score) if score > 0.8));
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let candidates = vec![
            Named {
                name: "first",
                labels: vec!["xyz"],
            },
            Named {
                name: "second",
                labels: vec!["xyz", "qqq"],
            },
        ];
        for _ in 0..8 {
            let found = resolve("xyw", &candidates, labels).expect("resolve");
            assert_eq!(found.name, "first");
        }
    }

    #[test]
    fn candidates_without_labels_still_resolve() {
        let candidates = vec![
            Named {
                name: "blank",
                labels: Vec::new(),
            },
            Named {
                name: "other",
                labels: Vec::new(),
            },
        ];
        let found = resolve("anything", &candidates, labels).expect("resolve");
        assert_eq!(found.name, "blank");
    }

    #[test]
    fn reading_table_can_be_plugged_in() {
        let reader = |text: &str| KanaLeveler.level(&text.replace("十文字", "じゅうもんじ"));
        let resolver = EntityResolver::with_transliterator(reader);
        let candidates = vec![
            Named {
                name: "near",
                labels: vec!["じゅうもんあたり"],
            },
            Named {
                name: "atari",
                labels: vec!["十文字アタリ"],
            },
        ];
        let resolution = resolver
            .resolve_match("じゅうもんじあたり", &candidates, labels)
            .expect("resolve");
        assert_eq!(resolution, Resolution { index: 1, kind: MatchKind::Exact });
    }
}
