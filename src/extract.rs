use thiserror::Error;

use crate::patterns::{PatternTable, RuleContext};

/// One unit of extraction output: untranslated lead-in plus a translated
/// matched span. The final fragment carries the residual tail in
/// `leading_text` with empty `source`/`converted`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub leading_text: String,
    /// The matched native text.
    pub source: String,
    /// The rule's replacement applied to the captured groups.
    pub converted: String,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    /// A rule matched a zero-length span; the cursor can no longer advance
    /// and retrying would loop forever.
    #[error("pattern '{pattern}' matched an empty span at byte {at}")]
    EmptyMatch { pattern: String, at: usize },
}

/// Applies the pattern table to an effect text, producing the ordered
/// fragment sequence.
pub struct FragmentExtractor<'a> {
    table: &'a PatternTable,
    ctx: RuleContext<'a>,
}

impl<'a> FragmentExtractor<'a> {
    pub fn new(table: &'a PatternTable, ctx: RuleContext<'a>) -> Self {
        Self { table, ctx }
    }

    /// Repeatedly select the rule whose match starts earliest at or after the
    /// cursor (ties broken by declaration order), emit a fragment, and
    /// advance the cursor past the match.
    pub fn extract(&self, text: &str) -> Result<Vec<Fragment>, TranslateError> {
        let mut fragments = Vec::new();
        let mut cursor = 0usize;

        loop {
            let mut selected: Option<(usize, regex::Captures)> = None;
            for (rule_index, rule) in self.table.rules().iter().enumerate() {
                let Some(caps) = rule.find_at(text, cursor) else {
                    continue;
                };
                let start = caps.get(0).map_or(cursor, |m| m.start());
                // Strict comparison keeps the earlier-declared rule on ties.
                if selected
                    .as_ref()
                    .is_none_or(|(_, best)| best.get(0).map_or(usize::MAX, |m| m.start()) > start)
                {
                    selected = Some((rule_index, caps));
                }
            }

            let Some((rule_index, caps)) = selected else {
                break;
            };
            let matched = caps.get(0).map_or("", |m| m.as_str());
            let start = caps.get(0).map_or(cursor, |m| m.start());
            let end = caps.get(0).map_or(cursor, |m| m.end());
            let rule = &self.table.rules()[rule_index];
            if start == end {
                return Err(TranslateError::EmptyMatch {
                    pattern: rule.pattern().to_string(),
                    at: start,
                });
            }

            fragments.push(Fragment {
                leading_text: text[cursor..start].to_string(),
                source: matched.to_string(),
                converted: rule.apply(&caps, &self.ctx),
            });
            cursor = end;
        }

        fragments.push(Fragment {
            leading_text: text[cursor..].to_string(),
            source: String::new(),
            converted: String::new(),
        });
        Ok(fragments)
    }
}

/// Concatenate fragments and normalize sentence punctuation/capitalization.
///
/// Two passes over the concatenation: a space is inserted between a period
/// and an immediately following letter, then the first letter of the string
/// and the first letter after every ". " are capitalized. Both passes are
/// idempotent.
pub fn join_fragments(fragments: &[Fragment]) -> String {
    let joined: String = fragments
        .iter()
        .map(|fragment| format!("{}{}", fragment.leading_text, fragment.converted))
        .collect();
    capitalize_sentences(&space_after_periods(&joined))
}

fn space_after_periods(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if prev == Some('.') && c.is_ascii_alphabetic() {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn capitalize_sentences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_sentence_start = true;
    let mut window = [' '; 2];
    for c in text.chars() {
        if at_sentence_start && c.is_ascii_lowercase() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        window = [window[1], c];
        at_sentence_start = window == ['.', ' '];
    }
    out
}

/// True iff every span of the input was covered by some rule match: no
/// fragment retains untranslated leading text.
pub fn is_fully_translated(fragments: &[Fragment]) -> bool {
    fragments.iter().all(|fragment| fragment.leading_text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::names::NameResolver;
    use crate::patterns::{PatternRule, PatternTable, Replacement};
    use crate::species::NameTranslations;
    use crate::types::{PokemonType, TypeRegistry, TypeTranslations};

    fn registry() -> TypeRegistry {
        TypeRegistry::from_types(vec![PokemonType {
            color: "#a7c23c".to_string(),
            shorten: "草".to_string(),
            translations: TypeTranslations {
                en: "Grass".to_string(),
                ja: "草".to_string(),
            },
        }])
    }

    fn extract(text: &str) -> Vec<Fragment> {
        let table = PatternTable::standard().expect("table should compile");
        let cards = Vec::new();
        let translations = NameTranslations::new();
        let resolver = NameResolver::new(&cards, &translations, Language::En);
        let types = registry();
        let extractor = FragmentExtractor::new(
            &table,
            RuleContext {
                resolver: &resolver,
                types: &types,
            },
        );
        extractor.extract(text).expect("extraction should not hit empty matches")
    }

    #[test]
    fn damage_clause_and_terminator_translate_exactly() {
        let fragments = extract("相手のポケモン１匹に10ダメージ。");
        assert!(is_fully_translated(&fragments));
        assert_eq!(
            join_fragments(&fragments),
            "This attack does 10 damage to 1 of your opponent's Pokémon."
        );
    }

    #[test]
    fn untranslated_tail_lands_in_the_final_fragment() {
        let fragments = extract("相手のポケモン１匹に10ダメージ。未知の文");
        let last = fragments.last().expect("final fragment is always present");
        assert_eq!(last.leading_text, "未知の文");
        assert_eq!(last.source, "");
        assert_eq!(last.converted, "");
        assert!(!is_fully_translated(&fragments));
    }

    #[test]
    fn tie_at_the_same_position_prefers_the_earlier_rule() {
        // Both the draw rule and the generic "自分の" rule match at offset 0;
        // the draw rule is declared first and must win.
        let fragments = extract("自分の山札を１枚引く。");
        assert!(is_fully_translated(&fragments));
        assert_eq!(join_fragments(&fragments), "Draw a card.");
    }

    #[test]
    fn earliest_match_wins_over_declaration_order() {
        // The poison rule is declared far later than the damage rule but
        // matches earlier in the text, so it is emitted first.
        let fragments = extract("どくにする。相手のポケモン１匹に10ダメージ。");
        assert!(is_fully_translated(&fragments));
        assert_eq!(
            join_fragments(&fragments),
            "Is now Poisoned. This attack does 10 damage to 1 of your opponent's Pokémon."
        );
    }

    #[test]
    fn coin_flip_sequence_translates() {
        let fragments = extract("コインを１回投げウラなら、このワザは失敗。");
        assert!(is_fully_translated(&fragments));
        assert_eq!(
            join_fragments(&fragments),
            "Flip a coin. If tails, this attack does nothing."
        );
    }

    #[test]
    fn fullwidth_counts_are_normalized() {
        let fragments = extract("コインを２回投げ、オモテの数×30ダメージ。");
        assert!(is_fully_translated(&fragments));
        assert_eq!(
            join_fragments(&fragments),
            "Flip 2 coins. This attack does 30 damage for each heads."
        );
    }

    #[test]
    fn join_is_idempotent_on_translated_output() {
        let fragments = extract("相手のポケモン１匹に10ダメージ。");
        let once = join_fragments(&fragments);
        let twice = capitalize_sentences(&space_after_periods(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn period_letter_boundary_gains_a_space() {
        let fragments = vec![
            Fragment {
                leading_text: String::new(),
                source: "x".to_string(),
                converted: "flip a coin.".to_string(),
            },
            Fragment {
                leading_text: String::new(),
                source: "y".to_string(),
                converted: "if heads, draw a card".to_string(),
            },
            Fragment::default(),
        ];
        assert_eq!(join_fragments(&fragments), "Flip a coin. If heads, draw a card");
    }

    #[test]
    fn zero_length_match_aborts_extraction() {
        // An optional pattern can match an empty span anywhere; the cursor
        // could never advance past it.
        let rule = PatternRule::new(r"x?", Replacement::Literal("x"))
            .expect("rule should compile");
        let table = PatternTable::from_rules(vec![rule]);
        let cards = Vec::new();
        let translations = NameTranslations::new();
        let resolver = NameResolver::new(&cards, &translations, Language::En);
        let types = registry();
        let extractor = FragmentExtractor::new(
            &table,
            RuleContext {
                resolver: &resolver,
                types: &types,
            },
        );
        let err = extractor
            .extract("abc")
            .expect_err("an empty span must be fatal");
        assert!(matches!(err, TranslateError::EmptyMatch { at: 0, .. }));
    }

    #[test]
    fn empty_input_is_a_single_empty_fragment() {
        let fragments = extract("");
        assert_eq!(fragments.len(), 1);
        assert!(is_fully_translated(&fragments));
        assert_eq!(join_fragments(&fragments), "");
    }
}
