use crate::card::Card;
use crate::language::Language;
use crate::species::NameTranslations;

/// Resolves quoted card-name tokens against the card corpus and translates
/// them into the target language.
///
/// A logical name is a card's display name with the "ex" suffix applied per
/// the card's own `ex` flag; it is the relation-graph key and the form that
/// effect texts quote.
pub struct NameResolver<'a> {
    cards: &'a [Card],
    translations: &'a NameTranslations,
    target: Language,
}

impl<'a> NameResolver<'a> {
    pub fn new(cards: &'a [Card], translations: &'a NameTranslations, target: Language) -> Self {
        Self {
            cards,
            translations,
            target,
        }
    }

    pub fn target_language(&self) -> Language {
        self.target
    }

    /// A card's display name in `language`.
    ///
    /// `with_suffix` applies the "ex" suffix per the card's flag; `reverse`
    /// flips the flag to produce the alternate-variant name (the key a
    /// non-ex print shares with its ex counterpart and vice versa).
    pub fn card_name(
        &self,
        card: &Card,
        language: Language,
        with_suffix: bool,
        reverse: bool,
    ) -> String {
        let base = match self.translations.get(&card.name) {
            Some(entry) => entry.name(language).to_string(),
            None if language == Language::Ja => card.name.clone(),
            None => match &card.name_alt {
                Some(alt) => alt.clone(),
                None => {
                    log::warn!(
                        "no {language} name for '{}' (card {}), using the native name",
                        card.name,
                        card.id
                    );
                    card.name.clone()
                }
            },
        };
        if with_suffix && (card.is_ex() != reverse) {
            if language == Language::Ja {
                format!("{base}ex")
            } else {
                format!("{base} ex")
            }
        } else {
            base
        }
    }

    /// The native logical name: relation-graph key and quoted form.
    pub fn logical_name(&self, card: &Card) -> String {
        self.card_name(card, Language::Ja, true, false)
    }

    /// The logical name of the other variant lane (ex for a base print,
    /// base for an ex print).
    pub fn alternate_logical_name(&self, card: &Card) -> String {
        self.card_name(card, Language::Ja, true, true)
    }

    /// Find the card whose logical name equals `token`.
    pub fn resolve(&self, token: &str) -> Option<&'a Card> {
        self.cards
            .iter()
            .find(|card| self.logical_name(card) == token)
    }

    /// Translate one quoted name into the target language.
    ///
    /// An unresolved token is logged and returned untranslated so one bad
    /// reference never aborts a whole trait's translation.
    pub fn translated_name(&self, token: &str) -> String {
        match self.resolve(token) {
            Some(card) => self.card_name(card, self.target, true, false),
            None => {
                log::warn!(
                    "no card named '{token}', leaving the reference untranslated"
                );
                token.to_string()
            }
        }
    }

    /// Translate a run of quoted names, e.g. `「あ」「い」「う」` -> `a, i, or u`.
    pub fn translated_list(&self, quoted: &str) -> String {
        let inner = quoted.strip_prefix('「').unwrap_or(quoted);
        let inner = inner.strip_suffix('」').unwrap_or(inner);
        let mut names: Vec<String> = inner
            .split("」「")
            .map(|token| self.translated_name(token))
            .collect();
        if names.len() == 1 {
            return names.pop().unwrap_or_default();
        }
        let last = names.pop().unwrap_or_default();
        let oxford_comma = if names.len() >= 2 { "," } else { "" };
        format!("{}{} or {}", names.join(", "), oxford_comma, last)
    }
}
