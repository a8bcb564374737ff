use std::cmp::Ordering;

use crate::card::{Card, CardKind};
use crate::corpus::Corpus;

/// Which derived ordering to sort the card list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Type,
    /// Basic < basic ex < stage-1 < stage-1 ex < stage-2 < stage-2 ex,
    /// then the trainer categories in declaration order.
    Subcategory,
    Hp,
    /// Release order; card ids are assigned in expansion order.
    Collection,
    Rarity,
    Weakness,
    Retreat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub descending: bool,
}

/// Sort cards by the requested ordering.
///
/// Records missing the sorted field always come after records carrying it,
/// in either direction; the final tie-break is always id ascending.
pub fn sort_cards(cards: &mut [Card], spec: SortSpec, corpus: &Corpus) {
    cards.sort_by(|a, b| compare(a, b, spec, corpus));
}

pub fn compare(a: &Card, b: &Card, spec: SortSpec, corpus: &Corpus) -> Ordering {
    match spec.key {
        SortKey::Type => by_type_field(a, b, pokemon_type, spec.descending, corpus),
        SortKey::Weakness => by_type_field(a, b, weakness, spec.descending, corpus),
        SortKey::Subcategory => by_subcategory(a, b, spec.descending, corpus),
        SortKey::Hp => by_field(a, b, |card| card.kind.hp(), spec.descending),
        SortKey::Collection => by_field(a, b, |card| Some(card.id.raw()), spec.descending),
        SortKey::Rarity => by_field(a, b, |card| Some(card.rarity), spec.descending),
        SortKey::Retreat => by_field(a, b, retreat, spec.descending),
    }
}

fn pokemon_type(card: &Card) -> Option<&str> {
    match &card.kind {
        CardKind::Pokemon { pokemon_type, .. } => Some(pokemon_type),
        _ => None,
    }
}

fn weakness(card: &Card) -> Option<&str> {
    match &card.kind {
        CardKind::Pokemon { weakness, .. } => Some(weakness),
        _ => None,
    }
}

fn retreat(card: &Card) -> Option<u32> {
    match &card.kind {
        CardKind::Pokemon { retreat, .. } => Some(*retreat),
        _ => None,
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending { ordering.reverse() } else { ordering }
}

fn by_field(a: &Card, b: &Card, field: fn(&Card) -> Option<u32>, descending: bool) -> Ordering {
    match (field(a), field(b)) {
        (None, None) => a.id.cmp(&b.id),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) if x == y => a.id.cmp(&b.id),
        (Some(x), Some(y)) => directed(x.cmp(&y), descending),
    }
}

fn by_type_field(
    a: &Card,
    b: &Card,
    field: fn(&Card) -> Option<&str>,
    descending: bool,
    corpus: &Corpus,
) -> Ordering {
    // Types not in the registry sort before the first declared type.
    let order = |name: &str| corpus.types.order_of(name).map_or(-1, |i| i as i64);
    match (field(a), field(b)) {
        (None, None) => a.id.cmp(&b.id),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let (x, y) = (order(x), order(y));
            if x == y {
                a.id.cmp(&b.id)
            } else {
                directed(x.cmp(&y), descending)
            }
        }
    }
}

fn by_subcategory(a: &Card, b: &Card, descending: bool, corpus: &Corpus) -> Ordering {
    match (a.kind.trainer_category(), b.kind.trainer_category()) {
        (Some(_), None) => directed(Ordering::Greater, descending),
        (None, Some(_)) => directed(Ordering::Less, descending),
        (Some(x), Some(y)) => {
            if x.rank() == y.rank() {
                a.id.cmp(&b.id)
            } else {
                directed(x.rank().cmp(&y.rank()), descending)
            }
        }
        (None, None) => {
            let stage_a = corpus.evolution_stage(&a.name);
            let stage_b = corpus.evolution_stage(&b.name);
            if stage_a != stage_b {
                return directed(stage_a.cmp(&stage_b), descending);
            }
            if a.is_ex() != b.is_ex() {
                return directed(a.is_ex().cmp(&b.is_ex()), descending);
            }
            a.id.cmp(&b.id)
        }
    }
}
