use regex::{Captures, Regex};

use crate::names::NameResolver;
use crate::types::TypeRegistry;

/// Lookup tables a computed replacement may consult. Passed by reference so
/// replacement functions stay plain function pointers.
pub struct RuleContext<'a> {
    pub resolver: &'a NameResolver<'a>,
    pub types: &'a TypeRegistry,
}

type ComputedFn = fn(&Captures, &RuleContext) -> String;

/// Replacement side of a rewrite rule.
pub enum Replacement {
    /// Verbatim target-language text.
    Literal(&'static str),
    /// A function of the captured groups; may call the name resolver or the
    /// digit/type-name helpers.
    Computed(ComputedFn),
}

/// One ordered rewrite rule: matcher plus replacement.
pub struct PatternRule {
    regex: Regex,
    replacement: Replacement,
}

impl PatternRule {
    pub(crate) fn new(pattern: &'static str, replacement: Replacement) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            replacement,
        })
    }

    /// Pure search from an explicit caller-owned cursor. Identical input and
    /// cursor always produce the identical span.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<Captures<'t>> {
        self.regex.captures_at(text, start)
    }

    pub fn apply(&self, caps: &Captures, ctx: &RuleContext) -> String {
        match &self.replacement {
            Replacement::Literal(text) => (*text).to_string(),
            Replacement::Computed(f) => f(caps, ctx),
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// The fixed, ordered rule catalogue.
///
/// Rule order is part of the observable contract: the extractor prefers the
/// earliest textual match and breaks ties by declaration order, so reordering
/// entries is a behavioral change, not a refactor.
pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    #[cfg(test)]
    pub(crate) fn from_rules(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Full-width digits normalized to their half-width forms.
pub fn halfwidth_digits(source: &str) -> String {
    source
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect()
}

fn cap<'t>(caps: &Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map_or("", |m| m.as_str())
}

fn type_name(ctx: &RuleContext, caps: &Captures, group: usize) -> String {
    ctx.types.english_name(cap(caps, group))
}

impl PatternTable {
    /// Build the standard catalogue. Called once during setup; the table is
    /// immutable for the duration of a translation run.
    pub fn standard() -> Result<Self, regex::Error> {
        use Replacement::{Computed, Literal};

        let specs: Vec<(&'static str, Replacement)> = vec![
            // Damage amounts.
            (
                r"相手のポケモン１匹に(\d+)ダメージ",
                Computed(|caps, _| {
                    format!(
                        "this attack does {} damage to 1 of your opponent's Pokémon",
                        cap(caps, 1)
                    )
                }),
            ),
            (
                r"相手のベンチポケモン１匹に(\d+)ダメージ",
                Computed(|caps, _| {
                    format!(
                        "this attack does {} damage to 1 of your opponent's Benched Pokémon",
                        cap(caps, 1)
                    )
                }),
            ),
            (
                r"相手のベンチポケモン１匹にも(\d+)ダメージ",
                Computed(|caps, _| {
                    format!(
                        "this attack also does {} damage to 1 of your opponent's Benched Pokémon",
                        cap(caps, 1)
                    )
                }),
            ),
            (
                r"相手のベンチポケモン全員にも(\d+)ダメージ。",
                Computed(|caps, _| {
                    format!(
                        "this attack also does {} damage to each of your opponent's Benched Pokémon.",
                        cap(caps, 1)
                    )
                }),
            ),
            (
                r"自分のベンチの(.)ポケモンの数×(\d+)ダメージ",
                Computed(|caps, ctx| {
                    format!(
                        "this attack does {} damage for each of your Benched {} Pokémon",
                        cap(caps, 2),
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"このポケモンが、バトル場で相手のポケモンからワザのダメージを受けたとき、ワザを使ったポケモンに(\d+)ダメージ",
                Computed(|caps, _| {
                    format!(
                        "if this Pokémon is in the Active Spot and is damaged by an attack from your opponent's Pokémon, do {} damage to the Attacking Pokémon",
                        cap(caps, 1)
                    )
                }),
            ),
            // Coin flips.
            (r"コインを１回投げ、", Literal("flip a coin. ")),
            (r"コインを１回投げ", Literal("flip a coin. ")),
            (
                r"ウラが出るまでコインを投げ、",
                Literal("flip a coin until you get tails. "),
            ),
            (
                r"自分の場のポケモンの数ぶんコインを投げ、",
                Literal("flip a coin for each Pokémon you have in play, "),
            ),
            (r"コインを投げ", Literal("flip a coin ")),
            (r"オモテなら、", Literal("if heads, ")),
            (r"ウラなら、", Literal("if tails, ")),
            (r"このワザは失敗", Literal("this attack does nothing")),
            (
                r"コインを([２-９])回投げ、",
                Computed(|caps, _| format!("flip {} coins. ", halfwidth_digits(cap(caps, 1)))),
            ),
            (
                r"オモテの数×(\d+)ダメージ追加",
                Computed(|caps, _| {
                    format!("this attack does {} more damage for each heads", cap(caps, 1))
                }),
            ),
            (
                r"オモテの数×(\d+)ダメージ",
                Computed(|caps, _| {
                    format!("this attack does {} damage for each heads", cap(caps, 1))
                }),
            ),
            // Extra energy / damage bonuses.
            (
                r"追加で(.)エネルギーが([２-９])個ついているなら、",
                Computed(|caps, ctx| {
                    format!(
                        "if this Pokémon has at least {} extra {} Energy attached, ",
                        halfwidth_digits(cap(caps, 2)),
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"相手のバトルポケモンのエネルギーの数×(\d+)ダメージ追加",
                Computed(|caps, _| {
                    format!(
                        "this attack does {} more damage for each Energy attached to your opponent's Active Pokémon",
                        cap(caps, 1)
                    )
                }),
            ),
            (
                r"(\d+)ダメージ追加",
                Computed(|caps, _| format!("this attack does {} more damage", cap(caps, 1))),
            ),
            (
                r"が使うワザの、相手のバトルポケモンへのダメージを\+(\d+)する",
                Computed(|caps, _| {
                    format!(
                        "attacks used by do ＋{} damage to your opponent's Active Pokémon",
                        cap(caps, 1)
                    )
                }),
            ),
            // Self damage.
            (
                r"このポケモンにも(\d+)ダメージ",
                Computed(|caps, _| {
                    format!("this Pokémon also does {} damage to itself", cap(caps, 1))
                }),
            ),
            // Damage reduction.
            (
                r"このポケモンが、炎または水ポケモンから受けるワザのダメージを-(\d+)する。",
                Computed(|caps, _| {
                    format!(
                        "This Pokémon takes －{} damage from attacks from Fire or Water Pokémon.",
                        cap(caps, 1)
                    )
                }),
            ),
            (
                r"受けるワザのダメージを-(\d+)する",
                Computed(|caps, _| format!("takes －{} damage from attacks", cap(caps, 1))),
            ),
            (
                r"このポケモンはワザのダメージや効果を受けない",
                Literal("prevent all damage from―and effects of―attacks done to this Pokémon"),
            ),
            // Healing.
            (
                r"このポケモンのHPを(\d+)回復",
                Computed(|caps, _| format!("heal {} damage from this Pokémon", cap(caps, 1))),
            ),
            (
                r"自分のポケモン全員のHPを(\d+)回復",
                Computed(|caps, _| format!("heal {} damage from each of your Pokémon", cap(caps, 1))),
            ),
            (
                r"HPを(\d+)回復",
                Computed(|caps, _| format!("heal {} damage from ", cap(caps, 1))),
            ),
            // Energy discard.
            (
                r"このポケモンから(.)エネルギーを１個トラッシュ",
                Computed(|caps, ctx| {
                    format!(
                        "discard a {} Energy from this Pokémon",
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"このポケモンから(.)エネルギーを([２-９])個トラッシュ",
                Computed(|caps, ctx| {
                    format!(
                        "discard {} {} Energy from this Pokémon",
                        halfwidth_digits(cap(caps, 2)),
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"このポケモンから(.)エネルギーをすべてトラッシュ",
                Computed(|caps, ctx| {
                    format!(
                        "discard all {} Energy from this Pokémon",
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"相手のバトルポケモンからエネルギーをランダムに１個トラッシュ",
                Literal("discard a random Energy from your opponent's Active Pokémon"),
            ),
            // Energy attachment.
            (
                r"自分のエネルギーゾーンからこのポケモンに(.)エネルギーをつけるたび、",
                Computed(|caps, ctx| {
                    format!(
                        "Whenever you attach a {} Energy from your Energy Zone to this Pokémon, ",
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"自分のエネルギーゾーンから(.)エネルギーを１個出し、",
                Computed(|caps, ctx| {
                    format!(
                        "take a {} Energy from your Energy Zone ",
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (r"自分のエネルギーゾーンから", Literal("from your Energy Zone")),
            (r"このポケモンにつける", Literal("and attach it to this Pokémon")),
            (
                r"(「.+?」)または(「.+?」)につける",
                Computed(|caps, ctx| {
                    format!(
                        "and attach it to {} or {} ",
                        ctx.resolver.translated_list(cap(caps, 1)),
                        ctx.resolver.translated_list(cap(caps, 2))
                    )
                }),
            ),
            (
                r"ベンチの(.)ポケモンにつける",
                Computed(|caps, ctx| {
                    format!(
                        "and attach it to 1 of your Benched {} Pokémon",
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (r"につける", Literal("and attach it to ")),
            (r"つけ替える", Literal("Move Energy from your Benched Pokémon to ")),
            // Deck and draw effects.
            (r"自分の山札を上から１枚見", Literal("look at the top card of your deck")),
            // The English printings have no counterpart text.
            (r"て、もとにもどす", Literal("")),
            (r"手札をすべて山札にもど", Literal("shuffles the hand into the deck")),
            (r"自分の山札を１枚引く", Literal("draw a card")),
            (
                r"山札を([２-９])枚引く",
                Computed(|caps, _| format!("draw {} cards", halfwidth_digits(cap(caps, 1)))),
            ),
            (
                r"自分の山札から(.)ポケモンをランダムに１枚、",
                Computed(|caps, ctx| {
                    format!(
                        "put 1 random {} Pokémon from your deck ",
                        type_name(ctx, caps, 1)
                    )
                }),
            ),
            (
                r"自分の山札から「(.+?)」をランダムに１枚、",
                Computed(|caps, ctx| {
                    let name = cap(caps, 1);
                    if name.contains('「') {
                        // The lazy capture swallowed a whole name list.
                        format!(
                            "put 1 random {} from your deck ",
                            ctx.resolver.translated_list(&format!("「{name}」"))
                        )
                    } else {
                        format!(
                            "put 1 random {} from your deck ",
                            ctx.resolver.translated_name(name)
                        )
                    }
                }),
            ),
            (r"手札に加える", Literal("into your hand")),
            (r"ベンチに出す", Literal("onto your Bench")),
            // Ability scoping.
            // The English printings have no counterpart text.
            (r"このポケモンがいるかぎり、", Literal("")),
            // Disruption.
            (
                r"このワザを受けたポケモンが使うワザのダメージを-(\d+)する。",
                Computed(|caps, _| {
                    format!("attacks used by the Defending Pokémon do －{} damage.", cap(caps, 1))
                }),
            ),
            (r"このワザを受けたポケモン(は|が)", Literal("the Defending Pokémon")),
            (r"ワザが使えない", Literal("can't attack")),
            (r"にげるができない", Literal("can't retreat")),
            (
                r"次の相手の番、相手は手札からサポートを出して使えない",
                Literal(
                    "your opponent can't use any Supporter cards from their hand during their next turn",
                ),
            ),
            (
                r"相手の手札のオモテをすべて見る",
                Literal("your opponent reveals their hand"),
            ),
            (
                r"相手の手札をすべて山札にもどす。",
                Literal("Your opponent shuffles their hand into their deck. "),
            ),
            // Switching and retreat.
            (
                r"このポケモンをベンチポケモンと入れ替える",
                Literal("switch this Pokémon with 1 of your Benched Pokémon"),
            ),
            (
                r"相手のバトルポケモンをベンチポケモンと入れ替える。［バトル場に出すポケモンは相手が選ぶ。］",
                Literal(
                    "switch out your opponent's Active Pokémon to the Bench. (Your opponent chooses the new Active Pokémon.)",
                ),
            ),
            (
                r"自分のバトルポケモンのにげるためのエネルギーを、([１-９])個少なくする",
                Computed(|caps, _| {
                    format!(
                        "the Retreat Cost of your Active Pokémon is {} less",
                        halfwidth_digits(cap(caps, 1))
                    )
                }),
            ),
            // Bounce.
            (
                r"自分のバトル場の((?:「.+?」)+)を手札にもどす",
                Computed(|caps, ctx| {
                    format!(
                        "Put your {} in the Active Spot into your hand",
                        ctx.resolver.translated_list(cap(caps, 1))
                    )
                }),
            ),
            // Turn scoping.
            (
                r"このポケモンがバトル場にいるなら、自分の番に１回使える。",
                Literal("once during your turn, if this Pokémon is in the Active Spot, you may "),
            ),
            (r"自分の番に１回使える。", Literal("once during your turn, you may ")),
            (
                r"自分の番に何回でも使える。",
                Literal("As often as you like during your turn, you may "),
            ),
            (r"この番、", Literal("during this turn, ")),
            (r"次の相手の番、", Literal("during your opponent's next turn, ")),
            (r"次の自分の番、", Literal("during your next turn, ")),
            // Special conditions.
            (r"どくにする", Literal("is now Poisoned")),
            (
                r"相手のバトルポケモンがどくなら、",
                Literal("if your opponent's Active Pokémon is Poisoned, "),
            ),
            (r"ねむりにする", Literal("is now Asleep")),
            (r"マヒにする", Literal("is now Paralyzed")),
            (r"こんらんにする", Literal("is now Confused")),
            (r"やけどにする", Literal("is now Burned")),
            // Fossils.
            (
                "このカードは、HP40の無色タイプのたねポケモンとして、場に出すことができる。\n自分の番の中でなら、場に出ているこのカードをトラッシュしてよい。\nこのカードはにげるができない。",
                Literal(
                    "Play this card as if it were a 40-HP Basic Colorless Pokémon.\nAt any time during your turn, you may discard this card from play.\nThis card can't retreat.",
                ),
            ),
            // Pokémon Tools.
            (
                r"このカードをつけているポケモン",
                Literal("the Pokémon this card is attached to "),
            ),
            // Phrases that land mid-sentence in the native text but start a
            // sentence after manual reordering, so they begin capitalized.
            (r"がダメージを受けているなら、", Literal("If has damage on it, ")),
            (
                r"が持っているワザを１つ選び、このワザとして使う",
                Literal("Choose 1 of attacks and use it as this attack"),
            ),
            // Generic substitutions.
            (
                r"このポケモンに「ポケモンのどうぐ」がついているなら、",
                Literal("if this Pokémon has a Pokémon Tool attacked, "),
            ),
            (r"自分の", Literal("your ")),
            (r"相手の", Literal("your opponent's ")),
            (r"山札", Literal("deck")),
            (r"バトルポケモンを?", Literal("Active Pokémon ")),
            (r"ベンチポケモン", Literal("Benched Pokémon ")),
            (r"バトル場の", Literal("in the Active Spot ")),
            (r"ベンチの", Literal("Benched ")),
            (r"たね", Literal("Basic ")),
            (r"このポケモンが?", Literal("this Pokémon ")),
            (r"ポケモン", Literal("Pokémon ")),
            (r"の数×", Literal("for each of ")),
            (r"ランダムに１.", Literal("a random ")),
            (
                r"(?:「.+?」)+",
                Computed(|caps, ctx| format!("{} ", ctx.resolver.translated_list(cap(caps, 0)))),
            ),
            // Sentence terminator.
            (r"。", Literal(".")),
        ];

        let rules = specs
            .into_iter()
            .map(|(pattern, replacement)| PatternRule::new(pattern, replacement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }
}
