//! Night sheet integration tests.
//!
//! These tests build the night sheet for a small script, check both sides
//! of it, and play a first night where the resulting order drives effect
//! resolution.

use std::sync::Arc;

use grimoire::characters::{CharacterCategory, CharacterDefinition, CharacterId, CharacterRegistry};
use grimoire::clock::Clock;
use grimoire::core::{
    Duration, EntityId, GamePhase, NightSheetConfig, Phase, UndefinedNightOrder,
};
use grimoire::effects::{unsupported, AccessKind, EffectTarget, Interceptable, Override};
use grimoire::error::{EffectError, NightSheetError};
use grimoire::interaction::{AutoConfirm, Decision, ScriptedGate};
use grimoire::night::{
    night_act_ordering, NightActOrdering, NightSheet, ACTING_ADJUSTMENT, NOT_ACTING_PRIORITY,
};
use proptest::prelude::*;

const POISONER: CharacterId = CharacterId::new(1);
const IMP: CharacterId = CharacterId::new(2);
const WASHERWOMAN: CharacterId = CharacterId::new(3);
const EMPATH: CharacterId = CharacterId::new(4);
const MONK: CharacterId = CharacterId::new(5);
const SOLDIER: CharacterId = CharacterId::new(6);

fn trouble_brewing() -> CharacterRegistry {
    [
        CharacterDefinition::new(POISONER, "Poisoner", CharacterCategory::Minion)
            .with_night_numbers(Some(17), Some(8)),
        CharacterDefinition::new(IMP, "Imp", CharacterCategory::Demon)
            .with_night_numbers(Some(0), Some(24)),
        CharacterDefinition::new(WASHERWOMAN, "Washerwoman", CharacterCategory::Townsfolk)
            .with_night_numbers(Some(33), Some(0)),
        CharacterDefinition::new(EMPATH, "Empath", CharacterCategory::Townsfolk)
            .with_night_numbers(Some(36), Some(53)),
        CharacterDefinition::new(MONK, "Monk", CharacterCategory::Townsfolk)
            .with_night_numbers(Some(0), Some(12)),
        CharacterDefinition::new(SOLDIER, "Soldier", CharacterCategory::Townsfolk)
            .with_night_numbers(Some(0), Some(0)),
    ]
    .into_iter()
    .collect()
}

const ALL: [CharacterId; 6] = [POISONER, IMP, WASHERWOMAN, EMPATH, MONK, SOLDIER];

async fn sheet() -> NightSheet {
    let mut sheet = NightSheet::default();
    sheet
        .init_from_registry(&ALL, &trouble_brewing(), &AutoConfirm)
        .await
        .unwrap();
    sheet
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Orderings
// =============================================================================

/// Lower sheet numbers act earlier; zero means the character sleeps.
#[tokio::test]
async fn test_first_and_other_nights() {
    let sheet = sheet().await;

    let first = sheet.ordering(true).unwrap();
    assert!(first.is_first_night());
    assert_eq!(first.order(), vec![POISONER, WASHERWOMAN, EMPATH]);
    assert_eq!(first.not_acting().len(), 3);
    assert!(first.not_acting().contains(&IMP));

    let other = sheet.ordering(false).unwrap();
    assert_eq!(other.order(), vec![POISONER, MONK, IMP, EMPATH]);
    assert_eq!(other.sequence_number(IMP), Some(2));
    assert_eq!(other.sequence_number(WASHERWOMAN), None);
    assert_eq!(other.act_order(EMPATH), Ok(53));

    assert!(sheet.acts_on_first_night(WASHERWOMAN));
    assert!(!sheet.acts_on_other_nights(WASHERWOMAN));
    assert!(!sheet.acts_on_first_night(SOLDIER));
    assert!(!sheet.acts_on_other_nights(SOLDIER));
}

/// Earlier actors get higher resolution priority.
#[tokio::test]
async fn test_night_priority() {
    let sheet = sheet().await;

    assert_eq!(sheet.night_priority(POISONER, true), Ok(ACTING_ADJUSTMENT - 17));
    assert_eq!(sheet.night_priority(EMPATH, true), Ok(ACTING_ADJUSTMENT - 36));
    assert_eq!(sheet.night_priority(IMP, true), Ok(NOT_ACTING_PRIORITY));
    assert!(sheet.night_priority(POISONER, false).unwrap() > sheet.night_priority(MONK, false).unwrap());
}

/// Restricting to the characters in play keeps the sheet's relative order.
#[tokio::test]
async fn test_ordering_for_characters_in_play() {
    let sheet = sheet().await;

    let in_play = sheet.ordering_for([EMPATH, SOLDIER, POISONER], false).unwrap();
    assert_eq!(in_play.order(), vec![POISONER, EMPATH]);
    assert_eq!(in_play.sequence_number(EMPATH), Some(1));
    assert_eq!(in_play.act_order(EMPATH), Ok(53));
    assert!(in_play.not_acting().contains(&SOLDIER));
    assert_eq!(in_play.len(), 3);

    let stranger = CharacterId::new(99);
    assert_eq!(
        sheet.ordering_for([EMPATH, stranger], false),
        Err(NightSheetError::CharacterNotInOrdering { character: stranger })
    );
}

/// The sheet renders both sides, acting characters numbered from one.
#[tokio::test]
async fn test_display() {
    let sheet = sheet().await;

    assert_eq!(
        sheet.ordering(true).unwrap().to_string(),
        "Night Act Order (First Night)\n\
         1 => Character(1)\n\
         2 => Character(3)\n\
         3 => Character(4)\n\
         Characters not acting: Character(2), Character(5), Character(6)"
    );
    assert!(sheet.to_string().starts_with("Night Sheet:\nNight Act Order (First Night)"));
    assert!(sheet.to_string().contains("Night Act Order (Other Nights)\n1 => Character(1)"));
}

// =============================================================================
// Undefined Orders
// =============================================================================

fn homebrew() -> CharacterDefinition {
    CharacterDefinition::new(CharacterId::new(40), "Alchemist", CharacterCategory::Townsfolk)
}

/// The storyteller places a homebrew character on each side of the sheet.
#[tokio::test]
async fn test_storyteller_places_homebrew() {
    let mut registry = trouble_brewing();
    registry.register(homebrew());
    let gate = ScriptedGate::new().with_decisions([Decision::Number(20), Decision::Number(-3)]);

    let mut sheet = NightSheet::default();
    sheet
        .init_from_registry(&[POISONER, WASHERWOMAN, CharacterId::new(40)], &registry, &gate)
        .await
        .unwrap();

    assert_eq!(gate.asked().len(), 2);
    assert_eq!(
        sheet.ordering(true).unwrap().order(),
        vec![POISONER, CharacterId::new(40), WASHERWOMAN]
    );
    // a negative answer is treated as not acting
    assert_eq!(sheet.act_order(CharacterId::new(40), false), Ok(0));
}

/// Configured to skip, undefined characters never act and nobody is asked.
#[tokio::test]
async fn test_not_act_strategy() {
    let gate = ScriptedGate::new().with_decisions([Decision::Number(1)]);
    let mut sheet = NightSheet::new(
        NightSheetConfig::new().with_undefined_order(UndefinedNightOrder::NotAct),
    );

    sheet.init([&homebrew()], &gate).await;

    assert!(gate.asked().is_empty());
    assert!(sheet.ordering(true).unwrap().order().is_empty());
    assert_eq!(sheet.night_priority(CharacterId::new(40), true), Ok(NOT_ACTING_PRIORITY));
}

/// Without a storyteller decision the character does not act.
#[test]
fn test_plain_ordering_skips_undefined() {
    let definitions = [homebrew()];
    let ordering = night_act_ordering(&definitions, false);

    assert!(ordering.order().is_empty());
    assert!(ordering.not_acting().contains(&CharacterId::new(40)));
}

// =============================================================================
// A First Night
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Seat {
    Poisoned,
}

#[derive(Debug)]
struct Player;

impl Interceptable for Player {
    type Member = Seat;
    type Value = bool;

    fn read(&self, member: Seat) -> Result<bool, EffectError> {
        match member {
            Seat::Poisoned => Ok(false),
        }
    }

    fn write(&mut self, member: Seat, _value: bool) -> Result<(), EffectError> {
        Err(unsupported(AccessKind::Write, member))
    }
}

/// The poisoner acts before the empath, so the empath wakes poisoned and
/// stays poisoned until dusk.
#[tokio::test]
async fn test_poisoner_acts_before_empath() {
    init_tracing();

    let sheet = sheet().await;
    let mut clock = Clock::new();
    assert!(clock.advance(&AutoConfirm, Some("everyone is seated")).await.is_advanced());

    let now = clock.current();
    let tonight = sheet.tonight(now).unwrap().unwrap();
    let empath_player = EntityId::new(4);
    let mut empath = EffectTarget::new(Player);
    let dusk = GamePhase::at(1, Phase::Dusk).unwrap();

    let mut woke_poisoned = None;
    for &character in tonight.order() {
        match character {
            POISONER => {
                empath.attach(Arc::new(
                    Override::new("Poisoner", Seat::Poisoned, true)
                        .with_priority(tonight.priority(POISONER).unwrap())
                        .with_duration(Duration::until(now, dusk).unwrap()),
                ));
            }
            EMPATH => {
                woke_poisoned = Some(empath.from(Some(empath_player)).read(now, Seat::Poisoned));
            }
            _ => {}
        }
    }
    assert_eq!(woke_poisoned, Some(Ok(true)));

    while clock.current() < dusk {
        assert!(clock.advance(&AutoConfirm, None).await.is_advanced());
        let poisoned = empath.view().read(clock.current(), Seat::Poisoned).unwrap();
        assert_eq!(poisoned, clock.current() < dusk);
    }

    assert!(sheet.tonight(clock.current()).unwrap().is_none());
    assert_eq!(empath.prune_expired(clock.current()), 1);
    assert_eq!(empath.effect_count(), 0);
}

// =============================================================================
// Properties
// =============================================================================

fn numbered(numbers: &[u32]) -> NightActOrdering {
    NightActOrdering::from_numbers(
        true,
        numbers
            .iter()
            .enumerate()
            .map(|(i, &n)| (CharacterId::new(i as u16), n)),
    )
}

proptest! {
    /// Acting characters are ascending by number and priorities descend.
    #[test]
    fn acting_order_is_ascending(numbers in prop::collection::vec(0u32..20, 0..24)) {
        let ordering = numbered(&numbers);

        let acting = numbers.iter().filter(|&&n| n != 0).count();
        prop_assert_eq!(ordering.order().len(), acting);
        prop_assert_eq!(ordering.not_acting().len(), numbers.len() - acting);

        for pair in ordering.order().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (na, nb) = (ordering.act_order(a).unwrap(), ordering.act_order(b).unwrap());
            prop_assert!(na < nb || (na == nb && a < b));
            prop_assert!(ordering.priority(a).unwrap() >= ordering.priority(b).unwrap());
        }
    }

    /// A subset lists exactly the chosen acting characters, in the same
    /// relative order as the full ordering.
    #[test]
    fn subset_preserves_relative_order(
        numbers in prop::collection::vec(0u32..20, 1..24),
        keep in prop::collection::vec(any::<bool>(), 24),
    ) {
        let ordering = numbered(&numbers);
        let chosen: Vec<CharacterId> = (0..numbers.len())
            .filter(|&i| keep[i])
            .map(|i| CharacterId::new(i as u16))
            .collect();

        let subset = ordering.subset(chosen.iter().copied()).unwrap();

        let expected: Vec<CharacterId> = ordering
            .order()
            .iter()
            .copied()
            .filter(|c| chosen.contains(c))
            .collect();
        prop_assert_eq!(subset.order(), expected.as_slice());
        prop_assert_eq!(subset.len(), chosen.len());
        for character in &chosen {
            prop_assert_eq!(subset.act_order(*character), ordering.act_order(*character));
        }
    }
}
