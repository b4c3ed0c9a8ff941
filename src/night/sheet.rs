//! The storyteller's night sheet.

use tracing::{debug, info};

use super::ordering::NightActOrdering;
use crate::characters::{CharacterDefinition, CharacterId, CharacterRegistry, NightOrder};
use crate::core::{GamePhase, NightSheetConfig, UndefinedNightOrder};
use crate::error::NightSheetError;
use crate::interaction::{DecisionOptions, Prompt, StorytellerGate};

/// Both sides of the night sheet for the characters in a game.
///
/// Queries fail with [`NightSheetError::NotInitialized`] until
/// [`NightSheet::init`] has completed.
#[derive(Clone, Debug, Default)]
pub struct NightSheet {
    config: NightSheetConfig,
    characters: Vec<CharacterId>,
    first_night: Option<NightActOrdering>,
    other_nights: Option<NightActOrdering>,
}

impl NightSheet {
    #[must_use]
    pub fn new(config: NightSheetConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &NightSheetConfig {
        &self.config
    }

    /// Compute both orderings for `characters`.
    ///
    /// Characters without a defined order are handled per the configured
    /// [`UndefinedNightOrder`]. Calling this again replaces the previous
    /// orderings.
    pub async fn init<'c, I, G>(&mut self, characters: I, gate: &G)
    where
        I: IntoIterator<Item = &'c CharacterDefinition>,
        G: StorytellerGate + ?Sized,
    {
        let characters: Vec<&CharacterDefinition> = characters.into_iter().collect();

        let first = self.resolve(&characters, true, gate).await;
        let other = self.resolve(&characters, false, gate).await;

        info!(
            characters = characters.len(),
            first_night = first.order().len(),
            other_nights = other.order().len(),
            "night sheet initialized"
        );

        self.characters = characters.iter().map(|c| c.id).collect();
        self.first_night = Some(first);
        self.other_nights = Some(other);
    }

    /// Like [`NightSheet::init`], looking characters up in a registry.
    pub async fn init_from_registry<G>(
        &mut self,
        characters: &[CharacterId],
        registry: &CharacterRegistry,
        gate: &G,
    ) -> Result<(), NightSheetError>
    where
        G: StorytellerGate + ?Sized,
    {
        let definitions = characters
            .iter()
            .map(|&id| registry.require(id))
            .collect::<Result<Vec<_>, _>>()?;
        self.init(definitions, gate).await;
        Ok(())
    }

    async fn resolve<G>(
        &self,
        characters: &[&CharacterDefinition],
        is_first_night: bool,
        gate: &G,
    ) -> NightActOrdering
    where
        G: StorytellerGate + ?Sized,
    {
        let mut numbers = Vec::with_capacity(characters.len());
        for character in characters {
            let number = match character.night_order(is_first_night) {
                NightOrder::Acts(n) => n,
                NightOrder::Idle => 0,
                NightOrder::Undefined => self.decide(character, is_first_night, gate).await,
            };
            numbers.push((character.id, number));
        }
        NightActOrdering::from_numbers(is_first_night, numbers)
    }

    async fn decide<G>(&self, character: &CharacterDefinition, is_first_night: bool, gate: &G) -> u32
    where
        G: StorytellerGate + ?Sized,
    {
        if self.config.undefined_order == UndefinedNightOrder::NotAct {
            return 0;
        }

        let night = if is_first_night {
            "the first night"
        } else {
            "each night except the first"
        };
        let prompt = Prompt::new(format!(
            "choose a night act order for {character} during {night} (0 means not acting)"
        ));
        let options = DecisionOptions::Number {
            min: 0,
            max: i64::from(u32::MAX),
        };

        let decided = gate.decide(&prompt, &options).await;
        let number = decided
            .and_then(|d| u32::try_from(d.as_number()).ok())
            .unwrap_or(0);
        debug!(character = %character.id, is_first_night, ?decided, number, "night order decided");
        number
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.first_night.is_some()
    }

    /// Characters the sheet was initialized with, in input order.
    #[must_use]
    pub fn characters(&self) -> &[CharacterId] {
        &self.characters
    }

    /// The ordering for one side of the sheet.
    pub fn ordering(&self, is_first_night: bool) -> Result<&NightActOrdering, NightSheetError> {
        let side = if is_first_night {
            &self.first_night
        } else {
            &self.other_nights
        };
        side.as_ref().ok_or(NightSheetError::NotInitialized)
    }

    /// The ordering restricted to the characters in play.
    pub fn ordering_for(
        &self,
        in_play: impl IntoIterator<Item = CharacterId>,
        is_first_night: bool,
    ) -> Result<NightActOrdering, NightSheetError> {
        self.ordering(is_first_night)?.subset(in_play)
    }

    /// The ordering that applies at `phase`, `None` outside the night.
    pub fn tonight(&self, phase: GamePhase) -> Result<Option<&NightActOrdering>, NightSheetError> {
        if !phase.is_night() {
            return Ok(None);
        }
        self.ordering(phase.is_first_night()).map(Some)
    }

    /// Sequence number among acting characters, `None` when not acting.
    pub fn sequence_number(
        &self,
        character: CharacterId,
        is_first_night: bool,
    ) -> Result<Option<usize>, NightSheetError> {
        Ok(self.ordering(is_first_night)?.sequence_number(character))
    }

    /// Raw night sheet number, from the definition or the storyteller.
    pub fn act_order(&self, character: CharacterId, is_first_night: bool) -> Result<u32, NightSheetError> {
        self.ordering(is_first_night)?.act_order(character)
    }

    /// Effect resolution priority derived from the night order.
    pub fn night_priority(&self, character: CharacterId, is_first_night: bool) -> Result<i64, NightSheetError> {
        self.ordering(is_first_night)?.priority(character)
    }

    #[must_use]
    pub fn acts_on_first_night(&self, character: CharacterId) -> bool {
        self.first_night.as_ref().is_some_and(|o| o.is_acting(character))
    }

    #[must_use]
    pub fn acts_on_other_nights(&self, character: CharacterId) -> bool {
        self.other_nights.as_ref().is_some_and(|o| o.is_acting(character))
    }
}

impl std::fmt::Display for NightSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.first_night, &self.other_nights) {
            (Some(first), Some(other)) => write!(f, "Night Sheet:\n{first}\n{other}"),
            _ => f.write_str("Night Sheet: not initialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterCategory;
    use crate::night::NOT_ACTING_PRIORITY;
    use crate::interaction::{AutoConfirm, Decision, ScriptedGate};

    fn script() -> Vec<CharacterDefinition> {
        vec![
            CharacterDefinition::new(CharacterId::new(1), "Poisoner", CharacterCategory::Minion)
                .with_night_numbers(Some(17), Some(8)),
            CharacterDefinition::new(CharacterId::new(2), "Imp", CharacterCategory::Demon)
                .with_night_numbers(Some(0), Some(24)),
            CharacterDefinition::new(CharacterId::new(3), "Washerwoman", CharacterCategory::Townsfolk)
                .with_night_numbers(Some(33), Some(0)),
            CharacterDefinition::new(CharacterId::new(4), "Homebrew", CharacterCategory::Townsfolk),
        ]
    }

    #[test]
    fn test_uninitialized_queries_fail() {
        let sheet = NightSheet::default();
        assert_eq!(sheet.ordering(true), Err(NightSheetError::NotInitialized));
        assert!(!sheet.acts_on_first_night(CharacterId::new(1)));
        assert_eq!(sheet.to_string(), "Night Sheet: not initialized");
    }

    #[tokio::test]
    async fn test_not_act_strategy_never_asks() {
        let config = NightSheetConfig::new().with_undefined_order(UndefinedNightOrder::NotAct);
        let mut sheet = NightSheet::new(config);
        let gate = ScriptedGate::new();

        sheet.init(&script(), &gate).await;

        assert!(gate.asked().is_empty());
        assert_eq!(sheet.act_order(CharacterId::new(4), true), Ok(0));
        assert_eq!(
            sheet.ordering(true).unwrap().order(),
            vec![CharacterId::new(1), CharacterId::new(3)]
        );
        assert_eq!(
            sheet.ordering(false).unwrap().order(),
            vec![CharacterId::new(1), CharacterId::new(2)]
        );
    }

    #[tokio::test]
    async fn test_storyteller_decides_undefined() {
        let mut sheet = NightSheet::new(NightSheetConfig::default());
        let gate = ScriptedGate::new().with_decisions([Decision::Number(1), Decision::Number(0)]);

        sheet.init(&script(), &gate).await;

        let asked = gate.asked();
        assert_eq!(asked.len(), 2);
        assert!(asked[0].subject.contains("Homebrew during the first night"));
        assert!(asked[1].subject.contains("each night except the first"));

        assert_eq!(sheet.sequence_number(CharacterId::new(4), true), Ok(Some(0)));
        assert!(sheet.acts_on_first_night(CharacterId::new(4)));
        assert!(!sheet.acts_on_other_nights(CharacterId::new(4)));
    }

    #[tokio::test]
    async fn test_no_response_means_not_acting() {
        let mut sheet = NightSheet::default();
        sheet.init(&script(), &AutoConfirm).await;
        assert!(!sheet.acts_on_first_night(CharacterId::new(4)));
        assert!(!sheet.acts_on_other_nights(CharacterId::new(4)));
    }

    #[tokio::test]
    async fn test_tonight_follows_phase() {
        let mut sheet = NightSheet::default();
        sheet.init(&script(), &AutoConfirm).await;

        assert!(sheet.tonight(GamePhase::setup()).unwrap().is_none());
        assert!(sheet.tonight(GamePhase::first_night()).unwrap().unwrap().is_first_night());

        let second_night = GamePhase::first_night().next().next().next().next();
        assert!(!sheet.tonight(second_night).unwrap().unwrap().is_first_night());
    }

    #[tokio::test]
    async fn test_init_from_registry_unknown() {
        let registry: CharacterRegistry = script().into_iter().collect();
        let mut sheet = NightSheet::default();

        let result = sheet
            .init_from_registry(&[CharacterId::new(1), CharacterId::new(9)], &registry, &AutoConfirm)
            .await;
        assert_eq!(
            result,
            Err(NightSheetError::UnknownCharacter { character: CharacterId::new(9) })
        );
        assert!(!sheet.is_initialized());

        sheet
            .init_from_registry(&[CharacterId::new(2), CharacterId::new(1)], &registry, &AutoConfirm)
            .await
            .unwrap();
        assert_eq!(sheet.characters(), &[CharacterId::new(2), CharacterId::new(1)]);
        assert_eq!(sheet.night_priority(CharacterId::new(2), true), Ok(NOT_ACTING_PRIORITY));
    }
}
