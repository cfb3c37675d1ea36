//! Scripted port doubles for service tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::application::ports::outbound::{
    D20RollRequest, DiceRollerPort, DialogPort, DroneRepairChoice, NotificationPort,
    RollResult, ShortRestChoice, SkillFormOutcome, SpellCastChoice,
};
use crate::domain::entities::{Actor, Item, Skill};
use crate::domain::events::ActorEvent;

/// Dialogs answering from a script; everything cancels unless scripted
#[derive(Default)]
pub struct ScriptedDialogs {
    pub short_rest: Option<ShortRestChoice>,
    pub long_rest: bool,
    pub drone_repair: Option<DroneRepairChoice>,
    pub spell_cast: Option<SpellCastChoice>,
    pub skill_form: Option<SkillFormOutcome>,
    pub npc_skills: Option<BTreeMap<String, bool>>,
    pub untrained_roll: bool,
    pub asked: Mutex<Vec<&'static str>>,
}

impl ScriptedDialogs {
    pub fn asked(&self) -> Vec<&'static str> {
        self.asked.lock().unwrap().clone()
    }

    fn ask(&self, dialog: &'static str) {
        self.asked.lock().unwrap().push(dialog);
    }
}

#[async_trait]
impl DialogPort for ScriptedDialogs {
    async fn short_rest(&self, _actor: &Actor) -> Result<Option<ShortRestChoice>> {
        self.ask("short_rest");
        Ok(self.short_rest)
    }

    async fn confirm_long_rest(&self, _actor: &Actor) -> Result<bool> {
        self.ask("long_rest");
        Ok(self.long_rest)
    }

    async fn drone_repair(&self, _actor: &Actor) -> Result<Option<DroneRepairChoice>> {
        self.ask("drone_repair");
        Ok(self.drone_repair)
    }

    async fn spell_cast(&self, _actor: &Actor, _spell: &Item) -> Result<Option<SpellCastChoice>> {
        self.ask("spell_cast");
        Ok(self.spell_cast)
    }

    async fn skill_form(
        &self,
        _actor: &Actor,
        _skill_id: &str,
        _skill: &Skill,
        _is_new: bool,
    ) -> Result<Option<SkillFormOutcome>> {
        self.ask("skill_form");
        Ok(self.skill_form.clone())
    }

    async fn npc_skill_toggle(&self, _actor: &Actor) -> Result<Option<BTreeMap<String, bool>>> {
        self.ask("npc_skill_toggle");
        Ok(self.npc_skills.clone())
    }

    async fn confirm_untrained_roll(&self, _actor: &Actor, _skill_id: &str) -> Result<bool> {
        self.ask("untrained_roll");
        Ok(self.untrained_roll)
    }
}

/// Roller that records every request and answers with a fixed total
pub struct RecordingRoller {
    pub total: i32,
    pub d20_requests: Mutex<Vec<D20RollRequest>>,
    pub item_rolls: Mutex<Vec<Item>>,
}

impl RecordingRoller {
    pub fn new(total: i32) -> Self {
        Self {
            total,
            d20_requests: Mutex::new(Vec::new()),
            item_rolls: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> Option<D20RollRequest> {
        self.d20_requests.lock().unwrap().last().cloned()
    }

    pub fn rolled_items(&self) -> Vec<Item> {
        self.item_rolls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiceRollerPort for RecordingRoller {
    async fn d20_roll(&self, request: D20RollRequest) -> Result<Option<RollResult>> {
        let formula = std::iter::once("1d20".to_string())
            .chain(request.parts.iter().cloned())
            .collect::<Vec<_>>()
            .join(" + ");
        self.d20_requests.lock().unwrap().push(request);
        Ok(Some(RollResult { total: self.total, formula }))
    }

    async fn item_roll(&self, _actor: &Actor, item: &Item) -> Result<Option<RollResult>> {
        self.item_rolls.lock().unwrap().push(item.clone());
        Ok(Some(RollResult {
            total: self.total,
            formula: item.name.clone(),
        }))
    }
}

/// Notifier keeping every published event
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<ActorEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<ActorEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPort for RecordingNotifier {
    async fn publish(&self, event: ActorEvent) -> Result<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}
