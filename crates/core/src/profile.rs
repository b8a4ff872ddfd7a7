//! Eligibility profile and slot types
//!
//! A [`Profile`] holds the three attributes collected during intake. Slots
//! are filled in the fixed order given by [`SlotName::ORDER`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of value a slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Numeric,
    Categorical,
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::Categorical => write!(f, "categorical"),
        }
    }
}

/// Profile slot names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Age,
    Income,
    State,
}

impl SlotName {
    /// Fill order used by the dialogue
    pub const ORDER: [SlotName; 3] = [SlotName::Age, SlotName::Income, SlotName::State];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Income => "income",
            Self::State => "state",
        }
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Self::Age | Self::Income => SlotKind::Numeric,
            Self::State => SlotKind::Categorical,
        }
    }
}

impl std::fmt::Display for SlotName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SlotName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SlotName::ORDER
            .iter()
            .copied()
            .find(|slot| slot.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| Error::UnknownSlot(s.to_string()))
    }
}

/// Normalized state categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateCode {
    Telangana,
    Maharashtra,
    AndhraPradesh,
    TamilNadu,
    WestBengal,
}

impl StateCode {
    pub const ALL: [StateCode; 5] = [
        StateCode::Telangana,
        StateCode::Maharashtra,
        StateCode::AndhraPradesh,
        StateCode::TamilNadu,
        StateCode::WestBengal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Telangana => "telangana",
            Self::Maharashtra => "maharashtra",
            Self::AndhraPradesh => "andhra_pradesh",
            Self::TamilNadu => "tamil_nadu",
            Self::WestBengal => "west_bengal",
        }
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StateCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        StateCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| Error::UnknownState(s.to_string()))
    }
}

/// Typed slot value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Number(u64),
    State(StateCode),
}

impl SlotValue {
    pub fn kind(&self) -> SlotKind {
        match self {
            Self::Number(_) => SlotKind::Numeric,
            Self::State(_) => SlotKind::Categorical,
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::State(_) => None,
        }
    }

    pub fn as_state(&self) -> Option<StateCode> {
        match self {
            Self::State(code) => Some(*code),
            Self::Number(_) => None,
        }
    }
}

impl std::fmt::Display for SlotValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::State(code) => write!(f, "{}", code),
        }
    }
}

/// A rejected overwrite of an already-filled slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub slot: SlotName,
    pub old_value: SlotValue,
    pub new_value: SlotValue,
}

/// Result of writing a value into the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    /// Value stored (either newly or identical to the existing one)
    Stored,
    /// Existing value kept; the new one conflicts with it
    Contradiction(Contradiction),
}

impl SlotUpdate {
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction(_))
    }
}

/// Eligibility attributes gathered from the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub age: Option<u64>,
    pub income: Option<u64>,
    pub state: Option<StateCode>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotName) -> Option<SlotValue> {
        match slot {
            SlotName::Age => self.age.map(SlotValue::Number),
            SlotName::Income => self.income.map(SlotValue::Number),
            SlotName::State => self.state.map(SlotValue::State),
        }
    }

    pub fn is_filled(&self, slot: SlotName) -> bool {
        self.get(slot).is_some()
    }

    /// Unconditionally write a value, checking only that its kind fits the slot
    pub fn set(&mut self, slot: SlotName, value: SlotValue) -> Result<()> {
        match (slot, value) {
            (SlotName::Age, SlotValue::Number(n)) => self.age = Some(n),
            (SlotName::Income, SlotValue::Number(n)) => self.income = Some(n),
            (SlotName::State, SlotValue::State(code)) => self.state = Some(code),
            _ => {
                return Err(Error::SlotKindMismatch {
                    slot,
                    expected: slot.kind(),
                })
            },
        }
        Ok(())
    }

    /// Slots still empty, in fill order
    pub fn missing_slots(&self) -> Vec<SlotName> {
        SlotName::ORDER
            .iter()
            .copied()
            .filter(|slot| !self.is_filled(*slot))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_slots().is_empty()
    }
}
