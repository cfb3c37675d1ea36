//! Outbound ports - Interfaces that the application requires from the host

mod dialog_port;
mod dice_port;
mod notification_port;
mod repository_port;

pub use dialog_port::{
    DialogPort, DroneRepairChoice, ShortRestChoice, SkillForm, SkillFormOutcome, SpellCastChoice,
};
pub use dice_port::{D20RollRequest, DiceRollerPort, RollResult};
pub use notification_port::NotificationPort;
pub use repository_port::ActorRepositoryPort;
