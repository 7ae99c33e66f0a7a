//! Combat-AI pipeline: threat scanning, ally pings, melee ring-slots, the
//! per-agent decision state machine, and damage/recovery (`spec.md`
//! §4.7–§4.10). Every system here skips entities carrying `DeadTag`.

pub mod ai_decision;
pub mod ally_ping;
pub mod damage;
pub mod melee_slots;
pub mod threat_scan;
