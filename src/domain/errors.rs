use thiserror::Error;

use super::models::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown meal category: {0}")]
    UnknownCategory(String),
    #[error("Unknown entity code: {0}")]
    UnknownEntity(String),
    #[error("Unknown order type: {0}")]
    UnknownOrderType(String),
    #[error("Invalid wizard step: {0}")]
    InvalidStep(usize),
    #[error("Entity {0} is not selected")]
    EntityNotSelected(Entity),
    #[error("Slot {index} is out of range for {entity} (count {count})")]
    SlotOutOfRange { entity: Entity, index: usize, count: u32 },
    #[error("Headcount for {entity} cannot exceed {max} (got {count})")]
    HeadcountTooLarge { entity: Entity, count: u32, max: u32 },
    #[error("Order draft is incomplete: {0}")]
    IncompleteDraft(&'static str),
}

pub type DomainResult<T> = Result<T, DomainError>;
