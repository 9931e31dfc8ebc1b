use mob_core::{CoreError, MobId};
use mob_goal::GoalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("mob {0} not found")]
    MobNotFound(MobId),

    #[error("goal error: {0}")]
    Goal(#[from] GoalError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
