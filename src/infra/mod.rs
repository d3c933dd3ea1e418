//! Инфраструктура движка: источники случайности, деривация seed'ов,
//! генерация идентификаторов.

pub mod ids;
pub mod rng;
pub mod rng_seed;

pub use ids::IdGenerator;
pub use rng::{DeterministicRng, SystemRng};
pub use rng_seed::RngSeed;
