pub mod constants;
pub mod error;
pub mod field;
pub mod lifecycle;
pub mod math;
pub mod nav;
pub mod params;
pub mod rail;
pub mod rng;
pub mod schedule;
pub mod scroll;
pub mod shapes;
pub mod sprite;
pub mod store;
pub mod surface;

pub use constants::*;
pub use error::*;
pub use field::*;
pub use lifecycle::*;
pub use math::*;
pub use nav::*;
pub use params::*;
pub use rail::*;
pub use rng::*;
pub use schedule::*;
pub use scroll::*;
pub use shapes::*;
pub use sprite::*;
pub use store::*;
pub use surface::*;
