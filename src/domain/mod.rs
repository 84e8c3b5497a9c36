// Domain layer - Pure types, no I/O
pub mod location;
pub mod measurement;
pub mod series;
