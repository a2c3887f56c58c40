// Domain layer: value types, plural rules and the translation port.

pub mod model;
pub mod plural;
pub mod ports;
