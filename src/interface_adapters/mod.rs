// Interface adapters: serialization surface for presentation and transport
// layers.

pub mod protocol;
